use std::fmt;

/// User-facing notification, shown with a title and a message and
/// acknowledged by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    NoItems,
    Saved,
    NothingToClear,
    ConfirmClearToday,
    Cleared,
    ShareError(String),
    AmountTooLarge,
}

impl Notice {
    pub fn title(&self) -> &str {
        match self {
            Self::NoItems => "No items",
            Self::Saved => "Saved",
            Self::NothingToClear => "Nothing to clear",
            Self::ConfirmClearToday => "Clear Today?",
            Self::Cleared => "Cleared",
            Self::ShareError(_) => "Share Error",
            Self::AmountTooLarge => "Amount too large",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::NoItems => "Please enter quantity before saving.",
            Self::Saved => "Bill stored in history successfully!",
            Self::NothingToClear => "No bills found for today.",
            Self::ConfirmClearToday => "This will delete all today's bills permanently.",
            Self::Cleared => "Today's bills removed.",
            Self::ShareError(reason) => reason,
            Self::AmountTooLarge => "Reduce the quantity or price and try again.",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title(), self.message())
    }
}
