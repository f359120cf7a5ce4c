use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Defines an opaque string ID. New IDs are UUIDv7 text, so they sort in
/// creation order; any stored string is accepted when loading.
macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            #[must_use]
            pub fn generate() -> Self {
                Self(Uuid::now_v7().to_string())
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }
    };
}

define_id!(ProductId);
define_id!(BillId);

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal, // unit price
}

/// One line of a saved bill, copied by value from the catalog at save time.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct BillLineItem {
    pub name: String,
    pub qty: Decimal,
    pub price: Decimal,
}

impl BillLineItem {
    /// `None` when the product does not fit in a `Decimal`.
    #[must_use]
    pub fn line_total(&self) -> Option<Decimal> {
        self.qty.checked_mul(self.price)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Bill {
    pub id: BillId,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub items: Vec<BillLineItem>,
    pub total: Decimal,
}

impl Bill {
    #[must_use]
    pub fn total_quantity(&self) -> Option<Decimal> {
        self.items
            .iter()
            .try_fold(Decimal::ZERO, |sum, item| sum.checked_add(item.qty))
    }
}

/// Totals over the bills in history dated a given day.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub bill_count: usize,
    pub total_quantity: Decimal,
    pub total_amount: Decimal,
}

/// Result of one history-to-archive migration pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ArchivePass {
    pub kept: usize,
    pub archived: usize,
}
