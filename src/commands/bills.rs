use chrono::{NaiveDateTime, Timelike};
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt::Write as _;

use crate::db::KeyValueStore;
use crate::error::{BillError, Result, ShareError};
use crate::models::{Bill, BillId, BillLineItem, Product};
use crate::session::{parse_quantity, QuantitySession};
use crate::share::ShareSurface;
use crate::state::BillBook;

pub const CURRENCY_SYMBOL: &str = "₹";

const RECEIPT_HEADER: &str = "Bill Details:";

/// What happened to a share request.
#[derive(Debug)]
pub enum ShareOutcome {
    /// The bill was logged and handed to the share surface.
    Shared(Bill),
    /// No item had a quantity above zero; nothing was logged.
    NothingToShare,
    /// The bill was logged but the share surface failed.
    Failed { bill: Bill, error: ShareError },
}

/// Unrounded `qty * price` for one catalog row.
pub fn line_total(product: &Product, quantity_text: &str) -> Result<Decimal> {
    parse_quantity(quantity_text)
        .checked_mul(product.price)
        .ok_or(BillError::AmountOverflow)
}

/// Sum of line totals over the catalog. Session entries for products not in
/// the catalog never contribute.
pub fn grand_total(products: &[Product], session: &QuantitySession) -> Result<Decimal> {
    products.iter().try_fold(Decimal::ZERO, |sum, p| {
        session
            .quantity(&p.id)
            .checked_mul(p.price)
            .and_then(|line| sum.checked_add(line))
            .ok_or(BillError::AmountOverflow)
    })
}

/// Catalog rows with a quantity above zero, in catalog order.
pub fn eligible_items(products: &[Product], session: &QuantitySession) -> Vec<BillLineItem> {
    products
        .iter()
        .filter_map(|p| {
            let qty = session.quantity(&p.id);
            (qty > Decimal::ZERO).then(|| BillLineItem {
                name: p.name.clone(),
                qty,
                price: p.price,
            })
        })
        .collect()
}

pub fn build_bill(products: &[Product], session: &QuantitySession, now: NaiveDateTime) -> Result<Bill> {
    let items = eligible_items(products, session);
    if items.is_empty() {
        return Err(BillError::EmptyBill);
    }

    let time = now.time();

    Ok(Bill {
        id: BillId::generate(),
        date: now.date(),
        time: time.with_nanosecond(0).unwrap_or(time),
        items,
        total: grand_total(products, session)?,
    })
}

/// Prepends the bill to history, persists it, and clears the session.
pub fn save_bill<S: KeyValueStore>(book: &mut BillBook<S>, bill: Bill) -> Result<()> {
    let bill_id = bill.id.clone();
    let total = bill.total;

    book.commit_history(prepend(bill, &book.history))?;
    book.session.clear();

    tracing::info!(bill_id = %bill_id, total = %total, history_len = book.history.len(), "Bill saved");

    Ok(())
}

/// The "Save" action: builds a bill from the current session and saves it.
/// An empty session fails with `BillError::EmptyBill` and changes nothing.
pub fn save_current_bill<S: KeyValueStore>(book: &mut BillBook<S>, now: NaiveDateTime) -> Result<Bill> {
    let bill = build_bill(&book.products, &book.session, now)?;
    save_bill(book, bill.clone())?;
    Ok(bill)
}

/// Logs the current bill to history and hands the receipt text to `surface`.
///
/// Unlike [`save_current_bill`], an empty session is a silent no-op and the
/// session is left as it was. A share surface failure does not undo the
/// history entry.
pub fn share_bill<S: KeyValueStore>(
    book: &mut BillBook<S>,
    surface: &dyn ShareSurface,
    now: NaiveDateTime,
) -> Result<ShareOutcome> {
    let Some(receipt) = compose_receipt(&book.products, &book.session)? else {
        tracing::debug!("Share skipped, no items");
        return Ok(ShareOutcome::NothingToShare);
    };

    let bill = build_bill(&book.products, &book.session, now)?;
    book.commit_history(prepend(bill.clone(), &book.history))?;
    tracing::info!(bill_id = %bill.id, total = %bill.total, "Bill logged for sharing");

    match surface.share(&receipt) {
        Ok(()) => Ok(ShareOutcome::Shared(bill)),
        Err(error) => {
            tracing::warn!(bill_id = %bill.id, %error, "Share surface failed");
            Ok(ShareOutcome::Failed { bill, error })
        }
    }
}

/// Plain-text receipt for the current session, or `None` if no item has a
/// quantity above zero.
pub fn compose_receipt(products: &[Product], session: &QuantitySession) -> Result<Option<String>> {
    let items = eligible_items(products, session);
    if items.is_empty() {
        return Ok(None);
    }

    let mut text = format!("{RECEIPT_HEADER}\n");
    for item in &items {
        let line_total = item.line_total().ok_or(BillError::AmountOverflow)?;
        let _ = writeln!(
            text,
            "{}: {} x {}{} = {}",
            item.name,
            item.qty.normalize(),
            CURRENCY_SYMBOL,
            item.price.normalize(),
            format_money(line_total),
        );
    }
    let _ = write!(text, "\nTotal: {}", format_money(grand_total(products, session)?));

    Ok(Some(text))
}

/// Formats an amount with the currency symbol, rounded to 2 places.
pub fn format_money(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{CURRENCY_SYMBOL}{rounded:.2}")
}

fn prepend(bill: Bill, history: &[Bill]) -> Vec<Bill> {
    let mut updated = Vec::with_capacity(history.len() + 1);
    updated.push(bill);
    updated.extend(history.iter().cloned());
    updated
}
