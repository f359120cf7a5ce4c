use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::db::KeyValueStore;
use crate::error::{BillError, Result};
use crate::models::{ArchivePass, Bill, DaySummary};
use crate::state::BillBook;

/// Moves every history bill not dated `today` to the end of the archive,
/// keeping history order. History and archive are written together, so a
/// crash cannot leave a bill in both or in neither.
///
/// Running the pass again with no new bills changes nothing.
pub fn archive_stale_bills<S: KeyValueStore>(book: &mut BillBook<S>, today: NaiveDate) -> Result<ArchivePass> {
    let (todays, stale): (Vec<Bill>, Vec<Bill>) =
        book.history.iter().cloned().partition(|bill| bill.date == today);

    let pass = ArchivePass {
        kept: todays.len(),
        archived: stale.len(),
    };

    if stale.is_empty() {
        book.commit_history(todays)?;
    } else {
        let mut archive = book.archive.clone();
        archive.extend(stale);
        book.commit_lifecycle(todays, archive)?;

        tracing::info!(archived = pass.archived, archive_len = book.archive.len(), "Archived stale bills");
    }

    Ok(pass)
}

pub fn get_history<S: KeyValueStore>(book: &BillBook<S>) -> &[Bill] {
    book.history()
}

pub fn get_archive<S: KeyValueStore>(book: &BillBook<S>) -> &[Bill] {
    book.archive()
}

/// Archived bills dated within `from..=to`. Either bound may be open.
pub fn get_archive_by_date_range<S: KeyValueStore>(
    book: &BillBook<S>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Vec<&Bill> {
    book.archive
        .iter()
        .filter(|bill| from.map_or(true, |from| bill.date >= from))
        .filter(|bill| to.map_or(true, |to| bill.date <= to))
        .collect()
}

pub fn todays_bills<S: KeyValueStore>(book: &BillBook<S>, today: NaiveDate) -> Vec<&Bill> {
    book.history.iter().filter(|bill| bill.date == today).collect()
}

pub fn day_summary<S: KeyValueStore>(book: &BillBook<S>, today: NaiveDate) -> Result<DaySummary> {
    let bills = todays_bills(book, today);

    let total_quantity = bills.iter().try_fold(Decimal::ZERO, |sum, bill| {
        bill.total_quantity().and_then(|qty| sum.checked_add(qty))
    });
    let total_amount = bills
        .iter()
        .try_fold(Decimal::ZERO, |sum, bill| sum.checked_add(bill.total));

    Ok(DaySummary {
        date: today,
        bill_count: bills.len(),
        total_quantity: total_quantity.ok_or(BillError::AmountOverflow)?,
        total_amount: total_amount.ok_or(BillError::AmountOverflow)?,
    })
}

/// Deletes today's bills from history. The archive is never touched.
/// Confirming with the user is the caller's job.
pub fn clear_today<S: KeyValueStore>(book: &mut BillBook<S>, today: NaiveDate) -> Result<usize> {
    let remaining: Vec<Bill> = book.history.iter().filter(|bill| bill.date != today).cloned().collect();

    let removed = book.history.len() - remaining.len();
    if removed == 0 {
        return Err(BillError::NothingToClear);
    }

    book.commit_history(remaining)?;

    tracing::info!(removed, %today, "Cleared today's bills");

    Ok(removed)
}
