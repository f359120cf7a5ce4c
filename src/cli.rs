//! Command-line front end.
//!
//! # Usage
//!
//! ```bash
//! # Manage the catalog
//! quick-bill products add Milk 50
//! quick-bill products price Milk 52.5
//! quick-bill products delete Milk
//!
//! # Compute a bill, then save or share it
//! quick-bill bill --qty Milk=3 --qty Bread=1
//! quick-bill bill --qty Milk=3 --save
//! quick-bill bill --qty Milk=3 --share --out receipt.txt
//!
//! # Today's bills and the archive
//! quick-bill history summary
//! quick-bill history clear-today --yes
//! quick-bill archive list --from 2026-01-01
//! ```

use chrono::{NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::bills::{self, format_money, ShareOutcome, CURRENCY_SYMBOL};
use crate::commands::{history, products};
use crate::db::KeyValueStore;
use crate::error::BillError;
use crate::models::Bill;
use crate::notice::Notice;
use crate::share::{FileShare, ShareSurface, StdoutShare};
use crate::state::BillBook;

#[derive(Parser)]
#[command(name = "quick-bill")]
#[command(author, version, about = "Bill calculator with daily history and archive")]
pub struct Cli {
    /// Database file (overrides QUICK_BILL_DATA_DIR / QUICK_BILL_DB_FILE)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage the product catalog
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Compute a bill from quantities, optionally saving or sharing it
    Bill {
        /// Quantity for a product, as PRODUCT=QTY (PRODUCT is an id or name)
        #[arg(short, long = "qty", value_name = "PRODUCT=QTY")]
        quantities: Vec<String>,

        /// Save the bill to history
        #[arg(long, conflicts_with = "share")]
        save: bool,

        /// Log the bill and share the receipt
        #[arg(long)]
        share: bool,

        /// Write the shared receipt to this file instead of stdout
        #[arg(long, requires = "share")]
        out: Option<PathBuf>,
    },
    /// Today's bills
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
    /// Bills from earlier days
    Archive {
        #[command(subcommand)]
        action: ArchiveAction,
    },
}

#[derive(Subcommand)]
pub enum ProductAction {
    /// List products in catalog order
    List,
    /// Add a product
    Add { name: String, price: String },
    /// Change a product's unit price
    Price { product: String, price: String },
    /// Delete a product
    Delete { product: String },
}

#[derive(Subcommand)]
pub enum HistoryAction {
    /// List history, newest first
    List,
    /// Bill count, quantity and amount for today
    Summary,
    /// Delete today's bills
    ClearToday {
        /// Skip the confirmation notice
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum ArchiveAction {
    /// List archived bills
    List {
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        to: Option<NaiveDate>,
    },
}

pub fn dispatch<S: KeyValueStore>(
    book: &mut BillBook<S>,
    command: Commands,
    now: NaiveDateTime,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Products { action } => run_product_action(book, action)?,
        Commands::Bill {
            quantities,
            save,
            share,
            out,
        } => run_bill(book, &quantities, save, share, out, now)?,
        Commands::History { action } => run_history_action(book, action, now.date())?,
        Commands::Archive {
            action: ArchiveAction::List { from, to },
        } => {
            let bills = history::get_archive_by_date_range(book, from, to);
            if bills.is_empty() {
                println!("No archived bills.");
            }
            for bill in bills {
                print_bill(bill);
            }
        }
    }
    Ok(())
}

fn run_product_action<S: KeyValueStore>(
    book: &mut BillBook<S>,
    action: ProductAction,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ProductAction::List => {
            let catalog = products::get_products(book);
            if catalog.is_empty() {
                println!("No products added yet.");
            }
            for product in catalog {
                println!("{}  {}  {}{}", product.id, product.name, CURRENCY_SYMBOL, product.price);
            }
        }
        ProductAction::Add { name, price } => {
            let product = products::add_product(book, &name, &price)?;
            println!("Added {} ({})", product.name, product.id);
        }
        ProductAction::Price { product, price } => {
            let id = resolve_product(book, &product)?;
            let updated = products::update_product_price(book, &id, &price)?;
            println!("{} now {}{}", updated.name, CURRENCY_SYMBOL, updated.price);
        }
        ProductAction::Delete { product } => {
            let id = resolve_product(book, &product)?;
            products::delete_product(book, &id)?;
            println!("Deleted {product}");
        }
    }
    Ok(())
}

fn run_bill<S: KeyValueStore>(
    book: &mut BillBook<S>,
    quantities: &[String],
    save: bool,
    share: bool,
    out: Option<PathBuf>,
    now: NaiveDateTime,
) -> Result<(), Box<dyn std::error::Error>> {
    for entry in quantities {
        let (product, qty) = entry
            .split_once('=')
            .ok_or_else(|| format!("Expected PRODUCT=QTY, got '{entry}'"))?;
        let id = resolve_product(book, product)?;
        book.session_mut().set_quantity(id, qty);
    }

    let total = match bills::grand_total(book.products(), book.session()) {
        Ok(total) => total,
        Err(e) => return report(e),
    };
    for product in book.products() {
        let raw = book.session().raw(&product.id).unwrap_or_default();
        println!("{:<20} {:>6}  {:>10}", product.name, raw, format_money(bills::line_total(product, raw)?));
    }
    println!("Total Price: {}", format_money(total));

    if save {
        match bills::save_current_bill(book, now) {
            Ok(_) => println!("{}", Notice::Saved),
            Err(e) => return report(e),
        }
    } else if share {
        let surface: Box<dyn ShareSurface> = match out {
            Some(path) => Box::new(FileShare { path }),
            None => Box::new(StdoutShare),
        };
        match bills::share_bill(book, surface.as_ref(), now) {
            Ok(ShareOutcome::Shared(bill)) => tracing::debug!(bill_id = %bill.id, "Receipt shared"),
            Ok(ShareOutcome::NothingToShare) => {}
            Ok(ShareOutcome::Failed { error, .. }) => println!("{}", Notice::ShareError(error.to_string())),
            Err(e) => return report(e),
        }
    }

    Ok(())
}

fn run_history_action<S: KeyValueStore>(
    book: &mut BillBook<S>,
    action: HistoryAction,
    today: NaiveDate,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        HistoryAction::List => {
            let bills = history::get_history(book);
            if bills.is_empty() {
                println!("No history yet.");
            }
            for bill in bills {
                print_bill(bill);
            }
        }
        HistoryAction::Summary => {
            let summary = match history::day_summary(book, today) {
                Ok(summary) => summary,
                Err(e) => return report(e),
            };
            println!("Today Summary ({})", summary.date);
            println!("Bills: {}", summary.bill_count);
            println!("Total Quantity: {}", summary.total_quantity.normalize());
            println!("Total Amount: {}", format_money(summary.total_amount));
        }
        HistoryAction::ClearToday { yes } => {
            if !yes {
                println!("{}", Notice::ConfirmClearToday);
                println!("Re-run with --yes to delete.");
                return Ok(());
            }
            match history::clear_today(book, today) {
                Ok(_) => println!("{}", Notice::Cleared),
                Err(e) => return report(e),
            }
        }
    }
    Ok(())
}

/// Prints the notice for a recoverable error, propagates anything else.
fn report(e: BillError) -> Result<(), Box<dyn std::error::Error>> {
    match e.notice() {
        Some(notice) => {
            println!("{notice}");
            Ok(())
        }
        None => Err(e.into()),
    }
}

fn resolve_product<S: KeyValueStore>(
    book: &BillBook<S>,
    query: &str,
) -> Result<crate::models::ProductId, Box<dyn std::error::Error>> {
    products::find_product(book, query)
        .map(|p| p.id.clone())
        .ok_or_else(|| format!("Unknown product: {query}").into())
}

fn print_bill(bill: &Bill) {
    println!("{} - {}", bill.date, bill.time);
    for item in &bill.items {
        println!("  {}: {} x {}{}", item.name, item.qty.normalize(), CURRENCY_SYMBOL, item.price.normalize());
    }
    println!("  Total: {}", format_money(bill.total));
}
