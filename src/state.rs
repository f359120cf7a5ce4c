//! In-memory application state backed by a [`KeyValueStore`].
//!
//! Mutating commands build the new collection, write it through the store,
//! and only then swap it into memory. A failed write leaves both copies as
//! they were.

use chrono::NaiveDate;

use crate::commands::history;
use crate::db::{read_bills, read_list, write_list, Database, KeyValueStore, StoreKey};
use crate::error::{Result, StoreError};
use crate::models::{Bill, Product};
use crate::session::QuantitySession;

pub struct BillBook<S: KeyValueStore = Database> {
    store: S,
    pub(crate) products: Vec<Product>,
    pub(crate) session: QuantitySession,
    pub(crate) history: Vec<Bill>,
    pub(crate) archive: Vec<Bill>,
}

impl<S: KeyValueStore> BillBook<S> {
    /// Reads the catalog, history and archive, then moves every history bill
    /// not dated `today` into the archive.
    ///
    /// # Errors
    ///
    /// Returns `BillError::Store` if a key cannot be read, decoded, or the
    /// archive pass cannot be persisted.
    pub fn load(store: S, today: NaiveDate) -> Result<Self> {
        let products = read_list(&store, StoreKey::Products)?;
        let history = read_bills(&store, StoreKey::History)?;
        let archive = read_bills(&store, StoreKey::Archive)?;

        let mut book = Self {
            store,
            products,
            session: QuantitySession::new(),
            history,
            archive,
        };

        let pass = history::archive_stale_bills(&mut book, today)?;
        tracing::info!(
            products = book.products.len(),
            kept = pass.kept,
            archived = pass.archived,
            %today,
            "Bill book loaded"
        );

        Ok(book)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn session(&self) -> &QuantitySession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut QuantitySession {
        &mut self.session
    }

    /// Newest first.
    pub fn history(&self) -> &[Bill] {
        &self.history
    }

    pub fn archive(&self) -> &[Bill] {
        &self.archive
    }

    pub(crate) fn commit_products(&mut self, products: Vec<Product>) -> Result<()> {
        write_list(&self.store, StoreKey::Products, &products)?;
        self.products = products;
        Ok(())
    }

    pub(crate) fn commit_history(&mut self, history: Vec<Bill>) -> Result<()> {
        write_list(&self.store, StoreKey::History, &history)?;
        self.history = history;
        Ok(())
    }

    /// Writes history and archive in one atomic store call.
    pub(crate) fn commit_lifecycle(&mut self, history: Vec<Bill>, archive: Vec<Bill>) -> Result<()> {
        let history_json = serde_json::to_string(&history).map_err(StoreError::from)?;
        let archive_json = serde_json::to_string(&archive).map_err(StoreError::from)?;

        self.store.set_many(&[
            (StoreKey::History, history_json),
            (StoreKey::Archive, archive_json),
        ])?;
        self.history = history;
        self.archive = archive;
        Ok(())
    }
}
