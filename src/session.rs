//! Session
//!
//! One shopper's cart and search state, borrowed against a shared [`Catalog`].
//!
//! Every operation runs to completion and returns a value describing what changed; rendering is
//! left to the caller. Operations that the storefront would announce with a toast also queue a
//! [`Notice`], which the view drains with [`Session::drain_notices`].

use std::time::Instant;

use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    cart::{Cart, CartChange, CartError, LineItem, Totals, clamp_quantity},
    catalog::Catalog,
    config::{ConfigError, SessionConfig},
    newsletter::{EmailAddress, NewsletterError, validate_email},
    notices::{Notice, NoticeLevel, NoticeQueue},
    products::{Product, ProductId},
    search::{
        SearchOutcome, SearchState,
        debounce::{Debouncer, TimerHandle},
        execute, is_searchable, normalize_query,
    },
};

/// Session errors
#[derive(Debug, Error)]
pub enum SessionError {
    /// No catalog product has this id.
    #[error("Product {0} not found")]
    NotFound(ProductId),

    /// The session config is out of range.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Wrapped cart error
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Wrapped newsletter error
    #[error(transparent)]
    Newsletter(#[from] NewsletterError),
}

/// Result of removing a product from the cart.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoveOutcome<'a> {
    /// The line was removed.
    Removed(LineItem<'a>),

    /// The product was not in the cart; nothing changed.
    NoOp,
}

/// Result of scheduling a typed search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheduled {
    /// The query will run once the debounce window passes.
    Pending(TimerHandle),

    /// The query was too short to run; any pending search was cancelled and results cleared.
    Cleared,
}

/// Session
#[derive(Debug)]
pub struct Session<'a> {
    catalog: &'a Catalog<'a>,
    cart: Cart<'a>,
    search: SearchState,
    debouncer: Debouncer,
    notices: NoticeQueue,
    config: SessionConfig,
}

impl<'a> Session<'a> {
    /// Start a session against `catalog` with an empty cart.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError::Config`] if `config` fails [`SessionConfig::validate`].
    pub fn new(catalog: &'a Catalog<'a>, config: SessionConfig) -> Result<Self, SessionError> {
        config.validate()?;

        Ok(Self::with_valid_config(catalog, config))
    }

    /// Start a session with the default config.
    pub fn with_defaults(catalog: &'a Catalog<'a>) -> Self {
        Self::with_valid_config(catalog, SessionConfig::default())
    }

    fn with_valid_config(catalog: &'a Catalog<'a>, config: SessionConfig) -> Self {
        Self {
            catalog,
            cart: Cart::new(catalog.currency()),
            search: SearchState::default(),
            debouncer: Debouncer::new(config.search_debounce()),
            notices: NoticeQueue::new(config.notice_capacity),
            config,
        }
    }

    /// Add `quantity` of a product to the cart.
    ///
    /// `quantity` is clamped to `[1, max_quantity]` first. Adding a product that is already in
    /// the cart grows its line by the clamped amount; the combined quantity is not clamped.
    ///
    /// # Errors
    ///
    /// - [`SessionError::NotFound`]: The id is not in the catalog. The cart is unchanged.
    /// - [`SessionError::Cart`]: The line quantity overflowed. The cart is unchanged.
    #[tracing::instrument(name = "session.add_item", skip(self), err)]
    pub fn add_item(
        &mut self,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<CartChange, SessionError> {
        let Some(product) = self.catalog.get(product_id) else {
            warn!(%product_id, "add to cart for unknown product");

            self.notify(NoticeLevel::Error, "Product not found!");

            return Err(SessionError::NotFound(product_id));
        };

        let quantity = clamp_quantity(quantity, self.config.max_quantity);
        let change = self.cart.add(product, quantity)?;

        match change {
            CartChange::Added { quantity } => {
                debug!(%product_id, quantity, "added line");

                self.notify(
                    NoticeLevel::Success,
                    format!("{} added to cart!", product.name),
                );
            }
            CartChange::Updated { quantity } => {
                debug!(%product_id, quantity, "updated line");

                self.notify(
                    NoticeLevel::Success,
                    format!("{} quantity updated! Now {quantity} in cart", product.name),
                );
            }
        }

        Ok(change)
    }

    /// Remove a product's line from the cart. Removing an absent product is a no-op.
    #[tracing::instrument(name = "session.remove_item", skip(self))]
    pub fn remove_item(&mut self, product_id: ProductId) -> RemoveOutcome<'a> {
        let Some(line) = self.cart.remove(product_id) else {
            debug!(%product_id, "remove for product not in cart");

            return RemoveOutcome::NoOp;
        };

        debug!(%product_id, quantity = line.quantity(), "removed line");

        self.notify(
            NoticeLevel::Info,
            format!("{} removed from cart", line.name()),
        );

        RemoveOutcome::Removed(line)
    }

    /// Empty the cart, returning the removed lines in cart order.
    pub fn clear_cart(&mut self) -> Vec<LineItem<'a>> {
        let removed = self.cart.clear();

        debug!(lines = removed.len(), "cleared cart");

        removed
    }

    /// Item count and grand total, recomputed from the current lines.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError::Cart`] if the grand total overflows.
    pub fn totals(&self) -> Result<Totals<'a>, SessionError> {
        Ok(self.cart.totals()?)
    }

    /// Run a search immediately and record it as the active search.
    ///
    /// Queries shorter than `min_query_len` after trimming yield [`SearchOutcome::Inactive`] and
    /// clear the active search.
    #[tracing::instrument(name = "session.search", skip(self))]
    pub fn search(&mut self, query: &str) -> SearchOutcome<'a> {
        let normalized = normalize_query(query);

        self.run_search(&normalized)
    }

    /// Schedule a typed query to run once the debounce window passes.
    ///
    /// Any previously scheduled query is cancelled. Queries too short to run cancel the pending
    /// query and clear the active search straight away.
    #[tracing::instrument(name = "session.schedule_search", skip(self, now))]
    pub fn schedule_search(&mut self, query: &str, now: Instant) -> Scheduled {
        let normalized = normalize_query(query);

        if !is_searchable(&normalized, self.config.min_query_len) {
            self.debouncer.cancel();
            self.search.clear();

            debug!("cleared search");

            return Scheduled::Cleared;
        }

        let handle = self.debouncer.schedule(normalized, now);

        debug!(?handle, "scheduled search");

        Scheduled::Pending(handle)
    }

    /// Run the scheduled query if its debounce window has passed at `now`.
    pub fn poll_search(&mut self, now: Instant) -> Option<SearchOutcome<'a>> {
        let query = self.debouncer.take_due(now)?;

        Some(self.run_search(&query))
    }

    /// Run the scheduled query if `handle` still identifies it; stale handles do nothing.
    pub fn fire(&mut self, handle: TimerHandle) -> Option<SearchOutcome<'a>> {
        let Some(query) = self.debouncer.take_if_current(handle) else {
            debug!(?handle, "ignored stale search timer");

            return None;
        };

        Some(self.run_search(&query))
    }

    /// Cancel the scheduled query, returning whether there was one.
    pub fn cancel_search(&mut self) -> bool {
        self.debouncer.cancel().is_some()
    }

    /// Run a query straight away, as when the search button is pressed.
    ///
    /// Cancels any scheduled query. A blank or too short query queues a warning instead of
    /// searching.
    #[tracing::instrument(name = "session.submit_search", skip(self))]
    pub fn submit_search(&mut self, query: &str) -> SearchOutcome<'a> {
        self.debouncer.cancel();

        let normalized = normalize_query(query);
        let min_len = self.config.min_query_len;

        if !is_searchable(&normalized, min_len) {
            self.search.clear();

            if normalized.is_empty() {
                self.notify(NoticeLevel::Warning, "Please enter a search term");
            } else {
                self.notify(
                    NoticeLevel::Warning,
                    format!("Please enter at least {min_len} characters"),
                );
            }

            return SearchOutcome::Inactive;
        }

        self.notify(
            NoticeLevel::Info,
            format!("Searching for \"{normalized}\"..."),
        );

        self.run_search(&normalized)
    }

    /// Re-run a query when the search field regains focus, if it is long enough to run.
    pub fn refresh_search(&mut self, query: &str) -> Option<SearchOutcome<'a>> {
        let normalized = normalize_query(query);

        if !is_searchable(&normalized, self.config.min_query_len) {
            return None;
        }

        Some(self.run_search(&normalized))
    }

    /// Pick a product from the search results.
    ///
    /// Cancels any scheduled query and clears the active search, as the result list closes and the
    /// search field empties.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotFound`] if the id is not in the catalog. Nothing changes.
    #[tracing::instrument(name = "session.select_result", skip(self), err)]
    pub fn select_result(
        &mut self,
        product_id: ProductId,
    ) -> Result<&'a Product<'a>, SessionError> {
        let Some(product) = self.catalog.get(product_id) else {
            warn!(%product_id, "selected unknown search result");

            return Err(SessionError::NotFound(product_id));
        };

        self.debouncer.cancel();
        self.search.clear();

        self.notify(NoticeLevel::Success, format!("Found {}!", product.name));

        Ok(product)
    }

    /// Validate a newsletter sign-up and queue the matching notice.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError::Newsletter`] if the address is invalid.
    pub fn subscribe(&mut self, email: &str) -> Result<EmailAddress, SessionError> {
        match validate_email(email) {
            Ok(address) => {
                debug!(%address, "newsletter sign-up");

                self.notify(
                    NoticeLevel::Success,
                    "Welcome to the family! Check your email for exclusive offers.",
                );

                Ok(address)
            }
            Err(err) => {
                self.notify(NoticeLevel::Error, "Please enter a valid email address");

                Err(err.into())
            }
        }
    }

    /// The cart.
    pub fn cart(&self) -> &Cart<'a> {
        &self.cart
    }

    /// The active search.
    pub fn search_state(&self) -> &SearchState {
        &self.search
    }

    /// Products matched by the active search, in catalog order.
    pub fn search_results(&self) -> Vec<&'a Product<'a>> {
        let catalog = self.catalog;

        self.search
            .results()
            .iter()
            .filter_map(|&id| catalog.get(id))
            .collect()
    }

    /// The query waiting for its debounce window, if any.
    pub fn pending_search(&self) -> Option<&str> {
        self.debouncer.pending_query()
    }

    /// When the scheduled query becomes due, if any.
    pub fn search_due_at(&self) -> Option<Instant> {
        self.debouncer.due_at()
    }

    /// Remove and return queued notices, oldest first.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        self.notices.drain()
    }

    /// The most recent queued notice.
    pub fn latest_notice(&self) -> Option<&Notice> {
        self.notices.latest()
    }

    /// The catalog this session reads from.
    pub fn catalog(&self) -> &'a Catalog<'a> {
        self.catalog
    }

    /// The session config.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    fn run_search(&mut self, normalized: &str) -> SearchOutcome<'a> {
        let outcome = execute(self.catalog, normalized, self.config.min_query_len);

        self.search.record(normalized, &outcome);

        debug!(
            query = normalized,
            matches = outcome.products().len(),
            "ran search"
        );

        outcome
    }

    fn notify(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.notices
            .push(Notice::new(level, message, self.config.notice_duration()));
    }
}
