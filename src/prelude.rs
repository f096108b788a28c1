//! Pulp prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartChange, CartError, Totals, line_item::LineItem},
    catalog::{Catalog, CatalogError},
    config::{ConfigError, SessionConfig},
    fixtures::{Fixture, FixtureError},
    newsletter::{EmailAddress, NewsletterError, validate_email},
    notices::{Notice, NoticeLevel, NoticeQueue},
    pricing::{TotalPriceError, total_price},
    products::{Product, ProductId},
    receipt::{Receipt, ReceiptError},
    search::{SearchOutcome, SearchState, debounce::TimerHandle},
    session::{RemoveOutcome, Scheduled, Session, SessionError},
    tags::StringTagCollection,
};
