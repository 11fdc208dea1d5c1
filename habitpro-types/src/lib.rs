//! Shared types for Habit Tracker Pro.
//!
//! This crate holds the data model exchanged with the contact store, the
//! lead-capture field rules, the UPI payment details and the notice type that
//! both the public site and the admin console render.

pub mod contact;
pub mod notice;
pub mod payment;
#[cfg(feature = "client")]
pub mod store;
pub mod validation;

pub use contact::{format_submitted_at, ContactRecord, ContactSubmission};
pub use notice::{Notice, NoticeLevel};
pub use payment::UpiPayment;
#[cfg(feature = "client")]
pub use store::{ContactStore, ContactStoreError, HttpContactStore};
pub use validation::{validate_email, validate_mobile, FieldErrors, ValidationError};

/// Product name shown on every surface.
pub const PRODUCT_NAME: &str = "Habit Tracker Pro";
