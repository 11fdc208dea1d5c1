//! Lead capture and manual UPI checkout.
//!
//! A visitor submits an email and mobile number; once the contact store has
//! accepted them the form freezes and the payment instructions are shown.

pub mod form;
pub mod payment;

pub use form::{CheckoutForm, CheckoutStage};
pub use payment::PaymentInstructions;
