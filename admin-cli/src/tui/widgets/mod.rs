pub mod form;
pub mod popup;
pub mod spinner;

pub use form::Form;
pub use popup::Popup;
pub use spinner::Spinner;
