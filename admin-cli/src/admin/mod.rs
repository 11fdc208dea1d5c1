//! Admin view logic independent of any terminal: the access gate, the
//! identity login policy, the contact fetch and the CSV export.

pub mod export;
pub mod fetch;
pub mod gate;
pub mod login;

pub use export::{build_export, can_export, write_export};
pub use fetch::{classify, fetch_contacts, FetchError, FetchFailure, HttpConnector, StoreConnector};
pub use gate::{AdminGate, GateError, GateState};
pub use login::{login_with_recovery, LoginOutcome, RELOGIN_DELAY};
