pub mod schema;
pub mod store;

pub use schema::IdentitySettings;
pub use store::ConfigStore;
