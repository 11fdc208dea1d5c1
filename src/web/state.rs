use habitpro_types::{ContactStore, UpiPayment};
use std::sync::Arc;

/// Application state for web handlers
#[derive(Clone)]
pub struct AppState {
    /// `None` when the contact store client could not be built
    pub store: Option<Arc<dyn ContactStore>>,
    pub payment: Arc<UpiPayment>,
}

impl AppState {
    pub fn new(store: Option<Arc<dyn ContactStore>>, payment: UpiPayment) -> Self {
        Self {
            store,
            payment: Arc::new(payment),
        }
    }
}
