use habitpro_types::{ContactRecord, ContactStore, ContactStoreError, HttpContactStore};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{error, info};

use crate::identity::Identity;

pub const ACCESS_DENIED_MESSAGE: &str = "Access denied. You need admin permissions to view this data. Please ensure you are logged in with an admin account.";
pub const UNKNOWN_FAILURE_MESSAGE: &str = "Failed to load customer data. Please try again.";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Store(#[from] ContactStoreError),

    /// The fetch task ended without producing a result
    #[error("contact fetch was aborted")]
    Aborted,
}

/// What the admin sees when the contact list could not be loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    AccessDenied,
    Failed(String),
    Unknown,
}

impl FetchFailure {
    pub fn message(&self) -> String {
        match self {
            Self::AccessDenied => ACCESS_DENIED_MESSAGE.to_string(),
            Self::Failed(msg) => format!("Failed to load customer data: {}", msg),
            Self::Unknown => UNKNOWN_FAILURE_MESSAGE.to_string(),
        }
    }
}

/// Map a fetch error to its display form. Only the message text is
/// inspected, so any store reporting "Unauthorized" is treated alike.
pub fn classify(err: &FetchError) -> FetchFailure {
    match err {
        FetchError::Aborted => FetchFailure::Unknown,
        FetchError::Store(e) => {
            let msg = e.to_string();
            if msg.contains("Unauthorized") {
                FetchFailure::AccessDenied
            } else {
                FetchFailure::Failed(msg)
            }
        }
    }
}

/// Opens a contact store on behalf of an authenticated admin
pub trait StoreConnector: Send + Sync {
    fn connect(&self, identity: &Identity) -> Result<Arc<dyn ContactStore>, ContactStoreError>;
}

/// Connects to the HTTP contact store with the identity's bearer token
pub struct HttpConnector {
    url: String,
    timeout: Duration,
}

impl HttpConnector {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
        }
    }
}

impl StoreConnector for HttpConnector {
    fn connect(&self, identity: &Identity) -> Result<Arc<dyn ContactStore>, ContactStoreError> {
        let store = HttpContactStore::new(&self.url, self.timeout)?
            .with_bearer(identity.access_token());
        Ok(Arc::new(store))
    }
}

/// List contacts on a separate task so a panicking store surfaces as
/// [`FetchError::Aborted`] instead of taking down the caller.
pub async fn fetch_contacts(store: Arc<dyn ContactStore>) -> Result<Vec<ContactRecord>, FetchError> {
    let handle = tokio::spawn(async move { store.list_contacts().await });

    match handle.await {
        Ok(Ok(records)) => {
            info!("Loaded {} contact submissions", records.len());
            Ok(records)
        }
        Ok(Err(e)) => {
            error!("Contact fetch failed: {}", e);
            Err(FetchError::Store(e))
        }
        Err(e) => {
            error!("Contact fetch task ended abnormally: {}", e);
            Err(FetchError::Aborted)
        }
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use async_trait::async_trait;
    use habitpro_types::{ContactRecord, ContactStore, ContactStoreError, ContactSubmission};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::StoreConnector;
    use crate::identity::Identity;

    pub enum Listing {
        Records(Vec<ContactRecord>),
        Unauthorized,
        Down,
        Panic,
    }

    /// Contact store counting list calls
    pub struct CountingStore {
        listing: Listing,
        lists: AtomicUsize,
    }

    impl CountingStore {
        pub fn new(listing: Listing) -> Arc<Self> {
            Arc::new(Self {
                listing,
                lists: AtomicUsize::new(0),
            })
        }

        pub fn lists(&self) -> usize {
            self.lists.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ContactStore for CountingStore {
        async fn save_contact(&self, _submission: &ContactSubmission) -> Result<(), ContactStoreError> {
            Ok(())
        }

        async fn list_contacts(&self) -> Result<Vec<ContactRecord>, ContactStoreError> {
            self.lists.fetch_add(1, Ordering::SeqCst);
            match &self.listing {
                Listing::Records(records) => Ok(records.clone()),
                Listing::Unauthorized => Err(ContactStoreError::Unauthorized("not an admin".into())),
                Listing::Down => Err(ContactStoreError::Unreachable("connection refused".into())),
                Listing::Panic => panic!("store exploded"),
            }
        }
    }

    /// Hands out the same store for every identity
    pub struct FixedConnector(pub Arc<CountingStore>);

    impl StoreConnector for FixedConnector {
        fn connect(&self, _identity: &Identity) -> Result<Arc<dyn ContactStore>, ContactStoreError> {
            Ok(self.0.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::{CountingStore, Listing};
    use super::*;

    #[test]
    fn test_unauthorized_is_access_denied() {
        let err = FetchError::Store(ContactStoreError::Unauthorized("403".into()));
        let failure = classify(&err);
        assert_eq!(failure, FetchFailure::AccessDenied);
        assert_eq!(failure.message(), ACCESS_DENIED_MESSAGE);
    }

    #[test]
    fn test_other_errors_carry_message() {
        let err = FetchError::Store(ContactStoreError::Unreachable("timeout".into()));
        assert_eq!(
            classify(&err).message(),
            "Failed to load customer data: Unable to connect to the backend: timeout"
        );
    }

    #[test]
    fn test_rejection_mentioning_unauthorized_is_denied() {
        let err = FetchError::Store(ContactStoreError::Rejected {
            status: 500,
            body: "Unauthorized caller".into(),
        });
        assert_eq!(classify(&err), FetchFailure::AccessDenied);
    }

    #[test]
    fn test_aborted_is_unknown() {
        assert_eq!(classify(&FetchError::Aborted).message(), UNKNOWN_FAILURE_MESSAGE);
    }

    #[tokio::test]
    async fn test_fetch_returns_records() {
        let records = vec![ContactRecord {
            email: "a@b.com".into(),
            mobile: "9123456789".into(),
            timestamp: 1,
        }];
        let store = CountingStore::new(Listing::Records(records.clone()));
        let loaded = fetch_contacts(store.clone()).await.unwrap();
        assert_eq!(loaded, records);
        assert_eq!(store.lists(), 1);
    }

    #[tokio::test]
    async fn test_fetch_maps_store_errors() {
        let store = CountingStore::new(Listing::Unauthorized);
        let err = fetch_contacts(store).await.unwrap_err();
        assert_eq!(classify(&err), FetchFailure::AccessDenied);

        let store = CountingStore::new(Listing::Down);
        let err = fetch_contacts(store).await.unwrap_err();
        assert!(matches!(classify(&err), FetchFailure::Failed(_)));
    }

    #[tokio::test]
    async fn test_panicking_store_is_aborted() {
        let store = CountingStore::new(Listing::Panic);
        let err = fetch_contacts(store).await.unwrap_err();
        assert!(matches!(err, FetchError::Aborted));
    }
}
