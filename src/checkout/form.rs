use habitpro_types::{ContactStore, ContactSubmission, FieldErrors, Notice};
use tracing::{error, info};

use crate::error::{AppError, AppResult};

pub const SAVED_MESSAGE: &str = "Details saved! Please proceed with payment.";
pub const SAVE_FAILED_MESSAGE: &str = "Failed to save details. Please try again.";
pub const BACKEND_UNAVAILABLE_MESSAGE: &str =
    "Unable to connect to the backend. Please refresh the page and try again.";

/// Where the visitor is in the checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutStage {
    /// Fields editable, submit enabled
    Editing,
    /// Save in flight, submit disabled
    Submitting,
    /// Saved; fields frozen and payment instructions visible
    PaymentShown,
}

/// State of the lead-capture form.
#[derive(Debug, Clone)]
pub struct CheckoutForm {
    submission: ContactSubmission,
    stage: CheckoutStage,
    errors: FieldErrors,
    notices: Vec<Notice>,
}

impl Default for CheckoutForm {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckoutForm {
    pub fn new() -> Self {
        Self {
            submission: ContactSubmission::default(),
            stage: CheckoutStage::Editing,
            errors: FieldErrors::default(),
            notices: Vec::new(),
        }
    }

    /// A form pre-filled with what the visitor typed.
    pub fn with_values(email: impl Into<String>, mobile: impl Into<String>) -> Self {
        Self {
            submission: ContactSubmission::new(email, mobile),
            ..Self::new()
        }
    }

    pub fn stage(&self) -> CheckoutStage {
        self.stage
    }

    pub fn submission(&self) -> &ContactSubmission {
        &self.submission
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Fields are frozen once the payment step is shown.
    pub fn fields_disabled(&self) -> bool {
        self.stage == CheckoutStage::PaymentShown
    }

    pub fn submit_disabled(&self) -> bool {
        self.stage != CheckoutStage::Editing
    }

    pub fn show_payment(&self) -> bool {
        self.stage == CheckoutStage::PaymentShown
    }

    /// Edit the email. Ignored once frozen.
    pub fn set_email(&mut self, email: impl Into<String>) -> bool {
        if self.fields_disabled() {
            return false;
        }
        self.submission.email = email.into();
        true
    }

    /// Edit the mobile number. Ignored once frozen.
    pub fn set_mobile(&mut self, mobile: impl Into<String>) -> bool {
        if self.fields_disabled() {
            return false;
        }
        self.submission.mobile = mobile.into();
        true
    }

    /// Validate and save the contact.
    ///
    /// Validation failures never reach the store. A store failure leaves the
    /// form editable so the visitor can submit again; nothing is retried.
    pub async fn submit(&mut self, store: &dyn ContactStore) -> AppResult<()> {
        self.submit_to(Some(store)).await
    }

    /// Like [`CheckoutForm::submit`], for a store client that may be missing.
    pub async fn submit_to(&mut self, store: Option<&dyn ContactStore>) -> AppResult<()> {
        if self.submit_disabled() {
            return Err(AppError::AlreadySubmitted);
        }

        if let Err(errors) = self.submission.validate() {
            self.errors = errors.clone();
            return Err(AppError::Validation(errors));
        }
        self.errors = FieldErrors::default();

        let Some(store) = store else {
            error!("Error saving customer data: no contact store client");
            self.notices.push(Notice::error(BACKEND_UNAVAILABLE_MESSAGE));
            return Err(AppError::StoreUnavailable);
        };

        self.stage = CheckoutStage::Submitting;
        match store.save_contact(&self.submission).await {
            Ok(()) => {
                info!("Saved contact for {}", self.submission.email);
                self.stage = CheckoutStage::PaymentShown;
                self.notices.push(Notice::success(SAVED_MESSAGE));
                Ok(())
            }
            Err(e) => {
                error!("Error saving customer data: {}", e);
                self.stage = CheckoutStage::Editing;
                self.notices.push(Notice::error(SAVE_FAILED_MESSAGE));
                Err(AppError::Store(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use habitpro_types::{ContactRecord, ContactStoreError, NoticeLevel, ValidationError};
    use proptest::prelude::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    #[derive(Default)]
    struct MockStore {
        fail: AtomicBool,
        saves: AtomicUsize,
    }

    #[async_trait]
    impl ContactStore for MockStore {
        async fn save_contact(&self, _submission: &ContactSubmission) -> Result<(), ContactStoreError> {
            self.saves.fetch_add(1, Ordering::SeqCst);
            if self.fail.load(Ordering::SeqCst) {
                Err(ContactStoreError::Unreachable("connection refused".into()))
            } else {
                Ok(())
            }
        }

        async fn list_contacts(&self) -> Result<Vec<ContactRecord>, ContactStoreError> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_valid_submission_shows_payment() {
        let store = MockStore::default();
        let mut form = CheckoutForm::with_values("a@b.com", "9123456789");

        form.submit(&store).await.unwrap();

        assert_eq!(form.stage(), CheckoutStage::PaymentShown);
        assert!(form.fields_disabled());
        assert!(form.submit_disabled());
        assert_eq!(store.saves.load(Ordering::SeqCst), 1);
        assert_eq!(form.notices().last().unwrap().message, SAVED_MESSAGE);
    }

    #[tokio::test]
    async fn test_invalid_fields_skip_store() {
        let store = MockStore::default();
        let mut form = CheckoutForm::with_values("userexample.com", "1234567890");

        let err = form.submit(&store).await.unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(form.errors().email, Some(ValidationError::InvalidEmail));
        assert_eq!(form.errors().mobile, Some(ValidationError::InvalidMobile));
        assert_eq!(form.stage(), CheckoutStage::Editing);
        assert_eq!(store.saves.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_store_failure_is_resubmittable() {
        let store = MockStore::default();
        store.fail.store(true, Ordering::SeqCst);
        let mut form = CheckoutForm::with_values("a@b.com", "9123456789");

        assert!(form.submit(&store).await.is_err());
        assert_eq!(form.stage(), CheckoutStage::Editing);
        assert_eq!(form.notices()[0].level, NoticeLevel::Error);
        assert_eq!(form.notices()[0].message, SAVE_FAILED_MESSAGE);
        // No automatic retry
        assert_eq!(store.saves.load(Ordering::SeqCst), 1);

        store.fail.store(false, Ordering::SeqCst);
        form.submit(&store).await.unwrap();
        assert_eq!(form.stage(), CheckoutStage::PaymentShown);
        assert_eq!(store.saves.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_frozen_form_rejects_edits_and_resubmits() {
        let store = MockStore::default();
        let mut form = CheckoutForm::with_values("a@b.com", "9123456789");
        form.submit(&store).await.unwrap();

        assert!(!form.set_email("other@b.com"));
        assert!(!form.set_mobile("9000000000"));
        assert_eq!(form.submission().email, "a@b.com");

        let err = form.submit(&store).await.unwrap_err();
        assert!(matches!(err, AppError::AlreadySubmitted));
        assert_eq!(store.saves.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_missing_store_reports_backend_unavailable() {
        let mut form = CheckoutForm::with_values("a@b.com", "9123456789");

        let err = form.submit_to(None).await.unwrap_err();

        assert!(matches!(err, AppError::StoreUnavailable));
        assert_eq!(form.stage(), CheckoutStage::Editing);
        assert_eq!(form.notices()[0].level, NoticeLevel::Error);
        assert_eq!(form.notices()[0].message, BACKEND_UNAVAILABLE_MESSAGE);

        // Field errors still come first
        let mut form = CheckoutForm::with_values("", "9123456789");
        let err = form.submit_to(None).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(form.notices().is_empty());
    }

    proptest! {
        #[test]
        fn prop_rejected_mobiles_never_saved(mobile in "[0-5][0-9]{9}") {
            let store = MockStore::default();
            let mut form = CheckoutForm::with_values("a@b.com", mobile);

            let result = tokio_test::block_on(form.submit(&store));

            prop_assert!(result.is_err());
            prop_assert_eq!(form.stage(), CheckoutStage::Editing);
            prop_assert_eq!(store.saves.load(Ordering::SeqCst), 0);
        }
    }
}
