use habitpro_types::ValidationError;
use thiserror::Error;

/// Shared secret for the first gate stage
pub const ADMIN_PASSWORD: &str = "admin123";

/// Where the admin view currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Locked,
    PasswordVerified,
    FullyAuthenticated,
}

impl GateState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Locked => "LOCKED",
            Self::PasswordVerified => "PASSWORD VERIFIED",
            Self::FullyAuthenticated => "AUTHENTICATED",
        }
    }
}

/// Rejected password submissions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GateError {
    #[error("{0}")]
    Required(ValidationError),

    #[error("Incorrect password")]
    IncorrectPassword,
}

/// Two-stage access control for the admin view.
///
/// Holds the session flags together with the in-flight flags so the UI
/// loop has a single object to consult. The contact fetch is edge-triggered:
/// [`AdminGate::take_fetch`] yields `true` once per entry into
/// [`GateState::FullyAuthenticated`]. Each issued fetch gets a new
/// generation so results from an earlier entry can be told apart.
#[derive(Debug, Default)]
pub struct AdminGate {
    password_verified: bool,
    identity_present: bool,
    login_in_flight: bool,
    fetch_issued: bool,
    fetch_generation: u64,
}

impl AdminGate {
    /// Fresh gate; `identity_present` reflects a session the provider restored
    pub fn new(identity_present: bool) -> Self {
        Self {
            identity_present,
            ..Self::default()
        }
    }

    pub fn state(&self) -> GateState {
        match (self.password_verified, self.identity_present) {
            (false, _) => GateState::Locked,
            (true, false) => GateState::PasswordVerified,
            (true, true) => GateState::FullyAuthenticated,
        }
    }

    pub fn is_fully_authenticated(&self) -> bool {
        self.state() == GateState::FullyAuthenticated
    }

    pub fn identity_present(&self) -> bool {
        self.identity_present
    }

    pub fn login_in_flight(&self) -> bool {
        self.login_in_flight
    }

    /// Check a password. Only meaningful while locked; otherwise the current
    /// state is returned unchanged.
    pub fn submit_password(&mut self, input: &str) -> Result<GateState, GateError> {
        if self.password_verified {
            return Ok(self.state());
        }
        if input.is_empty() {
            return Err(GateError::Required(ValidationError::PasswordRequired));
        }
        if input != ADMIN_PASSWORD {
            return Err(GateError::IncorrectPassword);
        }

        self.password_verified = true;
        self.settle();
        Ok(self.state())
    }

    /// Record whether the identity provider currently holds an identity
    pub fn set_identity_present(&mut self, present: bool) {
        self.identity_present = present;
        self.settle();
    }

    /// Whether the login action is currently offered
    pub fn can_login(&self) -> bool {
        self.state() == GateState::PasswordVerified && !self.login_in_flight
    }

    /// Mark a login as started; `false` when the action is unavailable
    pub fn begin_login(&mut self) -> bool {
        if !self.can_login() {
            return false;
        }
        self.login_in_flight = true;
        true
    }

    pub fn finish_login(&mut self) {
        self.login_in_flight = false;
    }

    /// Return to the password step, keeping any identity
    pub fn back(&mut self) {
        self.password_verified = false;
        self.settle();
    }

    /// Drop both stages; the caller clears the provider session
    pub fn logout(&mut self) {
        self.password_verified = false;
        self.identity_present = false;
        self.settle();
    }

    /// `true` exactly once per transition into the fully authenticated state
    pub fn take_fetch(&mut self) -> bool {
        if self.is_fully_authenticated() && !self.fetch_issued {
            self.fetch_issued = true;
            self.fetch_generation += 1;
            return true;
        }
        false
    }

    /// Generation of the most recently issued fetch
    pub fn fetch_generation(&self) -> u64 {
        self.fetch_generation
    }

    /// Whether a fetch result still belongs to the current entry
    pub fn is_current_fetch(&self, generation: u64) -> bool {
        self.fetch_issued && self.fetch_generation == generation
    }

    fn settle(&mut self) {
        if !self.is_fully_authenticated() {
            self.fetch_issued = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrong_passwords_stay_locked() {
        let mut gate = AdminGate::new(false);
        for input in ["admin", "ADMIN123", "admin1234", " admin123", "password"] {
            assert_eq!(gate.submit_password(input), Err(GateError::IncorrectPassword));
            assert_eq!(gate.state(), GateState::Locked);
        }
    }

    #[test]
    fn test_empty_password_is_required_error() {
        let mut gate = AdminGate::new(false);
        let err = gate.submit_password("").unwrap_err();
        assert_eq!(err.to_string(), "Password is required");
        assert_eq!(gate.state(), GateState::Locked);
    }

    #[test]
    fn test_correct_password_verifies_once() {
        let mut gate = AdminGate::new(false);
        assert_eq!(gate.submit_password(ADMIN_PASSWORD), Ok(GateState::PasswordVerified));
        // A second submission does not transition again
        assert_eq!(gate.submit_password(ADMIN_PASSWORD), Ok(GateState::PasswordVerified));
        assert_eq!(gate.submit_password("wrong"), Ok(GateState::PasswordVerified));
    }

    #[test]
    fn test_restored_identity_needs_password() {
        let mut gate = AdminGate::new(true);
        assert_eq!(gate.state(), GateState::Locked);
        assert!(!gate.take_fetch());

        gate.submit_password(ADMIN_PASSWORD).unwrap();
        assert_eq!(gate.state(), GateState::FullyAuthenticated);
        assert!(gate.take_fetch());
        assert!(!gate.take_fetch());
    }

    #[test]
    fn test_single_flag_never_fetches() {
        let mut gate = AdminGate::new(false);
        gate.set_identity_present(true);
        assert!(!gate.take_fetch());
        gate.set_identity_present(false);

        gate.submit_password(ADMIN_PASSWORD).unwrap();
        assert!(!gate.take_fetch());
        gate.back();
        gate.set_identity_present(true);
        assert!(!gate.take_fetch());
    }

    #[test]
    fn test_fetch_rearms_after_leaving_state() {
        let mut gate = AdminGate::new(false);
        gate.submit_password(ADMIN_PASSWORD).unwrap();
        gate.set_identity_present(true);
        assert!(gate.take_fetch());

        // Identity reported again without change: no new fetch
        gate.set_identity_present(true);
        assert!(!gate.take_fetch());

        gate.logout();
        assert_eq!(gate.state(), GateState::Locked);
        gate.submit_password(ADMIN_PASSWORD).unwrap();
        gate.set_identity_present(true);
        assert!(gate.take_fetch());
    }

    #[test]
    fn test_results_from_previous_entry_are_stale() {
        let mut gate = AdminGate::new(false);
        gate.submit_password(ADMIN_PASSWORD).unwrap();
        gate.set_identity_present(true);
        assert!(gate.take_fetch());
        let first = gate.fetch_generation();
        assert!(gate.is_current_fetch(first));

        gate.logout();
        assert!(!gate.is_current_fetch(first));

        gate.submit_password(ADMIN_PASSWORD).unwrap();
        gate.set_identity_present(true);
        assert!(gate.take_fetch());
        let second = gate.fetch_generation();
        assert_ne!(first, second);
        assert!(!gate.is_current_fetch(first));
        assert!(gate.is_current_fetch(second));
    }

    #[test]
    fn test_login_disabled_while_in_flight() {
        let mut gate = AdminGate::new(false);
        assert!(!gate.begin_login());

        gate.submit_password(ADMIN_PASSWORD).unwrap();
        assert!(gate.begin_login());
        assert!(gate.login_in_flight());
        assert!(!gate.begin_login());

        gate.finish_login();
        assert!(gate.can_login());
    }

    #[test]
    fn test_back_keeps_identity() {
        let mut gate = AdminGate::new(false);
        gate.submit_password(ADMIN_PASSWORD).unwrap();
        gate.set_identity_present(true);
        gate.back();
        assert_eq!(gate.state(), GateState::Locked);
        assert!(gate.identity_present());
    }
}
