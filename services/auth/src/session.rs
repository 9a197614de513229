//! Session gate backed by client-side key/value storage

use common::storage::KeyValueStore;
use common::StorageError;
use tracing::{info, warn};

use crate::{
    config::SessionConfig,
    credentials::CredentialLookup,
    error::{AuthError, AuthResult},
    models::{Session, UserProfile},
    pages::{Access, Navigation, PageAccess},
    validation::validate_login_form,
};

/// Prompt shown before logging out
pub const LOGOUT_PROMPT: &str = "Do you really want to leave the system?";

/// Yes/no question asked at the UI boundary
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F: Fn(&str) -> bool> Confirm for F {
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// The two states of the gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    LoggedOut,
    LoggedIn,
}

/// Outcome of [`SessionGate::logout`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogoutOutcome {
    /// Session removed; the caller should navigate to `redirect`
    LoggedOut { redirect: String },
    /// User declined; nothing changed
    Cancelled,
}

/// Session gate for logging users in and out and guarding pages
#[derive(Clone)]
pub struct SessionGate<S, C> {
    store: S,
    credentials: C,
    config: SessionConfig,
}

impl<S: KeyValueStore, C: CredentialLookup> SessionGate<S, C> {
    /// Create a new session gate
    pub fn new(store: S, credentials: C, config: SessionConfig) -> Self {
        Self {
            store,
            credentials,
            config,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Check the credentials and persist a fresh session on success.
    ///
    /// On any failure the stored session, if any, is left as it was.
    pub fn login(&self, email: &str, password: &str, remember_me: bool) -> AuthResult<Session> {
        let email = email.trim();
        validate_login_form(email, password)?;

        let Some(user) = self.credentials.validate(email, password) else {
            warn!("Login failed for {}", email);
            return Err(AuthError::InvalidCredentials);
        };

        let session = Session::new(user, remember_me);
        let serialized = serde_json::to_string(&session).map_err(StorageError::from)?;
        self.store.set(&self.config.storage_key, &serialized)?;

        info!("Login succeeded for {}", session.user.name);
        Ok(session)
    }

    /// Read the persisted session.
    ///
    /// Missing, unreadable, malformed and logged-out records all read as `None`.
    pub fn current_session(&self) -> Option<Session> {
        let raw = match self.store.get(&self.config.storage_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("Failed to read session: {}", e);
                return None;
            }
        };

        match serde_json::from_str::<Session>(&raw) {
            Ok(session) if session.logged_in => Some(session),
            Ok(_) => None,
            Err(e) => {
                warn!("Ignoring unreadable session: {}", e);
                None
            }
        }
    }

    pub fn current_user(&self) -> Option<UserProfile> {
        self.current_session().map(|session| session.user)
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        self.current_user()
            .is_some_and(|user| user.has_permission(permission))
    }

    pub fn is_admin(&self) -> bool {
        self.current_user().is_some_and(|user| user.is_admin())
    }

    pub fn state(&self) -> GateState {
        match self.current_session() {
            Some(_) => GateState::LoggedIn,
            None => GateState::LoggedOut,
        }
    }

    /// Decide whether a page may render
    pub fn authorize(&self, page_public: bool) -> Access {
        if page_public || self.current_session().is_some() {
            Access::Allow
        } else {
            info!("Not authenticated, redirecting to login");
            Access::RedirectToLogin
        }
    }

    /// Page-load hook: guard protected pages and bounce logged-in users off
    /// the login page
    pub fn navigate(&self, path: &str) -> Navigation {
        let access = PageAccess::classify(path, &self.config);

        match self.authorize(access.is_public()) {
            Access::RedirectToLogin => Navigation::RedirectToLogin(self.config.login_page.clone()),
            Access::Allow
                if path.contains(&self.config.login_page) && self.current_session().is_some() =>
            {
                Navigation::RedirectToHome(self.config.home_page.clone())
            }
            Access::Allow => Navigation::Render,
        }
    }

    /// Remove the session once the user confirms
    pub fn logout(&self, confirm: &dyn Confirm) -> AuthResult<LogoutOutcome> {
        if !confirm.confirm(LOGOUT_PROMPT) {
            return Ok(LogoutOutcome::Cancelled);
        }

        self.store.delete(&self.config.storage_key)?;
        info!("Session removed");

        Ok(LogoutOutcome::LoggedOut {
            redirect: self.config.login_page.clone(),
        })
    }
}
