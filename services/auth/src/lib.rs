//! Demo login gate for the SmartVet front-end
//!
//! Sessions live in client-side key/value storage and are never checked by
//! a server. The gate decides which pages render and handles login and
//! logout transitions.

pub mod config;
pub mod credentials;
pub mod error;
pub mod models;
pub mod pages;
pub mod session;
pub mod validation;

pub use config::SessionConfig;
pub use credentials::{Account, CredentialLookup, StaticCredentials};
pub use error::{AuthError, AuthResult};
pub use models::{Session, UserProfile};
pub use pages::{Access, Navigation, PageAccess};
pub use session::{Confirm, GateState, LogoutOutcome, SessionGate};
