//! Page classification and navigation decisions

use serde::Serialize;

use crate::config::SessionConfig;

/// Whether a page needs a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAccess {
    Public,
    Protected,
}

impl PageAccess {
    /// Classify a request path.
    ///
    /// The root, the empty path and anything naming the landing or login
    /// page are public.
    pub fn classify(path: &str, config: &SessionConfig) -> Self {
        if path.is_empty()
            || path == "/"
            || path.contains(&config.landing_page)
            || path.contains(&config.login_page)
        {
            PageAccess::Public
        } else {
            PageAccess::Protected
        }
    }

    pub fn is_public(self) -> bool {
        self == PageAccess::Public
    }
}

/// Result of [`SessionGate::authorize`](crate::session::SessionGate::authorize)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Access {
    Allow,
    RedirectToLogin,
}

/// What the renderer should do with a page load
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "target", rename_all = "snake_case")]
pub enum Navigation {
    Render,
    RedirectToLogin(String),
    RedirectToHome(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_public_pages() {
        let config = SessionConfig::default();
        for path in ["", "/", "/landing.html", "/app/login.html?next=x"] {
            assert_eq!(PageAccess::classify(path, &config), PageAccess::Public, "{path}");
        }
    }

    #[test]
    fn test_classify_protected_pages() {
        let config = SessionConfig::default();
        for path in ["/index.html", "/animals", "/vaccinations.html"] {
            assert!(!PageAccess::classify(path, &config).is_public(), "{path}");
        }
    }
}
