//! Guard for protected destinations

use super::session::{AuthBackend, SessionManager};

const RETURN_PARAM: &str = "redirect";

/// Instruction to send the user to the login entry point, optionally
/// carrying the destination to resume afterwards.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("authentication required")]
pub struct LoginRedirect {
    return_to: Option<String>,
}

impl LoginRedirect {
    pub fn to_login() -> Self {
        Self { return_to: None }
    }

    pub fn returning_to(destination: impl Into<String>) -> Self {
        Self {
            return_to: Some(destination.into()),
        }
    }

    pub fn return_path(&self) -> Option<&str> {
        self.return_to.as_deref()
    }

    /// `login_path?redirect=<encoded destination>`, or the bare login path.
    pub fn location(&self, login_path: &str) -> String {
        match &self.return_to {
            Some(dest) => {
                let query = url::form_urlencoded::Serializer::new(String::new())
                    .append_pair(RETURN_PARAM, dest)
                    .finish();
                format!("{}?{}", login_path, query)
            }
            None => login_path.to_string(),
        }
    }

    /// Recover the redirect from a location produced by [`Self::location`].
    pub fn from_location(location: &str) -> Self {
        let return_to = location.split_once('?').and_then(|(_, query)| {
            url::form_urlencoded::parse(query.as_bytes())
                .find(|(key, _)| key == RETURN_PARAM)
                .map(|(_, value)| value.into_owned())
        });
        Self { return_to }
    }
}

/// Token for `destination`, or a redirect to login that will bring the
/// user back there.
pub async fn require_session<B: AuthBackend>(
    manager: &SessionManager<B>,
    destination: &str,
) -> Result<String, LoginRedirect> {
    match manager.ensure_valid_token().await {
        Some(token) => Ok(token),
        None => {
            tracing::debug!("Blocking {}: no valid session", destination);
            Err(LoginRedirect::returning_to(destination))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::session::tests::{manager_with, t0, FakeBackend};
    use crate::auth::tokens::test_jwt;
    use chrono::Duration;

    #[test]
    fn test_location_encodes_return_path() {
        let redirect = LoginRedirect::returning_to("/wallet?tab=history&page=2");
        assert_eq!(
            redirect.location("/login"),
            "/login?redirect=%2Fwallet%3Ftab%3Dhistory%26page%3D2"
        );
    }

    #[test]
    fn test_location_without_return_path() {
        assert_eq!(LoginRedirect::to_login().location("/login"), "/login");
    }

    #[test]
    fn test_from_location_recovers_destination() {
        let redirect = LoginRedirect::returning_to("/listings/42 edit");
        let parsed = LoginRedirect::from_location(&redirect.location("/login"));
        assert_eq!(parsed.return_path(), Some("/listings/42 edit"));
        assert_eq!(LoginRedirect::from_location("/login").return_path(), None);
    }

    #[tokio::test]
    async fn test_require_session_passes_valid_token() {
        let (manager, _store, _clock) = manager_with(FakeBackend::default());
        let token = test_jwt(Some(t0() + Duration::hours(1)));
        manager.store_session(token.clone(), 1, None).unwrap();

        assert_eq!(require_session(&manager, "/wallet").await, Ok(token));
    }

    #[tokio::test]
    async fn test_require_session_redirects_when_expired() {
        let (manager, _store, clock) = manager_with(FakeBackend::default());
        manager.store_session(test_jwt(None), 1, None).unwrap();
        clock.advance(Duration::hours(2));

        let redirect = require_session(&manager, "/checkout").await.unwrap_err();
        assert_eq!(redirect.return_path(), Some("/checkout"));
    }
}
