//! Session lifecycle: store, validate, refresh, log out

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Mutex;

use super::clock::{Clock, SystemClock};
use super::error::{SessionEnd, SessionError};
use super::guard::LoginRedirect;
use super::store::SessionStore;
use super::tokens::{IssuedTokens, SessionRecord};
use crate::api::ApiError;

/// Remote side of the session: minting new access tokens and
/// invalidating old ones.
pub trait AuthBackend: Send + Sync {
    fn refresh(
        &self,
        refresh_token: &str,
    ) -> impl Future<Output = Result<IssuedTokens, ApiError>> + Send;

    fn invalidate(&self, access_token: &str) -> impl Future<Output = Result<(), ApiError>> + Send;
}

/// What `logout` did. The local session is always gone; `remote_error`
/// records whether the server was told.
#[derive(Debug)]
pub struct LogoutOutcome {
    pub remote_error: Option<ApiError>,
    pub redirect: LoginRedirect,
}

/// Read-only view of the stored session.
#[derive(Debug, Clone)]
pub struct SessionStatus {
    pub record: SessionRecord,
    pub expired: bool,
}

/// Single source of truth for "is the caller authenticated".
pub struct SessionManager<B> {
    store: Arc<dyn SessionStore>,
    backend: B,
    clock: Arc<dyn Clock>,
    hours_valid: u32,
    // Serializes refreshes so concurrent callers share one network call
    refresh_lock: Mutex<()>,
}

impl<B: AuthBackend> SessionManager<B> {
    /// `hours_valid` is the watermark lifetime applied to refreshed tokens.
    pub fn new(store: Arc<dyn SessionStore>, backend: B, hours_valid: u32) -> Self {
        Self {
            store,
            backend,
            clock: Arc::new(SystemClock),
            hours_valid,
            refresh_lock: Mutex::new(()),
        }
    }

    #[cfg(test)]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    #[cfg(test)]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn hours_valid(&self) -> u32 {
        self.hours_valid
    }

    /// Persist a freshly issued token with a watermark of `now + hours_valid`.
    pub fn store_session(
        &self,
        access_token: impl Into<String>,
        hours_valid: u32,
        refresh_token: Option<String>,
    ) -> Result<(), SessionError> {
        let record = SessionRecord::new(
            access_token.into(),
            hours_valid,
            refresh_token,
            self.clock.now(),
        );
        self.store.save(&record)?;
        tracing::info!(expires_at = %record.expires_at, "Session stored");
        Ok(())
    }

    /// Current record without any validity check. An unparseable record
    /// is removed so no partial state survives the read.
    pub fn snapshot(&self) -> Option<SessionRecord> {
        match self.store.load() {
            Ok(record) => record,
            Err(e @ SessionError::Decode(_)) => {
                tracing::warn!("Discarding unreadable session: {}", e);
                self.end_session(SessionEnd::Unreadable);
                None
            }
            Err(e) => {
                tracing::warn!("Failed to read session store: {}", e);
                None
            }
        }
    }

    /// Stored record and whether it is expired by this manager's clock.
    pub fn status(&self) -> Option<SessionStatus> {
        let record = self.snapshot()?;
        let expired = record.is_expired(self.clock.now());
        Some(SessionStatus { record, expired })
    }

    /// The access token if both expiry signals are still in the future.
    /// An expired session is cleared on the way out.
    pub fn get_valid_token(&self) -> Option<String> {
        let record = self.snapshot()?;
        if record.is_expired(self.clock.now()) {
            self.end_session(SessionEnd::Expired);
            return None;
        }
        Some(record.access_token)
    }

    pub fn is_expired(&self) -> bool {
        self.snapshot()
            .map_or(true, |record| record.is_expired(self.clock.now()))
    }

    pub fn is_authenticated(&self) -> bool {
        self.get_valid_token().is_some()
    }

    /// Remove the access token, watermark and refresh token together.
    pub fn clear_session(&self) -> Result<(), SessionError> {
        self.store.clear()
    }

    /// Valid token, refreshing once if needed. Any refresh failure clears
    /// the session. No retries.
    pub async fn ensure_valid_token(&self) -> Option<String> {
        if let Some(record) = self.snapshot() {
            if !record.is_expired(self.clock.now()) {
                return Some(record.access_token);
            }
        }

        let _guard = self.refresh_lock.lock().await;

        // Another caller may have refreshed (or given up) while we waited
        let Some(record) = self.snapshot() else {
            tracing::debug!("{}", SessionEnd::NoSession);
            return None;
        };
        if !record.is_expired(self.clock.now()) {
            return Some(record.access_token);
        }

        // Read before clearing: the refresh token goes away with the session
        let Some(refresh_token) = record.refresh_token else {
            self.end_session(SessionEnd::Expired);
            return None;
        };

        tracing::info!("Access token expired, refreshing...");
        match self.backend.refresh(&refresh_token).await {
            Ok(issued) => {
                let rotated = issued.refresh_token.or(Some(refresh_token));
                let refreshed = SessionRecord::new(
                    issued.access_token,
                    self.hours_valid,
                    rotated,
                    self.clock.now(),
                );
                if let Err(e) = self.store.save(&refreshed) {
                    tracing::warn!("Failed to persist refreshed session: {}", e);
                    self.end_session(SessionEnd::RefreshFailed);
                    return None;
                }
                tracing::info!("Token refreshed");
                Some(refreshed.access_token)
            }
            Err(e) => {
                tracing::warn!("Token refresh failed: {}", e);
                self.end_session(SessionEnd::RefreshFailed);
                None
            }
        }
    }

    /// Tell the server (best effort), then drop local state unconditionally.
    pub async fn logout(&self) -> LogoutOutcome {
        let remote_error = match self.snapshot() {
            Some(record) => match self.backend.invalidate(&record.access_token).await {
                Ok(()) => None,
                Err(e) => {
                    tracing::warn!("Remote logout failed, clearing local session anyway: {}", e);
                    Some(e)
                }
            },
            None => None,
        };

        self.end_session(SessionEnd::LoggedOut);
        LogoutOutcome {
            remote_error,
            redirect: LoginRedirect::to_login(),
        }
    }

    fn end_session(&self, reason: SessionEnd) {
        tracing::info!("Session ended: {}", reason);
        if let Err(e) = self.store.clear() {
            tracing::warn!("Failed to clear session store: {}", e);
        }
    }
}
