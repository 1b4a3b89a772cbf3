//! Wiring shared by every command

use std::sync::Arc;

use anyhow::{anyhow, Result};

use crate::api::auth::HttpAuthBackend;
use crate::api::ApiClient;
use crate::auth::{require_session, FileSessionStore, SessionManager};
use crate::config::Config;

/// Config, HTTP client and session manager for one CLI invocation.
pub struct App {
    pub config: Config,
    pub client: ApiClient,
    pub session: SessionManager<HttpAuthBackend>,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let client = ApiClient::new(&config)?;
        let store = Arc::new(FileSessionStore::new(Config::session_path()?));
        let session = SessionManager::new(
            store,
            HttpAuthBackend::new(client.clone()),
            config.session_hours,
        );

        Ok(Self {
            config,
            client,
            session,
        })
    }

    /// Bearer token for a protected destination, refreshing if needed.
    pub async fn require(&self, destination: &str) -> Result<String> {
        require_session(&self.session, destination)
            .await
            .map_err(|redirect| {
                anyhow!(
                    "Not logged in. Run: market-cli login --redirect '{}'",
                    redirect.location(&self.config.login_path)
                )
            })
    }
}
