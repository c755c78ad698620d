use anyhow::Context;
use contracts::system::access::{navigation, AccessControlResolver, RouteTree};
use std::sync::Arc;

use crate::shared::config::{AuthConfig, Config};
use crate::system::auth::jwt::JwtCodec;
use crate::system::auth::session_service::{ConfiguredProfileService, SessionService};

/// Shared state of all routes and the access guard
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<AccessControlResolver>,
    pub codec: Arc<JwtCodec>,
    pub sessions: Arc<dyn SessionService>,
    pub auth: Arc<AuthConfig>,
}

impl AppState {
    /// Build state from configuration with the back-office route tree
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let codec = Arc::new(JwtCodec::from_config(&config.auth));
        let tree = RouteTree::new(navigation::back_office_routes().to_vec())
            .context("Invalid route tree")?;
        let resolver = AccessControlResolver::new(tree, config.access.clone(), codec.clone())
            .context("Invalid access configuration")?;

        tracing::info!(
            "Access control ready: {} routes, login at {}",
            resolver.tree().len(),
            resolver.policy().login_path
        );

        Ok(Self {
            resolver: Arc::new(resolver),
            codec,
            sessions: Arc::new(ConfiguredProfileService::new(config.auth.clone())),
            auth: Arc::new(config.auth.clone()),
        })
    }
}
