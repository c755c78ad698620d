use async_trait::async_trait;
use contracts::system::access::{AccessControlResolver, Session, SessionInvalid, SessionState};
use thiserror::Error;

use crate::shared::config::AuthConfig;

#[derive(Debug, Error)]
pub enum SessionServiceError {
    #[error("profile service unavailable: {0}")]
    Unavailable(String),

    #[error("unknown principal: {0}")]
    UnknownPrincipal(String),
}

/// Hydrates a decoded session into the full profile used for the request.
#[async_trait]
pub trait SessionService: Send + Sync {
    async fn hydrate(&self, session: Session) -> Result<Session, SessionServiceError>;
}

/// Fills in the brand list of configured principals when the token carries none.
pub struct ConfiguredProfileService {
    auth: AuthConfig,
}

impl ConfiguredProfileService {
    pub fn new(auth: AuthConfig) -> Self {
        Self { auth }
    }
}

#[async_trait]
impl SessionService for ConfiguredProfileService {
    async fn hydrate(&self, session: Session) -> Result<Session, SessionServiceError> {
        if !session.brands.is_empty() {
            return Ok(session);
        }
        match self.auth.find_dev_user(&session.username) {
            Some(user) => {
                let brands = user.brands.clone();
                Ok(session.with_brands(brands))
            }
            None => Ok(session),
        }
    }
}

/// Decode the token and hydrate the result.
///
/// A failing profile service makes the session unusable: it is reported as
/// `Malformed` and logged, there is no retry here.
pub async fn resolve(
    resolver: &AccessControlResolver,
    service: &dyn SessionService,
    token: Option<&str>,
) -> SessionState {
    let session = match resolver.resolve_session(token) {
        Ok(session) => session,
        Err(SessionInvalid::Malformed) => {
            tracing::warn!("Rejected malformed bearer token");
            return Err(SessionInvalid::Malformed);
        }
        Err(invalid) => {
            tracing::debug!("No usable session: {}", invalid);
            return Err(invalid);
        }
    };

    let user_id = session.user_id.clone();
    service.hydrate(session).await.map_err(|e| {
        tracing::warn!("Session hydration failed for {}: {}", user_id, e);
        SessionInvalid::Malformed
    })
}
