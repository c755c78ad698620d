use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use super::decision::{AccessDecision, DenyReason};
use super::error::AccessConfigError;
use super::landing::LandingPaths;
use super::menu::VisibleMenu;
use super::path::{canonicalize, encode_return_to};
use super::public_paths::PublicPaths;
use super::role::Role;
use super::route_tree::RouteTree;
use super::session::{self, Session, SessionInvalid, SessionState, TokenDecoder};

/// Static rulesets the resolver composes with the route tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessPolicy {
    pub login_path: String,
    /// Query parameter carrying the originally requested path.
    pub return_to_param: String,
    pub public: PublicPaths,
    pub landing: LandingPaths,
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self {
            login_path: "/login".to_string(),
            return_to_param: "redirectTo".to_string(),
            public: PublicPaths::default(),
            landing: LandingPaths::default(),
        }
    }
}

/// Single authority for "can this session reach this path, and if not,
/// where should it go". Shared by the HTTP request filter and UI gating.
#[derive(Clone)]
pub struct AccessControlResolver {
    tree: RouteTree,
    policy: AccessPolicy,
    decoder: Arc<dyn TokenDecoder>,
}

impl fmt::Debug for AccessControlResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessControlResolver")
            .field("routes", &self.tree.len())
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl AccessControlResolver {
    /// Build a resolver, refusing configurations that could redirect a
    /// session into a path it cannot reach.
    pub fn new(
        tree: RouteTree,
        policy: AccessPolicy,
        decoder: Arc<dyn TokenDecoder>,
    ) -> Result<Self, AccessConfigError> {
        validate(&tree, &policy)?;
        Ok(Self {
            tree,
            policy,
            decoder,
        })
    }

    pub fn tree(&self) -> &RouteTree {
        &self.tree
    }

    pub fn policy(&self) -> &AccessPolicy {
        &self.policy
    }

    /// Public check on the canonical form of `path`. A path that does not
    /// canonicalize is never public.
    pub fn is_public(&self, path: &str) -> bool {
        canonicalize(path).is_some_and(|canonical| self.policy.public.is_public(&canonical))
    }

    pub fn resolve_session(&self, token: Option<&str>) -> SessionState {
        session::resolve_session(self.decoder.as_ref(), token)
    }

    pub fn resolve_session_at(&self, token: Option<&str>, now: DateTime<Utc>) -> SessionState {
        session::resolve_session_at(self.decoder.as_ref(), token, now)
    }

    pub fn default_path_for_session(&self, session: &Session) -> &str {
        self.policy.landing.for_session(session)
    }

    pub fn evaluate(&self, state: &SessionState, path: &str) -> AccessDecision {
        let canonical = canonicalize(path);
        if let Some(canonical) = &canonical {
            if self.policy.public.is_public(canonical) {
                return AccessDecision::Allowed;
            }
        }

        let session = match state {
            Ok(session) => session,
            Err(invalid) => {
                return self.deny_unauthenticated(*invalid, canonical.as_deref().unwrap_or(path))
            }
        };

        let checked = match &canonical {
            Some(canonical) => self.tree.check_canonical(canonical, session),
            None => Err(DenyReason::InvalidPath),
        };
        match checked {
            Ok(()) => AccessDecision::Allowed,
            Err(reason) => {
                AccessDecision::denied(self.default_path_for_session(session), reason)
            }
        }
    }

    /// Navigation entries visible to `session`, in tree order.
    pub fn visible_menu<'a>(&'a self, session: &'a Session) -> VisibleMenu<'a> {
        VisibleMenu::new(self.tree.roots(), session)
    }

    /// Login path for an unauthenticated request.
    ///
    /// Only a missing token carries the requested path as a percent-encoded
    /// return-to parameter. An expired or malformed token goes to the bare
    /// login page. This breaks the general rule that every unauthenticated
    /// redirect keeps the intended destination: `Expired` and `Malformed`
    /// lose it, matching the expired-token flow where the cookie is cleared
    /// and the user starts over at `/login`.
    pub fn login_redirect(&self, invalid: SessionInvalid, path: &str) -> String {
        match invalid {
            SessionInvalid::NoToken => format!(
                "{}?{}={}",
                self.policy.login_path,
                self.policy.return_to_param,
                encode_return_to(path)
            ),
            SessionInvalid::Expired | SessionInvalid::Malformed => self.policy.login_path.clone(),
        }
    }

    fn deny_unauthenticated(&self, invalid: SessionInvalid, path: &str) -> AccessDecision {
        AccessDecision::denied(self.login_redirect(invalid, path), DenyReason::from(invalid))
    }
}

fn validate(tree: &RouteTree, policy: &AccessPolicy) -> Result<(), AccessConfigError> {
    if !policy.public.is_public(&policy.login_path) {
        return Err(AccessConfigError::LoginNotPublic(policy.login_path.clone()));
    }

    // A session holding a single role and nothing else is the weakest
    // principal that can land on that role's path.
    let never_expires = DateTime::<Utc>::MAX_UTC;
    for role in Role::ALL {
        let path = policy.landing.for_role(role);
        let weakest = Session::new("landing-check", never_expires).with_roles([role]);
        if !policy.public.is_public(path) && tree.check(path, &weakest).is_err() {
            return Err(AccessConfigError::UnreachableLanding {
                role,
                path: path.to_string(),
            });
        }
    }

    let generic = &policy.landing.generic;
    let anonymous = Session::new("landing-check", never_expires);
    if tree.check(generic, &anonymous).is_err() {
        return Err(AccessConfigError::RestrictedGenericLanding(generic.clone()));
    }
    Ok(())
}
