use super::role::Role;

/// Route tree or landing configuration that cannot be served safely.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessConfigError {
    #[error("route path must start with '/': {0:?}")]
    InvalidPath(String),

    #[error("route path declared more than once: {0}")]
    DuplicatePath(String),

    #[error("landing path {path} for role {role} is not reachable by that role")]
    UnreachableLanding { role: Role, path: String },

    #[error("login path {0} is not public")]
    LoginNotPublic(String),

    #[error("generic landing path {0} must not carry access requirements")]
    RestrictedGenericLanding(String),
}
