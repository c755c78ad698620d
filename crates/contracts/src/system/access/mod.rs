//! Role/department scoped route access and menu visibility.

pub mod decision;
pub mod error;
pub mod landing;
pub mod menu;
pub mod navigation;
pub mod path;
pub mod public_paths;
pub mod resolver;
pub mod role;
pub mod route_tree;
pub mod session;

pub use decision::{AccessDecision, DenyReason};
pub use error::AccessConfigError;
pub use landing::LandingPaths;
pub use menu::{MenuItem, MenuNode, VisibleMenu};
pub use public_paths::PublicPaths;
pub use resolver::{AccessControlResolver, AccessPolicy};
pub use role::Role;
pub use route_tree::{RouteNode, RouteTree};
pub use session::{Session, SessionInvalid, SessionState, TokenDecodeError, TokenDecoder};
