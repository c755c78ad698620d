use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

use super::decision::DenyReason;
use super::error::AccessConfigError;
use super::path::canonicalize;
use super::role::Role;
use super::session::Session;

/// Node of the static navigation/authorization tree.
///
/// Empty requirement sets mean "no restriction" for that predicate kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteNode {
    pub path: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub required_roles: BTreeSet<Role>,
    #[serde(default)]
    pub required_departments: BTreeSet<String>,
    #[serde(default)]
    pub required_permissions: BTreeSet<String>,
    #[serde(default = "default_in_menu")]
    pub in_menu: bool,
    #[serde(default)]
    pub children: Vec<RouteNode>,
}

fn default_in_menu() -> bool {
    true
}

impl RouteNode {
    pub fn new(path: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            label: label.into(),
            icon: None,
            required_roles: BTreeSet::new(),
            required_departments: BTreeSet::new(),
            required_permissions: BTreeSet::new(),
            in_menu: true,
            children: Vec::new(),
        }
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn roles(mut self, roles: impl IntoIterator<Item = Role>) -> Self {
        self.required_roles.extend(roles);
        self
    }

    pub fn departments<S: Into<String>>(mut self, departments: impl IntoIterator<Item = S>) -> Self {
        self.required_departments
            .extend(departments.into_iter().map(Into::into));
        self
    }

    pub fn permissions<S: Into<String>>(mut self, permissions: impl IntoIterator<Item = S>) -> Self {
        self.required_permissions
            .extend(permissions.into_iter().map(Into::into));
        self
    }

    /// Addressable, but never listed in navigation.
    pub fn hidden(mut self) -> Self {
        self.in_menu = false;
        self
    }

    pub fn children(mut self, children: Vec<RouteNode>) -> Self {
        self.children = children;
        self
    }

    pub fn is_restricted(&self) -> bool {
        !self.required_roles.is_empty()
            || !self.required_departments.is_empty()
            || !self.required_permissions.is_empty()
    }

    /// OR within each requirement set, AND between the sets.
    /// Checked in order: roles, departments, permissions.
    pub fn check(&self, session: &Session) -> Result<(), DenyReason> {
        if !self.required_roles.is_empty()
            && self.required_roles.is_disjoint(&session.roles)
        {
            return Err(DenyReason::RoleDenied);
        }
        if !self.required_departments.is_empty()
            && self.required_departments.is_disjoint(&session.departments)
        {
            return Err(DenyReason::DepartmentDenied);
        }
        if !self.required_permissions.is_empty()
            && self.required_permissions.is_disjoint(&session.permissions)
        {
            return Err(DenyReason::PermissionDenied);
        }
        Ok(())
    }

    pub fn permits(&self, session: &Session) -> bool {
        self.check(session).is_ok()
    }
}

/// Immutable route tree with an exact-path index.
#[derive(Debug, Clone)]
pub struct RouteTree {
    roots: Vec<RouteNode>,
    // path -> child positions from the roots down to the node
    index: HashMap<String, Vec<usize>>,
}

impl RouteTree {
    pub fn new(roots: Vec<RouteNode>) -> Result<Self, AccessConfigError> {
        let mut index = HashMap::new();
        let mut trail = Vec::new();
        for (i, node) in roots.iter().enumerate() {
            trail.push(i);
            index_node(node, &mut trail, &mut index)?;
            trail.pop();
        }
        Ok(Self { roots, index })
    }

    pub fn roots(&self) -> &[RouteNode] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Exact lookup on the canonical form of `path`, so `/admin/` and
    /// `/admin//index.html` both find `/admin`.
    pub fn find(&self, path: &str) -> Option<&RouteNode> {
        self.chain(path).and_then(|chain| chain.last().copied())
    }

    /// The matched node preceded by all of its ancestors, root first.
    pub fn chain(&self, path: &str) -> Option<Vec<&RouteNode>> {
        self.chain_canonical(&canonicalize(path)?)
    }

    /// Requirements of the node and every ancestor, checked root first.
    ///
    /// A path without a node is governed by its nearest indexed ancestor:
    /// `/admin/anything` carries the requirements of `/admin`. Only paths
    /// with no indexed ancestor are unrestricted. Paths that do not
    /// canonicalize are refused with [`DenyReason::InvalidPath`].
    pub fn check(&self, path: &str, session: &Session) -> Result<(), DenyReason> {
        let canonical = canonicalize(path).ok_or(DenyReason::InvalidPath)?;
        self.check_canonical(&canonical, session)
    }

    pub(crate) fn check_canonical(&self, canonical: &str, session: &Session) -> Result<(), DenyReason> {
        match self.governing_chain(canonical) {
            Some(chain) => chain.iter().try_for_each(|node| node.check(session)),
            None => Ok(()),
        }
    }

    fn governing_chain(&self, canonical: &str) -> Option<Vec<&RouteNode>> {
        let mut prefix = canonical;
        loop {
            if let Some(chain) = self.chain_canonical(prefix) {
                return Some(chain);
            }
            prefix = match prefix.rfind('/') {
                Some(0) if prefix.len() > 1 => "/",
                Some(i) if i > 0 => &prefix[..i],
                _ => return None,
            };
        }
    }

    fn chain_canonical(&self, canonical: &str) -> Option<Vec<&RouteNode>> {
        let positions = self.index.get(canonical)?;
        let mut chain = Vec::with_capacity(positions.len());
        let mut siblings = self.roots.as_slice();
        for pos in positions {
            let node = siblings.get(*pos)?;
            chain.push(node);
            siblings = &node.children;
        }
        Some(chain)
    }
}

fn index_node(
    node: &RouteNode,
    trail: &mut Vec<usize>,
    index: &mut HashMap<String, Vec<usize>>,
) -> Result<(), AccessConfigError> {
    let key = canonicalize(&node.path)
        .ok_or_else(|| AccessConfigError::InvalidPath(node.path.clone()))?;
    if index.insert(key, trail.clone()).is_some() {
        return Err(AccessConfigError::DuplicatePath(node.path.clone()));
    }
    for (i, child) in node.children.iter().enumerate() {
        trail.push(i);
        index_node(child, trail, index)?;
        trail.pop();
    }
    Ok(())
}
