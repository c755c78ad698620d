//! Lazily filtered navigation views over a route tree.
//!
//! `VisibleMenu` borrows the tree and the session and does no work until it
//! is iterated. It is `Clone`, so the same view can be walked again from the
//! start (e.g. once for the sidebar, once for breadcrumbs).

use serde::{Deserialize, Serialize};
use std::slice;

use super::route_tree::RouteNode;
use super::session::Session;

#[derive(Debug, Clone)]
pub struct VisibleMenu<'a> {
    nodes: slice::Iter<'a, RouteNode>,
    session: &'a Session,
}

impl<'a> VisibleMenu<'a> {
    pub fn new(nodes: &'a [RouteNode], session: &'a Session) -> Self {
        Self {
            nodes: nodes.iter(),
            session,
        }
    }

    /// Owned snapshot of the remaining entries, children included.
    pub fn to_nodes(&self) -> Vec<MenuNode> {
        self.clone().map(|item| item.to_node()).collect()
    }
}

impl<'a> Iterator for VisibleMenu<'a> {
    type Item = MenuItem<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let session = self.session;
        self.nodes
            .by_ref()
            .find(|node| node.in_menu && node.permits(session))
            .map(|node| MenuItem { node, session })
    }
}

/// A visible entry; its children are filtered with the same rule.
#[derive(Debug, Clone, Copy)]
pub struct MenuItem<'a> {
    node: &'a RouteNode,
    session: &'a Session,
}

impl<'a> MenuItem<'a> {
    pub fn node(&self) -> &'a RouteNode {
        self.node
    }

    pub fn path(&self) -> &'a str {
        &self.node.path
    }

    pub fn label(&self) -> &'a str {
        &self.node.label
    }

    pub fn children(&self) -> VisibleMenu<'a> {
        VisibleMenu::new(&self.node.children, self.session)
    }

    pub fn to_node(&self) -> MenuNode {
        MenuNode {
            path: self.node.path.clone(),
            label: self.node.label.clone(),
            icon: self.node.icon.clone(),
            children: self.children().to_nodes(),
        }
    }
}

/// Serializable menu entry as served to UI clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuNode {
    pub path: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub children: Vec<MenuNode>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::access::role::Role;
    use chrono::{Duration, Utc};

    fn tree() -> Vec<RouteNode> {
        vec![
            RouteNode::new("/orders", "Orders"),
            RouteNode::new("/admin", "Admin").roles([Role::Admin]).children(vec![
                RouteNode::new("/admin/users", "Users"),
                RouteNode::new("/admin/banking", "Banking").departments(["FINANCE"]),
                RouteNode::new("/admin/audit", "Audit").hidden(),
                RouteNode::new("/admin/offers", "Offers"),
            ]),
            RouteNode::new("/transporter", "Transporter").roles([Role::Transporter]),
            RouteNode::new("/deliveries", "Deliveries"),
        ]
    }

    fn session(roles: &[Role]) -> Session {
        Session::new("u-1", Utc::now() + Duration::hours(1)).with_roles(roles.iter().copied())
    }

    fn paths(menu: VisibleMenu<'_>) -> Vec<&str> {
        menu.map(|item| item.path()).collect()
    }

    #[test]
    fn test_filters_and_keeps_source_order() {
        let tree = tree();
        let admin = session(&[Role::Admin]);
        let menu = VisibleMenu::new(&tree, &admin);
        assert_eq!(paths(menu), vec!["/orders", "/admin", "/deliveries"]);

        let transporter = session(&[Role::Transporter]);
        let menu = VisibleMenu::new(&tree, &transporter);
        assert_eq!(paths(menu), vec!["/orders", "/transporter", "/deliveries"]);
    }

    #[test]
    fn test_children_filtered_recursively() {
        let tree = tree();
        let admin = session(&[Role::Admin]);
        let admin_item = VisibleMenu::new(&tree, &admin)
            .find(|item| item.path() == "/admin")
            .unwrap();
        assert_eq!(paths(admin_item.children()), vec!["/admin/users", "/admin/offers"]);

        let finance_admin = admin.clone().with_departments(["FINANCE"]);
        let admin_item = VisibleMenu::new(&tree, &finance_admin)
            .find(|item| item.path() == "/admin")
            .unwrap();
        assert_eq!(
            paths(admin_item.children()),
            vec!["/admin/users", "/admin/banking", "/admin/offers"]
        );
    }

    #[test]
    fn test_parent_without_visible_children_is_kept() {
        let tree = vec![RouteNode::new("/banking", "Banking").children(vec![
            RouteNode::new("/banking/credits", "Credits").departments(["FINANCE"]),
        ])];
        let plain = session(&[]);
        let nodes = VisibleMenu::new(&tree, &plain).to_nodes();
        assert_eq!(nodes.len(), 1);
        assert!(nodes[0].children.is_empty());
    }

    #[test]
    fn test_view_is_restartable() {
        let tree = tree();
        let admin = session(&[Role::Admin]);
        let menu = VisibleMenu::new(&tree, &admin);
        let first: Vec<_> = paths(menu.clone());
        let second: Vec<_> = paths(menu);
        assert_eq!(first, second);
    }

    #[test]
    fn test_snapshot_shape() {
        let tree = vec![RouteNode::new("/orders", "Orders").icon("file-text")];
        let anyone = session(&[]);
        let json = serde_json::to_value(VisibleMenu::new(&tree, &anyone).to_nodes()).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{"path": "/orders", "label": "Orders", "icon": "file-text", "children": []}])
        );
    }
}
