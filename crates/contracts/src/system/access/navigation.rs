//! Route tree of the back-office application.
//!
//! Order of siblings is the order of the sidebar.

use once_cell::sync::Lazy;

use super::role::Role;
use super::route_tree::RouteNode;

pub const DEPT_FINANCE: &str = "FINANCE";
pub const DEPT_ACCOUNTING: &str = "ACCOUNTING";
pub const DEPT_LOGISTICS: &str = "LOGISTICS";
pub const DEPT_SALES: &str = "SALES";

static BACK_OFFICE_ROUTES: Lazy<Vec<RouteNode>> = Lazy::new(build_routes);

pub fn back_office_routes() -> &'static [RouteNode] {
    &BACK_OFFICE_ROUTES
}

fn build_routes() -> Vec<RouteNode> {
    vec![
        RouteNode::new("/dashboard", "Dashboard").icon("bar-chart"),
        RouteNode::new("/profile", "Profile").hidden(),
        RouteNode::new("/admin", "Administration")
            .icon("layout-dashboard")
            .roles([Role::Admin, Role::User])
            .children(vec![
                RouteNode::new("/admin/orders", "Orders")
                    .icon("file-text")
                    .children(vec![
                        RouteNode::new("/admin/orders/new", "New order").hidden(),
                    ]),
                RouteNode::new("/admin/offers", "Offers").icon("tag"),
                RouteNode::new("/admin/deliveries", "Deliveries")
                    .icon("truck")
                    .departments([DEPT_LOGISTICS, DEPT_SALES]),
                RouteNode::new("/admin/customers", "Customers").icon("contact"),
                RouteNode::new("/admin/banking", "Banking")
                    .icon("credit-card")
                    .departments([DEPT_FINANCE, DEPT_ACCOUNTING])
                    .children(vec![
                        RouteNode::new("/admin/banking/accounts", "Bank accounts").icon("database"),
                        RouteNode::new("/admin/banking/checks", "Checks").icon("receipt"),
                        RouteNode::new("/admin/banking/credits", "Credits").icon("dollar-sign"),
                        RouteNode::new("/admin/banking/letters-of-guarantee", "Letters of guarantee")
                            .icon("file-text")
                            .roles([Role::Admin]),
                    ]),
                RouteNode::new("/admin/users", "Users")
                    .icon("users")
                    .roles([Role::Admin]),
                RouteNode::new("/admin/settings", "Settings")
                    .icon("settings")
                    .roles([Role::Admin])
                    .permissions(["settings.manage"]),
            ]),
        RouteNode::new("/transporter", "Transport")
            .icon("truck")
            .roles([Role::Transporter])
            .children(vec![
                RouteNode::new("/transporter/offers", "Offers").icon("tag"),
                RouteNode::new("/transporter/deliveries", "Deliveries").icon("package"),
            ]),
        RouteNode::new("/company", "Company")
            .icon("building")
            .roles([Role::Company])
            .children(vec![
                RouteNode::new("/company/orders", "Orders").icon("file-text"),
                RouteNode::new("/company/offers", "Offers").icon("tag"),
                RouteNode::new("/company/payment-plan", "Payment plan").icon("cash"),
            ]),
    ]
}
