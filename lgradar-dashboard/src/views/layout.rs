//! Page chrome: document shell and dashboard sidebar

use std::fmt::Write;

use super::escape_html;
use crate::auth::Viewer;

const SITE_NAME: &str = "LG Radar Dashboard";
const HTMX_SRC: &str = "https://unpkg.com/htmx.org@2.0.4";

/// Sidebar entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavItem {
    Dashboard,
    Gazettes,
    Alerts,
    Billing,
    Account,
}

impl NavItem {
    /// Every entry, in sidebar order
    pub const ALL: [Self; 5] = [
        Self::Dashboard,
        Self::Gazettes,
        Self::Alerts,
        Self::Billing,
        Self::Account,
    ];

    /// Route path
    #[must_use]
    pub const fn href(self) -> &'static str {
        match self {
            Self::Dashboard => "/dashboard",
            Self::Gazettes => "/dashboard/gazettes",
            Self::Alerts => "/dashboard/alerts",
            Self::Billing => "/dashboard/billing",
            Self::Account => "/dashboard/account",
        }
    }

    /// Visible label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Gazettes => "Gazettes",
            Self::Alerts => "Alerts",
            Self::Billing => "Billing",
            Self::Account => "Account",
        }
    }
}

/// Complete HTML document
#[must_use]
pub fn page_shell(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en" class="dark">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<meta name="description" content="Government gazette monitoring and alert system for Western Australia">
<meta name="robots" content="noindex, nofollow">
<title>{title} | {SITE_NAME}</title>
<script src="{HTMX_SRC}"></script>
</head>
<body>
{body}
</body>
</html>"#,
        title = escape_html(title),
    )
}

fn sidebar(viewer: &Viewer, active: NavItem) -> String {
    let session = &viewer.session;
    let mut nav = String::new();
    for item in NavItem::ALL {
        let class = if item == active { "nav-link active" } else { "nav-link" };
        let _ = write!(
            nav,
            r#"<a class="{class}" href="{}">{}</a>"#,
            escape_html(&viewer.link(item.href())),
            item.label()
        );
    }

    let avatar = session.avatar_url.as_deref().map_or_else(
        || {
            format!(
                r#"<span class="avatar avatar-fallback">{}</span>"#,
                escape_html(&session.initial())
            )
        },
        |url| format!(r#"<img class="avatar" src="{}" alt="">"#, escape_html(url)),
    );

    format!(
        r#"<aside class="sidebar">
<a class="brand" href="{home}">LG Radar</a>
<nav>{nav}</nav>
<a class="nav-link" href="/contact">Help &amp; Support</a>
<div class="user-card">
{avatar}
<div class="user-meta">
<p class="user-name">{name}</p>
<p class="user-email">{email}</p>
<p class="user-role">{role}</p>
</div>
<form action="/logout" method="POST"><button type="submit" class="btn btn-ghost">Sign Out</button></form>
</div>
</aside>"#,
        home = escape_html(&viewer.link(NavItem::Dashboard.href())),
        name = escape_html(session.display_name()),
        email = escape_html(session.display_email()),
        role = escape_html(session.display_role()),
    )
}

/// Dashboard page with sidebar and user menu
#[must_use]
pub fn dashboard_shell(viewer: &Viewer, active: NavItem, title: &str, content: &str) -> String {
    let banner = if viewer.demo {
        r#"<div class="demo-banner">You are viewing demo data. <a href="/signup">Create an account</a> to monitor your own gazettes.</div>"#
    } else {
        ""
    };

    let body = format!(
        r#"<div class="dashboard">
{sidebar}
<main class="content">
{banner}
{content}
</main>
</div>"#,
        sidebar = sidebar(viewer, active),
    );
    page_shell(title, &body)
}
