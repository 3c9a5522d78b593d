//! Protected dashboard pages

use std::fmt::Write;

use super::layout::{dashboard_shell, NavItem};
use super::{badge, escape_html, format_amount, format_date};
use crate::auth::{Viewer, DEMO_QUERY_PARAM};
use crate::data::{
    ActivityKind, Gazette, CURRENT_PLAN, EMAIL_ACCOUNTS, GAZETTES, INVOICES, KEYWORD_ALERTS,
    PAYMENT_METHOD, RECENT_ACTIVITY, STATS,
};
use crate::forms::{FormBuilder, InputType};

fn header(title: &str, subtitle: &str) -> String {
    format!(
        r#"<header class="page-header"><h1>{}</h1><p class="muted">{}</p></header>"#,
        escape_html(title),
        escape_html(subtitle)
    )
}

fn keyword_list(keywords: &[&str]) -> String {
    keywords
        .iter()
        .map(|k| format!(r#"<span class="badge badge-secondary">{}</span>"#, escape_html(k)))
        .collect()
}

/// Overview with headline stats and recent activity
#[must_use]
pub fn overview(viewer: &Viewer) -> String {
    let mut content = header(
        "Dashboard",
        "Welcome back! Here's what's happening with your LG Radar account.",
    );

    content.push_str(r#"<section class="grid stats">"#);
    for stat in &STATS {
        let tone = if stat.trend_up { "badge-success" } else { "badge-secondary" };
        let _ = write!(
            content,
            r#"<div class="card stat"><h3>{}</h3><div class="stat-value">{}</div><p class="muted">{}</p><span class="badge {tone}">{}</span></div>"#,
            escape_html(stat.title),
            escape_html(stat.value),
            escape_html(stat.description),
            escape_html(stat.trend),
        );
    }
    content.push_str("</section>");

    content.push_str(
        r#"<section class="card"><h2>Recent Activity</h2><p class="muted">Latest updates from your monitored gazettes and alerts</p><ul class="activity">"#,
    );
    for activity in &RECENT_ACTIVITY {
        let icon = match activity.kind {
            ActivityKind::Gazette => "icon-gazette",
            ActivityKind::Alert => "icon-alert",
            ActivityKind::Audit => "icon-audit",
            ActivityKind::Billing => "icon-billing",
        };
        let _ = write!(
            content,
            r#"<li class="activity-item" data-id="{}"><span class="icon {icon}"></span><div><p class="activity-title">{}</p><p class="muted">{}</p><p class="time">{}</p></div>{}</li>"#,
            activity.id,
            escape_html(activity.title),
            escape_html(activity.description),
            escape_html(activity.time),
            badge(activity.status),
        );
    }
    content.push_str("</ul></section>");

    let quick_links = [
        (NavItem::Gazettes, "View Gazettes"),
        (NavItem::Alerts, "Manage Alerts"),
        (NavItem::Billing, "Billing"),
        (NavItem::Account, "Account Settings"),
    ];
    content.push_str(r#"<section class="card"><h2>Quick Actions</h2><div class="quick-actions">"#);
    for (item, label) in quick_links {
        let _ = write!(
            content,
            r#"<a class="btn btn-outline" href="{}">{label}</a>"#,
            escape_html(&viewer.link(item.href()))
        );
    }
    content.push_str("</div></section>");

    dashboard_shell(viewer, NavItem::Dashboard, "Dashboard", &content)
}

/// Gazette list rows, also served alone as the htmx search fragment
#[must_use]
pub fn gazette_rows(gazettes: &[&Gazette]) -> String {
    if gazettes.is_empty() {
        return r#"<div id="gazette-list"><p class="muted">No gazettes match your search.</p></div>"#
            .to_string();
    }

    let mut out = String::from(r#"<div id="gazette-list">"#);
    for gazette in gazettes {
        let _ = write!(
            out,
            r#"<article class="gazette" data-id="{}"><div class="gazette-head"><h3>{}</h3>{}</div><p class="muted">{}</p><p class="meta"><span>{}</span><span>{} pages</span><span class="badge badge-outline">{}</span></p><div class="keywords">{}</div><div class="actions"><button class="btn btn-outline">View</button><button class="btn btn-outline">Download</button></div></article>"#,
            gazette.id,
            escape_html(gazette.title),
            badge(gazette.status),
            escape_html(gazette.subtitle),
            format_date(gazette.publish_date),
            gazette.pages,
            escape_html(gazette.category),
            keyword_list(gazette.keywords),
        );
    }
    out.push_str("</div>");
    out
}

/// Gazette list with search box
#[must_use]
pub fn gazettes(viewer: &Viewer, query: &str, results: &[&Gazette]) -> String {
    let mut content = header("Gazettes", "Monitor and review government gazette publications");

    // GET forms drop the action's query string, so demo mode rides along as a field
    let path = NavItem::Gazettes.href();
    let mut search = FormBuilder::new(path, "GET")
        .id("gazette-search")
        .htmx_get(path)
        .htmx_trigger("input changed delay:300ms from:#q")
        .htmx_target("#gazette-list")
        .htmx_swap("outerHTML");
    if viewer.demo {
        search = search.hidden(DEMO_QUERY_PARAM, "true");
    }
    let search = search
        .field("q", InputType::Search)
        .label("Search Gazettes")
        .placeholder("Search by title, category, or keywords...")
        .value(query)
        .done()
        .build();

    let new_this_week = GAZETTES.iter().filter(|g| g.status == "new").count();
    let _ = write!(
        content,
        r#"<section class="grid"><div class="card wide">{search}</div><div class="card stat"><h3>Total Gazettes</h3><div class="stat-value">234</div><p class="muted">+12 this week</p></div><div class="card stat"><h3>New This Week</h3><div class="stat-value">{new_this_week}</div><p class="muted">Awaiting review</p></div></section>"#
    );

    let _ = write!(
        content,
        r#"<section class="card"><h2>Recent Gazettes</h2><p class="muted">Latest government gazette publications</p>{}</section>"#,
        gazette_rows(results)
    );

    dashboard_shell(viewer, NavItem::Gazettes, "Gazettes", &content)
}

/// Keyword alerts and alert mailboxes
#[must_use]
pub fn alerts(viewer: &Viewer) -> String {
    let mut content = header("Alerts", "Manage keyword alerts and email notifications");

    let active = KEYWORD_ALERTS.iter().filter(|a| a.status == "active").count();
    let triggered: u32 = KEYWORD_ALERTS.iter().map(|a| a.trigger_count).sum();
    let verified = EMAIL_ACCOUNTS.iter().filter(|a| a.status == "verified").count();
    let _ = write!(
        content,
        r#"<section class="grid stats"><div class="card stat"><h3>Active Alerts</h3><div class="stat-value">{active}</div></div><div class="card stat"><h3>Triggers This Week</h3><div class="stat-value">{triggered}</div></div><div class="card stat"><h3>Verified Emails</h3><div class="stat-value">{verified}</div></div></section>"#
    );

    content.push_str(r#"<section class="card"><h2>Keyword Alerts</h2><ul class="alerts">"#);
    for alert in &KEYWORD_ALERTS {
        let recipients = alert
            .email_recipients
            .iter()
            .map(|r| escape_html(r))
            .collect::<Vec<_>>()
            .join(", ");
        let _ = write!(
            content,
            r#"<li class="alert-rule" data-id="{}"><div class="alert-head"><h3>{}</h3>{}</div><div class="keywords">{}</div><p class="meta"><span>Last triggered: {}</span><span>{} matches</span><span>Recipients: {recipients}</span></p></li>"#,
            alert.id,
            escape_html(alert.name),
            badge(alert.status),
            keyword_list(alert.keywords),
            format_date(alert.last_triggered),
            alert.trigger_count,
        );
    }
    content.push_str("</ul></section>");

    content.push_str(r#"<section class="card"><h2>Email Accounts</h2><table class="table"><thead><tr><th>Email</th><th>Status</th><th>Alerts</th><th>Last Used</th></tr></thead><tbody>"#);
    for account in &EMAIL_ACCOUNTS {
        let _ = write!(
            content,
            r#"<tr data-id="{}"><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>"#,
            account.id,
            escape_html(account.email),
            badge(account.status),
            account.alert_count,
            format_date(account.last_used),
        );
    }
    content.push_str("</tbody></table></section>");

    dashboard_shell(viewer, NavItem::Alerts, "Alerts", &content)
}

/// Subscription, payment method and invoices
#[must_use]
pub fn billing(viewer: &Viewer) -> String {
    let plan = &CURRENT_PLAN;
    let mut content = header("Billing", "Manage your subscription and billing information");

    let features: String = plan
        .features
        .iter()
        .map(|f| format!("<li>{}</li>", escape_html(f)))
        .collect();
    let _ = write!(
        content,
        r#"<section class="grid"><div class="card"><h2>Current Plan</h2><div class="plan-head"><h3>{name}</h3>{status}</div><p class="price">${price} {currency} / {interval}</p><p class="muted">Next billing date: {next}</p><ul class="features">{features}</ul></div>"#,
        name = escape_html(plan.name),
        status = badge(plan.status),
        price = plan.price,
        currency = escape_html(plan.currency),
        interval = escape_html(plan.interval),
        next = format_date(plan.next_billing),
    );

    let card = &PAYMENT_METHOD;
    let _ = write!(
        content,
        r#"<div class="card"><h2>Payment Method</h2><p>{} ending in {}</p><p class="muted">Expires {:02}/{}</p></div></section>"#,
        escape_html(card.brand),
        escape_html(card.last4),
        card.expiry_month,
        card.expiry_year,
    );

    content.push_str(r#"<section class="card"><h2>Billing History</h2><table class="table"><thead><tr><th>Invoice</th><th>Date</th><th>Description</th><th>Amount</th><th>Status</th></tr></thead><tbody>"#);
    for invoice in &INVOICES {
        let _ = write!(
            content,
            r#"<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>"#,
            escape_html(invoice.id),
            format_date(invoice.date),
            escape_html(invoice.description),
            format_amount(invoice.amount_cents),
            badge(invoice.status),
        );
    }
    content.push_str("</tbody></table></section>");

    dashboard_shell(viewer, NavItem::Billing, "Billing", &content)
}

/// Profile, security and notification settings
#[must_use]
pub fn account(viewer: &Viewer) -> String {
    let mut content = header("Account Settings", "Manage your account information and preferences");

    let profile = FormBuilder::new("#", "POST")
        .id("profile-form")
        .field("first_name", InputType::Text)
        .label("First Name")
        .placeholder("Enter your first name")
        .done()
        .field("last_name", InputType::Text)
        .label("Last Name")
        .placeholder("Enter your last name")
        .done()
        .field("email", InputType::Email)
        .label("Email Address")
        .value_opt(viewer.session.email.as_deref())
        .disabled()
        .help("Email address cannot be changed. Contact support if you need to update this.")
        .done()
        .field("company", InputType::Text)
        .label("Company")
        .placeholder("Enter your company name")
        .done()
        .field("job_title", InputType::Text)
        .label("Job Title")
        .placeholder("Enter your job title")
        .done()
        .select("timezone")
        .label("Timezone")
        .option("Australia/Perth", "Perth (AWST)")
        .option("Australia/Adelaide", "Adelaide (ACST)")
        .option("Australia/Sydney", "Sydney (AEST)")
        .value("Australia/Perth")
        .done()
        .submit("Save Changes")
        .build();
    let _ = write!(
        content,
        r#"<section class="card"><h2>Profile Information</h2><p class="muted">Update your personal information and profile details</p>{profile}</section>"#
    );

    let password = FormBuilder::new("#", "POST")
        .id("password-form")
        .field("current_password", InputType::Password)
        .label("Current Password")
        .autocomplete("current-password")
        .done()
        .field("new_password", InputType::Password)
        .label("New Password")
        .autocomplete("new-password")
        .min_length(6)
        .done()
        .field("confirm_password", InputType::Password)
        .label("Confirm New Password")
        .autocomplete("new-password")
        .done()
        .submit("Update Password")
        .build();
    let _ = write!(
        content,
        r#"<section class="card"><h2>Security</h2><h3>Change Password</h3>{password}<h3>Two-Factor Authentication</h3><p>Authenticator App</p><p class="muted">Use an authenticator app to generate one-time codes.</p><h3>Active Sessions</h3><p>Current Session</p><p class="muted">This browser</p></section>"#
    );

    let notifications = FormBuilder::new("#", "POST")
        .id("notification-form")
        .checkbox("email_notifications")
        .label("Email Notifications")
        .help("Receive notifications via email")
        .checked()
        .done()
        .checkbox("gazette_alerts")
        .label("Gazette Alerts")
        .help("Get notified when new gazettes match your keywords")
        .checked()
        .done()
        .checkbox("system_updates")
        .label("System Updates")
        .help("Important updates about the LG Radar platform")
        .checked()
        .done()
        .checkbox("marketing")
        .label("Marketing Communications")
        .help("Product news and special offers")
        .done()
        .submit("Save Preferences")
        .build();
    let _ = write!(
        content,
        r#"<section class="card"><h2>Notifications</h2><p class="muted">Choose how you want to be notified</p>{notifications}</section>"#
    );

    content.push_str(
        r#"<section class="card danger"><h2>Danger Zone</h2><p class="muted">Irreversible and destructive actions</p><h3>Delete Account</h3><p class="muted">Permanently delete your account and all associated data. This action cannot be undone.</p><button class="btn btn-danger" disabled>Delete Account</button></section>"#,
    );

    dashboard_shell(viewer, NavItem::Account, "Account", &content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Session;
    use crate::data::search_gazettes;

    fn viewer() -> Viewer {
        Viewer {
            session: Session::new("u-1").with_email("a@b.com"),
            demo: false,
        }
    }

    #[test]
    fn test_overview_lists_stats_and_activity() {
        let html = overview(&viewer());
        assert!(html.contains("Active Gazettes"));
        assert!(html.contains("Keyword Alert Triggered"));
        assert!(html.contains("a@b.com"));
    }

    #[test]
    fn test_gazettes_page_renders_results_and_query() {
        let results = search_gazettes("mining");
        let html = gazettes(&viewer(), "mining", &results);
        assert!(html.contains("WA Government Gazette No. 233"));
        assert!(!html.contains("WA Government Gazette No. 231"));
        assert!(html.contains(r#"value="mining""#));
        assert!(html.contains(r##"hx-target="#gazette-list""##));
    }

    #[test]
    fn test_demo_search_keeps_demo_flag() {
        let viewer = Viewer {
            session: Session::demo(),
            demo: true,
        };
        let html = gazettes(&viewer, "", &search_gazettes(""));
        assert!(html.contains(r#"<input type="hidden" name="demo" value="true">"#));
    }

    #[test]
    fn test_empty_search_fragment() {
        assert!(gazette_rows(&[]).contains("No gazettes match your search."));
    }

    #[test]
    fn test_billing_page_shows_invoices() {
        let html = billing(&viewer());
        assert!(html.contains("INV-2025-001"));
        assert!(html.contains("$99.00"));
        assert!(html.contains("Visa ending in 4242"));
        assert!(html.contains("Expires 12/2027"));
    }

    #[test]
    fn test_account_page_shows_email_read_only() {
        let html = account(&viewer());
        assert!(html.contains(r#"disabled value="a@b.com""#));
        assert!(html.contains("Danger Zone"));
    }

    #[test]
    fn test_account_page_without_email() {
        let viewer = Viewer {
            session: Session::new("u-2"),
            demo: false,
        };
        let html = account(&viewer);
        assert!(html.contains("Account Settings"));
        assert!(!html.contains(r#"disabled value="#));
    }
}
