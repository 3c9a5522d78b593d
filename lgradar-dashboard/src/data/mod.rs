//! Static placeholder records shown on the dashboard pages
//!
//! Ingestion, alert matching and billing live in other services; these
//! fixtures stand in for them.

/// Headline number on the overview page
#[derive(Debug, Clone, Copy)]
pub struct Stat {
    pub title: &'static str,
    pub value: &'static str,
    pub description: &'static str,
    pub trend: &'static str,
    pub trend_up: bool,
}

/// Kind of a recent activity entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    Gazette,
    Alert,
    Audit,
    Billing,
}

/// Entry in the overview activity feed
#[derive(Debug, Clone, Copy)]
pub struct Activity {
    pub id: u32,
    pub kind: ActivityKind,
    pub title: &'static str,
    pub description: &'static str,
    pub time: &'static str,
    pub status: &'static str,
}

/// A published gazette
#[derive(Debug, Clone, Copy)]
pub struct Gazette {
    pub id: u32,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub publish_date: &'static str,
    pub status: &'static str,
    pub category: &'static str,
    pub pages: u32,
    pub keywords: &'static [&'static str],
}

impl Gazette {
    /// Case-insensitive match on title, subtitle, category or keywords
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        [self.title, self.subtitle, self.category]
            .into_iter()
            .chain(self.keywords.iter().copied())
            .any(|text| text.to_lowercase().contains(&needle))
    }
}

/// A keyword alert rule
#[derive(Debug, Clone, Copy)]
pub struct KeywordAlert {
    pub id: u32,
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    pub status: &'static str,
    pub last_triggered: &'static str,
    pub trigger_count: u32,
    pub email_recipients: &'static [&'static str],
}

/// A mailbox that receives alerts
#[derive(Debug, Clone, Copy)]
pub struct EmailAccount {
    pub id: u32,
    pub email: &'static str,
    pub status: &'static str,
    pub alert_count: u32,
    pub last_used: &'static str,
}

/// The subscribed plan
#[derive(Debug, Clone, Copy)]
pub struct Plan {
    pub name: &'static str,
    pub price: u32,
    pub currency: &'static str,
    pub interval: &'static str,
    pub status: &'static str,
    pub next_billing: &'static str,
    pub features: &'static [&'static str],
}

/// A past invoice
#[derive(Debug, Clone, Copy)]
pub struct Invoice {
    pub id: &'static str,
    pub date: &'static str,
    pub amount_cents: u32,
    pub status: &'static str,
    pub description: &'static str,
}

/// Card on file
#[derive(Debug, Clone, Copy)]
pub struct PaymentMethod {
    pub brand: &'static str,
    pub last4: &'static str,
    pub expiry_month: u32,
    pub expiry_year: u32,
}

pub static STATS: [Stat; 4] = [
    Stat {
        title: "Active Gazettes",
        value: "24",
        description: "Currently monitored",
        trend: "+12%",
        trend_up: true,
    },
    Stat {
        title: "Pending Alerts",
        value: "8",
        description: "Require attention",
        trend: "-5%",
        trend_up: false,
    },
    Stat {
        title: "Audit Events",
        value: "156",
        description: "This month",
        trend: "+23%",
        trend_up: true,
    },
    Stat {
        title: "Account Status",
        value: "Active",
        description: "Next billing: Jan 15",
        trend: "Paid",
        trend_up: true,
    },
];

pub static RECENT_ACTIVITY: [Activity; 4] = [
    Activity {
        id: 1,
        kind: ActivityKind::Gazette,
        title: "New Government Gazette Published",
        description: "WA Government Gazette No. 234 - Planning Applications",
        time: "2 hours ago",
        status: "new",
    },
    Activity {
        id: 2,
        kind: ActivityKind::Alert,
        title: "Keyword Alert Triggered",
        description: "Found 3 matches for 'mining license' in recent publications",
        time: "4 hours ago",
        status: "pending",
    },
    Activity {
        id: 3,
        kind: ActivityKind::Audit,
        title: "Export Completed",
        description: "Audit log export for December 2024 completed",
        time: "1 day ago",
        status: "completed",
    },
    Activity {
        id: 4,
        kind: ActivityKind::Billing,
        title: "Payment Processed",
        description: "Monthly subscription payment of $99.00 processed",
        time: "3 days ago",
        status: "completed",
    },
];

pub static GAZETTES: [Gazette; 4] = [
    Gazette {
        id: 1,
        title: "WA Government Gazette No. 234",
        subtitle: "Planning Applications and Development Approvals",
        publish_date: "2025-01-07",
        status: "new",
        category: "Planning",
        pages: 45,
        keywords: &["mining", "development", "approval"],
    },
    Gazette {
        id: 2,
        title: "WA Government Gazette No. 233",
        subtitle: "Mining Tenement Applications",
        publish_date: "2025-01-06",
        status: "reviewed",
        category: "Mining",
        pages: 32,
        keywords: &["mining", "tenement", "application"],
    },
    Gazette {
        id: 3,
        title: "WA Government Gazette No. 232",
        subtitle: "Environmental Impact Assessments",
        publish_date: "2025-01-05",
        status: "archived",
        category: "Environment",
        pages: 28,
        keywords: &["environment", "assessment", "impact"],
    },
    Gazette {
        id: 4,
        title: "WA Government Gazette No. 231",
        subtitle: "Local Government Notices",
        publish_date: "2025-01-04",
        status: "reviewed",
        category: "Local Government",
        pages: 18,
        keywords: &["local", "government", "notice"],
    },
];

pub static KEYWORD_ALERTS: [KeywordAlert; 4] = [
    KeywordAlert {
        id: 1,
        name: "Mining License Applications",
        keywords: &["mining license", "exploration permit"],
        status: "active",
        last_triggered: "2025-01-07",
        trigger_count: 3,
        email_recipients: &["admin@lgradar.com.au"],
    },
    KeywordAlert {
        id: 2,
        name: "Development Approvals",
        keywords: &["development approval", "planning permit"],
        status: "active",
        last_triggered: "2025-01-06",
        trigger_count: 1,
        email_recipients: &["planning@lgradar.com.au"],
    },
    KeywordAlert {
        id: 3,
        name: "Environmental Assessments",
        keywords: &["environmental impact", "EPA assessment"],
        status: "paused",
        last_triggered: "2025-01-04",
        trigger_count: 0,
        email_recipients: &["environment@lgradar.com.au"],
    },
    KeywordAlert {
        id: 4,
        name: "Local Government Changes",
        keywords: &["local government", "council", "boundary"],
        status: "active",
        last_triggered: "2025-01-05",
        trigger_count: 2,
        email_recipients: &["local@lgradar.com.au", "admin@lgradar.com.au"],
    },
];

pub static EMAIL_ACCOUNTS: [EmailAccount; 4] = [
    EmailAccount {
        id: 1,
        email: "admin@lgradar.com.au",
        status: "verified",
        alert_count: 3,
        last_used: "2025-01-07",
    },
    EmailAccount {
        id: 2,
        email: "planning@lgradar.com.au",
        status: "verified",
        alert_count: 1,
        last_used: "2025-01-06",
    },
    EmailAccount {
        id: 3,
        email: "environment@lgradar.com.au",
        status: "pending",
        alert_count: 1,
        last_used: "Never",
    },
    EmailAccount {
        id: 4,
        email: "local@lgradar.com.au",
        status: "verified",
        alert_count: 1,
        last_used: "2025-01-05",
    },
];

pub static CURRENT_PLAN: Plan = Plan {
    name: "Professional",
    price: 99,
    currency: "AUD",
    interval: "month",
    status: "active",
    next_billing: "2025-02-07",
    features: &[
        "Unlimited gazette monitoring",
        "Custom keyword alerts",
        "Email notifications",
        "Audit log exports",
        "API access",
        "Priority support",
    ],
};

pub static INVOICES: [Invoice; 4] = [
    Invoice {
        id: "INV-2025-001",
        date: "2025-01-07",
        amount_cents: 9900,
        status: "paid",
        description: "Professional Plan - January 2025",
    },
    Invoice {
        id: "INV-2024-012",
        date: "2024-12-07",
        amount_cents: 9900,
        status: "paid",
        description: "Professional Plan - December 2024",
    },
    Invoice {
        id: "INV-2024-011",
        date: "2024-11-07",
        amount_cents: 9900,
        status: "paid",
        description: "Professional Plan - November 2024",
    },
    Invoice {
        id: "INV-2024-010",
        date: "2024-10-07",
        amount_cents: 9900,
        status: "paid",
        description: "Professional Plan - October 2024",
    },
];

pub static PAYMENT_METHOD: PaymentMethod = PaymentMethod {
    brand: "Visa",
    last4: "4242",
    expiry_month: 12,
    expiry_year: 2027,
};

/// Gazettes matching a search query, in publication order
#[must_use]
pub fn search_gazettes(query: &str) -> Vec<&'static Gazette> {
    GAZETTES.iter().filter(|g| g.matches(query)).collect()
}
