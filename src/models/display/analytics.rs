//! Analytics display model
//!
//! The analytics payload is a fixed set of headline figures; they render
//! as metric/value rows rather than one wide record.

use serde::Serialize;
use tabled::Tabled;

use crate::client::models::Analytics;
use crate::output::formatters::{format_percent, format_rupiah};

/// One headline figure
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct AnalyticsMetricDisplay {
    #[tabled(rename = "SECTION")]
    pub section: String,

    #[tabled(rename = "METRIC")]
    pub metric: String,

    #[tabled(rename = "VALUE")]
    pub value: String,
}

fn metric(section: &str, name: &str, value: String) -> AnalyticsMetricDisplay {
    AnalyticsMetricDisplay {
        section: section.to_string(),
        metric: name.to_string(),
        value,
    }
}

/// Headline figures of the dashboard overview, in display order
pub fn analytics_metrics(a: &Analytics) -> Vec<AnalyticsMetricDisplay> {
    let o = &a.analytic_order;
    let p = &a.analytic_payout;
    let pr = &a.analytic_product;
    let u = &a.analytic_user;
    let r = &a.analytic_revenue;
    let pl = &a.analytic_platform;

    vec![
        metric("Revenue", "Total revenue", format_rupiah(r.total_revenue)),
        metric("Revenue", "Average order value", format_rupiah(r.average_order_value)),
        metric("Orders", "Total", o.total_order.to_string()),
        metric("Orders", "Successful", o.total_order_success.to_string()),
        metric("Orders", "Failed", o.total_order_failed.to_string()),
        metric("Payouts", "Total", p.total_payout.to_string()),
        metric("Payouts", "Successful", p.total_payout_success.to_string()),
        metric("Payouts", "Failed", p.total_payout_failed.to_string()),
        metric("Products", "Active", pr.total_active_products.to_string()),
        metric("Products", "Digital", pr.total_digital_products.to_string()),
        metric("Products", "Physical", pr.total_physical_products.to_string()),
        metric("Users", "Total", u.total_users.to_string()),
        metric("Users", "Sellers", u.total_sellers.to_string()),
        metric("Users", "Verified", u.total_verified_users.to_string()),
        metric("Platform", "Quizzes", pl.total_quizzes.to_string()),
        metric("Platform", "Certificates", pl.total_certificates.to_string()),
        metric(
            "Platform",
            "Quiz completion rate",
            format_percent(pl.quiz_completion_rate),
        ),
    ]
}
