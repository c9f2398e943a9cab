//! Platform analytics models (`/analytic/getall`)

use serde::{Deserialize, Serialize};

/// Count for one month
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlyCount {
    pub month: String,
    #[serde(default, alias = "total_orders", alias = "total_payouts")]
    pub total: u64,
}

/// Money amount for one month
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlyAmount {
    pub month: String,
    #[serde(default)]
    pub amount: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RevenueByProduct {
    pub product_type: String,
    #[serde(default)]
    pub revenue: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticOrder {
    pub total_order: u64,
    pub total_order_success: u64,
    pub total_order_failed: u64,
    pub monthly_orders: Vec<MonthlyCount>,
    pub monthly_order_success: Vec<MonthlyCount>,
    pub monthly_order_failed: Vec<MonthlyCount>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticPayout {
    pub total_payout: u64,
    pub total_payout_success: u64,
    pub total_payout_failed: u64,
    pub monthly_payout: Vec<MonthlyCount>,
    pub monthly_payout_success: Vec<MonthlyCount>,
    pub monthly_payout_failed: Vec<MonthlyCount>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticProduct {
    pub total_active_products: u64,
    pub total_digital_products: u64,
    pub total_physical_products: u64,
    /// Shape varies by product type; passed through untouched
    pub top_selling_products: Vec<serde_json::Value>,
    pub monthly_new_products: Vec<MonthlyCount>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticUser {
    pub total_users: u64,
    pub total_sellers: u64,
    pub total_verified_users: u64,
    pub monthly_new_users: Vec<MonthlyCount>,
    pub monthly_new_sellers: Vec<MonthlyCount>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticRevenue {
    pub total_revenue: f64,
    pub average_order_value: f64,
    pub monthly_revenue: Vec<MonthlyAmount>,
    pub revenue_by_product: Vec<RevenueByProduct>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticPlatform {
    pub total_quizzes: u64,
    pub total_certificates: u64,
    /// Percentage, 0-100
    pub quiz_completion_rate: f64,
    pub monthly_quiz_taken: Vec<MonthlyCount>,
    pub monthly_certificates: Vec<MonthlyCount>,
}

/// Everything the dashboard overview shows
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Analytics {
    pub analytic_order: AnalyticOrder,
    pub analytic_payout: AnalyticPayout,
    pub analytic_product: AnalyticProduct,
    pub analytic_user: AnalyticUser,
    pub analytic_revenue: AnalyticRevenue,
    pub analytic_platform: AnalyticPlatform,
}
