//! View-models handed to whatever renders the dashboard.
//!
//! Building a view never fails. No selection renders placeholders, a
//! missing account renders "N/A", and no calls or emails render 0.

use crate::{
    aggregator::UserMetrics,
    config::DashboardConfig,
    dataset::Dataset,
    selection::SelectionStore,
    types::{Balance, UserId},
};
use serde::{Deserialize, Serialize};

pub const TABLE_HEADERS: [&str; 4] = [
    "User Name",
    "Account Balance",
    "Total Call Duration",
    "Total Email Count",
];

pub const CHART_LABELS: [&str; 2] = ["Call Duration", "Email Count"];

/// One entry in the user picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserOption {
    pub value: UserId,
    pub label: String,
}

/// The single row of the summary table, already formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub user_name:           String,
    pub balance:             String,
    pub total_call_duration: String,
    pub total_email_count:   String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub label:            String,
    pub data:             Vec<f64>,
    pub background_color: String,
    pub border_color:     String,
    pub border_width:     u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub labels:   Vec<String>,
    pub datasets: Vec<ChartSeries>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "content", rename_all = "snake_case")]
pub enum TableView {
    Row(SummaryRow),
    Placeholder(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "content", rename_all = "snake_case")]
pub enum ChartView {
    Line(ChartData),
    Placeholder(String),
}

/// Everything on the page for one selection state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub title:             String,
    pub selector_prompt:   String,
    pub options:           Vec<UserOption>,
    pub selected:          Option<UserId>,
    pub selection_version: u64,
    pub metrics:           Option<UserMetrics>,
    pub table:             TableView,
    pub chart:             ChartView,
}

impl DashboardView {
    pub fn build(config: &DashboardConfig, dataset: &Dataset, selection: &SelectionStore) -> Self {
        let metrics = dataset.metrics_for(selection.current());
        Self {
            title:             config.title.clone(),
            selector_prompt:   config.selector_prompt.clone(),
            options:           user_options(dataset),
            selected:          selection.current(),
            selection_version: selection.version(),
            table:             table_view(config, metrics.as_ref()),
            chart:             chart_view(config, metrics.as_ref()),
            metrics,
        }
    }
}

/// Picker entries in dataset order.
pub fn user_options(dataset: &Dataset) -> Vec<UserOption> {
    dataset
        .users
        .iter()
        .map(|u| UserOption { value: u.id, label: u.name.clone() })
        .collect()
}

/// Name shown for the selection. Ghost selections fall back to the id.
pub fn display_name(metrics: &UserMetrics) -> String {
    match &metrics.user {
        Some(user) => user.name.clone(),
        None => format!("User #{}", metrics.user_id),
    }
}

pub fn format_balance(config: &DashboardConfig, balance: Option<Balance>) -> String {
    match balance {
        Some(b) => format!("{}{b}", config.currency_symbol),
        None => "N/A".into(),
    }
}

pub fn summary_row(config: &DashboardConfig, metrics: &UserMetrics) -> SummaryRow {
    SummaryRow {
        user_name:           display_name(metrics),
        balance:             format_balance(config, metrics.balance),
        total_call_duration: format!("{} minutes", metrics.total_call_duration),
        total_email_count:   format!("{} emails", metrics.total_email_count),
    }
}

pub fn table_view(config: &DashboardConfig, metrics: Option<&UserMetrics>) -> TableView {
    match metrics {
        Some(m) => TableView::Row(summary_row(config, m)),
        None => TableView::Placeholder(config.table_placeholder.clone()),
    }
}

/// Chart data for the selection. With nothing selected the series is
/// labelled as such and both points are zero; callers decide whether to
/// draw it or show the placeholder.
pub fn chart_data(config: &DashboardConfig, metrics: Option<&UserMetrics>) -> ChartData {
    let (label, data) = match metrics {
        Some(m) => (
            format!("{}'s Data", display_name(m)),
            vec![m.total_call_duration, m.total_email_count],
        ),
        None => (config.no_selection_label.clone(), vec![0.0, 0.0]),
    };
    ChartData {
        labels:   CHART_LABELS.iter().map(|l| l.to_string()).collect(),
        datasets: vec![ChartSeries {
            label,
            data,
            background_color: config.chart_background_color.clone(),
            border_color:     config.chart_border_color.clone(),
            border_width:     config.chart_border_width,
        }],
    }
}

pub fn chart_view(config: &DashboardConfig, metrics: Option<&UserMetrics>) -> ChartView {
    match metrics {
        Some(_) => ChartView::Line(chart_data(config, metrics)),
        None => ChartView::Placeholder(config.chart_placeholder.clone()),
    }
}
