use serde::{Deserialize, Serialize};
use std::path::Path;

/// Display settings for the dashboard: title, labels and chart colours.
/// Every field has a default, so a partial `dashboard.json` is fine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub title:                  String,
    pub selector_prompt:        String,
    pub table_placeholder:      String,
    pub chart_placeholder:      String,
    pub no_selection_label:     String,
    pub currency_symbol:        String,
    pub chart_background_color: String,
    pub chart_border_color:     String,
    pub chart_border_width:     u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title:                  "User Data Visualization".into(),
            selector_prompt:        "-- Select a User --".into(),
            table_placeholder:      "Please select a user to view the data.".into(),
            chart_placeholder:      "Please select a user to view the graph.".into(),
            no_selection_label:     "No User Selected".into(),
            currency_symbol:        "$".into(),
            chart_background_color: "rgba(75, 192, 192, 0.2)".into(),
            chart_border_color:     "rgba(75, 192, 192, 1)".into(),
            chart_border_width:     1,
        }
    }
}

impl DashboardConfig {
    /// Load `{data_dir}/dashboard.json`.
    /// In tests, use DashboardConfig::default().
    pub fn load(data_dir: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = data_dir.as_ref().join("dashboard.json");
        let content = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", path.display()))?;
        let config: DashboardConfig = serde_json::from_str(&content)?;
        log::info!("Loaded dashboard config from {}", path.display());
        Ok(config)
    }
}
