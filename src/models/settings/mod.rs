// Settings module
// Client configuration persisted as a TOML file

use serde::{Deserialize, Serialize};

/// Client settings: where the appointment store lives and how the grids
/// render. Slot heights are rendering parameters (day view draws taller
/// slots than week view); they only need to be consistent within a view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api_base_url: String,
    pub auth_token: Option<String>,
    pub request_timeout_secs: u64,
    pub time_format: String,
    pub slot_height_day: f32,
    pub slot_height_week: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5163/api".to_string(),
            auth_token: None,
            request_timeout_secs: 20,
            time_format: "12h".to_string(),
            slot_height_day: 48.0,
            slot_height_week: 28.0,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), String> {
        if self.api_base_url.trim().is_empty() {
            return Err("api_base_url cannot be empty".to_string());
        }
        if self.time_format != "12h" && self.time_format != "24h" {
            return Err(format!("Unknown time format '{}'", self.time_format));
        }
        if self.slot_height_day <= 0.0 || self.slot_height_week <= 0.0 {
            return Err("Slot heights must be positive".to_string());
        }
        if self.request_timeout_secs == 0 {
            return Err("Request timeout must be positive".to_string());
        }
        Ok(())
    }
}
