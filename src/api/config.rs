use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::render::ChartTheme;

use super::widget::Size;

/// Per-chart settings.
///
/// Serializable so hosts can keep chart setup in a config file; every field
/// falls back to its default when missing from the input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Border reserved on each side for the frame and axis labels.
    #[serde(default = "default_margin")]
    pub margin: f64,
    #[serde(default)]
    pub autoscale_y: bool,
    #[serde(default = "default_min_size")]
    pub min_size: Size,
    #[serde(default = "default_axis_label_significant_digits")]
    pub axis_label_significant_digits: usize,
    #[serde(default = "default_cursor_label_significant_digits")]
    pub cursor_label_significant_digits: usize,
    #[serde(default)]
    pub theme: ChartTheme,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            margin: default_margin(),
            autoscale_y: false,
            min_size: default_min_size(),
            axis_label_significant_digits: default_axis_label_significant_digits(),
            cursor_label_significant_digits: default_cursor_label_significant_digits(),
            theme: ChartTheme::default(),
        }
    }
}

impl ChartConfig {
    #[must_use]
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    #[must_use]
    pub fn with_autoscale_y(mut self, enabled: bool) -> Self {
        self.autoscale_y = enabled;
        self
    }

    #[must_use]
    pub fn with_theme(mut self, theme: ChartTheme) -> Self {
        self.theme = theme;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.margin.is_finite() || self.margin < 0.0 {
            return Err(ChartError::InvalidData(format!(
                "margin must be finite and >= 0, got {}",
                self.margin
            )));
        }
        if self.axis_label_significant_digits == 0 || self.cursor_label_significant_digits == 0 {
            return Err(ChartError::InvalidData(
                "label significant digits must be >= 1".to_owned(),
            ));
        }
        self.theme.validate()
    }

    /// Serializes config to pretty JSON.
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes and validates config from JSON.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

fn default_margin() -> f64 {
    50.0
}

fn default_min_size() -> Size {
    Size::new(250.0, 250.0)
}

fn default_axis_label_significant_digits() -> usize {
    2
}

fn default_cursor_label_significant_digits() -> usize {
    3
}
