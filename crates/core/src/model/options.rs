use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::connectors::{ConnectorKind, UnknownConnector};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    UnknownConnector(#[from] UnknownConnector),
    #[error("zoom_factor must be a positive number other than 1, got {0}")]
    InvalidZoomFactor(f64),
    #[error("{side} margin must be a non-negative number, got {value}")]
    InvalidMargin { side: &'static str, value: f64 },
    #[error("minrange must be at least 1 second, got {0}")]
    InvalidMinRange(i64),
    #[error("maxrange {max} is below minrange {min}")]
    InvalidMaxRange { min: i64, max: i64 },
    #[error("invalid options: {0}")]
    Json(#[from] serde_json::Error),
}

/// Widget configuration, as passed by the embedding page.
///
/// Every field has a default, so `{}` is a valid configuration for a
/// Smokeping graph with the stock rrdtool margins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Backend URL dialect.
    pub connector: ConnectorKind,
    /// Narrowest window (seconds) the widget will zoom into.
    pub minrange: i64,
    /// Widest window (seconds) the widget will zoom out to, if bounded.
    pub maxrange: Option<i64>,
    /// Scale applied to the window per wheel step.
    pub zoom_factor: f64,
    /// Quiet period (ms) over which wheel steps are accumulated. 0 zooms on
    /// every wheel event.
    pub wheel_timeout: u32,
    /// Pixels between the image's left edge and the plot area.
    pub margin_left: f64,
    /// Pixels between the plot area and the image's right edge.
    pub margin_right: f64,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            connector: ConnectorKind::default(),
            minrange: 1,
            maxrange: None,
            zoom_factor: 2.0,
            wheel_timeout: 100,
            margin_left: 66.0,
            margin_right: 31.0,
        }
    }
}

impl Options {
    /// Parse options from JSON and validate them.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let options: Options = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.zoom_factor.is_finite() || self.zoom_factor <= 0.0 || self.zoom_factor == 1.0 {
            return Err(ConfigError::InvalidZoomFactor(self.zoom_factor));
        }
        for (side, value) in [("left", self.margin_left), ("right", self.margin_right)] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidMargin { side, value });
            }
        }
        if self.minrange < 1 {
            return Err(ConfigError::InvalidMinRange(self.minrange));
        }
        if let Some(max) = self.maxrange
            && max < self.minrange
        {
            return Err(ConfigError::InvalidMaxRange {
                min: self.minrange,
                max,
            });
        }
        Ok(())
    }

    /// Whether a window of `range` seconds is within `[minrange, maxrange]`.
    pub fn allows_range(&self, range: i64) -> bool {
        range >= self.minrange && self.maxrange.is_none_or(|max| range <= max)
    }
}
