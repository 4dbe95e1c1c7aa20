use serde::{Deserialize, Serialize};
use zoomy_protocol::Timespan;

use crate::model::Options;
use crate::transform::{MapError, PixelScale};

/// What a widget knows about the graph its image currently displays.
///
/// `span` and `now` are refreshed from the image URL on every load and are
/// `None` until the first successful refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub span: Option<Timespan>,
    /// Unix time (seconds) of the last image load.
    pub now: Option<i64>,
    pub margin_left: f64,
    pub margin_right: f64,
    pub zoom_factor: f64,
    /// Last source known to load, restored when a new one fails.
    pub last_url: Option<String>,
}

impl ViewState {
    pub fn new(options: &Options) -> Self {
        Self {
            span: None,
            now: None,
            margin_left: options.margin_left,
            margin_right: options.margin_right,
            zoom_factor: options.zoom_factor,
            last_url: None,
        }
    }

    /// Pixel-to-time mapping for an image `width` pixels wide.
    pub fn scale(&self, span: Timespan, width: f64) -> Result<PixelScale, MapError> {
        PixelScale::new(span, width, self.margin_left, self.margin_right)
    }
}
