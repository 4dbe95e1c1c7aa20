use log::{debug, warn};
use thiserror::Error;
use zoomy_protocol::{Timespan, WidgetCommand, WidgetHandle};

use crate::connectors::{Connector, ConnectorError};
use crate::model::{ConfigError, Options, ViewState};
use crate::transform::{self, MapError, PixelScale};

#[derive(Debug, Error)]
pub enum WidgetError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Connector(#[from] ConnectorError),
    #[error(transparent)]
    Map(#[from] MapError),
    #[error("graph timespan is unknown until the image has loaded")]
    NotLoaded,
    #[error("invalid timespan {start}..{end}")]
    InvalidTimespan { start: i64, end: i64 },
    #[error("no widget with handle {0}")]
    UnknownHandle(WidgetHandle),
}

/// Wheel steps accumulated while the wheel is still turning.
#[derive(Debug, Clone, Copy, Default)]
struct WheelBuffer {
    last_event_ms: Option<f64>,
    steps: i32,
    x: f64,
}

/// Zoom/pan controller for one graph image.
///
/// The host forwards image and pointer events and applies the returned
/// [`WidgetCommand`]s. Times are passed in: `now` in Unix seconds for image
/// loads, `now_ms` in milliseconds (any monotonic origin) for wheel
/// buffering.
#[derive(Debug)]
pub struct Widget {
    src: String,
    options: Options,
    connector: &'static dyn Connector,
    state: ViewState,
    width: Option<f64>,
    wheel: WheelBuffer,
    drag_origin: Option<f64>,
}

impl Widget {
    /// Create a widget for an image currently showing `src`.
    pub fn new(src: impl Into<String>, options: Options) -> Result<Self, WidgetError> {
        options.validate()?;
        let connector = options.connector.connector();
        Ok(Self {
            src: src.into(),
            state: ViewState::new(&options),
            options,
            connector,
            width: None,
            wheel: WheelBuffer::default(),
            drag_origin: None,
        })
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Window displayed by the last successfully loaded image.
    pub fn timespan(&self) -> Option<Timespan> {
        self.state.span
    }

    /// The image finished loading: re-derive the displayed window from its
    /// URL. On failure the window is forgotten and gestures are ignored
    /// until the next good load.
    pub fn on_load(&mut self, now: i64, width: f64) -> Result<Timespan, WidgetError> {
        self.state.now = Some(now);
        self.width = Some(width);
        match self.connector.timespan(&self.src, now) {
            Ok(span) => {
                debug!("loaded {} showing {span}", self.src);
                self.state.span = Some(span);
                Ok(span)
            }
            Err(err) => {
                warn!("cannot read timespan from {}: {err}", self.src);
                self.state.span = None;
                Err(err.into())
            }
        }
    }

    /// The image failed to load: go back to the last source that did.
    pub fn on_error(&mut self) -> Vec<WidgetCommand> {
        let Some(last_url) = self.state.last_url.clone() else {
            warn!("image {} failed to load and there is nothing to restore", self.src);
            return Vec::new();
        };
        if last_url == self.src {
            warn!("restored image {} failed to load too", self.src);
            return Vec::new();
        }
        warn!("image {} failed to load, restoring {last_url}", self.src);
        self.src = last_url.clone();
        vec![WidgetCommand::SetSrc { url: last_url }]
    }

    /// The image was resized without reloading.
    pub fn resize(&mut self, width: f64) {
        self.width = Some(width);
    }

    /// A wheel event of `delta` steps (positive zooms in) at pixel `x`.
    pub fn on_wheel(&mut self, now_ms: f64, x: f64, delta: i32) -> Vec<WidgetCommand> {
        if self.options.wheel_timeout == 0 {
            return self.zoom_at(x, delta);
        }
        self.wheel.last_event_ms = Some(now_ms);
        self.wheel.steps = self.wheel.steps.saturating_add(delta);
        self.wheel.x = x;
        vec![WidgetCommand::ScheduleWheelFlush {
            delay_ms: self.options.wheel_timeout,
        }]
    }

    /// Apply buffered wheel steps once the wheel has been quiet for
    /// `wheel_timeout` ms. Earlier calls are no-ops.
    pub fn flush_wheel(&mut self, now_ms: f64) -> Vec<WidgetCommand> {
        let Some(last) = self.wheel.last_event_ms else {
            return Vec::new();
        };
        if now_ms - last < f64::from(self.options.wheel_timeout) {
            return Vec::new();
        }
        let buffered = std::mem::take(&mut self.wheel);
        if buffered.steps == 0 {
            return Vec::new();
        }
        self.zoom_at(buffered.x, buffered.steps)
    }

    pub fn on_mouse_down(&mut self, x: f64) {
        self.drag_origin = Some(x);
    }

    pub fn on_mouse_up(&mut self, x: f64) -> Vec<WidgetCommand> {
        match self.drag_origin.take() {
            Some(from_x) => self.pan(from_x, x),
            None => Vec::new(),
        }
    }

    /// Timestamp under pixel `x` of the displayed graph.
    pub fn timestamp_at(&self, x: f64) -> Result<i64, WidgetError> {
        let (_, scale) = self.scale()?;
        Ok(scale.timestamp_at(x))
    }

    /// Zoom by `steps` wheel steps around the instant under pixel `x`.
    pub fn zoom_at(&mut self, x: f64, steps: i32) -> Vec<WidgetCommand> {
        let (span, scale) = match self.scale() {
            Ok(found) => found,
            Err(err) => {
                debug!("ignoring zoom on {}: {err}", self.src);
                return Vec::new();
            }
        };
        let anchor = scale.timestamp_at(x);
        match transform::zoom(span, anchor, steps, self.state.zoom_factor) {
            Some(zoomed) => self.update(zoomed, false),
            None => Vec::new(),
        }
    }

    /// Drag the graph from pixel `from_x` to pixel `to_x`.
    pub fn pan(&mut self, from_x: f64, to_x: f64) -> Vec<WidgetCommand> {
        let (span, scale) = match self.scale() {
            Ok(found) => found,
            Err(err) => {
                debug!("ignoring drag on {}: {err}", self.src);
                return Vec::new();
            }
        };
        match transform::pan(span, &scale, from_x, to_x) {
            Some(moved) => self.update(moved, false),
            None => Vec::new(),
        }
    }

    /// Point the image at `span`, remembering the current source for error
    /// recovery. Windows outside `[minrange, maxrange]` are ignored.
    /// `silent` suppresses [`WidgetCommand::AfterUpdate`], which is how
    /// synced widgets avoid echoing each other.
    pub fn update(&mut self, span: Timespan, silent: bool) -> Vec<WidgetCommand> {
        if !self.options.allows_range(span.range()) {
            debug!(
                "ignoring {span} on {}: range {}s outside [{}, {:?}]",
                self.src,
                span.range(),
                self.options.minrange,
                self.options.maxrange
            );
            return Vec::new();
        }
        let now = self.state.now.unwrap_or(span.end());
        let url = self.connector.url(&self.src, span, now);
        if url == self.src {
            return Vec::new();
        }
        debug!("updating {} to {span}", self.src);
        self.state.last_url = Some(std::mem::replace(&mut self.src, url.clone()));

        let mut commands = vec![WidgetCommand::SetSrc { url }];
        if !silent {
            commands.push(WidgetCommand::AfterUpdate { span });
        }
        commands
    }

    fn scale(&self) -> Result<(Timespan, PixelScale), WidgetError> {
        let (Some(span), Some(width)) = (self.state.span, self.width) else {
            return Err(WidgetError::NotLoaded);
        };
        Ok((span, self.state.scale(span, width)?))
    }
}
