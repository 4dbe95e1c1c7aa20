//! Zoom and pan for server-rendered time-series graph images.
//!
//! A graph image encodes its displayed window in its URL. The [`connectors`]
//! read and rewrite that window for each backend's URL dialect, the
//! [`transform`] functions turn pixel gestures into new windows, and
//! [`widget::Widget`] ties both to the lifecycle of one image element.

pub mod connectors;
pub mod model;
pub mod transform;
pub mod widget;
pub mod widget_set;

pub use connectors::{Connector, ConnectorError, ConnectorKind};
pub use model::{ConfigError, Options, ViewState};
pub use widget::{Widget, WidgetError};
pub use widget_set::WidgetSet;
