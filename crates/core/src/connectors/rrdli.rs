use zoomy_protocol::Timespan;

use super::plain::absolute_url;
use super::query::{Param, Separator, read_param};
use super::{Connector, ConnectorError, ConnectorKind};

/// Window shown when an rrdli URL carries no start.
pub const DEFAULT_WINDOW: i64 = 600;

/// rrdli graphs: `&`-delimited absolute timestamps with a fallback window.
///
/// rrdli URLs cannot carry an end without a start. A URL without a start
/// resets to the trailing [`DEFAULT_WINDOW`] seconds.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rrdli;

impl Connector for Rrdli {
    fn kind(&self) -> ConnectorKind {
        ConnectorKind::Rrdli
    }

    fn timespan(&self, url: &str, now: i64) -> Result<Timespan, ConnectorError> {
        let start = read_param(url, Param::Start)?;
        let end = read_param(url, Param::End)?;
        let fallback_start = now.saturating_sub(DEFAULT_WINDOW);
        match (start, end) {
            (None, None) => ConnectorError::span(fallback_start, now),
            (None, Some(end)) => ConnectorError::span(fallback_start, end),
            (Some(start), end) => ConnectorError::span(start, end.unwrap_or(now)),
        }
    }

    fn url(&self, url: &str, span: Timespan, _now: i64) -> String {
        absolute_url(url, span, Separator::Ampersand)
    }
}
