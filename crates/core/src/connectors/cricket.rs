use zoomy_protocol::Timespan;

use super::query::{Param, Separator, read_param, write_param};
use super::{Connector, ConnectorError, ConnectorKind};

/// Cricket graphs: a single `range` parameter, in seconds before now.
///
/// Cricket cannot display a window that ends in the past, so the end of the
/// requested span is dropped when building a URL. Cricket also answers
/// failed renders with a success status, so widgets on this connector should
/// set a `maxrange`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cricket;

impl Connector for Cricket {
    fn kind(&self) -> ConnectorKind {
        ConnectorKind::Cricket
    }

    fn timespan(&self, url: &str, now: i64) -> Result<Timespan, ConnectorError> {
        let range = read_param(url, Param::Range)?
            .ok_or(ConnectorError::MissingParameter(Param::Range.name()))?;
        let start = now
            .checked_sub(range)
            .ok_or_else(|| ConnectorError::InvalidTimestamp {
                param: Param::Range.name(),
                value: range.to_string(),
            })?;
        ConnectorError::span(start, now)
    }

    fn url(&self, url: &str, span: Timespan, now: i64) -> String {
        let range = now.saturating_sub(span.start()).max(1);
        write_param(url, Param::Range, range, Separator::Semicolon)
    }
}
