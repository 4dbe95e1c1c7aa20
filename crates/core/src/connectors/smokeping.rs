use zoomy_protocol::Timespan;

use super::plain::{absolute_timespan, absolute_url};
use super::query::Separator;
use super::{Connector, ConnectorError, ConnectorKind};

/// Smokeping graphs: the plain dialect with `;` as query separator.
#[derive(Debug, Clone, Copy, Default)]
pub struct Smokeping;

impl Connector for Smokeping {
    fn kind(&self) -> ConnectorKind {
        ConnectorKind::Smokeping
    }

    fn timespan(&self, url: &str, now: i64) -> Result<Timespan, ConnectorError> {
        absolute_timespan(url, now)
    }

    fn url(&self, url: &str, span: Timespan, _now: i64) -> String {
        absolute_url(url, span, Separator::Semicolon)
    }
}
