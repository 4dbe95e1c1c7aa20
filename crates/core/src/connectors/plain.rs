use zoomy_protocol::Timespan;

use super::query::{Param, Separator, read_param, write_param};
use super::{Connector, ConnectorError, ConnectorKind};

/// Absolute `start`/`end` timestamps in an `&`-delimited query string.
///
/// A missing parameter stands for `now`, so `?start=1700000000` alone
/// displays everything up to the present.
#[derive(Debug, Clone, Copy, Default)]
pub struct Plain;

impl Connector for Plain {
    fn kind(&self) -> ConnectorKind {
        ConnectorKind::Plain
    }

    fn timespan(&self, url: &str, now: i64) -> Result<Timespan, ConnectorError> {
        absolute_timespan(url, now)
    }

    fn url(&self, url: &str, span: Timespan, _now: i64) -> String {
        absolute_url(url, span, Separator::Ampersand)
    }
}

pub(crate) fn absolute_timespan(url: &str, now: i64) -> Result<Timespan, ConnectorError> {
    let start = read_param(url, Param::Start)?.unwrap_or(now);
    let end = read_param(url, Param::End)?.unwrap_or(now);
    ConnectorError::span(start, end)
}

pub(crate) fn absolute_url(url: &str, span: Timespan, separator: Separator) -> String {
    let url = write_param(url, Param::Start, span.start(), separator);
    write_param(&url, Param::End, span.end(), separator)
}
