//! URL dialects of the supported graph backends.
//!
//! A connector knows how a backend encodes the displayed window in an image
//! URL. It reads the window back ([`Connector::timespan`]) and writes a new
//! one ([`Connector::url`]) while leaving every other query parameter alone.

pub mod cricket;
pub mod plain;
pub mod rrdli;
pub mod smokeping;

mod query;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use zoomy_protocol::Timespan;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectorError {
    #[error("could not extract graph {param} time from {value:?}")]
    InvalidTimestamp { param: &'static str, value: String },
    #[error("graph url has no {0} parameter")]
    MissingParameter(&'static str),
    #[error("graph url describes an empty or unrepresentable timespan {start}..{end}")]
    EmptyTimespan { start: i64, end: i64 },
}

impl ConnectorError {
    pub(crate) fn span(start: i64, end: i64) -> Result<Timespan, Self> {
        Timespan::new(start, end).ok_or(Self::EmptyTimespan { start, end })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("connector not found: {0}")]
pub struct UnknownConnector(pub String);

/// URL parsing/building strategy for one graph backend.
///
/// Implementations are stateless. `now` is the Unix time (seconds) at which
/// the image was last loaded; dialects that omit parameters or describe the
/// window relative to the present resolve against it.
pub trait Connector: fmt::Debug + Send + Sync {
    fn kind(&self) -> ConnectorKind;

    /// Recover the window displayed by the image at `url`.
    fn timespan(&self, url: &str, now: i64) -> Result<Timespan, ConnectorError>;

    /// Rewrite `url` so that it displays `span`.
    fn url(&self, url: &str, span: Timespan, now: i64) -> String;
}

/// Name of a connector, as given in widget options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectorKind {
    Plain,
    #[default]
    Smokeping,
    Cricket,
    Rrdli,
}

impl ConnectorKind {
    pub const ALL: [ConnectorKind; 4] = [
        ConnectorKind::Plain,
        ConnectorKind::Smokeping,
        ConnectorKind::Cricket,
        ConnectorKind::Rrdli,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ConnectorKind::Plain => "plain",
            ConnectorKind::Smokeping => "smokeping",
            ConnectorKind::Cricket => "cricket",
            ConnectorKind::Rrdli => "rrdli",
        }
    }

    /// The strategy implementing this dialect.
    pub fn connector(self) -> &'static dyn Connector {
        match self {
            ConnectorKind::Plain => &plain::Plain,
            ConnectorKind::Smokeping => &smokeping::Smokeping,
            ConnectorKind::Cricket => &cricket::Cricket,
            ConnectorKind::Rrdli => &rrdli::Rrdli,
        }
    }
}

impl fmt::Display for ConnectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConnectorKind {
    type Err = UnknownConnector;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownConnector(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_resolve_by_name() {
        for kind in ConnectorKind::ALL {
            assert_eq!(kind.as_str().parse::<ConnectorKind>(), Ok(kind));
            assert_eq!(kind.connector().kind(), kind);
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        let err = "nagios".parse::<ConnectorKind>().unwrap_err();
        assert_eq!(err.to_string(), "connector not found: nagios");
    }

    #[test]
    fn default_is_smokeping() {
        assert_eq!(ConnectorKind::default(), ConnectorKind::Smokeping);
        let kind: ConnectorKind = serde_json::from_str(r#""cricket""#).unwrap();
        assert_eq!(kind, ConnectorKind::Cricket);
    }
}
