use std::sync::LazyLock;

use regex::Regex;

use super::ConnectorError;

/// Query parameters the connectors read and write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Param {
    Start,
    End,
    Range,
}

static START: LazyLock<Regex> = LazyLock::new(|| param_pattern("start"));
static END: LazyLock<Regex> = LazyLock::new(|| param_pattern("end"));
static RANGE: LazyLock<Regex> = LazyLock::new(|| param_pattern("range"));

/// Matches `name=value` right after a query delimiter, capturing the value.
#[allow(clippy::expect_used)]
fn param_pattern(name: &str) -> Regex {
    Regex::new(&format!(r"(?:^|[?&;]){name}=([^&;#]*)")).expect("literal parameter pattern")
}

impl Param {
    pub(crate) fn name(self) -> &'static str {
        match self {
            Param::Start => "start",
            Param::End => "end",
            Param::Range => "range",
        }
    }

    fn regex(self) -> &'static Regex {
        match self {
            Param::Start => &START,
            Param::End => &END,
            Param::Range => &RANGE,
        }
    }
}

/// Query string delimiter used when a parameter has to be appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Separator {
    /// `a=1&b=2`; a `?` is inserted first if the URL has no query yet.
    Ampersand,
    /// `a=1;b=2`, appended as-is (Smokeping and Cricket style).
    Semicolon,
}

/// Integer value of `param`, `None` if the parameter is absent or empty.
pub(crate) fn read_param(url: &str, param: Param) -> Result<Option<i64>, ConnectorError> {
    let Some(value) = param
        .regex()
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
    else {
        return Ok(None);
    };
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse::<i64>()
        .map(Some)
        .map_err(|_| ConnectorError::InvalidTimestamp {
            param: param.name(),
            value: value.to_string(),
        })
}

/// Replace the value of `param` in `url`, or append it if absent.
pub(crate) fn write_param(url: &str, param: Param, value: i64, separator: Separator) -> String {
    let value = value.to_string();

    if let Some(m) = param.regex().captures(url).and_then(|caps| caps.get(1)) {
        let mut out = String::with_capacity(url.len() + value.len());
        out.push_str(&url[..m.start()]);
        out.push_str(&value);
        out.push_str(&url[m.end()..]);
        return out;
    }

    let (base, fragment) = url.split_at(url.find('#').unwrap_or(url.len()));
    let mut out = String::with_capacity(url.len() + param.name().len() + value.len() + 2);
    out.push_str(base);
    match separator {
        Separator::Ampersand => {
            if !base.contains('?') {
                out.push('?');
            } else if !base.ends_with(['?', '&']) {
                out.push('&');
            }
        }
        Separator::Semicolon => {
            if !base.ends_with(['?', ';']) {
                out.push(';');
            }
        }
    }
    out.push_str(param.name());
    out.push('=');
    out.push_str(&value);
    out.push_str(fragment);
    out
}
