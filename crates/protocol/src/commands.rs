use serde::{Deserialize, Serialize};

use crate::types::{Timespan, WidgetHandle};

/// A single side effect the host must perform for a widget.
///
/// The core never touches the DOM or a clock. Each event entry point returns
/// a `Vec<WidgetCommand>` and the host applies them in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WidgetCommand {
    /// Replace the image source, which makes the browser fetch the new graph.
    SetSrc { url: String },

    /// Arm a timer and call the widget's wheel flush after `delay_ms`.
    /// A newer schedule supersedes any pending one.
    ScheduleWheelFlush { delay_ms: u32 },

    /// The widget moved to a new window on a user gesture or an explicit
    /// update. Hosts may surface this as a `zoomy.afterupdate` event.
    AfterUpdate { span: Timespan },
}

/// A command addressed to one widget of a widget set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Targeted {
    pub handle: WidgetHandle,
    pub command: WidgetCommand,
}

impl Targeted {
    pub fn new(handle: WidgetHandle, command: WidgetCommand) -> Self {
        Self { handle, command }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_serialize_with_type_tag() {
        let cmd = Targeted::new(
            WidgetHandle(3),
            WidgetCommand::SetSrc {
                url: "g.png;start=1;end=2".into(),
            },
        );
        let json = serde_json::to_value(&cmd).unwrap();
        assert_eq!(json["handle"], 3);
        assert_eq!(json["command"]["type"], "set_src");
        assert_eq!(json["command"]["url"], "g.png;start=1;end=2");
    }

    #[test]
    fn after_update_carries_span() {
        let span = Timespan::new(1250, 1750).unwrap();
        let json = serde_json::to_string(&WidgetCommand::AfterUpdate { span }).unwrap();
        assert_eq!(json, r#"{"type":"after_update","span":{"start":1250,"end":1750}}"#);
    }
}
