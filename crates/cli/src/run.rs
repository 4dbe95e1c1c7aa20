use anyhow::{Result, bail};
use log::info;
use zoomy_core::Widget;
use zoomy_protocol::{Timespan, WidgetCommand};

use crate::{Cli, Command};

/// Execute the subcommand and return what should be printed.
pub fn run(cli: &Cli) -> Result<String> {
    let options = cli.widget.load_options()?;
    let now = cli.widget.now()?;
    let url = match &cli.command {
        Command::Parse { url }
        | Command::At { url, .. }
        | Command::Zoom { url, .. }
        | Command::Pan { url, .. }
        | Command::Update { url, .. } => url,
    };

    let mut widget = Widget::new(url.as_str(), options)?;
    let span = widget.on_load(now, cli.widget.width)?;
    info!("{url} displays {span} with the {} connector", widget.options().connector);

    match &cli.command {
        Command::Parse { .. } => Ok(format_span(span, cli.json)?),
        Command::At { x, .. } => {
            let t = widget.timestamp_at(*x)?;
            Ok(if cli.json {
                serde_json::json!({ "x": x, "timestamp": t }).to_string()
            } else {
                t.to_string()
            })
        }
        Command::Zoom { x, steps, .. } => {
            let commands = widget.zoom_at(*x, *steps);
            rewritten(&commands, cli.json)
        }
        Command::Pan { from, to, .. } => {
            let commands = widget.pan(*from, *to);
            rewritten(&commands, cli.json)
        }
        Command::Update { start, end, .. } => {
            let Some(target) = Timespan::new(*start, *end) else {
                bail!("start {start} must be before end {end}");
            };
            let commands = widget.update(target, false);
            rewritten(&commands, cli.json)
        }
    }
}

fn format_span(span: Timespan, json: bool) -> serde_json::Result<String> {
    if json {
        serde_json::to_string(&span)
    } else {
        Ok(format!("{} {} ({}s)", span.start(), span.end(), span.range()))
    }
}

/// The URL of the `SetSrc` command, or an error if the widget ignored the
/// gesture.
fn rewritten(commands: &[WidgetCommand], json: bool) -> Result<String> {
    let url = commands.iter().find_map(|command| match command {
        WidgetCommand::SetSrc { url } => Some(url),
        _ => None,
    });
    let Some(url) = url else {
        bail!("graph unchanged: the window is outside [minrange, maxrange] or did not move");
    };
    if !json {
        return Ok(url.clone());
    }
    let span = commands.iter().find_map(|command| match command {
        WidgetCommand::AfterUpdate { span } => Some(*span),
        _ => None,
    });
    Ok(serde_json::json!({ "url": url, "span": span }).to_string())
}
