pub mod commands;
pub mod types;

pub use commands::{Targeted, WidgetCommand};
pub use types::{Timespan, WidgetHandle};
