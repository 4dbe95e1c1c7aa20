pub mod options;
pub mod view_state;

pub use options::{ConfigError, Options};
pub use view_state::ViewState;
