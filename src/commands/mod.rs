pub mod output;
pub mod registry;

pub use output::{error_message, CommandOutput};
pub use registry::{dispatch, AppState, Cli, Command};
