//! CLI module.
//!
//! `--help` and `--version` are answered before any logging or
//! configuration is set up:
//!
//! ```ignore
//! use device_tray::cli::{parse_args, run_cli_command};
//!
//! if run_cli_command(parse_args(std::env::args())) {
//!     return Ok(());
//! }
//! // continue to the agent
//! ```

pub mod args;
pub mod version;

pub use args::{parse_args, CliCommand};
pub use version::{help_line, version_line, VERSION};

/// Run a CLI command if applicable.
///
/// Returns `true` when the command was handled and the process should exit,
/// `false` for [`CliCommand::Run`].
pub fn run_cli_command(command: CliCommand) -> bool {
    match command {
        CliCommand::Help => {
            println!("{}", help_line());
            true
        }
        CliCommand::Version => {
            println!("{}", version_line());
            true
        }
        CliCommand::Run => false,
    }
}
