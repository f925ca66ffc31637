//! Command-line argument parsing.

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Print a one-line description
    Help,
    /// Show version information
    Version,
    /// Run the agent (default)
    Run,
}

/// Parse command-line arguments and return the appropriate command.
///
/// The first flag recognized wins; anything else runs the agent.
///
/// # Examples
///
/// ```
/// use device_tray::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["device-tray".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    for arg in args.skip(1) {
        match arg.as_str() {
            "--help" | "-h" => return CliCommand::Help,
            "--version" | "-V" => return CliCommand::Version,
            _ => {}
        }
    }
    CliCommand::Run
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliCommand {
        parse_args(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_help_flag() {
        assert_eq!(parse(&["device-tray", "--help"]), CliCommand::Help);
        assert_eq!(parse(&["device-tray", "-h"]), CliCommand::Help);
    }

    #[test]
    fn test_parse_version_flag() {
        assert_eq!(parse(&["device-tray", "--version"]), CliCommand::Version);
        assert_eq!(parse(&["device-tray", "-V"]), CliCommand::Version);
    }

    #[test]
    fn test_parse_no_args() {
        assert_eq!(parse(&["device-tray"]), CliCommand::Run);
    }

    #[test]
    fn test_parse_unknown_flag_runs() {
        assert_eq!(parse(&["device-tray", "--verbose"]), CliCommand::Run);
    }

    #[test]
    fn test_first_flag_wins() {
        assert_eq!(
            parse(&["device-tray", "--version", "--help"]),
            CliCommand::Version
        );
    }
}
