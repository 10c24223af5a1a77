use std::path::PathBuf;

use clap::Parser;

/// Interactive terminal kanban board.
///
/// clap's own help flag is disabled so that `-help` reaches the dispatcher
/// alongside `--help` and `-h`.
#[derive(Parser, Debug)]
#[command(name = "kb", version, disable_help_flag = true)]
pub struct Cli {
    /// Path to the settings file (default: ~/.kb/settings.json).
    #[arg(long, value_name = "PATH")]
    pub settings: Option<PathBuf>,

    /// Log at debug level.
    #[arg(long)]
    pub verbose: bool,

    /// Anything else on the command line. Only the help spellings mean
    /// something; every other value falls back to the main menu.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, num_args = 0..)]
    pub args: Vec<String>,
}

impl Cli {
    pub fn wants_help(&self) -> bool {
        matches!(
            self.args.first().map(String::as_str),
            Some("-help" | "--help" | "-h")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_opens_menu() {
        let cli = Cli::try_parse_from(["kb"]).unwrap();
        assert!(!cli.wants_help());
        assert!(cli.args.is_empty());
        assert!(cli.settings.is_none());
    }

    #[test]
    fn test_help_spellings() {
        for flag in ["-help", "--help", "-h"] {
            let cli = Cli::try_parse_from(["kb", flag]).unwrap();
            assert!(cli.wants_help(), "{flag}");
        }
    }

    #[test]
    fn test_options_and_stray_arguments() {
        let cli = Cli::try_parse_from(["kb", "--settings", "/tmp/s.json", "--verbose", "myboard"])
            .unwrap();
        assert_eq!(cli.settings, Some(PathBuf::from("/tmp/s.json")));
        assert!(cli.verbose);
        assert_eq!(cli.args, vec!["myboard".to_string()]);
        assert!(!cli.wants_help());
    }
}
