//! Command implementations invoked from `main`.

use std::io;

use log::info;

use crate::store::Store;
use crate::tui::app::App;
use crate::tui::keys::StdTerminal;

/// Usage text printed for `-help`.
pub fn usage() -> String {
    [
        format!("kb - Kanban Command Line Tool {}", env!("CARGO_PKG_VERSION")),
        "Usage: kb [options]".to_string(),
        String::new(),
        "Where options include:".to_string(),
        String::new(),
        "\t-help              Show this help message".to_string(),
        "\t--settings <PATH>  Use a different settings file".to_string(),
        "\t--verbose          Write debug output to the log".to_string(),
        "\t--version          Print the version".to_string(),
        String::new(),
        "No arguments will open the main menu.".to_string(),
    ]
    .join("\n")
}

pub fn cmd_help() {
    println!("{}", usage());
}

/// Launch the interactive main menu on the process's terminal.
pub fn cmd_menu(store: &mut Store) -> io::Result<()> {
    info!("Starting interactive menu on {}", store.path().display());
    let mut terminal = StdTerminal::new();
    App::new(store).run(&mut terminal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_mentions_help_flag() {
        let text = usage();
        assert!(text.contains("Usage: kb [options]"));
        assert!(text.contains("-help"));
        assert!(text.ends_with("No arguments will open the main menu."));
    }
}
