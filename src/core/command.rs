//! Command parser for the : command line

use crate::domain::NAV_PANEL;

/// Parsed command from user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Refresh,
    New,
    Panel(String),
    Goto(String),
    Help,
    Quit,

    // Unknown command
    Unknown(String),
}

/// Parse a command string (without the leading :)
pub fn parse_command(input: &str) -> Command {
    let input = input.trim();
    let mut parts = input.splitn(2, ' ');
    let cmd = parts.next().unwrap_or("");
    let args = parts
        .next()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    match cmd.to_lowercase().as_str() {
        "refresh" | "reload" | "r" => Command::Refresh,
        "new" | "create" => Command::New,
        "panel" | "sidenav" | "toggle" => {
            Command::Panel(args.unwrap_or_else(|| NAV_PANEL.to_string()))
        }
        "goto" | "go" => {
            if let Some(name) = args {
                Command::Goto(name)
            } else {
                Command::Unknown(input.to_string())
            }
        }
        "help" | "h" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        _ => Command::Unknown(input.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_commands() {
        assert_eq!(parse_command("refresh"), Command::Refresh);
        assert_eq!(parse_command("  r "), Command::Refresh);
        assert_eq!(parse_command("new"), Command::New);
        assert_eq!(parse_command("CREATE"), Command::New);
    }

    #[test]
    fn test_parse_panel_defaults_to_nav() {
        assert_eq!(parse_command("panel"), Command::Panel("left".to_string()));
        assert_eq!(parse_command("panel right"), Command::Panel("right".to_string()));
    }

    #[test]
    fn test_parse_goto() {
        assert_eq!(
            parse_command("goto Tickets"),
            Command::Goto("Tickets".to_string())
        );
        assert_eq!(parse_command("goto"), Command::Unknown("goto".to_string()));
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            parse_command("notacommand"),
            Command::Unknown("notacommand".to_string())
        );
    }
}
