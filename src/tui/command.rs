//! Parsing of the board command line.
//!
//! The frozen input buffer is split on whitespace into a verb and its
//! arguments and turned into a [`Command`] once, here. Views then match on
//! the enum instead of comparing strings.

/// A validated board command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `move|mv <id> [column]`
    Move { id: u64, to: Option<String> },
    /// `delete|del|remove <id>`
    Delete { id: u64 },
    /// `edit <id>`
    Edit { id: u64 },
    /// `create|new`
    Create,
    /// `backlog|bl`
    Backlog,
    /// `archive|arc`
    Archive,
    /// `complete`
    Complete,
    /// `home`
    Home,
    /// `quit`
    Quit,
    /// A bare task id.
    View { id: u64 },
    /// Anything else. Carries the verb and the whole input line.
    Unknown { verb: String, input: String },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Usage: move <index> [column]")]
    MoveUsage,
    #[error("Usage: {0} <index>")]
    IdUsage(&'static str),
}

fn parse_id(arg: Option<&&str>) -> Option<u64> {
    let arg = arg?;
    if arg.is_empty() || !arg.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    arg.parse().ok()
}

/// Parse one input line. Blank input yields `Ok(None)`.
pub fn parse(line: &str) -> Result<Option<Command>, ParseError> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let Some((&verb, args)) = parts.split_first() else {
        return Ok(None);
    };

    let command = match verb {
        "move" | "mv" => {
            let id = parse_id(args.first()).ok_or(ParseError::MoveUsage)?;
            Command::Move {
                id,
                to: args.get(1).map(|s| s.to_string()),
            }
        }
        "delete" | "del" | "remove" => Command::Delete {
            id: parse_id(args.first()).ok_or(ParseError::IdUsage("delete"))?,
        },
        "edit" => Command::Edit {
            id: parse_id(args.first()).ok_or(ParseError::IdUsage("edit"))?,
        },
        "create" | "new" => Command::Create,
        "backlog" | "bl" => Command::Backlog,
        "archive" | "arc" => Command::Archive,
        "complete" => Command::Complete,
        "home" => Command::Home,
        "quit" => Command::Quit,
        _ => match parse_id(Some(&verb)) {
            Some(id) => Command::View { id },
            None => Command::Unknown {
                verb: verb.to_string(),
                input: line.to_string(),
            },
        },
    };
    Ok(Some(command))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_input_is_noop() {
        assert_eq!(parse(""), Ok(None));
        assert_eq!(parse("   "), Ok(None));
    }

    #[test]
    fn test_move_variants() {
        assert_eq!(
            parse("move 0 doing"),
            Ok(Some(Command::Move { id: 0, to: Some("doing".into()) }))
        );
        assert_eq!(parse(" mv 12 "), Ok(Some(Command::Move { id: 12, to: None })));
        assert_eq!(parse("move"), Err(ParseError::MoveUsage));
        assert_eq!(parse("move x"), Err(ParseError::MoveUsage));
        assert_eq!(parse("move -1"), Err(ParseError::MoveUsage));
        assert_eq!(
            ParseError::MoveUsage.to_string(),
            "Usage: move <index> [column]"
        );
    }

    #[test]
    fn test_id_verbs() {
        assert_eq!(parse("del 3"), Ok(Some(Command::Delete { id: 3 })));
        assert_eq!(parse("remove 3"), Ok(Some(Command::Delete { id: 3 })));
        assert_eq!(parse("edit 9"), Ok(Some(Command::Edit { id: 9 })));
        let err = parse("delete").unwrap_err();
        assert_eq!(err.to_string(), "Usage: delete <index>");
        assert_eq!(parse("edit abc").unwrap_err().to_string(), "Usage: edit <index>");
    }

    #[test]
    fn test_simple_verbs_and_aliases() {
        assert_eq!(parse("new"), Ok(Some(Command::Create)));
        assert_eq!(parse("bl"), Ok(Some(Command::Backlog)));
        assert_eq!(parse("arc"), Ok(Some(Command::Archive)));
        assert_eq!(parse("complete"), Ok(Some(Command::Complete)));
        assert_eq!(parse("home"), Ok(Some(Command::Home)));
        assert_eq!(parse("quit"), Ok(Some(Command::Quit)));
    }

    #[test]
    fn test_bare_id_and_unknown() {
        assert_eq!(parse("7"), Ok(Some(Command::View { id: 7 })));
        assert_eq!(
            parse("launch rockets"),
            Ok(Some(Command::Unknown {
                verb: "launch".into(),
                input: "launch rockets".into()
            }))
        );
    }
}
