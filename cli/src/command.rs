use minegrid_core::{Coord, Coord2};
use thiserror::Error;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    NewGame,
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command '{0}'. Type 'h' for help.")]
    Unknown(String),
    #[error("Usage: {0} x y")]
    Usage(&'static str),
    #[error("Invalid coordinate '{0}'")]
    InvalidNumber(String),
    #[error("Use 1-based coordinates")]
    ZeroCoordinate,
}

pub const HELP: &str = "\
Commands:
  r x y   - reveal cell at column x, row y (1-based)
  f x y   - toggle flag at x, y (1-based)
  n       - start a new game
  q       - quit
  h/help  - show this help";

/// Parses one input line. Blank lines give `None`.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let Some(first) = parts.first() else {
        return Ok(None);
    };

    let command = match first.to_lowercase().as_str() {
        "q" | "quit" | "exit" => Command::Quit,
        "h" | "help" => Command::Help,
        "n" | "new" => Command::NewGame,
        "r" | "reveal" => Command::Reveal(parse_coords(&parts[1..], "r")?),
        "f" | "flag" => Command::Flag(parse_coords(&parts[1..], "f")?),
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn parse_coords(args: &[&str], usage: &'static str) -> Result<Coord2, CommandError> {
    let [x, y] = args else {
        return Err(CommandError::Usage(usage));
    };
    Ok((parse_one_based(x)?, parse_one_based(y)?))
}

fn parse_one_based(raw: &str) -> Result<Coord, CommandError> {
    let value: Coord = raw
        .parse()
        .map_err(|_| CommandError::InvalidNumber(raw.to_string()))?;
    value.checked_sub(1).ok_or(CommandError::ZeroCoordinate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_actions_as_zero_based() {
        assert_eq!(parse("r 1 1"), Ok(Some(Command::Reveal((0, 0)))));
        assert_eq!(parse("  FLAG 3 10 "), Ok(Some(Command::Flag((2, 9)))));
        assert_eq!(parse("n"), Ok(Some(Command::NewGame)));
        assert_eq!(parse("quit"), Ok(Some(Command::Quit)));
        assert_eq!(parse("   "), Ok(None));
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(parse("r 1"), Err(CommandError::Usage("r")));
        assert_eq!(parse("f 1 2 3"), Err(CommandError::Usage("f")));
        assert_eq!(parse("r a 2"), Err(CommandError::InvalidNumber("a".into())));
        assert_eq!(parse("r -1 2"), Err(CommandError::InvalidNumber("-1".into())));
        assert_eq!(parse("r 0 2"), Err(CommandError::ZeroCoordinate));
        assert_eq!(parse("dig 1 1"), Err(CommandError::Unknown("dig".into())));
    }
}
