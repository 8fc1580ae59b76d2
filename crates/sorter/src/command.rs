//! Line commands read from stdin.

use sorter_core::ItemId;

/// A parsed user command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Print the columns.
    List,
    /// Move the item at this home index.
    Move(usize),
    /// Bring this item home now.
    Return(ItemId),
    /// Reset every item.
    Reset,
    /// Print usage.
    Help,
    /// Exit.
    Quit,
}

impl Command {
    /// Parses one input line. Blank lines parse to `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(None);
        };
        let arg = words.next();

        let command = match (verb.to_lowercase().as_str(), arg) {
            ("list" | "ls", None) => Self::List,
            ("move" | "m", Some(index)) => Self::Move(
                index
                    .parse()
                    .map_err(|_| format!("Not a list position: {index}"))?,
            ),
            ("return" | "r", Some(id)) => {
                Self::Return(id.parse().map_err(|_| format!("Not an item id: {id}"))?)
            }
            ("reset", None) => Self::Reset,
            ("help" | "?", None) => Self::Help,
            ("quit" | "exit" | "q", None) => Self::Quit,
            _ => return Err(format!("Unknown command: {}", line.trim())),
        };
        Ok(Some(command))
    }
}

/// Usage text.
pub const HELP: &str = "\
Commands:
  list              show items and categories
  move <position>   move the item at that list position to its category
  return <id>       bring an item back now
  reset             put everything back and cancel pending returns
  quit              exit";
