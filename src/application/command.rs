use crate::domain::EntryId;
use crate::io::ReportFormat;

use super::AppError;

/// One line typed into the interactive shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Text for the input field. Anything that is not a known command lands
    /// here, so a bare number adds an entry.
    Add(String),
    Delete(EntryId),
    List { json: bool },
    Total,
    Export(ReportFormat),
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, AppError> {
        let line = line.trim();
        let mut words = line.split_whitespace();
        let Some(keyword) = words.next() else {
            return Ok(Command::Add(String::new()));
        };
        let rest = line[keyword.len()..].trim();

        match keyword.to_lowercase().as_str() {
            "add" => Ok(Command::Add(rest.to_string())),
            "delete" | "del" | "rm" => {
                let id = words
                    .next()
                    .ok_or_else(|| AppError::MissingArgument(keyword.to_string()))?;
                id.parse::<EntryId>()
                    .map(Command::Delete)
                    .map_err(|_| AppError::InvalidId(id.to_string()))
            }
            "list" | "ls" => Ok(Command::List {
                json: words.any(|w| w == "--json" || w == "json"),
            }),
            "total" => Ok(Command::Total),
            "export" => {
                let format = words
                    .next()
                    .ok_or_else(|| AppError::MissingArgument(keyword.to_string()))?;
                format
                    .parse::<ReportFormat>()
                    .map(Command::Export)
                    .map_err(|_| AppError::InvalidFormat(format.to_string()))
            }
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            _ => Ok(Command::Add(line.to_string())),
        }
    }
}

pub const HELP: &str = "\
Commands:
  <number> | add <number>   add an entry
  delete <id>               remove an entry (alias: rm)
  list [--json]             show entries and total
  total                     show the total
  export csv|pdf            save calculator-report.csv / .pdf
  help                      show this help
  quit                      leave the session";
