//! Line commands of the interactive front-end.

use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(String),
    Toggle(usize),
    Remove(usize),
    /// Row and optional new title; without a title the user is prompted.
    Edit(usize, Option<String>),
    Filter(String),
    Refresh,
    Login,
    Register,
    Logout,
    Help,
    Quit,
    Nothing,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command {0:?}, type `help` for a list")]
    Unknown(String),

    #[error("`{0}` needs {1}")]
    MissingArgument(&'static str, &'static str),

    #[error("{0:?} is not a row number")]
    BadRow(String),
}

pub const HELP: &str = "\
commands:
  add <title>              create a new item
  toggle <n>               mark row n done / undo
  edit <n> [title]         rename row n (prompts when no title is given)
  rm <n>                   delete row n
  filter all|active|completed
  refresh                  reload the list from the server
  login | register | logout
  help | quit";

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let command = match word.to_ascii_lowercase().as_str() {
            "" => Command::Nothing,
            // Blank titles are left for the core to reject.
            "add" | "a" => Command::Add(rest.to_string()),
            "toggle" | "t" | "done" | "undo" => Command::Toggle(row("toggle", rest)?),
            "rm" | "del" | "delete" => Command::Remove(row("rm", rest)?),
            "edit" | "e" => {
                let (n, title) = match rest.split_once(char::is_whitespace) {
                    Some((n, title)) => (n, Some(title.to_string())),
                    None => (rest, None),
                };
                Command::Edit(row("edit", n)?, title)
            }
            "filter" | "f" => {
                if rest.is_empty() {
                    return Err(CommandError::MissingArgument("filter", "all, active or completed"));
                }
                Command::Filter(rest.to_string())
            }
            "refresh" | "r" => Command::Refresh,
            "login" => Command::Login,
            "register" => Command::Register,
            "logout" => Command::Logout,
            "help" | "h" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

fn row(command: &'static str, arg: &str) -> Result<usize, CommandError> {
    if arg.is_empty() {
        return Err(CommandError::MissingArgument(command, "a row number"));
    }
    arg.parse().map_err(|_| CommandError::BadRow(arg.to_string()))
}
