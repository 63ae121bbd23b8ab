//! Command line grammar for the board loop.

use std::str::FromStr;

use anyhow::{Context, bail};
use trellis_core::domain::{ProjectId, ProjectStatus};

pub const HELP: &str = "\
commands:
  add <title> | <description> | <people>   submit the project form
  drag <project>                           pick up a card (id or 1-based position)
  over <list>                              hover the current drag over a list
  leave <list>                             leave a list
  drop <list>                              release over a list
  end                                      finish the current drag
  move <project> <list>                    drag, hover and drop in one go
  show                                     print the board
  status                                   project counts per list
  export                                   print all projects as JSON
  help                                     this text
  quit                                     exit
lists: active, finished";

/// How a command names a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectRef {
    /// 1-based position in the store.
    Position(usize),
    Id(ProjectId),
}

impl FromStr for ProjectRef {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(n) = s.parse::<usize>() {
            if n == 0 {
                bail!("positions start at 1");
            }
            return Ok(ProjectRef::Position(n));
        }
        Ok(ProjectRef::Id(s.parse()?))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add {
        title: String,
        description: String,
        people: String,
    },
    Drag(ProjectRef),
    Over(ProjectStatus),
    Leave(ProjectStatus),
    Drop(ProjectStatus),
    End,
    Move(ProjectRef, ProjectStatus),
    Show,
    Status,
    Export,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        let cmd = match verb.to_ascii_lowercase().as_str() {
            "add" => {
                let fields: Vec<&str> = rest.split('|').map(str::trim).collect();
                let [title, description, people] = fields.as_slice() else {
                    bail!("usage: add <title> | <description> | <people>");
                };
                Command::Add {
                    title: title.to_string(),
                    description: description.to_string(),
                    people: people.to_string(),
                }
            }
            "drag" => Command::Drag(one_arg(rest, "drag <project>")?.parse()?),
            "over" => Command::Over(list_arg(rest)?),
            "leave" => Command::Leave(list_arg(rest)?),
            "drop" => Command::Drop(list_arg(rest)?),
            "end" => Command::End,
            "move" => {
                let mut args = rest.split_whitespace();
                let (Some(project), Some(list), None) = (args.next(), args.next(), args.next())
                else {
                    bail!("usage: move <project> <list>");
                };
                Command::Move(project.parse()?, list.parse()?)
            }
            "show" => Command::Show,
            "status" => Command::Status,
            "export" => Command::Export,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => bail!("unknown command {other:?} (try `help`)"),
        };
        Ok(cmd)
    }
}

fn one_arg<'a>(rest: &'a str, usage: &str) -> anyhow::Result<&'a str> {
    let mut args = rest.split_whitespace();
    match (args.next(), args.next()) {
        (Some(arg), None) => Ok(arg),
        _ => bail!("usage: {usage}"),
    }
}

fn list_arg(rest: &str) -> anyhow::Result<ProjectStatus> {
    let list = one_arg(rest, "<verb> <active|finished>")?;
    list.parse::<ProjectStatus>()
        .with_context(|| format!("expected a list name, got {list:?}"))
}
