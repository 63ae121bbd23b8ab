//! Applies parsed commands to a board, one at a time.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{Context, anyhow};
use tracing::debug;
use trellis_core::app::{Board, BoardBuilder, ProjectItem};
use trellis_core::domain::{ProjectId, ProjectInput, ValidationRules};
use trellis_core::drag::{DragSession, DropOutcome};
use trellis_core::impls::MemorySurface;
use trellis_core::ports::SharedSurface;

use crate::command::{Command, HELP, ProjectRef};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Output(String),
    Quit,
}

/// A drag in progress: the session plus the card that started it.
struct ActiveDrag {
    session: DragSession,
    source: ProjectItem,
}

pub struct Repl {
    board: Board,
    surface: Rc<RefCell<MemorySurface>>,
    drag: Option<ActiveDrag>,
    json: bool,
}

impl Repl {
    pub fn new(rules: ValidationRules, json: bool) -> anyhow::Result<Self> {
        let surface = Rc::new(RefCell::new(MemorySurface::new()));
        let shared: SharedSurface = surface.clone();
        let board = BoardBuilder::new()
            .surface(shared)
            .rules(rules)
            .build()
            .context("building board")?;
        Ok(Self {
            board,
            surface,
            drag: None,
            json,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Runs one command. User mistakes come back as output, not errors.
    pub fn apply(&mut self, command: Command) -> anyhow::Result<Reply> {
        debug!(?command, "applying command");
        let out = match command {
            Command::Add {
                title,
                description,
                people,
            } => {
                let form = self.board.form();
                form.fill(ProjectInput::new(title, description, people))?;
                match form.submit() {
                    Ok(id) => format!("added {id}"),
                    Err(err) => format!("invalid input: {err}"),
                }
            }
            Command::Drag(project) => self.start_drag(&project)?,
            Command::Over(status) => {
                let drag = active(&mut self.drag)?;
                if drag.session.over(self.board.list(status).clone()) {
                    format!("over {status}: drop allowed")
                } else {
                    format!("over {status}: drop not allowed")
                }
            }
            Command::Leave(status) => {
                let drag = active(&mut self.drag)?;
                drag.session.leave(&**self.board.list(status));
                format!("left {status}")
            }
            Command::Drop(status) => {
                let drag = active(&mut self.drag)?;
                match drag.session.drop_on(&**self.board.list(status)) {
                    DropOutcome::Delivered => format!("dropped on {status}"),
                    DropOutcome::Rejected => format!("drop on {status} ignored (no drag over)"),
                }
            }
            Command::End => match self.drag.take() {
                Some(ActiveDrag { session, source }) => {
                    session.end(&source);
                    "drag ended".to_string()
                }
                None => "no drag in progress".to_string(),
            },
            Command::Move(project, status) => {
                let id = self.resolve(&project)?;
                match self.board.drag_project(&id, status) {
                    Some(DropOutcome::Delivered) => format!("moved {id} to {status}"),
                    Some(DropOutcome::Rejected) => format!("move of {id} rejected"),
                    None => format!("no card for {id}"),
                }
            }
            Command::Show => self.surface.borrow().render_text(),
            Command::Status => {
                let counts = self.board.store().counts();
                if self.json {
                    serde_json::to_string(&counts)?
                } else {
                    format!("active: {}, finished: {}", counts.active, counts.finished)
                }
            }
            Command::Export => serde_json::to_string_pretty(&self.board.store().snapshot())?,
            Command::Help => HELP.to_string(),
            Command::Quit => return Ok(Reply::Quit),
        };
        Ok(Reply::Output(out))
    }

    fn start_drag(&mut self, project: &ProjectRef) -> anyhow::Result<String> {
        if self.drag.is_some() {
            return Ok("a drag is already in progress (use `end` first)".to_string());
        }
        let id = self.resolve(project)?;
        let Some(source) = self.board.item(&id) else {
            return Ok(format!("no card for {id}"));
        };
        let mut session = DragSession::new();
        session.start(&source);
        self.drag = Some(ActiveDrag { session, source });
        Ok(format!("dragging {id}"))
    }

    fn resolve(&self, project: &ProjectRef) -> anyhow::Result<ProjectId> {
        match project {
            ProjectRef::Id(id) => Ok(*id),
            ProjectRef::Position(n) => {
                let snapshot = self.board.store().snapshot();
                snapshot
                    .as_slice()
                    .get(n - 1)
                    .map(|p| p.id)
                    .ok_or_else(|| anyhow!("no project at position {n} (have {})", snapshot.len()))
            }
        }
    }

    #[cfg(test)]
    pub fn status_of(&self, id: &ProjectId) -> Option<trellis_core::domain::ProjectStatus> {
        self.board.store().find(id).map(|p| p.status)
    }
}

fn active(drag: &mut Option<ActiveDrag>) -> anyhow::Result<&mut ActiveDrag> {
    drag.as_mut()
        .ok_or_else(|| anyhow!("no drag in progress (use `drag <project>` first)"))
}
