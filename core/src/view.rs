//! Pure projection of client state into something a front-end can draw.
//!
//! `render` performs no I/O and depends only on its inputs, so calling it
//! twice with unchanged state yields equal views.

use std::fmt;

use crate::filter::Filter;
use crate::state::ClientState;
use crate::types::TodoId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleLabel {
    MarkDone,
    Undo,
}

impl ToggleLabel {
    pub fn for_done(done: bool) -> Self {
        if done {
            ToggleLabel::Undo
        } else {
            ToggleLabel::MarkDone
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ToggleLabel::MarkDone => "Mark done",
            ToggleLabel::Undo => "Undo",
        }
    }
}

impl fmt::Display for ToggleLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// A non-blocking message shown alongside the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

/// One visible row. Every row can be toggled, deleted, and edited by
/// selecting its title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoRow {
    pub id: TodoId,
    pub title: String,
    pub done: bool,
    pub toggle: ToggleLabel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    pub filter: Filter,
    pub rows: Vec<TodoRow>,
    /// Items not yet done across the whole collection, regardless of filter.
    pub remaining: usize,
    pub notice: Option<Notice>,
}

impl ListView {
    /// Row by its 1-based position in the view.
    pub fn row(&self, number: usize) -> Option<&TodoRow> {
        number.checked_sub(1).and_then(|i| self.rows.get(i))
    }
}

pub fn render(state: &ClientState, notice: Option<&Notice>) -> ListView {
    let rows = state
        .visible()
        .map(|todo| TodoRow {
            id: todo.id.clone(),
            title: todo.title.clone(),
            done: todo.done,
            toggle: ToggleLabel::for_done(todo.done),
        })
        .collect();
    ListView {
        filter: state.filter(),
        rows,
        remaining: state.remaining(),
        notice: notice.cloned(),
    }
}
