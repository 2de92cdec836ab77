use std::fmt::Write as _;

use todo_core::{ListView, NoticeKind};

/// Draw a view as terminal text. Rows are numbered from 1, matching the
/// numbers commands take.
pub fn format_view(view: &ListView) -> String {
    let mut out = String::new();
    let noun = if view.remaining == 1 { "item" } else { "items" };
    let _ = writeln!(out, "[{}] {} {noun} left", view.filter, view.remaining);
    if view.rows.is_empty() {
        let _ = writeln!(out, "  (nothing here)");
    }
    for (i, row) in view.rows.iter().enumerate() {
        let mark = if row.done { 'x' } else { ' ' };
        let _ = writeln!(out, "{:>3}. [{mark}] {}  ({})", i + 1, row.title, row.toggle);
    }
    if let Some(notice) = &view.notice {
        let prefix = match notice.kind {
            NoticeKind::Info => "*",
            NoticeKind::Error => "! error:",
        };
        let _ = writeln!(out, "{prefix} {}", notice.message);
    }
    out
}
