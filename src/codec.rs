//! Flat-file codec for catalogs.
//!
//! The format is comma-separated, line-oriented UTF-8 text with no header.
//! Each present project emits one `id,name,Kind` line followed immediately
//! by one `id,description,L,duration,completed` line per task; task lines
//! belong to the project line above them. Fields are not escaped — a comma
//! inside a name or description corrupts the record. That is a documented
//! limitation of the format, not something the codec repairs.
//!
//! Loading is tolerant: one bad line never aborts the whole load. Every
//! rejected line becomes a [`LoadWarning`] carrying its line number, and
//! parsing always runs to end of input. The caller swaps the returned
//! catalog in only after the whole file has been consumed.

use std::fmt;
use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::catalog::Catalog;
use crate::models::{ProjectKind, Task, TaskKind, DURATION_RANGE, PROJECT_ID_RANGE, TASK_ID_RANGE};

/// File-level codec failure. Leaves the in-memory catalog untouched and
/// aborts only the load or save that hit it.
#[derive(Debug, Error)]
pub enum CodecError {
    /// File missing on load, or unwritable on save.
    #[error("file unavailable: {0}")]
    FileUnavailable(#[from] std::io::Error),
}

/// A recoverable problem with one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadWarning {
    /// 1-based line number in the input.
    pub line: usize,
    pub message: String,
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

/// Whatever could be salvaged from a data file, plus the warnings produced
/// along the way.
#[derive(Debug)]
pub struct LoadReport {
    pub catalog: Catalog,
    pub warnings: Vec<LoadWarning>,
}

/// Render a catalog as persistable text.
pub fn serialize(catalog: &Catalog) -> String {
    let mut out = String::new();
    for project in catalog.projects() {
        out.push_str(&format!(
            "{},{},{}\n",
            project.id(),
            project.name(),
            project.kind().as_str()
        ));
        for task in project.tasks() {
            out.push_str(&format!(
                "{},{},{},{},{}\n",
                task.id,
                task.description,
                task.kind.letter(),
                task.duration_hours,
                task.completed
            ));
        }
    }
    out
}

/// Parse persisted text into a fresh catalog with the given project
/// capacity.
///
/// Never fails as a whole: malformed records are skipped with warnings and
/// scanning continues. A project line that is rejected (bad field, duplicate
/// id, or catalog full) also clears the "current project", so its task lines
/// warn individually instead of attaching to the wrong project.
pub fn deserialize(text: &str, capacity: usize) -> LoadReport {
    let mut catalog = Catalog::with_capacity(capacity);
    let mut warnings = Vec::new();
    let mut current: Option<u16> = None;

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            continue;
        }

        let fields: Vec<&str> = trimmed.split(',').map(str::trim).collect();
        match fields.len() {
            3 => current = parse_project_line(&mut catalog, &fields, line, &mut warnings),
            5 => match current {
                Some(project_id) => {
                    parse_task_line(&mut catalog, project_id, &fields, line, &mut warnings);
                }
                None => warnings.push(LoadWarning {
                    line,
                    message: format!("task line with no preceding project: `{trimmed}`"),
                }),
            },
            _ => warnings.push(LoadWarning {
                line,
                message: format!("malformed line: `{trimmed}`"),
            }),
        }
    }

    LoadReport { catalog, warnings }
}

/// Returns the id of the newly current project, or `None` when the line was
/// rejected.
fn parse_project_line(
    catalog: &mut Catalog,
    fields: &[&str],
    line: usize,
    warnings: &mut Vec<LoadWarning>,
) -> Option<u16> {
    let mut warn = |message: String| {
        warnings.push(LoadWarning { line, message });
        None
    };

    let id = match fields[0].parse::<u16>() {
        Ok(id) if PROJECT_ID_RANGE.contains(&id) => id,
        _ => return warn(format!("invalid project ID `{}`", fields[0])),
    };
    let name = fields[1];
    if name.is_empty() {
        return warn(format!("project {id} has an empty name"));
    }
    let Some(kind) = ProjectKind::from_str(fields[2]) else {
        return warn(format!("invalid project type `{}`", fields[2]));
    };

    match catalog.create_project(id, name, kind) {
        Ok(_) => Some(id),
        // Catalog full or duplicate id: drop the project but keep scanning.
        Err(e) => warn(format!("{e}; dropping project {id}")),
    }
}

fn parse_task_line(
    catalog: &mut Catalog,
    project_id: u16,
    fields: &[&str],
    line: usize,
    warnings: &mut Vec<LoadWarning>,
) {
    let mut warn = |message: String| warnings.push(LoadWarning { line, message });

    let id = match fields[0].parse::<u8>() {
        Ok(id) if TASK_ID_RANGE.contains(&id) => id,
        _ => return warn(format!("invalid task ID `{}`", fields[0])),
    };
    let description = fields[1];
    if description.is_empty() {
        return warn(format!("task {id} has an empty description"));
    }
    let mut letters = fields[2].chars();
    let kind = match (letters.next(), letters.next()) {
        (Some(letter), None) => TaskKind::from_letter(letter),
        _ => None,
    };
    let Some(kind) = kind else {
        return warn(format!("invalid task type `{}`", fields[2]));
    };
    let duration = match fields[3].parse::<u32>() {
        Ok(d) if DURATION_RANGE.contains(&d) => d,
        _ => return warn(format!("invalid task duration `{}`", fields[3])),
    };

    let mut task = Task::new(id, description, kind, duration);
    task.completed = fields[4].eq_ignore_ascii_case("true");

    let Some(project) = catalog.project_mut(project_id) else {
        // The current project id always refers to a project this pass
        // inserted; nothing to attach to means nothing to do.
        return;
    };
    if let Err(e) = project.add_task(task) {
        warn(format!("{e}; skipping task {id}"));
    }
}

/// Read and parse a data file.
pub fn load(path: impl AsRef<Path>, capacity: usize) -> Result<LoadReport, CodecError> {
    let text = fs::read_to_string(path)?;
    Ok(deserialize(&text, capacity))
}

/// Write a catalog to a data file.
///
/// Writes a temporary sibling first and renames it into place, so a save
/// that fails midway leaves any existing file intact.
pub fn save(path: impl AsRef<Path>, catalog: &Catalog) -> Result<(), CodecError> {
    let path = path.as_ref();
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, serialize(catalog))?;
    fs::rename(&tmp, path)?;
    Ok(())
}
