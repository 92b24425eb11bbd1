use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

use super::{MarkOutcome, Task, TASK_ID_RANGE};

/// Valid project id range. Project ids are unique across the whole catalog.
pub const PROJECT_ID_RANGE: std::ops::RangeInclusive<u16> = 1..=999;

/// A named container of tasks.
///
/// The kind fixes the task capacity at creation and is never resized.
/// Removing a task frees its slot for a later addition; beyond that, task
/// order carries no meaning.
///
/// The id and kind are private so they cannot change once set — retyping a
/// project that already holds tasks has no defined capacity semantics, so
/// the operation simply does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: u16,
    name: String,
    kind: ProjectKind,
    tasks: Vec<Task>,
}

impl Project {
    /// Create a project with an empty task collection.
    pub fn new(id: u16, name: impl Into<String>, kind: ProjectKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            tasks: Vec::new(),
        }
    }

    pub fn id(&self) -> u16 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ProjectKind {
        self.kind
    }

    /// Present tasks, in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Maximum number of tasks this project can hold, per its kind.
    pub fn capacity(&self) -> usize {
        self.kind.task_capacity()
    }

    pub fn has_room(&self) -> bool {
        self.tasks.len() < self.capacity()
    }

    pub fn is_task_id_taken(&self, id: u8) -> bool {
        self.tasks.iter().any(|t| t.id == id)
    }

    /// Store a task in the next free slot.
    ///
    /// Fails with [`CatalogError::NoRoom`] when the kind capacity is
    /// exhausted and [`CatalogError::DuplicateTaskId`] when the id is taken
    /// within this project. Ranges and non-emptiness are the caller's
    /// responsibility — boundary code validates before the core is called.
    pub fn add_task(&mut self, task: Task) -> Result<(), CatalogError> {
        if !self.has_room() {
            return Err(CatalogError::NoRoom {
                capacity: self.capacity(),
            });
        }
        if self.is_task_id_taken(task.id) {
            return Err(CatalogError::DuplicateTaskId(task.id));
        }
        self.tasks.push(task);
        Ok(())
    }

    pub fn remove_task(&mut self, id: u8) -> Result<(), CatalogError> {
        let index = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(CatalogError::TaskNotFound(id))?;
        self.tasks.remove(index);
        Ok(())
    }

    /// Mark a task complete.
    ///
    /// Idempotent: an already-complete task is left untouched and reported
    /// as [`MarkOutcome::AlreadyCompleted`].
    pub fn mark_completed(&mut self, id: u8) -> Result<MarkOutcome, CatalogError> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(CatalogError::TaskNotFound(id))?;
        if task.completed {
            Ok(MarkOutcome::AlreadyCompleted)
        } else {
            task.completed = true;
            Ok(MarkOutcome::NowCompleted)
        }
    }

    pub fn task(&self, id: u8) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn completed_tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|t| t.completed)
    }

    /// Random task id in range, retried until it collides with nothing in
    /// this project.
    ///
    /// This is the explicit fallback for duplicate-id resolution; the
    /// primary path is the caller supplying an id and [`Self::add_task`]
    /// rejecting duplicates.
    pub fn generate_unique_task_id<R: Rng>(&self, rng: &mut R) -> u8 {
        loop {
            let id = rng.random_range(TASK_ID_RANGE);
            if !self.is_task_id_taken(id) {
                return id;
            }
        }
    }
}

/// The size class of a project, which fixes its task capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectKind {
    Small,
    Medium,
    Large,
}

impl ProjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Small => "Small",
            Self::Medium => "Medium",
            Self::Large => "Large",
        }
    }

    /// Parse the exact wire form (`Small`/`Medium`/`Large`).
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Small" => Some(Self::Small),
            "Medium" => Some(Self::Medium),
            "Large" => Some(Self::Large),
            _ => None,
        }
    }

    /// Parse operator input, accepting any casing.
    pub fn from_str_ignore_case(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "small" => Some(Self::Small),
            "medium" => Some(Self::Medium),
            "large" => Some(Self::Large),
            _ => None,
        }
    }

    /// How many tasks a project of this kind can hold.
    pub fn task_capacity(&self) -> usize {
        match self {
            Self::Small => 1,
            Self::Medium => 2,
            Self::Large => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_capacities() {
        assert_eq!(ProjectKind::Small.task_capacity(), 1);
        assert_eq!(ProjectKind::Medium.task_capacity(), 2);
        assert_eq!(ProjectKind::Large.task_capacity(), 3);
    }

    #[test]
    fn kind_parsing_is_exact_on_the_wire() {
        assert_eq!(ProjectKind::from_str("Small"), Some(ProjectKind::Small));
        assert_eq!(ProjectKind::from_str("small"), None);
        assert_eq!(
            ProjectKind::from_str_ignore_case("LARGE"),
            Some(ProjectKind::Large)
        );
        assert_eq!(ProjectKind::from_str_ignore_case("huge"), None);
    }
}
