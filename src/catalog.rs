//! The aggregate root owning every project for the running session.
//!
//! The catalog is a plain value owned by the caller (the binary constructs
//! one and hands it to the shell) rather than process-wide state, so tests
//! can build as many as they like. All cross-project rules — id uniqueness
//! and the project-slot capacity — are enforced here; per-project task rules
//! live on [`Project`].

use rand::Rng;

use crate::error::CatalogError;
use crate::models::{Project, ProjectKind, PROJECT_ID_RANGE};

/// The full in-memory set of projects for the session.
///
/// Capacity is a configured limit checked on insert, not a preallocated
/// block; removing a project frees a slot for a later creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    capacity: usize,
    projects: Vec<Project>,
}

impl Catalog {
    /// Default project capacity when none is configured.
    pub const DEFAULT_CAPACITY: usize = 10;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            projects: Vec::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.projects.len() >= self.capacity
    }

    /// Present projects, in insertion order.
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// `(id, name)` for every present project, in slot order.
    pub fn list_projects(&self) -> impl Iterator<Item = (u16, &str)> + '_ {
        self.projects.iter().map(|p| (p.id(), p.name()))
    }

    pub fn is_project_id_taken(&self, id: u16) -> bool {
        self.projects.iter().any(|p| p.id() == id)
    }

    // ============================================================
    // Project operations
    // ============================================================

    /// Allocate a project with an empty task collection and insert it.
    ///
    /// Fails with [`CatalogError::CapacityExceeded`] when no slot is free
    /// and [`CatalogError::DuplicateProjectId`] when the id is taken. The
    /// catalog trusts its inputs beyond that: id range and non-empty name
    /// are validated at the boundary before this is called.
    pub fn create_project(
        &mut self,
        id: u16,
        name: impl Into<String>,
        kind: ProjectKind,
    ) -> Result<&Project, CatalogError> {
        if self.is_full() {
            return Err(CatalogError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        if self.is_project_id_taken(id) {
            return Err(CatalogError::DuplicateProjectId(id));
        }
        self.projects.push(Project::new(id, name, kind));
        Ok(self.projects.last().expect("slot just filled"))
    }

    /// Delete a project and everything it owns.
    pub fn remove_project(&mut self, id: u16) -> Result<(), CatalogError> {
        let index = self
            .projects
            .iter()
            .position(|p| p.id() == id)
            .ok_or(CatalogError::ProjectNotFound(id))?;
        self.projects.remove(index);
        Ok(())
    }

    pub fn project(&self, id: u16) -> Option<&Project> {
        self.projects.iter().find(|p| p.id() == id)
    }

    pub fn project_mut(&mut self, id: u16) -> Option<&mut Project> {
        self.projects.iter_mut().find(|p| p.id() == id)
    }

    /// Random project id in range, retried until it collides with nothing.
    ///
    /// Explicit fallback for duplicate-id resolution; callers announce the
    /// generated id rather than substituting it silently.
    pub fn generate_unique_project_id<R: Rng>(&self, rng: &mut R) -> u16 {
        loop {
            let id = rng.random_range(PROJECT_ID_RANGE);
            if !self.is_project_id_taken(id) {
                return id;
            }
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}
