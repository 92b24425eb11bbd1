use thiserror::Error;

/// Failures of catalog and project operations.
///
/// These are structured results for the shell to render, not fatal
/// conditions. The core never prints them itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Every project slot in the catalog is in use.
    #[error("the catalog is full ({capacity} project slots)")]
    CapacityExceeded { capacity: usize },

    /// Project ids are unique across the whole catalog.
    #[error("project ID {0} already exists")]
    DuplicateProjectId(u16),

    /// Task ids are unique within their owning project only.
    #[error("task ID {0} already exists in this project")]
    DuplicateTaskId(u8),

    /// The project's kind-derived task capacity is exhausted.
    #[error("this project already holds its maximum of {capacity} task(s)")]
    NoRoom { capacity: usize },

    #[error("no project found with ID {0}")]
    ProjectNotFound(u16),

    #[error("no task found with ID {0}")]
    TaskNotFound(u8),
}
