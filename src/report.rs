//! Pure filtering and aggregation over a catalog.
//!
//! Nothing here mutates or prints; every function returns plain values the
//! shell formats for display. An empty result is a reportable outcome, not
//! an error.

use serde::Serialize;

use crate::catalog::Catalog;
use crate::models::{Project, Task, TaskKind};

/// Running duration total for one task kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct KindTally {
    pub total_hours: u32,
    pub count: u32,
}

impl KindTally {
    /// Integer-truncating mean. `None` when no tasks were recorded, so a
    /// kind with no data never divides by zero.
    pub fn average(&self) -> Option<u32> {
        (self.count > 0).then(|| self.total_hours / self.count)
    }

    fn record(&mut self, task: &Task) {
        self.total_hours += task.duration_hours;
        self.count += 1;
    }
}

/// Per-kind duration totals for some set of tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DurationReport {
    pub admin: KindTally,
    pub support: KindTally,
    pub logistics: KindTally,
}

impl DurationReport {
    fn from_tasks<'a>(tasks: impl Iterator<Item = &'a Task>) -> Self {
        let mut report = Self::default();
        for task in tasks {
            report.tally_mut(task.kind).record(task);
        }
        report
    }

    pub fn tally(&self, kind: TaskKind) -> &KindTally {
        match kind {
            TaskKind::Admin => &self.admin,
            TaskKind::Support => &self.support,
            TaskKind::Logistics => &self.logistics,
        }
    }

    fn tally_mut(&mut self, kind: TaskKind) -> &mut KindTally {
        match kind {
            TaskKind::Admin => &mut self.admin,
            TaskKind::Support => &mut self.support,
            TaskKind::Logistics => &mut self.logistics,
        }
    }

    pub fn average(&self, kind: TaskKind) -> Option<u32> {
        self.tally(kind).average()
    }
}

/// The summary view: the global breakdown followed by one breakdown per
/// project, in slot order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogSummary {
    pub overall: DurationReport,
    pub per_project: Vec<(u16, DurationReport)>,
}

/// Every task of the given kind across every present project, in
/// project-then-task order.
pub fn filter_tasks_by_kind(catalog: &Catalog, kind: TaskKind) -> Vec<(&Project, &Task)> {
    catalog
        .projects()
        .iter()
        .flat_map(|p| p.tasks().iter().map(move |t| (p, t)))
        .filter(|(_, t)| t.kind == kind)
        .collect()
}

/// Per-kind duration averages across all projects.
pub fn average_durations(catalog: &Catalog) -> DurationReport {
    DurationReport::from_tasks(catalog.projects().iter().flat_map(|p| p.tasks().iter()))
}

/// Per-kind duration averages scoped to one project.
pub fn average_durations_for_project(project: &Project) -> DurationReport {
    DurationReport::from_tasks(project.tasks().iter())
}

pub fn catalog_summary(catalog: &Catalog) -> CatalogSummary {
    CatalogSummary {
        overall: average_durations(catalog),
        per_project: catalog
            .projects()
            .iter()
            .map(|p| (p.id(), average_durations_for_project(p)))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_truncates_toward_zero() {
        let mut tally = KindTally::default();
        tally.record(&Task::new(1, "a", TaskKind::Admin, 5));
        tally.record(&Task::new(2, "b", TaskKind::Admin, 10));
        assert_eq!(tally.average(), Some(7));
    }

    #[test]
    fn empty_tally_has_no_average() {
        assert_eq!(KindTally::default().average(), None);
    }
}
