//! Interactive text menu over a catalog.
//!
//! The shell owns the catalog for the session and performs every prompt,
//! validation, and display concern. Core operations receive already
//! validated, typed values and hand back structured results; the shell is
//! the only layer that reads input or prints. Bad operator input is
//! re-prompted, never fatal, and `-1` at an id prompt cancels back to the
//! menu.
//!
//! Generic over the reader and writer so sessions can be scripted in tests.

use std::io::{self, BufRead, Write};
use std::ops::RangeInclusive;

use crate::catalog::Catalog;
use crate::codec;
use crate::models::{MarkOutcome, ProjectKind, Task, TaskKind};
use crate::report;

pub struct Shell<R, W> {
    catalog: Catalog,
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(catalog: Catalog, input: R, out: W) -> Self {
        Self {
            catalog,
            input,
            out,
        }
    }

    /// The catalog as it currently stands.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Run the menu loop until the operator exits or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            match self.display_menu()? {
                1 => self.create_project()?,
                2 => self.remove_project()?,
                3 => self.add_task()?,
                4 => self.mark_task_completed()?,
                5 => self.remove_task()?,
                6 => self.display_project_details()?,
                7 => self.display_completed_tasks()?,
                8 => self.filter_tasks_by_type()?,
                9 => self.display_summary()?,
                10 => self.load_from_file()?,
                11 => self.save_to_file()?,
                -1 => {
                    writeln!(self.out, "Thank you for using TaskDeck. Goodbye!")?;
                    return Ok(());
                }
                _ => writeln!(self.out, "Invalid choice. Please try again.")?,
            }
        }
    }

    fn display_menu(&mut self) -> io::Result<i64> {
        writeln!(self.out, "\n========== PROJECT MANAGEMENT SYSTEM ==========")?;
        writeln!(self.out, "1. Create a new project")?;
        writeln!(self.out, "2. Remove a project")?;
        writeln!(self.out, "3. Add a task to a project")?;
        writeln!(self.out, "4. Mark a task as completed")?;
        writeln!(self.out, "5. Remove a task from a project")?;
        writeln!(self.out, "6. Display all project details")?;
        writeln!(self.out, "7. Display completed tasks")?;
        writeln!(self.out, "8. Filter tasks by type")?;
        writeln!(self.out, "9. Display project summary")?;
        writeln!(self.out, "10. Load from file")?;
        writeln!(self.out, "11. Save to file")?;
        writeln!(self.out, "-1. Exit")?;
        let Some(input) = self.read_trimmed("Enter your choice: ")? else {
            // End of input: leave the loop the same way an explicit exit does.
            return Ok(-1);
        };
        match input.parse::<i64>() {
            Ok(choice) => Ok(choice),
            Err(_) => {
                writeln!(self.out, "Error: please enter a number.")?;
                Ok(0)
            }
        }
    }

    // ============================================================
    // Menu operations
    // ============================================================

    fn create_project(&mut self) -> io::Result<()> {
        if self.catalog.is_full() {
            writeln!(self.out, "\nMaximum projects reached!")?;
            return Ok(());
        }

        let Some(id) =
            self.prompt_id("\nEnter Project ID (1-999) or -1 to cancel: ", 1..=999, "Project ID", true)?
        else {
            writeln!(self.out, "Project creation cancelled.")?;
            return Ok(());
        };
        let mut id = id as u16;

        if self.catalog.is_project_id_taken(id) {
            writeln!(
                self.out,
                "Project ID {id} already exists. Generating a new unique ID..."
            )?;
            id = self.catalog.generate_unique_project_id(&mut rand::rng());
        }
        writeln!(self.out, "\nAssigned Project ID: {id}")?;

        let Some(name) = self.prompt_nonempty(
            "\nEnter Project Name: ",
            "Project name cannot be empty. Please enter a valid name.",
        )?
        else {
            return Ok(());
        };
        let Some(kind) = self.prompt_project_kind()? else {
            return Ok(());
        };

        match self.catalog.create_project(id, name, kind) {
            Ok(project) => {
                tracing::debug!(project = project.id(), "project created");
                writeln!(self.out, "\nProject successfully created!")?;
            }
            Err(e) => writeln!(self.out, "Error: {e}")?,
        }
        Ok(())
    }

    fn remove_project(&mut self) -> io::Result<()> {
        if self.catalog.is_empty() {
            writeln!(self.out, "\nNo projects exist to remove.")?;
            return Ok(());
        }

        let Some(id) =
            self.select_project("\nEnter the Project ID to remove (or -1 to cancel): ")?
        else {
            writeln!(self.out, "Removal cancelled.")?;
            return Ok(());
        };

        match self.catalog.remove_project(id) {
            Ok(()) => {
                tracing::debug!(project = id, "project removed");
                writeln!(self.out, "Project ID {id} successfully removed.")?;
            }
            Err(e) => writeln!(self.out, "Error: {e}")?,
        }
        Ok(())
    }

    fn add_task(&mut self) -> io::Result<()> {
        if self.catalog.is_empty() {
            writeln!(self.out, "There are no projects to add a task to.")?;
            return Ok(());
        }

        let Some(project_id) =
            self.select_project("\nEnter the Project ID to add a task to (or -1 to cancel): ")?
        else {
            writeln!(self.out, "Task creation cancelled.")?;
            return Ok(());
        };
        let Some(project) = self.catalog.project(project_id) else {
            return Ok(());
        };
        let name = project.name().to_string();
        let kind_str = project.kind().as_str();
        let capacity = project.capacity();
        let has_room = project.has_room();

        writeln!(self.out, "Selected Project: {name}")?;
        writeln!(self.out, "Project Type: {kind_str}")?;
        if capacity == 1 {
            writeln!(self.out, "This project allows only 1 task.")?;
        } else {
            writeln!(self.out, "This project allows up to {capacity} tasks.")?;
        }
        if !has_room {
            writeln!(
                self.out,
                "This project already has the maximum number of tasks allowed."
            )?;
            return Ok(());
        }

        let Some(id) = self.prompt_id("\nEnter Task ID (1-99): ", 1..=99, "Task ID", false)? else {
            return Ok(());
        };
        let mut task_id = id as u8;
        if self
            .catalog
            .project(project_id)
            .is_some_and(|p| p.is_task_id_taken(task_id))
        {
            writeln!(
                self.out,
                "Task ID {task_id} already exists in this project. Generating a new unique ID..."
            )?;
            if let Some(project) = self.catalog.project(project_id) {
                task_id = project.generate_unique_task_id(&mut rand::rng());
            }
            writeln!(self.out, "Assigned new unique Task ID: {task_id}")?;
        }

        let Some(description) =
            self.prompt_nonempty("\nEnter task description: ", "Description cannot be empty.")?
        else {
            return Ok(());
        };
        let Some(kind) = self.prompt_task_kind(
            "\nEnter task type (A = Admin, S = Support, L = Logistics): ",
        )?
        else {
            return Ok(());
        };
        let Some(duration) =
            self.prompt_id("Enter Task Duration (1-100 hours): ", 1..=100, "Duration", false)?
        else {
            return Ok(());
        };

        let task = Task::new(task_id, description, kind, duration as u32);
        match self.catalog.project_mut(project_id).map(|p| p.add_task(task)) {
            Some(Ok(())) => {
                tracing::debug!(project = project_id, task = task_id, "task added");
                writeln!(self.out, "\nTask successfully added to project.")?;
            }
            Some(Err(e)) => writeln!(self.out, "Error: {e}")?,
            None => writeln!(self.out, "No project found with ID: {project_id}.")?,
        }
        Ok(())
    }

    fn mark_task_completed(&mut self) -> io::Result<()> {
        if self.catalog.is_empty() {
            writeln!(self.out, "There are no projects to update tasks in.")?;
            return Ok(());
        }

        let Some(project_id) = self.select_project(
            "\nEnter the Project ID to mark a task as completed (or -1 to cancel): ",
        )?
        else {
            writeln!(self.out, "Task selection cancelled.")?;
            return Ok(());
        };
        if let Some(project) = self.catalog.project(project_id) {
            writeln!(self.out, "Selected Project: {}", project.name())?;
        }
        self.display_tasks_for(project_id)?;

        let Some(task_id) = self.select_task(project_id)? else {
            writeln!(self.out, "Task selection cancelled.")?;
            return Ok(());
        };

        match self
            .catalog
            .project_mut(project_id)
            .map(|p| p.mark_completed(task_id))
        {
            Some(Ok(MarkOutcome::AlreadyCompleted)) => {
                writeln!(self.out, "Task is already marked as completed.")?;
            }
            Some(Ok(MarkOutcome::NowCompleted)) => {
                tracing::debug!(project = project_id, task = task_id, "task completed");
                writeln!(self.out, "Task marked as completed.")?;
            }
            Some(Err(e)) => writeln!(self.out, "Error: {e}")?,
            None => writeln!(self.out, "No project found with ID: {project_id}.")?,
        }
        Ok(())
    }

    fn remove_task(&mut self) -> io::Result<()> {
        if self.catalog.is_empty() {
            writeln!(self.out, "There are no projects to remove a task from.")?;
            return Ok(());
        }

        let Some(project_id) =
            self.select_project("\nEnter the Project ID to remove a task from (or -1 to cancel): ")?
        else {
            writeln!(self.out, "Task removal cancelled.")?;
            return Ok(());
        };
        self.display_tasks_for(project_id)?;
        if self
            .catalog
            .project(project_id)
            .is_some_and(|p| p.tasks().is_empty())
        {
            writeln!(self.out, "There are no tasks to remove in this project.")?;
            return Ok(());
        }

        let Some(task_id) = self.select_task(project_id)? else {
            writeln!(self.out, "Task removal cancelled.")?;
            return Ok(());
        };

        match self
            .catalog
            .project_mut(project_id)
            .map(|p| p.remove_task(task_id))
        {
            Some(Ok(())) => {
                tracing::debug!(project = project_id, task = task_id, "task removed");
                writeln!(self.out, "Task ID {task_id} successfully removed.")?;
            }
            Some(Err(e)) => writeln!(self.out, "Error: {e}")?,
            None => writeln!(self.out, "No project found with ID: {project_id}.")?,
        }
        Ok(())
    }

    fn display_project_details(&mut self) -> io::Result<()> {
        if self.catalog.is_empty() {
            writeln!(self.out, "\nThere are no saved projects to display.")?;
            return Ok(());
        }

        let ids: Vec<u16> = self.catalog.projects().iter().map(|p| p.id()).collect();
        for id in ids {
            if let Some(project) = self.catalog.project(id) {
                writeln!(
                    self.out,
                    "\n---------------------------------------------------"
                )?;
                writeln!(self.out, "Project ID: {}", project.id())?;
                writeln!(self.out, "Project Name: {}", project.name())?;
                writeln!(self.out, "Project Type: {}", project.kind().as_str())?;
            }
            self.display_tasks_for(id)?;
        }
        writeln!(
            self.out,
            "---------------------------------------------------\n"
        )?;
        Ok(())
    }

    fn display_completed_tasks(&mut self) -> io::Result<()> {
        if self.catalog.is_empty() {
            writeln!(
                self.out,
                "\nThere are no saved projects to check for completed tasks."
            )?;
            return Ok(());
        }

        let Some(project_id) =
            self.select_project("\nEnter the Project ID to inspect (or -1 to cancel): ")?
        else {
            writeln!(self.out, "Returning to main menu...")?;
            return Ok(());
        };
        let Some(project) = self.catalog.project(project_id) else {
            return Ok(());
        };

        writeln!(
            self.out,
            "\nCompleted Tasks in Project: {}",
            project.name()
        )?;
        let mut found = false;
        for task in project.completed_tasks() {
            found = true;
            writeln!(
                self.out,
                "* Task ID: {}, Description: {}, Type: {}, Duration: {}h",
                task.id,
                task.description,
                task.kind.letter(),
                task.duration_hours
            )?;
        }
        if !found {
            writeln!(self.out, "No completed tasks found in this project.")?;
        }
        Ok(())
    }

    fn filter_tasks_by_type(&mut self) -> io::Result<()> {
        if self.catalog.is_empty() {
            writeln!(self.out, "\nThere are no saved projects to filter tasks from.")?;
            return Ok(());
        }

        let Some(kind) = self.prompt_task_kind(
            "\nEnter task type to filter by (A = Admin, S = Support, L = Logistics): ",
        )?
        else {
            return Ok(());
        };

        let matches = report::filter_tasks_by_kind(&self.catalog, kind);
        if matches.is_empty() {
            writeln!(self.out, "No tasks of type {} were found.", kind.letter())?;
            return Ok(());
        }
        writeln!(self.out, "\nMatching tasks:")?;
        for (project, task) in &matches {
            let status = if task.completed { "Completed" } else { "Incomplete" };
            writeln!(
                self.out,
                "- Project: {} | Task ID: {} | Desc: {} | Duration: {}h | Status: {}",
                project.name(),
                task.id,
                task.description,
                task.duration_hours,
                status
            )?;
        }
        Ok(())
    }

    fn display_summary(&mut self) -> io::Result<()> {
        if self.catalog.is_empty() {
            writeln!(self.out, "No created tasks to report.")?;
            return Ok(());
        }

        let summary = report::catalog_summary(&self.catalog);

        writeln!(
            self.out,
            "\n------------------------ Average Task Duration ------------------"
        )?;
        for kind in TaskKind::ALL {
            match summary.overall.average(kind) {
                Some(avg) => writeln!(
                    self.out,
                    "* Average duration of {} tasks is {avg} hours",
                    kind.as_str()
                )?,
                None => writeln!(self.out, "* No {} tasks found.", kind.as_str())?,
            }
        }

        for (id, breakdown) in &summary.per_project {
            writeln!(self.out, "\n---------------- Project {id} ----------------")?;
            for kind in TaskKind::ALL {
                match breakdown.average(kind) {
                    Some(avg) => {
                        writeln!(self.out, "* {} average: {avg} hours", kind_label(kind))?;
                    }
                    None => writeln!(self.out, "* No {} tasks found.", kind.as_str())?,
                }
            }
        }
        Ok(())
    }

    fn load_from_file(&mut self) -> io::Result<()> {
        let Some(filename) =
            self.read_trimmed("Enter filename to load from (e.g., ProjectData.txt): ")?
        else {
            return Ok(());
        };

        match codec::load(&filename, self.catalog.capacity()) {
            Ok(loaded) => {
                for warning in &loaded.warnings {
                    writeln!(self.out, "[WARNING] {warning}")?;
                }
                tracing::info!(
                    file = %filename,
                    projects = loaded.catalog.len(),
                    warnings = loaded.warnings.len(),
                    "catalog loaded"
                );
                // Wholesale swap, only after the entire file was consumed.
                self.catalog = loaded.catalog;
                writeln!(self.out, "Projects loaded successfully.")?;
            }
            Err(e) => writeln!(self.out, "[ERROR] {e}")?,
        }
        Ok(())
    }

    fn save_to_file(&mut self) -> io::Result<()> {
        let Some(filename) =
            self.read_trimmed("Enter filename to save to (e.g., ProjectData.txt): ")?
        else {
            return Ok(());
        };

        match codec::save(&filename, &self.catalog) {
            Ok(()) => {
                tracing::info!(file = %filename, projects = self.catalog.len(), "catalog saved");
                writeln!(self.out, "Projects saved successfully.")?;
            }
            Err(e) => writeln!(self.out, "[ERROR] Error writing to file: {e}")?,
        }
        Ok(())
    }

    // ============================================================
    // Prompt and display helpers
    // ============================================================

    /// Print a prompt and read one trimmed line; `None` at end of input.
    fn read_trimmed(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.out, "{prompt}")?;
        self.out.flush()?;
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(buf.trim().to_string()))
    }

    fn prompt_nonempty(&mut self, prompt: &str, complaint: &str) -> io::Result<Option<String>> {
        loop {
            let Some(value) = self.read_trimmed(prompt)? else {
                return Ok(None);
            };
            if value.is_empty() {
                writeln!(self.out, "{complaint}")?;
                continue;
            }
            return Ok(Some(value));
        }
    }

    /// Prompt for an integer in `range` until one is supplied. `-1` cancels
    /// when allowed; end of input always cancels.
    fn prompt_id(
        &mut self,
        prompt: &str,
        range: RangeInclusive<i64>,
        what: &str,
        allow_cancel: bool,
    ) -> io::Result<Option<i64>> {
        loop {
            let Some(input) = self.read_trimmed(prompt)? else {
                return Ok(None);
            };
            if input.is_empty() {
                writeln!(self.out, "Input cannot be empty.")?;
                continue;
            }
            match input.parse::<i64>() {
                Ok(-1) if allow_cancel => return Ok(None),
                Ok(value) if range.contains(&value) => return Ok(Some(value)),
                Ok(_) => writeln!(
                    self.out,
                    "{what} must be between {} and {}.",
                    range.start(),
                    range.end()
                )?,
                Err(_) => writeln!(
                    self.out,
                    "Invalid input. Please enter a number between {} and {}.",
                    range.start(),
                    range.end()
                )?,
            }
        }
    }

    fn prompt_project_kind(&mut self) -> io::Result<Option<ProjectKind>> {
        loop {
            let Some(input) =
                self.read_trimmed("\nEnter Project Type (Small, Medium or Large): ")?
            else {
                return Ok(None);
            };
            if input.is_empty() {
                writeln!(
                    self.out,
                    "Project type cannot be empty. Please enter Small, Medium, or Large."
                )?;
                continue;
            }
            match ProjectKind::from_str_ignore_case(&input) {
                Some(kind) => return Ok(Some(kind)),
                None => writeln!(
                    self.out,
                    "Invalid project type. Please enter Small, Medium, or Large."
                )?,
            }
        }
    }

    fn prompt_task_kind(&mut self, prompt: &str) -> io::Result<Option<TaskKind>> {
        loop {
            let Some(input) = self.read_trimmed(prompt)? else {
                return Ok(None);
            };
            if input.is_empty() {
                writeln!(self.out, "Task type cannot be empty. Please enter A, S, or L.")?;
                continue;
            }
            let mut letters = input.chars();
            match (letters.next(), letters.next()) {
                (Some(letter), None) => match TaskKind::from_letter(letter) {
                    Some(kind) => return Ok(Some(kind)),
                    None => writeln!(self.out, "Invalid task type. Please enter A, S or L.")?,
                },
                _ => writeln!(self.out, "Please enter a single letter: A, S, or L.")?,
            }
        }
    }

    /// List projects and prompt until an existing id is chosen; `None` on
    /// cancel or end of input.
    fn select_project(&mut self, prompt: &str) -> io::Result<Option<u16>> {
        self.display_existing_projects()?;
        loop {
            let Some(input) = self.read_trimmed(prompt)? else {
                return Ok(None);
            };
            if input.is_empty() {
                writeln!(self.out, "Input cannot be empty.")?;
                continue;
            }
            let Ok(id) = input.parse::<i64>() else {
                writeln!(
                    self.out,
                    "Invalid input. Please enter a valid number (between 1-999)."
                )?;
                continue;
            };
            if id == -1 {
                return Ok(None);
            }
            let found = u16::try_from(id)
                .ok()
                .filter(|pid| self.catalog.is_project_id_taken(*pid));
            match found {
                Some(pid) => return Ok(Some(pid)),
                None => writeln!(
                    self.out,
                    "No project found with ID: {id}. Please try again or enter -1 to cancel."
                )?,
            }
        }
    }

    /// Prompt until an existing task id in the project is chosen; `None` on
    /// cancel or end of input.
    fn select_task(&mut self, project_id: u16) -> io::Result<Option<u8>> {
        loop {
            let Some(input) =
                self.read_trimmed("\nEnter the Task ID to select (or -1 to cancel): ")?
            else {
                return Ok(None);
            };
            if input.is_empty() {
                writeln!(self.out, "Input cannot be empty.")?;
                continue;
            }
            let Ok(id) = input.parse::<i64>() else {
                writeln!(self.out, "Invalid input. Please enter a number.")?;
                continue;
            };
            if id == -1 {
                return Ok(None);
            }
            let found = u8::try_from(id).ok().filter(|tid| {
                self.catalog
                    .project(project_id)
                    .is_some_and(|p| p.is_task_id_taken(*tid))
            });
            match found {
                Some(tid) => return Ok(Some(tid)),
                None => writeln!(
                    self.out,
                    "No task found with ID: {id}. Please try again or enter -1 to cancel."
                )?,
            }
        }
    }

    fn display_existing_projects(&mut self) -> io::Result<()> {
        writeln!(self.out, "\nExisting Projects:")?;
        for (id, name) in self.catalog.list_projects() {
            writeln!(self.out, "- ID: {id} | Name: {name}")?;
        }
        Ok(())
    }

    fn display_tasks_for(&mut self, project_id: u16) -> io::Result<()> {
        let Some(project) = self.catalog.project(project_id) else {
            return Ok(());
        };
        writeln!(self.out, "\nTasks in project: {}", project.name())?;
        if project.tasks().is_empty() {
            writeln!(self.out, "This project has no tasks.")?;
            return Ok(());
        }
        for task in project.tasks() {
            let status = if task.completed { "Completed" } else { "Incomplete" };
            writeln!(
                self.out,
                "- Task ID: {} | Desc: {} | Type: {} | Duration: {}h | Status: {}",
                task.id,
                task.description,
                task.kind.letter(),
                task.duration_hours,
                status
            )?;
        }
        Ok(())
    }
}

fn kind_label(kind: TaskKind) -> &'static str {
    match kind {
        TaskKind::Admin => "Admin",
        TaskKind::Support => "Support",
        TaskKind::Logistics => "Logistics",
    }
}
