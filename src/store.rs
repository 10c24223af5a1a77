//! The task repository.
//!
//! `Store` owns the loaded `Settings` and the path they came from. Every
//! mutation goes through one of its methods and is persisted before the
//! method returns, so the interaction loops never write the file
//! themselves.

use std::path::{Path, PathBuf};

use chrono::Local;
use log::{debug, info};

use crate::error::StoreError;
use crate::fields::Status;
use crate::project::{BoardView, Project};
use crate::settings::Settings;
use crate::task::Task;

pub struct Store {
    settings: Settings,
    path: PathBuf,
}

impl Store {
    /// Load (or create) the settings file at `path`.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let settings = Settings::load(path)?;
        info!(
            "Loaded {} project(s) from {}",
            settings.projects.len(),
            path.display()
        );
        Ok(Store {
            settings,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply `change` to a copy of the settings and save the copy. The
    /// in-memory settings are replaced only once the save succeeded.
    fn commit<T>(
        &mut self,
        change: impl FnOnce(&mut Settings) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut next = self.settings.clone();
        let out = change(&mut next)?;
        debug!("Persisting settings to {}", self.path.display());
        next.save(&self.path)?;
        self.settings = next;
        Ok(out)
    }

    pub fn projects(&self) -> &[Project] {
        &self.settings.projects
    }

    pub fn recent_project(&self) -> Option<&str> {
        self.settings.recent_project_title.as_deref()
    }

    pub fn set_recent_project(&mut self, title: &str) -> Result<(), StoreError> {
        if self.settings.project(title).is_none() {
            return Err(StoreError::ProjectNotFound);
        }
        if self.recent_project() == Some(title) {
            return Ok(());
        }
        self.commit(|settings| {
            settings.recent_project_title = Some(title.to_string());
            Ok(())
        })
    }

    pub fn project(&self, title: &str) -> Result<&Project, StoreError> {
        self.settings.project(title).ok_or(StoreError::ProjectNotFound)
    }

    pub fn task(&self, project: &str, id: u64) -> Result<&Task, StoreError> {
        self.project(project)?
            .task(id)
            .ok_or(StoreError::TaskNotFound(id))
    }

    pub fn tasks_with_status(&self, project: &str, status: Status) -> Result<Vec<&Task>, StoreError> {
        Ok(self.project(project)?.tasks_with_status(status))
    }

    pub fn backlog_ids(&self, project: &str) -> Result<Vec<u64>, StoreError> {
        Ok(self.project(project)?.backlog_ids())
    }

    pub fn board_view(&self, project: &str) -> Result<BoardView, StoreError> {
        Ok(self.project(project)?.board_view())
    }

    /// Move a task to `destination`, or one column forward when no
    /// destination is given. Returns the new status.
    pub fn move_task(
        &mut self,
        project: &str,
        id: u64,
        destination: Option<&str>,
    ) -> Result<Status, StoreError> {
        let target = match destination {
            Some(name) => match name.parse::<Status>() {
                Ok(status) if status.in_flow() => Some(status),
                _ => return Err(StoreError::InvalidDestination(name.to_string())),
            },
            None => None,
        };

        self.commit(|settings| {
            let task = project_mut(settings, project)?
                .task_mut(id)
                .ok_or(StoreError::TaskNotFound(id))?;
            let current = task.status;
            let new_status = match target {
                Some(status) => status,
                None if current == Status::Done => return Err(StoreError::LastColumn(current)),
                None => current.next().ok_or(StoreError::NoNextColumn(current))?,
            };

            let today = Local::now().date_naive();
            if new_status == Status::Doing && task.start_date.is_none() {
                task.start_date = Some(today);
            }
            if new_status == Status::Done {
                task.complete_date.get_or_insert(today);
            } else {
                task.complete_date = None;
            }
            task.status = new_status;

            info!("Moved task {id} in '{project}': {current} -> {new_status}");
            Ok(new_status)
        })
    }

    pub fn delete_task(&mut self, project: &str, id: u64) -> Result<(), StoreError> {
        self.commit(|settings| {
            let tasks = &mut project_mut(settings, project)?.tasks;
            let idx = tasks
                .iter()
                .position(|t| t.id == id)
                .ok_or(StoreError::TaskNotFound(id))?;
            tasks.remove(idx);
            info!("Deleted task {id} from '{project}'");
            Ok(())
        })
    }

    /// Append `task` to the project under a freshly assigned id.
    pub fn create_task(&mut self, project: &str, mut task: Task) -> Result<u64, StoreError> {
        if task.title.trim().is_empty() {
            return Err(StoreError::BlankTitle);
        }
        self.commit(|settings| {
            let p = project_mut(settings, project)?;
            task.id = p.next_task_id;
            p.next_task_id = p.next_task_id.saturating_add(1);
            let id = task.id;
            p.tasks.push(task);
            info!("Created task {id} in '{project}'");
            Ok(id)
        })
    }

    /// Replace the stored task carrying `task.id`.
    pub fn update_task(&mut self, project: &str, task: Task) -> Result<(), StoreError> {
        if task.title.trim().is_empty() {
            return Err(StoreError::BlankTitle);
        }
        self.commit(|settings| {
            let id = task.id;
            let slot = project_mut(settings, project)?
                .task_mut(id)
                .ok_or(StoreError::TaskNotFound(id))?;
            *slot = task;
            info!("Updated task {id} in '{project}'");
            Ok(())
        })
    }

    /// Reclassify every `done` task in the project as `archived`.
    /// Returns how many tasks were swept.
    pub fn archive_completed(&mut self, project: &str) -> Result<usize, StoreError> {
        self.commit(|settings| {
            let mut swept = 0;
            for task in project_mut(settings, project)?.tasks.iter_mut() {
                if task.status == Status::Done {
                    task.status = Status::Archived;
                    swept += 1;
                }
            }
            info!("Archived {swept} completed task(s) in '{project}'");
            Ok(swept)
        })
    }

    /// Create an empty project. Titles are trimmed and must be unique.
    pub fn create_project(&mut self, title: &str) -> Result<u64, StoreError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(StoreError::BlankTitle);
        }
        if self.settings.project(title).is_some() {
            return Err(StoreError::DuplicateProject(title.to_string()));
        }
        self.commit(|settings| {
            let id = settings.next_project_id;
            settings.next_project_id = id.saturating_add(1);
            settings.projects.push(Project::new(id, title));
            info!("Created project '{title}' with id {id}");
            Ok(id)
        })
    }

    /// Delete a project by title. Returns `true` when the deleted project
    /// was the most recent one and that reference was cleared.
    pub fn delete_project(&mut self, title: &str) -> Result<bool, StoreError> {
        self.commit(|settings| {
            let idx = settings
                .projects
                .iter()
                .position(|p| p.title == title)
                .ok_or(StoreError::ProjectNotFound)?;
            settings.projects.remove(idx);
            let cleared = settings.recent_project_title.as_deref() == Some(title);
            if cleared {
                settings.recent_project_title = None;
            }
            info!("Deleted project '{title}' (recent cleared: {cleared})");
            Ok(cleared)
        })
    }
}

fn project_mut<'s>(settings: &'s mut Settings, title: &str) -> Result<&'s mut Project, StoreError> {
    settings.project_mut(title).ok_or(StoreError::ProjectNotFound)
}
