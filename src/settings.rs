//! The persisted settings document and its file I/O.
//!
//! Everything kb knows lives in a single JSON file: the list of projects,
//! the most recently opened project and the project id counter. Writes
//! always rewrite the whole file.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::fields::*;
use crate::project::Project;
use crate::task::{ChecklistItem, LinkedTask, Task};

/// The whole settings file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub recent_project_title: Option<String>,
    #[serde(default)]
    pub next_project_id: u64,
    #[serde(default)]
    pub projects: Vec<Project>,
}

impl Settings {
    /// Settings written on first launch: a `kb` project holding one sample
    /// task, opened as the most recent project.
    pub fn initial() -> Self {
        let mut sample = Task::new("Task Title 1");
        sample.description = "Task description 1".into();
        sample.acceptance_criteria = "Acceptance Criteria for Task 1".into();
        sample.status = Status::Todo;
        sample.effort = 3;
        sample.start_date = NaiveDate::from_ymd_opt(2025, 4, 10);
        sample.tags = vec!["tag1".into()];
        sample.fix_version = "v1.0.0".into();
        sample.linked_tasks = vec![LinkedTask {
            id: 0,
            kind: "task".into(),
            reason: "blocked by".into(),
        }];
        sample.checklist_items = vec![ChecklistItem {
            name: "Checklist Item Name 1".into(),
            completed: false,
        }];

        let mut project = Project::new(0, "kb");
        project.tasks.push(sample);
        project.next_task_id = 1;

        Settings {
            recent_project_title: Some("kb".into()),
            next_project_id: 1,
            projects: vec![project],
        }
    }

    /// Load settings from `path`.
    ///
    /// A missing file is created with `Settings::initial`. A file that does
    /// not parse is moved aside to `<name>.corrupt` and replaced with the
    /// initial settings.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            info!("No settings at {}, writing initial settings", path.display());
            let settings = Settings::initial();
            settings.save(path)?;
            return Ok(settings);
        }

        let buf = fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut settings = match serde_json::from_str::<Settings>(&buf) {
            Ok(settings) => settings,
            Err(e) => {
                let aside = corrupt_path(path);
                warn!("Settings at {} did not parse ({e}); moving to {}", path.display(), aside.display());
                fs::rename(path, &aside).map_err(|source| StoreError::Io {
                    path: aside.clone(),
                    source,
                })?;
                let settings = Settings::initial();
                settings.save(path)?;
                return Ok(settings);
            }
        };
        settings.repair();
        Ok(settings)
    }

    /// Save settings to JSON file using atomic write (temp file + rename).
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(io_err)?;
        }
        let tmp = path.with_extension("json.tmp");
        let data = serde_json::to_string_pretty(self)?;
        let mut f = File::create(&tmp).map_err(io_err)?;
        f.write_all(data.as_bytes()).map_err(io_err)?;
        f.flush().map_err(io_err)?;
        fs::rename(&tmp, path).map_err(io_err)?;
        Ok(())
    }

    pub fn project(&self, title: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.title == title)
    }

    pub fn project_mut(&mut self, title: &str) -> Option<&mut Project> {
        self.projects.iter_mut().find(|p| p.title == title)
    }

    /// Restore the document invariants after loading hand-edited data:
    /// id counters sit above every used id and the most recent project
    /// reference names an existing project.
    pub fn repair(&mut self) {
        let floor = self.projects.iter().map(|p| p.id.saturating_add(1)).max().unwrap_or(0);
        self.next_project_id = self.next_project_id.max(floor);
        for project in &mut self.projects {
            project.repair_next_task_id();
        }
        if let Some(recent) = self.recent_project_title.as_deref() {
            if self.project(recent).is_none() {
                warn!("Most recent project '{recent}' no longer exists; clearing");
                self.recent_project_title = None;
            }
        }
    }
}

fn corrupt_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".corrupt");
    path.with_file_name(name)
}
