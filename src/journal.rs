//! The journal sheet: selection, roster and grade maps for one (class, subject)
//! pair, with every edit written straight through to the store.
//!
//! Students are identified by name. Two students with the same name share
//! grade cells and are removed together.

use crate::calc::{self, StudentRow};
use crate::config::JournalConfig;
use crate::store::{load_json, save_json, storage_key, KeyValueStore, Purpose};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    #[error("unknown class: {0}")]
    UnknownClass(String),

    #[error("unknown subject: {0}")]
    UnknownSubject(String),

    #[error("student not found: {0}")]
    StudentNotFound(String),

    #[error("no student is pending deletion")]
    NoPendingDelete,

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl JournalError {
    pub fn code(&self) -> &'static str {
        match self {
            JournalError::UnknownClass(_) => "unknown_class",
            JournalError::UnknownSubject(_) => "unknown_subject",
            JournalError::StudentNotFound(_) => "student_not_found",
            JournalError::NoPendingDelete => "no_pending_delete",
            JournalError::Storage(_) => "storage_failed",
        }
    }
}

pub type JournalResult<T> = Result<T, JournalError>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub class_name: String,
    pub subject: String,
}

/// Grade text keyed by `"{student}-{day}"`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GradeMap(BTreeMap<String, String>);

pub fn grade_key(student: &str, day: &str) -> String {
    format!("{student}-{day}")
}

impl GradeMap {
    pub fn get(&self, student: &str, day: &str) -> &str {
        self.0
            .get(&grade_key(student, day))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn set(&mut self, student: &str, day: &str, value: &str) {
        self.0.insert(grade_key(student, day), value.to_string());
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FinalGradeMap(BTreeMap<String, String>);

impl FinalGradeMap {
    pub fn get(&self, student: &str) -> &str {
        self.0.get(student).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, student: &str, value: &str) {
        self.0.insert(student.to_string(), value.to_string());
    }
}

/// Ordered enrolment of a class. Shared by all of its subjects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster(Vec<String>);

impl Roster {
    pub fn placeholder(name: &str) -> Self {
        Roster(vec![name.to_string()])
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|n| n == name)
    }

    pub fn push(&mut self, name: &str) {
        self.0.push(name.to_string());
    }

    /// Drops every entry equal to `name`; returns how many went.
    pub fn remove_all(&mut self, name: &str) -> usize {
        let before = self.0.len();
        self.0.retain(|n| n != name);
        before - self.0.len()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetView {
    pub class_name: String,
    pub subject: String,
    pub days: Vec<String>,
    pub rows: Vec<StudentRow>,
    pub pending_delete: Option<String>,
}

pub struct JournalSheet<S: KeyValueStore> {
    store: S,
    config: JournalConfig,
    selection: Selection,
    roster: Roster,
    grades: GradeMap,
    final_grades: FinalGradeMap,
    pending_delete: Option<String>,
}

impl<S: KeyValueStore> JournalSheet<S> {
    /// Opens the sheet on the first configured class and subject.
    pub fn open(store: S, config: JournalConfig) -> JournalResult<Self> {
        let class_name = config
            .classes
            .first()
            .cloned()
            .ok_or_else(|| JournalError::UnknownClass(String::new()))?;
        let subject = config
            .subjects
            .first()
            .cloned()
            .ok_or_else(|| JournalError::UnknownSubject(String::new()))?;

        let mut sheet = Self {
            store,
            config,
            selection: Selection {
                class_name,
                subject,
            },
            roster: Roster::default(),
            grades: GradeMap::default(),
            final_grades: FinalGradeMap::default(),
            pending_delete: None,
        };
        sheet.reload();
        Ok(sheet)
    }

    pub fn config(&self) -> &JournalConfig {
        &self.config
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn grades(&self) -> &GradeMap {
        &self.grades
    }

    pub fn final_grades(&self) -> &FinalGradeMap {
        &self.final_grades
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    /// Switches the active partition and reloads everything from the store.
    pub fn select(&mut self, class_name: &str, subject: &str) -> JournalResult<()> {
        if !self.config.has_class(class_name) {
            return Err(JournalError::UnknownClass(class_name.to_string()));
        }
        if !self.config.has_subject(subject) {
            return Err(JournalError::UnknownSubject(subject.to_string()));
        }
        self.selection = Selection {
            class_name: class_name.to_string(),
            subject: subject.to_string(),
        };
        self.pending_delete = None;
        self.reload();
        tracing::debug!(class = class_name, subject, "selection changed");
        Ok(())
    }

    fn key(&self, purpose: Purpose) -> String {
        storage_key(&self.selection.class_name, &self.selection.subject, purpose)
    }

    fn reload(&mut self) {
        self.roster = load_json(&self.store, &self.key(Purpose::Students))
            .unwrap_or_else(|| Roster::placeholder(&self.config.placeholder_student));
        self.grades = load_json(&self.store, &self.key(Purpose::Grades)).unwrap_or_default();
        self.final_grades =
            load_json(&self.store, &self.key(Purpose::FinalGrades)).unwrap_or_default();
    }

    pub fn handle_grade_change(
        &mut self,
        student: &str,
        day: &str,
        value: &str,
    ) -> JournalResult<()> {
        let mut next = self.grades.clone();
        next.set(student, day, value);
        let key = self.key(Purpose::Grades);
        save_json(&mut self.store, &key, &next)?;
        self.grades = next;
        tracing::info!(
            class = %self.selection.class_name,
            subject = %self.selection.subject,
            student,
            day,
            "grade recorded"
        );
        Ok(())
    }

    pub fn handle_final_grade_change(&mut self, student: &str, value: &str) -> JournalResult<()> {
        let mut next = self.final_grades.clone();
        next.set(student, value);
        let key = self.key(Purpose::FinalGrades);
        save_json(&mut self.store, &key, &next)?;
        self.final_grades = next;
        tracing::info!(
            class = %self.selection.class_name,
            subject = %self.selection.subject,
            student,
            "final grade recorded"
        );
        Ok(())
    }

    /// Appends `name` as typed. Blank names are ignored and return `false`.
    pub fn handle_add_student(&mut self, name: &str) -> JournalResult<bool> {
        if name.trim().is_empty() {
            return Ok(false);
        }
        let mut next = self.roster.clone();
        next.push(name);
        self.save_roster(next)?;
        tracing::info!(class = %self.selection.class_name, student = name, "student added");
        Ok(true)
    }

    pub fn request_delete(&mut self, name: &str) -> JournalResult<()> {
        if !self.roster.contains(name) {
            return Err(JournalError::StudentNotFound(name.to_string()));
        }
        self.pending_delete = Some(name.to_string());
        Ok(())
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Commits the pending deletion. Grade entries for the name stay in the maps.
    pub fn confirm_delete(&mut self) -> JournalResult<usize> {
        let name = self
            .pending_delete
            .clone()
            .ok_or(JournalError::NoPendingDelete)?;
        let mut next = self.roster.clone();
        let removed = next.remove_all(&name);
        self.save_roster(next)?;
        self.pending_delete = None;
        tracing::info!(
            class = %self.selection.class_name,
            student = %name,
            removed,
            "student deleted"
        );
        Ok(removed)
    }

    /// Enrolment is per class, so the roster is written under every subject
    /// of the current class in a single batch.
    fn save_roster(&mut self, roster: Roster) -> JournalResult<()> {
        let text = serde_json::to_string(&roster).map_err(anyhow::Error::from)?;
        let entries: Vec<(String, String)> = self
            .config
            .subjects
            .iter()
            .map(|subject| {
                (
                    storage_key(&self.selection.class_name, subject, Purpose::Students),
                    text.clone(),
                )
            })
            .collect();
        self.store.save_many(&entries)?;
        self.roster = roster;
        Ok(())
    }

    pub fn row(&self, student: &str) -> StudentRow {
        calc::student_row(student, &self.config.days, self.grades(), self.final_grades())
    }

    pub fn view(&self) -> SheetView {
        SheetView {
            class_name: self.selection.class_name.clone(),
            subject: self.selection.subject.clone(),
            days: self.config.days.clone(),
            rows: self.roster.names().iter().map(|s| self.row(s)).collect(),
            pending_delete: self.pending_delete.clone(),
        }
    }
}
