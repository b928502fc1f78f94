use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "gradebook.json";

const DEFAULT_SUBJECTS: [&str; 4] = [
    "Математика",
    "Английский язык",
    "Естественные науки",
    "Социальные науки",
];
const DEFAULT_DAYS: [&str; 6] = ["ПН", "ВТ", "СР", "ЧТ", "ПТ", "СБ"];
const DEFAULT_PLACEHOLDER_STUDENT: &str = "Ученик";

/// Fixed labels the journal is laid out with. Not persisted with the grades.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JournalConfig {
    pub classes: Vec<String>,
    pub subjects: Vec<String>,
    pub days: Vec<String>,
    /// Roster used for a (class, subject) pair that has never been saved.
    pub placeholder_student: String,
}

fn default_classes() -> Vec<String> {
    (1..=12)
        .flat_map(|grade| ["A", "B"].map(|letter| format!("{grade}{letter}")))
        .collect()
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            classes: default_classes(),
            subjects: DEFAULT_SUBJECTS.iter().map(|s| s.to_string()).collect(),
            days: DEFAULT_DAYS.iter().map(|s| s.to_string()).collect(),
            placeholder_student: DEFAULT_PLACEHOLDER_STUDENT.to_string(),
        }
    }
}

impl JournalConfig {
    pub fn has_class(&self, class_name: &str) -> bool {
        self.classes.iter().any(|c| c == class_name)
    }

    pub fn has_subject(&self, subject: &str) -> bool {
        self.subjects.iter().any(|s| s == subject)
    }

    pub fn parse(text: &str) -> anyhow::Result<Self> {
        let cfg: JournalConfig = serde_json::from_str(text)?;
        if cfg.classes.is_empty() {
            bail!("classes must not be empty");
        }
        if cfg.subjects.is_empty() {
            bail!("subjects must not be empty");
        }
        if cfg.days.is_empty() {
            bail!("days must not be empty");
        }
        Ok(cfg)
    }

    /// Reads `gradebook.json` from the workspace, if present.
    pub fn load_from_workspace(workspace: &Path) -> anyhow::Result<Option<Self>> {
        let path = workspace.join(CONFIG_FILE_NAME);
        if !path.is_file() {
            return Ok(None);
        }
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.to_string_lossy()))?;
        let cfg = Self::parse(&text)
            .with_context(|| format!("invalid config {}", path.to_string_lossy()))?;
        Ok(Some(cfg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_school_layout() {
        let cfg = JournalConfig::default();
        assert_eq!(cfg.classes.len(), 24);
        assert_eq!(cfg.classes.first().map(String::as_str), Some("1A"));
        assert_eq!(cfg.classes.last().map(String::as_str), Some("12B"));
        assert!(cfg.has_class("5A"));
        assert!(!cfg.has_class("13A"));
        assert_eq!(cfg.subjects.len(), 4);
        assert!(cfg.has_subject("Английский язык"));
        assert_eq!(cfg.days, vec!["ПН", "ВТ", "СР", "ЧТ", "ПТ", "СБ"]);
        assert_eq!(cfg.placeholder_student, "Ученик");
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let cfg = JournalConfig::parse(r#"{ "days": ["Mon", "Tue"] }"#).expect("parse");
        assert_eq!(cfg.days, vec!["Mon", "Tue"]);
        assert_eq!(cfg.subjects.len(), 4);
        assert_eq!(cfg.placeholder_student, "Ученик");
    }

    #[test]
    fn empty_lists_are_rejected() {
        assert!(JournalConfig::parse(r#"{ "subjects": [] }"#).is_err());
        assert!(JournalConfig::parse(r#"{ "classes": [] }"#).is_err());
        assert!(JournalConfig::parse("not json").is_err());
    }
}
