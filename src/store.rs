use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Purpose {
    Grades,
    Students,
    FinalGrades,
}

impl Purpose {
    pub fn as_str(self) -> &'static str {
        match self {
            Purpose::Grades => "grades",
            Purpose::Students => "students",
            Purpose::FinalGrades => "final-grades",
        }
    }
}

/// `{class}-{subject}-{purpose}`
pub fn storage_key(class_name: &str, subject: &str, purpose: Purpose) -> String {
    format!("{}-{}-{}", class_name, subject, purpose.as_str())
}

/// Flat text key-value namespace the journal persists into.
pub trait KeyValueStore {
    fn load(&self, key: &str) -> anyhow::Result<Option<String>>;

    fn save(&mut self, key: &str, value: &str) -> anyhow::Result<()>;

    /// Writes several entries as one unit where the backend supports it.
    fn save_many(&mut self, entries: &[(String, String)]) -> anyhow::Result<()> {
        for (k, v) in entries {
            self.save(k, v)?;
        }
        Ok(())
    }
}

/// Missing, unreadable or malformed entries all come back as `None`.
pub fn load_json<T, S>(store: &S, key: &str) -> Option<T>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let raw = match store.load(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!(key, error = %e, "storage read failed; using default");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::warn!(key, error = %e, "stored value is not valid; using default");
            None
        }
    }
}

pub fn save_json<T, S>(store: &mut S, key: &str, value: &T) -> anyhow::Result<()>
where
    T: Serialize,
    S: KeyValueStore + ?Sized,
{
    let text = serde_json::to_string(value)?;
    store.save(key, &text)
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn load(&self, key: &str) -> anyhow::Result<Option<String>> {
        (**self).load(key)
    }

    fn save(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        (**self).save(key, value)
    }

    fn save_many(&mut self, entries: &[(String, String)]) -> anyhow::Result<()> {
        (**self).save_many(entries)
    }
}

/// Process-local store, used for ephemeral workspaces and tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn key_layout() {
        assert_eq!(
            storage_key("5A", "Математика", Purpose::Grades),
            "5A-Математика-grades"
        );
        assert_eq!(
            storage_key("5A", "Математика", Purpose::Students),
            "5A-Математика-students"
        );
        assert_eq!(
            storage_key("10B", "Английский язык", Purpose::FinalGrades),
            "10B-Английский язык-final-grades"
        );
    }

    #[test]
    fn load_json_degrades_on_garbage() {
        let mut store = MemoryStore::new();
        store.save("k", "{not json").expect("save");
        let v: Option<Vec<String>> = load_json(&store, "k");
        assert!(v.is_none());

        store.save("k", r#"{"a":"b"}"#).expect("save");
        let v: Option<Vec<String>> = load_json(&store, "k");
        assert!(v.is_none(), "wrong shape falls back too");

        let v: Option<BTreeMap<String, String>> = load_json(&store, "k");
        assert_eq!(v.expect("map").get("a").map(String::as_str), Some("b"));
    }

    #[test]
    fn save_many_writes_everything() {
        let mut store = MemoryStore::new();
        store
            .save_many(&[
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "2".to_string()),
            ])
            .expect("save_many");
        assert_eq!(store.len(), 2);
        assert_eq!(store.load("b").expect("load").as_deref(), Some("2"));
        assert_eq!(store.load("c").expect("load"), None);
    }
}
