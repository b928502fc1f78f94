use crate::journal::JournalSheet;
use crate::store::KeyValueStore;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

pub type Sheet = JournalSheet<Box<dyn KeyValueStore>>;

#[derive(Default)]
pub struct AppState {
    pub workspace: Option<PathBuf>,
    pub journal: Option<Sheet>,
}
