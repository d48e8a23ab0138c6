use std::path::PathBuf;

use serde::Deserialize;

use crate::session::{Session, DEFAULT_VIEW};
use crate::store::Tracker;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

pub struct AppState {
    pub workspace: Option<PathBuf>,
    pub tracker: Option<Tracker>,
    pub session: Option<Session>,
    pub view: String,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            workspace: None,
            tracker: None,
            session: None,
            view: DEFAULT_VIEW.to_string(),
        }
    }
}
