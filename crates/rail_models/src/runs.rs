use crate::CaseSelection;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddRunRequest {
    pub suite_id: u64,
    pub name: String,
    pub description: String,
    pub include_all: bool,
    pub case_ids: Vec<u64>,
}

impl AddRunRequest {
    pub fn new(suite_id: u64, name: &str, description: &str, selection: &CaseSelection) -> Self {
        Self {
            suite_id,
            name: name.to_owned(),
            description: description.to_owned(),
            include_all: selection.include_all(),
            case_ids: selection.case_ids().to_vec(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResponse {
    pub id: u64,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub is_completed: Option<bool>,
}
