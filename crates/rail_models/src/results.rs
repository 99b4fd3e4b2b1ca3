use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::{Display, Formatter, Result as FmtResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Status {
    Passed,
    Blocked,
    Untested,
    Retest,
    Failed,
}

impl Status {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed)
    }
}

impl From<Status> for u8 {
    fn from(status: Status) -> Self {
        match status {
            Status::Passed => 1,
            Status::Blocked => 2,
            Status::Untested => 3,
            Status::Retest => 4,
            Status::Failed => 5,
        }
    }
}

impl TryFrom<u8> for Status {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Passed),
            2 => Ok(Self::Blocked),
            3 => Ok(Self::Untested),
            4 => Ok(Self::Retest),
            5 => Ok(Self::Failed),
            v => Err(format!("unknown status id {v}")),
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Passed => write!(f, "passed"),
            Self::Blocked => write!(f, "blocked"),
            Self::Untested => write!(f, "untested"),
            Self::Retest => write!(f, "retest"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Outcome of one case, in the shape expected by `add_results_for_cases`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_id: Option<u64>,

    pub status_id: Status,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elapsed: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defects: Option<String>,
}

impl ResultRecord {
    pub fn new(case_id: u64, status_id: Status) -> Self {
        Self {
            case_id: Some(case_id),
            status_id,
            elapsed: None,
            comment: None,
            version: None,
            defects: None,
        }
    }

    pub fn comment(mut self, comment: &str) -> Self {
        self.comment = Some(comment.to_owned());
        self
    }

    /// Elapsed time in the `1m 5s` notation, seconds rounded up to at least 1s.
    pub fn elapsed_millis(mut self, millis: u64) -> Self {
        let secs = millis.div_ceil(1000).max(1);
        let elapsed = if secs >= 60 {
            format!("{}m {}s", secs / 60, secs % 60)
        } else {
            format!("{secs}s")
        };
        self.elapsed = Some(elapsed);
        self
    }

    pub fn label(&self) -> String {
        let case = self
            .case_id
            .map(|id| format!("C{id}"))
            .unwrap_or_else(|| "unknown case".to_owned());
        match self.comment.as_deref().and_then(|c| c.lines().next()) {
            Some(line) if !line.trim().is_empty() => format!("{case} ({})", line.trim()),
            _ => case,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AddResultsRequest<'a> {
    pub results: &'a [ResultRecord],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishedResult {
    pub id: u64,

    #[serde(default)]
    pub test_id: Option<u64>,

    #[serde(default)]
    pub status_id: Option<u8>,

    #[serde(default)]
    pub comment: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttachmentResponse {
    pub attachment_id: Value,
}
