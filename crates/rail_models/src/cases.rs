use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseEntry {
    pub id: u64,

    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct PageLinks {
    #[serde(default)]
    pub next: Option<String>,

    #[serde(default)]
    pub prev: Option<String>,
}

/// A single response of the case listing endpoint. Newer servers wrap the
/// cases in a paginated object, older ones return a bare array.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CasesPage {
    Bare(Vec<CaseEntry>),
    Paginated {
        #[serde(default)]
        cases: Vec<CaseEntry>,

        #[serde(default, rename = "_links")]
        links: PageLinks,
    },
}

impl CasesPage {
    pub fn ids(&self) -> impl Iterator<Item = u64> + '_ {
        let cases = match self {
            Self::Bare(cases) | Self::Paginated { cases, .. } => cases,
        };
        cases.iter().map(|c| c.id)
    }

    pub fn next(&self) -> Option<&str> {
        match self {
            Self::Paginated { links, .. } => links.next.as_deref().filter(|n| !n.is_empty()),
            Self::Bare(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseSelection {
    All,
    Explicit(Vec<u64>),
}

impl CaseSelection {
    pub fn include_all(&self) -> bool {
        matches!(self, Self::All)
    }

    pub fn case_ids(&self) -> &[u64] {
        match self {
            Self::All => &[],
            Self::Explicit(ids) => ids,
        }
    }
}
