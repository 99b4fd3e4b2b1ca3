use crate::definitions;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RunConfig {
    pub host: String,

    pub project_id: u64,

    #[serde(default)]
    pub suite_id: Option<u64>,

    #[serde(default)]
    pub group_id: Option<u64>,

    pub username: String,

    pub password: String,

    #[serde(default)]
    pub filter: Option<String>,

    #[serde(default = "RunConfig::default_include_all_in_test_run")]
    pub include_all_in_test_run: bool,

    #[serde(default)]
    pub run_id: Option<u64>,

    #[serde(default)]
    pub run_name: Option<String>,

    #[serde(default)]
    pub run_description: Option<String>,

    #[serde(default = "RunConfig::default_screenshots")]
    pub screenshots: PathBuf,
}

impl RunConfig {
    fn default_include_all_in_test_run() -> bool {
        definitions::DEFAULT_INCLUDE_ALL_IN_TEST_RUN
    }

    fn default_screenshots() -> PathBuf {
        PathBuf::from(definitions::DEFAULT_SCREENSHOTS_DIR)
    }

    pub fn new(host: &str, project_id: u64, username: &str, password: &str) -> Self {
        Self {
            host: host.to_owned(),
            project_id,
            suite_id: None,
            group_id: None,
            username: username.to_owned(),
            password: password.to_owned(),
            filter: None,
            include_all_in_test_run: Self::default_include_all_in_test_run(),
            run_id: None,
            run_name: None,
            run_description: None,
            screenshots: Self::default_screenshots(),
        }
    }

    pub fn api_base_url(&self) -> String {
        format!(
            "{}/{}",
            self.host.trim_end_matches('/'),
            definitions::API_PATH
        )
    }

    /// Resolves a `_links.next` value returned by a paginated listing.
    pub fn page_url(&self, next: &str) -> String {
        format!(
            "{}/{}{}",
            self.host.trim_end_matches('/'),
            definitions::API_PAGE_PREFIX,
            next
        )
    }

    pub fn debug_info(&self) {
        debug!("testrail > host: {}", self.host);
        debug!("testrail > project-id: {}", self.project_id);
        debug!("testrail > suite-id: {:?}", self.suite_id);
        debug!("testrail > group-id: {:?}", self.group_id);
        debug!("testrail > username: {}", self.username);
        debug!("testrail > password: ********");
        debug!("testrail > filter: {:?}", self.filter);
        debug!(
            "testrail > include-all-in-test-run: {}",
            self.include_all_in_test_run
        );
        debug!("testrail > run-id: {:?}", self.run_id);
        debug!("testrail > screenshots: {}", self.screenshots.display());
    }
}
