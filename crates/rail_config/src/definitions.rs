pub const VERSION: &str = "0.1.0";
pub const TOOL_NAME: &str = "rail";
pub const TOOL_DEFAULT_CONFIG_FILE: &str = "rail.yaml";

pub const API_PATH: &str = "index.php?/api/v2";
pub const API_PAGE_PREFIX: &str = "index.php?";

pub const CACHE_DEFAULT_FILE: &str = "testrail-cache.txt";
pub const CACHE_KEY_RUN_ID: &str = "runId";
pub const CACHE_KEY_CASE_IDS: &str = "caseIds";

pub const DEFAULT_SCREENSHOTS_DIR: &str = "cypress/screenshots";
pub const DEFAULT_RUN_NAME: &str = "Automated test run";
pub const DEFAULT_INCLUDE_ALL_IN_TEST_RUN: bool = true;

pub const ENV_SLACK_URL: &str = "CYPRESS_TESTRAIL_REPORTER_SLACK_URL";
pub const ENV_SLACK_CONTEXT: &str = "CYPRESS_TESTRAIL_REPORTER_SLACK_CONTEXT";
pub const ENV_DEBUG: &str = "DEBUG";

pub fn default_client_config() -> String {
    format!(
        r"testrail:
    host: https://example.testrail.io
    project-id: 1
    suite-id: 1
    username: user@example.com
    password: api-key
    include-all-in-test-run: {DEFAULT_INCLUDE_ALL_IN_TEST_RUN}
    screenshots: {DEFAULT_SCREENSHOTS_DIR}
cache:
    path: {CACHE_DEFAULT_FILE}
    reload: every-access"
    )
}
