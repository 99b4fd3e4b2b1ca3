#![allow(dead_code)]

use rail_config::{ReloadPolicy, RunConfig};
use rail_core::cache::Cache;
use rail_http::RunClient;
use rail_utils::sync::IntoArc;
use std::path::PathBuf;
use tempfile::TempDir;
use tokio::runtime::Runtime;
use wiremock::{Match, Mock, MockServer, Request};

pub const PROJECT_ID: u64 = 1;
pub const SUITE_ID: u64 = 2;
pub const USERNAME: &str = "bot@example.com";
pub const PASSWORD: &str = "api-key";

/// Matches a TestRail API call, whose route lives in the query string:
/// `/index.php?/api/v2/<endpoint>`.
pub struct ApiEndpoint(String);

impl Match for ApiEndpoint {
    fn matches(&self, request: &Request) -> bool {
        request.url.path() == "/index.php" && request.url.query() == Some(self.0.as_str())
    }
}

pub fn endpoint(route: &str) -> ApiEndpoint {
    ApiEndpoint(format!("/api/v2/{route}"))
}

/// A mock TestRail server driven from synchronous tests.
pub struct MockApi {
    pub server: MockServer,
    runtime: Runtime,
}

impl MockApi {
    pub fn start() -> Self {
        let runtime = Runtime::new().unwrap();
        let server = runtime.block_on(MockServer::start());
        Self { server, runtime }
    }

    pub fn mount(&self, mock: Mock) {
        self.runtime.block_on(mock.mount(&self.server));
    }

    pub fn verify(&self) {
        self.runtime.block_on(self.server.verify());
    }

    pub fn requests(&self) -> Vec<Request> {
        self.runtime
            .block_on(self.server.received_requests())
            .unwrap_or_default()
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    pub fn config(&self) -> RunConfig {
        let mut config = RunConfig::new(&self.uri(), PROJECT_ID, USERNAME, PASSWORD);
        config.suite_id = Some(SUITE_ID);
        config
    }
}

pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn cache_path(&self) -> PathBuf {
        self.dir.path().join("testrail-cache.txt")
    }

    pub fn cache(&self) -> Cache {
        Cache::new(self.cache_path(), ReloadPolicy::EveryAccess)
    }

    pub fn screenshots(&self) -> PathBuf {
        self.dir.path().join("screenshots")
    }

    pub fn client(&self, mut config: RunConfig) -> RunClient {
        config.screenshots = self.screenshots();
        RunClient::new(config.into_arc(), self.cache())
    }
}
