use anyhow::{Result, bail};
use rail_config::RunConfig;
use rail_config::definitions::{CACHE_KEY_CASE_IDS, CACHE_KEY_RUN_ID};
use rail_core::cache::Cache;
use rail_core::screenshots::find_screenshots;
use rail_models::{
    AddResultsRequest, AddRunRequest, AttachmentResponse, CaseSelection, CasesPage,
    PublishedResult, ResultRecord, RunResponse,
};
use rail_utils::request::Request;
use rail_utils::sync::block_on;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Synchronous client for the TestRail run endpoints.
///
/// Every public operation blocks until its requests have completed. Network
/// and authentication failures are logged and turned into an empty or `None`
/// result so that a flaky reporting call never fails the test session.
///
/// The run id is shared with sibling processes through the [`Cache`]: it is
/// written as soon as a run is created, and `close_run`/`delete_run` always
/// read it back from there.
#[derive(Debug)]
pub struct RunClient {
    config: Arc<RunConfig>,
    base_url: String,
    cache: Cache,
    run_id: Option<u64>,
}

impl RunClient {
    pub fn new(config: Arc<RunConfig>, cache: Cache) -> Self {
        debug!("init testrail client for {}", config.host);
        let mut client = Self {
            base_url: config.api_base_url(),
            config,
            cache,
            run_id: None,
        };
        if let Some(run_id) = client.config.run_id {
            client.run_id = Some(run_id);
            client.remember_run(run_id);
        }
        client
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn run_id(&self) -> Option<u64> {
        self.run_id
    }

    pub fn cache_mut(&mut self) -> &mut Cache {
        &mut self.cache
    }

    fn remember_run(&mut self, run_id: u64) {
        if let Err(e) = self.cache.store(CACHE_KEY_RUN_ID, &run_id) {
            warn!("unable to cache run id {run_id}: {e}");
        }
    }

    fn cached_run_id(&mut self) -> Option<u64> {
        let run_id = self.cache.retrieve::<u64>(CACHE_KEY_RUN_ID);
        if run_id.is_some() {
            self.run_id = run_id;
        }
        run_id
    }

    fn resolve_run_id(&mut self) -> Option<u64> {
        self.run_id.or_else(|| self.cached_run_id())
    }

    fn get(&self, url: &str) -> Request {
        Request::get(url).basic_auth(&self.config.username, &self.config.password)
    }

    fn post(&self, url: &str) -> Request {
        Request::post(url).basic_auth(&self.config.username, &self.config.password)
    }

    fn cases_url(&self, suite_id: u64) -> String {
        let mut url = format!(
            "{}/get_cases/{}&suite_id={suite_id}",
            self.base_url, self.config.project_id
        );
        if let Some(group_id) = self.config.group_id {
            url.push_str(&format!("&section_id={group_id}"));
        }
        if let Some(filter) = &self.config.filter {
            url.push_str(&format!("&filter={filter}"));
        }
        url
    }

    async fn list_cases_inner(&self, suite_id: u64) -> Result<Vec<u64>> {
        let mut url = self.cases_url(suite_id);
        let mut visited = HashSet::new();
        let mut ids = vec![];

        loop {
            if !visited.insert(url.clone()) {
                bail!("case listing links back to an already fetched page {url}");
            }
            let page: CasesPage = self.get(&url).json().await?;
            ids.extend(page.ids());
            match page.next().map(|next| self.config.page_url(next)) {
                Some(next) => url = next,
                None => break,
            }
        }

        Ok(ids)
    }

    /// Lists the case ids of a suite in server order, following every page.
    ///
    /// A failed listing is logged and reported as an empty list, so callers
    /// can't tell "no cases" from "listing failed".
    pub fn list_cases(&self, suite_id: u64) -> Vec<u64> {
        debug!(
            "calling testrail to get case ids for project {}, suite {suite_id} and group {:?}",
            self.config.project_id, self.config.group_id
        );

        let cases = block_on(|| self.list_cases_inner(suite_id)).unwrap_or_else(|e| {
            error!("unable to list testrail cases: {e}");
            vec![]
        });

        if cases.is_empty() {
            info!(
                "no testrail cases found for project {}, suite {suite_id} and group {:?}",
                self.config.project_id, self.config.group_id
            );
        }

        cases
    }

    fn resolve_selection(&mut self, suite_id: u64) -> CaseSelection {
        if self.config.include_all_in_test_run {
            return CaseSelection::All;
        }

        if let Some(ids) = self.cache.retrieve::<Vec<u64>>(CACHE_KEY_CASE_IDS) {
            debug!("using {} cached case ids", ids.len());
            return CaseSelection::Explicit(ids);
        }

        let ids = self.list_cases(suite_id);
        if !ids.is_empty() {
            if let Err(e) = self.cache.store(CACHE_KEY_CASE_IDS, &ids) {
                warn!("unable to cache case ids: {e}");
            }
        }
        CaseSelection::Explicit(ids)
    }

    async fn add_run_inner(&self, request: &AddRunRequest) -> Result<RunResponse> {
        let url = format!("{}/add_run/{}", self.base_url, self.config.project_id);
        self.post(&url).json_with_data(request).await
    }

    /// Creates a run and caches its id. Returns `None` when the run could
    /// not be created, in which case no run id is recorded.
    pub fn create_run(&mut self, name: &str, description: &str, suite_id: u64) -> Option<u64> {
        let selection = self.resolve_selection(suite_id);
        let request = AddRunRequest::new(suite_id, name, description, &selection);

        match block_on(|| self.add_run_inner(&request)) {
            Ok(run) => {
                info!("created test run {} ({name})", run.id);
                self.run_id = Some(run.id);
                self.remember_run(run.id);
                Some(run.id)
            }
            Err(e) => {
                error!("unable to create test run {name}: {e}");
                None
            }
        }
    }

    /// Sends the whole batch in one request. Records without a case id are
    /// dropped and nothing is sent when there is no run id to attach to.
    pub fn publish_results(&mut self, results: &[ResultRecord]) -> Option<Vec<PublishedResult>> {
        let (results, rejected): (Vec<ResultRecord>, Vec<ResultRecord>) =
            results.iter().cloned().partition(|r| r.case_id.is_some());

        if !rejected.is_empty() {
            warn!("skipping {} results without a case id", rejected.len());
        }

        if results.is_empty() {
            warn!("no results to publish");
            return None;
        }

        let Some(run_id) = self.resolve_run_id() else {
            let case_ids = results
                .iter()
                .filter_map(|r| r.case_id)
                .map(|id| id.to_string())
                .collect::<Vec<String>>()
                .join(", ");
            warn!("run id is not set for case ids: {case_ids}");
            return None;
        };

        let url = format!("{}/add_results_for_cases/{run_id}", self.base_url);
        let body = AddResultsRequest { results: &results };
        let response: Result<Vec<PublishedResult>> =
            block_on(|| self.post(&url).json_with_data(&body));

        match response {
            Ok(published) => {
                info!("published {} results to test run {run_id}", published.len());
                Some(published)
            }
            Err(e) => {
                error!("unable to publish results to test run {run_id}: {e}");
                None
            }
        }
    }

    async fn upload_attachment_inner(
        &self,
        result_id: u64,
        path: &Path,
    ) -> Result<AttachmentResponse> {
        let url = format!("{}/add_attachment_to_result/{result_id}", self.base_url);
        self.post(&url).json_with_file("attachment", path).await
    }

    pub fn upload_attachment(&self, result_id: u64, path: &Path) -> bool {
        info!(
            "uploading attachment {} for result {result_id}",
            path.display()
        );

        match block_on(|| self.upload_attachment_inner(result_id, path)) {
            Ok(response) => {
                debug!("uploaded attachment {}", response.attachment_id);
                true
            }
            Err(e) => {
                error!("unable to upload attachment {}: {e}", path.display());
                false
            }
        }
    }

    /// Attaches every failure screenshot of `case_id` to the result and
    /// returns how many were uploaded.
    pub fn upload_screenshots(&self, case_id: u64, result_id: u64) -> usize {
        let screenshots = match find_screenshots(&self.config.screenshots, case_id) {
            Ok(screenshots) => screenshots,
            Err(e) => {
                warn!("{e}");
                return 0;
            }
        };

        let mut uploaded = 0;
        for path in &screenshots {
            if self.upload_attachment(result_id, path) {
                uploaded += 1;
            }
        }
        uploaded
    }

    fn finish_run(&mut self, action: &str) -> bool {
        // the run is usually closed by another process than the one that
        // created it, so the cache is the authority here
        let Some(run_id) = self.cached_run_id() else {
            warn!("run id is not set, cannot {action} test run");
            return false;
        };

        let url = format!("{}/{action}_run/{run_id}", self.base_url);
        let response = block_on(|| {
            self.post(&url)
                .header("Content-Type", "application/json")
                .text()
        });

        match response {
            Ok(_) => {
                info!("test run {run_id} {action}d successfully");
                true
            }
            Err(e) => {
                error!("unable to {action} test run {run_id}: {e}");
                false
            }
        }
    }

    pub fn close_run(&mut self) -> bool {
        self.finish_run("close")
    }

    pub fn delete_run(&mut self) -> bool {
        self.finish_run("delete")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rail_config::ReloadPolicy;
    use rail_utils::sync::IntoArc;

    fn client_with(config: RunConfig) -> (RunClient, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let cache = Cache::new(dir.path().join("cache.json"), ReloadPolicy::EveryAccess);
        (RunClient::new(config.into_arc(), cache), dir)
    }

    #[test]
    fn cases_url_includes_optional_filters() {
        let mut config = RunConfig::new("https://acme.testrail.io", 3, "bot", "secret");
        config.group_id = Some(8);
        config.filter = Some("login".to_owned());
        let (client, _dir) = client_with(config);

        assert_eq!(
            client.cases_url(5),
            "https://acme.testrail.io/index.php?/api/v2/get_cases/3&suite_id=5&section_id=8&filter=login"
        );
    }

    #[test]
    fn explicit_run_id_is_cached_on_creation() {
        let mut config = RunConfig::new("https://acme.testrail.io", 3, "bot", "secret");
        config.run_id = Some(77);
        let (mut client, _dir) = client_with(config);

        assert_eq!(client.run_id(), Some(77));
        assert_eq!(client.cache_mut().retrieve::<u64>(CACHE_KEY_RUN_ID), Some(77));
    }

    #[test]
    fn include_all_selection_skips_listing() {
        let config = RunConfig::new("http://127.0.0.1:9", 3, "bot", "secret");
        let (mut client, _dir) = client_with(config);

        assert_eq!(client.resolve_selection(1), CaseSelection::All);
    }

    #[test]
    fn cached_case_ids_are_reused() {
        let mut config = RunConfig::new("http://127.0.0.1:9", 3, "bot", "secret");
        config.include_all_in_test_run = false;
        let (mut client, _dir) = client_with(config);
        client.cache_mut().store(CACHE_KEY_CASE_IDS, &vec![4u64, 2]).unwrap();

        assert_eq!(
            client.resolve_selection(1),
            CaseSelection::Explicit(vec![4, 2])
        );
    }
}
