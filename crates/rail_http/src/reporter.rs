use crate::client::RunClient;
use rail_core::notifier::Notifier;
use rail_models::{PublishedResult, ResultRecord};
use std::mem;
use tracing::{debug, info, warn};

#[derive(Debug, Default, Clone, Copy)]
pub struct FinishOptions {
    pub upload_screenshots: bool,
    pub close: bool,
}

/// Drives a [`RunClient`] from the lifecycle hooks of a test runner: a run
/// is created when the session starts, results are buffered as tests end and
/// published in one batch when the session finishes.
pub struct Reporter {
    client: RunClient,
    notifier: Notifier,
    channel: Option<String>,
    results: Vec<ResultRecord>,
}

impl Reporter {
    pub fn new(client: RunClient, notifier: Notifier) -> Self {
        Self {
            client,
            notifier,
            channel: None,
            results: vec![],
        }
    }

    pub fn channel(mut self, channel: Option<&str>) -> Self {
        self.channel = channel.map(|c| c.to_owned());
        self
    }

    pub fn client(&mut self) -> &mut RunClient {
        &mut self.client
    }

    pub fn pending(&self) -> &[ResultRecord] {
        &self.results
    }

    pub fn begin(&mut self, name: &str, description: &str) -> Option<u64> {
        if let Some(run_id) = self.client.config().run_id {
            info!("reporting to existing test run {run_id}");
            return Some(run_id);
        }

        let Some(suite_id) = self.client.config().suite_id else {
            warn!("suite id is not set, cannot create test run {name}");
            return None;
        };

        self.client.create_run(name, description, suite_id)
    }

    pub fn record(&mut self, result: ResultRecord) {
        debug!("recording {} as {}", result.label(), result.status_id);
        if result.status_id.is_failure() {
            let text = format!("{} failed", result.label());
            self.notifier.notify(&text, self.channel.as_deref());
        }
        self.results.push(result);
    }

    pub fn finish(&mut self, options: FinishOptions) -> Option<Vec<PublishedResult>> {
        let results = mem::take(&mut self.results);
        let published = self.client.publish_results(&results);

        if options.upload_screenshots {
            if let Some(published) = &published {
                self.upload_failure_screenshots(&results, published);
            }
        }

        if options.close {
            self.client.close_run();
        }

        published
    }

    fn upload_failure_screenshots(&self, results: &[ResultRecord], published: &[PublishedResult]) {
        // the response lists results in request order, and only records
        // with a case id were sent
        let sent = results.iter().filter(|r| r.case_id.is_some());
        if sent.clone().count() != published.len() {
            warn!(
                "published {} results but the server returned {}, skipping screenshots",
                sent.count(),
                published.len()
            );
            return;
        }

        for (record, result) in sent.zip(published) {
            if let (true, Some(case_id)) = (record.status_id.is_failure(), record.case_id) {
                let uploaded = self.client.upload_screenshots(case_id, result.id);
                debug!("uploaded {uploaded} screenshots for C{case_id}");
            }
        }
    }
}
