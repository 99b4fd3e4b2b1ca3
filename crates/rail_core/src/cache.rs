//! Single-file key-value store shared by every reporter process of a test
//! session.
//!
//! The whole mapping is serialized to one JSON object and rewritten after
//! each `store`. There is no locking between processes: when two of them
//! write at the same time the file holds whichever write finished last.

use anyhow::{Result, anyhow};
use rail_config::{CacheConfig, ReloadPolicy};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fs::{self, create_dir_all};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

#[derive(Debug)]
pub struct Cache {
    path: PathBuf,
    policy: ReloadPolicy,
    data: Option<Map<String, Value>>,
}

impl Cache {
    pub fn new<P: Into<PathBuf>>(path: P, policy: ReloadPolicy) -> Self {
        Self {
            path: path.into(),
            policy,
            data: None,
        }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.path.clone(), config.reload)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn policy(&self) -> ReloadPolicy {
        self.policy
    }

    fn read_file(&self) -> Map<String, Value> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("cache file {} does not exist yet", self.path.display());
                return Map::new();
            }
            Err(e) => {
                warn!("unable to read cache file {}: {e}", self.path.display());
                return Map::new();
            }
        };

        if content.trim().is_empty() {
            return Map::new();
        }

        match serde_json::from_str::<Map<String, Value>>(&content) {
            Ok(data) => {
                debug!("cache file loaded with content {content}");
                data
            }
            Err(e) => {
                warn!(
                    "cache file {} parsing failed, continuing with an empty cache: {e}",
                    self.path.display()
                );
                Map::new()
            }
        }
    }

    fn load(&mut self) -> &mut Map<String, Value> {
        if self.data.is_none() || self.policy == ReloadPolicy::EveryAccess {
            self.data = Some(self.read_file());
        }
        self.data.get_or_insert_with(Map::new)
    }

    fn persist(&self, content: &str) -> Result<()> {
        let parent = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        create_dir_all(parent)?;

        // one temp file per write, sibling processes share the directory
        let mut tmp = NamedTempFile::new_in(parent).map_err(|e| {
            anyhow!("unable to create temp cache file in {}: {e}", parent.display())
        })?;
        tmp.write_all(content.as_bytes())
            .map_err(|e| anyhow!("unable to write temp cache file: {e}"))?;
        tmp.persist(&self.path)
            .map_err(|e| anyhow!("unable to replace cache file {}: {e}", self.path.display()))?;
        Ok(())
    }

    pub fn store<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        let value = serde_json::to_value(value)?;
        debug!("storing cache {key}: {value}");
        let data = self.load();
        data.insert(key.to_owned(), value);
        let content = serde_json::to_string(&*data)?;
        self.persist(&content)
    }

    pub fn retrieve<T: DeserializeOwned>(&mut self, key: &str) -> Option<T> {
        let value = self.load().get(key).cloned();
        debug!("loading from cache {key}: {value:?}");

        match serde_json::from_value(value?) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("cached value for {key} has an unexpected shape: {e}");
                None
            }
        }
    }

    pub fn purge(&mut self) {
        match fs::remove_file(&self.path) {
            Ok(()) => debug!("removed cache file {}", self.path.display()),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!("unable to remove cache file {}: {e}", self.path.display()),
        }
        self.data = Some(Map::new());
        debug!("clearing cache");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::CapturedLogs;
    use std::thread;
    use tempfile::TempDir;

    fn cache_in(dir: &TempDir, policy: ReloadPolicy) -> Cache {
        Cache::new(dir.path().join("testrail-cache.txt"), policy)
    }

    #[test]
    fn retrieve_after_store_returns_value() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = cache_in(&dir, ReloadPolicy::EveryAccess);

        cache.store("runId", &42u64).unwrap();
        cache.store("caseIds", &vec![1u64, 2, 3]).unwrap();

        assert_eq!(cache.retrieve::<u64>("runId"), Some(42));
        assert_eq!(cache.retrieve::<Vec<u64>>("caseIds"), Some(vec![1, 2, 3]));
    }

    #[test]
    fn retrieve_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = cache_in(&dir, ReloadPolicy::EveryAccess);

        assert_eq!(cache.retrieve::<u64>("runId"), None);
        assert!(!cache.path().exists());
    }

    #[test]
    fn store_writes_flat_json_object() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = cache_in(&dir, ReloadPolicy::EveryAccess);

        cache.store("runId", &7u64).unwrap();

        let content = fs::read_to_string(cache.path()).unwrap();
        assert_eq!(content, r#"{"runId":7}"#);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn purge_removes_file_and_values() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = cache_in(&dir, ReloadPolicy::Once);

        cache.store("runId", &42u64).unwrap();
        cache.purge();

        assert_eq!(cache.retrieve::<u64>("runId"), None);
        assert!(!cache.path().exists());
    }

    #[test]
    fn purge_without_file_is_harmless() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = cache_in(&dir, ReloadPolicy::EveryAccess);

        cache.purge();
        cache.purge();

        assert_eq!(cache.retrieve::<u64>("runId"), None);
    }

    #[test]
    fn malformed_file_is_treated_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = cache_in(&dir, ReloadPolicy::EveryAccess);
        fs::write(cache.path(), "{not json").unwrap();
        let logs = CapturedLogs::default();

        let value = logs.capture(|| cache.retrieve::<u64>("runId"));

        assert_eq!(value, None);
        assert_eq!(logs.warnings().len(), 1);
    }

    #[test]
    fn truncated_and_empty_files_are_treated_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = cache_in(&dir, ReloadPolicy::EveryAccess);

        fs::write(cache.path(), "").unwrap();
        assert_eq!(cache.retrieve::<u64>("runId"), None);

        fs::write(cache.path(), r#"{"runId": 4"#).unwrap();
        assert_eq!(cache.retrieve::<u64>("runId"), None);

        cache.store("runId", &5u64).unwrap();
        assert_eq!(cache.retrieve::<u64>("runId"), Some(5));
    }

    #[test]
    fn every_access_policy_sees_sibling_writes() {
        let dir = tempfile::tempdir().unwrap();
        let mut first = cache_in(&dir, ReloadPolicy::EveryAccess);
        let mut second = cache_in(&dir, ReloadPolicy::EveryAccess);

        assert_eq!(first.retrieve::<u64>("runId"), None);
        second.store("runId", &9u64).unwrap();

        assert_eq!(first.retrieve::<u64>("runId"), Some(9));
    }

    #[test]
    fn every_access_policy_keeps_sibling_keys_on_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut first = cache_in(&dir, ReloadPolicy::EveryAccess);
        let mut second = cache_in(&dir, ReloadPolicy::EveryAccess);

        first.store("caseIds", &vec![1u64]).unwrap();
        second.store("runId", &3u64).unwrap();
        first.store("other", "value").unwrap();

        assert_eq!(second.retrieve::<u64>("runId"), Some(3));
        assert_eq!(second.retrieve::<Vec<u64>>("caseIds"), Some(vec![1]));
    }

    #[test]
    fn once_policy_keeps_first_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut first = cache_in(&dir, ReloadPolicy::Once);
        let mut second = cache_in(&dir, ReloadPolicy::Once);

        assert_eq!(first.retrieve::<u64>("runId"), None);
        second.store("runId", &9u64).unwrap();

        assert_eq!(first.retrieve::<u64>("runId"), None);
        assert_eq!(second.retrieve::<u64>("runId"), Some(9));
    }

    #[test]
    fn value_with_unexpected_shape_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = cache_in(&dir, ReloadPolicy::EveryAccess);

        cache.store("runId", "not a number").unwrap();

        assert_eq!(cache.retrieve::<u64>("runId"), None);
        assert_eq!(
            cache.retrieve::<String>("runId"),
            Some("not a number".to_owned())
        );
    }

    #[test]
    fn concurrent_stores_from_sibling_caches_all_succeed() {
        let dir = tempfile::tempdir().unwrap();

        let failures: usize = thread::scope(|scope| {
            let workers: Vec<_> = (0..8u64)
                .map(|worker| {
                    let mut cache = cache_in(&dir, ReloadPolicy::EveryAccess);
                    scope.spawn(move || {
                        (0..100u64)
                            .filter(|i| cache.store(&format!("worker{worker}"), i).is_err())
                            .count()
                    })
                })
                .collect();
            workers.into_iter().map(|w| w.join().unwrap()).sum()
        });

        assert_eq!(failures, 0);
        let content = fs::read_to_string(dir.path().join("testrail-cache.txt")).unwrap();
        let data: Map<String, Value> = serde_json::from_str(&content).unwrap();
        assert!(!data.is_empty());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn store_creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = Cache::new(
            dir.path().join("nested").join("cache.json"),
            ReloadPolicy::EveryAccess,
        );

        cache.store("runId", &1u64).unwrap();

        assert!(cache.path().is_file());
    }
}
