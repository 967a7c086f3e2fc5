//! JSON file storage implementation.
//!
//! Stores each job card as a JSON file under `job_cards/` and keeps a small
//! per-card meta marker (version + updated_at) under `meta/job_cards/`.

use std::path::{Path, PathBuf};
use depot_core::{JobCard, JobCardFilter, JobCardId};
use super::{JobCardStore, Result};
use tokio::fs;
use tracing::{debug, warn};

/// File-based JSON storage backend.
pub struct JsonStorage {
    root: PathBuf,
}

impl JsonStorage {
    /// Create storage, creating the data and meta directories if needed.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();

        fs::create_dir_all(root.join("job_cards")).await?;
        fs::create_dir_all(root.join("meta").join("job_cards")).await?;

        Ok(Self { root })
    }

    /// Storage root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn job_card_path(&self, id: JobCardId) -> PathBuf {
        self.root.join("job_cards").join(format!("{}.json", id))
    }

    fn meta_path(&self, id: JobCardId) -> PathBuf {
        self.root.join("meta").join("job_cards").join(format!("{}.meta.json", id))
    }

    /// Read and increment the per-card version, return the new version.
    async fn bump_version(&self, id: JobCardId) -> Result<u64> {
        let path = self.meta_path(id);
        let mut version = 0u64;
        if let Ok(s) = fs::read_to_string(&path).await {
            if let Ok(json) = serde_json::from_str::<serde_json::Value>(&s) {
                if let Some(v) = json.get("version").and_then(|v| v.as_u64()) {
                    version = v;
                }
            }
        }
        version += 1;
        let meta = serde_json::json!({"version": version, "updated_at": chrono::Utc::now()});
        fs::write(&path, serde_json::to_string_pretty(&meta)?.as_bytes()).await?;
        Ok(version)
    }
}

#[async_trait::async_trait]
impl JobCardStore for JsonStorage {
    async fn save_job_card(&mut self, card: &JobCard) -> Result<()> {
        let path = self.job_card_path(card.id);
        let json = serde_json::to_string_pretty(card)?;
        fs::write(&path, json.as_bytes()).await?;

        let version = self.bump_version(card.id).await?;
        debug!("Saved job card {} (v{})", card.job_card_no, version);
        Ok(())
    }

    async fn load_job_card(&self, id: JobCardId) -> Result<Option<JobCard>> {
        read_json(&self.job_card_path(id)).await
    }

    async fn list_job_cards(&self, filter: &JobCardFilter) -> Result<Vec<JobCard>> {
        let mut cards: Vec<JobCard> = list_dir(&self.root.join("job_cards"))
            .await?
            .into_iter()
            .filter(|c: &JobCard| filter.matches(c))
            .collect();
        cards.sort_by(|a, b| a.reported_at.cmp(&b.reported_at).then(a.id.cmp(&b.id)));
        Ok(cards)
    }

    async fn delete_job_card(&mut self, id: JobCardId) -> Result<()> {
        for path in [self.job_card_path(id), self.meta_path(id)] {
            fs::remove_file(path).await.or_else(|e| {
                if e.kind() == std::io::ErrorKind::NotFound { Ok(()) } else { Err(e) }
            })?;
        }
        Ok(())
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match fs::read_to_string(path).await {
        Ok(json) => {
            let value = serde_json::from_str(&json)?;
            Ok(Some(value))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

async fn list_dir<T: serde::de::DeserializeOwned>(dir: &Path) -> Result<Vec<T>> {
    let mut items = Vec::new();
    let mut rd = fs::read_dir(dir).await?;
    while let Some(entry) = rd.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) != Some("json") {
            continue;
        }
        match read_json(&path).await {
            Ok(Some(item)) => items.push(item),
            Ok(None) => {}
            Err(e) => warn!("Skipping unreadable job card {}: {}", path.display(), e),
        }
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use depot_core::{DelayDuration, JobCardStatus, MaintenanceType};

    fn card(no: &str, day: u32) -> JobCard {
        JobCard::new(no, "TS03", "TC2", "Brakes", MaintenanceType::Corrective)
            .with_delay(DelayDuration::ThreeMinutes)
            .reported_at(Utc.with_ymd_and_hms(2024, 6, day, 9, 0, 0).unwrap())
    }

    #[tokio::test]
    async fn test_roundtrip_and_versioning() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = JsonStorage::new(dir.path()).await.unwrap();

        let mut jc = card("JC-7", 3);
        storage.save_job_card(&jc).await.unwrap();
        jc.complete(4.0, None).unwrap();
        storage.save_job_card(&jc).await.unwrap();

        let loaded = storage.load_job_card(jc.id).await.unwrap().unwrap();
        assert_eq!(loaded, jc);
        assert_eq!(loaded.status, JobCardStatus::Completed);

        let meta = std::fs::read_to_string(storage.meta_path(jc.id)).unwrap();
        let meta: serde_json::Value = serde_json::from_str(&meta).unwrap();
        assert_eq!(meta["version"], 2);
    }

    #[tokio::test]
    async fn test_listing_sorted_by_report_time() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = JsonStorage::new(dir.path()).await.unwrap();
        for (no, day) in [("JC-3", 20), ("JC-1", 1), ("JC-2", 10)] {
            storage.save_job_card(&card(no, day)).await.unwrap();
        }

        let all = storage.list_job_cards(&JobCardFilter::default()).await.unwrap();
        let numbers: Vec<_> = all.iter().map(|c| c.job_card_no.as_str()).collect();
        assert_eq!(numbers, vec!["JC-1", "JC-2", "JC-3"]);
    }

    #[tokio::test]
    async fn test_unreadable_file_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = JsonStorage::new(dir.path()).await.unwrap();
        storage.save_job_card(&card("JC-1", 1)).await.unwrap();
        std::fs::write(dir.path().join("job_cards").join("broken.json"), b"{ not json").unwrap();

        let all = storage.list_job_cards(&JobCardFilter::default()).await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_category_label_keeps_card() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = JsonStorage::new(dir.path()).await.unwrap();
        storage.save_job_card(&card("JC-1", 1)).await.unwrap();
        std::fs::write(
            dir.path().join("job_cards").join("01ARZ3NDEKTSV4RRFFQ69G5FAV.json"),
            r#"{
                "id": "01ARZ3NDEKTSV4RRFFQ69G5FAV",
                "job_card_no": "JC-9",
                "maintenance_type": "CM",
                "status": "closed",
                "withdraw": true,
                "failure_category": "software error",
                "duration_of_repair": 4.0,
                "reported_at": "2024-06-05T09:00:00Z"
            }"#,
        )
        .unwrap();

        let all = storage.list_job_cards(&JobCardFilter::default()).await.unwrap();
        assert_eq!(all.len(), 2);
        let drifted = &all[1];
        assert_eq!(drifted.job_card_no, "JC-9");
        assert!(drifted.withdraw);
        assert_eq!(drifted.failure_category, None);
        assert_eq!(drifted.duration_of_repair, Some(4.0));
    }

    #[tokio::test]
    async fn test_delete_missing_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = JsonStorage::new(dir.path()).await.unwrap();
        let jc = card("JC-1", 1);
        storage.save_job_card(&jc).await.unwrap();
        storage.delete_job_card(jc.id).await.unwrap();
        storage.delete_job_card(jc.id).await.unwrap();
        assert!(storage.load_job_card(jc.id).await.unwrap().is_none());
    }
}
