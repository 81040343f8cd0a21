//! JSON File Store
//!
//! Keeps the collection as a pretty-printed JSON array on disk. The token is
//! the file's modification time paired with its length.

use std::io::ErrorKind;
use std::path::PathBuf;
use std::time::UNIX_EPOCH;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use super::{next_id, FreshnessToken, RecordStore, StoreResult};
use crate::models::{NewRecord, Record};

/// Record store backed by a single JSON file.
///
/// A missing file reads as an empty collection; the first append creates it.
/// Appends are serialized and replace the file by rename, so a concurrent
/// load never sees a partially written array.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    async fn read_records(&self) -> StoreResult<Vec<Record>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_records(&self, records: &[Record]) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let body = serde_json::to_vec_pretty(records)?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, body).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl RecordStore for JsonFileStore {
    async fn load(&self) -> StoreResult<(Vec<Record>, FreshnessToken)> {
        // Probe first: a write landing between probe and read only makes the
        // token older than the data, which triggers one extra reload later.
        let token = self.current_token().await?;
        let records = self.read_records().await?;
        debug!(path = %self.path.display(), count = records.len(), "Loaded records from file");
        Ok((records, token))
    }

    async fn current_token(&self) -> StoreResult<FreshnessToken> {
        let meta = match tokio::fs::metadata(&self.path).await {
            Ok(meta) => meta,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(FreshnessToken::zero()),
            Err(e) => return Err(e.into()),
        };

        let modified = meta
            .modified()?
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);

        Ok(FreshnessToken::new(modified, meta.len()))
    }

    async fn append(&self, record: NewRecord) -> StoreResult<(i64, FreshnessToken)> {
        let _guard = self.write_lock.lock().await;

        let mut records = self.read_records().await?;
        let id = next_id(&records);
        records.push(Record::from_new(id, record));
        self.write_records(&records).await?;

        let token = self.current_token().await?;
        debug!(id, total = records.len(), "Appended record to file");
        Ok((id, token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;

    fn new_record(name: &str) -> NewRecord {
        NewRecord {
            name: name.to_string(),
            category: "Test".to_string(),
            price: 9.5,
        }
    }

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("items.json"));

        let (records, token) = store.load().await.unwrap();
        assert!(records.is_empty());
        assert_eq!(token, FreshnessToken::zero());
    }

    #[tokio::test]
    async fn test_load_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("items.json");
        std::fs::write(
            &path,
            r#"[{"id":1,"name":"Laptop Pro","category":"Electronics","price":999}]"#,
        )
        .unwrap();

        let store = JsonFileStore::new(&path);
        let (records, token) = store.load().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Laptop Pro");
        assert_eq!(token, store.current_token().await.unwrap());
    }

    #[tokio::test]
    async fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("items.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = JsonFileStore::new(&path);
        assert!(matches!(store.load().await, Err(StoreError::Parse(_))));
    }

    #[tokio::test]
    async fn test_append_creates_file_and_bumps_token() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested").join("items.json"));

        let before = store.current_token().await.unwrap();
        let (id, token) = store.append(new_record("Desk")).await.unwrap();
        assert_ne!(token, before);
        assert_eq!(token, store.current_token().await.unwrap());

        let (records, _) = store.load().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, id);
        assert_eq!(records[0].name, "Desk");
    }

    #[tokio::test]
    async fn test_rapid_appends_get_unique_ids_and_new_tokens() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("items.json"));

        let (id1, t1) = store.append(new_record("A")).await.unwrap();
        let (id2, t2) = store.append(new_record("B")).await.unwrap();
        let (id3, t3) = store.append(new_record("C")).await.unwrap();

        assert!(id1 < id2 && id2 < id3);
        assert_ne!(t1, t2);
        assert_ne!(t2, t3);

        let (records, _) = store.load().await.unwrap();
        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["A", "B", "C"]);
    }
}
