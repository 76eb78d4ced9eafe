use crate::store::atomic_writer::AtomicWriter;
use crate::traits::{PersistenceMetadata, PersistenceStore, StoreSnapshot, FORMAT_VERSION};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use taskboard_core::{BoardError, BoardResult};
use uuid::Uuid;

/// JSON file-based persistence store
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    instance_id: Uuid,
}

/// On-disk wrapper around the document
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonEnvelope {
    pub version: u32,
    pub metadata: PersistenceMetadata,
    pub data: serde_json::Value,
}

impl JsonEnvelope {
    /// Envelope for a file that holds no boards yet.
    pub fn empty(instance_id: Uuid) -> Self {
        Self {
            version: FORMAT_VERSION,
            metadata: PersistenceMetadata::new(FORMAT_VERSION, instance_id),
            data: serde_json::json!({ "boards": [], "columns": [], "cards": [] }),
        }
    }
}

fn serialization(e: serde_json::Error) -> BoardError {
    BoardError::Serialization(e.to_string())
}

impl JsonFileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            instance_id: Uuid::new_v4(),
        }
    }
}

#[async_trait::async_trait]
impl PersistenceStore for JsonFileStore {
    async fn save(&self, mut snapshot: StoreSnapshot) -> BoardResult<PersistenceMetadata> {
        snapshot.metadata.instance_id = self.instance_id;
        snapshot.metadata.saved_at = chrono::Utc::now();

        let data: serde_json::Value =
            serde_json::from_slice(&snapshot.data).map_err(serialization)?;
        let envelope = JsonEnvelope {
            version: FORMAT_VERSION,
            metadata: snapshot.metadata.clone(),
            data,
        };
        let json_bytes = serde_json::to_vec_pretty(&envelope).map_err(serialization)?;

        AtomicWriter::write_atomic(&self.path, &json_bytes).await?;

        tracing::info!(
            "Saved {} bytes to {}",
            json_bytes.len(),
            self.path.display()
        );
        Ok(snapshot.metadata)
    }

    async fn load(&self) -> BoardResult<(StoreSnapshot, PersistenceMetadata)> {
        let file_bytes = AtomicWriter::read_all(&self.path).await?;
        let envelope: JsonEnvelope = serde_json::from_slice(&file_bytes).map_err(serialization)?;

        if envelope.version != FORMAT_VERSION {
            return Err(BoardError::Serialization(format!(
                "Unsupported format version: {}",
                envelope.version
            )));
        }

        let data = serde_json::to_vec(&envelope.data).map_err(serialization)?;
        let snapshot = StoreSnapshot {
            data,
            metadata: envelope.metadata.clone(),
        };

        tracing::debug!(
            "Loaded {} bytes from {}",
            file_bytes.len(),
            self.path.display()
        );
        Ok((snapshot, envelope.metadata))
    }

    async fn exists(&self) -> bool {
        tokio::fs::try_exists(&self.path).await.unwrap_or(false)
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn instance_id(&self) -> Uuid {
        self.instance_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("board.json");
        let store = JsonFileStore::new(&file_path);

        let data = json!({ "boards": [], "columns": [], "cards": [] });
        let snapshot = StoreSnapshot {
            data: serde_json::to_vec(&data).unwrap(),
            metadata: PersistenceMetadata::new(FORMAT_VERSION, Uuid::nil()),
        };

        let metadata = store.save(snapshot).await.unwrap();
        assert_eq!(metadata.instance_id, store.instance_id());

        let (loaded, loaded_metadata) = store.load().await.unwrap();
        assert_eq!(loaded_metadata.format_version, FORMAT_VERSION);
        let loaded_data: serde_json::Value = serde_json::from_slice(&loaded.data).unwrap();
        assert_eq!(loaded_data, data);
    }

    #[tokio::test]
    async fn test_exists() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("board.json"));
        assert!(!store.exists().await);

        let envelope = JsonEnvelope::empty(store.instance_id());
        std::fs::write(store.path(), serde_json::to_vec(&envelope).unwrap()).unwrap();
        assert!(store.exists().await);
    }

    #[tokio::test]
    async fn test_rejects_unknown_version() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("board.json");
        let mut envelope = JsonEnvelope::empty(Uuid::new_v4());
        envelope.version = 7;
        std::fs::write(&file_path, serde_json::to_vec(&envelope).unwrap()).unwrap();

        let err = JsonFileStore::new(&file_path).load().await.unwrap_err();
        assert!(matches!(err, BoardError::Serialization(msg) if msg.contains("7")));
    }
}
