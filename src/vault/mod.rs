//! Persisted record of completed downloads.
//!
//! The vault is an ordered, newest-first list of [`DownloadItem`]s, unique
//! by id, serialized as a single JSON blob at a fixed file name. It is
//! loaded once at startup (missing or corrupt data yields an empty vault,
//! never an error) and written on every mutation. Persistence failures are
//! logged and swallowed; the in-memory list stays authoritative for the
//! session. There is no removal operation.

use std::fs;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::queue::DownloadItem;

/// Fixed file name of the serialized vault blob.
pub const VAULT_FILE_NAME: &str = "snapstream-vault.json";

/// Default vault location under the platform config directory.
#[must_use]
pub fn default_vault_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("snapstream")
        .join(VAULT_FILE_NAME)
}

/// Durable store of ever-completed downloads, independent of the transient
/// download queue.
#[derive(Debug)]
pub struct VaultStore {
    path: Option<PathBuf>,
    items: Vec<DownloadItem>,
}

impl VaultStore {
    /// Loads the vault from `path`. A missing file starts an empty vault;
    /// a corrupt file is logged and treated as empty.
    #[must_use]
    pub fn load(path: PathBuf) -> Self {
        let items = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(items) => items,
                Err(error) => {
                    warn!(path = %path.display(), %error, "vault file is corrupt, starting empty");
                    Vec::new()
                }
            },
            Err(error) => {
                debug!(path = %path.display(), %error, "no vault file, starting empty");
                Vec::new()
            }
        };
        Self {
            path: Some(path),
            items,
        }
    }

    /// Creates a vault with no backing file (test seam).
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            path: None,
            items: Vec::new(),
        }
    }

    /// Records a completed item at the front of the store. A duplicate id
    /// is a no-op. Returns whether the item was inserted.
    pub fn record(&mut self, item: DownloadItem) -> bool {
        if self.items.iter().any(|existing| existing.id == item.id) {
            debug!(id = %item.id, "vault already holds this item");
            return false;
        }
        debug!(id = %item.id, "recorded completed download in vault");
        self.items.insert(0, item);
        self.persist();
        true
    }

    /// Stored items, newest first.
    #[must_use]
    pub fn items(&self) -> &[DownloadItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Writes the blob to disk. Failures are logged and swallowed.
    fn persist(&self) {
        let Some(path) = &self.path else {
            return;
        };
        if let Some(parent) = path.parent()
            && let Err(error) = fs::create_dir_all(parent)
        {
            warn!(path = %path.display(), %error, "could not create vault directory");
            return;
        }
        match serde_json::to_string_pretty(&self.items) {
            Ok(serialized) => {
                if let Err(error) = fs::write(path, serialized) {
                    warn!(path = %path.display(), %error, "could not write vault file");
                }
            }
            Err(error) => {
                warn!(%error, "could not serialize vault");
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::media::{Platform, QualityOption, VideoDetails};

    fn completed_item(id_millis: u64) -> DownloadItem {
        let video = VideoDetails {
            id: "https://youtu.be/dQw4w9WgXcQ".to_string(),
            video_id: Some("dQw4w9WgXcQ".to_string()),
            title: "Sample".to_string(),
            thumbnail: String::new(),
            duration: "N/A".to_string(),
            author: "Someone".to_string(),
            platform: Platform::YouTube,
            video_qualities: Vec::new(),
            audio_qualities: Vec::new(),
            subtitles: Vec::new(),
        };
        let option = QualityOption {
            quality: "720p".to_string(),
            format: "MP4".to_string(),
            size: "1.0 MB".to_string(),
            itag: None,
            url: Some("https://cdn.example/720".to_string()),
            note: None,
        };
        DownloadItem::new(&video, &option, id_millis)
    }

    #[test]
    fn test_record_deduplicates_by_id() {
        let mut vault = VaultStore::in_memory();
        let item = completed_item(1);
        assert!(vault.record(item.clone()));
        assert!(!vault.record(item));
        assert_eq!(vault.len(), 1);
    }

    #[test]
    fn test_record_keeps_newest_first() {
        let mut vault = VaultStore::in_memory();
        let first = completed_item(1);
        let second = completed_item(2);
        vault.record(first.clone());
        vault.record(second.clone());
        assert_eq!(vault.items()[0].id, second.id);
        assert_eq!(vault.items()[1].id, first.id);
    }

    #[test]
    fn test_in_memory_vault_starts_empty() {
        let vault = VaultStore::in_memory();
        assert!(vault.is_empty());
        assert_eq!(vault.len(), 0);
    }
}
