//! Integration tests for the download queue and vault working together,
//! plus vault persistence on disk.

use std::time::{Duration, Instant};

use snapstream_core::{
    DownloadItem, DownloadQueue, DownloadStatus, Platform, QualityOption, VaultStore, VideoDetails,
    COMPLETED_RETENTION, TICK_INTERVAL,
};

fn sample_video(title: &str) -> VideoDetails {
    VideoDetails {
        id: format!("https://youtu.be/{title}"),
        video_id: None,
        title: title.to_string(),
        thumbnail: String::new(),
        duration: "N/A".to_string(),
        author: "Someone".to_string(),
        platform: Platform::YouTube,
        video_qualities: Vec::new(),
        audio_qualities: Vec::new(),
        subtitles: Vec::new(),
    }
}

fn downloadable(title: &str, millis: u64) -> DownloadItem {
    let option = QualityOption {
        quality: "720p".to_string(),
        format: "MP4".to_string(),
        size: "1.0 MB".to_string(),
        itag: None,
        url: Some("https://cdn.example/720".to_string()),
        note: None,
    };
    DownloadItem::new(&sample_video(title), &option, millis)
}

// ==================== Queue Feeding the Vault ====================

#[test]
fn test_completed_items_land_in_vault_in_completion_order() {
    let mut queue = DownloadQueue::new();
    let mut vault = VaultStore::in_memory();

    queue.enqueue(downloadable("first", 1));
    queue.enqueue(downloadable("second", 2));

    let now = Instant::now();
    for step in 0u32..4 {
        let outcome = queue.tick(now + TICK_INTERVAL * step);
        if let Some(item) = outcome.completed {
            vault.record(item);
        }
    }

    // Oldest request completes first; the vault shows newest completion on top.
    assert_eq!(vault.len(), 2);
    assert_eq!(vault.items()[0].title, "second");
    assert_eq!(vault.items()[1].title, "first");
    assert!(vault
        .items()
        .iter()
        .all(|item| item.status == DownloadStatus::Completed && item.progress == 100));
}

#[test]
fn test_vault_copy_survives_queue_eviction() {
    let mut queue = DownloadQueue::new();
    let mut vault = VaultStore::in_memory();
    queue.enqueue(downloadable("keeper", 1));

    let now = Instant::now();
    queue.tick(now);
    let outcome = queue.tick(now + TICK_INTERVAL);
    vault.record(outcome.completed.unwrap());

    let outcome = queue.tick(now + TICK_INTERVAL + COMPLETED_RETENTION);
    assert_eq!(outcome.evicted.len(), 1);
    assert!(queue.items().is_empty());

    // Eviction removes the queue entry only; the vault record stays.
    assert_eq!(vault.len(), 1);
    assert_eq!(vault.items()[0].title, "keeper");
}

#[test]
fn test_vault_copy_has_cleared_speed_label() {
    let mut queue = DownloadQueue::new();
    queue.enqueue(downloadable("quiet", 1));

    let now = Instant::now();
    queue.tick(now);
    let completed = queue.tick(now + TICK_INTERVAL).completed.unwrap();

    assert_eq!(completed.speed, "");
    assert_eq!(queue.items()[0].speed, "Complete!");
}

#[test]
fn test_redownload_of_same_selection_gets_its_own_vault_entry() {
    let mut vault = VaultStore::in_memory();
    let first = downloadable("rerun", 1_000);
    let second = downloadable("rerun", 2_000);

    assert!(vault.record(first));
    assert!(vault.record(second), "distinct timestamps make distinct ids");
    assert_eq!(vault.len(), 2);
}

// ==================== Vault Persistence ====================

#[test]
fn test_vault_round_trips_through_disk() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("snapstream-vault.json");

    let mut vault = VaultStore::load(path.clone());
    assert!(vault.is_empty());
    vault.record(downloadable("persisted", 1));
    vault.record(downloadable("persisted-too", 2));

    let reloaded = VaultStore::load(path);
    assert_eq!(reloaded.len(), 2);
    assert_eq!(reloaded.items()[0].title, "persisted-too");
    assert_eq!(reloaded.items()[1].title, "persisted");
}

#[test]
fn test_vault_creates_missing_parent_directories() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("nested").join("deeper").join("vault.json");

    let mut vault = VaultStore::load(path.clone());
    vault.record(downloadable("nested", 1));

    assert!(path.exists());
    assert_eq!(VaultStore::load(path).len(), 1);
}

#[test]
fn test_vault_treats_corrupt_file_as_empty() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("vault.json");
    std::fs::write(&path, "{not json at all").unwrap();

    let vault = VaultStore::load(path);
    assert!(vault.is_empty());
}

#[test]
fn test_vault_dedup_survives_reload() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("vault.json");

    let item = downloadable("once", 1);
    let mut vault = VaultStore::load(path.clone());
    vault.record(item.clone());

    let mut reloaded = VaultStore::load(path);
    assert!(!reloaded.record(item), "same id must not duplicate");
    assert_eq!(reloaded.len(), 1);
}

// ==================== Retention Timing ====================

#[test]
fn test_retention_windows_are_tracked_per_item() {
    let mut queue = DownloadQueue::with_retention(Duration::from_millis(100));
    queue.enqueue(downloadable("early", 1));
    queue.enqueue(downloadable("late", 2));

    let now = Instant::now();
    queue.tick(now); // early promoted
    queue.tick(now + TICK_INTERVAL); // early completes, late promoted
    queue.tick(now + TICK_INTERVAL * 2); // late completes

    // Only the first completion has aged past the (shortened) window.
    let outcome = queue.tick(now + TICK_INTERVAL * 2 + Duration::from_millis(50));
    assert_eq!(outcome.evicted.len(), 1);
    assert_eq!(queue.items().len(), 1);
    assert_eq!(queue.items()[0].title, "late");
}
