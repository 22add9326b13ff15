use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs;

use crate::menu::{ScrapeStatus, WeekMenu};

/// Flat-file JSON store: `week.json` and `status.json` in one directory,
/// plus a `raw/` subdirectory for page dumps.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub async fn open(p: impl AsRef<Path>) -> crate::Result<Self> {
        let dir = p.as_ref().to_path_buf();
        fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    #[must_use]
    pub fn raw_dir(&self) -> PathBuf {
        self.dir.join("raw")
    }

    fn week_path(&self) -> PathBuf {
        self.dir.join("week.json")
    }

    fn status_path(&self) -> PathBuf {
        self.dir.join("status.json")
    }

    pub async fn load_week(&self) -> crate::Result<Option<WeekMenu>> {
        read_json(&self.week_path()).await
    }

    pub async fn save_week(&self, week: &WeekMenu) -> crate::Result<()> {
        write_json(&self.week_path(), week).await
    }

    pub async fn load_status(&self) -> crate::Result<Option<ScrapeStatus>> {
        read_json(&self.status_path()).await
    }

    pub async fn save_status(&self, status: &ScrapeStatus) -> crate::Result<()> {
        write_json(&self.status_path(), status).await
    }
}

/// A missing file reads as `None`; so does a file that no longer
/// deserializes, since a corrupt cache should never take the service down.
async fn read_json<T: DeserializeOwned>(path: &Path) -> crate::Result<Option<T>> {
    if !fs::try_exists(path).await? {
        return Ok(None);
    }
    let bytes = fs::read(path).await?;
    match serde_json::from_slice(&bytes) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            log::warn!("Ignoring unreadable cache file {}: {e}", path.display());
            Ok(None)
        }
    }
}

async fn write_json<T: Serialize>(path: &Path, value: &T) -> crate::Result<()> {
    let bytes = serde_json::to_vec_pretty(value)?;
    fs::write(path, bytes).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::DayMenu;
    use crate::week::utc_now_iso;
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    fn sample_week() -> WeekMenu {
        let start = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
        let mut meals = BTreeMap::new();
        for offset in 0..7 {
            meals.insert(start + chrono::Duration::days(offset), DayMenu::empty());
        }
        WeekMenu {
            week_start: start,
            week_end: NaiveDate::from_ymd_opt(2025, 9, 7).unwrap(),
            generated_at: utc_now_iso(),
            meals,
        }
    }

    #[tokio::test]
    async fn week_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).await.unwrap();
        assert!(store.load_week().await.unwrap().is_none());

        let week = sample_week();
        store.save_week(&week).await.unwrap();
        let loaded = store.load_week().await.unwrap().unwrap();
        assert_eq!(loaded, week);
    }

    #[tokio::test]
    async fn status_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).await.unwrap();
        assert!(store.load_status().await.unwrap().is_none());

        let status = ScrapeStatus::failed("fetch_failed");
        store.save_status(&status).await.unwrap();
        let loaded = store.load_status().await.unwrap().unwrap();
        assert_eq!(loaded, status);
    }

    #[tokio::test]
    async fn corrupt_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).await.unwrap();
        fs::write(store.week_path(), b"not json").await.unwrap();
        assert!(store.load_week().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn raw_dump_never_errors() {
        let dir = tempfile::tempdir().unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 9, 3).unwrap();
        super::super::write_raw_html(&dir.path().join("raw"), date, "<html></html>").await;
        let dumped = fs::read_to_string(dir.path().join("raw/09-03-2025.html"))
            .await
            .unwrap();
        assert_eq!(dumped, "<html></html>");
    }
}
