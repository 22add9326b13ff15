mod local;
mod multithreaded;

use std::path::{Path, PathBuf};

pub use local::FileStore;
pub use multithreaded::{MenuState, MultithreadedCache as Multithreaded};

use chrono::NaiveDate;

use crate::menu::{ScrapeStatus, WeekMenu};

/// Where the latest week document and status record live.
#[derive(Debug)]
#[non_exhaustive]
pub enum Store {
    Local(FileStore),
    AdHoc,
}

impl Store {
    #[inline]
    pub async fn local(p: impl AsRef<Path>) -> crate::Result<Self> {
        FileStore::open(p).await.map(Self::Local)
    }

    pub async fn load_week(&self) -> crate::Result<Option<WeekMenu>> {
        match self {
            Self::Local(f) => f.load_week().await,
            Self::AdHoc => Ok(None),
        }
    }

    pub async fn save_week(&mut self, week: &WeekMenu) -> crate::Result<()> {
        match self {
            Self::Local(f) => f.save_week(week).await,
            Self::AdHoc => Ok(()),
        }
    }

    pub async fn load_status(&self) -> crate::Result<Option<ScrapeStatus>> {
        match self {
            Self::Local(f) => f.load_status().await,
            Self::AdHoc => Ok(None),
        }
    }

    pub async fn save_status(&mut self, status: &ScrapeStatus) -> crate::Result<()> {
        match self {
            Self::Local(f) => f.save_status(status).await,
            Self::AdHoc => Ok(()),
        }
    }

    /// Directory for per-date raw page dumps, when this store has one.
    #[must_use]
    pub fn raw_dump_dir(&self) -> Option<PathBuf> {
        match self {
            Self::Local(f) => Some(f.raw_dir()),
            Self::AdHoc => None,
        }
    }
}

/// Keep a copy of one day's raw markup for debugging. Never fails: a dump
/// that cannot be written is logged and forgotten.
pub async fn write_raw_html(dir: &Path, date: NaiveDate, html: &str) {
    let path = dir.join(format!("{}.html", date.format("%m-%d-%Y")));
    let result = async {
        tokio::fs::create_dir_all(dir).await?;
        tokio::fs::write(&path, html).await
    }
    .await;
    if let Err(e) = result {
        log::debug!("Skipping raw html dump to {}: {e}", path.display());
    }
}
