use std::ops::Deref;

use futures_locks::RwLock;
use reqwest::Client;

use super::Store;
use crate::fetch;
use crate::menu::{ScrapeStatus, WeekMenu};
use crate::scrape;

/// The in-memory view served to readers: last good week plus last-run
/// status. Readers only ever see a fully assembled document.
#[derive(Debug, Default, Clone)]
pub struct MenuState {
    pub week: Option<WeekMenu>,
    pub status: Option<ScrapeStatus>,
}

/// Shared cache over a [`Store`]: readers take the state lock, the scraper
/// swaps in a fresh week on success and only touches the status record on
/// failure.
#[derive(Debug)]
pub struct MultithreadedCache {
    store: RwLock<Store>,
    state: RwLock<MenuState>,
    client: Client,
}

impl MultithreadedCache {
    pub async fn new(store: Store) -> crate::Result<Self> {
        let state = MenuState {
            week: store.load_week().await?,
            status: store.load_status().await?,
        };
        Ok(Self {
            store: RwLock::new(store),
            state: RwLock::new(state),
            client: fetch::make_client(),
        })
    }

    pub async fn get(&self) -> impl Deref<Target = MenuState> + '_ {
        self.state.read().await
    }

    /// Scrape the current week and persist it. On success the previous week
    /// document is fully replaced; on failure it is left intact and only the
    /// status record is rewritten with the error kind.
    pub async fn refresh(&self) -> crate::Result<()> {
        let raw_dump = self.store.read().await.raw_dump_dir();
        let result = scrape::assemble_week(&self.client, raw_dump.as_deref()).await;
        self.finish_refresh(result).await
    }

    /// Fold one assembly run's outcome into the store and shared state.
    async fn finish_refresh(&self, result: crate::Result<WeekMenu>) -> crate::Result<()> {
        match result {
            Ok(week) => {
                let status = ScrapeStatus::ok();
                {
                    let mut store = self.store.write().await;
                    store.save_week(&week).await?;
                    store.save_status(&status).await?;
                }
                let mut state = self.state.write().await;
                state.week = Some(week);
                state.status = Some(status);
                Ok(())
            }
            Err(e) => {
                let status = ScrapeStatus::failed(e.kind());
                if let Err(save_err) = self.store.write().await.save_status(&status).await {
                    log::warn!("Could not persist failure status: {save_err}");
                }
                self.state.write().await.status = Some(status);
                Err(e)
            }
        }
    }

    /// Scrape only if nothing is cached yet. Used on first page load and by
    /// the cron endpoint before emailing.
    pub async fn ensure_week(&self) -> crate::Result<()> {
        if self.state.read().await.week.is_some() {
            return Ok(());
        }
        self.refresh().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::week::utc_now_iso;
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    fn sample_week() -> WeekMenu {
        let start = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
        let mut meals = BTreeMap::new();
        for offset in 0..7 {
            meals.insert(
                start + chrono::Duration::days(offset),
                crate::menu::DayMenu::empty(),
            );
        }
        WeekMenu {
            week_start: start,
            week_end: NaiveDate::from_ymd_opt(2025, 9, 7).unwrap(),
            generated_at: utc_now_iso(),
            meals,
        }
    }

    #[tokio::test]
    async fn loads_persisted_state_on_startup() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = Store::local(dir.path()).await.unwrap();
        let week = sample_week();
        store.save_week(&week).await.unwrap();
        store.save_status(&ScrapeStatus::ok()).await.unwrap();

        let cache = MultithreadedCache::new(store).await.unwrap();
        let state = cache.get().await;
        assert_eq!(state.week.as_ref(), Some(&week));
        assert!(state.status.as_ref().unwrap().last_scrape_ok);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_week() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = Store::local(dir.path()).await.unwrap();
        let week = sample_week();
        store.save_week(&week).await.unwrap();
        store.save_status(&ScrapeStatus::ok()).await.unwrap();

        let cache = MultithreadedCache::new(store).await.unwrap();
        let err = cache
            .finish_refresh(Err(crate::error::Error::ParseFailed))
            .await
            .expect_err("a failed run should surface its error");
        assert_eq!(err.kind(), "parse_failed");

        let state = cache.get().await;
        assert_eq!(state.week.as_ref(), Some(&week));
        let status = state.status.as_ref().unwrap();
        assert!(!status.last_scrape_ok);
        assert_eq!(status.error.as_deref(), Some("parse_failed"));

        // The week document on disk survives untouched; only the status
        // record is rewritten.
        let reopened = Store::local(dir.path()).await.unwrap();
        assert_eq!(reopened.load_week().await.unwrap(), Some(week));
        let persisted = reopened.load_status().await.unwrap().unwrap();
        assert!(!persisted.last_scrape_ok);
        assert_eq!(persisted.error.as_deref(), Some("parse_failed"));
    }

    #[tokio::test]
    async fn successful_refresh_replaces_week_and_status() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::local(dir.path()).await.unwrap();
        let cache = MultithreadedCache::new(store).await.unwrap();

        let week = sample_week();
        cache.finish_refresh(Ok(week.clone())).await.unwrap();

        let state = cache.get().await;
        assert_eq!(state.week.as_ref(), Some(&week));
        assert!(state.status.as_ref().unwrap().last_scrape_ok);

        let reopened = Store::local(dir.path()).await.unwrap();
        assert_eq!(reopened.load_week().await.unwrap(), Some(week));
        assert!(reopened.load_status().await.unwrap().unwrap().last_scrape_ok);
    }

    #[tokio::test]
    async fn adhoc_store_starts_empty() {
        let cache = MultithreadedCache::new(Store::AdHoc).await.unwrap();
        let state = cache.get().await;
        assert!(state.week.is_none());
        assert!(state.status.is_none());
    }
}
