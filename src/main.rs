#![deny(unused_crate_dependencies)]
#![warn(clippy::all, clippy::pedantic)]

mod cache;
mod config;
mod email;
mod error;
mod fetch;
mod menu;
mod parse;
mod render;
mod scrape;
mod week;

use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::{Method, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{TimeZone, Utc};
use serde_json::json;
use tokio::net::TcpListener;
use tokio::time::sleep;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};

use crate::cache::{Multithreaded, Store};
use crate::config::Config;
use crate::menu::DayMenu;
use crate::week::{today_local, REFERENCE_TZ};

pub use error::Result;

/// Local hour at which the daily scrape-and-email run fires.
const DAILY_RUN_HOUR: u32 = 7;

type AppState = Arc<Multithreaded>;

async fn root(State(cache): State<AppState>) -> Html<String> {
    // First load with an empty store: try to scrape before rendering.
    if let Err(e) = cache.ensure_week().await {
        log::warn!("Initial scrape failed: {e}");
    }
    let state = cache.get().await;
    let banner = render::status_banner(&state);
    let grid = state.week.as_ref().map_or_else(
        || "<div id=\"grid\" class=\"text-gray-400\">No menu data yet.</div>".to_string(),
        render::week_grid,
    );
    Html(render::page(&grid, banner))
}

async fn api_week(State(cache): State<AppState>) -> Response {
    match &cache.get().await.week {
        Some(week) => Json(week.clone()).into_response(),
        None => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "parse_failed" })),
        )
            .into_response(),
    }
}

async fn api_today(State(cache): State<AppState>) -> Response {
    let Some(week) = cache.get().await.week.clone() else {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "parse_failed" })),
        )
            .into_response();
    };
    let day = week
        .day(today_local())
        .cloned()
        .unwrap_or_else(DayMenu::empty);
    Json(day).into_response()
}

async fn api_refresh(State(cache): State<AppState>) -> Response {
    match cache.refresh().await {
        Ok(()) => {
            let generated_at = cache
                .get()
                .await
                .week
                .as_ref()
                .map(|w| w.generated_at.clone());
            Json(json!({ "ok": true, "updated_at": generated_at })).into_response()
        }
        Err(e) => {
            let code = if e.kind() == "fetch_failed" {
                StatusCode::SERVICE_UNAVAILABLE
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            (code, Json(json!({ "error": e.kind() }))).into_response()
        }
    }
}

async fn api_health(State(cache): State<AppState>) -> Json<serde_json::Value> {
    let ok = cache
        .get()
        .await
        .status
        .as_ref()
        .is_some_and(|s| s.last_scrape_ok);
    Json(json!({ "ok": ok }))
}

async fn api_week_fragment(State(cache): State<AppState>) -> Response {
    match &cache.get().await.week {
        Some(week) => Html(render::week_grid(week)).into_response(),
        None => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html("<div id='grid' class='text-red-700'>Failed to load week.</div>".to_string()),
        )
            .into_response(),
    }
}

/// The daily run: make sure a week is cached, then email today's menu.
async fn api_cron(State(cache): State<AppState>) -> Json<serde_json::Value> {
    if let Err(e) = cache.ensure_week().await {
        log::warn!("Cron scrape failed: {e}");
    }
    let today = today_local();
    let day = cache
        .get()
        .await
        .week
        .as_ref()
        .and_then(|week| week.day(today).cloned())
        .unwrap_or_else(DayMenu::empty);
    let outcome = email::send_daily(today, &day).await;
    Json(json!({ "ok": true, "email": outcome }))
}

/// Time until the next `DAILY_RUN_HOUR` o'clock in the reference timezone.
fn until_next_daily_run() -> Duration {
    let now = Utc::now().with_timezone(&REFERENCE_TZ);
    let mut run_date = now.date_naive();
    if now.time() >= chrono::NaiveTime::from_hms_opt(DAILY_RUN_HOUR, 0, 0).expect("valid time") {
        run_date += chrono::Duration::days(1);
    }
    let next_local = run_date
        .and_hms_opt(DAILY_RUN_HOUR, 0, 0)
        .expect("valid time");
    REFERENCE_TZ
        .from_local_datetime(&next_local)
        .earliest()
        .map_or(Duration::from_secs(24 * 60 * 60), |next| {
            next.signed_duration_since(now)
                .to_std()
                .unwrap_or(Duration::ZERO)
        })
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> core::result::Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();

    let config = Config::from_env();
    let store = match config.cache.as_deref() {
        Some(":memory:") => Store::AdHoc,
        Some(p) => Store::local(p).await?,
        None => {
            log::warn!("env var CACHE not set, using ad-hoc memory cache.");
            Store::AdHoc
        }
    };
    let cache = Arc::new(Multithreaded::new(store).await?);

    let compression_layer: CompressionLayer = CompressionLayer::new()
        .br(true)
        .deflate(true)
        .gzip(true)
        .zstd(true);
    let cors_layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_origin(Any);

    let app = Router::new()
        .route("/", get(root))
        .route("/api/week", get(api_week))
        .route("/api/today", get(api_today))
        .route("/api/refresh", post(api_refresh))
        .route("/api/health", get(api_health))
        .route("/api/week_fragment", get(api_week_fragment))
        .route("/api/cron", get(api_cron))
        .with_state(Arc::clone(&cache))
        .layer(cors_layer)
        .layer(compression_layer);

    // Daily scrape + email at DAILY_RUN_HOUR local; runs forever, failures
    // only mark the status record.
    let scheduled = Arc::clone(&cache);
    tokio::spawn(async move {
        loop {
            let wait = until_next_daily_run();
            log::info!("Next scheduled scrape in {wait:?}");
            sleep(wait).await;
            if let Err(e) = scheduled.refresh().await {
                log::warn!("Scheduled scrape failed: {e}");
            }
            let today = today_local();
            let day = scheduled
                .get()
                .await
                .week
                .as_ref()
                .and_then(|week| week.day(today).cloned())
                .unwrap_or_else(DayMenu::empty);
            let outcome = email::send_daily(today, &day).await;
            log::info!("Daily email outcome: {outcome:?}");
        }
    });

    let addr = SocketAddr::from_str(&config.addr())?;
    let listener = TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| panic!("failed to listen on {addr}: {e}"));
    log::info!("listening on http://{addr}");
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn daily_run_is_within_a_day() {
        let wait = until_next_daily_run();
        assert!(wait <= Duration::from_secs(25 * 60 * 60));
    }
}
