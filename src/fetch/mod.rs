use std::time::Duration;

use chrono::NaiveDate;
use reqwest::Client;
use tracing::{instrument, Level};
use url::Url;

use crate::error::{Error, Result};
use crate::week::dtdate_param;

static BASE_URL: &str = "https://www.foodpro.huds.harvard.edu/foodpro/shtmenu.aspx";

/// Transport bound for every fetch; exceeding it is a fetch failure, not a
/// hang.
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

pub fn make_client() -> Client {
    Client::builder()
        .timeout(FETCH_TIMEOUT)
        .gzip(true)
        .build()
        .expect("client creation should succeed")
}

pub fn day_url(date: NaiveDate) -> Url {
    let mut url = Url::parse(BASE_URL).expect("base url should be valid");
    url.query_pairs_mut()
        .append_pair("sName", "HARVARD UNIVERSITY DINING SERVICES")
        .append_pair("locationNum", "38")
        .append_pair("locationName", "Dining Hall")
        .append_pair("naFlag", "1")
        .append_pair("WeeksMenus", "This Week's Menus")
        .append_pair("myaction", "read")
        .append_pair("dtdate", &dtdate_param(date));
    url
}

/// Fetch the raw markup of one day's menu page. Any transport error or
/// non-2xx status maps to [`Error::FetchFailed`] carrying the date.
#[instrument(skip(client), fields(date = %dtdate_param(date)), level = Level::TRACE)]
pub async fn day_page(client: &Client, date: NaiveDate) -> Result<String> {
    let start = std::time::Instant::now();
    let response = client
        .get(day_url(date))
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(|e| Error::fetch_failed(date, &e))?;
    let text = response
        .text()
        .await
        .map_err(|e| Error::fetch_failed(date, &e))?;
    log::trace!("Got menu page for {date} in {:?}", start.elapsed());
    Ok(text)
}
