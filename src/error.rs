use std::fmt::{self, Display, Formatter};

use chrono::NaiveDate;

#[derive(Debug)]
pub enum Error {
    /// A single day's page could not be fetched (transport error, timeout,
    /// or non-2xx status). Absorbed by the week assembler.
    FetchFailed { date: NaiveDate, reason: String },
    /// The whole week yielded zero dishes; the page structure is gone.
    ParseFailed,
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl Error {
    pub fn fetch_failed(date: NaiveDate, source: &reqwest::Error) -> Self {
        Self::FetchFailed {
            date,
            reason: source.to_string(),
        }
    }

    /// Stable kind string recorded in the status file and error responses.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::FetchFailed { .. } => "fetch_failed",
            Self::ParseFailed => "parse_failed",
            Self::Io(_) => "io_error",
            Self::Json(_) => "json_error",
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::FetchFailed { date, reason } => {
                write!(f, "Failed to fetch menu page for {date}: {reason}")
            }
            Self::ParseFailed => write!(f, "Menu format changed (no dishes found)"),
            Self::Io(e) => write!(f, "Io error: {e}"),
            Self::Json(e) => write!(f, "Json error: {e}"),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
