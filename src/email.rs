//! Daily menu email over SMTP.

use std::env;

use chrono::NaiveDate;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use serde::Serialize;

use crate::menu::{Bucket, DayMenu, MealMenu};

#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_username: String,
    pub smtp_password: String,
    pub from: String,
    pub recipients: Vec<String>,
}

impl EmailConfig {
    /// `None` when SMTP host, sender or recipients are not configured;
    /// sending is then skipped rather than failed.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let smtp_host = env::var("SMTP_HOST").ok()?;
        let from = env::var("EMAIL_FROM").ok()?;
        let recipients: Vec<String> = env::var("RECIPIENT_EMAILS")
            .ok()?
            .split(',')
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(str::to_string)
            .collect();
        if recipients.is_empty() {
            return None;
        }
        Some(Self {
            smtp_host,
            smtp_username: env::var("SMTP_USERNAME").unwrap_or_default(),
            smtp_password: env::var("SMTP_PASSWORD").unwrap_or_default(),
            from,
            recipients,
        })
    }
}

/// What happened to the daily email; reported in the cron response and never
/// escalated to a scrape failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum EmailOutcome {
    Sent { recipients: usize },
    Skipped { reason: &'static str },
    Failed { error: String },
}

fn meal_section(title: &str, meal: &MealMenu, include_delish: bool) -> String {
    let mut parts = vec![format!("<h3 style='margin:12px 0 6px 0;'>{title}</h3>")];
    for bucket in Bucket::ALL {
        if bucket == Bucket::Delish && !include_delish {
            continue;
        }
        let items = meal.bucket(bucket);
        if items.is_empty() {
            continue;
        }
        parts.push(format!(
            "<div style='font-weight:600;margin-top:6px'>{}</div>",
            bucket.label()
        ));
        parts.push("<ul style='margin:4px 0 10px 18px;padding:0'>".to_string());
        for item in items {
            parts.push(format!("<li>{item}</li>"));
        }
        parts.push("</ul>".to_string());
    }
    parts.join("\n")
}

/// The full HTML body for one date's lunch and dinner.
#[must_use]
pub fn daily_body(date: NaiveDate, day: &DayMenu) -> String {
    [
        "<div style='font-family:system-ui, -apple-system, Segoe UI, Roboto, Arial, sans-serif;max-width:640px;margin:0 auto;padding:16px'>".to_string(),
        "<h2 style='margin:0 0 12px 0'>HUDS Today (Lunch & Dinner)</h2>".to_string(),
        format!("<div style='color:#666;margin-bottom:12px'>{date}</div>"),
        meal_section("Lunch", &day.lunch, true),
        meal_section("Dinner", &day.dinner, false),
        "<div style='margin-top:16px;color:#888;font-size:12px'>Sent automatically at 7:00 AM America/New_York.</div>".to_string(),
        "</div>".to_string(),
    ]
    .join("\n")
}

/// Send the daily menu to every configured recipient. Config comes from the
/// environment; anything that goes wrong is folded into the outcome. The SMTP
/// transport is blocking, so the actual send runs off the async runtime.
pub async fn send_daily(date: NaiveDate, day: &DayMenu) -> EmailOutcome {
    let Some(config) = EmailConfig::from_env() else {
        return EmailOutcome::Skipped {
            reason: "missing_config",
        };
    };
    let day = day.clone();
    match tokio::task::spawn_blocking(move || send_daily_with(&config, date, &day)).await {
        Ok(outcome) => outcome,
        Err(e) => EmailOutcome::Failed {
            error: e.to_string(),
        },
    }
}

pub fn send_daily_with(config: &EmailConfig, date: NaiveDate, day: &DayMenu) -> EmailOutcome {
    let mailer = match SmtpTransport::relay(&config.smtp_host) {
        Ok(builder) => builder
            .credentials(Credentials::new(
                config.smtp_username.clone(),
                config.smtp_password.clone(),
            ))
            .build(),
        Err(e) => {
            return EmailOutcome::Failed {
                error: e.to_string(),
            }
        }
    };

    let body = daily_body(date, day);
    let mut sent = 0;
    for recipient in &config.recipients {
        let message = Message::builder()
            .from(match config.from.parse() {
                Ok(mailbox) => mailbox,
                Err(e) => {
                    return EmailOutcome::Failed {
                        error: format!("invalid from address: {e}"),
                    }
                }
            })
            .to(match recipient.parse() {
                Ok(mailbox) => mailbox,
                Err(e) => {
                    log::warn!("Skipping invalid recipient {recipient}: {e}");
                    continue;
                }
            })
            .subject("HUDS Today (Lunch & Dinner)")
            .header(ContentType::TEXT_HTML)
            .body(body.clone());
        let message = match message {
            Ok(m) => m,
            Err(e) => {
                return EmailOutcome::Failed {
                    error: e.to_string(),
                }
            }
        };
        match mailer.send(&message) {
            Ok(_) => sent += 1,
            Err(e) => {
                return EmailOutcome::Failed {
                    error: e.to_string(),
                }
            }
        }
    }
    EmailOutcome::Sent { recipients: sent }
}
