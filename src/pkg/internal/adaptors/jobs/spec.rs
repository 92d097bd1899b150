use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use validator::Validate;

use crate::prelude::{Error, Result};

/// Location value the client sends when the user picked "all provinces/cities".
pub const ALL_LOCATIONS: &str = "Tất cả Tỉnh/Thành phố";
pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct JobEntry {
    pub id: i32,
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub salary: Option<String>,
    pub category: Option<String>,
    pub level: Option<String>,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub job_type: Option<String>,
    pub posted_at: NaiveDate,
}

/// Job fields as sent by clients on create and update.
///
/// Falsy JSON values (`""`, `0`, `false`, `null`) are read as absent, so
/// `validate` rejects them the same way as a missing key.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct JobInput {
    #[serde(default, deserialize_with = "truthy_text")]
    #[validate(required)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "truthy_text")]
    #[validate(required)]
    pub company: Option<String>,
    #[serde(default, deserialize_with = "truthy_text")]
    #[validate(required)]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "truthy_text")]
    #[validate(required)]
    pub salary: Option<String>,
    #[serde(default, deserialize_with = "truthy_text")]
    #[validate(required)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "truthy_text")]
    #[validate(required)]
    pub level: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "truthy_text")]
    #[validate(required)]
    pub job_type: Option<String>,
    #[serde(default, rename = "postedAt", deserialize_with = "truthy_text")]
    pub posted_at: Option<String>,
}

fn truthy_text<'de, D>(deserializer: D) -> core::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    })
}

/// A full row ready to be written; `posted_at` is always resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct JobDraft {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub salary: Option<String>,
    pub category: Option<String>,
    pub level: Option<String>,
    pub job_type: Option<String>,
    pub posted_at: NaiveDate,
}

impl JobInput {
    pub fn into_draft(self, today: NaiveDate) -> Result<JobDraft> {
        let posted_at = match self.posted_at.as_deref() {
            Some(raw) => parse_posted_at(raw)?,
            None => today,
        };
        Ok(JobDraft {
            title: self.title,
            company: self.company,
            location: self.location,
            salary: self.salary,
            category: self.category,
            level: self.level,
            job_type: self.job_type,
            posted_at,
        })
    }
}

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
];

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Accepts the date spellings Postgres reads as a `date` literal. Anything
/// else is a storage-level failure, not a client validation error.
pub fn parse_posted_at(raw: &str) -> Result<NaiveDate> {
    let raw = raw.trim();
    if raw.len() == 8 && raw.bytes().all(|b| b.is_ascii_digit()) {
        let dashed = format!("{}-{}-{}", &raw[..4], &raw[4..6], &raw[6..]);
        if let Ok(date) = NaiveDate::parse_from_str(&dashed, "%Y-%m-%d") {
            return Ok(date);
        }
    }
    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
    {
        return Ok(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.date_naive());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.date())
        .ok_or_else(|| Error::InvalidDate(raw.to_string()))
}

/// Raw listing parameters straight from the query string.
#[derive(Debug, Default)]
pub struct ListQuery {
    pub q: Option<String>,
    pub location: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Folds raw query pairs; the first occurrence of a repeated key wins and
/// unknown keys are ignored.
impl From<Vec<(String, String)>> for ListQuery {
    fn from(pairs: Vec<(String, String)>) -> Self {
        let mut query = ListQuery::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "q" => &mut query.q,
                "location" => &mut query.location,
                "page" => &mut query.page,
                "limit" => &mut query.limit,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        query
    }
}

/// Normalised search predicate plus pagination window.
#[derive(Debug, Clone, PartialEq)]
pub struct JobFilter {
    /// Lowercased, trimmed free-text term.
    pub term: Option<String>,
    /// Lowercased location fragment; `None` when absent or the all-locations sentinel.
    pub location: Option<String>,
    pub page: i64,
    pub limit: i64,
}

impl Default for JobFilter {
    fn default() -> Self {
        JobFilter {
            term: None,
            location: None,
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl From<ListQuery> for JobFilter {
    fn from(query: ListQuery) -> Self {
        let term = query
            .q
            .map(|q| q.trim().to_lowercase())
            .filter(|q| !q.is_empty());
        let location = query
            .location
            .filter(|l| !l.is_empty() && l != ALL_LOCATIONS)
            .map(|l| l.to_lowercase());
        JobFilter {
            term,
            location,
            page: coerce_positive(query.page.as_deref(), DEFAULT_PAGE),
            limit: coerce_positive(query.limit.as_deref(), DEFAULT_LIMIT),
        }
    }
}

impl JobFilter {
    pub fn term_pattern(&self) -> Option<String> {
        self.term.as_ref().map(|t| format!("%{}%", t))
    }

    pub fn location_pattern(&self) -> Option<String> {
        self.location.as_ref().map(|l| format!("%{}%", l))
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// Same predicate the SQL builder emits, evaluated against a loaded row.
    pub fn matches(&self, job: &JobEntry) -> bool {
        let term_ok = match &self.term {
            Some(term) => {
                contains(&job.title, term)
                    || contains(&job.company, term)
                    || contains(&job.category, term)
            }
            None => true,
        };
        let location_ok = match &self.location {
            Some(location) => contains(&job.location, location),
            None => true,
        };
        term_ok && location_ok
    }
}

fn contains(field: &Option<String>, needle: &str) -> bool {
    field
        .as_deref()
        .is_some_and(|value| value.to_lowercase().contains(needle))
}

/// Reads the leading digits of `raw` the way a lenient integer parse does;
/// anything that does not yield a positive number falls back to `default`.
pub fn coerce_positive(raw: Option<&str>, default: i64) -> i64 {
    let Some(raw) = raw else {
        return default;
    };
    let raw = raw.trim_start();
    let raw = raw.strip_prefix('+').unwrap_or(raw);
    let end = raw
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(raw.len());
    match raw[..end].parse::<i64>() {
        Ok(n) if n > 0 => n,
        _ => default,
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JobPage {
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub items: Vec<JobEntry>,
}
