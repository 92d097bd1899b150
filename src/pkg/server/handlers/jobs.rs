use axum::{
    extract::{
        rejection::JsonRejection,
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use chrono::{NaiveDate, Utc};
use serde_json::{json, Value};
use validator::Validate;

use crate::{
    pkg::{
        internal::adaptors::jobs::spec::{JobEntry, JobFilter, JobInput, JobPage, ListQuery},
        server::state::AppState,
    },
    prelude::{Error, Result},
};

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Ids are positive integers, so anything unparsable cannot name a row.
fn parse_id(raw: &str) -> Result<i32> {
    raw.trim().parse::<i32>().map_err(|_| Error::JobNotFound)
}

/// A body sent without a JSON content type reads as an empty payload.
fn read_payload(payload: core::result::Result<Json<JobInput>, JsonRejection>) -> Result<JobInput> {
    match payload {
        Ok(Json(input)) => Ok(input),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(JobInput::default()),
        Err(rejection) => Err(Error::BadRequest(rejection.body_text())),
    }
}

pub async fn list(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<JobPage>> {
    let filter = JobFilter::from(ListQuery::from(pairs));
    let page = state.jobs.search(&filter).await?;
    tracing::debug!(total = page.total, returned = page.items.len(), "listed jobs");
    Ok(Json(page))
}

pub async fn retrieve(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<JobEntry>> {
    let id = parse_id(&id)?;
    match state.jobs.get(id).await? {
        Some(job) => Ok(Json(job)),
        None => Err(Error::JobNotFound),
    }
}

pub async fn create(
    State(state): State<AppState>,
    payload: core::result::Result<Json<JobInput>, JsonRejection>,
) -> Result<(StatusCode, Json<JobEntry>)> {
    let input = read_payload(payload)?;
    input.validate().map_err(|_| Error::MissingFields)?;
    let draft = input.into_draft(today())?;
    let job = state.jobs.create(&draft).await?;
    tracing::info!(job_id = job.id, "job created");
    Ok((StatusCode::CREATED, Json(job)))
}

/// Full overwrite without the create-time required-field check.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: core::result::Result<Json<JobInput>, JsonRejection>,
) -> Result<Json<JobEntry>> {
    let id = parse_id(&id)?;
    // unknown ids are reported before the payload is looked at
    if state.jobs.get(id).await?.is_none() {
        return Err(Error::JobNotFound);
    }
    let draft = read_payload(payload)?.into_draft(today())?;
    match state.jobs.update(id, &draft).await? {
        Some(job) => {
            tracing::info!(job_id = job.id, "job updated");
            Ok(Json(job))
        }
        None => Err(Error::JobNotFound),
    }
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Value>> {
    let id = parse_id(&id)?;
    if !state.jobs.delete(id).await? {
        return Err(Error::JobNotFound);
    }
    tracing::info!(job_id = id, "job deleted");
    Ok(Json(json!({ "message": "Job deleted" })))
}
