use axum::{
    extract::{Path, Query, State},
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;

use crate::fixtures::{CreateBehavior, ResultFixture};
use crate::recorder::{MockState, RecordedCreate, RecordedFetch, RequestMeta};

pub const API_KEY_HEADER: &str = "x-rapidapi-key";
pub const API_HOST_HEADER: &str = "x-rapidapi-host";

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_string())
}

fn request_meta(headers: &HeaderMap, query: HashMap<String, String>) -> RequestMeta {
    RequestMeta {
        query,
        content_type: header_value(headers, CONTENT_TYPE.as_str()),
        api_key: header_value(headers, API_KEY_HEADER),
        api_host: header_value(headers, API_HOST_HEADER),
    }
}

pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "judge0-mock"
    }))
}

pub async fn create_submission(
    State(state): State<Arc<MockState>>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    tracing::info!("Create submission: {}", body);
    state.record_create(RecordedCreate {
        meta: request_meta(&headers, query),
        body,
    });

    match &state.fixture.create {
        CreateBehavior::Token => {
            let token = uuid::Uuid::new_v4().to_string();
            state.issue_token(&token);
            (StatusCode::CREATED, Json(json!({ "token": token }))).into_response()
        }
        CreateBehavior::NoToken => (StatusCode::CREATED, Json(json!({}))).into_response(),
        CreateBehavior::EmptyBody => StatusCode::CREATED.into_response(),
        CreateBehavior::Fail { status, body } => {
            let status =
                StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, body.clone()).into_response()
        }
    }
}

pub async fn get_submission(
    Path(token): Path<String>,
    State(state): State<Arc<MockState>>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    tracing::info!("Get submission: {}", token);
    state.record_fetch(RecordedFetch {
        meta: request_meta(&headers, query),
        token: token.clone(),
    });

    if let Some(status) = state.fixture.fetch_failure {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        return (status, "mock fetch failure").into_response();
    }

    match state.take_pending(&token) {
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "submission not found" })),
        )
            .into_response(),
        Some(true) => Json(ResultFixture::pending_response(&token)).into_response(),
        Some(false) => Json(state.fixture.result.to_response(&token)).into_response(),
    }
}
