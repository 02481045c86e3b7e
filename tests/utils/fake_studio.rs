/// In-process fake of the Studio and search index APIs
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

use super::fixtures;

#[derive(Debug, Default)]
pub struct FakeStudioState {
    pub base_url: String,
    /// Advanced settings keyed by snake_case name
    pub settings: Map<String, Value>,
    pub forbid_settings: bool,
    pub patch_bodies: Vec<Value>,
    pub bulk_requests: Vec<Value>,
    /// Answer every bulk migration request with 503
    pub bulk_unavailable: bool,
    /// States returned by successive polls of the task
    pub task_states: Vec<(String, bool)>,
    pub task_polls: usize,
    pub search_queries: Vec<Value>,
    pub migration_info: Value,
    pub max_blocks: u64,
    /// Requests that fail with 503 before the next one succeeds
    pub unavailable_budget: usize,
}

pub type SharedState = Arc<Mutex<FakeStudioState>>;

pub struct FakeStudio {
    pub addr: SocketAddr,
    pub state: SharedState,
}

impl FakeStudio {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let settings = match fixtures::advanced_settings() {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        let state = Arc::new(Mutex::new(FakeStudioState {
            base_url: format!("http://{}", addr),
            settings,
            task_states: vec![("Succeeded".to_string(), false)],
            migration_info: json!({}),
            max_blocks: 1000,
            ..Default::default()
        }));

        let router = Router::new()
            .route(
                "/api/contentstore/v0/advanced_settings/:course_id",
                get(get_settings).patch(patch_settings),
            )
            .route(
                "/api/contentstore/v1/course_details/:course_id",
                get(course_details),
            )
            .route(
                "/api/modulestore_migrator/v1/bulk_modulestore_migrate/",
                post(bulk_migrate),
            )
            .route("/api/modulestore_migrator/v1/migrations/:uuid/", get(migration_task))
            .route("/api/modulestore_migrator/v1/migration_info/", get(migration_info))
            .route("/api/libraries/v2/block_limits/", get(block_limits))
            .route("/api/content_search/v2/studio/", get(search_config))
            .route("/multi-search", post(multi_search))
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self { addr, state }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

async fn get_settings(
    State(state): State<SharedState>,
    Path(_course_id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    let state = state.lock().unwrap();
    if state.forbid_settings {
        return (StatusCode::FORBIDDEN, Json(json!({"detail": "forbidden"})));
    }
    assert_eq!(params.get("fetch_all").map(String::as_str), Some("0"));
    (StatusCode::OK, Json(Value::Object(state.settings.clone())))
}

async fn patch_settings(
    State(state): State<SharedState>,
    Path(_course_id): Path<String>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let mut state = state.lock().unwrap();
    if state.forbid_settings {
        return (StatusCode::FORBIDDEN, Json(json!({"detail": "forbidden"})));
    }
    if let Value::Object(changes) = &body {
        for (name, change) in changes {
            if let Some(Value::Object(setting)) = state.settings.get_mut(name) {
                setting.insert("value".to_string(), change["value"].clone());
            }
        }
    }
    state.patch_bodies.push(body);
    (StatusCode::OK, Json(Value::Object(state.settings.clone())))
}

async fn course_details(Path(course_id): Path<String>) -> impl IntoResponse {
    if course_id == fixtures::COURSE {
        (StatusCode::OK, Json(fixtures::course_details()))
    } else {
        (StatusCode::NOT_FOUND, Json(json!({"detail": "Not found."})))
    }
}

async fn bulk_migrate(State(state): State<SharedState>, Json(body): Json<Value>) -> impl IntoResponse {
    let mut state = state.lock().unwrap();
    state.bulk_requests.push(body);
    if state.bulk_unavailable {
        return (StatusCode::SERVICE_UNAVAILABLE, Json(json!({})));
    }
    (
        StatusCode::CREATED,
        Json(fixtures::task(fixtures::TASK_UUID, "Pending", false)),
    )
}

async fn migration_task(State(state): State<SharedState>, Path(uuid): Path<String>) -> impl IntoResponse {
    let mut state = state.lock().unwrap();
    if state.unavailable_budget > 0 {
        state.unavailable_budget -= 1;
        return (StatusCode::SERVICE_UNAVAILABLE, Json(json!({})));
    }
    if uuid != fixtures::TASK_UUID {
        return (StatusCode::NOT_FOUND, Json(json!({"detail": "Not found."})));
    }

    let index = state.task_polls.min(state.task_states.len().saturating_sub(1));
    state.task_polls += 1;
    let (task_state, is_failed) = state.task_states[index].clone();
    (
        StatusCode::OK,
        Json(fixtures::task(&uuid, &task_state, is_failed)),
    )
}

async fn migration_info(
    State(state): State<SharedState>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    assert!(params.contains_key("source_keys"));
    Json(state.lock().unwrap().migration_info.clone())
}

async fn block_limits(State(state): State<SharedState>) -> impl IntoResponse {
    Json(json!({ "max_blocks_per_content_library": state.lock().unwrap().max_blocks }))
}

async fn search_config(State(state): State<SharedState>) -> impl IntoResponse {
    Json(json!({
        "url": state.lock().unwrap().base_url,
        "index_name": "studio_content",
        "api_key": "search-key"
    }))
}

async fn multi_search(State(state): State<SharedState>, Json(body): Json<Value>) -> impl IntoResponse {
    let query = body["queries"][0].clone();
    state.lock().unwrap().search_queries.push(query.clone());

    let filters: Vec<String> = query["filter"]
        .as_array()
        .map(|f| f.iter().filter_map(Value::as_str).map(str::to_string).collect())
        .unwrap_or_default();

    let result = if query.get("attributesToRetrieve").is_some() {
        json!({
            "hits": [{ "usage_key": "block-v1:OpenedX+DemoX+2025+type@problem-builder+block@pb1" }],
            "estimatedTotalHits": 1
        })
    } else if filters.iter().any(|f| f.starts_with("breadcrumbs.usage_key")) {
        json!({ "hits": [], "facetDistribution": { "block_type": fixtures::child_facets() } })
    } else {
        json!({ "hits": [], "facetDistribution": { "block_type": fixtures::course_facets() } })
    };

    Json(json!({ "results": [result] }))
}
