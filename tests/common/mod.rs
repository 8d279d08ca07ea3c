#![allow(dead_code)]

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use flujos::config::ApiSettings;
use flujos::domain::{Flow, FlowDraft, UnauthorizedHandler};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// In-memory stand-in for the flow server
#[derive(Default)]
pub struct FakeState {
    pub flows: Mutex<Vec<Flow>>,
    /// Raw step trees as posted, keyed by flow id
    pub steps: Mutex<HashMap<i64, Value>>,
    next_id: AtomicUsize,
    /// Every request answers 401 while set
    pub unauthorized: AtomicBool,
    /// Every request answers 500 while set
    pub failing: AtomicBool,
    pub list_calls: AtomicUsize,
    pub save_calls: AtomicUsize,
}

impl FakeState {
    fn guard(&self) -> Result<(), StatusCode> {
        if self.unauthorized.load(Ordering::SeqCst) {
            return Err(StatusCode::UNAUTHORIZED);
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
        Ok(())
    }

    pub fn seed_flow(&self, name: &str, active: bool) -> Flow {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) as i64 + 1;
        let flow = Flow {
            id,
            name: name.to_string(),
            active,
        };
        self.flows.lock().unwrap().push(flow.clone());
        flow
    }

    pub fn seed_steps(&self, flow_id: i64, steps: Value) {
        self.steps.lock().unwrap().insert(flow_id, steps);
    }

    pub fn stored_steps(&self, flow_id: i64) -> Option<Value> {
        self.steps.lock().unwrap().get(&flow_id).cloned()
    }
}

type Shared = Arc<FakeState>;

async fn list_flows(State(state): State<Shared>) -> Result<Json<Value>, StatusCode> {
    state.list_calls.fetch_add(1, Ordering::SeqCst);
    state.guard()?;
    let flows = state.flows.lock().unwrap().clone();
    Ok(Json(json!({ "flujos": flows })))
}

async fn create_flow(
    State(state): State<Shared>,
    Json(draft): Json<FlowDraft>,
) -> Result<Json<Flow>, StatusCode> {
    state.guard()?;
    Ok(Json(state.seed_flow(&draft.name, draft.active)))
}

async fn update_flow(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    Json(draft): Json<FlowDraft>,
) -> Result<Json<Flow>, StatusCode> {
    state.guard()?;
    let mut flows = state.flows.lock().unwrap();
    let flow = flows.iter_mut().find(|f| f.id == id).ok_or(StatusCode::NOT_FOUND)?;
    flow.name = draft.name;
    flow.active = draft.active;
    Ok(Json(flow.clone()))
}

async fn delete_flow(State(state): State<Shared>, Path(id): Path<i64>) -> Result<StatusCode, StatusCode> {
    state.guard()?;
    let mut flows = state.flows.lock().unwrap();
    let before = flows.len();
    flows.retain(|f| f.id != id);
    if flows.len() == before {
        return Err(StatusCode::NOT_FOUND);
    }
    state.steps.lock().unwrap().remove(&id);
    Ok(StatusCode::NO_CONTENT)
}

async fn get_steps(State(state): State<Shared>, Path(id): Path<i64>) -> Result<Json<Value>, StatusCode> {
    state.guard()?;
    Ok(Json(state.stored_steps(id).unwrap_or_else(|| json!([]))))
}

async fn save_steps(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    Json(steps): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    state.save_calls.fetch_add(1, Ordering::SeqCst);
    state.guard()?;
    state.seed_steps(id, steps);
    Ok(Json(json!({ "ok": true })))
}

pub struct FakeFlowServer {
    pub addr: SocketAddr,
    pub base_url: String,
    pub state: Shared,
}

impl FakeFlowServer {
    pub async fn start() -> Self {
        let state: Shared = Arc::new(FakeState::default());

        let app = Router::new()
            .route("/api/flujos", get(list_flows).post(create_flow))
            .route("/api/flujos/:id", put(update_flow).delete(delete_flow))
            .route("/api/detalle_flujos/:id", get(get_steps).post(save_steps))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        FakeFlowServer { addr, base_url, state }
    }

    pub fn api_settings(&self) -> ApiSettings {
        ApiSettings {
            base_url: self.base_url.clone(),
            ..ApiSettings::default()
        }
    }
}

/// Records every login URL handed to the 401 hook
#[derive(Default)]
pub struct RecordingRedirect {
    pub calls: Mutex<Vec<String>>,
}

impl UnauthorizedHandler for RecordingRedirect {
    fn on_unauthorized(&self, login_url: &str) {
        self.calls.lock().unwrap().push(login_url.to_string());
    }
}
