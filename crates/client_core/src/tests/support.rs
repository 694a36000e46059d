use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

use async_trait::async_trait;
use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use shared::domain::{Draft, MovieId, MovieRecord};
use tokio::{
    net::TcpListener,
    sync::{oneshot, Mutex, Notify},
};

use crate::{error::StoreError, remote_store::RemoteStore};

pub(crate) fn movie(id: &str, title: &str, year: i32) -> MovieRecord {
    MovieRecord {
        id: MovieId(id.to_string()),
        title: title.to_string(),
        description: String::new(),
        year: Some(year),
        streaming_id: None,
        image_url: None,
    }
}

/// In-memory backend that behaves like the real one unless told to fail.
#[derive(Default)]
pub(crate) struct FakeStore {
    movies: Mutex<Vec<MovieRecord>>,
    list_failure: Mutex<Option<StoreError>>,
    create_failure: Mutex<Option<StoreError>>,
    created: Mutex<Vec<Draft>>,
    list_calls: AtomicUsize,
}

impl FakeStore {
    pub(crate) fn with_movies(movies: Vec<MovieRecord>) -> Arc<Self> {
        Arc::new(Self {
            movies: Mutex::new(movies),
            ..Self::default()
        })
    }

    pub(crate) async fn fail_lists(&self, err: Option<StoreError>) {
        *self.list_failure.lock().await = err;
    }

    pub(crate) async fn fail_creates(&self, err: Option<StoreError>) {
        *self.create_failure.lock().await = err;
    }

    pub(crate) async fn created(&self) -> Vec<Draft> {
        self.created.lock().await.clone()
    }

    pub(crate) fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RemoteStore for FakeStore {
    async fn list_movies(&self) -> Result<Vec<MovieRecord>, StoreError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.list_failure.lock().await.clone() {
            return Err(err);
        }
        Ok(self.movies.lock().await.clone())
    }

    async fn create_movie(&self, draft: &Draft) -> Result<(), StoreError> {
        if let Some(err) = self.create_failure.lock().await.clone() {
            return Err(err);
        }
        self.created.lock().await.push(draft.clone());
        let mut movies = self.movies.lock().await;
        let id = format!("generated-{}", movies.len() + 1);
        movies.push(MovieRecord {
            id: MovieId(id),
            title: draft.title.clone(),
            description: draft.description.clone(),
            year: Some(draft.year),
            streaming_id: (!draft.streaming_id.is_empty()).then(|| draft.streaming_id.clone()),
            image_url: None,
        });
        Ok(())
    }
}

/// Each `list_movies` call waits for the next queued gate, so tests decide
/// the order in which overlapping fetches resolve. Creates wait on their own
/// gates the same way, and succeed immediately when none is queued.
#[derive(Default)]
pub(crate) struct GatedStore {
    gates: Mutex<VecDeque<oneshot::Receiver<Vec<MovieRecord>>>>,
    create_gates: Mutex<VecDeque<oneshot::Receiver<()>>>,
    create_started: Notify,
}

impl GatedStore {
    pub(crate) async fn gate(&self) -> oneshot::Sender<Vec<MovieRecord>> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().await.push_back(rx);
        tx
    }

    pub(crate) async fn create_gate(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.create_gates.lock().await.push_back(rx);
        tx
    }

    pub(crate) async fn create_started(&self) {
        self.create_started.notified().await;
    }
}

#[async_trait]
impl RemoteStore for GatedStore {
    async fn list_movies(&self) -> Result<Vec<MovieRecord>, StoreError> {
        let gate = self
            .gates
            .lock()
            .await
            .pop_front()
            .ok_or_else(|| StoreError::Transport("no gate queued".to_string()))?;
        gate.await
            .map_err(|_| StoreError::Transport("gate dropped".to_string()))
    }

    async fn create_movie(&self, _draft: &Draft) -> Result<(), StoreError> {
        self.create_started.notify_one();
        let gate = self.create_gates.lock().await.pop_front();
        if let Some(gate) = gate {
            gate.await.map_err(|_| StoreError::CreateRejected {
                status: None,
                reason: "gate dropped".to_string(),
            })?;
        }
        Ok(())
    }
}

#[derive(Clone)]
pub(crate) struct BackendState {
    pub(crate) movies: Arc<Mutex<Vec<Value>>>,
    pub(crate) create_status: Arc<Mutex<StatusCode>>,
    pub(crate) list_status: Arc<Mutex<StatusCode>>,
    pub(crate) received: Arc<Mutex<Vec<(Option<String>, Value)>>>,
}

impl BackendState {
    fn new(movies: Vec<Value>) -> Self {
        Self {
            movies: Arc::new(Mutex::new(movies)),
            create_status: Arc::new(Mutex::new(StatusCode::CREATED)),
            list_status: Arc::new(Mutex::new(StatusCode::OK)),
            received: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

async fn handle_list(State(state): State<BackendState>) -> (StatusCode, Json<Value>) {
    let status = *state.list_status.lock().await;
    if !status.is_success() {
        return (status, Json(json!({ "message": "backend unavailable" })));
    }
    let movies = state.movies.lock().await.clone();
    (status, Json(Value::Array(movies)))
}

async fn handle_create(
    State(state): State<BackendState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> StatusCode {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    state.received.lock().await.push((content_type, body.clone()));

    let status = *state.create_status.lock().await;
    if status.is_success() {
        let mut movies = state.movies.lock().await;
        let mut stored = body;
        stored["_id"] = json!(format!("{:024x}", movies.len() + 1));
        movies.push(stored);
    }
    status
}

/// Serves `/api/movies` on an ephemeral port and returns the endpoint URL.
pub(crate) async fn spawn_backend(movies: Vec<Value>) -> (String, BackendState) {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let state = BackendState::new(movies);
    let app = Router::new()
        .route("/api/movies", get(handle_list).post(handle_create))
        .with_state(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}/api/movies"), state)
}
