//! In-memory emulation of the Yandex Webmaster API v4.
//!
//! Covers the user lookup, hosts, user-added sitemaps, indexing history,
//! the recrawl queue, popular search queries and diagnostics. Every route
//! requires `Authorization: OAuth <token>` and only answers for the
//! configured user id. DTOs are defined independently of `webmaster-core`;
//! the core's integration tests catch schema drift between the two.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::{
    extract::{Path, Query, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const DEFAULT_TOKEN: &str = "test-token";
pub const DEFAULT_USER_ID: u64 = 42;
pub const DAILY_RECRAWL_QUOTA: usize = 20;

#[derive(Clone, Debug)]
pub struct MockConfig {
    pub token: String,
    pub user_id: u64,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            token: DEFAULT_TOKEN.to_string(),
            user_id: DEFAULT_USER_ID,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Host {
    pub host_id: String,
    pub ascii_host_url: String,
    pub unicode_host_url: String,
    pub verified: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserAddedSitemap {
    pub sitemap_id: String,
    pub sitemap_url: String,
    pub added_date: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RecrawlTask {
    pub task_id: String,
    pub url: String,
    pub state: String,
}

#[derive(Default)]
pub struct Store {
    hosts: BTreeMap<String, Host>,
    sitemaps: HashMap<String, Vec<UserAddedSitemap>>,
    recrawl: HashMap<String, Vec<RecrawlTask>>,
}

pub type Db = Arc<RwLock<Store>>;

/// Shared server state. Clones share the same store and counters.
#[derive(Clone)]
pub struct AppState {
    config: Arc<MockConfig>,
    db: Db,
    user_lookups: Arc<AtomicUsize>,
}

impl AppState {
    pub fn new(config: MockConfig) -> Self {
        Self {
            config: Arc::new(config),
            db: Db::default(),
            user_lookups: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of `GET /user` requests served so far.
    pub fn user_lookups(&self) -> usize {
        self.user_lookups.load(Ordering::SeqCst)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(MockConfig::default())
    }
}

/// Error body in the service's `{error_code, error_message}` shape.
#[derive(Debug)]
pub struct ApiFailure {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl ApiFailure {
    fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let body = json!({ "error_code": self.code, "error_message": self.message });
        (self.status, Json(body)).into_response()
    }
}

pub fn app(config: MockConfig) -> Router {
    app_with_state(AppState::new(config))
}

pub fn app_with_state(state: AppState) -> Router {
    Router::new()
        .route("/user", get(get_user))
        .route("/user/{user_id}/hosts", get(list_hosts).post(add_host))
        .route(
            "/user/{user_id}/hosts/{host_id}",
            get(get_host).delete(delete_host),
        )
        .route("/user/{user_id}/hosts/{host_id}/sitemaps", get(list_sitemaps))
        .route(
            "/user/{user_id}/hosts/{host_id}/user-added-sitemaps",
            post(add_sitemap),
        )
        .route(
            "/user/{user_id}/hosts/{host_id}/user-added-sitemaps/{sitemap_id}",
            get(get_user_added_sitemap).delete(delete_sitemap),
        )
        .route(
            "/user/{user_id}/hosts/{host_id}/indexing/history",
            get(indexing_history),
        )
        .route(
            "/user/{user_id}/hosts/{host_id}/recrawl/queue",
            get(list_recrawl_tasks).post(enqueue_recrawl),
        )
        .route(
            "/user/{user_id}/hosts/{host_id}/recrawl/queue/{task_id}",
            get(get_recrawl_task),
        )
        .route(
            "/user/{user_id}/hosts/{host_id}/recrawl/quota",
            get(recrawl_quota),
        )
        .route(
            "/user/{user_id}/hosts/{host_id}/search-queries/popular",
            get(popular_queries),
        )
        .route(
            "/user/{user_id}/hosts/{host_id}/diagnostics",
            get(diagnostics),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_oauth))
        .with_state(state)
}

pub async fn run(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_state(state)).await
}

async fn require_oauth(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let expected = format!("OAuth {}", state.config.token);
    let presented = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    if presented != Some(expected.as_str()) {
        return ApiFailure::new(
            StatusCode::UNAUTHORIZED,
            "INVALID_OAUTH_TOKEN",
            "OAuth token is missing or invalid",
        )
        .into_response();
    }
    next.run(request).await
}

fn check_user(state: &AppState, user_id: u64) -> Result<(), ApiFailure> {
    if user_id == state.config.user_id {
        Ok(())
    } else {
        Err(ApiFailure::new(
            StatusCode::FORBIDDEN,
            "ACCESS_FORBIDDEN",
            format!("user {user_id} is not accessible with this token"),
        ))
    }
}

fn require_host(store: &Store, host_id: &str) -> Result<(), ApiFailure> {
    if store.hosts.contains_key(host_id) {
        Ok(())
    } else {
        Err(ApiFailure::new(
            StatusCode::NOT_FOUND,
            "HOST_NOT_FOUND",
            format!("host {host_id} is not added to the account"),
        ))
    }
}

/// `https://Example.com/path` becomes `("https:example.com:443", "https://example.com/")`.
fn normalize_host_url(url: &str) -> Option<(String, String)> {
    let (scheme, rest) = url.split_once("://")?;
    let port = match scheme {
        "https" => 443,
        "http" => 80,
        _ => return None,
    };
    let host = rest.split('/').next()?.to_ascii_lowercase();
    if host.is_empty() {
        return None;
    }
    Some((format!("{scheme}:{host}:{port}"), format!("{scheme}://{host}/")))
}

#[derive(Deserialize)]
struct UrlBody {
    url: String,
}

#[derive(Deserialize)]
struct AddHostBody {
    host_url: String,
}

#[derive(Deserialize)]
struct DateRangeParams {
    date_from: String,
    date_to: String,
}

#[derive(Deserialize)]
struct SitemapParams {
    limit: Option<usize>,
    from: Option<String>,
}

#[derive(Deserialize)]
struct RecrawlListParams {
    #[allow(dead_code)]
    date_from: String,
    #[allow(dead_code)]
    date_to: String,
    #[serde(default = "default_limit")]
    limit: usize,
    #[serde(default)]
    offset: usize,
}

fn default_limit() -> usize {
    100
}

async fn get_user(State(state): State<AppState>) -> Json<Value> {
    state.user_lookups.fetch_add(1, Ordering::SeqCst);
    Json(json!({ "user_id": state.config.user_id }))
}

async fn list_hosts(
    State(state): State<AppState>,
    Path(user_id): Path<u64>,
) -> Result<Json<Value>, ApiFailure> {
    check_user(&state, user_id)?;
    let store = state.db.read().await;
    let hosts: Vec<&Host> = store.hosts.values().collect();
    Ok(Json(json!({ "hosts": hosts })))
}

async fn add_host(
    State(state): State<AppState>,
    Path(user_id): Path<u64>,
    Json(input): Json<AddHostBody>,
) -> Result<(StatusCode, Json<Value>), ApiFailure> {
    check_user(&state, user_id)?;
    let (host_id, url) = normalize_host_url(&input.host_url).ok_or_else(|| {
        ApiFailure::new(
            StatusCode::BAD_REQUEST,
            "INVALID_URL",
            format!("cannot parse host url {}", input.host_url),
        )
    })?;
    let mut store = state.db.write().await;
    if store.hosts.contains_key(&host_id) {
        return Err(ApiFailure::new(
            StatusCode::CONFLICT,
            "HOST_ALREADY_ADDED",
            format!("host {host_id} is already added"),
        ));
    }
    store.hosts.insert(
        host_id.clone(),
        Host {
            host_id: host_id.clone(),
            ascii_host_url: url.clone(),
            unicode_host_url: url,
            verified: false,
        },
    );
    tracing::debug!(%host_id, "host added");
    Ok((StatusCode::CREATED, Json(json!({ "host_id": host_id }))))
}

async fn get_host(
    State(state): State<AppState>,
    Path((user_id, host_id)): Path<(u64, String)>,
) -> Result<Json<Host>, ApiFailure> {
    check_user(&state, user_id)?;
    let store = state.db.read().await;
    require_host(&store, &host_id)?;
    Ok(Json(store.hosts[&host_id].clone()))
}

async fn delete_host(
    State(state): State<AppState>,
    Path((user_id, host_id)): Path<(u64, String)>,
) -> Result<StatusCode, ApiFailure> {
    check_user(&state, user_id)?;
    let mut store = state.db.write().await;
    require_host(&store, &host_id)?;
    store.hosts.remove(&host_id);
    store.sitemaps.remove(&host_id);
    store.recrawl.remove(&host_id);
    Ok(StatusCode::NO_CONTENT)
}

async fn list_sitemaps(
    State(state): State<AppState>,
    Path((user_id, host_id)): Path<(u64, String)>,
    Query(params): Query<SitemapParams>,
) -> Result<Json<Value>, ApiFailure> {
    check_user(&state, user_id)?;
    let store = state.db.read().await;
    require_host(&store, &host_id)?;
    let sitemaps: Vec<Value> = store
        .sitemaps
        .get(&host_id)
        .into_iter()
        .flatten()
        .skip_while(|s| params.from.as_deref().is_some_and(|from| s.sitemap_id != from))
        .take(params.limit.unwrap_or(10))
        .map(|s| {
            json!({
                "sitemap_id": s.sitemap_id,
                "sitemap_url": s.sitemap_url,
                "urls_count": 0,
                "errors_count": 0,
                "children_count": 0,
                "sources": ["USER"],
                "sitemap_type": "SITEMAP"
            })
        })
        .collect();
    Ok(Json(json!({ "sitemaps": sitemaps })))
}

async fn add_sitemap(
    State(state): State<AppState>,
    Path((user_id, host_id)): Path<(u64, String)>,
    Json(input): Json<UrlBody>,
) -> Result<(StatusCode, Json<Value>), ApiFailure> {
    check_user(&state, user_id)?;
    let mut store = state.db.write().await;
    require_host(&store, &host_id)?;
    let sitemap = UserAddedSitemap {
        sitemap_id: Uuid::new_v4().to_string(),
        sitemap_url: input.url,
        added_date: "2023-01-01T00:00:00,000+0300".to_string(),
    };
    let sitemap_id = sitemap.sitemap_id.clone();
    store.sitemaps.entry(host_id).or_default().push(sitemap);
    Ok((StatusCode::ACCEPTED, Json(json!({ "sitemap_id": sitemap_id }))))
}

async fn get_user_added_sitemap(
    State(state): State<AppState>,
    Path((user_id, host_id, sitemap_id)): Path<(u64, String, String)>,
) -> Result<Json<UserAddedSitemap>, ApiFailure> {
    check_user(&state, user_id)?;
    let store = state.db.read().await;
    require_host(&store, &host_id)?;
    store
        .sitemaps
        .get(&host_id)
        .and_then(|list| list.iter().find(|s| s.sitemap_id == sitemap_id))
        .cloned()
        .map(Json)
        .ok_or_else(|| sitemap_not_found(&sitemap_id))
}

async fn delete_sitemap(
    State(state): State<AppState>,
    Path((user_id, host_id, sitemap_id)): Path<(u64, String, String)>,
) -> Result<StatusCode, ApiFailure> {
    check_user(&state, user_id)?;
    let mut store = state.db.write().await;
    require_host(&store, &host_id)?;
    let list = store.sitemaps.entry(host_id).or_default();
    let before = list.len();
    list.retain(|s| s.sitemap_id != sitemap_id);
    if list.len() == before {
        return Err(sitemap_not_found(&sitemap_id));
    }
    Ok(StatusCode::NO_CONTENT)
}

fn sitemap_not_found(sitemap_id: &str) -> ApiFailure {
    ApiFailure::new(
        StatusCode::NOT_FOUND,
        "SITEMAP_NOT_FOUND",
        format!("sitemap {sitemap_id} not found"),
    )
}

async fn indexing_history(
    State(state): State<AppState>,
    Path((user_id, host_id)): Path<(u64, String)>,
    Query(range): Query<DateRangeParams>,
) -> Result<Json<Value>, ApiFailure> {
    check_user(&state, user_id)?;
    require_host(&*state.db.read().await, &host_id)?;
    Ok(Json(json!({
        "indicators": {
            "HTTP_2XX": [
                { "date": range.date_from, "value": 10 },
                { "date": range.date_to, "value": 12 }
            ]
        }
    })))
}

async fn enqueue_recrawl(
    State(state): State<AppState>,
    Path((user_id, host_id)): Path<(u64, String)>,
    Json(input): Json<UrlBody>,
) -> Result<(StatusCode, Json<Value>), ApiFailure> {
    check_user(&state, user_id)?;
    let mut store = state.db.write().await;
    require_host(&store, &host_id)?;
    let tasks = store.recrawl.entry(host_id).or_default();
    if tasks.len() >= DAILY_RECRAWL_QUOTA {
        return Err(ApiFailure::new(
            StatusCode::TOO_MANY_REQUESTS,
            "QUOTA_EXCEEDED",
            "daily recrawl quota is exhausted",
        ));
    }
    let task = RecrawlTask {
        task_id: Uuid::new_v4().to_string(),
        url: input.url,
        state: "IN_PROGRESS".to_string(),
    };
    let task_id = task.task_id.clone();
    tasks.push(task);
    let remainder = DAILY_RECRAWL_QUOTA - tasks.len();
    Ok((
        StatusCode::ACCEPTED,
        Json(json!({ "task_id": task_id, "quota_remainder": remainder })),
    ))
}

async fn list_recrawl_tasks(
    State(state): State<AppState>,
    Path((user_id, host_id)): Path<(u64, String)>,
    Query(params): Query<RecrawlListParams>,
) -> Result<Json<Value>, ApiFailure> {
    check_user(&state, user_id)?;
    let store = state.db.read().await;
    require_host(&store, &host_id)?;
    let tasks: Vec<&RecrawlTask> = store
        .recrawl
        .get(&host_id)
        .into_iter()
        .flatten()
        .skip(params.offset)
        .take(params.limit)
        .collect();
    Ok(Json(json!({ "tasks": tasks })))
}

async fn get_recrawl_task(
    State(state): State<AppState>,
    Path((user_id, host_id, task_id)): Path<(u64, String, String)>,
) -> Result<Json<RecrawlTask>, ApiFailure> {
    check_user(&state, user_id)?;
    let store = state.db.read().await;
    require_host(&store, &host_id)?;
    store
        .recrawl
        .get(&host_id)
        .and_then(|tasks| tasks.iter().find(|t| t.task_id == task_id))
        .cloned()
        .map(Json)
        .ok_or_else(|| {
            ApiFailure::new(
                StatusCode::NOT_FOUND,
                "TASK_NOT_FOUND",
                format!("recrawl task {task_id} not found"),
            )
        })
}

async fn recrawl_quota(
    State(state): State<AppState>,
    Path((user_id, host_id)): Path<(u64, String)>,
) -> Result<Json<Value>, ApiFailure> {
    check_user(&state, user_id)?;
    let store = state.db.read().await;
    require_host(&store, &host_id)?;
    let used = store.recrawl.get(&host_id).map_or(0, Vec::len);
    Ok(Json(json!({
        "daily_quota": DAILY_RECRAWL_QUOTA,
        "quota_remainder": DAILY_RECRAWL_QUOTA - used
    })))
}

async fn popular_queries(
    State(state): State<AppState>,
    Path((user_id, host_id)): Path<(u64, String)>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, ApiFailure> {
    check_user(&state, user_id)?;
    require_host(&*state.db.read().await, &host_id)?;
    let param = |name: &str| {
        params.get(name).cloned().ok_or_else(|| {
            ApiFailure::new(
                StatusCode::BAD_REQUEST,
                "FIELD_VALIDATION_ERROR",
                format!("missing parameter {name}"),
            )
        })
    };
    let indicator = param("query_indicator")?;
    let date_from = param("date_from")?;
    let date_to = param("date_to")?;
    let device = params
        .get("device_type_indicator")
        .map_or("ALL", String::as_str);
    let indicators = BTreeMap::from([(indicator, 150.0)]);
    Ok(Json(json!({
        "queries": [{
            "query_id": "q-1",
            "query_text": format!("popular on {device}"),
            "indicators": indicators
        }],
        "date_from": date_from,
        "date_to": date_to,
        "count": 1
    })))
}

async fn diagnostics(
    State(state): State<AppState>,
    Path((user_id, host_id)): Path<(u64, String)>,
) -> Result<Json<Value>, ApiFailure> {
    check_user(&state, user_id)?;
    let store = state.db.read().await;
    require_host(&store, &host_id)?;
    let has_sitemaps = store.sitemaps.get(&host_id).is_some_and(|s| !s.is_empty());
    Ok(Json(json!({
        "problems": {
            "NO_SITEMAPS": {
                "severity": "POSSIBLE_PROBLEM",
                "state": if has_sitemaps { "ABSENT" } else { "PRESENT" },
                "last_state_update": "2023-01-05T00:00:00,000+0300"
            },
            "DNS_ERROR": { "severity": "FATAL", "state": "ABSENT" }
        }
    })))
}
