use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use log::{error, info, warn};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::error::ViewerError;
use crate::fields::ViewMode;
use crate::loader;
use crate::page::PageRenderer;
use crate::pager::Transition;
use crate::session::Session;
use crate::store::{SESSION_COOKIE, SessionStore};

/// Name of the multipart field carrying the uploaded file.
pub const UPLOAD_FIELD: &str = "file";

pub struct AppState {
    sessions: SessionStore,
    pages: PageRenderer,
}

impl AppState {
    pub fn new() -> Result<Self, ViewerError> {
        Ok(AppState {
            sessions: SessionStore::default(),
            pages: PageRenderer::new()?,
        })
    }

    /// Run `f` against the caller's session, creating one (and its cookie)
    /// when the request has no live session.
    fn with_session<R>(&self, jar: CookieJar, f: impl FnOnce(&mut Session) -> R) -> (CookieJar, R) {
        let current = jar.get(SESSION_COOKIE).map(|cookie| cookie.value().to_string());
        let (session_id, created, result) = self.sessions.with_or_create(current.as_deref(), f);

        if !created {
            return (jar, result);
        }
        let cookie = Cookie::build((SESSION_COOKIE, session_id))
            .path("/")
            .http_only(true);
        (jar.add(cookie), result)
    }
}

/// Errors returned by the HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    NotFound,
    BadRequest(String),
    Internal(ViewerError),
}

impl From<ViewerError> for AppError {
    fn from(err: ViewerError) -> Self {
        AppError::Internal(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "Not found").into_response(),
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message).into_response(),
            AppError::Internal(err) => {
                error!("Request failed: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}

fn parse_mode(slug: &str) -> Result<ViewMode, AppError> {
    ViewMode::from_slug(slug).ok_or(AppError::NotFound)
}

fn view_location(mode: ViewMode) -> String {
    format!("/{}", mode.slug())
}

/// Build the application router around shared state.
pub fn router(state: Arc<AppState>, config: &ServerConfig) -> Router {
    Router::new()
        .route("/", get(serve_landing))
        .route("/health", get(health))
        .route("/:mode", get(show_view))
        .route("/:mode/upload", post(upload_file))
        .route("/:mode/previous", post(previous_record))
        .route("/:mode/next", post(next_record))
        .route("/api/:mode", get(view_json))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let app_state = Arc::new(AppState::new()?);
    let app = router(app_state, &config);

    let listener = TcpListener::bind(config.addr).await?;
    info!("Listening on http://{}", config.addr);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn serve_landing() -> Redirect {
    Redirect::to(&view_location(ViewMode::Standup))
}

async fn health() -> &'static str {
    "ok"
}

async fn show_view(
    Path(slug): Path<String>,
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<(CookieJar, Html<String>), AppError> {
    let mode = parse_mode(&slug)?;
    let (jar, (screen, file_name)) = state.with_session(jar, |session| {
        let view = session.view(mode);
        (view.screen(mode), view.file_name().map(str::to_string))
    });
    let html = state.pages.render(mode, &screen, file_name.as_deref())?;
    Ok((jar, Html(html)))
}

async fn view_json(
    Path(slug): Path<String>,
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    let mode = parse_mode(&slug)?;
    let (jar, screen) = state.with_session(jar, |session| session.screen(mode));
    Ok((jar, Json(screen)))
}

async fn upload_file(
    Path(slug): Path<String>,
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut multipart: Multipart,
) -> Result<(CookieJar, Redirect), AppError> {
    let mode = parse_mode(&slug)?;

    let mut upload: Option<(Option<String>, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed upload: {}", e)))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let file_name = field
            .file_name()
            .filter(|name| !name.is_empty())
            .map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Malformed upload: {}", e)))?;
        upload = Some((file_name, data.to_vec()));
    }

    let (file_name, data) = upload.unwrap_or((None, Vec::new()));
    // Parse off the async workers and before taking the session lock; only
    // the install runs under it.
    let name = file_name.clone();
    let loaded = tokio::task::spawn_blocking(move || loader::load_upload(name.as_deref(), &data))
        .await
        .map_err(|e| ViewerError::from(std::io::Error::from(e)))?;
    let (jar, result) = state.with_session(jar, |session| {
        session.view_mut(mode).finish_upload(file_name.as_deref(), loaded)
    });
    match result {
        Ok(rows) => info!("{} upload loaded {} rows", mode, rows),
        Err(err) if err.is_upload_error() => warn!("{} upload rejected: {}", mode, err),
        Err(err) => return Err(err.into()),
    }

    Ok((jar, Redirect::to(&view_location(mode))))
}

async fn navigate(
    slug: String,
    state: Arc<AppState>,
    jar: CookieJar,
    transition: Transition,
) -> Result<(CookieJar, Redirect), AppError> {
    let mode = parse_mode(&slug)?;
    let (jar, _) = state.with_session(jar, |session| session.view_mut(mode).navigate(transition));
    Ok((jar, Redirect::to(&view_location(mode))))
}

async fn previous_record(
    Path(slug): Path<String>,
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<(CookieJar, Redirect), AppError> {
    navigate(slug, state, jar, Transition::Previous).await
}

async fn next_record(
    Path(slug): Path<String>,
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<(CookieJar, Redirect), AppError> {
    navigate(slug, state, jar, Transition::Next).await
}
