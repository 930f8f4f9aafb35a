use super::csrf::{csrf_token, validate_csrf};
use super::prelude::*;
use super::runs::session_run_id;
use crate::check::{UrlCheck, run_checks};
use crate::constants::REFRESH_INTERVAL_SECONDS;
use axum::Json;
use axum::response::{Redirect, Response};

#[derive(Deserialize)]
pub(crate) struct PingForm {
    #[serde(default)]
    urls: String,
    #[serde(default)]
    assertion: String,
    csrf_token: String,
}

#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub(crate) struct IndexTemplate {
    csrf_token: String,
    urls: String,
    assertion: String,
    loading: bool,
    refresh_seconds: u64,
    has_error: bool,
    error_message: String,
    url_error: String,
    assertion_error: String,
    statuses: Vec<UrlCheck>,
}

impl IndexTemplate {
    fn new(run: CheckRun, csrf_token: String) -> Self {
        Self {
            csrf_token,
            has_error: run.error.is_some(),
            error_message: run.error.unwrap_or_default(),
            url_error: run.input_errors.url,
            assertion_error: run.input_errors.assertion,
            urls: run.urls,
            assertion: run.assertion,
            loading: run.loading,
            refresh_seconds: REFRESH_INTERVAL_SECONDS,
            statuses: run.statuses,
        }
    }
}

/// Snapshot of the session's current run, or an idle one.
async fn current_run(state: &AppState, session: &Session) -> Result<CheckRun, PingAppError> {
    let run_id = session_run_id(session).await?;
    Ok(match state.runs.get(&run_id).await {
        Some(run) => run.read().await.clone(),
        None => CheckRun::default(),
    })
}

/// handles the / GET
pub(crate) async fn index_handler(
    State(state): State<AppState>,
    session: Session,
) -> Result<IndexTemplate, PingAppError> {
    let run = current_run(&state, &session).await?;
    let csrf_token = csrf_token(&session).await?;
    Ok(IndexTemplate::new(run, csrf_token))
}

/// handles the / POST, kicking off a new run
pub(crate) async fn submit_handler(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<PingForm>,
) -> Result<Response, PingAppError> {
    validate_csrf(&session, &form.csrf_token).await?;
    let run_id = session_run_id(&session).await?;

    let run = CheckRun::submit(&form.urls, &form.assertion);
    let start = run.loading;
    let run: SharedRun = Arc::new(RwLock::new(run));
    if !state.runs.replace_unless_loading(&run_id, run.clone()).await {
        info!("Ignoring submission for run {run_id}, it's still checking");
        return Ok(Redirect::to("/").into_response());
    }

    if start {
        debug!("Starting checks for run {run_id}");
        let client = state.client.clone();
        tokio::spawn(async move {
            run_checks(&client, &run).await;
        });
    }

    Ok(Redirect::to("/").into_response())
}

/// handles /status, the current run as JSON
pub(crate) async fn status_handler(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<CheckRun>, PingAppError> {
    Ok(Json(current_run(&state, &session).await?))
}
