use crate::advisor;
use crate::errors::AppError;
use crate::metrics;
use crate::models::{
    AnalysisState, DashboardResponse, LanguageRequest, LoginRequest, NewSessionRequest,
    SleepSession, StateResponse, User,
};
use crate::state::{AppState, UiState};
use crate::storage;
use crate::ui::render_index;
use axum::{extract::State, response::Html, Json};
use tracing::info;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let ui = state.ui.lock().await;
    Html(render_index(&ui))
}

pub async fn get_state(State(state): State<AppState>) -> Json<StateResponse> {
    let ui = state.ui.lock().await;
    Json(snapshot(&ui))
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<User>, AppError> {
    let email = payload.email.trim();
    if email.is_empty() || payload.password.is_empty() {
        return Err(AppError::bad_request("email and password are required"));
    }

    let mut ui = state.ui.lock().await;
    let user = ui.log_in(email);
    info!("user {} logged in", user.name);
    Ok(Json(user))
}

pub async fn logout(State(state): State<AppState>) -> Json<StateResponse> {
    let mut ui = state.ui.lock().await;
    ui.log_out();
    Json(snapshot(&ui))
}

pub async fn set_language(
    State(state): State<AppState>,
    Json(payload): Json<LanguageRequest>,
) -> Json<StateResponse> {
    let mut ui = state.ui.lock().await;
    ui.set_language(payload.language);
    Json(snapshot(&ui))
}

pub async fn open_form(State(state): State<AppState>) -> Result<Json<StateResponse>, AppError> {
    let mut ui = state.ui.lock().await;
    ui.open_form()?;
    Ok(Json(snapshot(&ui)))
}

pub async fn close_form(State(state): State<AppState>) -> Json<StateResponse> {
    let mut ui = state.ui.lock().await;
    ui.close_form();
    Json(snapshot(&ui))
}

// Recomputed from the stored sessions on every call, nothing is cached.
pub async fn get_dashboard(State(state): State<AppState>) -> Json<DashboardResponse> {
    let language = state.ui.lock().await.language;
    let log = state.log.lock().await;
    let points = metrics::derive_points(&log.sessions, language);
    let stats = metrics::aggregate(&points);
    Json(DashboardResponse { points, stats })
}

pub async fn create_session(
    State(state): State<AppState>,
    Json(payload): Json<NewSessionRequest>,
) -> Result<Json<SleepSession>, AppError> {
    state.ui.lock().await.require_user()?;

    let session = storage::session_from_request(payload)?;
    {
        let mut log = state.log.lock().await;
        log.sessions.insert(0, session.clone());
        storage::persist_log(&state.data_path, &log).await?;
    }

    // Saving closes the entry form, back to the dashboard.
    state.ui.lock().await.close_form();
    info!("recorded session {} for {}", session.id, session.date);
    Ok(Json(session))
}

pub async fn get_analysis(State(state): State<AppState>) -> Json<AnalysisState> {
    Json(state.analysis.lock().await.clone())
}

// At most one advisory request is outstanding; an overlapping trigger
// reports the in-flight state without a second network call.
pub async fn analyze(State(state): State<AppState>) -> Result<Json<AnalysisState>, AppError> {
    let language = {
        let ui = state.ui.lock().await;
        ui.require_user()?;
        ui.language
    };

    let window: Vec<SleepSession> = {
        let log = state.log.lock().await;
        log.sessions
            .iter()
            .take(advisor::RECENT_WINDOW)
            .cloned()
            .collect()
    };

    let mut slot = state.analysis.lock().await;
    if matches!(*slot, AnalysisState::InFlight) {
        return Ok(Json(slot.clone()));
    }
    *slot = AnalysisState::InFlight;

    // The network call resolves the slot from a detached task, so a caller
    // that disconnects mid-request cannot leave it stuck in flight.
    let advisor = state.advisor.clone();
    let analysis = state.analysis.clone();
    tokio::spawn(async move {
        let result = advisor.analyze(&window, language).await;
        *analysis.lock().await = AnalysisState::Resolved { result };
    });

    Ok(Json(slot.clone()))
}

fn snapshot(ui: &UiState) -> StateResponse {
    StateResponse {
        user: ui.user.clone(),
        language: ui.language,
        rtl: ui.language.is_rtl(),
        form_open: ui.form_open,
    }
}
