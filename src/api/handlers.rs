//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::{error, info, warn};

use crate::{
    alarm::{AlarmId, PlaybackError},
    state::AppState,
};
use super::responses::{ApiResponse, HealthResponse, StartSoundRequest, StatusResponse};

type ApiResult = Result<Json<ApiResponse>, (StatusCode, Json<ApiResponse>)>;

/// Handle POST /alarms/:id/sound - Start (or replace) the alarm's sound
pub async fn start_sound_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(request): Json<StartSoundRequest>,
) -> ApiResult {
    let id = AlarmId::new(id);

    match state.alarms.start_sound(&id, &request.sound, request.repeat) {
        Ok(()) => {
            state.record_action(format!("sound:{}", id));
            info!("Sound endpoint called - alarm {} playing {}", id, request.sound);
            Ok(Json(ApiResponse::active(
                format!("Alarm {} playing {}", id, request.sound),
                state.alarms.snapshot(),
            )))
        }
        Err(e) => {
            let status = match &e {
                PlaybackError::ResourceNotFound { .. } => {
                    warn!("Alarm {} not started: {}", id, e);
                    StatusCode::NOT_FOUND
                }
                PlaybackError::PlaybackStartFailed { .. } => {
                    error!("Alarm {} not started: {}", id, e);
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            };
            Err((
                status,
                Json(ApiResponse::error(e.to_string(), state.alarms.snapshot())),
            ))
        }
    }
}

/// Handle POST /alarms/:id/vibration - Start the alarm's vibration loop
pub async fn start_vibration_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Json<ApiResponse> {
    let id = AlarmId::new(id);
    state.alarms.start_vibration(&id);
    state.record_action(format!("vibration:{}", id));
    info!("Vibration endpoint called - alarm {} vibrating", id);

    Json(ApiResponse::active(
        format!("Alarm {} vibrating", id),
        state.alarms.snapshot(),
    ))
}

/// Handle DELETE /alarms/:id - Stop one alarm
pub async fn stop_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Json<ApiResponse> {
    let id = AlarmId::new(id);
    state.alarms.stop(&id);
    state.record_action(format!("stop:{}", id));

    Json(ApiResponse::inactive(
        format!("Alarm {} stopped", id),
        state.alarms.snapshot(),
    ))
}

/// Handle DELETE /alarms - Stop every alarm
pub async fn stop_all_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    state.alarms.stop_all();
    state.record_action("stop-all");

    Json(ApiResponse::inactive(
        "All alarms stopped".to_string(),
        state.alarms.snapshot(),
    ))
}

/// Handle POST /feedback/sound - Play the transient feedback sound
pub async fn feedback_sound_handler(State(state): State<Arc<AppState>>) -> StatusCode {
    state.alarms.play_transient_feedback();
    StatusCode::ACCEPTED
}

/// Handle POST /feedback/vibration - Single haptic pulse
pub async fn feedback_vibration_handler(State(state): State<Arc<AppState>>) -> StatusCode {
    state.alarms.play_one_shot_vibration();
    StatusCode::ACCEPTED
}

/// Handle GET /status - Return every active alarm
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let alarms = state.alarms.snapshot();
    let (last_action, last_action_time) = state.get_last_action();

    Json(StatusResponse {
        active_count: alarms.len(),
        alarms,
        auto_stop_minutes: state.alarms.config().auto_stop_after.as_secs() / 60,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
