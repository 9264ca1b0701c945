use axum::{Json, extract::State, response::Html};
use tracing::debug;

use crate::api::{app_state::AppState, dto::chat_dto::*};

/// 对话页面，编译期嵌入
pub const INDEX_PAGE: &str = include_str!("../../../templates/index.html");

/// 摄像头未识别出表情时的应答
pub const NO_DETECTION_RESPONSE: &str = "Could not detect emotion. Please try again.";

pub async fn index() -> Html<&'static str> {
    Html(INDEX_PAGE)
}

pub async fn text_input(
    State(state): State<AppState>,
    Json(request): Json<TextInputRequest>,
) -> Json<ChatResponse> {
    debug!("Text input received ({} chars)", request.message.len());

    let analysis = state.analyzer.analyze_detailed(&request.message);
    state.metrics.record_text(analysis.source);
    debug!(source = ?analysis.source, "Text input answered");

    Json(ChatResponse::new(analysis.response))
}

pub async fn camera_input(
    State(state): State<AppState>,
    Json(request): Json<CameraInputRequest>,
) -> Json<ChatResponse> {
    debug!("Camera frame received ({} bytes)", request.image.len());

    let detected = state.camera.detect_emotion_camera(&request.image).await;
    state.metrics.record_camera(detected.is_some());

    let response = match detected {
        Some(label) => format!("Detected emotion: {}", label),
        None => NO_DETECTION_RESPONSE.to_string(),
    };

    Json(ChatResponse::new(response))
}
