//! Chat Routes
//!
//! 页面、文本输入和摄像头输入三个入口。

use crate::api::handlers::chat_handler::*;
use axum::{
    Router,
    routing::{get, post},
};

use crate::api::app_state::AppState;

/// 创建对话路由器
pub fn create_chat_router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/text_input", post(text_input))
        .route("/camera_input", post(camera_input))
}
