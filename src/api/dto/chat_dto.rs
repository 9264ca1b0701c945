//! 对话 DTO
//!
//! 文本与摄像头两个入口的请求和响应结构。

use serde::{Deserialize, Serialize};

/// 文本输入请求，缺省字段视为空串
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TextInputRequest {
    pub message: String,
}

/// 摄像头输入请求，`image` 为 data URL
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CameraInputRequest {
    pub image: String,
}

/// 两个入口共用的响应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

impl ChatResponse {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}
