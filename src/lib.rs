//! Radha - 模式匹配对话代理
//!
//! 基于规则的文本应答（人称互换 + 正则模板）、情绪关键词识别、
//! 可选的远程生成模型调用，以及摄像头画面的人脸表情识别。

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod observability;
pub mod security;
pub mod services;
