//! 远程补全客户端
//!
//! 调用外部生成模型得到自由文本应答。所有失败都转换为可读文本返回，
//! 不向调用方传播错误。

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::config::CompletionConfig;
use crate::error::{AppError, Result};

/// 响应中缺少文本字段时的应答
pub const UNDERSTOOD_NOTHING: &str = "Sorry, I didn't understand that.";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    prompt: &'a str,
    max_tokens: u32,
    temperature: f32,
}

/// 通过 HTTP 调用生成接口，Bearer 认证
pub struct HttpCompletionBackend {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    max_tokens: u32,
    temperature: f32,
}

impl HttpCompletionBackend {
    pub fn new(config: &CompletionConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }
}

#[async_trait]
impl CompletionBackend for HttpCompletionBackend {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&CompletionRequest {
                prompt,
                max_tokens: self.max_tokens,
                temperature: self.temperature,
            })
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = response.json().await?;
        Ok(first_choice_text(&body)
            .unwrap_or(UNDERSTOOD_NOTHING)
            .to_string())
    }
}

fn first_choice_text(body: &Value) -> Option<&str> {
    body.get("choices")?.get(0)?.get("text")?.as_str()
}

/// 构造提示词；情绪为空串时视为未提供
pub fn build_prompt(statement: &str, emotion: Option<&str>) -> String {
    match emotion.filter(|e| !e.is_empty()) {
        Some(emotion) => format!(
            "The user feels {}. Respond appropriately to this statement: {}",
            emotion, statement
        ),
        None => format!("Respond to this statement: {}", statement),
    }
}

pub struct CompletionClient {
    backend: Arc<dyn CompletionBackend>,
}

impl CompletionClient {
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self { backend }
    }

    /// 单次请求，无重试
    pub async fn complete(&self, statement: &str, emotion: Option<&str>) -> String {
        let prompt = build_prompt(statement, emotion);
        debug!("Requesting completion ({} chars)", prompt.len());

        match self.backend.complete(&prompt).await {
            Ok(text) => text,
            Err(AppError::Upstream { status, body }) => {
                warn!("Completion endpoint returned {}", status);
                format!("Error: {} - {}", status, body)
            }
            Err(e) => {
                warn!("Completion request failed: {}", e);
                format!("Sorry, I couldn't process the request: {}", e)
            }
        }
    }
}

pub fn create_completion_client(config: &CompletionConfig) -> Result<CompletionClient> {
    let backend = HttpCompletionBackend::new(config)?;
    Ok(CompletionClient::new(Arc::new(backend)))
}
