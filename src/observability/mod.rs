//! 可观测性模块
//!
//! 提供 Prometheus 文本格式指标、结构化日志和健康检查。

use axum::{Json, Router, response::IntoResponse, routing::get};

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use crate::config::config::LoggingConfig;
use crate::services::analyzer::ResponseSource;

// ===== Simple Metrics =====

/// 简单应用指标
#[derive(Debug, Default)]
pub struct AppMetrics {
    pub http_requests_total: AtomicU64,
    pub http_request_duration_sum: AtomicU64,
    pub text_requests_total: AtomicU64,
    pub emotion_keyword_hits: AtomicU64,
    pub pattern_hits: AtomicU64,
    pub fallback_responses: AtomicU64,
    pub camera_requests_total: AtomicU64,
    pub camera_detections: AtomicU64,
    pub camera_failures: AtomicU64,
}

impl AppMetrics {
    /// 记录 HTTP 请求
    pub fn record_http_request(&self, duration_ms: u64) {
        self.http_requests_total.fetch_add(1, Ordering::Relaxed);
        self.http_request_duration_sum
            .fetch_add(duration_ms, Ordering::Relaxed);
    }

    /// 记录一次文本分析及其应答来源
    pub fn record_text(&self, source: ResponseSource) {
        self.text_requests_total.fetch_add(1, Ordering::Relaxed);
        let counter = match source {
            ResponseSource::Emotion(_) => &self.emotion_keyword_hits,
            ResponseSource::Pattern => &self.pattern_hits,
            ResponseSource::Fallback => &self.fallback_responses,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// 记录一次摄像头识别
    pub fn record_camera(&self, detected: bool) {
        self.camera_requests_total.fetch_add(1, Ordering::Relaxed);
        if detected {
            self.camera_detections.fetch_add(1, Ordering::Relaxed);
        } else {
            self.camera_failures.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// 生成 Prometheus 格式指标
    pub fn gather(&self) -> String {
        format!(
            r#"# HELP http_requests_total Total HTTP requests
# TYPE http_requests_total counter
http_requests_total {}
# HELP http_request_duration_seconds HTTP request duration in seconds
# TYPE http_request_duration_seconds summary
http_request_duration_seconds_sum {}
http_request_duration_seconds_count {}
# HELP text_requests_total Text messages analyzed
# TYPE text_requests_total counter
text_requests_total {}
# HELP text_responses_total Text responses by source
# TYPE text_responses_total counter
text_responses_total{{source="emotion"}} {}
text_responses_total{{source="pattern"}} {}
text_responses_total{{source="fallback"}} {}
# HELP camera_requests_total Camera frames analyzed
# TYPE camera_requests_total counter
camera_requests_total {}
# HELP camera_detections_total Camera frames by outcome
# TYPE camera_detections_total counter
camera_detections_total{{outcome="detected"}} {}
camera_detections_total{{outcome="failed"}} {}
"#,
            self.http_requests_total.load(Ordering::Relaxed),
            self.http_request_duration_sum.load(Ordering::Relaxed) as f64 / 1000.0,
            self.http_requests_total.load(Ordering::Relaxed),
            self.text_requests_total.load(Ordering::Relaxed),
            self.emotion_keyword_hits.load(Ordering::Relaxed),
            self.pattern_hits.load(Ordering::Relaxed),
            self.fallback_responses.load(Ordering::Relaxed),
            self.camera_requests_total.load(Ordering::Relaxed),
            self.camera_detections.load(Ordering::Relaxed),
            self.camera_failures.load(Ordering::Relaxed),
        )
    }
}

// ===== Health Check =====

/// 健康检查状态
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: String,
    pub version: String,
    pub uptime_seconds: f64,
    pub classifier_backend: String,
    pub pattern_rules: usize,
}

/// 可观测性状态
#[derive(Clone)]
pub struct ObservabilityState {
    pub metrics: Arc<AppMetrics>,
    pub start_time: DateTime<Utc>,
    pub version: String,
    pub classifier_backend: String,
    pub pattern_rules: usize,
}

impl ObservabilityState {
    pub fn new(version: String, metrics: Arc<AppMetrics>) -> Self {
        Self {
            metrics,
            start_time: Utc::now(),
            version,
            classifier_backend: String::new(),
            pattern_rules: 0,
        }
    }

    pub fn with_components(mut self, classifier_backend: &str, pattern_rules: usize) -> Self {
        self.classifier_backend = classifier_backend.to_string();
        self.pattern_rules = pattern_rules;
        self
    }

    /// 获取应用正常运行时间
    pub fn uptime_seconds(&self) -> f64 {
        (Utc::now() - self.start_time).num_seconds() as f64
    }
}

// ===== Health Check Handlers =====

/// 获取完整健康状态
pub async fn health_check(
    state: axum::extract::State<Arc<ObservabilityState>>,
) -> impl IntoResponse {
    Json(HealthStatus {
        status: "healthy".to_string(),
        timestamp: Utc::now().to_rfc3339(),
        version: state.version.clone(),
        uptime_seconds: state.uptime_seconds(),
        classifier_backend: state.classifier_backend.clone(),
        pattern_rules: state.pattern_rules,
    })
}

/// 简单存活检查
pub async fn liveness() -> impl IntoResponse {
    "OK"
}

/// Prometheus 指标端点
pub async fn metrics(state: axum::extract::State<Arc<ObservabilityState>>) -> impl IntoResponse {
    let output = state.metrics.gather();
    (axum::http::StatusCode::OK, output)
}

/// 版本信息端点
pub async fn version(state: axum::extract::State<Arc<ObservabilityState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "version": state.version,
        "uptime_seconds": state.uptime_seconds(),
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// 创建可观测性路由
pub fn create_observability_router(state: Arc<ObservabilityState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/live", get(liveness))
        .route("/metrics", get(metrics))
        .route("/version", get(version))
        .with_state(state)
}

// ===== Structured Logging =====

/// 初始化日志
///
/// `RUST_LOG` 优先于配置中的级别。配置了 `log_dir` 时按天滚动写文件，
/// 返回的 guard 必须存活到进程结束，否则缓冲日志会丢失。
pub fn init_tracing(config: &LoggingConfig) -> Option<WorkerGuard> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let (writer, guard) = match &config.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "radha.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (BoxMakeWriter::new(writer), Some(guard))
        }
        None => (BoxMakeWriter::new(std::io::stdout), None),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(writer)
        .with_target(true)
        .with_line_number(true);

    let result = if config.structured {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    if let Err(e) = result {
        eprintln!("tracing subscriber already set: {}", e);
    }

    guard
}

// ===== Request Metrics Middleware =====

/// 记录请求指标的中间件
pub async fn metrics_middleware(
    axum::extract::State(metrics): axum::extract::State<Arc<AppMetrics>>,
    req: axum::extract::Request,
    next: axum::middleware::Next,
) -> axum::response::Response {
    let start = std::time::Instant::now();
    let response = next.run(req).await;
    metrics.record_http_request(start.elapsed().as_millis() as u64);
    response
}
