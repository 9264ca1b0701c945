use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// 服务地址
    pub host: String,
    /// 服务端口
    pub port: u16,
    /// 最大请求体大小（字节），摄像头帧以 data URL 上传
    pub max_request_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 5000,
            max_request_size: 10 * 1024 * 1024,
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别（`RUST_LOG` 优先）
    pub level: String,
    /// 结构化（JSON）日志格式
    pub structured: bool,
    /// 日志文件目录，为空时输出到 stdout
    pub log_dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            structured: false,
            log_dir: None,
        }
    }
}

/// 应答引擎配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ResponderConfig {
    /// 自定义应答表（TOML），为空时使用内置表
    pub tables_path: Option<PathBuf>,
    /// 随机种子，设置后应答选择可复现
    pub seed: Option<u64>,
}

/// 远程补全模型配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionConfig {
    /// 生成接口地址
    pub endpoint: String,
    /// Bearer token
    pub api_key: String,
    /// 最大生成 token 数
    pub max_tokens: u32,
    /// 采样温度
    pub temperature: f32,
    /// 请求超时（秒），0 表示不设超时
    pub timeout_secs: u64,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://gemini-ai.api.endpoint/generate".into(),
            api_key: String::new(),
            max_tokens: 150,
            temperature: 0.7,
            timeout_secs: 0,
        }
    }
}

/// 人脸表情分类器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// 后端类型: "deepface" 或 "stub"
    pub backend: String,
    /// DeepFace 服务地址
    pub url: String,
    /// stub 后端固定返回的表情
    pub stub_label: String,
    /// 请求超时（秒），0 表示不设超时
    pub timeout_secs: u64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            backend: "deepface".into(),
            url: "http://localhost:5005".into(),
            stub_label: "neutral".into(),
            timeout_secs: 0,
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// 服务器配置
    pub server: ServerConfig,
    /// 日志配置
    pub logging: LoggingConfig,
    /// 应答引擎配置
    pub responder: ResponderConfig,
    /// 远程补全配置
    pub completion: CompletionConfig,
    /// 表情分类器配置
    pub classifier: ClassifierConfig,
    /// 应用名称
    pub app_name: String,
    /// 环境
    pub environment: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::development()
    }
}

impl AppConfig {
    /// 创建开发环境配置
    pub fn development() -> Self {
        Self {
            server: ServerConfig::default(),
            logging: LoggingConfig {
                level: "debug".into(),
                ..LoggingConfig::default()
            },
            responder: ResponderConfig::default(),
            completion: CompletionConfig::default(),
            classifier: ClassifierConfig::default(),
            app_name: "radha".into(),
            environment: "development".into(),
        }
    }

    /// 创建生产环境配置
    pub fn production() -> Self {
        let mut config = Self::development();
        config.environment = "production".into();
        config.logging.level = "info".into();
        config.logging.structured = true;
        config
    }
}
