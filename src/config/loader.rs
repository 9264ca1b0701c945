use crate::config::config::AppConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// 环境变量前缀，嵌套字段用 `__` 分隔，例如 `RADHA_COMPLETION__API_KEY`
pub const ENV_PREFIX: &str = "RADHA_";

/// 配置加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 从默认路径加载配置
    ///
    /// 优先级（后者覆盖前者）：
    /// 1. 内置默认值
    /// 2. `RADHA_CONFIG` 指定的文件，或 ./radha.toml
    /// 3. 环境变量
    pub fn load() -> Result<AppConfig, figment::Error> {
        let path = std::env::var("RADHA_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_config_path());
        Self::load_from(path)
    }

    /// 从指定路径加载配置
    pub fn load_from(path: impl AsRef<Path>) -> Result<AppConfig, figment::Error> {
        Self::figment(path.as_ref())
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
    }

    /// 仅文件与默认值，不读取环境变量
    pub fn load_file_only(path: impl AsRef<Path>) -> Result<AppConfig, figment::Error> {
        Self::figment(path.as_ref()).extract()
    }

    fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default())).merge(Toml::file(path))
    }

    /// 验证配置
    pub fn validate(config: &AppConfig) -> Result<(), ConfigValidationError> {
        if config.server.port == 0 {
            return Err(ConfigValidationError::InvalidPort);
        }

        if config.completion.max_tokens == 0 {
            return Err(ConfigValidationError::InvalidMaxTokens);
        }

        if !(0.0..=2.0).contains(&config.completion.temperature) {
            return Err(ConfigValidationError::InvalidTemperature(
                config.completion.temperature,
            ));
        }

        match config.classifier.backend.as_str() {
            "deepface" => {
                if config.classifier.url.is_empty() {
                    return Err(ConfigValidationError::MissingClassifierUrl);
                }
            }
            "stub" => {}
            other => {
                return Err(ConfigValidationError::UnknownClassifierBackend(
                    other.to_string(),
                ));
            }
        }

        if let Some(path) = &config.responder.tables_path {
            if !path.exists() {
                return Err(ConfigValidationError::InvalidPath(
                    path.display().to_string(),
                ));
            }
        }

        Ok(())
    }
}

/// 配置验证错误
#[derive(thiserror::Error, Debug)]
pub enum ConfigValidationError {
    #[error("服务端口无效，必须大于 0")]
    InvalidPort,

    #[error("max_tokens 必须大于 0")]
    InvalidMaxTokens,

    #[error("temperature 超出范围 [0, 2]: {0}")]
    InvalidTemperature(f32),

    #[error("未知的表情分类器后端: {0}")]
    UnknownClassifierBackend(String),

    #[error("DeepFace 服务地址未配置")]
    MissingClassifierUrl,

    #[error("配置路径无效: {0}")]
    InvalidPath(String),
}

/// 获取默认配置文件路径
pub fn default_config_path() -> PathBuf {
    PathBuf::from("radha.toml")
}
