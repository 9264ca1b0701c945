//! 错误处理模块
//!
//! 定义应用程序的错误类型。对外的文本应答不暴露错误，
//! 服务层在边界处把错误转换为固定文案或"未识别"。

use thiserror::Error;

/// 应用程序错误类型
#[derive(Error, Debug)]
pub enum AppError {
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(String),

    /// 参数验证错误
    #[error("参数验证失败: {0}")]
    Validation(String),

    /// HTTP 传输错误
    #[error("HTTP 请求失败: {0}")]
    Http(String),

    /// 上游服务返回非成功状态
    #[error("上游服务返回 {status}: {body}")]
    Upstream { status: u16, body: String },

    /// 图像解码错误
    #[error("图像解码失败: {0}")]
    ImageDecode(String),

    /// 表情分类器错误
    #[error("表情分类失败: {0}")]
    Classifier(String),
}

impl From<figment::Error> for AppError {
    fn from(e: figment::Error) -> Self {
        AppError::Config(e.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::Http(e.to_string())
    }
}

impl From<base64::DecodeError> for AppError {
    fn from(e: base64::DecodeError) -> Self {
        AppError::ImageDecode(format!("base64: {}", e))
    }
}

impl From<image::ImageError> for AppError {
    fn from(e: image::ImageError) -> Self {
        AppError::ImageDecode(e.to_string())
    }
}

impl From<regex::Error> for AppError {
    fn from(e: regex::Error) -> Self {
        AppError::Validation(format!("invalid pattern: {}", e))
    }
}

/// 结果类型别名
pub type Result<T> = std::result::Result<T, AppError>;
