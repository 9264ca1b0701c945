//! 摄像头表情识别
//!
//! 解码 data URL 图像后交给外部人脸表情分类器。任何失败都归为"未识别"。

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::{ImageFormat, RgbImage};
use serde_json::{Value, json};
use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::config::ClassifierConfig;
use crate::error::{AppError, Result};

/// 人脸表情分类能力：给定像素，返回主导表情
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmotionClassifier: Send + Sync {
    async fn classify(&self, frame: &RgbImage) -> Result<String>;

    fn backend_name(&self) -> &'static str;
}

/// 固定返回同一个表情，用于开发和测试
pub struct StubEmotionClassifier {
    label: String,
}

impl StubEmotionClassifier {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
        }
    }
}

#[async_trait]
impl EmotionClassifier for StubEmotionClassifier {
    async fn classify(&self, _frame: &RgbImage) -> Result<String> {
        Ok(self.label.clone())
    }

    fn backend_name(&self) -> &'static str {
        "stub"
    }
}

/// DeepFace 分析服务客户端
///
/// 只请求 emotion 分析，并关闭人脸检测强制校验。
pub struct DeepFaceClassifier {
    client: reqwest::Client,
    base_url: String,
}

impl DeepFaceClassifier {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(timeout_secs));
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl EmotionClassifier for DeepFaceClassifier {
    async fn classify(&self, frame: &RgbImage) -> Result<String> {
        let mut png = Cursor::new(Vec::new());
        frame.write_to(&mut png, ImageFormat::Png)?;
        let img = format!("data:image/png;base64,{}", BASE64.encode(png.into_inner()));

        let response = self
            .client
            .post(format!("{}/analyze", self.base_url))
            .json(&json!({
                "img": img,
                "actions": ["emotion"],
                "enforce_detection": false,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream { status, body });
        }

        let body: Value = response.json().await?;
        dominant_emotion(&body)
            .map(str::to_string)
            .ok_or_else(|| AppError::Classifier("response has no dominant_emotion".to_string()))
    }

    fn backend_name(&self) -> &'static str {
        "deepface"
    }
}

// 新版服务返回 {"results": [...]}，旧版直接返回单个对象
fn dominant_emotion(body: &Value) -> Option<&str> {
    body.get("results")
        .and_then(|results| results.get(0))
        .unwrap_or(body)
        .get("dominant_emotion")?
        .as_str()
}

/// 解码 `<header>,<base64>` 形式的图像为 RGB 像素
pub fn decode_data_url(image_data: &str) -> Result<RgbImage> {
    let payload = image_data
        .split(',')
        .nth(1)
        .ok_or_else(|| AppError::ImageDecode("missing data URL separator".to_string()))?;
    let bytes = BASE64.decode(payload.trim().as_bytes())?;
    let image = image::load_from_memory(&bytes)?;
    Ok(image.to_rgb8())
}

pub struct ImageEmotionDecoder {
    classifier: Arc<dyn EmotionClassifier>,
}

impl ImageEmotionDecoder {
    pub fn new(classifier: Arc<dyn EmotionClassifier>) -> Self {
        Self { classifier }
    }

    /// 返回主导表情；输入错误、解码失败、分类器出错一律返回 None
    pub async fn detect_emotion_camera(&self, image_data: &str) -> Option<String> {
        let frame = match decode_data_url(image_data) {
            Ok(frame) => frame,
            Err(e) => {
                debug!("Camera frame rejected: {}", e);
                return None;
            }
        };

        match self.classifier.classify(&frame).await {
            Ok(label) if !label.trim().is_empty() => Some(label),
            Ok(_) => None,
            Err(e) => {
                warn!(
                    backend = self.classifier.backend_name(),
                    "Emotion classification failed: {}", e
                );
                None
            }
        }
    }

    pub fn backend_name(&self) -> &'static str {
        self.classifier.backend_name()
    }
}

pub fn create_emotion_classifier(config: &ClassifierConfig) -> Result<Box<dyn EmotionClassifier>> {
    match config.backend.as_str() {
        "deepface" => {
            let classifier = DeepFaceClassifier::new(&config.url, config.timeout_secs)?;
            Ok(Box::new(classifier))
        }
        "stub" => Ok(Box::new(StubEmotionClassifier::new(&config.stub_label))),
        other => Err(AppError::Config(format!(
            "unknown classifier backend: {}",
            other
        ))),
    }
}

#[cfg(test)]
pub(crate) fn png_data_url(width: u32, height: u32) -> String {
    let image = RgbImage::from_pixel(width, height, image::Rgb([200, 120, 80]));
    let mut png = Cursor::new(Vec::new());
    image.write_to(&mut png, ImageFormat::Png).unwrap();
    format!("data:image/png;base64,{}", BASE64.encode(png.into_inner()))
}
