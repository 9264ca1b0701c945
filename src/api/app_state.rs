use crate::error::Result;
use crate::models::ResponderTables;
use crate::observability::AppMetrics;
use crate::services::analyzer::{TextAnalyzer, create_text_analyzer};
use crate::services::camera::{ImageEmotionDecoder, StubEmotionClassifier};
use crate::services::chooser::ResponseChooser;
use std::sync::Arc;

/// 应用状态，所有处理器共享
///
/// 除指标计数器外均为只读。
#[derive(Clone)]
pub struct AppState {
    /// 文本分析：情绪关键词 → 模式规则 → 兜底语
    pub analyzer: Arc<TextAnalyzer>,
    /// 摄像头帧解码与表情分类
    pub camera: Arc<ImageEmotionDecoder>,
    /// 请求计数器
    pub metrics: Arc<AppMetrics>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("analyzer", &"Arc<TextAnalyzer>")
            .field("camera", &self.camera.backend_name())
            .field("metrics", &self.metrics)
            .finish()
    }
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        analyzer: Arc<TextAnalyzer>,
        camera: ImageEmotionDecoder,
        metrics: Arc<AppMetrics>,
    ) -> Self {
        Self {
            analyzer,
            camera: Arc::new(camera),
            metrics,
        }
    }

    /// 开发用状态：内置应答表，摄像头固定返回 `camera_label`
    pub fn development(chooser: Arc<dyn ResponseChooser>, camera_label: &str) -> Result<Self> {
        let analyzer = create_text_analyzer(&ResponderTables::builtin(), chooser)?;
        let camera = ImageEmotionDecoder::new(Arc::new(StubEmotionClassifier::new(camera_label)));
        Ok(Self::new(analyzer, camera, Arc::new(AppMetrics::default())))
    }
}
