//! 服务模块

pub mod analyzer;
pub mod camera;
pub mod chooser;
pub mod completion;
pub mod responder;

pub use analyzer::{Analysis, FALLBACK_RESPONSE, ResponseSource, TextAnalyzer, create_text_analyzer};
pub use camera::{
    DeepFaceClassifier, EmotionClassifier, ImageEmotionDecoder, StubEmotionClassifier,
    create_emotion_classifier, decode_data_url,
};
pub use chooser::{
    FixedChooser, ResponseChooser, SeededChooser, ThreadRngChooser, create_response_chooser,
};
pub use completion::{
    CompletionBackend, CompletionClient, HttpCompletionBackend, build_prompt,
    create_completion_client,
};
pub use responder::PatternResponder;
