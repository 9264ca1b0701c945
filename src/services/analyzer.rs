//! 文本分析服务
//!
//! 优先级链：情绪关键词 → 模式规则 → 固定兜底语。三者不混合。

use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use crate::error::Result;
use crate::models::{EmotionLabel, EmotionLexicon, ResponderTables};
use crate::services::chooser::{ResponseChooser, choose};
use crate::services::responder::PatternResponder;

/// 无匹配时的兜底应答
pub const FALLBACK_RESPONSE: &str = "Tell me more.";

/// 应答来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseSource {
    Emotion(EmotionLabel),
    Pattern,
    Fallback,
}

/// 单次分析结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub response: String,
    pub source: ResponseSource,
}

pub struct TextAnalyzer {
    lexicon: EmotionLexicon,
    responder: PatternResponder,
    chooser: Arc<dyn ResponseChooser>,
}

impl TextAnalyzer {
    pub fn new(
        lexicon: EmotionLexicon,
        responder: PatternResponder,
        chooser: Arc<dyn ResponseChooser>,
    ) -> Self {
        Self {
            lexicon,
            responder,
            chooser,
        }
    }

    pub fn from_tables(tables: &ResponderTables, chooser: Arc<dyn ResponseChooser>) -> Result<Self> {
        tables.validate()?;
        let responder = PatternResponder::from_tables(tables, chooser.clone())?;
        Ok(Self::new(
            EmotionLexicon::new(tables.emotions.clone()),
            responder,
            chooser,
        ))
    }

    pub fn detect_emotion_text(&self, statement: &str) -> Option<EmotionLabel> {
        self.lexicon.detect(statement)
    }

    pub fn analyze(&self, statement: &str) -> String {
        self.analyze_detailed(statement).response
    }

    pub fn analyze_detailed(&self, statement: &str) -> Analysis {
        if let Some(label) = self.detect_emotion_text(statement) {
            if let Some(response) = self
                .lexicon
                .responses(label)
                .and_then(|responses| choose(self.chooser.as_ref(), responses))
            {
                debug!(emotion = %label, "emotion keyword matched");
                return Analysis {
                    response: response.to_string(),
                    source: ResponseSource::Emotion(label),
                };
            }
        }

        if let Some(response) = self.responder.match_statement(statement) {
            return Analysis {
                response,
                source: ResponseSource::Pattern,
            };
        }

        Analysis {
            response: FALLBACK_RESPONSE.to_string(),
            source: ResponseSource::Fallback,
        }
    }

    pub fn responder(&self) -> &PatternResponder {
        &self.responder
    }
}

pub fn create_text_analyzer(
    tables: &ResponderTables,
    chooser: Arc<dyn ResponseChooser>,
) -> Result<Arc<TextAnalyzer>> {
    Ok(Arc::new(TextAnalyzer::from_tables(tables, chooser)?))
}
