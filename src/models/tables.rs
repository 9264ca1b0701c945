//! 应答表
//!
//! 人称映射、情绪词典、模式规则三张静态表作为一份数据整体加载，
//! 启动时读取一次，之后只读。

use figment::{
    Figment,
    providers::{Format, Toml},
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::error::{AppError, Result};
use crate::models::emotion::{EmotionEntry, EmotionLabel};
use crate::models::pattern::{PatternRule, PatternRuleDef};
use crate::models::reflection::Reflection;

/// 应答表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponderTables {
    #[serde(default)]
    pub reflections: Vec<Reflection>,
    #[serde(default)]
    pub emotions: Vec<EmotionEntry>,
    #[serde(default)]
    pub patterns: Vec<PatternRuleDef>,
}

impl Default for ResponderTables {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ResponderTables {
    /// 内置表
    pub fn builtin() -> Self {
        let reflections = [
            ("am", "are"),
            ("was", "were"),
            ("i", "you"),
            ("i'd", "you would"),
            ("i've", "you have"),
            ("i'll", "you will"),
            ("my", "your"),
            ("are", "am"),
            ("you've", "I have"),
            ("you'll", "I will"),
            ("your", "my"),
            ("yours", "mine"),
            ("you", "me"),
            ("me", "you"),
        ]
        .iter()
        .map(|(from, to)| Reflection::new(from, to))
        .collect();

        let emotions = vec![
            EmotionEntry::new(
                EmotionLabel::Happy,
                &["I'm glad to see you happy!", "Keep smiling!"],
            ),
            EmotionEntry::new(
                EmotionLabel::Sad,
                &["I'm sorry to see you sad.", "It's okay, things will get better."],
            ),
            EmotionEntry::new(
                EmotionLabel::Angry,
                &["Why do you look angry?", "Would you like to talk about it?"],
            ),
            EmotionEntry::new(
                EmotionLabel::Surprise,
                &["You seem surprised!", "What’s surprising you?"],
            ),
            EmotionEntry::new(
                EmotionLabel::Fear,
                &[
                    "You seem scared. Is everything okay?",
                    "Let’s talk about what’s making you fearful.",
                ],
            ),
            EmotionEntry::new(
                EmotionLabel::Neutral,
                &["You seem calm.", "How are you really feeling today?"],
            ),
        ];

        let patterns = vec![
            PatternRuleDef::new(
                r"I need (.*)",
                &[
                    "Why do you need {0}?",
                    "Would it really help you to get {0}?",
                    "Are you sure you need {0}?",
                ],
            ),
            PatternRuleDef::new(
                r"Why don't you (.*)",
                &[
                    "Do you really think I don't {0}?",
                    "Perhaps eventually I will {0}.",
                    "Do you want me to {0}?",
                ],
            ),
        ];

        Self {
            reflections,
            emotions,
            patterns,
        }
    }

    /// 从 TOML 文本解析并校验
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let tables: Self = Figment::from(Toml::string(content)).extract()?;
        tables.validate()?;
        Ok(tables)
    }

    /// 从 TOML 文件加载并校验
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(AppError::Config(format!(
                "responder tables not found: {}",
                path.display()
            )));
        }
        let tables: Self = Figment::from(Toml::file(path)).extract()?;
        tables.validate()?;
        Ok(tables)
    }

    /// 校验：情绪不重复、应答非空、规则可编译
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for entry in &self.emotions {
            if !seen.insert(entry.label) {
                return Err(AppError::Validation(format!(
                    "duplicate emotion label: {}",
                    entry.label
                )));
            }
            if entry.responses.is_empty() {
                return Err(AppError::Validation(format!(
                    "emotion '{}' has no responses",
                    entry.label
                )));
            }
        }

        for reflection in &self.reflections {
            if reflection.from.split_whitespace().count() != 1 {
                return Err(AppError::Validation(format!(
                    "reflection key must be a single token: '{}'",
                    reflection.from
                )));
            }
        }

        self.compile_patterns().map(|_| ())
    }

    pub fn compile_patterns(&self) -> Result<Vec<PatternRule>> {
        self.patterns.iter().map(PatternRule::compile).collect()
    }
}
