//! 情绪词典数据模型

use serde::{Deserialize, Serialize};

/// 情绪标签（封闭集合）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionLabel {
    Happy,
    Sad,
    Angry,
    Surprise,
    Fear,
    Neutral,
}

impl EmotionLabel {
    pub const ALL: [EmotionLabel; 6] = [
        EmotionLabel::Happy,
        EmotionLabel::Sad,
        EmotionLabel::Angry,
        EmotionLabel::Surprise,
        EmotionLabel::Fear,
        EmotionLabel::Neutral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EmotionLabel::Happy => "happy",
            EmotionLabel::Sad => "sad",
            EmotionLabel::Angry => "angry",
            EmotionLabel::Surprise => "surprise",
            EmotionLabel::Fear => "fear",
            EmotionLabel::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for EmotionLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 词典条目：情绪标签及其候选应答
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionEntry {
    pub label: EmotionLabel,
    pub responses: Vec<String>,
}

impl EmotionEntry {
    pub fn new(label: EmotionLabel, responses: &[&str]) -> Self {
        Self {
            label,
            responses: responses.iter().map(|r| r.to_string()).collect(),
        }
    }
}

/// 情绪词典，条目按声明顺序保存
#[derive(Debug, Clone, Default)]
pub struct EmotionLexicon {
    entries: Vec<EmotionEntry>,
}

impl EmotionLexicon {
    pub fn new(entries: Vec<EmotionEntry>) -> Self {
        Self { entries }
    }

    /// 按词典顺序检查标签文本是否作为子串出现在小写化的语句中。
    ///
    /// 只认标签本身（"happy"），不看应答短语，也不做情感推断。
    pub fn detect(&self, statement: &str) -> Option<EmotionLabel> {
        let lowered = statement.to_lowercase();
        self.entries
            .iter()
            .map(|entry| entry.label)
            .find(|label| lowered.contains(label.as_str()))
    }

    pub fn responses(&self, label: EmotionLabel) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|entry| entry.label == label)
            .map(|entry| entry.responses.as_slice())
    }

    pub fn entries(&self) -> &[EmotionEntry] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tables::ResponderTables;
    use rstest::rstest;

    fn builtin() -> EmotionLexicon {
        EmotionLexicon::new(ResponderTables::builtin().emotions)
    }

    #[rstest]
    #[case("I am so happy today", Some(EmotionLabel::Happy))]
    #[case("SAD news", Some(EmotionLabel::Sad))]
    #[case("that was a surprise", Some(EmotionLabel::Surprise))]
    #[case("I feel fearful", Some(EmotionLabel::Fear))]
    #[case("I am fine today", None)]
    #[case("", None)]
    fn test_detect(#[case] statement: &str, #[case] expected: Option<EmotionLabel>) {
        assert_eq!(builtin().detect(statement), expected);
    }

    #[test]
    fn test_detect_follows_lexicon_order() {
        // both labels present: the earlier entry wins
        assert_eq!(
            builtin().detect("angry but happy"),
            Some(EmotionLabel::Happy)
        );

        let reversed = EmotionLexicon::new(vec![
            EmotionEntry::new(EmotionLabel::Angry, &["a"]),
            EmotionEntry::new(EmotionLabel::Happy, &["h"]),
        ]);
        assert_eq!(reversed.detect("angry but happy"), Some(EmotionLabel::Angry));
    }

    #[test]
    fn test_responses_lookup() {
        let lexicon = builtin();
        let responses = lexicon.responses(EmotionLabel::Happy).unwrap();
        assert_eq!(responses, ["I'm glad to see you happy!", "Keep smiling!"]);

        let partial = EmotionLexicon::new(vec![EmotionEntry::new(EmotionLabel::Sad, &["s"])]);
        assert!(partial.responses(EmotionLabel::Happy).is_none());
    }

    #[test]
    fn test_label_serde_is_lowercase() {
        let json = serde_json::to_string(&EmotionLabel::Surprise).unwrap();
        assert_eq!(json, "\"surprise\"");
        let label: EmotionLabel = serde_json::from_str("\"fear\"").unwrap();
        assert_eq!(label, EmotionLabel::Fear);
        assert_eq!(EmotionLabel::Neutral.to_string(), "neutral");
    }
}
