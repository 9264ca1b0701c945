// Integration tests for the Radha library
//
// Tests cover:
// - Text analysis priority chain with the built-in tables
// - Custom responder tables loaded from TOML
// - Reflection behaviour
// - Camera decoding failure paths
// - Completion client against a stubbed backend

#[cfg(test)]
mod analyzer_tests {
    use std::sync::Arc;

    use radha::models::{EmotionLabel, ReflectionTable, ResponderTables};
    use radha::services::{
        FALLBACK_RESPONSE, FixedChooser, ResponseSource, SeededChooser, TextAnalyzer,
    };

    fn builtin(index: usize) -> TextAnalyzer {
        TextAnalyzer::from_tables(&ResponderTables::builtin(), Arc::new(FixedChooser(index)))
            .unwrap()
    }

    // ============ Reflection ============

    #[test]
    fn test_reflect_pronoun_and_verb() {
        let table = ReflectionTable::new(ResponderTables::builtin().reflections);
        assert_eq!(table.reflect("i am happy"), "you are happy");
        assert_eq!(table.reflect(""), "");
    }

    // ============ Priority chain ============

    #[test]
    fn test_need_rest_variants() {
        let expected = [
            "Why do you need rest?",
            "Would it really help you to get rest?",
            "Are you sure you need rest?",
        ];
        for (index, text) in expected.iter().enumerate() {
            assert_eq!(builtin(index).analyze("I need rest"), *text);
        }
    }

    #[test]
    fn test_need_to_go_home_strips_period() {
        assert_eq!(
            builtin(1).analyze("I need to go home."),
            "Would it really help you to get to go home?"
        );
    }

    #[test]
    fn test_why_dont_you_reflects_group() {
        assert_eq!(
            builtin(0).analyze("Why don't you understand me!"),
            "Do you really think I don't understand you?"
        );
    }

    #[test]
    fn test_blah_blah_falls_back() {
        assert_eq!(builtin(0).analyze("blah blah"), FALLBACK_RESPONSE);
    }

    #[test]
    fn test_emotion_label_must_be_named() {
        let analyzer = builtin(0);
        assert_eq!(
            analyzer.detect_emotion_text("I am so happy today"),
            Some(EmotionLabel::Happy)
        );
        // "furious" expresses anger but does not name it
        assert_eq!(analyzer.detect_emotion_text("I am furious"), None);
        assert_eq!(analyzer.detect_emotion_text("I am fine today"), None);
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let run = |seed| {
            let analyzer =
                TextAnalyzer::from_tables(&ResponderTables::builtin(), Arc::new(SeededChooser::new(seed)))
                    .unwrap();
            (0..10)
                .map(|_| analyzer.analyze("I need rest"))
                .collect::<Vec<_>>()
        };
        assert_eq!(run(3), run(3));
    }

    // ============ Custom tables ============

    #[test]
    fn test_custom_tables_from_toml() {
        let tables = ResponderTables::from_toml_str(
            r#"
[[reflections]]
from = "my"
to = "your"

[[emotions]]
label = "angry"
responses = ["Take a breath."]

[[patterns]]
pattern = "I want (.*) and (.*)"
responses = ["You want {1} before {0}?"]
"#,
        )
        .unwrap();

        let analyzer = TextAnalyzer::from_tables(&tables, Arc::new(FixedChooser(0))).unwrap();

        let analysis = analyzer.analyze_detailed("I want my tea and my cake");
        assert_eq!(analysis.response, "You want your cake before your tea?");
        assert_eq!(analysis.source, ResponseSource::Pattern);

        let analysis = analyzer.analyze_detailed("so ANGRY");
        assert_eq!(analysis.response, "Take a breath.");
        assert_eq!(analysis.source, ResponseSource::Emotion(EmotionLabel::Angry));

        // "happy" is not in this lexicon
        assert_eq!(analyzer.analyze("I am happy"), FALLBACK_RESPONSE);
    }
}

#[cfg(test)]
mod camera_tests {
    use std::sync::Arc;

    use radha::services::{ImageEmotionDecoder, StubEmotionClassifier, decode_data_url};

    #[tokio::test]
    async fn test_malformed_base64_is_no_detection() {
        let decoder = ImageEmotionDecoder::new(Arc::new(StubEmotionClassifier::new("happy")));
        assert!(
            decoder
                .detect_emotion_camera("data:image/jpeg;base64,this is not base64")
                .await
                .is_none()
        );
        assert!(decoder.detect_emotion_camera("no comma at all").await.is_none());
        assert!(decode_data_url("data:,").is_err());
    }
}

#[cfg(test)]
mod completion_tests {
    use async_trait::async_trait;
    use std::sync::Arc;

    use radha::error::{AppError, Result};
    use radha::services::{CompletionBackend, CompletionClient};

    struct EchoBackend;

    #[async_trait]
    impl CompletionBackend for EchoBackend {
        async fn complete(&self, prompt: &str) -> Result<String> {
            Ok(prompt.to_uppercase())
        }
    }

    struct FailingBackend;

    #[async_trait]
    impl CompletionBackend for FailingBackend {
        async fn complete(&self, _prompt: &str) -> Result<String> {
            Err(AppError::Upstream {
                status: 500,
                body: "internal".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_completion_with_fake_backends() {
        let client = CompletionClient::new(Arc::new(EchoBackend));
        assert_eq!(
            client.complete("hi", Some("sad")).await,
            "THE USER FEELS SAD. RESPOND APPROPRIATELY TO THIS STATEMENT: HI"
        );

        let client = CompletionClient::new(Arc::new(FailingBackend));
        assert_eq!(client.complete("hi", None).await, "Error: 500 - internal");
    }
}
