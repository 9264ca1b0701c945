#[cfg(test)]
mod chat_handler_tests {
    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
    };
    use serde_json::{Value, json};
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::api::{app_state::AppState, create_router};
    use crate::services::camera::png_data_url;
    use crate::services::chooser::FixedChooser;

    fn app() -> (Router, AppState) {
        let state = AppState::development(Arc::new(FixedChooser(0)), "happy").unwrap();
        (create_router(state.clone(), 1024 * 1024), state)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn response_text(app: Router, request: Request<Body>) -> String {
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        json["response"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_index_serves_page() {
        let (app, _) = app();
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            response.headers()[header::CONTENT_TYPE]
                .to_str()
                .unwrap()
                .starts_with("text/html")
        );
        assert_eq!(response.headers()["x-frame-options"], "DENY");
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8_lossy(&body).contains("/text_input"));
    }

    #[tokio::test]
    async fn test_text_input_pattern() {
        let (app, state) = app();
        let text = response_text(app, post_json("/text_input", json!({"message": "I need rest"}))).await;
        assert_eq!(text, "Why do you need rest?");
        assert_eq!(
            state
                .metrics
                .pattern_hits
                .load(std::sync::atomic::Ordering::Relaxed),
            1
        );
    }

    #[tokio::test]
    async fn test_text_input_emotion_and_fallback() {
        let (app, _) = app();
        let text = response_text(
            app.clone(),
            post_json("/text_input", json!({"message": "I am so sad"})),
        )
        .await;
        assert_eq!(text, "I'm sorry to see you sad.");

        let text = response_text(app, post_json("/text_input", json!({"message": "blah blah"}))).await;
        assert_eq!(text, "Tell me more.");
    }

    #[tokio::test]
    async fn test_text_input_missing_message_defaults_to_empty() {
        let (app, _) = app();
        let text = response_text(app, post_json("/text_input", json!({}))).await;
        assert_eq!(text, "Tell me more.");
    }

    #[tokio::test]
    async fn test_camera_input_detected() {
        let (app, state) = app();
        let text = response_text(
            app,
            post_json("/camera_input", json!({"image": png_data_url(4, 4)})),
        )
        .await;
        assert_eq!(text, "Detected emotion: happy");
        assert_eq!(
            state
                .metrics
                .camera_detections
                .load(std::sync::atomic::Ordering::Relaxed),
            1
        );
    }

    #[tokio::test]
    async fn test_camera_input_malformed_image() {
        let (app, _) = app();
        let text = response_text(
            app.clone(),
            post_json("/camera_input", json!({"image": "data:image/png;base64,!!!"})),
        )
        .await;
        assert_eq!(text, "Could not detect emotion. Please try again.");

        let text = response_text(app, post_json("/camera_input", json!({}))).await;
        assert_eq!(text, "Could not detect emotion. Please try again.");
    }

    #[tokio::test]
    async fn test_oversized_body_is_rejected() {
        let state = AppState::development(Arc::new(FixedChooser(0)), "happy").unwrap();
        let app = create_router(state, 64);
        let response = app
            .oneshot(post_json(
                "/camera_input",
                json!({"image": "x".repeat(1024)}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_text_input_requires_json() {
        let (app, _) = app();
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/text_input")
                    .body(Body::from("message=hi"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }
}
