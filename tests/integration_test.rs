use axum::body::Body;
use axum::http::{header, Request, StatusCode};

mod common;

use common::{
    block_storage_writes, body_string, cookies, create_registered_app, create_test_app, flash,
    location, UNREACHABLE_API,
};

#[tokio::test]
async fn test_home_page() {
    let app = create_test_app();

    let response = app.get("/").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("Master Modern Tech Skills"));
    assert!(html.contains("Get Started"));
    assert!(html.contains(r#"href="/learning/data-engineering""#));
}

#[tokio::test]
async fn test_unknown_path_redirects_to_not_found() {
    let app = create_test_app();

    let response = app.get("/definitely/not/here").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/404");

    let response = app.get("/404").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_string(response).await.contains("Oops! Page Not Found"));
}

#[tokio::test]
async fn test_unknown_area_redirects_to_not_found() {
    let app = create_test_app();

    let response = app.get("/learning/cobol").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/404");

    let response = app.get("/learning/cobol/module/cobol-1").await;
    assert_eq!(location(&response), "/404");
}

#[tokio::test]
async fn test_area_entry_opens_first_module() {
    let app = create_test_app();

    let response = app.get("/learning/devops").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/learning/devops/module/devops-1");
}

#[tokio::test]
async fn test_module_page_uses_mock_content_offline() {
    let app = create_test_app();

    let response = app.get("/learning/devops/module/devops-1").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("Introduction to DevOps"));
    assert!(html.contains("Version Control with Git"));
    assert!(html.contains("0 of 3 modules completed"));
    assert!(html.contains("Lesson 1 of 3"));
    assert!(html.contains(r#"<li class="module-item locked" aria-disabled="true">"#));
}

#[tokio::test]
async fn test_lesson_query_selects_tab_and_clamps() {
    let app = create_test_app();

    let html = body_string(app.get("/learning/devops/module/devops-1?lesson=1").await).await;
    assert!(html.contains("Lesson 2 of 3"));
    assert!(html.contains("Code Editor"));

    let html = body_string(app.get("/learning/devops/module/devops-1?lesson=99").await).await;
    assert!(html.contains("Lesson 3 of 3"));
}

#[tokio::test]
async fn test_unknown_module_shows_empty_selection() {
    let app = create_test_app();

    let response = app.get("/learning/devops/module/devops-42").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response)
        .await
        .contains("Select a module to begin learning"));
}

#[tokio::test]
async fn test_register_validation_errors() {
    let app = create_test_app();

    let response = app
        .post_form("/register", "name=&email=not-an-email&phoneNumber=123")
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = body_string(response).await;
    assert!(html.contains("Name is required"));
    assert!(html.contains("Invalid email address"));
    assert!(html.contains("Invalid phone number"));
    assert!(html.contains("Please select a learning area"));
    assert!(app.saved_user().is_none());
}

#[tokio::test]
async fn test_register_reports_api_failure() {
    let app = create_test_app();

    let response = app
        .post_form(
            "/register",
            "name=Ada+Lovelace&email=ada%40example.com&phoneNumber=%2B1+555+123+4567&learningArea=devops",
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("Failed to register user. Please try again."));
    assert!(html.contains(r#"value="Ada Lovelace""#));
    assert!(app.saved_user().is_none());
}

#[tokio::test]
async fn test_completing_lessons_walks_module() {
    let app = create_test_app();
    let base = "/learning/devops/module/devops-1";

    let response = app
        .post_form(&format!("{base}/lessons/devops-1-lesson-1/complete"), "")
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), format!("{base}?lesson=1"));

    let response = app
        .post_form(&format!("{base}/lessons/devops-1-lesson-2/complete"), "")
        .await;
    assert_eq!(location(&response), format!("{base}?lesson=2"));

    let response = app
        .post_form(&format!("{base}/lessons/devops-1-lesson-3/complete"), "")
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/learning/devops/module/devops-2");
    let cookie = cookies(&response);
    assert!(cookie.starts_with("vtb_flash=success:"));

    let response = app
        .send(
            Request::builder()
                .uri("/learning/devops/module/devops-2")
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let cleared = cookies(&response);
    assert_eq!(cleared, "vtb_flash=");
    let html = body_string(response).await;
    assert!(html.contains("Module completed! Great job! 🎉"));
    assert!(html.contains("1 of 3 modules completed"));
    assert!(html.contains(r#"<li class="module-item completed">"#));
}

#[tokio::test]
async fn test_last_lesson_with_gaps_returns_to_first_open_lesson() {
    let app = create_test_app();
    let base = "/learning/devops/module/devops-1";

    let response = app
        .post_form(&format!("{base}/lessons/devops-1-lesson-3/complete"), "")
        .await;
    assert_eq!(location(&response), format!("{base}?lesson=0"));
    assert!(cookies(&response).is_empty());
}

#[tokio::test]
async fn test_final_module_congratulates() {
    let app = create_test_app();

    for module in ["devops-1", "devops-2", "devops-3"] {
        for lesson in 1..=3 {
            app.post_form(
                &format!("/learning/devops/module/{module}/lessons/{module}-lesson-{lesson}/complete"),
                "",
            )
            .await;
        }
    }

    let response = app.get("/learning/devops/module/devops-3").await;
    let html = body_string(response).await;
    assert!(html.contains("3 of 3 modules completed"));
    assert!(html.contains("Complete Course"));

    let response = app
        .post_form(
            "/learning/devops/module/devops-3/lessons/devops-3-lesson-3/complete",
            "",
        )
        .await;
    assert_eq!(location(&response), "/learning/devops/module/devops-3?lesson=2");
    let flash = cookies(&response);
    let message = urlencoding::decode(flash.trim_start_matches("vtb_flash=success:"))
        .unwrap()
        .into_owned();
    assert_eq!(
        message,
        "Congratulations! You've completed all modules in this learning path! 🏆"
    );
}

#[tokio::test]
async fn test_exercise_run_renders_results() {
    let app = create_test_app();
    let uri = "/learning/devops/module/devops-1/lessons/devops-1-lesson-2/run";

    let starter = vtb_portal::services::exercise::STARTER_CODE;
    let response = app
        .post_form(uri, &format!("code={}", urlencoding::encode(starter)))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("Output does not match expected result"));
    assert!(html.contains("✓ Implementation Check"));
    assert!(html.contains("✗ Test Case 1"));
    assert!(html.contains("Some tests failed. Keep trying!"));
    assert!(!html.contains("Excellent Work!"));

    let solution = "def solution():\n    values = [3, 1, 4, 1, 5, 9, 2, 6]\n    ordered = sorted(values)\n    return ordered[len(ordered) // 2]\n\nprint(solution())\n";
    let response = app
        .post_form(uri, &format!("code={}", urlencoding::encode(solution)))
        .await;
    let html = body_string(response).await;
    assert!(html.contains("All tests passed! Great job!"));
    assert!(html.contains("Excellent Work!"));
    assert!(html.contains("ordered[len(ordered) // 2]"));
}

#[tokio::test]
async fn test_learning_areas_welcome_back() {
    let app = create_registered_app(UNREACHABLE_API, None);

    let html = body_string(app.get("/learning-areas").await).await;
    assert!(html.contains("Welcome back, Ada Lovelace! Continue your devops journey"));
    assert!(html.contains("Welcome, Ada Lovelace"));
    assert!(html.contains("+3 more"));

    let anonymous = create_test_app();
    let html = body_string(anonymous.get("/learning-areas").await).await;
    assert!(!html.contains("Welcome back"));
}

#[tokio::test]
async fn test_logout_clears_user() {
    let app = create_registered_app(UNREACHABLE_API, None);

    let response = app.post_form("/logout", "").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    assert!(app.saved_user().is_none());

    let html = body_string(app.get("/").await).await;
    assert!(html.contains("Get Started"));
}

#[tokio::test]
async fn test_session_api() {
    let app = create_registered_app(UNREACHABLE_API, None);

    let response = app.get("/api/session").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["name"], "Ada Lovelace");
    assert_eq!(json["data"]["selectedArea"], "devops");

    let response = app
        .send(
            Request::builder()
                .method("DELETE")
                .uri("/api/session")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(app.saved_user().is_none());

    let response = app.get("/api/session").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_health_reports_upstream_down() {
    let app = create_test_app();

    let response = app.get("/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["upstream"], false);
    assert!(json["uptime"].is_u64());
}

#[tokio::test]
async fn test_stylesheet_served() {
    let app = create_test_app();

    let response = app.get("/static/app.css").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/css; charset=utf-8"
    );
    assert!(body_string(response).await.contains("--vtb-primary-blue: #2f447a"));
}

#[tokio::test]
async fn test_logout_storage_failure_shows_error() {
    let app = create_registered_app(UNREACHABLE_API, None);
    block_storage_writes(&app);

    let response = app.post_form("/logout", "").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    assert_eq!(
        flash(&response),
        Some((
            "error".to_string(),
            "Could not sign you out. Please try again.".to_string()
        ))
    );
    assert!(app.saved_user().is_some());
}

#[tokio::test]
async fn test_progress_api() {
    let app = create_registered_app(UNREACHABLE_API, None);
    let base = "/learning/devops/module/devops-1";
    for lesson in 1..=3 {
        app.post_form(&format!("{base}/lessons/devops-1-lesson-{lesson}/complete"), "")
            .await;
    }

    let response = app.get("/api/progress/devops").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["learningArea"], "devops");
    assert_eq!(json["data"]["completedModules"], serde_json::json!(["devops-1"]));

    let response = app.get("/api/progress/cobol").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(json["code"], "BAD_REQUEST");

    let anonymous = create_test_app();
    let response = anonymous.get("/api/progress/devops").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
