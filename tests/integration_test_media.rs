mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::{MultipartBody, TestApp};
use serde_json::Value;
use tower::ServiceExt;

async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn post_media(app: &TestApp, token: &str, form: MultipartBody) -> axum::response::Response {
    let content_type = form.content_type();
    let body = form.finish();

    app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/media")
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .header("Content-Type", content_type)
            .body(Body::from(body)).unwrap()
    ).await.unwrap()
}

#[tokio::test]
async fn test_batch_upload_suffixes_titles_and_classifies() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let form = MultipartBody::new()
        .text("title", "Diwali Celebration")
        .text("description", "Evening aarti")
        .text("event_name", "Diwali")
        .text("event_date", "2026-11-08")
        .file("files", "one.jpg", "image/jpeg", b"img-one")
        .file("files", "two.jpg", "image/jpeg", b"img-two")
        .file("files", "clip.mp4", "video/mp4", b"vid-bytes");

    let res = post_media(&app, &token, form).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let body = parse_body(res).await;
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 3);

    for result in results {
        assert!(result["error"].is_null());
        assert!(result["media"].is_object());
    }
    assert_eq!(results[0]["media"]["title"], "Diwali Celebration 1");
    assert_eq!(results[1]["media"]["title"], "Diwali Celebration 2");
    assert_eq!(results[2]["media"]["title"], "Diwali Celebration 3");

    assert_eq!(results[0]["media"]["media_type"], "image");
    assert!(results[0]["media"]["image_url"].as_str().unwrap().contains("cloudinary"));
    assert_eq!(results[0]["media"]["event_date"], "2026-11-08");

    assert_eq!(results[2]["media"]["media_type"], "video");
    assert_eq!(results[2]["media"]["video_id"], "vid12345");
    assert_eq!(results[2]["media"]["embed_url"], "https://www.youtube.com/embed/vid12345");

    // The video host received the suffixed title.
    assert_eq!(app.uploaded_videos.lock().unwrap().as_slice(), &["Diwali Celebration 3".to_string()]);

    let list = parse_body(app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/media")
            .body(Body::empty()).unwrap()
    ).await.unwrap()).await;
    let items = list.as_array().unwrap();
    assert_eq!(items.len(), 3);
    // Newest first.
    assert_eq!(items[0]["title"], "Diwali Celebration 3");
    assert_eq!(items[2]["title"], "Diwali Celebration 1");
}

#[tokio::test]
async fn test_single_file_keeps_plain_title() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let form = MultipartBody::new()
        .text("title", "Temple Entrance")
        .text("event_name", "General")
        .file("files", "gate.png", "image/png", b"png-bytes");

    let res = post_media(&app, &token, form).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let body = parse_body(res).await;
    assert_eq!(body["results"][0]["media"]["title"], "Temple Entrance");
}

#[tokio::test]
async fn test_list_filters_by_event_name() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let diwali = MultipartBody::new()
        .text("title", "Lamps")
        .text("event_name", "Diwali")
        .file("files", "lamps.jpg", "image/jpeg", b"a");
    post_media(&app, &token, diwali).await;

    let holi = MultipartBody::new()
        .text("title", "Colors")
        .text("event_name", "Holi")
        .file("files", "colors.jpg", "image/jpeg", b"b");
    post_media(&app, &token, holi).await;

    let filtered = parse_body(app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/media?event_name=Holi")
            .body(Body::empty()).unwrap()
    ).await.unwrap()).await;

    let items = filtered.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "Colors");
}

#[tokio::test]
async fn test_batch_failure_is_per_file() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let form = MultipartBody::new()
        .text("title", "Mixed Batch")
        .text("event_name", "Festival")
        .file("files", "good.jpg", "image/jpeg", b"ok")
        .file("files", "fail.jpg", "image/jpeg", b"broken");

    let res = post_media(&app, &token, form).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let body = parse_body(res).await;
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);

    assert!(results[0]["media"].is_object());
    assert!(results[0]["error"].is_null());

    assert!(results[1]["media"].is_null());
    assert!(results[1]["error"].as_str().unwrap().contains("Image host rejected"));

    // Only the successful file produced a record.
    let list = parse_body(app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/media")
            .body(Body::empty()).unwrap()
    ).await.unwrap()).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["title"], "Mixed Batch 1");
}

#[tokio::test]
async fn test_unsupported_type_fails_that_file() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let form = MultipartBody::new()
        .text("title", "Scan")
        .text("event_name", "Records")
        .file("files", "scan.pdf", "application/pdf", b"%PDF");

    let res = post_media(&app, &token, form).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let body = parse_body(res).await;
    assert!(body["results"][0]["media"].is_null());
    assert!(body["results"][0]["error"].as_str().unwrap().contains("Unsupported file type"));
}

#[tokio::test]
async fn test_upload_validation() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    // No files at all.
    let empty = MultipartBody::new()
        .text("title", "Nothing")
        .text("event_name", "Empty");
    let res = post_media(&app, &token, empty).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = parse_body(res).await;
    assert_eq!(body["error"], "At least one file is required");

    // Shared metadata is required.
    let untitled = MultipartBody::new()
        .file("files", "a.jpg", "image/jpeg", b"a");
    let res = post_media(&app, &token, untitled).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = parse_body(res).await;
    let fields: Vec<&str> = body["fields"].as_array().unwrap()
        .iter().map(|f| f.as_str().unwrap()).collect();
    assert!(fields.contains(&"title"));
    assert!(fields.contains(&"event_name"));

    // Batch cap.
    let mut oversized = MultipartBody::new()
        .text("title", "Too Many")
        .text("event_name", "Bulk");
    for i in 0..11 {
        oversized = oversized.file("files", &format!("f{i}.jpg"), "image/jpeg", b"x");
    }
    let res = post_media(&app, &token, oversized).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upload_requires_admin() {
    let app = TestApp::new().await;

    let anonymous_form = MultipartBody::new()
        .text("title", "Sneaky")
        .text("event_name", "None")
        .file("files", "a.jpg", "image/jpeg", b"a");
    let content_type = anonymous_form.content_type();
    let body = anonymous_form.finish();

    let anonymous = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/media")
            .header("Content-Type", content_type)
            .body(Body::from(body)).unwrap()
    ).await.unwrap();
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

    let user = app.user_token().await;
    let form = MultipartBody::new()
        .text("title", "Sneaky")
        .text("event_name", "None")
        .file("files", "a.jpg", "image/jpeg", b"a");
    let res = post_media(&app, &user, form).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // Listing stays public and empty.
    let list = parse_body(app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/media")
            .body(Body::empty()).unwrap()
    ).await.unwrap()).await;
    assert_eq!(list.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_video_auth_endpoints() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;

    let auth_res = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/media/video-auth")
            .header(header::AUTHORIZATION, format!("Bearer {}", admin))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(auth_res.status(), StatusCode::OK);
    let body = parse_body(auth_res).await;
    assert!(body["auth_url"].as_str().unwrap().contains("accounts.google.com"));

    let callback = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/media/video-auth/callback?code=test-code")
            .header(header::AUTHORIZATION, format!("Bearer {}", admin))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(callback.status(), StatusCode::OK);

    let no_code = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/media/video-auth/callback")
            .header(header::AUTHORIZATION, format!("Bearer {}", admin))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(no_code.status(), StatusCode::BAD_REQUEST);

    let user = app.user_token().await;
    let forbidden = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/media/video-auth")
            .header(header::AUTHORIZATION, format!("Bearer {}", user))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);
}
