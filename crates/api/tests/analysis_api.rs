mod common;

use axum::body::Body;
use axum::http::StatusCode;

/// A POST without a multipart body is rejected as a bad request.
#[sqlx::test(migrations = "../db/migrations")]
async fn missing_multipart_body_returns_400(pool: sqlx::PgPool) {
    let storage = tempfile::tempdir().unwrap();
    let app = common::build_test_app(pool, storage.path());

    let response = common::post(app, "/analyze-video/", "application/json", Body::from("{}")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// A multipart form without the `video_file` field is rejected.
#[sqlx::test(migrations = "../db/migrations")]
async fn missing_video_field_returns_400(pool: sqlx::PgPool) {
    let storage = tempfile::tempdir().unwrap();
    let app = common::build_test_app(pool, storage.path());

    let boundary = "----framesight-test-boundary";
    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"notes\"\r\n\r\n\
         not a video\r\n\
         --{boundary}--\r\n"
    );

    let response = common::post(
        app,
        "/analyze-video/",
        &format!("multipart/form-data; boundary={boundary}"),
        Body::from(body),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = common::body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

/// An upload that is not a decodable video surfaces as an analysis failure,
/// not a hung request or a panic.
#[sqlx::test(migrations = "../db/migrations")]
async fn undecodable_video_returns_500(pool: sqlx::PgPool) {
    let storage = tempfile::tempdir().unwrap();
    let app = common::build_test_app(pool, storage.path());

    let boundary = "----framesight-test-boundary";
    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"video_file\"; filename=\"clip.mp4\"\r\n\
         Content-Type: video/mp4\r\n\r\n\
         this is not a video container\r\n\
         --{boundary}--\r\n"
    );

    let response = common::post(
        app,
        "/analyze-video/",
        &format!("multipart/form-data; boundary={boundary}"),
        Body::from(body),
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = common::body_json(response).await;
    assert_eq!(json["code"], "ANALYSIS_FAILED");

    // The upload itself was persisted before extraction failed.
    assert!(storage.path().join("clip.mp4").exists());
}
