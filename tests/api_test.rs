//! HTTP-level tests against a server bound to a real socket.

mod common;

use common::TestHarness;

#[tokio::test]
async fn health_check_returns_200() {
    let (_harness, addr) = TestHarness::with_server("png").await;

    let resp = reqwest::get(format!("http://{addr}/health"))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), 200);
    assert!(resp.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn tools_lists_ffmpeg_and_ffprobe() {
    let (_harness, addr) = TestHarness::with_server("png").await;

    let resp = reqwest::get(format!("http://{addr}/tools")).await.unwrap();
    assert_eq!(resp.status(), 200);

    let json: serde_json::Value = resp.json().await.unwrap();
    let names: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["ffmpeg", "ffprobe"]);
    // The harness registry is empty, so nothing is reported available.
    assert!(json
        .as_array()
        .unwrap()
        .iter()
        .all(|t| t["available"] == false));
}

#[tokio::test]
async fn multipart_upload_over_the_wire() {
    let (harness, addr) = TestHarness::with_server("mjpeg").await;

    let form = reqwest::multipart::Form::new()
        .part(
            "file",
            reqwest::multipart::Part::bytes(b"\xFF\xD8\xFFjpeg".to_vec()).file_name("photo.jpg"),
        )
        .text("compression_level", "1");

    let resp = reqwest::Client::new()
        .post(format!("http://{addr}/compress_image"))
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("content-type").unwrap().to_str().unwrap(),
        "image/jpeg"
    );
    assert_eq!(resp.bytes().await.unwrap().as_ref(), b"\xFF\xD8\xFFjpeg");

    let options = harness.tool.transcode_options();
    assert_eq!(options[0].get("q").unwrap().to_string(), "1");
}

#[tokio::test]
async fn error_body_is_json_detail() {
    let (_harness, addr) = TestHarness::with_server("gif").await;

    let form = reqwest::multipart::Form::new()
        .part("file", reqwest::multipart::Part::bytes(b"GIF89a".to_vec()))
        .text("width", "10")
        .text("height", "10");

    let resp = reqwest::Client::new()
        .post(format!("http://{addr}/resize_image"))
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);
    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json, serde_json::json!({"detail": "File format gif is not supported by resize"}));
}
