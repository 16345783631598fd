use super::*;

fn test_client(base_url: &str) -> YouTubeClient {
    YouTubeClient::with_base_url("test-key", 30, base_url)
        .expect("client construction should not fail")
}

#[test]
fn build_url_appends_endpoint_and_key() {
    let client = test_client("https://www.googleapis.com/youtube/v3");
    let url = client
        .build_url("channels", &[("part", "snippet"), ("id", "UC1")])
        .unwrap();
    assert_eq!(
        url.as_str(),
        "https://www.googleapis.com/youtube/v3/channels?part=snippet&id=UC1&key=test-key"
    );
}

#[test]
fn build_url_tolerates_trailing_slash() {
    let client = test_client("https://www.googleapis.com/youtube/v3/");
    let url = client.build_url("videos", &[("id", "a,b")]).unwrap();
    assert!(url
        .as_str()
        .starts_with("https://www.googleapis.com/youtube/v3/videos?"));
}

#[test]
fn build_url_encodes_non_ascii_query() {
    let client = test_client("http://127.0.0.1:9999");
    let url = client.build_url("search", &[("q", "தமிழ் comedy")]).unwrap();
    assert!(
        url.as_str().contains("q=%E0%AE%A4"),
        "query should be percent-encoded: {url}"
    );
}

#[test]
fn invalid_base_url_is_rejected() {
    let result = YouTubeClient::with_base_url("k", 30, "not a url");
    assert!(matches!(result, Err(YouTubeError::InvalidBaseUrl { .. })));
}

#[test]
fn classify_quota_exceeded_reason() {
    let body = r#"{"error":{"code":403,"message":"The request cannot be completed because you have exceeded your quota.","errors":[{"reason":"quotaExceeded","message":"x"}]}}"#;
    let err = classify_error(StatusCode::FORBIDDEN, body);
    assert!(err.is_quota_exceeded(), "got: {err}");
    assert!(err.to_string().contains("quotaExceeded"));
}

#[test]
fn classify_rate_limit_reason_as_quota() {
    let body = r#"{"error":{"code":403,"message":"Rate Limit Exceeded","errors":[{"reason":"rateLimitExceeded"}]}}"#;
    assert!(classify_error(StatusCode::FORBIDDEN, body).is_quota_exceeded());
}

#[test]
fn classify_429_without_body_as_quota() {
    assert!(classify_error(StatusCode::TOO_MANY_REQUESTS, "").is_quota_exceeded());
}

#[test]
fn classify_other_forbidden_as_api_error() {
    let body = r#"{"error":{"code":403,"message":"API key not valid.","errors":[{"reason":"forbidden"}]}}"#;
    let err = classify_error(StatusCode::FORBIDDEN, body);
    assert!(
        matches!(err, YouTubeError::Api { status: 403, ref message } if message == "API key not valid."),
        "got: {err:?}"
    );
}

#[test]
fn classify_unparsable_body_uses_canonical_reason() {
    let err = classify_error(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>");
    assert!(
        matches!(err, YouTubeError::Api { status: 500, ref message } if message == "Internal Server Error"),
        "got: {err:?}"
    );
}
