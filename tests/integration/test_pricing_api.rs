//! End-to-end tests for the pricing API over a real TCP listener.

use std::net::SocketAddr;

use serde_json::{json, Value};
use studyquote_pricing::{estimate, PricingParams};
use studyquote_server::{server, AppState, Config, Portal};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// A running server and the handle needed to stop it.
struct TestServer {
    base_url: String,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Spawns the API on an ephemeral port.
    async fn spawn(config: Config) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr: SocketAddr = listener.local_addr().expect("Failed to get local addr");

        let (tx, rx) = oneshot::channel::<()>();
        let state = AppState::new(config);
        let handle = tokio::spawn(async move {
            server::run(listener, state, async {
                rx.await.ok();
            })
            .await
            .expect("Server failed");
        });

        Self {
            base_url: format!("http://{addr}"),
            shutdown: Some(tx),
            handle,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn post(&self, path: &str, body: &Value) -> (reqwest::StatusCode, Value) {
        let response = reqwest::Client::new()
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Request failed");
        let status = response.status();
        let body = response.json().await.expect("Response was not JSON");
        (status, body)
    }

    async fn get(&self, path: &str) -> Value {
        let response = reqwest::get(self.url(path)).await.expect("Request failed");
        assert!(response.status().is_success(), "GET {path} failed");
        response.json().await.expect("Response was not JSON")
    }

    async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            tx.send(()).ok();
        }
        self.handle.await.expect("Server task panicked");
    }
}

#[tokio::test]
async fn test_estimate_documented_scenarios() {
    let server = TestServer::spawn(Config::default()).await;

    let cases = [
        (
            json!({
                "level": "High School",
                "type": "Essay / General",
                "urgency": "Flexible (> 7 Days)",
                "words": 250
            }),
            8,
        ),
        (
            json!({
                "level": "Doctorate (PhD)",
                "type": "Thesis / Research",
                "urgency": "Emergency (< 24h)",
                "pages": 50
            }),
            5000,
        ),
        (
            json!({
                "level": "Undergraduate",
                "type": "Software / Code",
                "urgency": "Standard (3-7 Days)",
                "projectScale": "Full Project"
            }),
            312,
        ),
        (
            json!({
                "level": "Doctorate (PhD)",
                "type": "Homework Help",
                "urgency": "Emergency (< 24h)",
                "words": 9000
            }),
            0,
        ),
    ];

    for (body, expected) in &cases {
        let (status, response) = server.post("/pricing/estimate", body).await;
        assert_eq!(status, reqwest::StatusCode::OK);
        assert_eq!(response["estimatedPrice"], *expected, "body: {body}");
    }

    server.stop().await;
}

#[tokio::test]
async fn test_validate_matches_library() {
    let server = TestServer::spawn(Config::default()).await;

    let params = PricingParams::new("Graduate (Master)", "STEM Problems", "Urgent (1-3 Days)")
        .with_problems(12);
    let expected_estimate = estimate(&params);

    let mut body = serde_json::to_value(&params).expect("Failed to encode params");
    body["userPrice"] = json!(10);

    let (status, response) = server.post("/pricing/validate", &body).await;
    assert_eq!(status, reqwest::StatusCode::OK);
    assert_eq!(response["status"], "low");
    assert_eq!(response["suggestedPrice"], expected_estimate);

    server.stop().await;
}

#[tokio::test]
async fn test_review_keep_my_price_flow() {
    let server = TestServer::spawn(Config::default()).await;

    let mut body = json!({
        "userPrice": 9999,
        "level": "Undergraduate",
        "type": "Software / Code",
        "urgency": "Standard (3-7 Days)",
        "projectScale": "Full Project"
    });

    let (_, first) = server.post("/pricing/review", &body).await;
    assert_eq!(first["decision"], "confirm");
    assert_eq!(first["check"]["suggestedPrice"], 312);

    body["force"] = json!(true);
    let (_, second) = server.post("/pricing/review", &body).await;
    assert_eq!(second["decision"], "proceed");
    assert_eq!(second["price"], 9999.0);

    server.stop().await;
}

#[tokio::test]
async fn test_malformed_body_is_client_error() {
    let server = TestServer::spawn(Config::default()).await;

    let response = reqwest::Client::new()
        .post(server.url("/pricing/estimate"))
        .header("content-type", "application/json")
        .body("{\"level\": ")
        .send()
        .await
        .expect("Request failed");

    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Error body was not JSON");
    assert!(body["error"].is_string());

    server.stop().await;
}

#[tokio::test]
async fn test_concurrent_requests_are_independent() {
    let server = TestServer::spawn(Config::default()).await;
    let client = reqwest::Client::new();

    let mut tasks = Vec::new();
    for pages in 1..=20_i64 {
        let client = client.clone();
        let url = server.url("/pricing/estimate");
        tasks.push(tokio::spawn(async move {
            let body = json!({
                "level": "High School",
                "type": "Thesis / Research",
                "urgency": "Flexible (> 7 Days)",
                "pages": pages
            });
            let response: Value = client
                .post(url)
                .json(&body)
                .send()
                .await
                .expect("Request failed")
                .json()
                .await
                .expect("Response was not JSON");
            (pages, response["estimatedPrice"].as_i64())
        }));
    }

    for task in tasks {
        let (pages, price) = task.await.expect("Task panicked");
        assert_eq!(price, Some(pages * 25));
    }

    server.stop().await;
}

#[tokio::test]
async fn test_portal_and_health_reflect_config() {
    let server = TestServer::spawn(Config {
        portal: Portal::Admin,
        ..Config::default()
    })
    .await;

    let portal = server.get("/portal").await;
    assert_eq!(portal["type"], "ADMIN");
    assert_eq!(portal["themeColor"], "bg-slate-800");

    let health = server.get("/health").await;
    assert_eq!(health["status"], "ok");
    assert_eq!(health["portal"], "admin");

    let tables = server.get("/pricing/tables").await;
    assert_eq!(tables["academicLevels"][3]["label"], "Doctorate (PhD)");

    server.stop().await;
}
