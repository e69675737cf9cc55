// Batch-mode orchestration: ordering, pacing, partial failure, join-all.

use std::time::{Duration, Instant};

use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cardgen::{CardClient, ErrorKind, GenerationRequest};

fn fast_client(server: &MockServer) -> CardClient {
    CardClient::builder()
        .base_url(server.uri())
        .batch_delay(Duration::from_millis(50))
        .build()
        .unwrap()
}

fn request(topic: &str) -> GenerationRequest {
    GenerationRequest::new(topic, "t.md").unwrap()
}

fn success_body(file_name: &str) -> serde_json::Value {
    serde_json::json!({
        "success": true,
        "data": {"fileName": file_name, "generationTime": 10, "content": {}}
    })
}

/// Mount a per-topic response so batch items are distinguishable.
async fn mount_topic(server: &MockServer, topic: &str, template: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/api/generate/card"))
        .and(body_partial_json(serde_json::json!({"topic": topic})))
        .respond_with(template)
        .mount(server)
        .await;
}

#[tokio::test]
async fn sequential_batch_preserves_input_order() {
    let server = MockServer::start().await;
    for topic in ["React Hooks", "Vue 3", "Svelte"] {
        let file = format!("{}.html", topic.to_lowercase().replace(' ', "_"));
        mount_topic(
            &server,
            topic,
            ResponseTemplate::new(200).set_body_json(success_body(&file)),
        )
        .await;
    }

    let outcome = fast_client(&server)
        .generate_batch_sequential(vec![
            request("React Hooks"),
            request("Vue 3"),
            request("Svelte"),
        ])
        .await;

    assert_eq!(outcome.total(), 3);
    assert!(outcome.all_succeeded());
    let files: Vec<_> = outcome.succeeded.iter().map(|r| r.file_name.as_str()).collect();
    assert_eq!(files, ["react_hooks.html", "vue_3.html", "svelte.html"]);
}

#[tokio::test]
async fn sequential_batch_paces_requests() {
    let server = MockServer::start().await;
    mount_topic(
        &server,
        "A",
        ResponseTemplate::new(200).set_body_json(success_body("a.html")),
    )
    .await;
    mount_topic(
        &server,
        "B",
        ResponseTemplate::new(200).set_body_json(success_body("b.html")),
    )
    .await;
    mount_topic(
        &server,
        "C",
        ResponseTemplate::new(200).set_body_json(success_body("c.html")),
    )
    .await;

    let started = Instant::now();
    let outcome = fast_client(&server)
        .generate_batch_sequential(vec![request("A"), request("B"), request("C")])
        .await;

    assert_eq!(outcome.total(), 3);
    // Two inter-request pauses of 50ms each.
    assert!(started.elapsed() >= Duration::from_millis(100));
}

#[tokio::test]
async fn sequential_batch_failure_does_not_abort_rest() {
    let server = MockServer::start().await;
    mount_topic(
        &server,
        "good-1",
        ResponseTemplate::new(200).set_body_json(success_body("g1.html")),
    )
    .await;
    mount_topic(&server, "bad", ResponseTemplate::new(500)).await;
    mount_topic(
        &server,
        "good-2",
        ResponseTemplate::new(200).set_body_json(success_body("g2.html")),
    )
    .await;

    let outcome = fast_client(&server)
        .generate_batch_sequential(vec![request("good-1"), request("bad"), request("good-2")])
        .await;

    assert_eq!(outcome.total(), 3);
    assert_eq!(outcome.succeeded.len(), 2);
    assert_eq!(outcome.failed.len(), 1);
    assert_eq!(outcome.failed[0].request.topic, "bad");
    assert_eq!(outcome.failed[0].reason.kind, ErrorKind::Service);
    // Later request still ran.
    assert_eq!(outcome.succeeded[1].file_name, "g2.html");
}

#[tokio::test]
async fn concurrent_batch_partial_failure_keeps_siblings() {
    let server = MockServer::start().await;
    mount_topic(
        &server,
        "one",
        ResponseTemplate::new(200).set_body_json(success_body("one.html")),
    )
    .await;
    mount_topic(&server, "two", ResponseTemplate::new(500)).await;
    mount_topic(
        &server,
        "three",
        ResponseTemplate::new(200).set_body_json(success_body("three.html")),
    )
    .await;

    let outcome = fast_client(&server)
        .generate_batch_concurrent(vec![request("one"), request("two"), request("three")])
        .await;

    assert_eq!(outcome.total(), 3);
    assert_eq!(outcome.succeeded.len(), 2);
    let files: Vec<_> = outcome.succeeded.iter().map(|r| r.file_name.as_str()).collect();
    assert_eq!(files, ["one.html", "three.html"]);
    assert_eq!(outcome.failed.len(), 1);
    assert_eq!(outcome.failed[0].request.topic, "two");
    assert_eq!(outcome.failed[0].reason.status_code, Some(500));
}

#[tokio::test]
async fn concurrent_batch_waits_for_slowest_request() {
    let server = MockServer::start().await;
    mount_topic(
        &server,
        "fast",
        ResponseTemplate::new(200).set_body_json(success_body("fast.html")),
    )
    .await;
    mount_topic(
        &server,
        "slow",
        ResponseTemplate::new(200)
            .set_delay(Duration::from_millis(150))
            .set_body_json(success_body("slow.html")),
    )
    .await;

    let started = Instant::now();
    let outcome = fast_client(&server)
        .generate_batch_concurrent(vec![request("fast"), request("slow")])
        .await;

    // Join-all: completion is gated on every request, including the slow one.
    assert!(started.elapsed() >= Duration::from_millis(150));
    assert_eq!(outcome.total(), 2);
    assert!(outcome.all_succeeded());
}

#[tokio::test]
async fn concurrent_batch_with_cap_of_one_still_completes_all() {
    let server = MockServer::start().await;
    for topic in ["a", "b", "c"] {
        mount_topic(
            &server,
            topic,
            ResponseTemplate::new(200).set_body_json(success_body(&format!("{topic}.html"))),
        )
        .await;
    }

    let client = CardClient::builder()
        .base_url(server.uri())
        .max_concurrency(1)
        .build()
        .unwrap();

    let outcome = client
        .generate_batch_concurrent(vec![request("a"), request("b"), request("c")])
        .await;

    assert_eq!(outcome.total(), 3);
    assert!(outcome.all_succeeded());
    // Input order preserved even under a serializing cap.
    let files: Vec<_> = outcome.succeeded.iter().map(|r| r.file_name.as_str()).collect();
    assert_eq!(files, ["a.html", "b.html", "c.html"]);
}

#[tokio::test]
async fn empty_batches_return_empty_outcomes() {
    let server = MockServer::start().await;
    let client = fast_client(&server);

    let sequential = client.generate_batch_sequential(vec![]).await;
    assert_eq!(sequential.total(), 0);
    assert!(sequential.all_succeeded());

    let concurrent = client.generate_batch_concurrent(vec![]).await;
    assert_eq!(concurrent.total(), 0);
}

#[tokio::test]
async fn batch_accounting_never_double_counts() {
    let server = MockServer::start().await;
    mount_topic(
        &server,
        "ok",
        ResponseTemplate::new(200).set_body_json(success_body("ok.html")),
    )
    .await;
    mount_topic(&server, "nope", ResponseTemplate::new(404)).await;

    let requests = vec![request("ok"), request("nope"), request("ok"), request("nope")];
    let total = requests.len();
    let outcome = fast_client(&server).generate_batch_concurrent(requests).await;

    assert_eq!(outcome.succeeded.len() + outcome.failed.len(), total);
    assert_eq!(outcome.succeeded.len(), 2);
    assert_eq!(outcome.failed.len(), 2);
}
