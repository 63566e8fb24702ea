//! End-to-end aggregation tests: mock sheets in, parsed and persisted records out.

use std::sync::Arc;
use std::time::Duration;

use quizdl_core::persist::{OutputFormat, per_source_path, read_aggregate};
use quizdl_core::{
    Aggregator, FetchConfig, HttpFetcher, ParseStrategy, SourceRegistry, write_aggregate,
    write_records,
};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_sheet(server: &MockServer, sheet: &str, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path(sheet))
        .respond_with(ResponseTemplate::new(status).set_body_string(body.to_string()))
        .mount(server)
        .await;
}

/// Serves all four built-in sheets: two tabular, one positional, one broken.
async fn mock_site() -> MockServer {
    let server = MockServer::start().await;
    mount_sheet(
        &server,
        "/kkong.csv",
        200,
        "No\tQuestion\tAnswer\n1\t대한민국의 수도는?\t서울\n2\t  \t빈칸\n3\t1+1은?\t2\n",
    )
    .await;
    mount_sheet(
        &server,
        "/questions.csv",
        200,
        "가장 큰 바다는 태평양\n\n물의 끓는점 100도\n",
    )
    .await;
    mount_sheet(&server, "/oxxo.csv", 500, "boom").await;
    mount_sheet(
        &server,
        "/garo.csv",
        200,
        "Question\tAnswer\n\"따옴표 \"\"안\"\" 문제\"\t정답\n",
    )
    .await;
    server
}

fn aggregator_for(server: &MockServer) -> Aggregator {
    let fetcher = HttpFetcher::new(&FetchConfig {
        base_url: server.uri(),
        timeout: Duration::from_secs(5),
    })
    .expect("client should build");
    Aggregator::new(Arc::new(fetcher)).with_pacing(Duration::ZERO)
}

#[tokio::test]
async fn test_run_all_recovers_from_failed_source() {
    let server = mock_site().await;
    let registry = SourceRegistry::builtin();

    let result = aggregator_for(&server).run_all(&registry).await;

    let keys: Vec<_> = result.per_source().iter().map(|e| e.key.as_str()).collect();
    assert_eq!(keys, ["kkong", "ollao", "oxxo", "garo"]);
    assert_eq!(result.failed_sources(), ["oxxo".to_string()]);
    assert_eq!(result.records_for("oxxo"), Some(&[][..]));

    let kkong = result.records_for("kkong").unwrap();
    assert_eq!(kkong.len(), 2);
    assert_eq!(kkong[0].question, "대한민국의 수도는?");
    assert_eq!(kkong[0].answer, "서울");
    assert_eq!(kkong[0].game, "꽁꽁");
    assert_eq!(kkong[1].id, 3);

    let ollao = result.records_for("ollao").unwrap();
    assert_eq!(ollao.len(), 2);
    assert_eq!(ollao[0].question, "가장 큰 바다는");
    assert_eq!(ollao[0].answer, "태평양");
    assert_eq!(ollao[1].id, 3);

    let garo = result.records_for("garo").unwrap();
    assert_eq!(garo[0].question, "따옴표 \"안\" 문제");

    assert_eq!(result.total_count(), 5);
}

#[tokio::test]
async fn test_run_source_reports_strategy() {
    let server = mock_site().await;
    let registry = SourceRegistry::builtin();
    let aggregator = aggregator_for(&server);

    let tabular = aggregator
        .run_source(registry.get("kkong").unwrap())
        .await
        .unwrap();
    assert_eq!(tabular.strategy, ParseStrategy::Tabular);
    assert_eq!(tabular.skipped, 1);

    let positional = aggregator
        .run_source(registry.get("ollao").unwrap())
        .await
        .unwrap();
    assert_eq!(positional.strategy, ParseStrategy::Positional);
}

#[tokio::test]
async fn test_run_selected_by_menu_number() {
    let server = mock_site().await;
    let registry = SourceRegistry::builtin();

    let result = aggregator_for(&server)
        .run_selected(&registry, "4")
        .await
        .unwrap();

    assert_eq!(result.source_count(), 1);
    assert_eq!(result.records_for("garo").unwrap().len(), 1);
}

#[tokio::test]
async fn test_run_selected_unknown_key_is_rejected_before_fetching() {
    let server = MockServer::start().await;
    let registry = SourceRegistry::builtin();

    let err = aggregator_for(&server)
        .run_selected(&registry, "zzz")
        .await
        .unwrap_err();

    assert!(err.to_string().contains("zzz"));
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn test_aggregate_persists_and_reads_back() {
    let server = mock_site().await;
    let registry = SourceRegistry::builtin();
    let result = aggregator_for(&server).run_all(&registry).await;
    let dir = TempDir::new().expect("failed to create temp dir");

    let combined = dir.path().join("all_questions.json");
    write_aggregate(&result, &combined).unwrap();
    let restored = read_aggregate(&combined).unwrap();

    assert_eq!(restored.total_count(), result.total_count());
    assert_eq!(restored.records_for("kkong"), result.records_for("kkong"));
    assert_eq!(restored.captured_at(), result.captured_at());

    let kkong_path = per_source_path(dir.path(), "kkong", OutputFormat::Json);
    write_records(
        result.records_for("kkong").unwrap(),
        "꽁꽁",
        result.captured_at(),
        &kkong_path,
        OutputFormat::Json,
    )
    .unwrap();
    let single = read_aggregate(&kkong_path).unwrap();
    assert_eq!(single.records_for("kkong"), result.records_for("kkong"));
}
