use axum::{http::StatusCode, response::Json, routing::get, Router};
use serde_json::{json, Value};
use sysmon_core::display::{FETCH_ERROR_TITLE, OFFLINE_LABEL};
use sysmon_core::{Connectivity, PollerConfig};
use sysmon_poller::{
    Dashboard, Element, FetchError, HttpMetricsSource, MetricsSource, RefreshOutcome,
    StatusPoller, TableContent, TableRow,
};

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn latest() -> Json<Value> {
    Json(json!({
        "cpu_load": 63.4,
        "gpu_load": 18.0,
        "timestamp": "2024-05-01T12:30:45Z",
        "top_processes": [
            {"name": "chrome.exe", "pid": 4312, "cpu_percent": 21.37},
            {"name": "<img src=x>", "pid": 0, "cpu_percent": 3.0}
        ]
    }))
}

async fn metrics() -> Json<Value> {
    Json(json!({"avg_cpu_load": 48.26, "avg_gpu_load": 11.0}))
}

fn healthy_backend() -> Router {
    Router::new()
        .route("/api/latest", get(latest))
        .route("/api/metrics", get(metrics))
}

#[tokio::test]
async fn test_fetches_both_endpoints() {
    let base_url = serve(healthy_backend()).await;
    let source = HttpMetricsSource::new(&PollerConfig::new(&base_url)).unwrap();

    let sample = source.fetch_latest().await.unwrap();
    let summary = source.fetch_metrics().await.unwrap();

    assert_eq!(sample.cpu_load, Some(63.4));
    assert_eq!(sample.top_processes.map(|p| p.len()), Some(2));
    assert_eq!(summary.avg_cpu_load, Some(48.26));
}

#[tokio::test]
async fn test_refresh_renders_backend_data() {
    let base_url = serve(healthy_backend()).await;
    let config = PollerConfig::new(&base_url);
    let source = HttpMetricsSource::new(&config).unwrap();
    let mut poller = StatusPoller::new(source, Dashboard::new(), config);

    let outcome = poller.refresh().await;

    assert_eq!(outcome, RefreshOutcome::Updated);
    assert_eq!(poller.connectivity(), Connectivity::Online);
    let view = poller.into_view();
    assert_eq!(view.text(Element::CpuValue), "63.4%");
    assert_eq!(view.width(Element::GpuBar), Some(18.0));
    assert_eq!(view.text(Element::AvgCpu), "48.3");
    assert_eq!(
        view.rows()[1],
        TableRow::Process {
            name: "img src=x".to_string(),
            pid: "-".to_string(),
            cpu: "3.0%".to_string(),
            reveal_delay: std::time::Duration::from_millis(50),
        }
    );
}

#[tokio::test]
async fn test_server_error_goes_offline() {
    let app = Router::new()
        .route("/api/latest", get(latest))
        .route(
            "/api/metrics",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
    let base_url = serve(app).await;
    let config = PollerConfig::new(&base_url);
    let source = HttpMetricsSource::new(&config).unwrap();
    let mut poller = StatusPoller::new(source, Dashboard::new(), config);

    let outcome = poller.refresh().await;

    match outcome {
        RefreshOutcome::Failed(FetchError::Status { status, endpoint }) => {
            assert_eq!(status, 500);
            assert!(endpoint.ends_with("/api/metrics"));
        }
        other => panic!("unexpected outcome {other:?}"),
    }
    assert_eq!(poller.connectivity(), Connectivity::Offline);
    assert_eq!(poller.table(), TableContent::Error);
    assert_eq!(poller.view().text(Element::StatusText), OFFLINE_LABEL);
    match &poller.view().rows()[..] {
        [TableRow::Error { title, detail }] => {
            assert_eq!(title, FETCH_ERROR_TITLE);
            assert!(detail.contains("500"));
        }
        other => panic!("unexpected rows {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_body_is_malformed() {
    let app = Router::new()
        .route("/api/latest", get(|| async { StatusCode::NO_CONTENT }))
        .route("/api/metrics", get(metrics));
    let base_url = serve(app).await;
    let source = HttpMetricsSource::new(&PollerConfig::new(&base_url)).unwrap();

    let result = source.fetch_latest().await;

    assert!(matches!(result, Err(FetchError::Decode(_))));
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    // Bind then drop so the port is closed
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let source = HttpMetricsSource::new(&PollerConfig::new(&format!("http://{}", addr))).unwrap();

    let result = source.fetch_metrics().await;

    assert!(matches!(result, Err(FetchError::Transport(_))));
}

#[tokio::test]
async fn test_untidy_payload_still_renders() {
    let app = Router::new()
        .route(
            "/api/latest",
            get(|| async {
                Json(json!({
                    "cpu_load": 12.0,
                    "timestamp": 12345,
                    "top_processes": [
                        {"name": "a", "pid": 1, "cpu_percent": 5.0},
                        {"name": "b", "pid": 2.0, "cpu_percent": 4.0}
                    ]
                }))
            }),
        )
        .route("/api/metrics", get(metrics));
    let base_url = serve(app).await;
    let config = PollerConfig::new(&base_url);
    let source = HttpMetricsSource::new(&config).unwrap();
    let mut poller = StatusPoller::new(source, Dashboard::new(), config);

    let outcome = poller.refresh().await;

    assert_eq!(outcome, RefreshOutcome::Updated);
    assert_eq!(poller.connectivity(), Connectivity::Online);
    assert_eq!(poller.table(), TableContent::Processes);
    let view = poller.view();
    assert_eq!(view.rows().len(), 2);
    match &view.rows()[1] {
        TableRow::Process { name, pid, .. } => {
            assert_eq!(name, "b");
            assert_eq!(pid, "2");
        }
        other => panic!("unexpected row {other:?}"),
    }
    assert_eq!(view.text(Element::CpuValue), "12.0%");
    assert!(view.element(Element::Timestamp).is_none());
}
