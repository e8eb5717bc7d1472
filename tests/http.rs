use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

const ACTIVITY_LOG: &str = "2025-01-15;3,5;2;10\n2025-02-15;4;;12,5\n2025-03-15;1;1;x\n";

#[derive(Debug, Deserialize)]
struct TimelineResponse {
    labels: Vec<String>,
    walked: Vec<Option<f64>>,
    ran: Vec<Option<f64>>,
    cycled: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct TotalsResponse {
    walked: f64,
    ran: f64,
    cycled: f64,
}

#[derive(Debug, Deserialize)]
struct ActivityResponse {
    timeline: TimelineResponse,
    yearly: Option<TimelineResponse>,
    totals: Option<TotalsResponse>,
}

#[derive(Debug, Deserialize)]
struct SummaryResponse {
    totals: TotalsResponse,
    monthly: serde_json::Map<String, serde_json::Value>,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));
static MISSING_DATA_SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> =
    Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::Mutex;
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PIDS: Mutex<Vec<i32>> = Mutex::new(Vec::new());

    pub fn register(pid: u32) {
        if let Ok(mut pids) = PIDS.lock() {
            pids.push(pid as i32);
        }
        REGISTER.call_once(|| unsafe {
            libc::atexit(on_exit);
        });
    }

    extern "C" fn on_exit() {
        if let Ok(pids) = PIDS.lock() {
            for pid in pids.iter().copied().filter(|pid| *pid > 0) {
                unsafe {
                    libc::kill(pid, libc::SIGTERM);
                }
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_data_path(extension: &str) -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!(
        "activity_charts_http_{}_{}.{extension}",
        std::process::id(),
        nanos
    ));
    path
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/healthz")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server(data_path: &Path) -> TestServer {
    let port = pick_free_port();
    let child = Command::new(env!("CARGO_BIN_EXE_activity_charts"))
        .env("PORT", port.to_string())
        .env("ACTIVITY_DATA_PATH", data_path)
        .env("ACTIVITY_LABEL_FORMAT", "date")
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let data_path = unique_data_path("csv");
    std::fs::write(&data_path, ACTIVITY_LOG).expect("write activity log");
    let server = Arc::new(spawn_server(&data_path).await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn missing_data_server() -> Arc<TestServer> {
    let mut guard = MISSING_DATA_SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server(&unique_data_path("csv")).await);
    *guard = Some(Arc::clone(&server));
    server
}

#[tokio::test]
async fn http_activity_returns_aligned_series() {
    let server = shared_server().await;
    let client = Client::new();

    let report: ActivityResponse = client
        .get(format!("{}/api/activity", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(report.timeline.labels, vec!["Jan 2025", "Feb 2025", "Mar 2025"]);
    assert_eq!(report.timeline.walked, vec![Some(3.5), Some(4.0), Some(1.0)]);
    assert_eq!(report.timeline.ran, vec![Some(2.0), None, Some(1.0)]);
    assert_eq!(report.timeline.cycled, vec![Some(10.0), Some(12.5), None]);
    assert!(report.yearly.is_none());

    let totals = report.totals.expect("totals for delimited input");
    assert_eq!(totals.walked, 8.5);
    assert_eq!(totals.ran, 3.0);
    assert_eq!(totals.cycled, 22.5);
}

#[tokio::test]
async fn http_summary_groups_by_month() {
    let server = shared_server().await;
    let client = Client::new();

    let summary: SummaryResponse = client
        .get(format!("{}/api/summary", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(summary.totals.walked, 8.5);
    assert_eq!(
        summary.monthly.keys().collect::<Vec<_>>(),
        vec!["2025-01", "2025-02", "2025-03"]
    );
}

#[tokio::test]
async fn http_index_renders_charts() {
    let server = shared_server().await;
    let client = Client::new();

    let response = client.get(&server.base_url).send().await.unwrap();
    assert!(response.status().is_success());
    let html = response.text().await.unwrap();
    assert!(html.contains("<svg"));
    assert!(html.contains("3 periods from Jan 2025 to Mar 2025."));
}

#[tokio::test]
async fn http_missing_data_is_unavailable() {
    let server = missing_data_server().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/api/activity", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::SERVICE_UNAVAILABLE);

    let page = client.get(&server.base_url).send().await.unwrap();
    assert_eq!(page.status(), reqwest::StatusCode::SERVICE_UNAVAILABLE);
    let html = page.text().await.unwrap();
    assert!(html.contains("Data unavailable"));
    assert!(!html.contains("<svg"));
}
