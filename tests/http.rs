use axum::{routing::get, Router};
use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize, PartialEq)]
struct DisplaySnapshot {
    status_text: Option<String>,
    status_class: Option<String>,
    distance: Option<String>,
    score: Option<String>,
    alerts: Option<String>,
    mission_bar_width: Option<String>,
    mission_text: Option<String>,
    timestamp: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HealthResponse {
    cycles_started: u64,
    failures: u64,
}

/// Stand-in for the remote posture API, served from its own thread so it
/// outlives every per-test runtime.
struct MockFeed {
    url: String,
    body: Arc<std::sync::Mutex<String>>,
}

impl MockFeed {
    fn set_body(&self, body: impl Into<String>) {
        *self.body.lock().unwrap() = body.into();
    }
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

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));
static FEED: Lazy<MockFeed> = Lazy::new(start_feed);

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn start_feed() -> MockFeed {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind feed port");
    listener.set_nonblocking(true).expect("nonblocking feed listener");
    let addr = listener.local_addr().unwrap();
    let body = Arc::new(std::sync::Mutex::new("[]".to_string()));
    let served = Arc::clone(&body);

    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("feed runtime");
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(listener).expect("feed listener");
            let app = Router::new().route(
                "/posture",
                get(move || {
                    let current = served.lock().unwrap().clone();
                    async move { current }
                }),
            );
            axum::serve(listener, app).await.expect("feed server");
        });
    });

    MockFeed {
        url: format!("http://{addr}/posture"),
        body,
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/health")).send().await {
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

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let child = Command::new(env!("CARGO_BIN_EXE_posture_dashboard"))
        .env("PORT", port.to_string())
        .env("POSTURE_API_URL", &FEED.url)
        .env("POSTURE_POLL_INTERVAL_MS", "100")
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
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn display(client: &Client, server: &TestServer) -> DisplaySnapshot {
    client
        .get(format!("{}/api/display", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

async fn health(client: &Client, server: &TestServer) -> HealthResponse {
    client
        .get(format!("{}/api/health", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

async fn wait_for_score(client: &Client, server: &TestServer, score: &str) -> DisplaySnapshot {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        let snapshot = display(client, server).await;
        if snapshot.score.as_deref() == Some(score) {
            return snapshot;
        }
        if Instant::now() > deadline {
            panic!("display never showed score {score}: {snapshot:?}");
        }
        sleep(Duration::from_millis(50)).await;
    }
}

async fn wait_for_cycles(client: &Client, server: &TestServer, count: u64) {
    let start = health(client, server).await.cycles_started;
    let deadline = Instant::now() + Duration::from_secs(5);
    while health(client, server).await.cycles_started < start + count {
        if Instant::now() > deadline {
            panic!("poller stalled");
        }
        sleep(Duration::from_millis(50)).await;
    }
}

#[tokio::test]
async fn http_display_shows_latest_reading() {
    let _guard = TEST_LOCK.lock().await;
    FEED.set_body(
        r#"[
            {"status":"bad","distance":12,"score":5,"alerts":9},
            {"status":"good","distance":48,"score":42,"alerts":1,"createdAt":"2024-05-02T08:30:00Z"}
        ]"#,
    );
    let server = shared_server().await;
    let client = Client::new();

    let snapshot = wait_for_score(&client, &server, "42").await;
    assert_eq!(snapshot.status_text.as_deref(), Some("Boa Postura"));
    assert_eq!(snapshot.status_class.as_deref(), Some("status-good"));
    assert_eq!(snapshot.distance.as_deref(), Some("48"));
    assert_eq!(snapshot.alerts.as_deref(), Some("1"));
    assert_eq!(snapshot.mission_bar_width.as_deref(), Some("70%"));
    assert_eq!(snapshot.mission_text.as_deref(), Some("Progresso: 42 / 60 pontos"));
    assert_eq!(
        snapshot.timestamp.as_deref(),
        Some("Última atualização: 2024-05-02T08:30:00Z")
    );

    let page = client
        .get(format!("{}/", server.base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains(r#"<div id="status" class="status-good">Boa Postura</div>"#));
    assert!(page.contains(r#"style="width: 70%""#));
}

#[tokio::test]
async fn http_empty_feed_keeps_last_display() {
    let _guard = TEST_LOCK.lock().await;
    FEED.set_body(r#"[{"status":"slouching","distance":30,"score":75,"alerts":3}]"#);
    let server = shared_server().await;
    let client = Client::new();

    let before = wait_for_score(&client, &server, "75").await;
    assert_eq!(before.status_text.as_deref(), Some("Má Postura"));
    assert_eq!(before.timestamp.as_deref(), Some("Última atualização: agora"));

    FEED.set_body("[]");
    wait_for_cycles(&client, &server, 3).await;
    assert_eq!(display(&client, &server).await, before);
}

#[tokio::test]
async fn http_bad_feed_body_counts_failures() {
    let _guard = TEST_LOCK.lock().await;
    FEED.set_body(r#"[{"status":"good","distance":40,"score":12,"alerts":0}]"#);
    let server = shared_server().await;
    let client = Client::new();

    let before = wait_for_score(&client, &server, "12").await;
    let failures = health(&client, &server).await.failures;

    FEED.set_body("service unavailable");
    wait_for_cycles(&client, &server, 3).await;

    assert!(health(&client, &server).await.failures > failures);
    assert_eq!(display(&client, &server).await, before);
}
