use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct Symptom {
    id: u64,
    symptom: String,
    severity: u8,
    notes: String,
    date: String,
    time: String,
}

#[derive(Debug, Deserialize)]
struct SymptomLogged {
    symptom: Symptom,
    advice: String,
}

#[derive(Debug, Deserialize)]
struct Appointment {
    id: u64,
    doctor: String,
    time: String,
    reason: String,
    status: String,
}

#[derive(Debug, Deserialize)]
struct Profile {
    name: String,
    email: String,
    notifications: bool,
}

#[derive(Debug, Deserialize)]
struct DashboardStats {
    total_symptoms: u64,
    days_tracked: u64,
}

#[derive(Debug, Deserialize)]
struct SummaryResponse {
    dashboard: DashboardStats,
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

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_data_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("health_tracker_http_{}_{}.json", std::process::id(), nanos));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/summary")).send().await {
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
    let data_path = unique_data_path();
    let child = Command::new(env!("CARGO_BIN_EXE_health_tracker"))
        .env("PORT", port.to_string())
        .env("APP_DATA_PATH", data_path)
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

fn days_from_today(days: i64) -> String {
    (today() + chrono::Duration::days(days)).to_string()
}

fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

async fn summary(client: &Client, base_url: &str) -> SummaryResponse {
    client
        .get(format!("{base_url}/api/summary"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[tokio::test]
async fn http_symptom_lifecycle() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    let before = summary(&client, &server.base_url).await;

    let logged: SymptomLogged = client
        .post(format!("{}/api/symptoms", server.base_url))
        .json(&serde_json::json!({
            "symptom": "Fever",
            "severity": 8,
            "duration": "1-2 days",
            "notes": "body aches"
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(logged.symptom.symptom, "Fever");
    assert_eq!(logged.symptom.date, today().to_string());
    assert_eq!(logged.symptom.time.len(), 5);
    assert!(logged.advice.starts_with("High severity"));

    let after = summary(&client, &server.base_url).await;
    assert_eq!(after.dashboard.total_symptoms, before.dashboard.total_symptoms + 1);
    assert!(after.dashboard.days_tracked >= 1);

    let updated: Symptom = client
        .patch(format!("{}/api/symptoms/{}", server.base_url, logged.symptom.id))
        .json(&serde_json::json!({ "severity": 4 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(updated.severity, 4);
    assert_eq!(updated.notes, "body aches");

    let listed: Vec<Symptom> = client
        .get(format!("{}/api/symptoms", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed.first().map(|s| s.id), Some(logged.symptom.id));

    let deleted = client
        .delete(format!("{}/api/symptoms/{}", server.base_url, logged.symptom.id))
        .send()
        .await
        .unwrap();
    assert!(deleted.status().is_success());

    let again = client
        .delete(format!("{}/api/symptoms/{}", server.base_url, logged.symptom.id))
        .send()
        .await
        .unwrap();
    assert_eq!(again.status(), reqwest::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn http_appointment_cancel_drops_from_upcoming() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let booked: Appointment = client
        .post(format!("{}/api/appointments", server.base_url))
        .json(&serde_json::json!({
            "doctor": "Dr. Robert Kim",
            "specialty": "Cardiology",
            "date": days_from_today(3),
            "time": "10:00",
            "reason": "Annual cardiac checkup"
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(booked.status, "Pending");
    assert_eq!(booked.doctor, "Dr. Robert Kim");

    let upcoming: Vec<Appointment> = client
        .get(format!("{}/api/appointments/upcoming?days=7", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(upcoming.iter().any(|a| a.id == booked.id));

    for _ in 0..2 {
        let cancelled: Appointment = client
            .post(format!("{}/api/appointments/{}/cancel", server.base_url, booked.id))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(cancelled.status, "Cancelled");
        assert_eq!(cancelled.reason, "Annual cardiac checkup");
    }

    let upcoming: Vec<Appointment> = client
        .get(format!("{}/api/appointments/upcoming?days=7", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(upcoming.iter().all(|a| a.id != booked.id));

    let missing = client
        .post(format!("{}/api/appointments/999999/cancel", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), reqwest::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn http_directory_and_chat() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let doctors: Vec<String> = client
        .get(format!("{}/api/specialties/Neurology/doctors", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(doctors, vec!["Dr. David Martinez", "Dr. Jennifer Lee"]);

    let unknown: Vec<String> = client
        .get(format!("{}/api/specialties/Unknown/doctors", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(unknown.is_empty());

    let reply: serde_json::Value = client
        .post(format!("{}/api/chat", server.base_url))
        .json(&serde_json::json!({ "message": "I have a headache" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(reply["reply"].as_str().unwrap().starts_with("Headaches"));

    let blank = client
        .post(format!("{}/api/chat", server.base_url))
        .json(&serde_json::json!({ "message": "   " }))
        .send()
        .await
        .unwrap();
    assert_eq!(blank.status(), reqwest::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn http_index_renders_dashboard() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let body = client
        .get(format!("{}/", server.base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("Health Tracker"));
    assert!(body.contains("Symptom summary"));
}

#[tokio::test]
async fn http_symptom_range_query() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let mut ids = Vec::new();
    for (label, date) in [
        ("Rash", "2001-03-02"),
        ("Rash", "2001-02-28"),
        ("Cough", "2001-03-01"),
        ("Cough", "2001-03-05"),
    ] {
        let logged: SymptomLogged = client
            .post(format!("{}/api/symptoms", server.base_url))
            .json(&serde_json::json!({
                "symptom": label,
                "severity": 2,
                "date": date,
                "time": "07:45"
            }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        ids.push(logged.symptom.id);
    }

    let in_range: Vec<Symptom> = client
        .get(format!(
            "{}/api/symptoms?start=2001-03-01&end=2001-03-02",
            server.base_url
        ))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let found: Vec<u64> = in_range.iter().map(|s| s.id).collect();
    assert_eq!(found, vec![ids[0], ids[2]]);

    let inverted = client
        .get(format!(
            "{}/api/symptoms?start=2001-03-05&end=2001-03-01",
            server.base_url
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(inverted.status(), reqwest::StatusCode::BAD_REQUEST);

    let half = client
        .get(format!("{}/api/symptoms?start=2001-03-01", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(half.status(), reqwest::StatusCode::BAD_REQUEST);

    for id in ids {
        client
            .delete(format!("{}/api/symptoms/{id}", server.base_url))
            .send()
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn http_profile_round_trip() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let saved: Profile = client
        .put(format!("{}/api/profile", server.base_url))
        .json(&serde_json::json!({
            "name": "  Cavin ",
            "email": "cavin@example.com",
            "notifications": false
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(saved.name, "Cavin");

    let fetched: Profile = client
        .get(format!("{}/api/profile", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched.name, "Cavin");
    assert_eq!(fetched.email, "cavin@example.com");
    assert!(!fetched.notifications);

    let blank: Profile = client
        .put(format!("{}/api/profile", server.base_url))
        .json(&serde_json::json!({ "name": "   ", "email": "" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(blank.name, "User");
    assert!(blank.notifications);

    let page = client
        .get(format!("{}/", server.base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains("Welcome back, User"));
}

#[tokio::test]
async fn http_appointment_update_and_required_fields() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let booked: Appointment = client
        .post(format!("{}/api/appointments", server.base_url))
        .json(&serde_json::json!({
            "doctor": "Dr. Emily Davis",
            "specialty": "Dermatology",
            "date": days_from_today(10),
            "time": "09:00",
            "reason": "Skin check"
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let updated: Appointment = client
        .patch(format!("{}/api/appointments/{}", server.base_url, booked.id))
        .json(&serde_json::json!({ "status": "Confirmed", "time": "15:30" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(updated.status, "Confirmed");
    assert_eq!(updated.time, "15:30");
    assert_eq!(updated.doctor, "Dr. Emily Davis");
    assert_eq!(updated.reason, "Skin check");

    let missing = client
        .patch(format!("{}/api/appointments/999999", server.base_url))
        .json(&serde_json::json!({ "reason": "none" }))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), reqwest::StatusCode::NOT_FOUND);

    let blank_doctor = client
        .post(format!("{}/api/appointments", server.base_url))
        .json(&serde_json::json!({
            "doctor": "  ",
            "specialty": "Dermatology",
            "date": days_from_today(10),
            "time": "09:00"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(blank_doctor.status(), reqwest::StatusCode::BAD_REQUEST);

    let blank_specialty = client
        .post(format!("{}/api/appointments", server.base_url))
        .json(&serde_json::json!({
            "doctor": "Dr. Emily Davis",
            "specialty": "",
            "date": days_from_today(10),
            "time": "09:00"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(blank_specialty.status(), reqwest::StatusCode::BAD_REQUEST);
}
