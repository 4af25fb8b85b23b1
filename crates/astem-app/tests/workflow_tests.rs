//! End-to-end workflow tests against a mock backend.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use astem_app::{
    AppConfig, AppError, Panel, SelectedFile, SessionOutcome, View, ViewModel, Workflow,
};
use astem_client::StemServiceClient;
use astem_models::ProcessingParams;

/// View that records every progress update it receives.
#[derive(Default)]
struct RecordingView {
    inner: ViewModel,
    progress_updates: Vec<(u8, String)>,
}

impl View for RecordingView {
    fn set_selected_file(&mut self, name: Option<&str>) {
        self.inner.set_selected_file(name);
    }

    fn set_busy(&mut self, busy: bool) {
        self.inner.set_busy(busy);
    }

    fn set_progress(&mut self, percent: u8, message: &str) {
        self.progress_updates.push((percent, message.to_string()));
        self.inner.set_progress(percent, message);
    }

    fn show_progress(&mut self) {
        self.inner.show_progress();
    }

    fn show_result(&mut self, download_url: &url::Url) {
        self.inner.show_result(download_url);
    }

    fn show_error(&mut self, message: &str) {
        self.inner.show_error(message);
    }
}

fn test_config() -> AppConfig {
    AppConfig {
        server_url: String::new(), // set per test from the mock server
        poll_interval: Duration::from_millis(10),
        max_polls: Some(50),
    }
}

fn workflow_for(server: &MockServer) -> Workflow {
    let client = StemServiceClient::new(&server.uri()).unwrap();
    let mut config = test_config();
    config.server_url = server.uri();
    Workflow::new(client, config)
}

fn video_file() -> SelectedFile {
    SelectedFile::new("clip.mp4", b"fake video bytes".to_vec())
}

async fn mount_upload_ok(server: &MockServer, job_id: &str) {
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"job_id": job_id})))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn first_poll_targets_the_returned_job_id() {
    let server = MockServer::start().await;
    mount_upload_ok(&server, "abc").await;
    Mock::given(method("GET"))
        .and(path("/progress/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "done", "progress": 100})))
        .expect(1)
        .mount(&server)
        .await;

    let mut view = ViewModel::new();
    let outcome = workflow_for(&server)
        .run(&mut view, video_file(), ProcessingParams::default())
        .await
        .unwrap();

    assert!(matches!(outcome, SessionOutcome::Completed { .. }));
}

#[tokio::test]
async fn in_progress_snapshot_updates_display_and_rearms_exactly_once() {
    let server = MockServer::start().await;
    mount_upload_ok(&server, "abc").await;

    // First cycle reports progress, second is terminal. The expired
    // first mock lets the follow-up request fall through to the second.
    Mock::given(method("GET"))
        .and(path("/progress/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "running", "progress": 40, "message": "Encoding"
        })))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/progress/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "done", "progress": 100, "message": "Done"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut view = RecordingView::default();
    let outcome = workflow_for(&server)
        .run(&mut view, video_file(), ProcessingParams::default())
        .await
        .unwrap();

    assert!(matches!(outcome, SessionOutcome::Completed { .. }));
    // Upload notices, then one update per poll cycle, terminal cycle
    // included.
    assert_eq!(
        view.progress_updates,
        vec![
            (0, "Uploading…".to_string()),
            (0, "Starting…".to_string()),
            (40, "Encoding".to_string()),
            (100, "Done".to_string()),
        ]
    );
    assert_eq!(view.inner.percent, 100);
}

#[tokio::test]
async fn done_switches_to_result_with_download_link_and_stops_polling() {
    let server = MockServer::start().await;
    mount_upload_ok(&server, "abc").await;
    Mock::given(method("GET"))
        .and(path("/progress/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "done"})))
        .expect(1)
        .mount(&server)
        .await;

    let mut view = ViewModel::new();
    let outcome = workflow_for(&server)
        .run(&mut view, video_file(), ProcessingParams::default())
        .await
        .unwrap();

    assert_eq!(view.panel, Panel::Result);
    assert!(!view.busy);
    let url = view.download_url.as_ref().expect("download link bound");
    assert!(url.as_str().ends_with("/download/abc"));
    match outcome {
        SessionOutcome::Completed { download_url } => assert_eq!(&download_url, url),
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[tokio::test]
async fn backend_reported_error_shows_its_message() {
    let server = MockServer::start().await;
    mount_upload_ok(&server, "abc").await;
    Mock::given(method("GET"))
        .and(path("/progress/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "error", "message": "boom"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut view = ViewModel::new();
    let outcome = workflow_for(&server)
        .run(&mut view, video_file(), ProcessingParams::default())
        .await
        .unwrap();

    assert_eq!(outcome, SessionOutcome::Failed);
    assert_eq!(view.panel, Panel::Error);
    assert_eq!(view.message, "boom");
    assert!(!view.busy);
}

#[tokio::test]
async fn backend_error_without_message_falls_back_to_unknown() {
    let server = MockServer::start().await;
    mount_upload_ok(&server, "abc").await;
    Mock::given(method("GET"))
        .and(path("/progress/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "error"})))
        .mount(&server)
        .await;

    let mut view = ViewModel::new();
    workflow_for(&server)
        .run(&mut view, video_file(), ProcessingParams::default())
        .await
        .unwrap();

    assert_eq!(view.panel, Panel::Error);
    assert_eq!(view.message, "Unknown error");
}

#[tokio::test]
async fn upload_rejection_short_circuits_before_any_poll() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(413).set_body_json(json!({"error": "too large"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/progress/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "done"})))
        .expect(0)
        .mount(&server)
        .await;

    let mut view = ViewModel::new();
    let outcome = workflow_for(&server)
        .run(&mut view, video_file(), ProcessingParams::default())
        .await
        .unwrap();

    assert_eq!(outcome, SessionOutcome::Failed);
    assert_eq!(view.panel, Panel::Error);
    assert_eq!(view.message, "too large");
    assert!(!view.busy);
}

#[tokio::test]
async fn failed_poll_request_ends_the_job() {
    let server = MockServer::start().await;
    mount_upload_ok(&server, "abc").await;
    Mock::given(method("GET"))
        .and(path("/progress/abc"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let mut view = ViewModel::new();
    let outcome = workflow_for(&server)
        .run(&mut view, video_file(), ProcessingParams::default())
        .await
        .unwrap();

    assert_eq!(outcome, SessionOutcome::Failed);
    assert_eq!(view.panel, Panel::Error);
    assert_eq!(view.message, "Progress request failed");
    assert!(!view.busy);
}

#[tokio::test]
async fn poll_ceiling_is_surfaced_as_a_failure() {
    let server = MockServer::start().await;
    mount_upload_ok(&server, "slow").await;
    Mock::given(method("GET"))
        .and(path("/progress/slow"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "running", "progress": 10, "message": "Still going"
        })))
        .expect(3)
        .mount(&server)
        .await;

    let client = StemServiceClient::new(&server.uri()).unwrap();
    let config = AppConfig {
        server_url: server.uri(),
        poll_interval: Duration::from_millis(5),
        max_polls: Some(3),
    };

    let mut view = ViewModel::new();
    let outcome = Workflow::new(client, config)
        .run(&mut view, video_file(), ProcessingParams::default())
        .await
        .unwrap();

    assert_eq!(outcome, SessionOutcome::Failed);
    assert_eq!(view.panel, Panel::Error);
    assert!(view.message.contains("Timed out waiting for job slow"));
    assert!(!view.busy);
}

#[tokio::test]
async fn invalid_file_is_rejected_without_touching_presentation() {
    let server = MockServer::start().await;

    let mut view = ViewModel::new();
    let err = workflow_for(&server)
        .run(
            &mut view,
            SelectedFile::new("notes.txt", vec![0u8; 4]),
            ProcessingParams::default(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::InvalidSelection(_)));
    assert_eq!(view.panel, Panel::Idle);
    assert!(!view.busy);
}

#[tokio::test]
async fn a_new_session_can_start_after_the_previous_one_ends() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"job_id": "abc"})))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/progress/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "done"})))
        .expect(2)
        .mount(&server)
        .await;

    let mut workflow = workflow_for(&server);
    let mut view = ViewModel::new();

    let first = workflow
        .run(&mut view, video_file(), ProcessingParams::default())
        .await
        .unwrap();
    assert!(matches!(first, SessionOutcome::Completed { .. }));

    // Control was restored; the guard admits a fresh submission.
    let second = workflow
        .run(&mut view, video_file(), ProcessingParams::default())
        .await
        .unwrap();
    assert!(matches!(second, SessionOutcome::Completed { .. }));
}
