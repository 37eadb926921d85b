use std::path::PathBuf;
use std::time::Duration;

use cours::api::download::{download, download_client};
use cours::api::{ApiClient, ApiErrorKind, CatalogSource, Id, ResourceKind};
use cours::core::download::DownloadRequest;
use cours::core::page::Page;
use cours::core::resource::View;
use cours::core::route::Route;
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

// ============================================================================
// Helper Functions
// ============================================================================

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(server.uri(), Duration::from_secs(5)).unwrap()
}

fn id(raw: &str) -> Id {
    Id::parse(raw).unwrap()
}

/// Fresh scratch directory per test.
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("cours-it-{}-{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

async fn mount_json(server: &MockServer, route: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

// ============================================================================
// Response Shapes
// ============================================================================

#[tokio::test]
async fn test_years_from_envelope_sorted() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/years",
        json!({
            "success": true,
            "data": [
                { "id": 2, "name": "2ème année", "order": 2 },
                { "id": 1, "name": "1ère année", "order": 1 }
            ]
        }),
    )
    .await;

    let years = client_for(&server).years().await.unwrap();
    assert_eq!(years.len(), 2);
    assert_eq!(years[0].name, "1ère année");
    assert_eq!(years[1].id, id("2"));
}

#[tokio::test]
async fn test_raw_array_passes_through() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/years/3/filieres",
        json!([{ "id": 7, "name": "Développement Digital", "code": "DD" }]),
    )
    .await;

    let formations = client_for(&server).formations(&id("3")).await.unwrap();
    assert_eq!(formations.len(), 1);
    assert_eq!(formations[0].code.as_deref(), Some("DD"));
}

#[tokio::test]
async fn test_null_data_is_empty_list() {
    let server = MockServer::start().await;
    mount_json(&server, "/filieres/4/modules", json!({ "success": true, "data": null })).await;

    let modules = client_for(&server).modules(&id("4")).await.unwrap();
    assert!(modules.is_empty());
}

#[tokio::test]
async fn test_resources_hit_kind_paths() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/modules/9/courses",
        json!([{ "id": 1, "title": "Intro", "file_url": "https://cdn.example/intro.pdf" }]),
    )
    .await;
    mount_json(&server, "/modules/9/controls", json!([{ "id": 2, "name": "CC1" }])).await;
    mount_json(&server, "/modules/9/efms", json!([])).await;

    let client = client_for(&server);
    let cours = client.resources(&id("9"), ResourceKind::Cours).await.unwrap();
    assert!(cours[0].is_downloadable());
    let controls = client.resources(&id("9"), ResourceKind::Controls).await.unwrap();
    assert_eq!(controls[0].label(0), "CC1");
    assert!(!controls[0].is_downloadable());
    let efm = client.resources(&id("9"), ResourceKind::Efm).await.unwrap();
    assert!(efm.is_empty());
}

#[tokio::test]
async fn test_course_exams() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/courses/11/exams",
        json!({ "success": true, "data": { "efm": [{ "id": 5, "title": "EFM 2023" }] } }),
    )
    .await;

    let exams = client_for(&server).exams(&id("11")).await.unwrap();
    assert_eq!(exams.efm.len(), 1);
    assert!(exams.controls.is_empty());
}

// ============================================================================
// Error Normalization
// ============================================================================

#[tokio::test]
async fn test_server_message_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/years"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "message": "Database unavailable" })),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).years().await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Status);
    assert_eq!(err.message(), "Database unavailable");
}

#[tokio::test]
async fn test_status_without_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/years"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&server)
        .await;

    let err = client_for(&server).years().await.unwrap_err();
    assert_eq!(err.message(), "Request failed with status code 404");
}

#[tokio::test]
async fn test_non_json_success_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/years"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).years().await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Format);
    assert_eq!(err.message(), "Invalid API response format");
}

#[tokio::test]
async fn test_timeout_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/years"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_millis(1500)),
        )
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri(), Duration::from_millis(200)).unwrap();
    let err = client.years().await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Timeout);
    assert_eq!(err.message(), "timeout of 200ms exceeded");
}

// ============================================================================
// Pages Against a Live Server
// ============================================================================

#[tokio::test]
async fn test_modules_timeout_then_retry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/filieres/5/modules"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_millis(1500)),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_json(
        &server,
        "/filieres/5/modules",
        json!([{ "id": 21, "name": "Programmation Orientée Objet" }]),
    )
    .await;

    let client = ApiClient::new(server.uri(), Duration::from_millis(300)).unwrap();
    let route = Route::Modules {
        formation_id: Some(id("5")),
    };
    let (mut page, fetch) = Page::open(&route, 5);
    let fetch = fetch.unwrap();
    let result = fetch.query.run(&client).await;
    assert!(page.settle(fetch.generation, result));
    let Page::Modules(list) = &page else {
        panic!("expected the modules page");
    };
    assert!(matches!(list.resource.view(), View::Error(m) if m.contains("timeout")));

    let retry = page.retry().unwrap();
    assert_eq!(retry.query, fetch.query);
    assert_ne!(retry.generation, fetch.generation);
    let result = retry.query.run(&client).await;
    assert!(page.settle(retry.generation, result));
    let Page::Modules(list) = &page else {
        panic!("expected the modules page");
    };
    match list.resource.view() {
        View::List(modules) => assert_eq!(modules[0].name, "Programmation Orientée Objet"),
        other => panic!("expected a list, got {other:?}"),
    }
}

#[tokio::test]
async fn test_efm_failure_renders_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/modules/9/efms"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let route = Route::Courses {
        module_id: Some(id("9")),
    };
    let (mut page, _) = Page::open(&route, 5);
    let fetch = page.select_tab(ResourceKind::Efm).unwrap();
    let result = fetch.query.run(&client).await;
    assert!(result.is_err());
    page.settle(fetch.generation, result);

    let Page::Courses(courses) = &page else {
        panic!("expected the courses page");
    };
    assert_eq!(courses.list.resource.view(), View::Empty);
}

// ============================================================================
// Downloads
// ============================================================================

#[tokio::test]
async fn test_download_writes_file_and_avoids_overwrite() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/files/intro.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF-1.4 test".to_vec()))
        .mount(&server)
        .await;

    let dir = scratch_dir("download");
    let request = DownloadRequest {
        url: format!("{}/files/intro.pdf", server.uri()),
        filename: "Intro.pdf".to_string(),
    };
    let client = download_client().unwrap();

    let first = download(&client, &request, &dir).await.unwrap();
    assert_eq!(first, dir.join("Intro.pdf"));
    assert_eq!(std::fs::read(&first).unwrap(), b"%PDF-1.4 test");

    let second = download(&client, &request, &dir).await.unwrap();
    assert_eq!(second, dir.join("Intro (1).pdf"));

    let leftovers: Vec<_> = std::fs::read_dir(&dir)
        .unwrap()
        .filter_map(Result::ok)
        .filter(|e| e.file_name().to_string_lossy().ends_with(".part"))
        .collect();
    assert!(leftovers.is_empty());

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn test_download_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/files/missing.pdf"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let dir = scratch_dir("download-404");
    let request = DownloadRequest {
        url: format!("{}/files/missing.pdf", server.uri()),
        filename: "Missing.pdf".to_string(),
    };
    let err = download(&download_client().unwrap(), &request, &dir)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("404"));
    assert!(!dir.join("Missing.pdf").exists());
}
