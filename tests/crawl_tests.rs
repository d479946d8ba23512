//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end against a temporary mirror directory.

use site_mirror::config::Config;
use site_mirror::crawler::crawl;
use site_mirror::state::FrontierSnapshot;
use site_mirror::storage::{SnapshotStore, FRONTIER_FILE_NAME, VISITED_FILE_NAME};
use site_mirror::url::{normalize_url, UrlHash};
use site_mirror::CrawlError;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration bounded to the mock server's host
fn create_test_config(server: &MockServer, save_dir: &Path) -> Config {
    let uri = server.uri();
    let host = uri.trim_start_matches("http://");

    Config {
        base: format!("{}/", host),
        frontier: format!("{}/", uri),
        save_dir: save_dir.to_path_buf(),
        min_wait: 0,
        max_wait: 0,
        timeout: 5,
        ..Config::default()
    }
}

/// Directory the mirror uses for the mock server's host and port
fn host_dir(server: &MockServer, save_dir: &Path) -> PathBuf {
    let uri = server.uri();
    save_dir.join(uri.trim_start_matches("http://").replace(':', "_"))
}

async fn mount_html(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

/// Mounts a small site: home, two pages, an image and a dead link
async fn mount_site(server: &MockServer, home_body: &str) {
    mount_html(server, "/", home_body).await;
    mount_html(
        server,
        "/page1/",
        r#"<html><body><a href="/">Home</a><a href="/page2">Page 2</a></body></html>"#,
    )
    .await;
    mount_html(server, "/page2/", "<html><body><p>Two</p></body></html>").await;

    Mock::given(method("GET"))
        .and(path("/logo.png"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a])
                .insert_header("content-type", "image/png"),
        )
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/missing/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(server)
        .await;
}

const HOME: &str = r#"<html><head><title>Home</title></head><body>
    <a href="/page1">Page 1</a>
    <a href="page2/">Page 2</a>
    <img src="/logo.png"><a href="/logo.png">Logo</a>
    <a href="https://other.test/x">Elsewhere</a>
    <a href="/missing">Missing</a>
    <a href="mailto:someone@example.com">Mail</a>
</body></html>"#;

async fn request_paths(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|request| request.url.path().to_string())
        .collect()
}

#[tokio::test]
async fn test_full_crawl_single_domain() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server, HOME).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&mock_server, dir.path());

    let stats = crawl(config).await.unwrap();

    assert_eq!(stats.visits, 5);
    assert_eq!(stats.pages_created, 4);
    assert_eq!(stats.http_errors, 1);
    assert_eq!(stats.pending, 0);

    let mirror = host_dir(&mock_server, dir.path());
    assert!(mirror.join("index.html").is_file());
    assert!(mirror.join("page1").join("index.html").is_file());
    assert!(mirror.join("page2").join("index.html").is_file());
    assert_eq!(
        fs::read(mirror.join("logo.png")).unwrap(),
        vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a]
    );
    assert!(!mirror.join("missing").exists());
    assert!(!dir.path().join("other.test").exists());

    // Each page requested once
    let mut paths = request_paths(&mock_server).await;
    paths.sort();
    assert_eq!(paths, vec!["/", "/logo.png", "/missing/", "/page1/", "/page2/"]);
}

#[tokio::test]
async fn test_state_files_written_at_finish() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server, HOME).await;

    let dir = TempDir::new().unwrap();
    crawl(create_test_config(&mock_server, dir.path()))
        .await
        .unwrap();

    let frontier = fs::read_to_string(dir.path().join(FRONTIER_FILE_NAME)).unwrap();
    assert!(frontier.trim().is_empty());

    let visited = fs::read_to_string(dir.path().join(VISITED_FILE_NAME)).unwrap();
    let hashes: Vec<&str> = visited.lines().filter(|l| !l.is_empty()).collect();
    assert_eq!(hashes.len(), 5);

    let home = normalize_url(&format!("{}/", mock_server.uri())).unwrap();
    assert!(hashes.contains(&UrlHash::of(&home).to_hex().as_str()));
}

#[tokio::test]
async fn test_recrawl_without_changes_writes_nothing() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server, HOME).await;

    let dir = TempDir::new().unwrap();
    crawl(create_test_config(&mock_server, dir.path()))
        .await
        .unwrap();

    let stats = crawl(create_test_config(&mock_server, dir.path()))
        .await
        .unwrap();

    assert_eq!(stats.pages_created, 0);
    assert_eq!(stats.pages_updated, 0);
    assert_eq!(stats.pages_unchanged, 4);
}

#[tokio::test]
async fn test_recrawl_after_change_updates_page() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server, HOME).await;

    let dir = TempDir::new().unwrap();
    crawl(create_test_config(&mock_server, dir.path()))
        .await
        .unwrap();

    let changed_home = HOME.replace("<title>Home</title>", "<title>Home, revised</title>");
    mock_server.reset().await;
    mount_site(&mock_server, &changed_home).await;

    let stats = crawl(create_test_config(&mock_server, dir.path()))
        .await
        .unwrap();

    assert_eq!(stats.pages_updated, 1);
    assert_eq!(stats.pages_unchanged, 3);

    let saved = fs::read_to_string(host_dir(&mock_server, dir.path()).join("index.html")).unwrap();
    assert_eq!(saved, changed_home);
}

#[tokio::test]
async fn test_clean_mode_strips_scripts() {
    let mock_server = MockServer::start().await;
    mount_html(
        &mock_server,
        "/",
        r#"<html><body><p>Visible</p><script>steal()</script><!-- secret --></body></html>"#,
    )
    .await;

    let dir = TempDir::new().unwrap();
    let config = Config {
        clean: true,
        ..create_test_config(&mock_server, dir.path())
    };
    crawl(config).await.unwrap();

    let saved = fs::read_to_string(host_dir(&mock_server, dir.path()).join("index.html")).unwrap();
    assert!(saved.contains("<p>Visible</p>"));
    assert!(!saved.contains("steal()"));
    assert!(!saved.contains("secret"));
}

#[tokio::test]
async fn test_redirect_is_saved_under_final_url() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server, HOME).await;

    Mock::given(method("GET"))
        .and(path("/old/"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/page2/"))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = Config {
        frontier: format!("{}/old/", mock_server.uri()),
        ..create_test_config(&mock_server, dir.path())
    };
    let stats = crawl(config).await.unwrap();

    assert_eq!(stats.visits, 1);
    let mirror = host_dir(&mock_server, dir.path());
    assert!(mirror.join("page2").join("index.html").is_file());
    assert!(!mirror.join("old").exists());
}

#[tokio::test]
async fn test_resume_continues_interrupted_crawl() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server, HOME).await;

    let uri = mock_server.uri();
    let dir = TempDir::new().unwrap();
    let page = |p: &str| normalize_url(&format!("{}{}", uri, p)).unwrap();

    SnapshotStore::new(dir.path())
        .save(&FrontierSnapshot {
            pending: vec![page("/page2/")],
            visited: vec![UrlHash::of(&page("/")), UrlHash::of(&page("/page1/"))],
        })
        .unwrap();

    let config = Config {
        resume: true,
        ..create_test_config(&mock_server, dir.path())
    };
    let stats = crawl(config).await.unwrap();

    assert_eq!(stats.visits, 1);
    assert_eq!(request_paths(&mock_server).await, vec!["/page2/"]);
    assert_eq!(stats.visited, 3);
}

#[tokio::test]
async fn test_resume_of_finished_crawl_fetches_nothing() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server, HOME).await;

    let dir = TempDir::new().unwrap();
    crawl(create_test_config(&mock_server, dir.path()))
        .await
        .unwrap();
    let requests_before = request_paths(&mock_server).await.len();

    let config = Config {
        resume: true,
        ..create_test_config(&mock_server, dir.path())
    };
    let stats = crawl(config).await.unwrap();

    assert_eq!(stats.visits, 0);
    assert_eq!(request_paths(&mock_server).await.len(), requests_before);
}

#[tokio::test]
async fn test_foreign_resume_is_fatal() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server, HOME).await;

    let dir = TempDir::new().unwrap();
    SnapshotStore::new(dir.path())
        .save(&FrontierSnapshot {
            pending: vec![normalize_url("https://elsewhere.test/page/").unwrap()],
            visited: vec![],
        })
        .unwrap();

    let config = Config {
        resume: true,
        ..create_test_config(&mock_server, dir.path())
    };
    let result = crawl(config).await;

    assert!(matches!(result, Err(CrawlError::ForeignResume { .. })));
    assert!(request_paths(&mock_server).await.is_empty());
}

#[tokio::test]
async fn test_links_to_another_port_are_not_followed() {
    let mock_server = MockServer::start().await;
    let other_port = MockServer::start().await;
    mount_html(&other_port, "/admin/", "<html><body>Admin</body></html>").await;

    let home = format!(
        r#"<html><body><a href="/page2/">Two</a><a href="{}/admin/">Admin</a></body></html>"#,
        other_port.uri()
    );
    mount_site(&mock_server, &home).await;

    let dir = TempDir::new().unwrap();
    let stats = crawl(create_test_config(&mock_server, dir.path()))
        .await
        .unwrap();

    assert_eq!(stats.visits, 2);
    assert!(request_paths(&other_port).await.is_empty());
    assert!(!host_dir(&other_port, dir.path()).exists());
}
