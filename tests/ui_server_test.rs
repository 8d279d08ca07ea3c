use flujos::adapters::ui_handler::{ui_router, RuntimeConfig};
use flujos::config::{ApiSettings, Settings, UiSettings};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

struct UiServer {
    base_url: String,
    _dist: TempDir,
}

async fn start(with_bundle: bool) -> UiServer {
    let dist = TempDir::new().unwrap();
    if with_bundle {
        fs::write(dist.path().join("index.html"), "<html><body>flujos</body></html>").unwrap();
        fs::write(dist.path().join("app.js"), "console.log('ok')").unwrap();
    }

    let settings = Settings {
        api: ApiSettings {
            base_url: "https://flows.example.com/".to_string(),
            login_path: "/ingresar".to_string(),
            timeout_seconds: None,
        },
        ui: UiSettings {
            host: "127.0.0.1".to_string(),
            port: 0,
            dist_dir: dist.path().to_path_buf(),
        },
    };

    let app = ui_router(Arc::new(settings));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

    UiServer {
        base_url: format!("http://{}", addr),
        _dist: dist,
    }
}

#[tokio::test]
async fn test_runtime_config_endpoint() {
    let server = start(true).await;

    let config: RuntimeConfig = reqwest::get(format!("{}/config.json", server.base_url))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(config.api_base_url, "https://flows.example.com");
    assert_eq!(config.login_path, "/ingresar");
}

#[tokio::test]
async fn test_client_routes_fall_back_to_index() {
    let server = start(true).await;

    let asset = reqwest::get(format!("{}/app.js", server.base_url)).await.unwrap();
    assert_eq!(asset.status(), 200);
    assert_eq!(asset.text().await.unwrap(), "console.log('ok')");

    let route = reqwest::get(format!("{}/flujo/3", server.base_url)).await.unwrap();
    assert_eq!(route.status(), 200);
    assert!(route.text().await.unwrap().contains("flujos"));
}

#[tokio::test]
async fn test_readiness_tracks_the_bundle() {
    let ready = start(true).await;
    let response = reqwest::get(format!("{}/health/ready", ready.base_url)).await.unwrap();
    assert_eq!(response.status(), 200);

    let missing = start(false).await;
    let response = reqwest::get(format!("{}/health/ready", missing.base_url)).await.unwrap();
    assert_eq!(response.status(), 503);

    let health: serde_json::Value = reqwest::get(format!("{}/health", missing.base_url))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["checks"]["ui_assets"], "missing");
}
