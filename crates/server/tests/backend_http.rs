use std::net::SocketAddr;

use models::ResourceKind;
use reqwest::StatusCode;
use serde_json::json;
use tokio::net::TcpListener;

async fn start_backend(kind: ResourceKind, seed_path: Option<&str>) -> anyhow::Result<String> {
    let app = server::startup::app_for(kind, seed_path).await?;
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });
    Ok(format!("http://{}", addr))
}

#[tokio::test]
async fn users_backend_serves_seed() -> anyhow::Result<()> {
    let base = start_backend(ResourceKind::Users, None).await?;
    let res = reqwest::get(format!("{}/users", base)).await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(
        body,
        json!([
            {"id": 1, "name": "Henrique", "age": 28},
            {"id": 2, "name": "Amanda", "age": 31}
        ])
    );
    Ok(())
}

#[tokio::test]
async fn orders_backend_serves_seed() -> anyhow::Result<()> {
    let base = start_backend(ResourceKind::Orders, None).await?;
    let res = reqwest::get(format!("{}/orders", base)).await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json")));
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(
        body,
        json!([
            {"id": 101, "product": "Notebook", "userId": 1},
            {"id": 102, "product": "Headset", "userId": 2}
        ])
    );
    Ok(())
}

#[tokio::test]
async fn seed_file_replaces_builtin_records() -> anyhow::Result<()> {
    let dir = std::env::temp_dir().join(format!("backend-seed-{}", std::process::id()));
    tokio::fs::create_dir_all(&dir).await?;
    let path = dir.join("orders.json");
    tokio::fs::write(&path, r#"[{"id": 7, "product": "Monitor", "userId": 2}]"#).await?;

    let base = start_backend(ResourceKind::Orders, path.to_str()).await?;
    let body = reqwest::get(format!("{}/orders", base))
        .await?
        .json::<serde_json::Value>()
        .await?;
    assert_eq!(body, json!([{"id": 7, "product": "Monitor", "userId": 2}]));
    Ok(())
}

#[tokio::test]
async fn bad_seed_file_fails_startup() {
    let res = server::startup::app_for(ResourceKind::Users, Some("/nonexistent/users.json")).await;
    let err = res.err().expect("startup must fail");
    assert!(err.to_string().contains("users"));
}
