use axum::{extract::State, routing::get, Json, Router};
use common::utils::http::finish_router;
use models::Record;
use service::ResourceCollection;

/// `GET /<kind>`: the whole collection, in seed order.
pub async fn list_resources<R: Record>(
    State(collection): State<ResourceCollection<R>>,
) -> Json<ResourceCollection<R>> {
    Json(collection)
}

/// Router of a backend service serving records of type `R`.
pub fn build_router<R: Record>(collection: ResourceCollection<R>) -> Router {
    let api = Router::new()
        .route(&R::KIND.path(), get(list_resources::<R>))
        .with_state(collection);
    finish_router(api)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use models::{Order, User};
    use tower::ServiceExt;

    async fn get(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let res = app
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn lists_users() {
        let app = build_router(ResourceCollection::<User>::seeded().unwrap());
        let (status, body) = get(app, "/users").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::to_value(User::seed()).unwrap());
    }

    #[tokio::test]
    async fn orders_service_does_not_serve_users() {
        let app = build_router(ResourceCollection::<Order>::seeded().unwrap());
        let (status, _) = get(app, "/users").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn health_is_ok() {
        let app = build_router(ResourceCollection::<Order>::seeded().unwrap());
        let (status, body) = get(app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }
}
