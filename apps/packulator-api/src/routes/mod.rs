//! HTTP routing.
//!
//! ```text
//! POST   /packs/create                     register a catalog
//! GET    /packs/list                       active catalogs
//! GET    /packs/id?id=                     one catalog by id
//! GET    /packs/hash?hash=                 one catalog by fingerprint
//! GET    /packs/profiles?hash=             precomputed profiles
//! DELETE /packs/delete?id=                 soft delete
//! GET    /packaging/number_of_packages     ?amount=&packs_hash=
//! GET    /health/check                     liveness
//! ```

pub mod health;
pub mod packaging;
pub mod packs;

use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Builds the application router with CORS and request tracing.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/packs/create", post(packs::create))
        .route("/packs/list", get(packs::list))
        .route("/packs/id", get(packs::get_by_id))
        .route("/packs/hash", get(packs::get_by_hash))
        .route("/packs/profiles", get(packs::profiles))
        .route("/packs/delete", delete(packs::delete))
        .route(
            "/packaging/number_of_packages",
            get(packaging::number_of_packages),
        )
        .route("/health/check", get(health::check))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use axum::Router;
    use serde_json::Value;
    use tower::ServiceExt;

    use packulator_db::{Database, DbConfig};

    use crate::{app, ApiConfig};

    async fn test_app() -> Router {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        app(db, &ApiConfig::default())
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    async fn create(app: &Router, packs: Value) -> (StatusCode, Value) {
        send(app, Method::POST, "/packs/create", Some(serde_json::json!({ "packs": packs }))).await
    }

    #[tokio::test]
    async fn test_create_then_calculate() {
        let app = test_app().await;

        let (status, created) = create(&app, serde_json::json!([250, 500, 1000, 2000, 5000])).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["version_hash"], "415a075d1196b695");
        assert_eq!(created["profile_count"], 31);

        let cases = [
            (1, serde_json::json!({"250": 1})),
            (250, serde_json::json!({"250": 1})),
            (251, serde_json::json!({"500": 1})),
            (501, serde_json::json!({"250": 1, "500": 1})),
            (12001, serde_json::json!({"250": 1, "2000": 1, "5000": 2})),
        ];
        for (amount, expected) in cases {
            let uri = format!(
                "/packaging/number_of_packages?amount={amount}&packs_hash=415a075d1196b695"
            );
            let (status, body) = send(&app, Method::GET, &uri, None).await;
            assert_eq!(status, StatusCode::OK, "amount {amount}");
            assert_eq!(body, expected, "amount {amount}");
        }
    }

    #[tokio::test]
    async fn test_create_is_idempotent_and_lookups_agree() {
        let app = test_app().await;

        let (_, first) = create(&app, serde_json::json!([5000, 250, 2000, 500, 1000])).await;
        let (status, second) = create(&app, serde_json::json!([250, 500, 1000, 2000, 5000])).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(first["id"], second["id"]);

        let id = first["id"].as_str().unwrap();
        let (status, by_id) = send(&app, Method::GET, &format!("/packs/id?id={id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(by_id["sizes"], serde_json::json!([250, 500, 1000, 2000, 5000]));
        assert_eq!(by_id["total_amount"], 8750);

        let (status, by_hash) =
            send(&app, Method::GET, "/packs/hash?hash=415a075d1196b695", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(by_hash["id"], first["id"]);

        let (status, list) = send(&app, Method::GET, "/packs/list", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list.as_array().unwrap().len(), 1);

        let (status, profiles) =
            send(&app, Method::GET, "/packs/profiles?hash=415a075d1196b695", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(profiles.as_array().unwrap().len(), 31);
        assert_eq!(profiles[0], serde_json::json!({"sizes": [250], "total_amount": 250}));
    }

    #[tokio::test]
    async fn test_delete() {
        let app = test_app().await;
        let (_, created) = create(&app, serde_json::json!([23, 31, 53])).await;
        let id = created["id"].as_str().unwrap().to_string();
        let hash = created["version_hash"].as_str().unwrap().to_string();

        let (status, body) = send(&app, Method::DELETE, &format!("/packs/delete?id={id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);

        let (status, _) = send(&app, Method::DELETE, &format!("/packs/delete?id={id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let uri = format!("/packaging/number_of_packages?amount=10&packs_hash={hash}");
        let (status, body) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], 404);
    }

    #[tokio::test]
    async fn test_bad_requests() {
        let app = test_app().await;

        let (status, body) = create(&app, serde_json::json!([])).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], 400);

        let (status, _) = create(&app, serde_json::json!([250, 0])).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = create(&app, serde_json::json!(["big"])).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        create(&app, serde_json::json!([250])).await;
        let hash = "e9586b616536950f";
        for uri in [
            "/packaging/number_of_packages?amount=0&packs_hash=415a075d1196b695".to_string(),
            "/packaging/number_of_packages?amount=-3&packs_hash=415a075d1196b695".to_string(),
            "/packaging/number_of_packages?amount=ten&packs_hash=415a075d1196b695".to_string(),
            "/packaging/number_of_packages?packs_hash=415a075d1196b695".to_string(),
            "/packaging/number_of_packages?amount=10".to_string(),
            format!("/packaging/number_of_packages?amount=10&packs_hash={hash}x"),
            "/packs/id?id=not-a-uuid".to_string(),
            "/packs/hash".to_string(),
        ] {
            let (status, body) = send(&app, Method::GET, &uri, None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body["error"]["code"], 400, "{uri}");
        }
    }

    #[tokio::test]
    async fn test_unknown_catalog_is_not_found() {
        let app = test_app().await;

        let (status, body) = send(
            &app,
            Method::GET,
            "/packaging/number_of_packages?amount=10&packs_hash=0123456789abcdef",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"]["message"].as_str().unwrap().contains("0123456789abcdef"));

        let (status, _) = send(
            &app,
            Method::GET,
            "/packs/id?id=550e8400-e29b-41d4-a716-446655440000",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_health() {
        let app = test_app().await;

        let (status, body) = send(&app, Method::GET, "/health/check", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["database"], "ok");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }
}
