use std::sync::Arc;

use axum::{routing::get, Extension, Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{
    handler::{auth::auth_handler, pages::pages_handler, tickets::tickets_handler},
    AppState,
};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponseDto {
    pub success: bool,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

async fn health_check() -> Json<HealthResponseDto> {
    Json(HealthResponseDto {
        success: true,
        message: "Server is running".to_string(),
        timestamp: Utc::now(),
    })
}

pub fn create_router(app_state: Arc<AppState>) -> Router {
    let api_route = Router::new()
        .nest("/auth", auth_handler())
        .nest("/tickets", tickets_handler())
        .route("/health", get(health_check));

    Router::new()
        .nest("/api", api_route)
        .merge(pages_handler())
        .fallback_service(ServeDir::new(&app_state.env.public_dir))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(app_state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::{
        body::{to_bytes, Body},
        http::{
            header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE},
            Request, StatusCode,
        },
        response::Response,
    };
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use tower::util::ServiceExt;

    fn test_app() -> (Router, TempDir) {
        let dir = TempDir::new().unwrap();
        let config = Config {
            port: 0,
            data_file: dir
                .path()
                .join("tickets.json")
                .to_string_lossy()
                .into_owned(),
            public_dir: dir.path().to_string_lossy().into_owned(),
            staff_username: "admin".to_string(),
            staff_password: "admin123".to_string(),
            session_max_age_hours: 24,
        };
        let app_state = Arc::new(AppState::new(config).unwrap());
        (create_router(app_state), dir)
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn login(app: &Router) -> String {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/auth/login",
                json!({"username": "admin", "password": "admin123"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let set_cookie = response
            .headers()
            .get(SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap();
        set_cookie.split(';').next().unwrap().to_string()
    }

    fn valid_submission() -> Value {
        json!({
            "name": "A",
            "phone": "1234567890",
            "email": "a@b.com",
            "deviceName": "Phone"
        })
    }

    #[tokio::test]
    async fn test_health_check() {
        let (app, _dir) = test_app();

        let response = app.oneshot(get_request("/api/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["message"], json!("Server is running"));
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_submission_lifecycle_end_to_end() {
        let (app, _dir) = test_app();

        // Anyone can open a ticket.
        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/tickets", valid_submission()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = body_json(response).await;
        assert_eq!(created["success"], json!(true));
        let id = created["data"]["id"].as_str().unwrap().to_string();
        assert_eq!(created["data"]["status"], json!("open"));
        assert_eq!(created["data"]["priority"], json!("medium"));

        // Reading it back needs no session either.
        let response = app
            .clone()
            .oneshot(get_request(&format!("/api/tickets/{id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let fetched = body_json(response).await;
        assert_eq!(fetched["data"]["id"].as_str(), Some(id.as_str()));

        // Mutation without a session is refused outright.
        let response = app
            .clone()
            .oneshot(json_request(
                "PATCH",
                &format!("/api/tickets/{id}"),
                json!({"priority": "urgent"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let denied = body_json(response).await;
        assert_eq!(denied["message"], json!("Authentication required"));

        // After login the same request goes through.
        let cookie = login(&app).await;
        let mut request = json_request(
            "PATCH",
            &format!("/api/tickets/{id}"),
            json!({"priority": "urgent"}),
        );
        request
            .headers_mut()
            .insert(COOKIE, cookie.parse().unwrap());
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let updated = body_json(response).await;
        assert_eq!(updated["data"]["priority"], json!("urgent"));
        let created_at =
            DateTime::parse_from_rfc3339(created["data"]["createdAt"].as_str().unwrap()).unwrap();
        let updated_at =
            DateTime::parse_from_rfc3339(updated["data"]["updatedAt"].as_str().unwrap()).unwrap();
        assert!(updated_at > created_at);
    }

    #[tokio::test]
    async fn test_invalid_submission_reports_every_missing_field() {
        let (app, _dir) = test_app();

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/tickets",
                json!({"email": "bad@"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["message"], json!("Validation failed"));
        assert_eq!(
            body["errors"],
            json!([
                "Name is required",
                "Phone number is required",
                "Invalid email format",
                "Device name is required"
            ])
        );

        // Nothing was stored.
        let response = app.oneshot(get_request("/api/tickets")).await.unwrap();
        let body = body_json(response).await;
        assert_eq!(body["count"], json!(0));
    }

    #[tokio::test]
    async fn test_list_reports_count() {
        let (app, _dir) = test_app();

        for _ in 0..2 {
            let response = app
                .clone()
                .oneshot(json_request("POST", "/api/tickets", valid_submission()))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        let response = app.oneshot(get_request("/api/tickets")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["count"], json!(2));
        assert_eq!(body["data"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_ticket_is_not_found() {
        let (app, _dir) = test_app();

        let response = app
            .clone()
            .oneshot(get_request(
                "/api/tickets/00000000-0000-0000-0000-000000000000",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        // A non-uuid id cannot match anything either.
        let response = app
            .oneshot(get_request("/api/tickets/not-a-uuid"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_requires_auth_then_removes() {
        let (app, _dir) = test_app();

        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/tickets", valid_submission()))
            .await
            .unwrap();
        let created = body_json(response).await;
        let id = created["data"]["id"].as_str().unwrap().to_string();

        let request = Request::builder()
            .method("DELETE")
            .uri(format!("/api/tickets/{id}"))
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let cookie = login(&app).await;
        let request = Request::builder()
            .method("DELETE")
            .uri(format!("/api/tickets/{id}"))
            .header(COOKIE, cookie.as_str())
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let deleted = body_json(response).await;
        assert_eq!(deleted["data"]["id"].as_str(), Some(id.as_str()));

        let response = app
            .oneshot(get_request(&format!("/api/tickets/{id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_auth_status_tracks_login_and_logout() {
        let (app, _dir) = test_app();

        let response = app.clone().oneshot(get_request("/api/auth/status")).await.unwrap();
        let body = body_json(response).await;
        assert_eq!(body["isAuthenticated"], json!(false));
        assert_eq!(body["user"], Value::Null);

        let cookie = login(&app).await;
        let mut request = get_request("/api/auth/status");
        request
            .headers_mut()
            .insert(COOKIE, cookie.parse().unwrap());
        let response = app.clone().oneshot(request).await.unwrap();
        let body = body_json(response).await;
        assert_eq!(body["isAuthenticated"], json!(true));
        assert_eq!(body["user"]["username"], json!("admin"));

        let mut request = Request::builder()
            .method("POST")
            .uri("/api/auth/logout")
            .body(Body::empty())
            .unwrap();
        request
            .headers_mut()
            .insert(COOKIE, cookie.parse().unwrap());
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let mut request = get_request("/api/auth/status");
        request
            .headers_mut()
            .insert(COOKIE, cookie.parse().unwrap());
        let response = app.oneshot(request).await.unwrap();
        let body = body_json(response).await;
        assert_eq!(body["isAuthenticated"], json!(false));
    }

    #[tokio::test]
    async fn test_login_rejections() {
        let (app, _dir) = test_app();

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/auth/login",
                json!({"username": "admin"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["message"], json!("Username and password are required"));

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/auth/login",
                json!({"username": "admin", "password": "wrong"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["message"], json!("Invalid username or password"));
    }

    #[tokio::test]
    async fn test_staff_pages_redirect_anonymous_callers_to_login() {
        let (app, _dir) = test_app();

        let response = app.clone().oneshot(get_request("/board")).await.unwrap();
        assert!(response.status().is_redirection());
        assert_eq!(
            response.headers().get(LOCATION).unwrap().to_str().unwrap(),
            "/login"
        );

        let response = app
            .oneshot(get_request(&format!("/ticket/{}", uuid::Uuid::new_v4())))
            .await
            .unwrap();
        assert!(response.status().is_redirection());
    }
}
