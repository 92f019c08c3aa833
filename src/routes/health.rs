//! Liveness probe. Public: the guard's skip list lets it through untouched.

use actix_web::{get, HttpResponse, Responder};
use chrono::Utc;
use serde_json::json;

/// Reports that the process is up, along with the current server time.
#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "timestamp": Utc::now()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test;

    #[actix_rt::test]
    async fn test_health_reports_ok_with_timestamp() {
        let app = test::init_service(actix_web::App::new().service(health)).await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "ok");
        assert!(
            body["timestamp"].is_string(),
            "expected a timestamp in the body, got: {}",
            body
        );
    }
}
