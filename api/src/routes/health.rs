use actix_web::HttpResponse;

use acct_shared::HealthResponse;

/// Handler for GET /health
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse::healthy("account-api", env!("CARGO_PKG_VERSION")))
}
