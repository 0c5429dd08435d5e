//! Runs with no JWT_SECRET in the environment, so it lives in its own test
//! binary; the other suites set the variable process-wide.

use actix_web::{test, web, App};
use serde_json::json;
use std::sync::Arc;

use focusboard::auth::AuthMiddleware;
use focusboard::routes;
use focusboard::services::CascadeMode;
use focusboard::state::AppState;
use focusboard::store::MemoryStore;

#[actix_rt::test]
async fn test_missing_signing_secret_is_a_server_error() {
    std::env::remove_var("JWT_SECRET");
    let state = AppState::new(Arc::new(MemoryStore::new()), CascadeMode::Orphan, false);
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .service(routes::health::health)
            .service(
                web::scope("/api")
                    .wrap(AuthMiddleware)
                    .configure(routes::config),
            ),
    )
    .await;

    // A token is presented, but it cannot be checked without the secret:
    // the middleware must answer 500, not pretend the token is bad.
    let req = test::TestRequest::get()
        .uri("/api/user")
        .append_header(("x-auth-token", "some.jwt.token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 500);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "errors": [{ "msg": "Server error" }] }));

    // Requests that never reach token verification are unaffected
    let req = test::TestRequest::get().uri("/api/user").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["msg"], "No token, authorization denied");
}
