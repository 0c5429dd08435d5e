use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{test, web, App};
use serde_json::json;
use std::sync::Arc;

use focusboard::auth::AuthMiddleware;
use focusboard::routes;
use focusboard::routes::health;
use focusboard::services::CascadeMode;
use focusboard::state::AppState;
use focusboard::store::{MemoryStore, Store};

fn test_state(cascade: CascadeMode) -> AppState {
    std::env::set_var("JWT_SECRET", "integration-test-secret");
    AppState::new(Arc::new(MemoryStore::new()), cascade, false)
}

async fn test_app(
    state: AppState,
) -> impl actix_web::dev::Service<
    actix_http::Request,
    Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
    Error = actix_web::Error,
> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(health::health)
            .service(
                web::scope("/api")
                    .wrap(AuthMiddleware)
                    .configure(routes::config),
            ),
    )
    .await
}

async fn register_and_login(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
    >,
    name: &str,
    email: &str,
) -> String {
    let req = test::TestRequest::post()
        .uri("/api/user")
        .set_json(json!({ "name": name, "email": email, "password": "secret1" }))
        .to_request();
    assert_eq!(test::call_service(app, req).await.status(), 201);

    let req = test::TestRequest::post()
        .uri("/api/user/login")
        .set_json(json!({ "email": email, "password": "secret1" }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    body["token"].as_str().unwrap().to_string()
}

async fn create_project(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
    >,
    token: &str,
    title: &str,
) -> String {
    let req = test::TestRequest::post()
        .uri("/api/project")
        .append_header(("x-auth-token", token))
        .set_json(json!({ "title": title }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), 201);
    let project: serde_json::Value = test::read_body_json(resp).await;
    project["id"].as_str().unwrap().to_string()
}

#[actix_rt::test]
async fn test_create_task_in_own_project() {
    let app = test_app(test_state(CascadeMode::Orphan)).await;
    let token = register_and_login(&app, "Ann", "ann@x.com").await;
    let project_id = create_project(&app, &token, "Thesis").await;

    let req = test::TestRequest::post()
        .uri("/api/task")
        .append_header(("x-auth-token", token.as_str()))
        .set_json(json!({
            "title": "Write intro",
            "project": project_id,
            "time": "25:00"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let task: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(task["title"], "Write intro");
    assert_eq!(task["project"], project_id);
    assert_eq!(task["time"], "25:00");
    assert_eq!(task["done"], false);
    assert_eq!(task["id"].as_str().unwrap().len(), 24);
}

#[actix_rt::test]
async fn test_create_task_validation() {
    let app = test_app(test_state(CascadeMode::Orphan)).await;
    let token = register_and_login(&app, "Ann", "ann@x.com").await;

    // every failing field is collected in one response
    let req = test::TestRequest::post()
        .uri("/api/task")
        .append_header(("x-auth-token", token.as_str()))
        .set_json(json!({ "title": "", "project": "", "time": "" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = test::read_body_json(resp).await;
    let msgs: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|e| e["msg"].as_str())
        .collect();
    assert_eq!(msgs.len(), 3);
    assert!(msgs.contains(&"Title is required"));
    assert!(msgs.contains(&"Project is required"));
    assert!(msgs.contains(&"Time is required"));

    // omitted fields behave like empty ones
    let req = test::TestRequest::post()
        .uri("/api/task")
        .append_header(("x-auth-token", token.as_str()))
        .set_json(json!({ "title": "Write intro" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = test::read_body_json(resp).await;
    let msgs: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|e| e["msg"].as_str())
        .collect();
    assert_eq!(msgs, vec!["Project is required", "Time is required"]);

    let req = test::TestRequest::post()
        .uri("/api/task")
        .append_header(("x-auth-token", token.as_str()))
        .set_json(json!({
            "title": "Write intro",
            "project": "ffffffffffffffffffffffff",
            "time": "half an hour"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["errors"][0]["msg"], "Time must be in MM:SS format");
}

#[actix_rt::test]
async fn test_create_task_checks_project_and_owner() {
    let app = test_app(test_state(CascadeMode::Orphan)).await;
    let ann_token = register_and_login(&app, "Ann", "ann@x.com").await;
    let bob_token = register_and_login(&app, "Bob", "bob@x.com").await;
    let project_id = create_project(&app, &ann_token, "Thesis").await;

    // unknown project
    let req = test::TestRequest::post()
        .uri("/api/task")
        .append_header(("x-auth-token", ann_token.as_str()))
        .set_json(json!({
            "title": "Write intro",
            "project": "ffffffffffffffffffffffff",
            "time": "25:00"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["errors"][0]["msg"], "Project not found");

    // someone else's project
    let req = test::TestRequest::post()
        .uri("/api/task")
        .append_header(("x-auth-token", bob_token.as_str()))
        .set_json(json!({
            "title": "Sneaky task",
            "project": project_id,
            "time": "25:00"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 403);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["errors"][0]["msg"], "User not authorized");
}

#[actix_rt::test]
async fn test_delete_task_enforces_ownership_through_project() {
    let app = test_app(test_state(CascadeMode::Orphan)).await;
    let ann_token = register_and_login(&app, "Ann", "ann@x.com").await;
    let bob_token = register_and_login(&app, "Bob", "bob@x.com").await;
    let project_id = create_project(&app, &ann_token, "Thesis").await;

    let req = test::TestRequest::post()
        .uri("/api/task")
        .append_header(("x-auth-token", ann_token.as_str()))
        .set_json(json!({
            "title": "Write intro",
            "project": project_id,
            "time": "25:00"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let task: serde_json::Value = test::read_body_json(resp).await;
    let task_id = task["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::delete()
        .uri(&format!("/api/task/{}", task_id))
        .append_header(("x-auth-token", bob_token.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 403);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/task/{}", task_id))
        .append_header(("x-auth-token", ann_token.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let deleted: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(deleted["id"], task_id);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/task/{}", task_id))
        .append_header(("x-auth-token", ann_token.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["errors"][0]["msg"], "Task not found");
}

#[actix_rt::test]
async fn test_list_project_tasks() {
    let app = test_app(test_state(CascadeMode::Orphan)).await;
    let ann_token = register_and_login(&app, "Ann", "ann@x.com").await;
    let bob_token = register_and_login(&app, "Bob", "bob@x.com").await;
    let project_id = create_project(&app, &ann_token, "Thesis").await;

    for title in ["Write intro", "Write outro"] {
        let req = test::TestRequest::post()
            .uri("/api/task")
            .append_header(("x-auth-token", ann_token.as_str()))
            .set_json(json!({
                "title": title,
                "project": project_id,
                "time": "25:00"
            }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 201);
    }

    let req = test::TestRequest::get()
        .uri(&format!("/api/task/project/{}", project_id))
        .append_header(("x-auth-token", ann_token.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let tasks: Vec<serde_json::Value> = test::read_body_json(resp).await;
    assert_eq!(tasks.len(), 2);

    // strangers cannot list them
    let req = test::TestRequest::get()
        .uri(&format!("/api/task/project/{}", project_id))
        .append_header(("x-auth-token", bob_token.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 403);

    // unknown project
    let req = test::TestRequest::get()
        .uri("/api/task/project/ffffffffffffffffffffffff")
        .append_header(("x-auth-token", ann_token.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["errors"][0]["msg"], "Project not found");
}

#[actix_rt::test]
async fn test_project_delete_cascade_flag() {
    // Orphan (default): tasks survive their project
    let state = test_state(CascadeMode::Orphan);
    let store = state.store.clone();
    let app = test_app(state).await;
    let token = register_and_login(&app, "Ann", "ann@x.com").await;
    let project_id = create_project(&app, &token, "Thesis").await;

    let req = test::TestRequest::post()
        .uri("/api/task")
        .append_header(("x-auth-token", token.as_str()))
        .set_json(json!({
            "title": "Write intro",
            "project": project_id,
            "time": "25:00"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let task: serde_json::Value = test::read_body_json(resp).await;
    let task_id = task["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::delete()
        .uri(&format!("/api/project/{}", project_id))
        .append_header(("x-auth-token", token.as_str()))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 200);
    assert!(store
        .find_task(&task_id.as_str().into())
        .await
        .unwrap()
        .is_some());

    // Cascade: tasks go with the project
    let state = test_state(CascadeMode::Cascade);
    let store = state.store.clone();
    let app = test_app(state).await;
    let token = register_and_login(&app, "Ann", "ann2@x.com").await;
    let project_id = create_project(&app, &token, "Thesis").await;

    let req = test::TestRequest::post()
        .uri("/api/task")
        .append_header(("x-auth-token", token.as_str()))
        .set_json(json!({
            "title": "Write intro",
            "project": project_id,
            "time": "25:00"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let task: serde_json::Value = test::read_body_json(resp).await;
    let task_id = task["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::delete()
        .uri(&format!("/api/project/{}", project_id))
        .append_header(("x-auth-token", token.as_str()))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 200);
    assert!(store
        .find_task(&task_id.as_str().into())
        .await
        .unwrap()
        .is_none());
}
