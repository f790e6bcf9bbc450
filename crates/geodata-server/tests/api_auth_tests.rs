//! Integration tests for the token and admin endpoints

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::Value;
use tower::ServiceExt; // for `oneshot`

mod helpers;
use helpers::{setup_lazy_pool, setup_test_app, setup_test_db, TEST_JWT_SECRET};

async fn body_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn admin_create_request(auth: Option<&str>, body: String) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/admin/users/")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    builder.body(Body::from(body)).unwrap()
}

#[tokio::test]
async fn test_admin_route_requires_token() {
    let app = setup_test_app(setup_lazy_pool());

    let response = app
        .oneshot(admin_create_request(
            None,
            "username=eve&password=pw&email=eve@example.com&full_name=Eve".to_string(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
        "Bearer"
    );
}

#[tokio::test]
async fn test_admin_route_rejects_garbage_token() {
    let app = setup_test_app(setup_lazy_pool());

    let response = app
        .oneshot(admin_create_request(
            Some("Bearer definitely.not.valid"),
            "username=eve&password=pw&email=eve@example.com&full_name=Eve".to_string(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_admin_route_rejects_refresh_token_as_access() {
    use geodata_server::auth::JwtManager;

    let app = setup_test_app(setup_lazy_pool());

    // A refresh token signed with the right key still must not pass the
    // access-token gate.
    let jwt = JwtManager::new(TEST_JWT_SECRET, 3600, 86400);
    let refresh = jwt.issue_refresh_token("alice").unwrap();

    let response = app
        .oneshot(admin_create_request(
            Some(&format!("Bearer {}", refresh)),
            "username=eve&password=pw&email=eve@example.com&full_name=Eve".to_string(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore] // Requires a configured PostgreSQL (TEST_DATABASE_URL)
async fn test_login_wrong_password_is_unauthorized() {
    use geodata_server::auth::{password, store};

    let pool = setup_test_db().await;
    let username = format!("login-test-{}", uuid::Uuid::new_v4());
    let hash = password::hash_password("right-password").unwrap();
    store::insert(&pool, &username, &format!("{}@example.com", username), None, &hash, false)
        .await
        .unwrap();

    let app = setup_test_app(pool);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/token")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(format!(
                    "username={}&password=wrong-password",
                    username
                )))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
        "Bearer"
    );
}

#[tokio::test]
#[ignore] // Requires a configured PostgreSQL (TEST_DATABASE_URL)
async fn test_second_login_invalidates_previous_refresh_token() {
    use geodata_server::auth::{password, store};

    let pool = setup_test_db().await;
    let username = format!("refresh-test-{}", uuid::Uuid::new_v4());
    let hash = password::hash_password("pw").unwrap();
    store::insert(&pool, &username, &format!("{}@example.com", username), None, &hash, false)
        .await
        .unwrap();

    let app = setup_test_app(pool);

    let login = |app: axum::Router, username: String| async move {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/token")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from(format!("username={}&password=pw", username)))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        body_json(response).await["refresh_token"]
            .as_str()
            .unwrap()
            .to_string()
    };

    let first_refresh = login(app.clone(), username.clone()).await;
    let _second_refresh = login(app.clone(), username.clone()).await;

    // Exchanging the replaced token must fail
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/refresh")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(format!("refresh_token={}", first_refresh)))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore] // Requires a configured PostgreSQL (TEST_DATABASE_URL)
async fn test_admin_creates_and_deletes_account() {
    use geodata_server::auth::{password, store, JwtManager};

    let pool = setup_test_db().await;
    let admin_name = format!("admin-{}", uuid::Uuid::new_v4());
    let hash = password::hash_password("pw").unwrap();
    store::insert(
        &pool,
        &admin_name,
        &format!("{}@example.com", admin_name),
        None,
        &hash,
        true,
    )
    .await
    .unwrap();

    let app = setup_test_app(pool);
    let jwt = JwtManager::new(TEST_JWT_SECRET, 3600, 86400);
    let token = jwt.issue_access_token(&admin_name).unwrap();
    let auth = format!("Bearer {}", token);

    let new_user = format!("created-{}", uuid::Uuid::new_v4());
    let response = app
        .clone()
        .oneshot(admin_create_request(
            Some(&auth),
            format!(
                "username={}&password=pw&email={}@example.com&full_name=Created+User",
                new_user, new_user
            ),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["username"], new_user.as_str());
    assert_eq!(json["data"]["is_admin"], false);

    // Duplicate username is a 400
    let response = app
        .clone()
        .oneshot(admin_create_request(
            Some(&auth),
            format!(
                "username={}&password=pw&email=other-{}@example.com&full_name=Created+User",
                new_user, new_user
            ),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Delete it, then deleting again is a 404
    let delete_request = |auth: String, username: String| {
        Request::builder()
            .method("DELETE")
            .uri(format!("/admin/users/{}", username))
            .header(header::AUTHORIZATION, auth)
            .body(Body::empty())
            .unwrap()
    };

    let response = app
        .clone()
        .oneshot(delete_request(auth.clone(), new_user.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(delete_request(auth, new_user))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
