mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{create_group_in, create_specialty, setup_test_app};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use sqlx::PgPool;
use tower::ServiceExt;

async fn list_groups(pool: &PgPool) -> (StatusCode, Value) {
    let app = setup_test_app(pool.clone());
    let request = Request::builder()
        .method("GET")
        .uri("/api/groups")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

#[sqlx::test(migrations = "./migrations")]
async fn test_groups_sorted_by_name(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let it = create_specialty(&mut tx, "Information Systems").await;
    let law = create_specialty(&mut tx, "Law").await;
    create_group_in(&mut tx, "LW-31", 3, law).await;
    create_group_in(&mut tx, "IS-21", 2, it).await;
    create_group_in(&mut tx, "IS-11", 1, it).await;
    tx.commit().await.unwrap();

    let (status, body) = list_groups(&pool).await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["group_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["IS-11", "IS-21", "LW-31"]);

    let last = &body[2];
    assert_eq!(last["course"], 3);
    assert_eq!(last["specialty"], "Law");
    assert!(last["group_id"].is_i64());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_no_groups(pool: PgPool) {
    let (status, body) = list_groups(&pool).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}
