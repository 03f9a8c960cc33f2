//! HTTP-level integration tests for labour ratings.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_test_user, get_auth, login_and_get_cookie, post_json_auth};
use labourhub_core::roles::{ROLE_CUSTOMER, ROLE_LABOUR};
use sqlx::PgPool;

/// Fetch the stored aggregate for a labour directly from the database.
async fn stored_rating(pool: &PgPool, labour_id: i64) -> f64 {
    sqlx::query_scalar("SELECT rating FROM users WHERE id = $1")
        .bind(labour_id)
        .fetch_one(pool)
        .await
        .expect("labour row should exist")
}

/// Out-of-range scores are rejected with 400 and the aggregate is unchanged.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_out_of_range_scores_rejected(pool: PgPool) {
    let customer = create_test_user(&pool, "asha", ROLE_CUSTOMER, "9000000001").await;
    let labour = create_test_user(&pool, "ravi", ROLE_LABOUR, "9000000002").await;
    let app = common::build_test_app(pool.clone());
    let cookie = login_and_get_cookie(app.clone(), ROLE_CUSTOMER, &customer.email).await;

    for score in [0, 6, -1] {
        let response = post_json_auth(
            app.clone(),
            &format!("/api/rate/{}", labour.id),
            serde_json::json!({ "rating": score }),
            &cookie,
        )
        .await;
        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "score {score} must be rejected"
        );
    }

    assert_eq!(
        stored_rating(&pool, labour.id).await,
        0.0,
        "rejected scores must not touch the aggregate"
    );
}

/// Scores [4, 5, 3] aggregate to exactly 4.0, visible in the listing.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rating_aggregate_rounds_to_one_decimal(pool: PgPool) {
    let customer = create_test_user(&pool, "asha", ROLE_CUSTOMER, "9000000001").await;
    let labour = create_test_user(&pool, "ravi", ROLE_LABOUR, "9000000002").await;
    let app = common::build_test_app(pool.clone());
    let cookie = login_and_get_cookie(app.clone(), ROLE_CUSTOMER, &customer.email).await;

    let mut last_aggregate = 0.0;
    for score in [4, 5, 3] {
        let response = post_json_auth(
            app.clone(),
            &format!("/api/rate/{}", labour.id),
            serde_json::json!({ "rating": score }),
            &cookie,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["message"], "Rating submitted");
        last_aggregate = json["rating"].as_f64().unwrap();
    }

    assert_eq!(last_aggregate, 4.0, "[4, 5, 3] must aggregate to 4.0");

    // The listing surfaces the same aggregate.
    let response = get_auth(app, "/api/labours", &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);
    let listings = body_json(response).await;
    assert_eq!(listings[0]["id"], labour.id);
    assert_eq!(listings[0]["rating"], 4.0);
}

/// Intermediate aggregates are rounded: [5, 4] -> 4.5, then [5, 4, 4] -> 4.3.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rating_aggregate_intermediate_values(pool: PgPool) {
    let customer = create_test_user(&pool, "asha", ROLE_CUSTOMER, "9000000001").await;
    let labour = create_test_user(&pool, "ravi", ROLE_LABOUR, "9000000002").await;
    let app = common::build_test_app(pool.clone());
    let cookie = login_and_get_cookie(app.clone(), ROLE_CUSTOMER, &customer.email).await;

    let mut aggregates = Vec::new();
    for score in [5, 4, 4] {
        let response = post_json_auth(
            app.clone(),
            &format!("/api/rate/{}", labour.id),
            serde_json::json!({ "rating": score }),
            &cookie,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        aggregates.push(body_json(response).await["rating"].as_f64().unwrap());
    }

    assert_eq!(aggregates, vec![5.0, 4.5, 4.3]);
}

/// Rating an unknown id or a customer id is a 404.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rating_unknown_labour(pool: PgPool) {
    let customer = create_test_user(&pool, "asha", ROLE_CUSTOMER, "9000000001").await;
    let other = create_test_user(&pool, "meera", ROLE_CUSTOMER, "9000000003").await;
    let app = common::build_test_app(pool);
    let cookie = login_and_get_cookie(app.clone(), ROLE_CUSTOMER, &customer.email).await;

    let response = post_json_auth(
        app.clone(),
        "/api/rate/99999",
        serde_json::json!({ "rating": 4 }),
        &cookie,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = post_json_auth(
        app,
        &format!("/api/rate/{}", other.id),
        serde_json::json!({ "rating": 4 }),
        &cookie,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Labour accounts cannot submit ratings (role gate).
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rating_requires_customer_role(pool: PgPool) {
    let labour = create_test_user(&pool, "ravi", ROLE_LABOUR, "9000000002").await;
    let other = create_test_user(&pool, "vijay", ROLE_LABOUR, "9000000009").await;
    let app = common::build_test_app(pool);
    let cookie = login_and_get_cookie(app.clone(), ROLE_LABOUR, &labour.email).await;

    let response = post_json_auth(
        app,
        &format!("/api/rate/{}", other.id),
        serde_json::json!({ "rating": 4 }),
        &cookie,
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
