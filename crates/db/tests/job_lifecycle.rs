//! Database-level tests for the hire/job lifecycle and rating aggregate.
//!
//! These exercise the repositories directly against a migrated database,
//! without going through the HTTP layer.

use labourhub_core::hiring::{JOB_STATUS_ACCEPTED, JOB_STATUS_PENDING, JOB_STATUS_REJECTED};
use labourhub_core::roles::{ROLE_CUSTOMER, ROLE_LABOUR};
use labourhub_db::models::user::{CreateUser, User};
use labourhub_db::repositories::{JobRepo, UserRepo};
use sqlx::PgPool;

/// Insert a user directly, bypassing the HTTP registration flow.
async fn create_user(pool: &PgPool, name: &str, role: &str, phone: &str) -> User {
    let input = CreateUser {
        name: name.to_string(),
        email: format!("{name}@test.com"),
        phone: phone.to_string(),
        city: "Pune".to_string(),
        role: role.to_string(),
        password_hash: "$argon2id$fake-hash-for-tests".to_string(),
        identity: "1234".to_string(),
        valid_proof: None,
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_job_applies_defaults(pool: PgPool) {
    let customer = create_user(&pool, "cust", ROLE_CUSTOMER, "9000000001").await;
    let labour = create_user(&pool, "lab", ROLE_LABOUR, "9000000002").await;

    let job = JobRepo::create(&pool, customer.id, labour.id)
        .await
        .expect("job creation should succeed");

    assert_eq!(job.status, JOB_STATUS_PENDING);
    assert_eq!(job.title, "Hiring Request");
    assert_eq!(job.description, "");
    assert_eq!(job.customer_id, customer.id);
    assert_eq!(job.labour_id, labour.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn status_update_only_applies_to_pending_jobs(pool: PgPool) {
    let customer = create_user(&pool, "cust", ROLE_CUSTOMER, "9000000001").await;
    let labour = create_user(&pool, "lab", ROLE_LABOUR, "9000000002").await;
    let job = JobRepo::create(&pool, customer.id, labour.id).await.unwrap();

    // First transition wins.
    let updated = JobRepo::set_status_if_pending(&pool, job.id, JOB_STATUS_ACCEPTED)
        .await
        .expect("update should succeed");
    assert_eq!(updated.unwrap().status, JOB_STATUS_ACCEPTED);

    // Second transition observes no pending row.
    let second = JobRepo::set_status_if_pending(&pool, job.id, JOB_STATUS_REJECTED)
        .await
        .expect("update should succeed");
    assert!(second.is_none(), "terminal status must not change again");

    // The stored status is unchanged.
    let stored = JobRepo::find_by_id(&pool, job.id).await.unwrap().unwrap();
    assert_eq!(stored.status, JOB_STATUS_ACCEPTED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn concurrent_status_updates_let_exactly_one_win(pool: PgPool) {
    let customer = create_user(&pool, "cust", ROLE_CUSTOMER, "9000000001").await;
    let labour = create_user(&pool, "lab", ROLE_LABOUR, "9000000002").await;
    let job = JobRepo::create(&pool, customer.id, labour.id).await.unwrap();

    let accept = JobRepo::set_status_if_pending(&pool, job.id, JOB_STATUS_ACCEPTED);
    let reject = JobRepo::set_status_if_pending(&pool, job.id, JOB_STATUS_REJECTED);
    let (accept_result, reject_result) = tokio::join!(accept, reject);

    let winners = [accept_result.unwrap(), reject_result.unwrap()]
        .into_iter()
        .flatten()
        .count();
    assert_eq!(winners, 1, "exactly one racing transition must take effect");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn rating_aggregate_is_recomputed_mean(pool: PgPool) {
    let customer = create_user(&pool, "cust", ROLE_CUSTOMER, "9000000001").await;
    let labour = create_user(&pool, "lab", ROLE_LABOUR, "9000000002").await;

    assert_eq!(labour.rating, 0.0, "unrated labour starts at 0");

    let after_first = UserRepo::add_rating(&pool, labour.id, 4, customer.id).await.unwrap();
    assert_eq!(after_first, 4.0);

    let after_second = UserRepo::add_rating(&pool, labour.id, 5, customer.id).await.unwrap();
    assert_eq!(after_second, 4.5);

    let after_third = UserRepo::add_rating(&pool, labour.id, 3, customer.id).await.unwrap();
    assert_eq!(after_third, 4.0, "[4, 5, 3] must aggregate to 4.0");

    let stored = UserRepo::find_by_id(&pool, labour.id).await.unwrap().unwrap();
    assert_eq!(stored.rating, 4.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_registration_is_detected_per_role(pool: PgPool) {
    let existing = create_user(&pool, "worker", ROLE_LABOUR, "9000000001").await;

    // Same email, same role: duplicate.
    let dup = UserRepo::find_duplicate(&pool, &existing.email, "9999999999", ROLE_LABOUR)
        .await
        .unwrap();
    assert!(dup.is_some());

    // Same phone, same role: duplicate.
    let dup = UserRepo::find_duplicate(&pool, "other@test.com", &existing.phone, ROLE_LABOUR)
        .await
        .unwrap();
    assert!(dup.is_some());

    // Same email but different role: allowed.
    let dup = UserRepo::find_duplicate(&pool, &existing.email, "9999999999", ROLE_CUSTOMER)
        .await
        .unwrap();
    assert!(dup.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn job_list_embeds_customer_contact_details(pool: PgPool) {
    let customer = create_user(&pool, "asha", ROLE_CUSTOMER, "9000000001").await;
    let labour = create_user(&pool, "ravi", ROLE_LABOUR, "9000000002").await;
    JobRepo::create(&pool, customer.id, labour.id).await.unwrap();
    JobRepo::create(&pool, customer.id, labour.id).await.unwrap();

    let jobs = JobRepo::list_for_labour(&pool, labour.id).await.unwrap();
    assert_eq!(jobs.len(), 2);
    for job in &jobs {
        assert_eq!(job.customer_name, "asha");
        assert_eq!(job.customer_phone, "9000000001");
        assert_eq!(job.customer_city, "Pune");
    }
}
