//! Fluxos de transação contra um Postgres real.
//! Cada `#[sqlx::test]` recebe um banco novo com as migrations aplicadas
//! (exige `DATABASE_URL` apontando para um servidor onde o usuário pode criar bancos).

mod common;

use chrono::Utc;
use laundry_pos::{
    common::error::AppError,
    config::AppState,
    db::TransactionRepository,
    models::{
        auth::Actor,
        rbac::Role,
        transaction::{CreateTransactionPayload, PaymentStatus, TransactionFilter, TransactionStatus},
    },
};
use sqlx::PgPool;
use uuid::Uuid;

struct Seed {
    admin: Actor,
    outlet_id: Uuid,
    customer_id: Uuid,
    package_id: Uuid,
}

async fn seed(pool: &PgPool) -> Seed {
    let outlet_id: Uuid = sqlx::query_scalar(
        "INSERT INTO outlets (name, address, price_per_km) VALUES ('Laundry Kemang', 'Jl. Kemang 1', 2000) RETURNING id",
    )
    .fetch_one(pool)
    .await
    .unwrap();

    let admin_id: Uuid = sqlx::query_scalar(
        "INSERT INTO users (name, email, password_hash, roles) VALUES ('Admin', 'admin@laundry.test', 'x', '{admin}') RETURNING id",
    )
    .fetch_one(pool)
    .await
    .unwrap();

    let customer_id: Uuid = sqlx::query_scalar(
        "INSERT INTO customers (name, phone) VALUES ('Dewi', '081200000001') RETURNING id",
    )
    .fetch_one(pool)
    .await
    .unwrap();

    let type_id: Uuid = sqlx::query_scalar("INSERT INTO package_types (name) VALUES ('Kiloan') RETURNING id")
        .fetch_one(pool)
        .await
        .unwrap();

    let package_id: Uuid = sqlx::query_scalar(
        "INSERT INTO packages (outlet_id, package_type_id, name, unit, price) \
         VALUES ($1, $2, 'Cuci Kering', 'kg', 7000) RETURNING id",
    )
    .bind(outlet_id)
    .bind(type_id)
    .fetch_one(pool)
    .await
    .unwrap();

    Seed {
        admin: Actor::new(admin_id, vec![Role::Admin], None),
        outlet_id,
        customer_id,
        package_id,
    }
}

fn payload(seed: &Seed) -> CreateTransactionPayload {
    serde_json::from_value(serde_json::json!({
        "outletId": seed.outlet_id,
        "customerId": seed.customer_id,
        "items": [{ "packageId": seed.package_id, "quantity": 2 }]
    }))
    .unwrap()
}

async fn create(state: &AppState, seed: &Seed) -> Result<(Uuid, String), AppError> {
    let detail = state
        .transaction_service
        .create_transaction(&seed.admin, &payload(seed))
        .await?;
    Ok((detail.transaction.id, detail.transaction.invoice_code))
}

fn suffix(code: &str) -> &str {
    code.rsplit('-').next().unwrap()
}

#[sqlx::test]
async fn invoice_numbers_keep_advancing_after_delete(pool: PgPool) {
    let seed = seed(&pool).await;
    let state = common::state_with_pool(pool);

    let (first, code1) = create(&state, &seed).await.unwrap();
    let (_, code2) = create(&state, &seed).await.unwrap();
    let (_, code3) = create(&state, &seed).await.unwrap();
    assert_eq!([suffix(&code1), suffix(&code2), suffix(&code3)], ["0001", "0002", "0003"]);

    state
        .transaction_service
        .delete_transaction(&seed.admin, first)
        .await
        .unwrap();

    let (_, code4) = create(&state, &seed).await.unwrap();
    let (_, code5) = create(&state, &seed).await.unwrap();
    assert_eq!(suffix(&code4), "0004");
    assert_eq!(suffix(&code5), "0005");
}

#[sqlx::test]
async fn invoice_date_uses_store_calendar(pool: PgPool) {
    let seed = seed(&pool).await;
    let state = common::state_with_pool(pool);

    let (_, code) = create(&state, &seed).await.unwrap();
    let offset = state.config.report_utc_offset;
    let expected = Utc::now().with_timezone(&offset).format("INV-%Y%m%d-").to_string();
    assert!(code.starts_with(&expected), "{code} deveria começar com {expected}");
}

#[sqlx::test]
async fn concurrent_creates_get_distinct_codes(pool: PgPool) {
    let seed = seed(&pool).await;
    let state = common::state_with_pool(pool);

    let (a, b) = tokio::join!(create(&state, &seed), create(&state, &seed));
    let (_, a) = a.unwrap();
    let (_, b) = b.unwrap();
    assert_ne!(a, b);
}

#[sqlx::test]
async fn stale_status_update_is_rejected(pool: PgPool) {
    let seed = seed(&pool).await;
    let repo = TransactionRepository::new(pool.clone());
    let state = common::state_with_pool(pool);
    let (id, _) = create(&state, &seed).await.unwrap();

    state
        .transaction_service
        .update_status(&seed.admin, id, TransactionStatus::Proses)
        .await
        .unwrap();

    // Quem leu "baru" antes da mudança não consegue mais gravar
    let stale = repo
        .update_status(id, TransactionStatus::Baru, TransactionStatus::Batal)
        .await
        .unwrap();
    assert!(stale.is_none());

    let current = state.transaction_service.get_transaction(&seed.admin, id).await.unwrap();
    assert_eq!(current.transaction.status, TransactionStatus::Proses);
}

#[sqlx::test]
async fn paying_twice_conflicts_and_keeps_first_paid_at(pool: PgPool) {
    let seed = seed(&pool).await;
    let repo = TransactionRepository::new(pool.clone());
    let state = common::state_with_pool(pool);
    let (id, _) = create(&state, &seed).await.unwrap();

    let paid = state.transaction_service.pay(&seed.admin, id).await.unwrap();
    assert_eq!(paid.payment_status, PaymentStatus::Dibayar);

    let again = state.transaction_service.pay(&seed.admin, id).await;
    assert!(matches!(again, Err(AppError::Conflict(_))));

    assert!(repo.mark_paid(id, Utc::now()).await.unwrap().is_none());

    let current = state.transaction_service.get_transaction(&seed.admin, id).await.unwrap();
    assert_eq!(current.transaction.paid_at, paid.paid_at);
}

#[sqlx::test]
async fn period_filter_uses_store_calendar(pool: PgPool) {
    let seed = seed(&pool).await;
    let state = common::state_with_pool(pool.clone());
    let (id, _) = create(&state, &seed).await.unwrap();

    // 05/03 20:00 UTC = 06/03 03:00 WIB
    sqlx::query("UPDATE transactions SET transaction_date = '2024-03-05T20:00:00Z' WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await
        .unwrap();

    let day = chrono::NaiveDate::from_ymd_opt(2024, 3, 6).unwrap();
    let filter = TransactionFilter {
        start_date: Some(day),
        end_date: Some(day),
        ..Default::default()
    };

    let listed = state
        .transaction_service
        .list_transactions(&seed.admin, &filter)
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);

    let report = state
        .report_service
        .transaction_report(&seed.admin, &filter)
        .await
        .unwrap();
    assert_eq!(report.rows.len(), 1);

    let previous_day = TransactionFilter {
        start_date: day.pred_opt(),
        end_date: day.pred_opt(),
        ..Default::default()
    };
    let report = state
        .report_service
        .transaction_report(&seed.admin, &previous_day)
        .await
        .unwrap();
    assert!(report.rows.is_empty());
}
