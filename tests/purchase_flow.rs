//! End-to-end purchase-path tests against a real PostgreSQL instance.
//!
//! These tests exercise the row-locked purchase transaction end to end,
//! from oversell protection under concurrency to rollback atomicity.
//! They need a database, so they are `#[ignore]`d by default; run them
//! with:
//!
//! ```text
//! DATABASE_URL=postgres://... cargo test -- --ignored
//! ```
//!
//! Each test seeds its own `events` row, so tests do not interfere with
//! each other and no global cleanup is required.

use anyhow::Result;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use ticket_gateway::domain::{BuyerId, EventId, PurchaseRequest};
use ticket_gateway::error::TicketError;
use ticket_gateway::persistence::TicketStore;
use ticket_gateway::service::TicketService;

async fn connect() -> Result<PgPool> {
    let url = std::env::var("DATABASE_URL")?;
    let pool = PgPoolOptions::new().max_connections(25).connect(&url).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    Ok(pool)
}

async fn seed_event(
    pool: &PgPool,
    title: &str,
    unit_price: Decimal,
    total: i32,
    available: i32,
) -> Result<EventId> {
    let id = sqlx::query_scalar::<_, EventId>(
        "INSERT INTO events (title, unit_price, total_tickets, available_tickets) \
         VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(title)
    .bind(unit_price)
    .bind(total)
    .bind(available)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

async fn available_tickets(pool: &PgPool, event_id: EventId) -> Result<i32> {
    let available =
        sqlx::query_scalar::<_, i32>("SELECT available_tickets FROM events WHERE id = $1")
            .bind(event_id)
            .fetch_one(pool)
            .await?;
    Ok(available)
}

async fn order_count(pool: &PgPool, event_id: EventId) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders WHERE event_id = $1")
        .bind(event_id)
        .fetch_one(pool)
        .await?;
    Ok(count)
}

fn request(event_id: EventId, quantity: i32) -> PurchaseRequest {
    PurchaseRequest {
        buyer_id: BuyerId::new(),
        event_id,
        quantity,
    }
}

#[tokio::test]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn purchase_succeeds_then_sells_out() -> Result<()> {
    let pool = connect().await?;
    let service = TicketService::new(TicketStore::new(pool.clone()));
    let event_id = seed_event(&pool, "flash sale", dec!(50.00), 100, 2).await?;

    let receipt = service.purchase(&request(event_id, 2)).await?;
    assert_eq!(receipt.quantity, 2);
    assert_eq!(receipt.total_price, dec!(100.00));
    assert_eq!(available_tickets(&pool, event_id).await?, 0);

    match service.purchase(&request(event_id, 1)).await {
        Err(TicketError::InsufficientInventory { available }) => assert_eq!(available, 0),
        other => anyhow::bail!("expected insufficient inventory, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn concurrent_purchases_never_oversell() -> Result<()> {
    let pool = connect().await?;
    let service = TicketService::new(TicketStore::new(pool.clone()));
    let event_id = seed_event(&pool, "contended sale", dec!(10.00), 50, 5).await?;

    let mut handles = Vec::new();
    for _ in 0..20 {
        let service = service.clone();
        handles.push(tokio::spawn(async move {
            service.purchase(&request(event_id, 1)).await
        }));
    }

    let mut succeeded = 0;
    let mut sold_out = 0;
    for handle in handles {
        match handle.await? {
            Ok(_) => succeeded += 1,
            Err(TicketError::InsufficientInventory { .. }) => sold_out += 1,
            Err(other) => anyhow::bail!("unexpected purchase failure: {other}"),
        }
    }

    assert_eq!(succeeded, 5);
    assert_eq!(sold_out, 15);
    assert_eq!(available_tickets(&pool, event_id).await?, 0);
    assert_eq!(order_count(&pool, event_id).await?, 5);
    Ok(())
}

#[tokio::test]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn failed_order_insert_rolls_back_the_decrement() -> Result<()> {
    let pool = connect().await?;
    let service = TicketService::new(TicketStore::new(pool.clone()));

    // NUMERIC(12,2) caps total_price at 9_999_999_999.99. A total beyond
    // that makes the order insert fail after the inventory update has
    // already run inside the transaction, which must then roll back whole.
    let event_id = seed_event(&pool, "overflow sale", dec!(99999999.99), 5000, 5000).await?;

    match service.purchase(&request(event_id, 2000)).await {
        Err(TicketError::TransactionFailure(_)) => {}
        other => anyhow::bail!("expected transaction failure, got {other:?}"),
    }

    assert_eq!(available_tickets(&pool, event_id).await?, 5000);
    assert_eq!(order_count(&pool, event_id).await?, 0);
    Ok(())
}

#[tokio::test]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn stored_total_ignores_later_price_changes() -> Result<()> {
    let pool = connect().await?;
    let service = TicketService::new(TicketStore::new(pool.clone()));
    let event_id = seed_event(&pool, "repricing", dec!(25.00), 10, 10).await?;

    let receipt = service.purchase(&request(event_id, 1)).await?;

    sqlx::query("UPDATE events SET unit_price = $1 WHERE id = $2")
        .bind(dec!(40.00))
        .bind(event_id)
        .execute(&pool)
        .await?;

    let stored = sqlx::query_scalar::<_, Decimal>("SELECT total_price FROM orders WHERE id = $1")
        .bind(receipt.order_id)
        .fetch_one(&pool)
        .await?;
    assert_eq!(stored, dec!(25.00));
    Ok(())
}

#[tokio::test]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn repeated_requests_create_separate_orders() -> Result<()> {
    let pool = connect().await?;
    let service = TicketService::new(TicketStore::new(pool.clone()));
    let event_id = seed_event(&pool, "double submit", dec!(15.00), 10, 10).await?;

    let payload = PurchaseRequest {
        buyer_id: BuyerId::new(),
        event_id,
        quantity: 3,
    };
    let first = service.purchase(&payload).await?;
    let second = service.purchase(&payload).await?;

    assert_ne!(first.order_id, second.order_id);
    assert_eq!(available_tickets(&pool, event_id).await?, 4);
    assert_eq!(order_count(&pool, event_id).await?, 2);
    Ok(())
}

#[tokio::test]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn unknown_event_is_rejected() -> Result<()> {
    let pool = connect().await?;
    let service = TicketService::new(TicketStore::new(pool.clone()));

    match service.purchase(&request(EventId::new(), 1)).await {
        Err(TicketError::EventNotFound(_)) => Ok(()),
        other => anyhow::bail!("expected event-not-found, got {other:?}"),
    }
}

#[tokio::test]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn invalid_quantity_leaves_no_trace() -> Result<()> {
    let pool = connect().await?;
    let service = TicketService::new(TicketStore::new(pool.clone()));
    let event_id = seed_event(&pool, "validation", dec!(20.00), 10, 10).await?;

    match service.purchase(&request(event_id, 0)).await {
        Err(TicketError::InvalidQuantity(0)) => {}
        other => anyhow::bail!("expected invalid-quantity, got {other:?}"),
    }

    assert_eq!(available_tickets(&pool, event_id).await?, 10);
    assert_eq!(order_count(&pool, event_id).await?, 0);
    Ok(())
}

#[tokio::test]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn history_pages_newest_first() -> Result<()> {
    let pool = connect().await?;
    let service = TicketService::new(TicketStore::new(pool.clone()));
    let event_id = seed_event(&pool, "history", dec!(5.00), 100, 100).await?;

    let buyer_id = BuyerId::new();
    for _ in 0..3 {
        service
            .purchase(&PurchaseRequest {
                buyer_id,
                event_id,
                quantity: 1,
            })
            .await?;
    }

    let (orders, total) = service.order_history(buyer_id, 2, 0).await?;
    assert_eq!(total, 3);
    assert_eq!(orders.len(), 2);
    assert!(
        orders
            .iter()
            .zip(orders.iter().skip(1))
            .all(|(newer, older)| newer.created_at >= older.created_at)
    );

    let snapshot = service.availability(event_id).await?;
    assert_eq!(snapshot.available_tickets, 97);
    assert_eq!(snapshot.total_tickets, 100);
    Ok(())
}
