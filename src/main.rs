mod actor_framework;
mod api;
mod app_system;
mod clients;
mod domain;
mod order_actor;

#[cfg(test)]
mod mock_framework;

use serde_json::Number;
use tracing::{error, info, warn, Instrument};
use crate::api::Method;
use crate::app_system::{setup_tracing, OrderSystem, SystemConfig};
use crate::domain::{LineItem, OrderCreate, OrderPatch};

fn price(value: f64) -> Result<Number, Box<dyn std::error::Error>> {
    Number::from_f64(value).ok_or_else(|| format!("price {} is not a finite number", value).into())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = SystemConfig::from_env()?;
    setup_tracing(&config);

    info!(mailbox_capacity = config.mailbox_capacity, "Starting order service");

    let system = OrderSystem::new(&config);
    let api = system.api();

    let health = api.handle(Method::Get, "/", None).await;
    info!(body = %health.body, "Health check");

    // Walk one order through its lifecycle, the way a caller would.
    let span = tracing::info_span!("order_lifecycle");
    let outcome = async {
        let client = &system.order_client;

        let basket = [
            LineItem::new("apple", 3, price(0.5)?),
            LineItem::new("banana", 2, price(0.35)?),
        ];
        let created = client.create_order(OrderCreate::new("test-user-123", &basket)).await?;
        info!(order_id = %created.order_id, "Created");

        let fetched = client.get_order(created.order_id.clone()).await?;
        info!(status = %fetched.status, item_count = fetched.items.len(), "Fetched");

        let completed = client
            .update_order(created.order_id.clone(), OrderPatch::default().with_status("complete"))
            .await?;
        info!(status = %completed.status, "Marked complete");

        let replacement = [
            LineItem::new("apple", 1, price(0.5)?),
            LineItem::new("cherry", 5, price(0.2)?),
        ];
        let changed = client
            .update_order(created.order_id.clone(), OrderPatch::default().with_items(&replacement))
            .await?;
        info!(status = %changed.status, item_count = changed.items.len(), "Changed items");

        let path = format!("/orders/{}", created.order_id);
        let rejected = api
            .handle(Method::Put, &path, Some(r#"{"status": "shipped"}"#))
            .await;
        info!(status = rejected.status, body = %rejected.body, "Rejected bad status");

        let last = api.handle(Method::Get, &path, None).await;
        if !last.is_success() {
            warn!(status = last.status, "Final fetch failed");
            return Err(format!("final fetch returned {}", last.status).into());
        }
        info!(body = %last.body, "Final fetch");

        Ok::<_, Box<dyn std::error::Error>>(())
    }
    .instrument(span)
    .await;

    if let Err(e) = &outcome {
        error!(error = %e, "Order lifecycle failed");
    }

    drop(api);
    system.shutdown().await?;

    info!("Order service stopped");
    outcome
}
