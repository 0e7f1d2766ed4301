use tracing::{error, info, instrument};
use uuid::Uuid;
use crate::actor_framework::ResourceActor;
use crate::api::OrderApi;
use crate::clients::OrderClient;
use crate::domain::Order;
use super::config::SystemConfig;

/// The main application system that owns the order store actor.
///
/// Responsible for starting the actor, handing out clients and shutting down.
pub struct OrderSystem {
    pub order_client: OrderClient,
    handle: tokio::task::JoinHandle<()>,
}

impl OrderSystem {
    /// Starts the store with random UUID v4 order ids.
    pub fn new(config: &SystemConfig) -> Self {
        Self::with_id_generator(config, || Uuid::new_v4().to_string())
    }

    /// Starts the store with a caller-supplied id generator.
    ///
    /// The generator must never repeat an id for the lifetime of the process.
    #[instrument(name = "order_system", skip(next_order_id))]
    pub fn with_id_generator(
        config: &SystemConfig,
        next_order_id: impl Fn() -> String + Send + Sync + 'static,
    ) -> Self {
        info!("Starting order system");

        let (order_actor, order_resource_client) =
            ResourceActor::<Order>::new(config.mailbox_capacity, next_order_id);
        let handle = tokio::spawn(order_actor.run());

        info!("Order system started successfully");

        Self {
            order_client: OrderClient::new(order_resource_client),
            handle,
        }
    }

    /// Transport shell bound to this system's store.
    pub fn api(&self) -> OrderApi {
        OrderApi::new(self.order_client.clone())
    }

    /// Closes the store's mailbox and waits for the actor to drain it.
    ///
    /// Clients cloned out of the system (including those held by `OrderApi`)
    /// keep the mailbox open, so drop them first.
    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down order system");

        drop(self.order_client);

        if let Err(e) = self.handle.await {
            error!(error = ?e, "Actor task failed");
            return Err(format!("Actor task failed: {:?}", e));
        }

        info!("Order system shutdown complete");
        Ok(())
    }
}
