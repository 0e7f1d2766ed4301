use tracing::{debug, info, instrument, warn};
use crate::domain::{Order, OrderCreate, OrderPatch};
use crate::order_actor::OrderError;
use crate::actor_framework::ResourceClient;

/// Client for interacting with the Order actor.
///
/// Cheap to clone; every clone talks to the same store.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, payload))]
    pub async fn create_order(&self, payload: OrderCreate) -> Result<Order, OrderError> {
        debug!("Sending request");
        match self.inner.create(payload).await {
            Ok(order) => {
                info!(
                    order_id = %order.order_id,
                    user_id = %order.user_id,
                    item_count = order.items.len(),
                    "Order created"
                );
                Ok(order)
            }
            Err(e) => {
                warn!(error = %e, "Order creation failed");
                Err(e)
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn get_order(&self, id: String) -> Result<Order, OrderError> {
        debug!("Sending request");
        self.inner.get(id).await
    }

    #[instrument(skip(self, patch))]
    pub async fn update_order(&self, id: String, patch: OrderPatch) -> Result<Order, OrderError> {
        debug!("Sending request");
        match self.inner.update(id, patch).await {
            Ok(order) => {
                info!(status = %order.status, item_count = order.items.len(), "Order updated");
                Ok(order)
            }
            Err(e) => {
                warn!(error = %e, "Order update failed");
                Err(e)
            }
        }
    }

    #[cfg(test)]
    pub async fn order_count(&self) -> Result<usize, OrderError> {
        self.inner.count().await
    }
}
