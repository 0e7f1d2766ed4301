use super::error::OrderError;
use super::validation;
use crate::actor_framework::Entity;
use crate::domain::{Order, OrderCreate, OrderPatch, OrderStatus};

impl Entity for Order {
    type Id = String;
    type CreatePayload = OrderCreate;
    type Patch = OrderPatch;
    type Error = OrderError;

    const NAME: &'static str = "order";

    fn id(&self) -> &String {
        &self.order_id
    }

    /// Validates the payload and builds an open order.
    ///
    /// `userId` is checked before `items`; within `items` the first bad line
    /// rejects the whole order.
    fn from_create(id: String, payload: OrderCreate) -> Result<Self, OrderError> {
        let user_id = validation::user_id(payload.user_id.as_ref())?;
        let items = validation::items(payload.items.as_ref())?;

        Ok(Self {
            order_id: id,
            user_id,
            status: OrderStatus::Open,
            items,
        })
    }

    /// Replaces the supplied fields, keeping `order_id` and `user_id`.
    ///
    /// Both fields are validated before the successor is built.
    fn merge(&self, patch: OrderPatch) -> Result<Self, OrderError> {
        let status = patch.status.as_ref().map(validation::status).transpose()?;
        let items = patch
            .items
            .as_ref()
            .map(|items| validation::items(Some(items)))
            .transpose()?;

        Ok(Self {
            order_id: self.order_id.clone(),
            user_id: self.user_id.clone(),
            status: status.unwrap_or(self.status),
            items: items.unwrap_or_else(|| self.items.clone()),
        })
    }
}
