//! Transport shell around the order store.
//!
//! Decodes request bodies into store payloads without touching their types,
//! calls the store through [`OrderClient`], and maps the outcome onto an
//! HTTP-style status and JSON body. It holds no state of its own.

use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, error, info, instrument, warn};

use crate::clients::OrderClient;
use crate::domain::{Order, OrderCreate, OrderPatch};
use crate::order_actor::OrderError;

pub const HEALTH_MESSAGE: &str = "Orders service is up!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
}

/// Status code plus JSON body, ready for whatever wire the caller speaks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    fn order(status: u16, order: &Order) -> Self {
        match serde_json::to_value(order) {
            Ok(body) => Self { status, body },
            Err(e) => Self::internal(&e.to_string()),
        }
    }

    fn error(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            body: json!({ "error": message.into() }),
        }
    }

    fn internal(message: &str) -> Self {
        Self {
            status: 500,
            body: json!({ "error": "Internal server error", "message": message }),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl From<&OrderError> for ApiResponse {
    fn from(e: &OrderError) -> Self {
        match e {
            e if e.is_validation() => ApiResponse::error(400, e.to_string()),
            OrderError::NotFound(_) => ApiResponse::error(404, "Order not found"),
            _ => ApiResponse::internal(&e.to_string()),
        }
    }
}

enum Route<'a> {
    Health,
    Orders,
    Order(&'a str),
}

fn route(path: &str) -> Option<Route<'_>> {
    match path {
        "/" => Some(Route::Health),
        "/orders" => Some(Route::Orders),
        _ => path
            .strip_prefix("/orders/")
            .filter(|id| !id.is_empty() && !id.contains('/'))
            .map(Route::Order),
    }
}

#[derive(Clone)]
pub struct OrderApi {
    client: OrderClient,
}

impl OrderApi {
    pub fn new(client: OrderClient) -> Self {
        Self { client }
    }

    /// Dispatches a raw request. `body` is the undecoded request text, if any.
    #[instrument(name = "request", skip(self, body))]
    pub async fn handle(&self, method: Method, path: &str, body: Option<&str>) -> ApiResponse {
        let response = match (method, route(path)) {
            (Method::Get, Some(Route::Health)) => self.health(),
            (Method::Post, Some(Route::Orders)) => match decode(body) {
                Ok(body) => self.create(&body).await,
                Err(response) => response,
            },
            (Method::Get, Some(Route::Order(id))) => self.get(id).await,
            (Method::Put, Some(Route::Order(id))) => match decode(body) {
                Ok(body) => self.update(id, &body).await,
                Err(response) => response,
            },
            _ => ApiResponse::error(404, "Route not found"),
        };

        info!(status = response.status, "Request completed");
        response
    }

    pub fn health(&self) -> ApiResponse {
        ApiResponse {
            status: 200,
            body: Value::String(HEALTH_MESSAGE.to_string()),
        }
    }

    /// POST /orders
    pub async fn create(&self, body: &Value) -> ApiResponse {
        match self.client.create_order(OrderCreate::from_body(body)).await {
            Ok(order) => ApiResponse::order(201, &order),
            Err(e) => failure(&e),
        }
    }

    /// GET /orders/{id}
    pub async fn get(&self, order_id: &str) -> ApiResponse {
        match self.client.get_order(order_id.to_string()).await {
            Ok(order) => ApiResponse::order(200, &order),
            Err(e) => failure(&e),
        }
    }

    /// PUT /orders/{id}
    pub async fn update(&self, order_id: &str, body: &Value) -> ApiResponse {
        match self
            .client
            .update_order(order_id.to_string(), OrderPatch::from_body(body))
            .await
        {
            Ok(order) => ApiResponse::order(200, &order),
            Err(e) => failure(&e),
        }
    }
}

fn decode(body: Option<&str>) -> Result<Value, ApiResponse> {
    match body {
        None => Ok(Value::Null),
        Some(text) if text.trim().is_empty() => Ok(Value::Null),
        Some(text) => serde_json::from_str(text).map_err(|e| {
            debug!(error = %e, "Body is not valid JSON");
            ApiResponse::error(400, "Malformed JSON body")
        }),
    }
}

fn failure(e: &OrderError) -> ApiResponse {
    if let OrderError::ActorCommunicationError(_) = e {
        error!(error = %e, "Order store unavailable");
    } else {
        warn!(error = %e, "Request rejected");
    }
    ApiResponse::from(e)
}
