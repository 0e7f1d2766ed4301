use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Number, Value};

/// Lifecycle state of an order. Transitions are unrestricted in both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Open,
    Complete,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Open => "open",
            OrderStatus::Complete => "complete",
        }
    }

    /// Parses the wire value. Only the exact lowercase names are accepted.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "open" => Some(OrderStatus::Open),
            "complete" => Some(OrderStatus::Complete),
            _ => None,
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One product/quantity/price line of an order.
///
/// Numbers keep the caller's representation, so `3` stays an integer and
/// `0.5` stays a real on the way back out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub product_id: String,
    pub quantity: Number,
    pub price: Number,
}

impl LineItem {
    pub fn new(
        product_id: impl Into<String>,
        quantity: impl Into<Number>,
        price: impl Into<Number>,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            quantity: quantity.into(),
            price: price.into(),
        }
    }

    /// Wire form of the item, as a caller would send it.
    pub fn to_value(&self) -> Value {
        json!({
            "productId": self.product_id,
            "quantity": self.quantity,
            "price": self.price,
        })
    }
}

/// Represents a customer order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: String,
    pub user_id: String,
    pub status: OrderStatus,
    pub items: Vec<LineItem>,
}

/// Payload for creating a new order.
///
/// Fields hold the caller's data untouched; type checks happen in the store.
/// `None` means the field was absent (or `null`) in the request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderCreate {
    pub user_id: Option<Value>,
    pub items: Option<Value>,
}

impl OrderCreate {
    pub fn new(user_id: impl Into<String>, items: &[LineItem]) -> Self {
        Self {
            user_id: Some(Value::String(user_id.into())),
            items: Some(items_value(items)),
        }
    }

    /// Picks `userId` and `items` out of a decoded request body.
    pub fn from_body(body: &Value) -> Self {
        let fields = body.as_object();
        Self {
            user_id: present(fields, "userId"),
            items: present(fields, "items"),
        }
    }
}

/// Payload for updating an existing order. Absent fields are left as stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderPatch {
    pub status: Option<Value>,
    pub items: Option<Value>,
}

impl OrderPatch {
    pub fn with_status(mut self, status: impl Into<Value>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_items(mut self, items: &[LineItem]) -> Self {
        self.items = Some(items_value(items));
        self
    }

    /// Picks `status` and `items` out of a decoded request body.
    pub fn from_body(body: &Value) -> Self {
        let fields = body.as_object();
        Self {
            status: present(fields, "status"),
            items: present(fields, "items"),
        }
    }
}

/// Real-valued number for tests; panics on NaN or infinity.
#[cfg(test)]
pub fn real(value: f64) -> Number {
    Number::from_f64(value).expect("finite number")
}

fn items_value(items: &[LineItem]) -> Value {
    Value::Array(items.iter().map(LineItem::to_value).collect())
}

fn present(fields: Option<&Map<String, Value>>, key: &str) -> Option<Value> {
    fields
        .and_then(|fields| fields.get(key))
        .filter(|value| !value.is_null())
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_serializes_camel_case() {
        let order = Order {
            order_id: "order_1".into(),
            user_id: "u1".into(),
            status: OrderStatus::Complete,
            items: vec![LineItem::new("apple", 3, real(0.5))],
        };

        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(
            value,
            json!({
                "orderId": "order_1",
                "userId": "u1",
                "status": "complete",
                "items": [{"productId": "apple", "quantity": 3, "price": 0.5}],
            })
        );
    }

    #[test]
    fn test_line_item_keeps_number_representation() {
        let raw = json!({"productId": "apple", "quantity": 3, "price": 1});
        let item: LineItem = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(item, LineItem::new("apple", 3, 1));
        assert_eq!(item.to_value(), raw);
        assert_eq!(serde_json::to_value(&item).unwrap(), raw);
    }

    #[test]
    fn test_status_parse_is_exact() {
        assert_eq!(OrderStatus::parse("open"), Some(OrderStatus::Open));
        assert_eq!(OrderStatus::parse("complete"), Some(OrderStatus::Complete));
        assert_eq!(OrderStatus::parse("Complete"), None);
        assert_eq!(OrderStatus::parse(""), None);
        assert_eq!(OrderStatus::default(), OrderStatus::Open);
    }

    #[test]
    fn test_from_body_treats_null_as_absent() {
        let patch = OrderPatch::from_body(&json!({"status": null, "items": []}));
        assert_eq!(patch.status, None);
        assert_eq!(patch.items, Some(json!([])));

        // Falsy values are still present.
        let patch = OrderPatch::from_body(&json!({"status": "", "items": 0}));
        assert_eq!(patch.status, Some(json!("")));
        assert_eq!(patch.items, Some(json!(0)));
    }

    #[test]
    fn test_from_body_non_object() {
        assert_eq!(OrderCreate::from_body(&json!([1, 2])), OrderCreate::default());
        assert_eq!(OrderPatch::from_body(&json!("x")), OrderPatch::default());
    }
}
