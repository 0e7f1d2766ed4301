//! Type and range checks for order payloads.
//!
//! Every check runs against the caller's raw JSON so no coercion happens
//! before the store sees the data. The first failure wins.

use serde_json::{Number, Value};

use super::error::OrderError;
use crate::domain::{LineItem, OrderStatus};

pub fn user_id(value: Option<&Value>) -> Result<String, OrderError> {
    match value {
        Some(Value::String(id)) if !id.is_empty() => Ok(id.clone()),
        _ => Err(OrderError::MissingField("userId")),
    }
}

pub fn items(value: Option<&Value>) -> Result<Vec<LineItem>, OrderError> {
    match value {
        Some(Value::Array(raw)) => raw
            .iter()
            .enumerate()
            .map(|(index, item)| line_item(index, item))
            .collect(),
        _ => Err(OrderError::MissingField("items")),
    }
}

pub fn status(value: &Value) -> Result<OrderStatus, OrderError> {
    value
        .as_str()
        .and_then(OrderStatus::parse)
        .ok_or_else(|| OrderError::InvalidStatus(describe(value)))
}

fn line_item(index: usize, value: &Value) -> Result<LineItem, OrderError> {
    let shape = |reason: &str| OrderError::InvalidItemShape {
        index,
        reason: reason.to_string(),
    };
    let range = |reason: String| OrderError::InvalidItemRange { index, reason };

    let fields = value.as_object().ok_or_else(|| shape("item must be an object"))?;

    let product_id = match fields.get("productId") {
        Some(Value::String(id)) if !id.is_empty() => id.clone(),
        _ => return Err(shape("productId must be a non-empty string")),
    };
    let quantity = number(fields.get("quantity")).ok_or_else(|| shape("quantity must be a number"))?;
    let price = number(fields.get("price")).ok_or_else(|| shape("price must be a number"))?;

    if !quantity.as_f64().map_or(false, |q| q > 0.0) {
        return Err(range(format!("quantity must be greater than 0, got {}", quantity)));
    }
    if !price.as_f64().map_or(false, |p| p >= 0.0) {
        return Err(range(format!("price must not be negative, got {}", price)));
    }

    Ok(LineItem {
        product_id,
        quantity,
        price,
    })
}

fn number(value: Option<&Value>) -> Option<Number> {
    match value {
        Some(Value::Number(n)) => Some(n.clone()),
        _ => None,
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::real;
    use serde_json::json;

    fn item_error(item: Value) -> OrderError {
        items(Some(&json!([item]))).unwrap_err()
    }

    #[test]
    fn test_user_id() {
        assert_eq!(user_id(Some(&json!("u1"))).unwrap(), "u1");
        for bad in [json!(""), json!(42), json!(true), json!({"id": "u1"})] {
            assert_eq!(user_id(Some(&bad)), Err(OrderError::MissingField("userId")));
        }
        assert_eq!(user_id(None), Err(OrderError::MissingField("userId")));
    }

    #[test]
    fn test_items_must_be_array() {
        assert_eq!(items(Some(&json!([]))).unwrap(), Vec::<LineItem>::new());
        assert_eq!(items(None), Err(OrderError::MissingField("items")));
        assert_eq!(
            items(Some(&json!({"productId": "apple"}))),
            Err(OrderError::MissingField("items"))
        );
    }

    #[test]
    fn test_integer_and_real_quantities() {
        let parsed = items(Some(&json!([
            {"productId": "apple", "quantity": 3, "price": 0.5},
            {"productId": "flour", "quantity": 0.25, "price": 0},
        ])))
        .unwrap();
        assert_eq!(
            parsed,
            vec![
                LineItem::new("apple", 3, real(0.5)),
                LineItem::new("flour", real(0.25), 0),
            ]
        );
        assert!(parsed[0].quantity.is_u64());
        assert!(parsed[1].price.is_u64());
    }

    #[test]
    fn test_shape_violations() {
        let cases = [
            json!("apple"),
            json!({"quantity": 1, "price": 1}),
            json!({"productId": "", "quantity": 1, "price": 1}),
            json!({"productId": 7, "quantity": 1, "price": 1}),
            json!({"productId": "apple", "quantity": "1", "price": 1}),
            json!({"productId": "apple", "quantity": 1}),
            json!({"productId": "apple", "quantity": 1, "price": null}),
        ];
        for case in cases {
            assert!(
                matches!(item_error(case.clone()), OrderError::InvalidItemShape { index: 0, .. }),
                "expected shape error for {}",
                case
            );
        }
    }

    #[test]
    fn test_range_violations() {
        let cases = [
            json!({"productId": "apple", "quantity": 0, "price": 1}),
            json!({"productId": "apple", "quantity": -1, "price": 0.5}),
            json!({"productId": "apple", "quantity": 1, "price": -0.01}),
        ];
        for case in cases {
            assert!(
                matches!(item_error(case.clone()), OrderError::InvalidItemRange { index: 0, .. }),
                "expected range error for {}",
                case
            );
        }
    }

    #[test]
    fn test_first_violation_wins() {
        let err = items(Some(&json!([
            {"productId": "apple", "quantity": 1, "price": 1},
            {"productId": "pear", "quantity": -1, "price": 1},
            {"productId": ""},
        ])))
        .unwrap_err();
        assert!(matches!(err, OrderError::InvalidItemRange { index: 1, .. }));
    }

    #[test]
    fn test_status() {
        assert_eq!(status(&json!("open")).unwrap(), OrderStatus::Open);
        assert_eq!(status(&json!("complete")).unwrap(), OrderStatus::Complete);
        assert_eq!(
            status(&json!("bogus")),
            Err(OrderError::InvalidStatus("bogus".into()))
        );
        assert_eq!(status(&json!("")), Err(OrderError::InvalidStatus("".into())));
        assert_eq!(status(&json!(1)), Err(OrderError::InvalidStatus("1".into())));
    }
}
