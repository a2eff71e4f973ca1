use serde::Deserialize;

use crate::errors::{AppError, AppResult};

pub const PURCHASE_COMPLETED: &str = "checkout.session.completed";

/// The parts of a payment provider event the access gate cares about.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaymentEvent {
    pub event_id: Option<String>,
    pub event_type: String,
    pub user_id: Option<String>,
    pub amount: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct RawEvent {
    #[serde(default)]
    id: Option<String>,
    #[serde(rename = "type")]
    event_type: String,
    data: RawEventData,
}

#[derive(Debug, Deserialize)]
struct RawEventData {
    object: RawEventObject,
}

#[derive(Debug, Deserialize)]
struct RawEventObject {
    #[serde(default)]
    metadata: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(default)]
    amount_total: Option<i64>,
}

impl PaymentEvent {
    pub fn from_json(payload: &[u8]) -> AppResult<Self> {
        let raw: RawEvent = serde_json::from_slice(payload).map_err(|e| {
            AppError::PaymentVerificationError(format!("malformed event payload: {}", e))
        })?;

        // Checkout metadata values are strings, but numeric ids are accepted too.
        let user_id = raw
            .data
            .object
            .metadata
            .as_ref()
            .and_then(|m| m.get("user_id"))
            .and_then(|v| match v {
                serde_json::Value::String(s) => Some(s.trim().to_string()),
                serde_json::Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .filter(|s| !s.is_empty());

        Ok(PaymentEvent {
            event_id: raw.id,
            event_type: raw.event_type,
            user_id,
            amount: raw.data.object.amount_total,
        })
    }

    pub fn is_purchase_completed(&self) -> bool {
        self.event_type == PURCHASE_COMPLETED
    }
}
