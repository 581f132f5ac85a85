//! Event types for the append-only analytics log
//!
//! Events are immutable records of usage activity. They are appended in
//! arrival order and never mutated or deleted; the log is the source of
//! truth for any query not served by an incremental counter.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::engine::AnalyticsError;

/// Event kinds that can occur in the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A page was viewed
    PageView,
    /// A custom, caller-named event
    Generic,
    /// A payment attempt (successful or failed)
    Payment,
    /// A subscription was started
    Subscription,
    /// A product was viewed, purchased, or added to a cart
    ProductInteraction,
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventKind::PageView => write!(f, "page_view"),
            EventKind::Generic => write!(f, "generic"),
            EventKind::Payment => write!(f, "payment"),
            EventKind::Subscription => write!(f, "subscription"),
            EventKind::ProductInteraction => write!(f, "product_interaction"),
        }
    }
}

/// Product interaction actions, a closed set
///
/// Unknown action strings are rejected at the boundary instead of silently
/// growing a new counter key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProductAction {
    Views,
    Purchases,
    CartAdds,
}

impl std::fmt::Display for ProductAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductAction::Views => write!(f, "views"),
            ProductAction::Purchases => write!(f, "purchases"),
            ProductAction::CartAdds => write!(f, "cartAdds"),
        }
    }
}

impl std::str::FromStr for ProductAction {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "views" => Ok(ProductAction::Views),
            "purchases" => Ok(ProductAction::Purchases),
            "cartAdds" => Ok(ProductAction::CartAdds),
            other => Err(AnalyticsError::validation(
                "action",
                format!("unknown product action '{}'", other),
            )),
        }
    }
}

/// Payload for a page-view event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageViewData {
    pub page: String,
}

/// Payload for a payment event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentData {
    pub amount: f64,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
}

/// Payload for a subscription event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionData {
    pub plan_id: String,
    pub amount: f64,
}

/// Payload for a product-interaction event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInteractionData {
    pub product_id: String,
    pub action: ProductAction,
}

/// Payload for a caller-named generic event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenericEventData {
    /// Caller-supplied event name (e.g. "time_on_page", "button_click")
    pub name: String,
    /// Arbitrary structured payload supplied by the caller
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub data: Value,
}

/// Kind-specific event payload
///
/// Serialized untagged; the `kind` field on [`Event`] carries the
/// discriminant on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventPayload {
    PageView(PageViewData),
    Payment(PaymentData),
    Subscription(SubscriptionData),
    ProductInteraction(ProductInteractionData),
    Generic(GenericEventData),
}

/// An immutable event in the analytics log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Kind of event
    pub kind: EventKind,

    /// When the event occurred
    pub timestamp: DateTime<Utc>,

    /// Engine session tag (one per engine instance)
    pub session_id: String,

    /// User that produced the event, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    /// Kind-specific payload
    pub payload: EventPayload,
}

impl Event {
    /// Create a new event stamped with the current time
    pub fn new(
        kind: EventKind,
        session_id: String,
        user_id: Option<String>,
        payload: EventPayload,
    ) -> Self {
        Self::with_timestamp(kind, Utc::now(), session_id, user_id, payload)
    }

    /// Create a new event with an explicit timestamp (for imports)
    pub fn with_timestamp(
        kind: EventKind,
        timestamp: DateTime<Utc>,
        session_id: String,
        user_id: Option<String>,
        payload: EventPayload,
    ) -> Self {
        Self {
            kind,
            timestamp,
            session_id,
            user_id,
            payload,
        }
    }

    /// Serialize event to a JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize event from a JSON string
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}
