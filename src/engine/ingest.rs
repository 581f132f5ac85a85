//! Ingestion operations
//!
//! Each operation validates its inputs first, then appends one event and
//! updates the matching counters in a single critical section. A validation
//! failure leaves the log and counters untouched.

use serde_json::Value;

use crate::types::{
    Event, EventKind, EventPayload, GenericEventData, PageViewData, PaymentData, ProductAction,
    ProductInteractionData, SubscriptionData,
};

use super::{AnalyticsEngine, AnalyticsError, AnalyticsResult};

pub(crate) fn record_page_view(
    engine: &AnalyticsEngine,
    page: &str,
    user_id: Option<&str>,
) -> AnalyticsResult<()> {
    let page = required("page", page)?;
    let user_id = optional("userId", user_id)?;

    engine.apply(Event::new(
        EventKind::PageView,
        engine.session_id().to_string(),
        user_id,
        EventPayload::PageView(PageViewData { page }),
    ));
    Ok(())
}

pub(crate) fn record_event(
    engine: &AnalyticsEngine,
    name: &str,
    data: Value,
    user_id: Option<&str>,
) -> AnalyticsResult<()> {
    let name = required("event", name)?;
    let user_id = optional("userId", user_id)?;

    engine.apply(Event::new(
        EventKind::Generic,
        engine.session_id().to_string(),
        user_id,
        EventPayload::Generic(GenericEventData { name, data }),
    ));
    Ok(())
}

pub(crate) fn record_payment(
    engine: &AnalyticsEngine,
    amount: f64,
    success: bool,
    user_id: Option<&str>,
    product_id: Option<&str>,
) -> AnalyticsResult<()> {
    let amount = non_negative("amount", amount)?;
    let user_id = optional("userId", user_id)?;
    let product_id = optional("productId", product_id)?;

    engine.apply(Event::new(
        EventKind::Payment,
        engine.session_id().to_string(),
        user_id,
        EventPayload::Payment(PaymentData {
            amount,
            success,
            product_id,
        }),
    ));
    Ok(())
}

pub(crate) fn record_subscription(
    engine: &AnalyticsEngine,
    plan_id: &str,
    user_id: &str,
    amount: f64,
) -> AnalyticsResult<()> {
    let plan_id = required("planId", plan_id)?;
    let user_id = required("userId", user_id)?;
    let amount = non_negative("amount", amount)?;

    engine.apply(Event::new(
        EventKind::Subscription,
        engine.session_id().to_string(),
        Some(user_id),
        EventPayload::Subscription(SubscriptionData { plan_id, amount }),
    ));
    Ok(())
}

pub(crate) fn record_product_interaction(
    engine: &AnalyticsEngine,
    product_id: &str,
    action: ProductAction,
    user_id: Option<&str>,
) -> AnalyticsResult<()> {
    let product_id = required("productId", product_id)?;
    let user_id = optional("userId", user_id)?;

    engine.apply(Event::new(
        EventKind::ProductInteraction,
        engine.session_id().to_string(),
        user_id,
        EventPayload::ProductInteraction(ProductInteractionData { product_id, action }),
    ));
    Ok(())
}

/// Replay a list of events through the live state transition
///
/// Events are validated up front so a bad entry leaves the engine unchanged.
pub(crate) fn import_events(
    engine: &AnalyticsEngine,
    events: Vec<Event>,
) -> AnalyticsResult<usize> {
    for event in &events {
        validate_event(event)?;
    }

    let count = events.len();
    let mut state = engine.state().write();
    for event in events {
        state.apply(event, engine.config().max_events);
    }
    drop(state);

    tracing::info!(count, "imported events");
    Ok(count)
}

fn validate_event(event: &Event) -> AnalyticsResult<()> {
    match &event.payload {
        EventPayload::PageView(data) => {
            required("page", &data.page)?;
        }
        EventPayload::Payment(data) => {
            non_negative("amount", data.amount)?;
        }
        EventPayload::Subscription(data) => {
            required("planId", &data.plan_id)?;
            non_negative("amount", data.amount)?;
        }
        EventPayload::ProductInteraction(data) => {
            required("productId", &data.product_id)?;
        }
        EventPayload::Generic(data) => {
            required("event", &data.name)?;
        }
    }
    Ok(())
}

fn required(field: &'static str, value: &str) -> AnalyticsResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AnalyticsError::validation(field, "must not be empty"));
    }
    Ok(trimmed.to_string())
}

fn optional(field: &'static str, value: Option<&str>) -> AnalyticsResult<Option<String>> {
    value.map(|v| required(field, v)).transpose()
}

fn non_negative(field: &'static str, amount: f64) -> AnalyticsResult<f64> {
    if !amount.is_finite() {
        return Err(AnalyticsError::validation(field, "must be a finite number"));
    }
    if amount < 0.0 {
        return Err(AnalyticsError::validation(field, "must be non-negative"));
    }
    Ok(amount)
}
