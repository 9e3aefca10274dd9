//! Event — an immutable record of something that happened.
//!
//! Events are produced when entities appear, their state changes, or a
//! service is called against them.

use serde::{Deserialize, Serialize};

use crate::id::{EntityId, EventId};
use crate::time::{Timestamp, now};

/// The kind of occurrence an [`Event`] records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    EntityCreated,
    StateChanged,
    ServiceCalled,
}

/// An immutable occurrence record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub event_type: EventType,
    /// The entity this event concerns, if any.
    pub entity_id: Option<EntityId>,
    /// Free-form payload (old/new state, service name, …).
    pub data: serde_json::Value,
    pub timestamp: Timestamp,
}

impl Event {
    /// Create a new event stamped with the current time.
    #[must_use]
    pub fn new(event_type: EventType, entity_id: Option<EntityId>, data: serde_json::Value) -> Self {
        Self {
            id: EventId::new(),
            event_type,
            entity_id,
            data,
            timestamp: now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_stamp_new_events_with_fresh_id() {
        let a = Event::new(EventType::StateChanged, None, serde_json::json!({}));
        let b = Event::new(EventType::StateChanged, None, serde_json::json!({}));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn should_carry_entity_id_and_payload() {
        let entity_id = EntityId::new();
        let event = Event::new(
            EventType::ServiceCalled,
            Some(entity_id),
            serde_json::json!({"service": "lock"}),
        );
        assert_eq!(event.entity_id, Some(entity_id));
        assert_eq!(event.data["service"], "lock");
    }

    #[test]
    fn should_serialize_event_type_as_snake_case() {
        let json = serde_json::to_string(&EventType::StateChanged).unwrap();
        assert_eq!(json, "\"state_changed\"");
    }

    #[test]
    fn should_roundtrip_through_serde_json() {
        let event = Event::new(
            EventType::EntityCreated,
            Some(EntityId::new()),
            serde_json::json!({"entity_id": "lock.test_lock"}),
        );
        let json = serde_json::to_string(&event).unwrap();
        let parsed: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, event);
    }
}
