//! Inbound billing event decoded from a push notification body.

use serde_json::Value;
use thiserror::Error;

use super::EventType;

/// Wire name of the event type field.
pub const EVENT_TYPE_FIELD: &str = "eventType";

/// Reasons a delivery body could not be turned into a [`BillingEvent`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Empty request body")]
    EmptyBody,

    #[error("Malformed JSON: {0}")]
    MalformedJson(String),

    #[error("Event body must be a JSON object")]
    NotAnObject,

    #[error("Missing field: eventType")]
    MissingEventType,

    #[error("Field eventType must be a string")]
    InvalidEventType,
}

/// One lifecycle notification delivered by the billing platform.
///
/// The full JSON document is retained so that responses can echo it back
/// unchanged; typed accessors cover the fields the platform always sends.
#[derive(Debug, Clone, PartialEq)]
pub struct BillingEvent {
    event_type: EventType,
    payload: Value,
}

impl BillingEvent {
    /// Decode a raw delivery body.
    pub fn decode(body: &[u8]) -> Result<Self, DecodeError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(DecodeError::EmptyBody);
        }
        let payload: Value = serde_json::from_slice(body)
            .map_err(|e| DecodeError::MalformedJson(e.to_string()))?;
        Self::from_value(payload)
    }

    /// Build an event from an already parsed JSON document.
    pub fn from_value(payload: Value) -> Result<Self, DecodeError> {
        let object = payload.as_object().ok_or(DecodeError::NotAnObject)?;
        let event_type = match object.get(EVENT_TYPE_FIELD) {
            None | Some(Value::Null) => return Err(DecodeError::MissingEventType),
            Some(Value::String(s)) => EventType::parse(s),
            Some(_) => return Err(DecodeError::InvalidEventType),
        };
        Ok(Self {
            event_type,
            payload,
        })
    }

    pub fn event_type(&self) -> &EventType {
        &self.event_type
    }

    /// The delivered document, exactly as received.
    pub fn payload(&self) -> &Value {
        &self.payload
    }

    pub fn into_payload(self) -> Value {
        self.payload
    }

    /// Kind of object the event refers to (`ACCOUNT`, `INVOICE`, ...).
    pub fn object_type(&self) -> Option<&str> {
        self.str_field("objectType")
    }

    pub fn object_id(&self) -> Option<&str> {
        self.str_field("objectId")
    }

    pub fn account_id(&self) -> Option<&str> {
        self.str_field("accountId")
    }

    pub fn tenant_id(&self) -> Option<&str> {
        self.str_field("tenantId")
    }

    /// Free-form metadata string attached by the platform, if any.
    pub fn meta_data(&self) -> Option<&str> {
        self.str_field("metaData")
    }

    fn str_field(&self, name: &str) -> Option<&str> {
        self.payload.get(name).and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_known_event_and_keeps_payload() {
        let body = br#"{"eventType": "ACCOUNT_CREATION", "acct": 42}"#;
        let event = BillingEvent::decode(body).unwrap();

        assert_eq!(event.event_type(), &EventType::AccountCreation);
        assert_eq!(
            event.payload(),
            &json!({"eventType": "ACCOUNT_CREATION", "acct": 42})
        );
    }

    #[test]
    fn decodes_unknown_event_type() {
        let event = BillingEvent::decode(br#"{"eventType": "NOT_A_REAL_TYPE"}"#).unwrap();
        assert_eq!(
            event.event_type(),
            &EventType::Other("NOT_A_REAL_TYPE".to_string())
        );
    }

    #[test]
    fn exposes_bus_event_fields() {
        let event = BillingEvent::from_value(json!({
            "eventType": "INVOICE_CREATION",
            "objectType": "INVOICE",
            "objectId": "inv-1",
            "accountId": "acc-1",
            "tenantId": "ten-1",
            "metaData": null
        }))
        .unwrap();

        assert_eq!(event.object_type(), Some("INVOICE"));
        assert_eq!(event.object_id(), Some("inv-1"));
        assert_eq!(event.account_id(), Some("acc-1"));
        assert_eq!(event.tenant_id(), Some("ten-1"));
        assert_eq!(event.meta_data(), None);
    }

    #[test]
    fn payload_keeps_big_integers_and_key_order() {
        let body = r#"{"zeta":1,"eventType":"NOT_A_REAL_TYPE","big":123456789012345678901234567890}"#;
        let event = BillingEvent::decode(body.as_bytes()).unwrap();

        assert_eq!(event.payload().to_string(), body);
    }

    #[test]
    fn missing_event_type_is_rejected() {
        assert_eq!(
            BillingEvent::decode(br#"{"acct": 42}"#),
            Err(DecodeError::MissingEventType)
        );
        assert_eq!(
            BillingEvent::decode(br#"{"eventType": null}"#),
            Err(DecodeError::MissingEventType)
        );
    }

    #[test]
    fn non_string_event_type_is_rejected() {
        assert_eq!(
            BillingEvent::decode(br#"{"eventType": 7}"#),
            Err(DecodeError::InvalidEventType)
        );
    }

    #[test]
    fn non_object_body_is_rejected() {
        assert_eq!(
            BillingEvent::decode(br#"["ACCOUNT_CREATION"]"#),
            Err(DecodeError::NotAnObject)
        );
    }

    #[test]
    fn malformed_and_empty_bodies_are_rejected() {
        assert!(matches!(
            BillingEvent::decode(b"{not json"),
            Err(DecodeError::MalformedJson(_))
        ));
        assert_eq!(BillingEvent::decode(b""), Err(DecodeError::EmptyBody));
        assert_eq!(BillingEvent::decode(b"  \n"), Err(DecodeError::EmptyBody));
    }
}
