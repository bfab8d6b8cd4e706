//! Kill Bill bus event types.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Event type identifier carried in the `eventType` field of a push
/// notification.
///
/// The known variants mirror the platform's external bus event types.
/// Anything else is kept verbatim in [`EventType::Other`] so that newer
/// platform events still decode.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventType {
    AccountCreation,
    AccountChange,
    BlockingState,
    BroadcastService,
    SubscriptionCreation,
    SubscriptionPhase,
    SubscriptionChange,
    SubscriptionCancel,
    SubscriptionUncancel,
    SubscriptionBcdChange,
    EntitlementCreation,
    EntitlementCancel,
    BundlePause,
    BundleResume,
    OverdueChange,
    InvoiceCreation,
    InvoiceAdjustment,
    InvoiceNotification,
    InvoicePaymentSuccess,
    InvoicePaymentFailed,
    PaymentSuccess,
    PaymentFailed,
    TagCreation,
    TagDeletion,
    CustomFieldCreation,
    CustomFieldDeletion,
    TenantConfigChange,
    TenantConfigDeletion,
    /// Unrecognized event type.
    Other(String),
}

impl EventType {
    /// Every event type the gateway knows by name.
    pub const KNOWN: [EventType; 28] = [
        EventType::AccountCreation,
        EventType::AccountChange,
        EventType::BlockingState,
        EventType::BroadcastService,
        EventType::SubscriptionCreation,
        EventType::SubscriptionPhase,
        EventType::SubscriptionChange,
        EventType::SubscriptionCancel,
        EventType::SubscriptionUncancel,
        EventType::SubscriptionBcdChange,
        EventType::EntitlementCreation,
        EventType::EntitlementCancel,
        EventType::BundlePause,
        EventType::BundleResume,
        EventType::OverdueChange,
        EventType::InvoiceCreation,
        EventType::InvoiceAdjustment,
        EventType::InvoiceNotification,
        EventType::InvoicePaymentSuccess,
        EventType::InvoicePaymentFailed,
        EventType::PaymentSuccess,
        EventType::PaymentFailed,
        EventType::TagCreation,
        EventType::TagDeletion,
        EventType::CustomFieldCreation,
        EventType::CustomFieldDeletion,
        EventType::TenantConfigChange,
        EventType::TenantConfigDeletion,
    ];

    /// Parse the wire identifier. Never fails.
    pub fn parse(s: &str) -> Self {
        match s {
            "ACCOUNT_CREATION" => Self::AccountCreation,
            "ACCOUNT_CHANGE" => Self::AccountChange,
            "BLOCKING_STATE" => Self::BlockingState,
            "BROADCAST_SERVICE" => Self::BroadcastService,
            "SUBSCRIPTION_CREATION" => Self::SubscriptionCreation,
            "SUBSCRIPTION_PHASE" => Self::SubscriptionPhase,
            "SUBSCRIPTION_CHANGE" => Self::SubscriptionChange,
            "SUBSCRIPTION_CANCEL" => Self::SubscriptionCancel,
            "SUBSCRIPTION_UNCANCEL" => Self::SubscriptionUncancel,
            "SUBSCRIPTION_BCD_CHANGE" => Self::SubscriptionBcdChange,
            "ENTITLEMENT_CREATION" => Self::EntitlementCreation,
            "ENTITLEMENT_CANCEL" => Self::EntitlementCancel,
            "BUNDLE_PAUSE" => Self::BundlePause,
            "BUNDLE_RESUME" => Self::BundleResume,
            "OVERDUE_CHANGE" => Self::OverdueChange,
            "INVOICE_CREATION" => Self::InvoiceCreation,
            "INVOICE_ADJUSTMENT" => Self::InvoiceAdjustment,
            "INVOICE_NOTIFICATION" => Self::InvoiceNotification,
            "INVOICE_PAYMENT_SUCCESS" => Self::InvoicePaymentSuccess,
            "INVOICE_PAYMENT_FAILED" => Self::InvoicePaymentFailed,
            "PAYMENT_SUCCESS" => Self::PaymentSuccess,
            "PAYMENT_FAILED" => Self::PaymentFailed,
            "TAG_CREATION" => Self::TagCreation,
            "TAG_DELETION" => Self::TagDeletion,
            "CUSTOM_FIELD_CREATION" => Self::CustomFieldCreation,
            "CUSTOM_FIELD_DELETION" => Self::CustomFieldDeletion,
            "TENANT_CONFIG_CHANGE" => Self::TenantConfigChange,
            "TENANT_CONFIG_DELETION" => Self::TenantConfigDeletion,
            other => Self::Other(other.to_string()),
        }
    }

    /// Wire identifier for this event type.
    pub fn as_str(&self) -> &str {
        match self {
            Self::AccountCreation => "ACCOUNT_CREATION",
            Self::AccountChange => "ACCOUNT_CHANGE",
            Self::BlockingState => "BLOCKING_STATE",
            Self::BroadcastService => "BROADCAST_SERVICE",
            Self::SubscriptionCreation => "SUBSCRIPTION_CREATION",
            Self::SubscriptionPhase => "SUBSCRIPTION_PHASE",
            Self::SubscriptionChange => "SUBSCRIPTION_CHANGE",
            Self::SubscriptionCancel => "SUBSCRIPTION_CANCEL",
            Self::SubscriptionUncancel => "SUBSCRIPTION_UNCANCEL",
            Self::SubscriptionBcdChange => "SUBSCRIPTION_BCD_CHANGE",
            Self::EntitlementCreation => "ENTITLEMENT_CREATION",
            Self::EntitlementCancel => "ENTITLEMENT_CANCEL",
            Self::BundlePause => "BUNDLE_PAUSE",
            Self::BundleResume => "BUNDLE_RESUME",
            Self::OverdueChange => "OVERDUE_CHANGE",
            Self::InvoiceCreation => "INVOICE_CREATION",
            Self::InvoiceAdjustment => "INVOICE_ADJUSTMENT",
            Self::InvoiceNotification => "INVOICE_NOTIFICATION",
            Self::InvoicePaymentSuccess => "INVOICE_PAYMENT_SUCCESS",
            Self::InvoicePaymentFailed => "INVOICE_PAYMENT_FAILED",
            Self::PaymentSuccess => "PAYMENT_SUCCESS",
            Self::PaymentFailed => "PAYMENT_FAILED",
            Self::TagCreation => "TAG_CREATION",
            Self::TagDeletion => "TAG_DELETION",
            Self::CustomFieldCreation => "CUSTOM_FIELD_CREATION",
            Self::CustomFieldDeletion => "CUSTOM_FIELD_DELETION",
            Self::TenantConfigChange => "TENANT_CONFIG_CHANGE",
            Self::TenantConfigDeletion => "TENANT_CONFIG_DELETION",
            Self::Other(s) => s,
        }
    }

    /// Returns true if this is one of the named platform event types.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<&str> for EventType {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for EventType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EventType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::parse(&s))
    }
}
