//! Push notification callback URL value object.

use std::fmt;

use super::SubscriptionError;

/// Absolute `http`/`https` URL the billing platform calls for every event.
///
/// The original string is kept byte for byte: the platform echoes back what
/// it was given, and verification compares exact strings, so the
/// normalized form from `url::Url` must not leak into registration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CallbackUrl(String);

impl CallbackUrl {
    pub fn parse(raw: impl Into<String>) -> Result<Self, SubscriptionError> {
        let raw = raw.into();
        let parsed = url::Url::parse(&raw)
            .map_err(|e| SubscriptionError::InvalidCallback(format!("{raw}: {e}")))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(SubscriptionError::InvalidCallback(format!(
                "{raw}: unsupported scheme '{}'",
                parsed.scheme()
            )));
        }
        if parsed.host_str().map_or(true, str::is_empty) {
            return Err(SubscriptionError::InvalidCallback(format!(
                "{raw}: missing host"
            )));
        }

        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CallbackUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
