//! Registration settings

use crate::delivery::{DeliveryContext, Looper};

const DEFAULT_LABEL: &str = "session-events";

/// Settings for one registration
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// Where the controller delivers notifications
    /// Default: inline on the notifying thread
    pub delivery: DeliveryContext,

    /// Attached to every log event of the registration
    /// Default: "session-events"
    pub label: String,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            delivery: DeliveryContext::inline(),
            label: DEFAULT_LABEL.to_string(),
        }
    }
}

impl DispatchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delivery(mut self, delivery: DeliveryContext) -> Self {
        self.delivery = delivery;
        self
    }

    /// Deliver on the given looper's thread
    pub fn on_looper(self, looper: &Looper) -> Self {
        self.with_delivery(looper.context())
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DispatchConfig::default();
        assert_eq!(config.label, "session-events");
        assert_eq!(config.delivery.name(), "inline");
    }

    #[test]
    fn test_on_looper_uses_looper_context() {
        let looper = Looper::spawn("config-looper").unwrap();
        let config = DispatchConfig::new().on_looper(&looper).with_label("now-playing");

        assert_eq!(config.delivery.name(), "config-looper");
        assert_eq!(config.label, "now-playing");
    }
}
