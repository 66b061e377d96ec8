use std::ops::BitOr;

use serde::{Deserialize, Serialize};

use crate::domain::value::Tariff;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
/// Set of operations a connector offers to the host.
pub struct Capabilities(u8);

impl Capabilities {
    pub const NONE: Self = Self(0);
    /// The connector can fetch the account balance.
    pub const UPDATE: Self = Self(1);
    /// The connector can send messages.
    pub const SEND: Self = Self(1 << 1);
    /// The connector has a preference screen.
    pub const PREFS: Self = Self(1 << 2);

    /// Whether every flag in `other` is set.
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn bits(self) -> u8 {
        self.0
    }
}

impl BitOr for Capabilities {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Readiness of a connector, recomputed from preferences on every update.
pub enum ConnectorStatus {
    /// Disabled in preferences.
    #[default]
    Inactive,
    /// Enabled, but credentials are missing.
    Enabled,
    /// Enabled with credentials; requests can be issued.
    Ready,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One selectable variant of a connector, shown by the host next to the connector name.
pub struct SubConnector {
    pub id: Tariff,
    pub label: String,
    pub priority: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Descriptor a connector hands to its host.
///
/// Created once by `init_spec`; afterwards only the status and the balance change.
pub struct ConnectorSpec {
    name: String,
    author: Option<String>,
    capabilities: Capabilities,
    sub_connectors: Vec<SubConnector>,
    status: ConnectorStatus,
    balance: Option<String>,
}

impl ConnectorSpec {
    /// Create an inactive descriptor without capabilities or sub-connectors.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            author: None,
            capabilities: Capabilities::NONE,
            sub_connectors: Vec::new(),
            status: ConnectorStatus::Inactive,
            balance: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    pub fn set_author(&mut self, author: impl Into<String>) {
        self.author = Some(author.into());
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn set_capabilities(&mut self, capabilities: Capabilities) {
        self.capabilities = capabilities;
    }

    pub fn has_capability(&self, capability: Capabilities) -> bool {
        self.capabilities.contains(capability)
    }

    /// Register a sub-connector. A second registration with the same id replaces the first.
    pub fn add_sub_connector(&mut self, id: Tariff, label: impl Into<String>, priority: i32) {
        let entry = SubConnector {
            id,
            label: label.into(),
            priority,
        };
        match self.sub_connectors.iter_mut().find(|it| it.id == id) {
            Some(existing) => *existing = entry,
            None => self.sub_connectors.push(entry),
        }
    }

    /// Sub-connectors in registration order.
    pub fn sub_connectors(&self) -> &[SubConnector] {
        &self.sub_connectors
    }

    pub fn sub_connector(&self, id: Tariff) -> Option<&SubConnector> {
        self.sub_connectors.iter().find(|it| it.id == id)
    }

    pub fn status(&self) -> ConnectorStatus {
        self.status
    }

    pub fn set_status(&mut self, status: ConnectorStatus) {
        self.status = status;
    }

    pub fn set_ready(&mut self) {
        self.status = ConnectorStatus::Ready;
    }

    pub fn is_ready(&self) -> bool {
        self.status == ConnectorStatus::Ready
    }

    /// Last balance reported by the gateway, already formatted for display.
    pub fn balance(&self) -> Option<&str> {
        self.balance.as_deref()
    }

    pub fn set_balance(&mut self, balance: Option<String>) {
        self.balance = balance;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capabilities_combine_and_query() {
        let caps = Capabilities::UPDATE | Capabilities::SEND;
        assert!(caps.contains(Capabilities::UPDATE));
        assert!(caps.contains(Capabilities::SEND));
        assert!(!caps.contains(Capabilities::PREFS));
        assert!(caps.contains(Capabilities::NONE));
        assert_eq!(caps.bits(), 0b011);
    }

    #[test]
    fn sub_connectors_keep_order_and_replace_by_id() {
        let mut spec = ConnectorSpec::new("test");
        spec.add_sub_connector(Tariff::WithoutSender, "a", 0);
        spec.add_sub_connector(Tariff::WithSender, "b", 0);
        spec.add_sub_connector(Tariff::WithoutSender, "c", 1);

        let ids = spec
            .sub_connectors()
            .iter()
            .map(|it| it.id)
            .collect::<Vec<_>>();
        assert_eq!(ids, vec![Tariff::WithoutSender, Tariff::WithSender]);
        assert_eq!(
            spec.sub_connector(Tariff::WithoutSender).map(|it| it.label.as_str()),
            Some("c")
        );
    }

    #[test]
    fn new_spec_is_inactive_without_balance() {
        let mut spec = ConnectorSpec::new("test");
        assert_eq!(spec.status(), ConnectorStatus::Inactive);
        assert_eq!(spec.balance(), None);

        spec.set_ready();
        assert!(spec.is_ready());
    }

    #[test]
    fn spec_serializes_tariff_ids_and_status() {
        let mut spec = ConnectorSpec::new("test");
        spec.add_sub_connector(Tariff::WithSender, "with sender", 0);
        spec.set_status(ConnectorStatus::Enabled);

        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["status"], "enabled");
        assert_eq!(json["sub_connectors"][0]["id"], "2");

        let back: ConnectorSpec = serde_json::from_value(json).unwrap();
        assert_eq!(back, spec);
    }
}
