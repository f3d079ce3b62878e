//! ---
//! fcp_section: "02-driver-contract"
//! fcp_subsection: "module"
//! fcp_type: "source"
//! fcp_scope: "code"
//! fcp_description: "Driver contract and shared domain types."
//! fcp_version: "v0.0.0-prealpha"
//! fcp_owner: "tbd"
//! ---
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One side of a forwarding construct: a port on a network element.
///
/// Value type; two refs are equal iff both identifiers are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EndpointRef {
    /// Identifier of the network element hosting the port.
    pub element_id: String,
    /// Port identifier, unique within its element.
    pub port_id: String,
}

impl EndpointRef {
    pub fn new(element_id: impl Into<String>, port_id: impl Into<String>) -> Self {
        Self {
            element_id: element_id.into(),
            port_id: port_id.into(),
        }
    }
}

impl fmt::Display for EndpointRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.element_id, self.port_id)
    }
}

/// Intent to establish (or remove) point-to-point connectivity between
/// two endpoints. Produced by the change-notification layer; the
/// coordinator treats it as read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectivityRequest {
    /// Stable request identifier, the key for activation status records.
    pub id: String,
    /// The A side of the construct.
    pub endpoint_a: EndpointRef,
    /// The Z side of the construct.
    pub endpoint_z: EndpointRef,
    /// Service attributes (bandwidth profile, vlan mapping, ...), opaque
    /// to the coordinator and handed through to drivers.
    #[serde(default)]
    pub attributes: IndexMap<String, Value>,
}

impl ConnectivityRequest {
    pub fn new(id: impl Into<String>, endpoint_a: EndpointRef, endpoint_z: EndpointRef) -> Self {
        Self {
            id: id.into(),
            endpoint_a,
            endpoint_z,
            attributes: IndexMap::new(),
        }
    }

    /// Attach a service attribute, builder style.
    pub fn with_attribute(mut self, key: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_equality_is_by_value() {
        let a = EndpointRef::new("n1", "p1");
        let b = EndpointRef::new("n1", "p1");
        let c = EndpointRef::new("n1", "p2");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.to_string(), "n1/p1");
    }

    #[test]
    fn request_round_trips_through_json() {
        let req = ConnectivityRequest::new(
            "fc-1",
            EndpointRef::new("n1", "p1"),
            EndpointRef::new("n2", "p2"),
        )
        .with_attribute("vlan", serde_json::json!(100));
        let encoded = serde_json::to_string(&req).unwrap();
        let decoded: ConnectivityRequest = serde_json::from_str(&encoded).unwrap();
        assert_eq!(req, decoded);
    }
}
