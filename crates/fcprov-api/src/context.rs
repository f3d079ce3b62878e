//! ---
//! fcp_section: "02-driver-contract"
//! fcp_subsection: "module"
//! fcp_type: "source"
//! fcp_scope: "code"
//! fcp_description: "Driver contract and shared domain types."
//! fcp_version: "v0.0.0-prealpha"
//! fcp_owner: "tbd"
//! ---
use std::sync::Arc;

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::endpoint::ConnectivityRequest;

/// Blackboard handed to driver resolution and `initialize`.
///
/// Carries a typed back-reference to the full request plus namespaced
/// auxiliary entries drivers may exchange during one transaction attempt.
/// Built fresh per attempt; never shared between transactions.
#[derive(Debug, Clone, Default)]
pub struct ActivationContext {
    request: Option<Arc<ConnectivityRequest>>,
    entries: IndexMap<String, Value>,
}

impl ActivationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context pre-populated with the request being (de)activated.
    pub fn for_request(request: Arc<ConnectivityRequest>) -> Self {
        Self {
            request: Some(request),
            entries: IndexMap::new(),
        }
    }

    /// The connectivity request this attempt is realizing, when attached.
    pub fn request(&self) -> Option<&ConnectivityRequest> {
        self.request.as_deref()
    }

    /// Put a value on the blackboard. Keys are namespaced strings, e.g.
    /// `vendor-x.session`.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.entries.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Fetch and deserialize a typed payload; `None` when the key is
    /// missing or holds an incompatible shape.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.entries
            .get(key)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}
