//! ---
//! fcp_section: "01-activation-core"
//! fcp_subsection: "module"
//! fcp_type: "source"
//! fcp_scope: "code"
//! fcp_description: "Activation coordination and driver resolution."
//! fcp_version: "v0.0.0-prealpha"
//! fcp_owner: "tbd"
//! ---
use fcprov_api::EndpointRef;

/// True iff both endpoints live on the same network element, in which
/// case a single driver realizes the whole construct.
pub fn is_same_element(a: &EndpointRef, z: &EndpointRef) -> bool {
    a.element_id == z.element_id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_ignores_ports() {
        let a = EndpointRef::new("n1", "p1");
        let z_local = EndpointRef::new("n1", "p2");
        let z_remote = EndpointRef::new("n2", "p1");
        assert!(is_same_element(&a, &z_local));
        assert!(!is_same_element(&a, &z_remote));
    }
}
