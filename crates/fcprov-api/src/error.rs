//! ---
//! fcp_section: "02-driver-contract"
//! fcp_subsection: "module"
//! fcp_type: "source"
//! fcp_scope: "code"
//! fcp_description: "Driver contract and shared domain types."
//! fcp_version: "v0.0.0-prealpha"
//! fcp_owner: "tbd"
//! ---
use crate::endpoint::EndpointRef;

/// Outcome of driver resolution that is not "exactly one match".
///
/// Both variants are configuration problems, not process faults: a
/// missing driver needs a plugin installed, an ambiguous one needs a
/// duplicate install removed. They are kept distinct so operators can
/// tell the two apart from the failure message alone.
#[derive(Debug, thiserror::Error)]
pub enum ResolutionError {
    /// No registered factory claims the endpoint.
    #[error("no activation driver found for {endpoint}")]
    NotFound {
        /// Endpoint that nothing matched.
        endpoint: EndpointRef,
    },
    /// More than one factory claims the endpoint.
    #[error("{matches} activation drivers claim {endpoint}")]
    Ambiguous {
        /// Endpoint with conflicting claims.
        endpoint: EndpointRef,
        /// How many factories matched.
        matches: usize,
    },
}

/// Failures raised while preparing or gating an activation attempt.
///
/// All variants are captured at the coordinator boundary and converted
/// into a failed [`ActivationResult`](crate::result::ActivationResult);
/// they never cross the public API as panics. Transaction execution
/// failures are not represented here — they surface through the
/// aggregated result and are the only failures recorded as `Failed`.
#[derive(Debug, thiserror::Error)]
pub enum ActivationError {
    /// Driver resolution failed for an endpoint.
    #[error(transparent)]
    Resolution(#[from] ResolutionError),
    /// Remote construct where only one side resolved a driver.
    #[error("drivers required for both ends: {a} and {z}")]
    BothEndsRequired {
        /// The A-side endpoint.
        a: EndpointRef,
        /// The Z-side endpoint.
        z: EndpointRef,
    },
    /// A driver's `initialize` refused the endpoint pair.
    #[error("driver initialization failed: {0}")]
    DriverInitialization(String),
    /// Operation is not legal for the request's current status.
    #[error("illegal state: {0}")]
    IllegalState(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_messages_are_distinct() {
        let ep = EndpointRef::new("n1", "p1");
        let not_found = ResolutionError::NotFound {
            endpoint: ep.clone(),
        };
        let ambiguous = ResolutionError::Ambiguous {
            endpoint: ep,
            matches: 2,
        };
        assert_eq!(
            not_found.to_string(),
            "no activation driver found for n1/p1"
        );
        assert_eq!(ambiguous.to_string(), "2 activation drivers claim n1/p1");
    }
}
