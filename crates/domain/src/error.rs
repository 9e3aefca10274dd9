//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`NookError`]
//! via `#[from]` at the boundary. Adapter crates wrap their vendor errors in
//! [`NookError::Integration`]; storage adapters use [`NookError::Storage`].

/// Top-level error for the nook workspace.
#[derive(Debug, thiserror::Error)]
pub enum NookError {
    /// A domain invariant was violated.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// A referenced entity, device, or service does not exist.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// An integration could not finish its setup yet; the host should
    /// retry later instead of registering a broken entity.
    #[error("not ready")]
    NotReady(#[from] NotReadyError),

    /// An integration's vendor call failed.
    #[error("integration error")]
    Integration(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A storage adapter failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// A domain invariant was violated while building or mutating a value.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A device name must not be empty.
    #[error("name must not be empty")]
    EmptyName,

    /// An entity id must not be empty.
    #[error("entity id must not be empty")]
    EmptyEntityId,

    /// An entity id must be of the form `domain.object_id`.
    #[error("entity id {entity_id:?} has no domain prefix")]
    MissingDomain {
        /// The offending entity id.
        entity_id: String,
    },

    /// A service call addressed an entity outside its domain.
    #[error("entity {entity_id:?} does not belong to domain {domain:?}")]
    DomainMismatch {
        /// The domain of the service call.
        domain: String,
        /// The addressed entity id.
        entity_id: String,
    },

    /// A service call's data is missing a required field.
    #[error("required service field {field:?} is missing or invalid")]
    MissingField {
        /// Name of the missing field.
        field: &'static str,
    },
}

/// A lookup failed.
#[derive(Debug, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    /// The kind of thing that was looked up (e.g. `"Entity"`).
    pub entity: &'static str,
    /// The identifier that failed to resolve.
    pub id: String,
}

/// An integration signalled that setup should be retried later.
#[derive(Debug, thiserror::Error)]
#[error("integration {integration} is not ready")]
pub struct NotReadyError {
    /// Name of the integration that is not ready.
    pub integration: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_not_found_with_entity_and_id() {
        let err = NotFoundError {
            entity: "Entity",
            id: "vacuum.kitchen".to_string(),
        };
        assert_eq!(err.to_string(), "Entity vacuum.kitchen not found");
    }

    #[test]
    fn should_display_not_ready_with_integration_name() {
        let err = NotReadyError {
            integration: "vacuum",
        };
        assert_eq!(err.to_string(), "integration vacuum is not ready");
    }

    #[test]
    fn should_convert_validation_error_into_nook_error() {
        let err: NookError = ValidationError::EmptyName.into();
        assert!(matches!(err, NookError::Validation(_)));
    }

    #[test]
    fn should_convert_not_ready_error_into_nook_error() {
        let err: NookError = NotReadyError {
            integration: "vacuum",
        }
        .into();
        assert!(matches!(err, NookError::NotReady(_)));
    }

    #[test]
    fn should_display_domain_mismatch_with_both_parts() {
        let err = ValidationError::DomainMismatch {
            domain: "lock".to_string(),
            entity_id: "vacuum.kitchen".to_string(),
        };
        assert!(err.to_string().contains("lock"));
        assert!(err.to_string().contains("vacuum.kitchen"));
    }
}
