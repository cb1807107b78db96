//! Connection validation.
//!
//! Every new or reconnected edge passes through a [`ConnectionValidator`]
//! before it enters the store. Validators compose with [`CompositeValidator`].

use crate::diagram::{Connection, Edge, EdgeId, Node};
use crate::error::ConnectError;

/// Result of connection validation with optional rejection reason
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Invalid(ConnectError),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    /// Combine two results (AND logic): returns first error if any
    pub fn and(self, other: ValidationResult) -> ValidationResult {
        match self {
            ValidationResult::Valid => other,
            invalid => invalid,
        }
    }

    pub fn into_result(self) -> Result<(), ConnectError> {
        match self {
            ValidationResult::Valid => Ok(()),
            ValidationResult::Invalid(err) => Err(err),
        }
    }
}

/// Trait for custom connection validation logic.
///
/// `edges` holds the existing edges the connection would join; when an edge is
/// being reconnected it is left out of the slice.
///
/// # Example
///
/// ```ignore
/// struct OnlyFromInputs;
///
/// impl ConnectionValidator for OnlyFromInputs {
///     fn validate(&self, connection: &Connection, nodes: &[Node], _edges: &[Edge]) -> ValidationResult {
///         match nodes.iter().find(|n| n.id == connection.source) {
///             Some(n) if n.kind == NodeKind::Input => ValidationResult::Valid,
///             _ => ValidationResult::Invalid(ConnectError::Custom("source must be an input".into())),
///         }
///     }
/// }
/// ```
pub trait ConnectionValidator {
    fn validate(&self, connection: &Connection, nodes: &[Node], edges: &[Edge]) -> ValidationResult;
}

/// Rejects connections whose source or target is not in the node collection.
#[derive(Clone, Copy, Debug, Default)]
pub struct EndpointsExistValidator;

impl ConnectionValidator for EndpointsExistValidator {
    fn validate(&self, connection: &Connection, nodes: &[Node], _edges: &[Edge]) -> ValidationResult {
        for endpoint in [&connection.source, &connection.target] {
            if !nodes.iter().any(|n| &n.id == endpoint) {
                return ValidationResult::Invalid(ConnectError::MissingEndpoint(endpoint.clone()));
            }
        }
        ValidationResult::Valid
    }
}

/// Rejects a connection that repeats an existing edge's handles.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDuplicatesValidator;

impl ConnectionValidator for NoDuplicatesValidator {
    fn validate(&self, connection: &Connection, _nodes: &[Node], edges: &[Edge]) -> ValidationResult {
        match edges.iter().find(|e| e.joins(connection)) {
            Some(existing) => ValidationResult::Invalid(ConnectError::Duplicate(existing.id.clone())),
            None => ValidationResult::Valid,
        }
    }
}

/// Rejects edges from a node to itself.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoSelfLoopValidator;

impl ConnectionValidator for NoSelfLoopValidator {
    fn validate(&self, connection: &Connection, _nodes: &[Node], _edges: &[Edge]) -> ValidationResult {
        if connection.source == connection.target {
            ValidationResult::Invalid(ConnectError::SelfLoop(connection.source.clone()))
        } else {
            ValidationResult::Valid
        }
    }
}

/// Composite validator that combines multiple validators
///
/// All validators must return Valid for the connection to be valid (AND logic).
/// Returns the first error encountered.
#[derive(Default)]
pub struct CompositeValidator {
    validators: Vec<Box<dyn ConnectionValidator>>,
}

impl CompositeValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Endpoint existence plus duplicate suppression; self-loops pass.
    pub fn standard() -> Self {
        Self::new().add(EndpointsExistValidator).add(NoDuplicatesValidator)
    }

    /// Validators are checked in the order they were added.
    pub fn add<V: ConnectionValidator + 'static>(mut self, validator: V) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl ConnectionValidator for CompositeValidator {
    fn validate(&self, connection: &Connection, nodes: &[Node], edges: &[Edge]) -> ValidationResult {
        for v in &self.validators {
            let result = v.validate(connection, nodes, edges);
            if !result.is_valid() {
                return result;
            }
        }
        ValidationResult::Valid
    }
}

/// Validate a connection, ignoring the edge `replacing` (if any) when looking
/// at the existing edges.
pub fn validate_connection<V>(
    connection: &Connection,
    nodes: &[Node],
    edges: &[Edge],
    replacing: Option<&EdgeId>,
    validator: &V,
) -> ValidationResult
where
    V: ConnectionValidator + ?Sized,
{
    match replacing {
        None => validator.validate(connection, nodes, edges),
        Some(old) => {
            let others: Vec<Edge> = edges.iter().filter(|e| &e.id != old).cloned().collect();
            validator.validate(connection, nodes, &others)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
