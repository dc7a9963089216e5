//! Common error infrastructure for rules-core.
//!
//! Resolution code is deliberately forgiving: missing references and
//! half-authored components degrade to "contributes nothing" and are only
//! reported through `tracing`. The error types here are what remains at the
//! public boundary (schema lookup, effect rolls) plus the diagnostic values
//! used when logging recovered problems.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the contribution is dropped and recomputation continues
/// - **Validation**: invalid input at a public boundary, rejected as-is
/// - **Internal**: unexpected inconsistency that should be investigated
/// - **Fatal**: programmer error, such as an unknown component type
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Recoverable,
    Validation,
    Internal,
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all rules-core errors.
pub trait RulesError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

// ============================================================================
// Schema Errors
// ============================================================================

/// Errors raised by the component schema lookup.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// The `type` discriminant is outside the closed set of component types.
    #[error("unknown component type '{0}'")]
    UnknownComponentType(String),
}

impl RulesError for SchemaError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownComponentType(_) => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownComponentType(_) => "SCHEMA_UNKNOWN_COMPONENT_TYPE",
        }
    }
}

// ============================================================================
// Resolution Errors
// ============================================================================

/// Problems found while resolving components against an actor.
///
/// These are never propagated out of recomputation; they are built so the
/// recovered problem can be logged with a stable code.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// A cross-actor, token or item reference could not be found.
    #[error("unresolved reference '{0}'")]
    UnresolvedReference(String),

    /// A component is missing or has an unusable value for a required field.
    #[error("component {component} has a malformed '{field}' field")]
    MalformedComponent {
        component: String,
        field: &'static str,
    },
}

impl RulesError for ResolveError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnresolvedReference(_) => "RESOLVE_UNRESOLVED_REFERENCE",
            Self::MalformedComponent { .. } => "RESOLVE_MALFORMED_COMPONENT",
        }
    }
}

// ============================================================================
// Roll Errors
// ============================================================================

/// Errors returned by [`resolve_effect_roll`](crate::rolls::resolve_effect_roll)
/// and the expression parser.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RollError {
    /// No effect with this id exists on the actor or its items.
    #[error("effect '{0}' not found on actor")]
    UnknownEffect(String),

    /// No skill or tool with this key exists on the actor.
    #[error("unknown check '{0}'")]
    UnknownCheck(String),

    /// A dice expression could not be parsed.
    #[error("malformed dice expression '{expr}': {reason}")]
    MalformedExpression { expr: String, reason: &'static str },
}

impl RulesError for RollError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownEffect(_)
            | Self::UnknownCheck(_)
            | Self::MalformedExpression { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownEffect(_) => "ROLL_UNKNOWN_EFFECT",
            Self::UnknownCheck(_) => "ROLL_UNKNOWN_CHECK",
            Self::MalformedExpression { .. } => "ROLL_MALFORMED_EXPRESSION",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_component_type_is_fatal() {
        let err = SchemaError::UnknownComponentType("bogus".into());
        assert_eq!(err.severity(), ErrorSeverity::Fatal);
        assert!(err.severity().is_internal());
        assert_eq!(err.error_code(), "SCHEMA_UNKNOWN_COMPONENT_TYPE");
    }

    #[test]
    fn resolve_errors_are_recoverable() {
        let err = ResolveError::MalformedComponent {
            component: "c1".into(),
            field: "ndice",
        };
        assert!(err.severity().is_recoverable());
        assert_eq!(err.to_string(), "component c1 has a malformed 'ndice' field");
    }
}
