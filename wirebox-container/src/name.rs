//! Dependency names and the reserved-name guard.
//!
//! Dependencies are identified by plain string names. A handful of names
//! belong to the container's own operations and can never be registered.

use tracing::debug;

use crate::error::{ForbiddenNameError, Result, WireboxError};

/// Names of container operations. Registering under one of these fails
/// with [`WireboxError::NameForbidden`], and asking a factory context for
/// one fails with [`WireboxError::IncorrectInvocation`].
pub const RESERVED_NAMES: &[&str] = &["add", "get", "update", "extend", "merge", "clone", "has"];

/// Returns `true` if `name` is a reserved operation name.
///
/// # Examples
/// ```
/// use wirebox_container::name::is_reserved;
///
/// assert!(is_reserved("update"));
/// assert!(!is_reserved("logger"));
/// ```
#[inline]
pub fn is_reserved(name: &str) -> bool {
    RESERVED_NAMES.contains(&name)
}

/// Rejects reserved names at registration time.
pub(crate) fn ensure_allowed(name: &str) -> Result<()> {
    if is_reserved(name) {
        debug!(name, "Rejected reserved dependency name");
        return Err(WireboxError::NameForbidden(ForbiddenNameError {
            name: name.to_string(),
        }));
    }
    Ok(())
}

/// Rejects reserved names looked up through a factory context.
pub(crate) fn ensure_not_operation(name: &str) -> Result<()> {
    if is_reserved(name) {
        debug!(name, "Container operation requested from inside a factory");
        return Err(WireboxError::IncorrectInvocation {
            operation: name.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_operation_is_reserved() {
        for name in ["add", "get", "update", "extend", "merge", "clone", "has"] {
            assert!(is_reserved(name), "{name} should be reserved");
        }
    }

    #[test]
    fn reserved_check_is_case_sensitive() {
        assert!(!is_reserved("Add"));
        assert!(!is_reserved("getter"));
    }

    #[test]
    fn ensure_allowed_errors() {
        assert!(ensure_allowed("logger").is_ok());
        match ensure_allowed("merge") {
            Err(WireboxError::NameForbidden(e)) => assert_eq!(e.name, "merge"),
            other => panic!("Expected NameForbidden, got: {other:?}"),
        }
    }

    #[test]
    fn ensure_not_operation_errors() {
        assert!(ensure_not_operation("logger").is_ok());
        assert!(matches!(
            ensure_not_operation("add"),
            Err(WireboxError::IncorrectInvocation { operation }) if operation == "add"
        ));
    }
}
