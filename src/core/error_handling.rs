//! Generic error handling utilities
//!
//! Provides unified error reporting across the domain error types while
//! keeping user-facing output short.

/// Trait for errors that can distinguish between user-actionable and system errors
///
/// # Implementation Consistency
/// When `is_user_actionable()` returns `true`, `user_message()` should return
/// `Some(message)` with a helpful, actionable message. When it returns `false`,
/// `user_message()` should return `None`.
pub trait ContextualError: std::error::Error {
    /// Returns true if this error carries a message the user can act on
    ///
    /// Examples of user-actionable errors:
    /// - No API key configured
    /// - No file selected before upload
    /// - Invalid configuration values
    ///
    /// Examples of system errors:
    /// - IO failures reading the scanned file
    /// - Storage directory not writable
    fn is_user_actionable(&self) -> bool;

    /// Returns the specific user message if this is a user-actionable error
    fn user_message(&self) -> Option<&str>;
}

/// Log errors with appropriate detail level based on error specificity
///
/// User-actionable errors log their own message; system errors log the
/// operation context and keep the detail at debug level.
///
/// # Examples
/// ```rust,no_run
/// # use vtdesk::core::error_handling::log_error_with_context;
/// # use vtdesk::scanner::ScanError;
/// let err = ScanError::MissingCredential;
/// log_error_with_context(&err, "Uploading file");
/// // Logs: "You haven't set your API key yet!"
/// ```
pub fn log_error_with_context<E: ContextualError + std::fmt::Display + std::fmt::Debug>(
    error: &E,
    operation_context: &str,
) {
    match error.user_message() {
        Some(user_msg) if error.is_user_actionable() => log::error!("{}", user_msg),
        _ => log::error!("{} failed: {}", operation_context, error),
    }
    log::debug!("DEBUG_DETAILS: {:?}", error);
}

/// Message suitable for direct display to the user
///
/// Actionable errors show their own message; anything else is prefixed with
/// the operation that failed.
pub fn display_message<E: ContextualError + std::fmt::Display>(
    error: &E,
    operation_context: &str,
) -> String {
    match error.user_message() {
        Some(user_msg) if error.is_user_actionable() => user_msg.to_string(),
        _ => format!("{} failed: {}", operation_context, error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    // Test error type for user-actionable errors
    #[derive(Debug)]
    struct TestUserError {
        message: String,
    }

    impl fmt::Display for TestUserError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}", self.message)
        }
    }

    impl std::error::Error for TestUserError {}

    impl ContextualError for TestUserError {
        fn is_user_actionable(&self) -> bool {
            true
        }

        fn user_message(&self) -> Option<&str> {
            Some(&self.message)
        }
    }

    // Test error type for system errors
    #[derive(Debug)]
    struct TestSystemError {
        internal_details: String,
    }

    impl fmt::Display for TestSystemError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "System error: {}", self.internal_details)
        }
    }

    impl std::error::Error for TestSystemError {}

    impl ContextualError for TestSystemError {
        fn is_user_actionable(&self) -> bool {
            false
        }

        fn user_message(&self) -> Option<&str> {
            None
        }
    }

    #[test]
    fn test_user_actionable_error_shows_specific_message() {
        let error = TestUserError {
            message: "You haven't selected a file yet!".to_string(),
        };

        assert!(error.is_user_actionable());
        assert_eq!(
            display_message(&error, "Uploading file"),
            "You haven't selected a file yet!"
        );
        log_error_with_context(&error, "Uploading file");
    }

    #[test]
    fn test_system_error_uses_generic_context() {
        let error = TestSystemError {
            internal_details: "Permission denied".to_string(),
        };

        assert!(!error.is_user_actionable());
        assert_eq!(
            display_message(&error, "Saving history"),
            "Saving history failed: System error: Permission denied"
        );
    }
}
