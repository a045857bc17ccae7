//! Common test utilities.
//!
//! Fixtures live in [`fixtures`]; the assertion macros below match on
//! [`directory_core::DirectoryError`] variants.

pub mod fixtures;

pub use fixtures::*;

/// Assert that a result failed with the given `DirectoryError` variant pattern.
#[macro_export]
macro_rules! assert_directory_error {
    ($result:expr, $error_variant:pat) => {
        match $result {
            Err($error_variant) => {}
            Ok(_) => panic!(
                "Expected error {}, but the operation succeeded",
                stringify!($error_variant)
            ),
            Err(other) => panic!(
                "Expected error {}, got {:?}",
                stringify!($error_variant),
                other
            ),
        }
    };
}

/// Assert that an error's message contains a substring.
#[macro_export]
macro_rules! assert_error_message_contains {
    ($result:expr, $substring:expr) => {
        match $result {
            Err(err) => assert!(
                err.to_string().contains($substring),
                "Error message '{}' does not contain '{}'",
                err,
                $substring
            ),
            Ok(_) => panic!(
                "Expected error containing '{}', but the operation succeeded",
                $substring
            ),
        }
    };
}
