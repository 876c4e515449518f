//! Test utilities
//!
//! Only available with the `test_tools` feature or in this crate tests.

mod temp_dir;
mod test_logger;

pub use temp_dir::TempDir;
pub use test_logger::TestLogger;

/// Compare two errors (or results holding an error) using their `Debug` representation with
/// a given pattern.
#[macro_export]
macro_rules! assert_error_matches {
    ($error:expr, $pattern:pat $(if $guard:expr)? $(,)?) => {
        let error = $error;
        assert!(
            matches!(error, $pattern $(if $guard)?),
            "expected error matching `{}`, got: {error:?}",
            stringify!($pattern)
        );
    };
}
