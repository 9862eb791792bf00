//! CLI utilities for ferro-overlap
//!
//! This module provides testable functions used by the CLI binary.
//! Output goes through a generic writer so it can be captured in tests.

pub mod format;

pub use format::{output_error, output_feature, output_ids, output_overlap, OutputFormat};

/// Whether an argument names an existing local file rather than an accession.
///
/// # Examples
///
/// ```
/// use ferro_overlap::cli::is_local_path;
///
/// assert!(!is_local_path("AAC21905"));
/// ```
pub fn is_local_path(arg: &str) -> bool {
    std::path::Path::new(arg).is_file()
}

/// Process exit code for a batch: failure only if every item failed.
///
/// # Examples
///
/// ```
/// use ferro_overlap::cli::batch_exit_code;
///
/// assert_eq!(batch_exit_code(3, 1), 0);
/// assert_eq!(batch_exit_code(2, 2), 1);
/// assert_eq!(batch_exit_code(0, 0), 0);
/// ```
pub fn batch_exit_code(total: usize, failed: usize) -> i32 {
    if total > 0 && failed == total {
        1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_is_local_path() {
        let file = NamedTempFile::new().unwrap();
        assert!(is_local_path(file.path().to_str().unwrap()));
        assert!(!is_local_path("L42023.1"));
    }

    #[test]
    fn test_batch_exit_code() {
        assert_eq!(batch_exit_code(1, 0), 0);
        assert_eq!(batch_exit_code(1, 1), 1);
        assert_eq!(batch_exit_code(5, 4), 0);
    }
}
