//! Input stage: load the HTML file into memory as a string.
//!
//! ## Why read bytes and validate UTF-8 by hand?
//!
//! `tokio::fs::read_to_string` folds an encoding failure into a generic
//! `InvalidData` io error with no position information. Reading raw bytes
//! and running the validation ourselves lets the error carry the byte
//! offset of the first invalid sequence, which is what an operator needs
//! to fix a mis-encoded file.

use crate::error::Html2WordError;
use std::path::Path;
use tracing::debug;

/// Read the input file's full text content.
///
/// Fails with a read-stage error when the path does not exist, is not
/// readable, or does not contain valid UTF-8. One file-system read, no
/// retries — a failure here aborts the run.
pub async fn read_html(path: &Path) -> Result<String, Html2WordError> {
    let bytes = tokio::fs::read(path).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::PermissionDenied => Html2WordError::PermissionDenied {
            path: path.to_path_buf(),
        },
        _ => Html2WordError::FileNotFound {
            path: path.to_path_buf(),
        },
    })?;

    let html = String::from_utf8(bytes).map_err(|e| Html2WordError::InvalidEncoding {
        path: path.to_path_buf(),
        valid_up_to: e.utf8_error().valid_up_to(),
    })?;

    debug!("Read {} bytes of HTML from {}", html.len(), path.display());
    Ok(html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn reads_utf8_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.html");
        std::fs::write(&path, "<p>héllo</p>").unwrap();

        let html = read_html(&path).await.expect("read should succeed");
        assert_eq!(html, "<p>héllo</p>");
    }

    #[tokio::test]
    async fn missing_file_is_file_not_found() {
        let err = read_html(Path::new("/definitely/not/here.html"))
            .await
            .unwrap_err();
        assert!(matches!(err, Html2WordError::FileNotFound { .. }));
        assert_eq!(err.stage(), "read");
    }

    #[tokio::test]
    async fn invalid_utf8_reports_offset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.html");
        let mut f = std::fs::File::create(&path).unwrap();
        // "ab" followed by a lone 0xE9 (Latin-1 'é', invalid as UTF-8)
        f.write_all(&[b'a', b'b', 0xE9, b'c']).unwrap();
        drop(f);

        let err = read_html(&path).await.unwrap_err();
        match err {
            Html2WordError::InvalidEncoding { valid_up_to, .. } => {
                assert_eq!(valid_up_to, 2);
            }
            other => panic!("expected InvalidEncoding, got: {other}"),
        }
    }

    #[tokio::test]
    async fn empty_file_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.html");
        std::fs::write(&path, "").unwrap();

        let html = read_html(&path).await.expect("empty file is valid input");
        assert!(html.is_empty());
    }
}
