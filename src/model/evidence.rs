//! Documentary evidence for defending a disputed order.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde_json::{Map, Value};

use crate::error::{Result, WorldpayError};

/// Largest document the gateway accepts, in bytes.
pub const MAX_FILE_SIZE: usize = 4_000_000;

/// Minimum number of seconds the gateway requires between evidence
/// uploads for the same dispute.
pub const MIN_UPLOAD_INTERVAL: u64 = 600;

/// File extensions the gateway accepts as evidence.
pub const FILE_EXTENSIONS: &[&str] =
    &["zip", "doc", "docx", "jpg", "jpeg", "png", "gif", "tiff", "pdf", "txt"];

/// A document submitted in defence of a dispute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evidence {
    document_name: String,
    document_data: String,
}

impl Evidence {
    /// Builds evidence from raw file contents, validating size and
    /// extension before base64-encoding the body.
    ///
    /// # Errors
    ///
    /// Returns [`WorldpayError::Validation`] for an empty file, a file
    /// over [`MAX_FILE_SIZE`], or an extension outside
    /// [`FILE_EXTENSIONS`].
    pub fn from_file(filename: &str, contents: &[u8]) -> Result<Self> {
        if contents.is_empty() {
            return Err(WorldpayError::Validation("evidence file cannot be empty".into()));
        }
        if contents.len() > MAX_FILE_SIZE {
            return Err(WorldpayError::Validation(format!(
                "evidence file size ({} bytes) exceeds maximum ({MAX_FILE_SIZE} bytes)",
                contents.len()
            )));
        }
        let extension = filename.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase());
        let permitted = extension
            .as_deref()
            .is_some_and(|ext| FILE_EXTENSIONS.contains(&ext));
        if !permitted {
            return Err(WorldpayError::Validation(format!(
                "evidence file extension ({:?}) invalid; permitted extensions: {}",
                extension.unwrap_or_default(),
                FILE_EXTENSIONS.join(", ")
            )));
        }

        Ok(Self {
            document_name: filename.to_owned(),
            document_data: BASE64.encode(contents),
        })
    }

    /// Builds evidence from already-encoded document data.
    #[must_use]
    pub fn new(document_name: &str, document_data_base64: &str) -> Self {
        Self {
            document_name: document_name.to_owned(),
            document_data: document_data_base64.to_owned(),
        }
    }

    /// Returns the document filename.
    #[must_use]
    pub fn document_name(&self) -> &str {
        &self.document_name
    }

    /// Returns the base64-encoded document body.
    #[must_use]
    pub fn document_data(&self) -> &str {
        &self.document_data
    }

    /// Renders the evidence as a dispute-defence request body.
    #[must_use]
    pub fn parameters(&self) -> Map<String, Value> {
        let mut params = Map::new();
        params.insert("documentName".into(), self.document_name.clone().into());
        params.insert("documentDataInBase64".into(), self.document_data.clone().into());
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_file_encodes_contents() {
        let evidence = Evidence::from_file("receipt.pdf", b"%PDF-1.4 fake").unwrap();
        assert_eq!(evidence.document_name(), "receipt.pdf");
        assert_eq!(evidence.document_data(), BASE64.encode(b"%PDF-1.4 fake"));
        let params = evidence.parameters();
        assert_eq!(params["documentName"], "receipt.pdf");
        assert_eq!(params["documentDataInBase64"], evidence.document_data());
    }

    #[test]
    fn test_empty_file_rejected() {
        let err = Evidence::from_file("receipt.pdf", b"").unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_oversize_file_rejected() {
        let big = vec![0_u8; MAX_FILE_SIZE + 1];
        let err = Evidence::from_file("receipt.pdf", &big).unwrap_err();
        assert!(err.to_string().contains("exceeds maximum"));
    }

    #[test]
    fn test_extension_whitelist() {
        assert!(Evidence::from_file("evidence.exe", b"MZ").is_err());
        assert!(Evidence::from_file("no_extension", b"data").is_err());
        // Extensions are matched case-insensitively.
        assert!(Evidence::from_file("SCAN.PDF", b"data").is_ok());
    }
}
