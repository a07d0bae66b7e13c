//! Multipart form parsing helpers
//!
//! Provides reusable abstractions for parsing multipart/form-data uploads,
//! reducing code duplication across handlers.

use std::collections::HashMap;

use axum::extract::Multipart;

use crate::error::ApiError;
use crate::validation::{validate_content_type, validate_file_size};

/// Represents a file uploaded via multipart form
#[derive(Debug, Clone)]
pub struct FileField {
    /// File data bytes
    pub data: Vec<u8>,
    /// Original filename from the multipart field (if provided)
    pub file_name: Option<String>,
}

/// Parsed multipart form fields
///
/// Provides structured access to the file and text fields of a
/// multipart/form-data request. Handles Content-Type and size validation.
#[derive(Debug)]
pub struct MultipartFields {
    /// File field (named "file")
    file: Option<FileField>,
    /// Text fields indexed by name
    text_fields: HashMap<String, String>,
}

impl MultipartFields {
    /// Parse all fields from a multipart request
    pub async fn parse(multipart: &mut Multipart, max_file_size: usize) -> Result<Self, ApiError> {
        let mut file: Option<FileField> = None;
        let mut text_fields = HashMap::new();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::bad_request(format!("Failed to parse multipart: {}", e)))?
        {
            let name = field.name().unwrap_or("").to_string();

            if name == "file" {
                let content_type = field.content_type().map(|s| s.to_string());
                let file_name = field.file_name().map(|s| s.to_string());

                validate_content_type(content_type.as_deref())?;

                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Failed to read file: {}", e)))?
                    .to_vec();

                validate_file_size(data.len(), max_file_size)?;

                file = Some(FileField { data, file_name });
            } else {
                let value = field.text().await.map_err(|e| {
                    ApiError::bad_request(format!("Failed to read field '{}': {}", name, e))
                })?;
                text_fields.insert(name, value);
            }
        }

        Ok(Self { file, text_fields })
    }

    /// Get the file field (required)
    ///
    /// Returns an error if no file was uploaded.
    pub fn require_file(&self) -> Result<&FileField, ApiError> {
        self.file.as_ref().ok_or_else(|| {
            ApiError::bad_request("No file provided. Use 'file' field in multipart form.")
        })
    }

    /// Get a non-empty text field value
    ///
    /// Returns `None` if the field is missing or empty.
    pub fn get_text(&self, name: &str) -> Option<&str> {
        self.text_fields
            .get(name)
            .map(|s| s.as_str())
            .filter(|s| !s.is_empty())
    }
}
