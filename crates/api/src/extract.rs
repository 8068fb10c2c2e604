//! Request extractors.
//!
//! [`ApiJson`], [`ApiPath`] and [`ApiQuery`] behave like their axum
//! counterparts but answer every rejection with the JSON error envelope.
//! [`MultipartForm`] buffers a multipart body into named files and fields.

use std::collections::HashMap;

use axum::extract::{FromRequest, FromRequestParts, Multipart};
use bytes::Bytes;
use misboard_core::document::UploadedFile;

use crate::error::ApiError;

/// JSON body extractor with 400 rejections.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Path parameter extractor; a malformed segment is a 400.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

/// Query string extractor with 400 rejections.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

/// A fully read multipart form.
#[derive(Debug, Default)]
pub struct MultipartForm {
    files: HashMap<String, UploadedFile>,
    fields: HashMap<String, String>,
}

impl MultipartForm {
    /// Reads every part. Parts with a filename are files; the rest are text.
    ///
    /// # Errors
    ///
    /// Returns a 400 if the body is not valid multipart.
    pub async fn read(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();

            if let Some(filename) = field.file_name().map(str::to_string) {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data: Bytes = field.bytes().await?;
                form.files.insert(
                    name,
                    UploadedFile {
                        filename,
                        content_type,
                        data,
                    },
                );
            } else {
                let value = field.text().await?;
                form.fields.insert(name, value);
            }
        }

        Ok(form)
    }

    /// Takes the file uploaded under `name`.
    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        self.files.remove(name)
    }

    /// Takes the file under `name`, or any file when the form has exactly one.
    pub fn take_single_file(&mut self, name: &str) -> Option<UploadedFile> {
        if let Some(file) = self.files.remove(name) {
            return Some(file);
        }
        if self.files.len() == 1 {
            let key = self.files.keys().next().cloned()?;
            return self.files.remove(&key);
        }
        None
    }

    /// Text value of a field, trimmed; `None` when absent or blank.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}
