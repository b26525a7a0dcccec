//! Multipart upload extraction.
//!
//! The upload is read fully into memory once. The `file` field becomes an
//! immutable [`Bytes`] buffer; every other field is kept as text and parsed
//! on demand by [`UploadForm::field`].

use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;

use axum::extract::multipart::{Multipart, MultipartError, MultipartRejection};
use bytes::Bytes;

use pf_core::Error;

/// Name of the multipart field carrying the image.
pub const FILE_FIELD: &str = "file";

/// A fully-read multipart form.
#[derive(Debug, Default)]
pub struct UploadForm {
    file: Option<Bytes>,
    fields: HashMap<String, String>,
}

impl UploadForm {
    /// Drain `multipart` into memory.
    ///
    /// Accepts the extractor result directly so that a request that is not
    /// multipart at all is reported like any other validation failure.
    pub async fn read(multipart: Result<Multipart, MultipartRejection>) -> pf_core::Result<Self> {
        let mut multipart = multipart.map_err(|e| Error::Validation(e.body_text()))?;
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };
            if name == FILE_FIELD {
                let data = field.bytes().await.map_err(multipart_error)?;
                tracing::trace!("upload: {} bytes in {FILE_FIELD}", data.len());
                form.file = Some(data);
            } else {
                let text = field.text().await.map_err(multipart_error)?;
                form.fields.insert(name, text);
            }
        }

        Ok(form)
    }

    /// The uploaded image.
    pub fn file(&self) -> pf_core::Result<Bytes> {
        self.file
            .clone()
            .ok_or_else(|| Error::Validation("File is missing".into()))
    }

    /// Parse the scalar field `name`.
    pub fn field<T>(&self, name: &str) -> pf_core::Result<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        let raw = self
            .fields
            .get(name)
            .ok_or_else(|| Error::Validation(format!("{name} is missing")))?;
        raw.trim()
            .parse()
            .map_err(|e| Error::Validation(format!("{name}: invalid value {raw:?}: {e}")))
    }
}

fn multipart_error(e: MultipartError) -> Error {
    Error::Validation(format!("invalid multipart body: {}", e.body_text()))
}
