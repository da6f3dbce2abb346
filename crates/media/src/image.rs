use serde::{Deserialize, Serialize};

use itemforge_core::ValueObject;

/// A decoded image in a storable, inlined form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedImage {
    file_name: String,
    mime_type: String,
    /// Standard base64 of the original bytes.
    payload: String,
}

impl ValueObject for EncodedImage {}

impl EncodedImage {
    pub fn new(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        payload: impl Into<String>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            payload: payload.into(),
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// `data:<mime>;base64,<payload>`, suitable for an `<img src>`.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.payload)
    }
}
