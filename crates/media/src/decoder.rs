//! Turning raw files into storable images.

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};

use itemforge_core::{DomainError, DomainResult};

use crate::file::RawFile;
use crate::image::EncodedImage;

/// Decodes one raw file. Implementations run inside a spawned task, one per file.
#[async_trait]
pub trait ImageDecoder: Send + Sync {
    async fn decode(&self, file: RawFile) -> DomainResult<EncodedImage>;
}

/// Default decoder: sniffs the content type and inlines the bytes as base64.
#[derive(Debug, Clone)]
pub struct DataUrlDecoder {
    max_bytes: usize,
}

impl DataUrlDecoder {
    pub fn new(max_bytes: usize) -> Self {
        Self { max_bytes }
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    fn encode(&self, name: &str, bytes: &[u8]) -> DomainResult<EncodedImage> {
        if bytes.len() > self.max_bytes {
            return Err(DomainError::decode(format!(
                "{name} is {} bytes; images may not exceed {} bytes",
                bytes.len(),
                self.max_bytes
            )));
        }

        let kind = infer::get(bytes)
            .filter(|kind| kind.matcher_type() == infer::MatcherType::Image)
            .ok_or_else(|| DomainError::decode(format!("{name} is not a recognized image")))?;

        Ok(EncodedImage::new(
            name,
            kind.mime_type(),
            general_purpose::STANDARD.encode(bytes),
        ))
    }
}

#[async_trait]
impl ImageDecoder for DataUrlDecoder {
    async fn decode(&self, file: RawFile) -> DomainResult<EncodedImage> {
        let name = file.name().to_string();
        let bytes = file.read().await?;
        let image = self.encode(&name, &bytes)?;
        tracing::debug!(file = %name, mime = image.mime_type(), bytes = bytes.len(), "image decoded");
        Ok(image)
    }
}
