//! Language model interface

use async_trait::async_trait;

use crate::{GenerateRequest, GenerateResponse, Result};

/// A remote text generation capability
///
/// Implementations make exactly one request per `generate` call. Retries,
/// if any, are the caller's business.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Generate a completion for the request
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse>;

    /// Model identifier for logging
    fn model_name(&self) -> &str;
}
