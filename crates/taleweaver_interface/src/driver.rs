//! Completion backend abstraction.

use async_trait::async_trait;
use std::sync::Arc;
use taleweaver_core::{GenerateRequest, GenerateResponse};
use taleweaver_error::TaleweaverResult;

/// A text-completion backend.
///
/// Implementations turn a [`GenerateRequest`] into generated output or fail.
/// Callers treat the backend as opaque: no retries, no streaming.
#[async_trait]
pub trait TaleweaverDriver: Send + Sync {
    /// Generate a response for the request.
    async fn generate(&self, req: &GenerateRequest) -> TaleweaverResult<GenerateResponse>;

    /// Provider name for logs and metrics (e.g. "gemini").
    fn provider_name(&self) -> &'static str;

    /// Model the driver sends requests to.
    fn model_name(&self) -> &str;
}

#[async_trait]
impl<D> TaleweaverDriver for Arc<D>
where
    D: TaleweaverDriver + ?Sized,
{
    async fn generate(&self, req: &GenerateRequest) -> TaleweaverResult<GenerateResponse> {
        (**self).generate(req).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}
