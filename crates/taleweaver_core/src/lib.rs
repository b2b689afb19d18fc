//! Core data types for the Taleweaver story service.
//!
//! These types describe a generation request and its response independently
//! of any provider, plus the logging and metrics bootstrap shared by binaries.

mod input;
mod message;
mod observability;
mod output;
mod request;
mod role;
mod token_usage;

pub use input::Input;
pub use message::{Message, MessageBuilder};
pub use observability::{
    DEFAULT_OTLP_ENDPOINT, MetricsExporter, init_observability, init_tracing,
    shutdown_observability,
};
pub use output::Output;
pub use request::{
    GenerateRequest, GenerateRequestBuilder, GenerateResponse, GenerateResponseBuilder,
};
pub use role::Role;
pub use token_usage::TokenUsageData;
