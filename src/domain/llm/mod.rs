//! Chat completion domain models and traits

mod function_call;
mod message;
mod provider;
mod request;
mod response;

pub use function_call::{choice_function_arguments, CodeArguments};
pub use message::{Message, MessageRole};
pub use provider::LlmProvider;
pub use request::{LlmRequest, LlmRequestBuilder};
pub use response::{FinishReason, FunctionCall, LlmResponse, ToolCall, Usage};

#[cfg(test)]
pub use provider::mock::MockLlmProvider;
