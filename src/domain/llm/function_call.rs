//! Code arguments carried by a chat reply, either as a tool call or as text

use serde::{Deserialize, Serialize};

use super::LlmResponse;
use crate::domain::DomainError;

const FENCE: &str = "```";
const DEFAULT_FENCED_LANGUAGE: &str = "python";
const PLAIN_TEXT_LANGUAGE: &str = "markdown";

/// Arguments of a code-execution function call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeArguments {
    pub language: String,
    pub code: String,
}

/// Extract code arguments from the first choice of a reply.
///
/// Resolution order:
/// - first tool call: its `arguments` must be a JSON object with `language` and `code`
/// - content wrapped in a code fence: the fenced body, language from the fence tag
///   (`python` when untagged)
/// - any other non-empty content: the text itself as `markdown`
///
/// Malformed tool-call arguments are a `Validation` error; a reply with neither
/// tool calls nor content is a `Generation` error.
pub fn choice_function_arguments(response: &LlmResponse) -> Result<CodeArguments, DomainError> {
    if let Some(call) = response.tool_calls.first() {
        return serde_json::from_str(&call.function.arguments).map_err(|e| {
            DomainError::validation(format!(
                "Invalid arguments for function '{}': {}",
                call.function.name, e
            ))
        });
    }

    let content = response.content();
    if let Some(arguments) = fenced_code(content) {
        return Ok(arguments);
    }

    if content.is_empty() {
        return Err(DomainError::generation("Reply carries neither tool calls nor content"));
    }

    Ok(CodeArguments {
        language: PLAIN_TEXT_LANGUAGE.to_string(),
        code: content.to_string(),
    })
}

fn fenced_code(content: &str) -> Option<CodeArguments> {
    let body = content.strip_prefix(FENCE)?.strip_suffix(FENCE)?;

    let (tag, code) = match body.split_once(char::is_whitespace) {
        Some((tag, code)) => (tag, code.trim_start()),
        None => ("", body),
    };

    let language = if tag.is_empty() {
        DEFAULT_FENCED_LANGUAGE
    } else {
        tag
    };

    Some(CodeArguments {
        language: language.to_string(),
        code: code.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::llm::{FinishReason, Message, ToolCall};

    fn reply(content: &str) -> LlmResponse {
        LlmResponse::new(
            "chatcmpl-1".to_string(),
            "gpt-3.5-turbo".to_string(),
            Message::assistant(content),
        )
    }

    fn tool_reply(arguments: &str) -> LlmResponse {
        reply("")
            .with_finish_reason(FinishReason::ToolCalls)
            .with_tool_calls(vec![ToolCall::function("call_1", "execute", arguments)])
    }

    #[test]
    fn test_tool_call_arguments() {
        let response = tool_reply("{\n\"language\": \"python\",\n\"code\": \"print('hello world')\"}");

        let args = choice_function_arguments(&response).unwrap();

        assert_eq!(args.language, "python");
        assert!(args.code.contains("hello world"));
    }

    #[test]
    fn test_plain_content_is_markdown() {
        let response = reply("Completed a python code for hello world!");

        let args = choice_function_arguments(&response).unwrap();

        assert_eq!(args.language, "markdown");
        assert!(args.code.contains("hello world"));
    }

    #[test]
    fn test_fenced_content_is_code() {
        let response = reply("```python\nprint('hello world')```");

        let args = choice_function_arguments(&response).unwrap();

        assert_eq!(args.language, "python");
        assert_eq!(args.code, "print('hello world')");
    }

    #[test]
    fn test_untagged_fence_defaults_to_python() {
        let args = choice_function_arguments(&reply("```\nprint('hello world')\n```")).unwrap();

        assert_eq!(args.language, "python");
        assert_eq!(args.code, "print('hello world')\n");
    }

    #[test]
    fn test_malformed_tool_arguments() {
        let response = tool_reply("{\n\"language\": 'python',\n\"code\": \"print('hello world')\"}");

        let result = choice_function_arguments(&response);

        match result {
            Err(DomainError::Validation { message }) => assert!(message.contains("execute")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_reply_is_an_error() {
        let result = choice_function_arguments(&reply(""));
        assert!(matches!(result, Err(DomainError::Generation { .. })));
    }

    #[test]
    fn test_bare_fence_is_plain_text() {
        let args = choice_function_arguments(&reply("```")).unwrap();
        assert_eq!(args.language, "markdown");
    }
}
