//! MCP prompts

use crate::error::McpError;
use crate::mcp::types::{PromptArgument, PromptDefinition, PromptGetResult, PromptMessage};
use serde_json::Value;

/// Prompt registration and expansion
pub struct PromptRegistry;

impl PromptRegistry {
    /// Prompts advertised by prompts/list
    pub fn list_prompts() -> Vec<PromptDefinition> {
        vec![
            PromptDefinition {
                name: "default_prompt".to_string(),
                title: Some("Default Prompt".to_string()),
                description: Some(
                    "Answer an AWS service or region availability question with the tools"
                        .to_string(),
                ),
                arguments: vec![PromptArgument {
                    name: "query".to_string(),
                    description: Some("The question to answer".to_string()),
                    required: true,
                }],
            },
            PromptDefinition {
                name: "debug_error".to_string(),
                title: None,
                description: Some("Recover from a failed question with example queries".to_string()),
                arguments: vec![PromptArgument {
                    name: "error".to_string(),
                    description: Some("The error that was encountered".to_string()),
                    required: true,
                }],
            },
        ]
    }

    /// Expand a prompt with its arguments
    pub fn get(name: &str, arguments: Option<Value>) -> Result<PromptGetResult, McpError> {
        let args = arguments.unwrap_or(Value::Object(serde_json::Map::new()));

        match name {
            "default_prompt" => {
                let query = required_arg(&args, "query")?;
                Ok(PromptGetResult {
                    description: Some("Answer an AWS availability question".to_string()),
                    messages: vec![PromptMessage::user(format!(
                        "You have all the tools which can help you find out what AWS services \
                         are available in which regions or vice-versa. You can run recursive \
                         queries against the URI or URL in the initial response to further find \
                         out details on launch date of service in a region. Use your tools to \
                         solve all AWS regions or service related queries i.e. \n\n{}",
                        query
                    ))],
                })
            }
            "debug_error" => {
                let error = required_arg(&args, "error")?;
                Ok(PromptGetResult {
                    description: Some("Recover from a failed question".to_string()),
                    messages: vec![
                        PromptMessage::user(
                            "I can help you list what AWS services are available in which \
                             regions or vice-versa:",
                        ),
                        PromptMessage::user(error),
                        PromptMessage::assistant(
                            "For example, You can ask: \n Which AWS Services are available in \
                             ap-southeast-2 region?, or, \n Which regions Amazon Bedrock service \
                             is available in?",
                        ),
                    ],
                })
            }
            _ => Err(McpError::PromptNotFound(name.to_string())),
        }
    }
}

fn required_arg(args: &Value, name: &str) -> Result<String, McpError> {
    args.get(name)
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or_else(|| McpError::InvalidParams(format!("prompt argument '{}' is required", name)))
}
