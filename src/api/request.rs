use std::collections::BTreeMap;
use tracing::debug;
use crate::api::types::*;
use crate::error::{FixError, Result};

/// Language labels the analysis tool advertises to the model.
pub const SUPPORTED_LANGUAGES: [&str; 5] = ["go", "python", "javascript", "java", "c++"];

pub const ANALYSIS_TOOL_NAME: &str = "perform_code_analysis";

const SYSTEM_PROMPT: &str = "You are an expert code debugging assistant. Analyze the provided code, \
identify errors, and provide a corrected version with explanations. \
Use structured JSON output format.";

pub fn build_fix_request(code: &str, model: &str, temperature: f32) -> ChatRequest {
    let messages = vec![
        Message::system(SYSTEM_PROMPT),
        Message::user(format!("Analyze and fix this code:\n```\n{}\n```", code)),
    ];

    ChatRequest {
        model: model.to_string(),
        messages,
        tools: vec![analysis_tool()],
        response_format: Some(ResponseFormat {
            kind: "json_schema".to_string(),
            json_schema: JsonSchema { schema: fix_schema() },
        }),
        temperature,
        stream: false,
    }
}

fn analysis_tool() -> Tool {
    let mut properties = BTreeMap::new();
    properties.insert("code".to_string(), Property::string().described("The code to analyze"));
    properties.insert(
        "language".to_string(),
        Property::string()
            .described("Programming language of the code")
            .one_of(&SUPPORTED_LANGUAGES),
    );

    Tool {
        kind: "function".to_string(),
        function: FunctionDef {
            name: ANALYSIS_TOOL_NAME.to_string(),
            description: "Analyzes code for errors and suggests fixes".to_string(),
            parameters: ObjectSchema {
                kind: "object".to_string(),
                properties,
                required: vec!["code".to_string(), "language".to_string()],
            },
        },
    }
}

fn fix_schema() -> ObjectSchema {
    let properties = ["original_code", "fixed_code", "explanation", "language", "error_type"]
        .into_iter()
        .map(|name| (name.to_string(), Property::string()))
        .collect();

    ObjectSchema {
        kind: "object".to_string(),
        properties,
        required: ["fixed_code", "explanation", "language", "error_type"]
            .into_iter()
            .map(String::from)
            .collect(),
    }
}

/// Turn the first choice of a response into a [`CodeFix`].
///
/// The requested schema is only a hint to the server, so anything that does
/// not decode into the fix shape is reported as a parse failure. The
/// `original_code` field always comes from `original`, never from the model.
pub fn parse_fix(response: &ChatResponse, original: &str) -> Result<CodeFix> {
    let message = &response
        .choices
        .first()
        .ok_or_else(|| FixError::ResponseParseFailure("response contained no choices".into()))?
        .message;

    if let Some(calls) = &message.tool_calls {
        for call in calls {
            debug!(tool = %call.function.name, arguments = %call.function.arguments, "ignoring advisory tool call");
        }
    }

    let content = message
        .content
        .as_deref()
        .ok_or_else(|| FixError::ResponseParseFailure("first choice has no message content".into()))?;

    let mut fix: CodeFix = serde_json::from_str(content)
        .map_err(|e| FixError::ResponseParseFailure(e.to_string()))?;

    if fix.fixed_code.trim().is_empty() {
        return Err(FixError::ResponseParseFailure("fixed_code is empty".into()));
    }

    fix.original_code = original.to_string();
    Ok(fix)
}
