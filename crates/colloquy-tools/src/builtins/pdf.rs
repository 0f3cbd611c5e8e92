//! Built-in tool for extracting text from PDF documents.

use crate::schema::{ParamField, ParamType, ToolSchema};
use crate::tool::Tool;
use async_trait::async_trait;
use colloquy_protocol::ToolError;
use log::debug;
use serde_json::{Map, Value, json};
use std::path::Path;

/// Default cap on extracted text length, in characters.
const DEFAULT_MAX_CHARS: usize = 20_000;

/// Tool that extracts text content from a local PDF file.
#[derive(Debug, Default)]
pub struct ReadPdfTool;

#[async_trait]
impl Tool for ReadPdfTool {
    fn name(&self) -> &str {
        "ReadPDF"
    }

    fn description(&self) -> &str {
        "Extract and analyze text content from PDF documents"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new()
            .field(ParamField::new("path", ParamType::String, "Path to the PDF file").required())
            .field(ParamField::new(
                "max_chars",
                ParamType::Integer,
                "Maximum number of characters to return",
            ))
    }

    async fn invoke(&self, args: &Map<String, Value>) -> Result<Value, ToolError> {
        let path = args["path"].as_str().unwrap_or_default();
        if path.trim().is_empty() {
            return Err(ToolError::InvalidArguments("path cannot be empty".to_string()));
        }
        if !Path::new(path).exists() {
            return Err(ToolError::ExecutionFailed(format!("file not found: {path}")));
        }
        let max_chars = args
            .get("max_chars")
            .and_then(Value::as_u64)
            .map(|max| max as usize)
            .unwrap_or(DEFAULT_MAX_CHARS);

        let document = lopdf::Document::load(path)
            .map_err(|err| ToolError::ExecutionFailed(format!("failed to open PDF: {err}")))?;
        let page_numbers: Vec<u32> = document.get_pages().keys().copied().collect();
        debug!("extracting pdf text (pages={}, max_chars={})", page_numbers.len(), max_chars);
        let text = document
            .extract_text(&page_numbers)
            .map_err(|err| ToolError::ExecutionFailed(format!("failed to extract text: {err}")))?;

        let truncated = text.chars().count() > max_chars;
        let text: String = text.chars().take(max_chars).collect();
        Ok(json!({
            "path": path,
            "pages": page_numbers.len(),
            "text": text,
            "truncated": truncated,
        }))
    }
}
