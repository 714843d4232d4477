use std::{collections::HashMap, fs, path::PathBuf};

use dynfmt::Format;

use crate::{
    CodegenError,
    model::{UsageExample, snippet::Snippet},
};

const DEFAULT_TEMPLATE: &str = "You are a helpful programming assistant. \
Generate code based on the prompt and return a JSON array where each element has 'name' and 'code' fields. \
'name' is the relative file name the code will be saved to, 'code' is the complete file content.\n\
Output the answer only with json array format. Do not use triple quote to enclose the answer.\n\
Example output: {example_output}";

/// Where the user's prompt comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptSource {
    Text(String),
    File(PathBuf),
}

impl PromptSource {
    pub fn from_args(text: Option<String>, file: Option<PathBuf>) -> Result<Self, CodegenError> {
        match (text, file) {
            (Some(text), None) => Ok(Self::Text(text)),
            (None, Some(path)) => Ok(Self::File(path)),
            (None, None) => Err(CodegenError::Usage(
                "one of --text-prompt or --file-prompt is required".to_string(),
            )),
            (Some(_), Some(_)) => Err(CodegenError::Usage(
                "--text-prompt and --file-prompt cannot be used together".to_string(),
            )),
        }
    }

    pub fn resolve(self) -> Result<String, CodegenError> {
        match self {
            Self::Text(text) => Ok(text),
            Self::File(path) => {
                fs::read_to_string(&path).map_err(|source| CodegenError::PromptFile { path, source })
            }
        }
    }
}

pub struct SystemPromptTemplate {
    template: String,
}

impl Default for SystemPromptTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE)
    }
}

impl SystemPromptTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn render(&self) -> Result<String, anyhow::Error> {
        // placeholders: {example_output}
        let mut map: HashMap<&str, String> = HashMap::new();
        map.insert("example_output", Snippet::generate_example());

        dynfmt::SimpleCurlyFormat
            .format(&self.template, &map)
            .map(|s| s.into_owned())
            .map_err(|e| anyhow::anyhow!(e.to_string()))
    }
}
