use std::path::{Component, Path};

use serde_json::error::Category;

use crate::{CodegenError, model::UsageExample, utils::strip_code_fence};

/// One generated file: `code` is written verbatim to `<dir>/<name>`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct Snippet {
    pub name: String,
    pub code: String,
}

impl Snippet {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
        }
    }

    fn validate(&self, index: usize) -> Result<(), CodegenError> {
        let invalid = |reason: &str| {
            CodegenError::ResponseFormat(format!(
                "snippet #{index} has an invalid name '{}': {reason}",
                self.name
            ))
        };

        if self.name.trim().is_empty() {
            return Err(invalid("name is empty"));
        }
        if self.name.ends_with(['/', '\\']) {
            return Err(invalid("must name a file, not a directory"));
        }
        let path = Path::new(&self.name);
        for component in path.components() {
            match component {
                Component::Normal(_) | Component::CurDir => {}
                Component::ParentDir => return Err(invalid("must not contain '..'")),
                Component::RootDir | Component::Prefix(_) => {
                    return Err(invalid("must be a relative path"));
                }
            }
        }
        match path.components().next_back() {
            Some(Component::Normal(_)) => Ok(()),
            _ => Err(invalid("must name a file, not a directory")),
        }
    }
}

impl UsageExample for Snippet {
    fn generate_example() -> String {
        let entities = [
            Self::new("<relative file name, e.g. main.py>", "<full contents of the file>"),
            Self::new("<another file name>", "<its contents>"),
        ];

        serde_json::to_string(&entities).unwrap_or_default()
    }
}

/// Parse the model's answer as a JSON array of snippets.
///
/// Every element must carry string `name` and `code` fields, and every name
/// must stay inside the target directory.
pub fn parse_snippets(text: &str) -> Result<Vec<Snippet>, CodegenError> {
    let snippets: Vec<Snippet> =
        serde_json::from_str(strip_code_fence(text)).map_err(|err| match err.classify() {
            Category::Data => CodegenError::ResponseFormat(format!(
                "expected an array of {{name, code}} objects: {err}"
            )),
            _ => CodegenError::ResponseFormat(format!("response is not valid JSON: {err}")),
        })?;

    for (i, snippet) in snippets.iter().enumerate() {
        snippet.validate(i)?;
    }

    Ok(snippets)
}
