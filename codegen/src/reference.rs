use std::{
    fs,
    path::{Path, PathBuf},
};

use walkdir::WalkDir;

use crate::CodegenError;

/// A reference file handed to the model alongside the prompt.
#[derive(PartialEq, Eq, Debug, Clone)]
struct ReferenceFile {
    path: PathBuf,
    content: String,
}

/// Existing files whose contents are prepended to the prompt.
#[derive(PartialEq, Eq, Debug, Clone, Default)]
pub struct ReferenceContext {
    files: Vec<ReferenceFile>,
}

impl ReferenceContext {
    /// Read every given file, and every file below every given directory.
    pub fn load<P: AsRef<Path>>(paths: &[P]) -> Result<Self, CodegenError> {
        let mut files = Vec::new();
        for path in paths {
            let path = path.as_ref();
            if path.is_dir() {
                for entry in WalkDir::new(path).sort_by_file_name() {
                    let entry = entry.map_err(|err| CodegenError::PromptFile {
                        path: err.path().unwrap_or(path).to_path_buf(),
                        source: err.into(),
                    })?;
                    if entry.file_type().is_file() {
                        files.push(read_reference(entry.path())?);
                    }
                }
            } else {
                files.push(read_reference(path)?);
            }
        }

        tracing::debug!(count = files.len(), "Loaded reference files");
        Ok(Self { files })
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn to_prompt(&self) -> String {
        let mut outcome = String::new();
        for file in &self.files {
            outcome.push_str(&format!("\n=== {} ===\n", file.path.display()));
            outcome.push_str(&file.content);
            outcome.push('\n');
        }

        outcome
    }

    /// Wrap the user's request with the reference files, if there are any.
    pub fn apply(&self, prompt: &str) -> String {
        if self.is_empty() {
            return prompt.to_string();
        }
        format!(
            "Reference files:\n{}\n\nBased on these files and the request:\n{prompt}",
            self.to_prompt()
        )
    }
}

fn read_reference(path: &Path) -> Result<ReferenceFile, CodegenError> {
    let content = fs::read_to_string(path).map_err(|source| CodegenError::PromptFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(ReferenceFile {
        path: path.to_path_buf(),
        content,
    })
}
