use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use crate::CodegenError;

const KEY_DIR: &str = ".mingdaoai";
const KEY_FILE: &str = "openai.key";

/// OpenAI API key read from a single-line key file.
#[derive(Clone)]
pub struct ApiKey(String);

impl ApiKey {
    /// `~/.mingdaoai/openai.key`
    pub fn default_path() -> Result<PathBuf, CodegenError> {
        dirs::home_dir()
            .map(|home| home.join(KEY_DIR).join(KEY_FILE))
            .ok_or_else(|| CodegenError::Credential {
                path: PathBuf::from("~").join(KEY_DIR).join(KEY_FILE),
                reason: "home directory could not be determined".to_string(),
            })
    }

    pub fn load(path: &Path) -> Result<Self, CodegenError> {
        let content = fs::read_to_string(path).map_err(|err| CodegenError::Credential {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;

        let key = content.trim();
        if key.is_empty() {
            return Err(CodegenError::Credential {
                path: path.to_path_buf(),
                reason: "key file is empty".to_string(),
            });
        }

        Ok(Self(key.to_string()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}
