use std::{convert::Infallible, path::PathBuf};

use codegen::{ChatModel, openai};

/// Generate code snippets with ChatGPT and save each one to its own file.
#[derive(clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Direct text prompt for code generation
    #[arg(long, conflicts_with = "file_prompt")]
    pub text_prompt: Option<String>,
    /// Path to a file containing the prompt
    #[arg(long)]
    pub file_prompt: Option<PathBuf>,
    /// Model to use (gpt-4o, gpt-4o-mini, o1, o1-mini)
    #[arg(long, default_value_t = ChatModel::default())]
    pub model: ChatModel,
    /// Reference files or directories (comma-separated) to include as context
    #[arg(long, value_delimiter = ',', value_parser = trimmed_path)]
    pub input: Vec<PathBuf>,
    /// API key file [default: ~/.mingdaoai/openai.key]
    #[arg(long, env = "CODEGEN_KEY_FILE")]
    pub key_file: Option<PathBuf>,
    /// Base URL of the OpenAI-compatible API
    #[arg(long, env = "CODEGEN_API_BASE_URL", default_value = openai::DEFAULT_BASE_URL)]
    pub api_base_url: String,
    /// Output directory for generated code
    #[arg(value_name = "DIRECTORY")]
    pub output_dir: PathBuf,
}

fn trimmed_path(value: &str) -> Result<PathBuf, Infallible> {
    Ok(PathBuf::from(value.trim()))
}
