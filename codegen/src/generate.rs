use crate::{CodegenError, LLM, Snippet, parse_snippets};

/// Ask the model for snippets and parse its answer.
pub fn generate<L>(prompt: &str, llm: &mut L) -> Result<Vec<Snippet>, CodegenError>
where
    L: LLM,
    CodegenError: From<L::Error>,
{
    let content = llm.chat(prompt)?;
    tracing::debug!(%content, "Generated code");

    let snippets = parse_snippets(&content)?;
    tracing::info!(count = snippets.len(), "Received snippets");

    Ok(snippets)
}
