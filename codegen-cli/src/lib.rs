use std::borrow::Cow;

use clap::{CommandFactory, Parser};
use codegen::{
    ApiKey, PromptSource, ReferenceContext, SystemPromptTemplate, generate,
    openai::OpenAi, write_snippets,
};

use crate::cli::Cli;

mod cli;
pub mod telemetry;

pub fn run() -> anyhow::Result<()> {
    let args = Cli::parse();

    // resolve the prompt
    let source = match PromptSource::from_args(args.text_prompt, args.file_prompt) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("{}", Cli::command().render_help());
            return Err(err.into());
        }
    };
    let prompt = source.resolve()?;
    let prompt = ReferenceContext::load(&args.input)?.apply(&prompt);

    // load credential
    let key_path = match args.key_file {
        Some(path) => path,
        None => ApiKey::default_path()?,
    };
    let api_key = ApiKey::load(&key_path)?;

    // create llm instance
    let model = args.model;
    let system_instruction = SystemPromptTemplate::default().render()?;
    let mut llm = OpenAi::new(api_key.expose(), model, Some(Cow::Owned(system_instruction)))?
        .with_base_url(args.api_base_url);

    tracing::info!(%model, "Generating code");
    let snippets = generate(&prompt, &mut llm)?;

    for path in write_snippets(&args.output_dir, &snippets)? {
        println!("Created: {}", path.display());
    }

    Ok(())
}
