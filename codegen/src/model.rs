pub mod snippet;

/// Renders a sample of the JSON the model is expected to answer with.
pub trait UsageExample {
    fn generate_example() -> String;
}
