use std::{fmt, str::FromStr};

pub mod openai;

pub trait LLM {
    type Error: std::error::Error + Send + Sync + 'static;

    fn chat(&mut self, message: &str) -> Result<String, Self::Error>;
}

/// Chat models the generator is allowed to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChatModel {
    Gpt4o,
    #[default]
    Gpt4oMini,
    O1,
    O1Mini,
}

impl ChatModel {
    pub const ALL: [ChatModel; 4] = [
        ChatModel::Gpt4o,
        ChatModel::Gpt4oMini,
        ChatModel::O1,
        ChatModel::O1Mini,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChatModel::Gpt4o => "gpt-4o",
            ChatModel::Gpt4oMini => "gpt-4o-mini",
            ChatModel::O1 => "o1",
            ChatModel::O1Mini => "o1-mini",
        }
    }

    /// Role used to deliver the system instruction, `None` when the model
    /// accepts no instruction role and it has to ride along in the user turn.
    pub fn instruction_role(&self) -> Option<&'static str> {
        match self {
            ChatModel::Gpt4o | ChatModel::Gpt4oMini => Some("system"),
            ChatModel::O1 => Some("developer"),
            ChatModel::O1Mini => None,
        }
    }
}

impl fmt::Display for ChatModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug)]
pub struct UnknownModel(String);

impl fmt::Display for UnknownModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = ChatModel::ALL.map(|model| model.as_str());
        write!(
            f,
            "unknown model '{}', expected one of: {}",
            self.0,
            names.join(", ")
        )
    }
}

impl std::error::Error for UnknownModel {}

impl FromStr for ChatModel {
    type Err = UnknownModel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChatModel::ALL
            .into_iter()
            .find(|model| model.as_str() == s)
            .ok_or_else(|| UnknownModel(s.to_string()))
    }
}
