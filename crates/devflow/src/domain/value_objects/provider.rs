//! Provider - AI backend selector

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// AI provider used for requirement refinement calls
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Dashscope,
    Ollama,
    OpenAI,
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provider::Dashscope => write!(f, "dashscope"),
            Provider::Ollama => write!(f, "ollama"),
            Provider::OpenAI => write!(f, "openai"),
        }
    }
}

impl std::str::FromStr for Provider {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dashscope" => Ok(Provider::Dashscope),
            "ollama" => Ok(Provider::Ollama),
            "openai" => Ok(Provider::OpenAI),
            _ => Err(DomainError::unknown_variant("provider", s)),
        }
    }
}
