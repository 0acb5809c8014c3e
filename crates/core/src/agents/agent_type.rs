//! Routing from an `llm` model name to the backend family serving it.

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AgentType {
    Claude,
    Gemini,
    OpenAi,
    Image,
    Mock,
}

impl AgentType {
    /// Infer the agent type from a model name.
    ///
    /// Image models are matched before chat models because `gpt-image-*`
    /// also starts with `gpt`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cf_core::agents::AgentType;
    ///
    /// assert_eq!(AgentType::from_model_name("claude-sonnet-4"), AgentType::Claude);
    /// assert_eq!(AgentType::from_model_name("gpt-4o-mini"), AgentType::OpenAi);
    /// assert_eq!(AgentType::from_model_name("dall-e-3"), AgentType::Image);
    /// assert_eq!(AgentType::from_model_name("unknown-model"), AgentType::Mock);
    /// ```
    pub fn from_model_name(model: &str) -> Self {
        let model_lower = model.to_lowercase();
        // Accept provider-prefixed names such as "openai/gpt-4o".
        let bare = model_lower
            .rsplit_once('/')
            .map_or(model_lower.as_str(), |(_, name)| name);

        if bare.contains("claude") {
            Self::Claude
        } else if bare.contains("gemini") {
            Self::Gemini
        } else if bare.starts_with("dall-e") || bare.starts_with("gpt-image") {
            Self::Image
        } else if bare.starts_with("gpt")
            || bare.starts_with("o1")
            || bare.starts_with("o3")
            || bare.starts_with("o4")
        {
            Self::OpenAi
        } else {
            Self::Mock
        }
    }

    /// Backend label used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Claude => "Claude",
            Self::Gemini => "Gemini",
            Self::OpenAi => "OpenAI",
            Self::Image => "Image",
            Self::Mock => "Mock",
        }
    }
}
