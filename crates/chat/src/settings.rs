//! Settings read from the process environment and a `.env` file.

use std::collections::HashMap;

use llama_chat_openai_model::{OpenAIConfig, OpenAIConfigBuilder};

pub const API_KEY_VAR: &str = "LLAMA_API_KEY";
pub const BASE_URL_VAR: &str = "LLAMA_BASE_URL";
pub const MODEL_VAR: &str = "LLAMA_MODEL";
pub const LOG_FILTER_VAR: &str = "RUST_LOG";

/// Collects the variables of a `.env` file. Lines that fail to parse are
/// skipped.
pub fn collect_dotenv<I>(items: I) -> HashMap<String, String>
where
    I: IntoIterator<Item = dotenvy::Result<(String, String)>>,
{
    items.into_iter().filter_map(Result::ok).collect()
}

/// Looks variables up in `process` first, then in the `.env` variables.
pub fn layered<'a, F>(
    process: F,
    dotenv: &'a HashMap<String, String>,
) -> impl Fn(&str) -> Option<String> + 'a
where
    F: Fn(&str) -> Option<String> + 'a,
{
    move |name: &str| process(name).or_else(|| dotenv.get(name).cloned())
}

/// Builds the provider configuration, `None` if the API key is not set.
pub fn config_from_env(
    get: impl Fn(&str) -> Option<String>,
) -> Option<OpenAIConfig> {
    let mut config = OpenAIConfigBuilder::with_api_key(get(API_KEY_VAR)?);
    if let Some(base_url) = get(BASE_URL_VAR) {
        config = config.with_base_url(base_url);
    }
    if let Some(model) = get(MODEL_VAR) {
        config = config.with_model(model);
    }
    Some(config.build())
}
