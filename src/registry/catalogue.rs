use lazy_static::lazy_static;

use crate::models::{ModelDescriptor, Pricing};

fn entry(
    slug: &str,
    name: &str,
    context_length: u64,
    pricing: (f64, f64),
    capabilities: &[&str],
) -> ModelDescriptor {
    ModelDescriptor {
        slug: slug.to_string(),
        name: Some(name.to_string()),
        context_length: Some(context_length),
        pricing: Some(Pricing {
            input: pricing.0,
            output: pricing.1,
        }),
        capabilities: capabilities.iter().map(|c| c.to_string()).collect(),
    }
}

lazy_static! {
    // The order of this list is part of the resolution contract. A bare model name
    // resolves to the first slug ending with it, so adding an entry ahead of an
    // existing one can change what short names resolve to.
    pub(crate) static ref CATALOGUE: Vec<ModelDescriptor> = vec![
        entry("test/model-0", "Test Model 0", 8192, (0.0, 0.0), &[]),
        entry("test/model-1", "Test Model 1", 32768, (0.5, 1.0), &["reasoning", "tools"]),
        entry("test/model-2", "Test Model 2", 128000, (2.0, 4.0), &["tools"]),
        entry("openai/gpt-4o", "GPT-4o", 128000, (2.5, 10.0), &["tools", "vision", "json"]),
        entry(
            "openai/gpt-4o-mini",
            "GPT-4o mini",
            128000,
            (0.15, 0.6),
            &["tools", "vision", "json"],
        ),
        entry("openai/o3-mini", "o3-mini", 200000, (1.1, 4.4), &["reasoning", "tools", "json"]),
        entry(
            "anthropic/claude-3.5-sonnet",
            "Claude 3.5 Sonnet",
            200000,
            (3.0, 15.0),
            &["tools", "vision"],
        ),
        entry(
            "anthropic/claude-3.7-sonnet",
            "Claude 3.7 Sonnet",
            200000,
            (3.0, 15.0),
            &["reasoning", "tools", "vision"],
        ),
        entry("anthropic/claude-3.5-haiku", "Claude 3.5 Haiku", 200000, (0.8, 4.0), &["tools"]),
        entry(
            "google/gemini-2.0-flash-001",
            "Gemini 2.0 Flash",
            1048576,
            (0.1, 0.4),
            &["tools", "vision", "json"],
        ),
        entry(
            "google/gemini-2.0-flash-lite-001",
            "Gemini 2.0 Flash Lite",
            1048576,
            (0.075, 0.3),
            &["vision", "json"],
        ),
        entry(
            "meta-llama/llama-3.3-70b-instruct",
            "Llama 3.3 70B Instruct",
            131072,
            (0.12, 0.3),
            &["tools"],
        ),
        entry("deepseek/deepseek-r1", "DeepSeek R1", 163840, (0.55, 2.19), &["reasoning"]),
    ];

    // Aliases available without any configuration
    pub(crate) static ref DEFAULT_ALIASES: [(&'static str, &'static str); 6] = [
        ("sonnet", "anthropic/claude-3.7-sonnet"),
        ("haiku", "anthropic/claude-3.5-haiku"),
        ("4o", "openai/gpt-4o"),
        ("4o-mini", "openai/gpt-4o-mini"),
        ("gemini-flash", "google/gemini-2.0-flash-001"),
        ("r1", "deepseek/deepseek-r1"),
    ];
}
