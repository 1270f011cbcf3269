use anyhow::Context;
use secrecy::SecretString;

use concierge::backends::openai::OpenAI;

use crate::args::CliArgs;
use crate::config::ProviderConfig;

const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";

pub fn build_provider(args: &CliArgs, config: &ProviderConfig) -> anyhow::Result<OpenAI> {
    let key_env = config.api_key_env.as_deref().unwrap_or(DEFAULT_API_KEY_ENV);
    let api_key = resolve_api_key(args, config, key_env)
        .with_context(|| format!("missing API key: set {key_env} or provider.api_key"))?;
    let provider = OpenAI::new(
        SecretString::new(api_key),
        args.base_url.clone().or_else(|| config.base_url.clone()),
        args.model.clone().or_else(|| config.model.clone()),
        args.max_tokens.or(config.max_tokens),
        args.temperature.or(config.temperature),
        args.timeout.or(config.timeout_seconds),
    )?;
    Ok(provider)
}

fn resolve_api_key(args: &CliArgs, config: &ProviderConfig, key_env: &str) -> Option<String> {
    args.api_key
        .clone()
        .or_else(|| std::env::var(key_env).ok())
        .or_else(|| config.api_key.clone())
        .filter(|key| !key.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn flag_wins_over_config_key() {
        let args = CliArgs::try_parse_from(["concierge", "--api-key", "sk-flag"]).expect("parse");
        let config = ProviderConfig {
            api_key: Some("sk-config".to_string()),
            api_key_env: Some("CONCIERGE_TEST_UNSET_KEY".to_string()),
            ..ProviderConfig::default()
        };
        let key = resolve_api_key(&args, &config, "CONCIERGE_TEST_UNSET_KEY");
        assert_eq!(key.as_deref(), Some("sk-flag"));
    }

    #[test]
    fn blank_config_key_counts_as_missing() {
        let args = CliArgs::try_parse_from(["concierge"]).expect("parse");
        let config = ProviderConfig {
            api_key: Some("   ".to_string()),
            ..ProviderConfig::default()
        };
        assert!(resolve_api_key(&args, &config, "CONCIERGE_TEST_UNSET_KEY").is_none());
    }

    #[test]
    fn flags_override_provider_settings() {
        let args = CliArgs::try_parse_from([
            "concierge",
            "--model",
            "gpt-test",
            "--base-url",
            "http://localhost:1234/v1",
            "--api-key",
            "sk-flag",
        ])
        .expect("parse");
        let config = ProviderConfig {
            model: Some("gpt-config".to_string()),
            timeout_seconds: Some(12),
            ..ProviderConfig::default()
        };
        let provider = build_provider(&args, &config).expect("provider");
        assert_eq!(provider.model(), "gpt-test");
        assert_eq!(provider.base_url().as_str(), "http://localhost:1234/v1/");
        assert_eq!(provider.timeout_seconds(), Some(12));
    }
}
