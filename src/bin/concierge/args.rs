use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "concierge",
    about = "Land Rover chat concierge with streamed replies and vehicle views"
)]
pub struct CliArgs {
    /// Send one message, print the reply and exit
    #[arg(index = 1)]
    pub prompt: Option<String>,
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,
    #[arg(long, short = 'm')]
    pub model: Option<String>,
    #[arg(long)]
    pub base_url: Option<String>,
    #[arg(long)]
    pub api_key: Option<String>,
    /// Replace the concierge persona prompt
    #[arg(long)]
    pub system: Option<String>,
    #[arg(long)]
    pub temperature: Option<f32>,
    #[arg(long)]
    pub max_tokens: Option<u32>,
    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,
    /// Replay a preset conversation (1-based, see --list-presets)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub preset: Option<u64>,
    #[arg(long)]
    pub list_presets: bool,
    /// Do not write conversations to disk
    #[arg(long)]
    pub no_save: bool,
}

impl CliArgs {
    pub fn is_one_shot(&self) -> bool {
        self.prompt.is_some() || self.preset.is_some()
    }

    /// Zero-based preset index.
    pub fn preset_index(&self) -> Option<usize> {
        self.preset
            .and_then(|n| usize::try_from(n.checked_sub(1)?).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_prompt_is_one_shot() {
        let args = CliArgs::try_parse_from(["concierge", "show me the Defender"]).expect("parse");
        assert_eq!(args.prompt.as_deref(), Some("show me the Defender"));
        assert!(args.is_one_shot());
    }

    #[test]
    fn preset_is_one_based() {
        let args = CliArgs::try_parse_from(["concierge", "--preset", "2"]).expect("parse");
        assert_eq!(args.preset_index(), Some(1));
    }

    #[test]
    fn preset_zero_is_rejected() {
        assert!(CliArgs::try_parse_from(["concierge", "--preset", "0"]).is_err());
    }

    #[test]
    fn no_arguments_is_interactive() {
        let args = CliArgs::try_parse_from(["concierge"]).expect("parse");
        assert!(!args.is_one_shot());
        assert!(!args.list_presets);
    }
}
