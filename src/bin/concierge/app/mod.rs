mod interactive;
mod provider;
mod render;

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use concierge::client::{ConversationView, PRESET_CONVERSATIONS};
use concierge::conversation::{NoopObserver, Session, SessionHandle, StateObserver};
use concierge::orchestrator::{CustomerInterests, Orchestrator, Persona};
use concierge::persistence::JsonConversationStore;
use concierge::tools::ToolRegistry;

use crate::args::CliArgs;
use crate::config::{load_config, save_config, AppConfig, ConfigPaths};
use crate::logging::init_logging;

pub async fn run() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    let loaded = load_config(args.config.clone())?;
    if !loaded.config_exists {
        save_config(&loaded.config, &loaded.paths)?;
    }
    let _logger = init_logging(&loaded.config.logging, &loaded.paths)?;

    if args.list_presets {
        let mut out = io::stdout().lock();
        render::print_presets(&mut out, PRESET_CONVERSATIONS)?;
        return Ok(());
    }

    let provider = provider::build_provider(&args, &loaded.config.provider)?;
    log::info!(
        "using model {} at {}",
        provider.model(),
        provider.base_url()
    );
    let orchestrator = Arc::new(Orchestrator::new(
        Arc::new(provider),
        ToolRegistry::default(),
        build_persona(&args, &loaded.config),
    ));
    let observer = build_observer(&args, &loaded.config, &loaded.paths);
    let session = SessionHandle::new(Session::new(observer));
    let mut view = ConversationView::new(orchestrator, session, PRESET_CONVERSATIONS);

    if let Some(index) = args.preset_index() {
        let result = view.execute_preset(index).await;
        render::print_turn(&view, result).await?;
    }
    if let Some(prompt) = args.prompt.as_deref() {
        let result = view.submit(prompt).await;
        render::print_turn(&view, result).await?;
    }
    if args.is_one_shot() {
        let mut out = io::stdout().lock();
        render::print_suggestions(&mut out, view.suggestions())?;
        out.flush()?;
        return Ok(());
    }
    interactive::run(&mut view).await
}

fn build_persona(args: &CliArgs, config: &AppConfig) -> Persona {
    let prompt = args
        .system
        .clone()
        .or_else(|| config.persona.system_prompt.clone());
    let persona = match prompt {
        Some(prompt) => Persona::custom(prompt),
        None => Persona::land_rover(),
    };
    let interests = config
        .persona
        .customer_profile
        .then(CustomerInterests::default);
    persona.with_interests(interests)
}

fn build_observer(
    args: &CliArgs,
    config: &AppConfig,
    paths: &ConfigPaths,
) -> Arc<dyn StateObserver> {
    if args.no_save || !config.storage.enabled {
        return Arc::new(NoopObserver);
    }
    let dir = config
        .storage
        .conversations_dir
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(|| paths.conversations_dir());
    log::debug!("saving conversations to {}", dir.display());
    Arc::new(JsonConversationStore::new(dir))
}
