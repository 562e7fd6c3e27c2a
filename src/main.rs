use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use arena_tactics::console::render;
use arena_tactics::engine::llm_client::HttpChatClient;
use arena_tactics::engine::settings_io::{load_settings, load_settings_from, save_settings, settings_path};
use arena_tactics::engine::setup::controller_from_settings;
use arena_tactics::model::settings::GameSettings;

#[derive(Debug, clap::Parser)]
#[command(about = "Turn-based RPG combat with human, rule-based and LLM players")]
struct Args {
    /// settings file (defaults to the user config dir)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// write default settings to the config path and exit
    #[arg(long)]
    write_default_config: bool,

    /// query the LLM endpoint's model list and exit
    #[arg(long)]
    check_connection: bool,

    /// log fallbacks, reasoning and every executed command
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Args::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let path = cli.config.clone().unwrap_or_else(settings_path);

    if cli.write_default_config {
        save_settings(&GameSettings::default(), &path)?;
        println!("Wrote default settings to {}", path.display());
        return Ok(());
    }

    let settings = match &cli.config {
        Some(path) => load_settings_from(path)?,
        None => load_settings(),
    };

    if cli.check_connection {
        let client = HttpChatClient::from_settings(&settings.llm, None)?;
        println!("{}: {}", client.model(), client.test_connection()?);
        return Ok(());
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    render::banner(&mut out)?;
    let mut controller = controller_from_settings(&settings)?;
    let outcome = controller.play_game(&mut out)?;
    controller.display_result(&mut out, outcome)?;
    out.flush()?;

    Ok(())
}
