use std::fs;
use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use colored::Colorize;
use tracing::{debug, instrument};

use crate::builder::StoreBuilder;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{self, Settings};
use crate::store::TagStore;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Tree { specs }) => _tree(specs),
        Some(Commands::List { specs }) => _list(specs),
        Some(Commands::Count { specs, roots }) => _count(specs, *roots),
        Some(Commands::Colors { count }) => _colors(*count),
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Show => _config_show(),
            ConfigCommands::Init { force } => _config_init(*force),
            ConfigCommands::Path => _config_path(),
        },
        Some(Commands::Completion { shell }) => _completion(*shell),
        None => Ok(()),
    }
}

/// Build an ephemeral store from the configured standing specs plus the
/// specs given on the command line.
fn load_store(specs: &[String]) -> CliResult<TagStore> {
    let settings = Settings::load(Some(Path::new(".")))?;

    let mut all_specs = settings.tags.clone();
    all_specs.extend(specs.iter().cloned());
    debug!("effective specs: {:?}", all_specs);

    let store = StoreBuilder::new()
        .auto_color(settings.auto_color)
        .build_from_specs(&all_specs)?;
    Ok(store)
}

#[instrument]
fn _tree(specs: &[String]) -> CliResult<()> {
    let store = load_store(specs)?;
    store.print_tree();
    Ok(())
}

#[instrument]
fn _list(specs: &[String]) -> CliResult<()> {
    let store = load_store(specs)?;
    store.print_list();
    Ok(())
}

#[instrument]
fn _count(specs: &[String], roots: bool) -> CliResult<()> {
    let store = load_store(specs)?;
    output::info(&store.count(roots));
    Ok(())
}

#[instrument]
fn _colors(count: usize) -> CliResult<()> {
    if count == 0 {
        return Err(CliError::InvalidArgs("count must be at least 1".to_string()));
    }

    // One store for the whole run, so all draws are pairwise distinct
    let mut store = TagStore::new();
    for _ in 0..count {
        let color = store.generate_color();
        let (r, g, b) = color.to_rgb8();
        println!("{} {}", "■".truecolor(r, g, b), color);
    }
    Ok(())
}

#[instrument]
fn _config_show() -> CliResult<()> {
    let settings = Settings::load(Some(Path::new(".")))?;
    output::header("Effective configuration");
    output::info(&settings.to_toml()?);
    Ok(())
}

#[instrument]
fn _config_init(force: bool) -> CliResult<()> {
    let path = config::global_config_path()
        .ok_or_else(|| CliError::InvalidArgs("cannot determine config directory".to_string()))?;

    if path.exists() {
        if !force {
            return Err(CliError::InvalidArgs(format!(
                "config already exists at {} (use --force to overwrite)",
                path.display()
            )));
        }
        output::warning(&format!("overwriting {}", path.display()));
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, Settings::template())?;
    output::action("Created", &path.display());
    Ok(())
}

#[instrument]
fn _config_path() -> CliResult<()> {
    match config::global_config_path() {
        Some(path) => output::detail(&format!("global: {}", path.display())),
        None => output::detail(&"global: <unavailable>"),
    }
    output::detail(&format!(
        "local:  {}",
        config::local_config_path(Path::new(".")).display()
    ));
    Ok(())
}

#[instrument]
fn _completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
