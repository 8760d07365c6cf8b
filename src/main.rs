//! Essayist - inspect and normalize markdown essays.
//!
//! # Usage
//!
//! ```bash
//! essayist essay.md
//! essayist --view outline essay.md
//! essayist --view preview --json essay.md
//! essayist --write --watch essay.md
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use essayist::app::App;
use essayist::config::{
    ConfigFlags, View, clear_config_flags, global_config_path, load_config_flags,
    local_override_path, parse_flag_tokens, save_config_flags,
};

/// Inspect and normalize markdown essays
#[derive(Parser, Debug)]
#[command(name = "essayist", version, about, long_about = None)]
struct Cli {
    /// Markdown essay to load
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// What to print
    #[arg(long, value_enum)]
    view: Option<View>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,

    /// Rewrite FILE with normalized markdown
    #[arg(long)]
    write: bool,

    /// Re-print the view whenever FILE changes
    #[arg(short, long)]
    watch: bool,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);
    tracing::debug!(?effective, "effective flags");

    if !cli.file.exists() {
        anyhow::bail!("File not found: {}", cli.file.display());
    }

    App::new(cli.file)
        .with_view(effective.view.or(cli.view).unwrap_or_default())
        .with_json(effective.json || cli.json)
        .with_write(effective.write || cli.write)
        .with_watch(effective.watch || cli.watch)
        .run()
}
