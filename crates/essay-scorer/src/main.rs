//! essay-scorer CLI
#![deny(unsafe_code)]

use anyhow::Context;
use clap::Parser;
use essay_scorer::commands::analyze::AnalyzeDefaults;
use essay_scorer::{Cli, Commands, commands};
use essay_scorer_core::EssayAnalyzer;
use essay_scorer_core::config::{Config, ConfigLoader};
use tracing::debug;

mod observability;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.color.apply();

    if cli.version_only {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // arg_required_else_help ensures we have --version-only or a subcommand
    let Some(command) = cli.command else {
        return Ok(());
    };

    if let Some(ref dir) = cli.chdir {
        std::env::set_current_dir(dir)
            .with_context(|| format!("failed to change directory to {}", dir.display()))?;
    }

    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let cwd = camino::Utf8PathBuf::try_from(cwd).map_err(|e| {
        anyhow::anyhow!(
            "current directory is not valid UTF-8: {}",
            e.into_path_buf().display()
        )
    })?;
    let mut loader = ConfigLoader::new().with_project_search(&cwd);
    if let Some(ref config_path) = cli.config {
        let config_path = camino::Utf8PathBuf::try_from(config_path.clone()).map_err(|e| {
            anyhow::anyhow!(
                "config path is not valid UTF-8: {}",
                e.into_path_buf().display()
            )
        })?;
        loader = loader.with_file(&config_path);
    }
    let (config, config_sources) = loader.load().context("failed to load configuration")?;

    let obs_config = observability::ObservabilityConfig::from_env_with_overrides(
        config
            .log_dir
            .as_ref()
            .map(|dir| dir.as_std_path().to_path_buf()),
    );
    let env_filter = observability::env_filter(cli.quiet, cli.verbose, config.log_level.as_str());
    let _guard = observability::init_observability(&obs_config, env_filter)
        .context("failed to initialize logging/tracing")?;

    debug!(
        verbose = cli.verbose,
        quiet = cli.quiet,
        json = cli.json,
        color = ?cli.color,
        chdir = ?cli.chdir,
        "CLI initialized"
    );

    let result = match command {
        Commands::Analyze(args) => build_analyzer(&config).and_then(|analyzer| {
            let defaults = AnalyzeDefaults {
                keyword_limit: config.keyword_limit(),
                min_score: config.min_score,
                max_input_bytes: config.input_limit(),
            };
            commands::analyze::cmd_analyze(args, cli.json, &analyzer, defaults)
        }),
        Commands::Info(args) => commands::info::cmd_info(args, cli.json, &config, &config_sources),
        #[cfg(feature = "mcp")]
        Commands::Serve(args) => build_analyzer(&config).and_then(|analyzer| {
            let rt = tokio::runtime::Runtime::new()
                .context("failed to create async runtime for MCP server")?;
            rt.block_on(commands::serve::cmd_serve(
                args,
                analyzer,
                config.input_limit(),
            ))
        }),
    };
    if let Err(ref err) = result {
        tracing::error!(error = %err, "fatal error");
    }
    result
}

/// Prepare the analyzer once, before any essay is read.
///
/// Without extra abbreviations this is the shared default instance.
fn build_analyzer(config: &Config) -> anyhow::Result<EssayAnalyzer> {
    match config.abbreviations.as_deref() {
        Some(extra) if !extra.is_empty() => {
            debug!(count = extra.len(), "adding configured abbreviations");
            EssayAnalyzer::with_abbreviations(extra)
                .context("failed to initialize the essay analyzer")
        }
        _ => Ok(essay_scorer_core::initialize().clone()),
    }
}
