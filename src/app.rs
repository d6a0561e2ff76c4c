//! Application orchestrator.
//! Loads/merges config, initializes logging, installs the signal handler,
//! validates the root, and runs the culling pipeline with a progress bar.

use anyhow::{anyhow, Result};
use tracing::{debug, error, info};

use name_culling::cli::Args;
use name_culling::config::{load_or_init, LoadResult, CONFIG_ENV};
use name_culling::output as out;
use name_culling::progress::terminal_bar;
use name_culling::{cull, default_config_path, shutdown, Config, CullError};

use crate::logging::init_tracing;

fn print_config_location() {
    if let Ok(cfg_env) = std::env::var(CONFIG_ENV) {
        out::print_info(&format!("Using {CONFIG_ENV} (explicit):\n  {cfg_env}\n"));
        out::print_info(&format!("To override, unset {CONFIG_ENV} or pass --config."));
        return;
    }
    match default_config_path() {
        Ok(p) => {
            out::print_info(&format!("Default name_culling config path:\n  {}\n", p.display()));
            if p.exists() {
                out::print_info("A config file already exists at that location.");
            } else {
                out::print_info("No config file exists there yet. Run without --print-config to create a template.");
            }
        }
        Err(e) => out::print_error(&format!("Could not determine a default config path: {e}")),
    }
}

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    if args.print_config {
        print_config_location();
        return Ok(());
    }

    // Config file first (may write a template on first run), then CLI overrides.
    let mut cfg = match load_or_init(args.config.as_deref())? {
        LoadResult::Loaded(cfg, _) => cfg,
        LoadResult::Missing(_) => Config::default(),
        LoadResult::CreatedTemplate(path) => {
            out::print_success(&format!("A template name_culling config was written to: {}", path.display()));
            if args.root.is_none() {
                out::print_info("Fill in <root> and the <strip> rules, then re-run this command. To use a different file set NAME_CULLING_CONFIG or pass --config.");
                return Ok(());
            }
            Config::default()
        }
    };
    args.apply_overrides(&mut cfg)?;

    let guard_opt = init_tracing(cfg.log_level, cfg.log_file.as_deref(), args.json).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {}", e));
        e
    })?;

    // The run stops on its own after an interrupt; the log guard lives until it has.
    ctrlc::set_handler(|| {
        shutdown::request();
        out::print_warn("Received interrupt; finishing the current rename and stopping...");
    })
    .map_err(|e| anyhow!("failed to install signal handler: {e}"))?;

    debug!("Starting name_culling: {:?}", args);

    let result = (|| -> Result<()> {
        let root = cfg.validate()?;

        if cfg.strip_rules.is_empty() {
            info!("No strip rules configured");
            out::print_info("No strip rules configured; nothing to do.");
            return Ok(());
        }
        info!(rules = ?cfg.strip_rules.iter().collect::<Vec<_>>(), "Strip rules");

        let mut bar = terminal_bar(cfg.show_progress);
        let summary = match cull(&root, cfg.mode, &cfg.strip_rules, cfg.whitelist(), &mut bar) {
            Ok(s) => s,
            Err(e) => {
                error!(code = e.code(), kind = e.kind(), error = %e, "Run aborted");
                return Err(e.into());
            }
        };

        out::print_summary(&summary);
        if summary.interrupted {
            return Err(CullError::Interrupted.into());
        }
        if !summary.failures.is_empty() {
            return Err(anyhow!("{} item(s) could not be renamed", summary.failed_count()));
        }
        Ok(())
    })();

    // Flush file logs, including the interrupt and summary lines
    drop(guard_opt);

    result
}
