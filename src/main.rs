use anyhow::Result;
use clap::{Parser, Subcommand};
use packlab::config::{BuildMode, Config};
use packlab::fixtures::FixtureSet;
use packlab::tui::state::AppState;
use packlab::{demo, pipeline, server, tui};
use std::path::PathBuf;
use tokio::sync::{mpsc, watch};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "packlab", about = "Asset pipeline and demo page runner")]
struct Cli {
    /// Config file path.
    #[arg(long, default_value = "packlab.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the asset pipeline over the source tree.
    Build {
        /// Build mode: development or production. Falls back to
        /// PACKLAB_MODE, then the config file.
        #[arg(long, value_parser = parse_mode)]
        mode: Option<BuildMode>,
    },
    /// Serve the build output on the configured local port.
    Serve {
        /// Override the configured port.
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run the demo page bootstrap in a terminal UI.
    Demo,
}

fn parse_mode(raw: &str) -> Result<BuildMode, String> {
    BuildMode::parse(raw).ok_or_else(|| format!("unknown mode: {}", raw))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load_or_default(&cli.config)?;

    match cli.command {
        Command::Build { mode } => {
            init_stderr_logging();
            let mode = config.resolve_mode(mode);
            let report = pipeline::run_build(&config, mode)?;

            println!();
            println!("  packlab build ({})", report.mode);
            for (label, count) in &report.counts {
                println!("    {:<12} {}", label, count);
            }
            if report.lint_findings > 0 {
                println!("    lint         {} finding(s)", report.lint_findings);
            }
            println!();
            for path in &report.emitted {
                println!("    -> {}", pipeline::display_rel(path, &config.build.output_dir));
            }
            println!();
        }
        Command::Serve { port } => {
            init_stderr_logging();
            let mut config = config;
            if let Some(port) = port {
                config.server.port = port;
            }
            server::serve(&config).await?;
        }
        Command::Demo => {
            // The TUI owns the terminal; tracing goes to a file.
            let log_file = std::fs::File::create("packlab.log")?;
            tracing_subscriber::fmt()
                .with_env_filter("packlab=debug")
                .with_writer(log_file)
                .init();

            let fixtures = FixtureSet::load(&config.build.source_dir.join("assets"))?;
            let (state_tx, state_rx) = watch::channel(AppState::new(&config.demo.mount_id));
            let (cmd_tx, cmd_rx) = mpsc::channel(16);

            let handles = demo::bootstrap(&config.demo, &fixtures, &state_tx)?;

            // Blocks until 'q', which also cancels any timer still pending.
            tui::run_tui(state_rx, cmd_tx).await?;
            demo::shutdown_on_quit(cmd_rx, &handles).await;
        }
    }

    Ok(())
}

fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("packlab=info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
