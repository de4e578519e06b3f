//! MediSense - Main CLI Entry Point

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use medisense::{
    cli::{Args, Commands, Config, Verbosity},
    dashboard::{Dashboard, ScriptedPrompter},
    doctor::Doctor,
    logging,
    repl::{DisplayManager, ReplSession},
};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if let Err(msg) = args.validate() {
        eprintln!("{} {}", "Error:".red().bold(), msg);
        std::process::exit(2);
    }

    let verbosity = args.verbosity();
    if let Err(e) = logging::init_tracing(verbosity) {
        eprintln!("{}: could not initialize logging: {}", "Warning".yellow(), e);
    }

    let config = Config::load(args.config.clone()).context("Failed to load configuration")?;
    tracing::debug!(verbosity = verbosity.as_str(), "configuration loaded");

    match &args.command {
        None | Some(Commands::Start) => {
            run_repl(&config).await?;
        }
        Some(Commands::Doctor) => {
            run_doctor(config).await?;
        }
        Some(Commands::Config) => {
            show_config(&args, &config)?;
        }
        Some(command) => {
            run_widget(command, &config, verbosity).await?;
        }
    }

    Ok(())
}

/// Interactive dashboard
async fn run_repl(config: &Config) -> Result<()> {
    let dashboard = Dashboard::from_config(config).context("Failed to initialize dashboard")?;
    let mut repl_session = ReplSession::new()?;

    repl_session.show_welcome(env!("CARGO_PKG_VERSION"), dashboard.chat().is_configured());
    repl_session.run(&dashboard).await?;

    let session = repl_session.session();
    tracing::info!(
        renders = session.render_count(),
        failed = session.failed_renders(),
        duration_secs = session.session_duration(),
        "session ended"
    );
    Ok(())
}

/// Render a single widget with answers taken from the command line
async fn run_widget(command: &Commands, config: &Config, verbosity: Verbosity) -> Result<()> {
    let Some(mode) = command.mode() else {
        return Ok(());
    };

    let dashboard = Dashboard::from_config(config).context("Failed to initialize dashboard")?;
    let mut prompter = ScriptedPrompter::new(command.scripted_answers());
    let mut display = DisplayManager::new();

    if verbosity.show_progress() {
        display.start_spinner(&format!("Loading {}...", mode.label()));
    }

    let panel = dashboard.render(mode, &mut prompter).await;
    display.show_panel(&panel);

    if panel.has_error() {
        std::process::exit(1);
    }
    Ok(())
}

async fn run_doctor(config: Config) -> Result<()> {
    let doctor = Doctor::new(config);

    let checks = doctor.run_diagnostics().await;
    Doctor::display_results(&checks);

    std::process::exit(if Doctor::overall_status(&checks) { 0 } else { 1 });
}

fn show_config(args: &Args, config: &Config) -> Result<()> {
    let source = match &args.config {
        Some(path) => path.display().to_string(),
        None => match Config::default_path() {
            Some(path) if path.exists() => path.display().to_string(),
            _ => "built-in defaults".to_string(),
        },
    };

    println!("\n{}", "MediSense Configuration".bold().cyan());
    println!("{}", "=".repeat(60).cyan());
    println!("Source: {}\n", source.dimmed());
    println!("{}", toml::to_string_pretty(config).context("Failed to serialize configuration")?);

    println!("Environment:");
    println!(
        "  {:<12} {}",
        config.chat.api_key_env,
        if config.chat_api_key().is_some() { "set".green() } else { "not set".red() }
    );
    println!(
        "  {:<12} {}",
        config.predictor.token_env,
        if config.predictor_token().is_some() { "set".green() } else { "not set".dimmed() }
    );
    println!("  Verbosity:   {}", args.verbosity().as_str());
    println!();

    Ok(())
}
