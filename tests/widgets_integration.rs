//! Offline widget integration tests
//!
//! Widgets that need no network, driven through the same path the CLI
//! subcommands use.

use clap::Parser;
use medisense::cli::config::{ChatConfig, Config};
use medisense::cli::{Args, Commands};
use medisense::dashboard::{Dashboard, ScriptedPrompter};
use medisense::symptoms::STUB_DIAGNOSIS;
use medisense::trends::CHART_TITLE;
use medisense::{Mode, PanelItem};

fn offline_config() -> Config {
    Config {
        chat: ChatConfig {
            api_key_env: "MEDISENSE_TEST_UNSET_KEY".to_string(),
            ..ChatConfig::default()
        },
        ..Config::default()
    }
}

fn render_command(argv: &[&str]) -> medisense::Panel {
    let args = Args::try_parse_from(argv).unwrap();
    let command = args.command.expect("subcommand");
    let mode = command.mode().expect("widget subcommand");

    let dashboard = Dashboard::from_config(&offline_config()).unwrap();
    let mut prompter = ScriptedPrompter::new(command.scripted_answers());
    tokio_test::block_on(dashboard.render(mode, &mut prompter))
}

#[test]
fn test_bmi_subcommand() {
    let panel = render_command(&["medisense", "bmi", "--weight", "50", "--height", "160"]);
    assert!(panel.contains("Your BMI is: 19.53"));
    assert!(panel.items.contains(&PanelItem::Success("Normal weight".to_string())));
}

#[test]
fn test_bmi_subcommand_obese() {
    let panel = render_command(&["medisense", "bmi", "-w", "120", "--height", "170"]);
    assert!(panel.contains("Your BMI is: 41.52"));
    assert!(panel.items.contains(&PanelItem::Alert("Obese".to_string())));
    assert!(!panel.has_error());
}

#[test]
fn test_symptoms_subcommand() {
    let panel = render_command(&["medisense", "symptoms", "headache and fever"]);
    assert!(panel.contains(STUB_DIAGNOSIS));
}

#[test]
fn test_trends_subcommand() {
    let panel = render_command(&["medisense", "trends"]);
    assert!(panel.contains(CHART_TITLE));
    assert!(!panel.has_error());
}

#[test]
fn test_vitals_without_prediction() {
    let panel = render_command(&["medisense", "vitals"]);
    assert!(panel.contains("Heart rate"));
    assert!(!panel.contains("AI Predictions"));
}

#[test]
fn test_chat_subcommand_without_key() {
    let panel = render_command(&["medisense", "chat", "Is coffee healthy?"]);
    assert_eq!(panel.errors().len(), 1);
    assert!(panel.errors()[0].contains("MEDISENSE_TEST_UNSET_KEY"));
}

#[test]
fn test_every_mode_has_a_subcommand() {
    let commands = [
        Commands::Vitals { predict: false },
        Commands::Symptoms { text: String::new() },
        Commands::Trends,
        Commands::Chat { prompt: None },
        Commands::Bmi { weight: 70.0, height: 175.0 },
        Commands::Nearby,
    ];
    let modes: Vec<Mode> = commands.iter().filter_map(Commands::mode).collect();
    assert_eq!(modes, Mode::ALL.to_vec());
}
