//! timerpal - a countdown timer for the terminal
//!
//! Asks for a duration such as `1h 30m 5s`, counts it down in big FIGlet
//! digits, and raises a desktop notification with a sound at zero.
//! Press `q` to stop early.

use std::fs::File;
use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tracing::{debug, warn};

use timerpal::cli::{Cli, Commands, Display};
use timerpal::countdown::{CountdownEngine, CountdownError, CountdownOutcome, SystemClock};
use timerpal::logging::DeferredStderr;
use timerpal::notification::{create_timer_complete_content, DesktopNotifier};
use timerpal::sound::{get_default_sound, resolve_sound, try_create_player, SoundSource};
use timerpal::terminal::{ask_duration, TerminalError, TerminalScreen, TerminalSession};
use timerpal::{SystemAlarm, TimerConfig};

/// Main entry point
fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    let stderr_log = match init_tracing(cli.verbose, cli.log_file.as_deref()) {
        Ok(stderr_log) => stderr_log,
        Err(e) => {
            Display::show_error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    // Execute command
    if let Err(e) = execute(cli, stderr_log.as_ref()) {
        Display::show_error(&format!("{:#}", e));
        if let Some(hint) = error_hint(&e) {
            Display::show_hint(hint);
        }
        std::process::exit(1);
    }
}

/// Returns the suggestion for a terminal failure anywhere in the error chain.
fn error_hint(error: &anyhow::Error) -> Option<&'static str> {
    error.chain().find_map(|cause| {
        cause
            .downcast_ref::<TerminalError>()
            .or_else(|| match cause.downcast_ref::<CountdownError>() {
                Some(CountdownError::Terminal(e)) => Some(e),
                _ => None,
            })
            .map(TerminalError::suggestion)
    })
}

/// Initializes the tracing subscriber for logging.
///
/// Logs go to stderr unless a log file is given. `RUST_LOG` takes
/// precedence over `--verbose`. The returned stderr writer must be held
/// while the countdown owns the terminal.
fn init_tracing(verbose: bool, log_file: Option<&Path>) -> Result<Option<DeferredStderr>> {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time();

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("ログファイルを作成できません: {}", path.display()))?;
            builder.with_writer(Mutex::new(file)).with_ansi(false).init();
            Ok(None)
        }
        None => {
            let stderr_log = DeferredStderr::new();
            builder.with_writer(stderr_log.clone()).init();
            Ok(Some(stderr_log))
        }
    }
}

/// Executes the CLI command.
fn execute(cli: Cli, stderr_log: Option<&DeferredStderr>) -> Result<()> {
    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    match cli.command {
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
            Ok(())
        }
        None => run_timer(&cli, stderr_log),
    }
}

/// Applies command line overrides on top of the loaded configuration.
fn load_config(cli: &Cli) -> Result<TimerConfig> {
    let mut config = TimerConfig::load(cli.config.as_deref())?;

    if cli.no_sound {
        config = config.without_sound();
    }
    if cli.no_notify {
        config = config.without_notification();
    }
    if let Some(path) = &cli.sound {
        config = config.with_sound(path);
    }

    debug!("Configuration: {:?}", config);
    Ok(config)
}

/// Builds the completion alarm from the configuration.
fn build_alarm(config: &TimerConfig) -> SystemAlarm {
    let mut alarm = SystemAlarm::new(create_timer_complete_content(&config.notification_icon));

    if config.notify_enabled {
        alarm = alarm.with_notifier(Box::new(DesktopNotifier::new()));
    }

    if config.sound_enabled {
        // The process exits right after the alarm, so playback must finish
        // before `ring` returns.
        if let Some(player) = try_create_player(false).map(|p| p.wait_for_end(true)) {
            alarm = alarm.with_sound(Box::new(player), select_sound(config));
        }
    }

    alarm
}

/// Picks the configured sound file, or a system sound if it is missing.
fn select_sound(config: &TimerConfig) -> SoundSource {
    match config.sound.as_deref().map(resolve_sound) {
        Some(Ok(source)) => source,
        Some(Err(e)) => {
            warn!("{} ({})", e, e.suggestion());
            get_default_sound()
        }
        None => get_default_sound(),
    }
}

/// Prompts for a duration and counts it down.
fn run_timer(cli: &Cli, stderr_log: Option<&DeferredStderr>) -> Result<()> {
    let config = load_config(cli)?;
    let alarm = build_alarm(&config);

    let (seconds, outcome) = {
        // Dropped after the session, so held logs print on the normal screen.
        let _held_logs = stderr_log.map(DeferredStderr::hold);
        let _session = TerminalSession::start().context("端末を初期化できません")?;
        let screen = Arc::new(Mutex::new(TerminalScreen::new()?));

        let entered = {
            let mut guard = screen
                .lock()
                .map_err(|_| anyhow::anyhow!("画面の状態が壊れています"))?;
            ask_duration(&mut *guard)
        };
        let seconds = match entered {
            Ok(seconds) => seconds,
            Err(TerminalError::Aborted) => {
                debug!("Duration entry aborted");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        let engine = CountdownEngine::new(screen, SystemClock, config.engine_settings());
        let outcome = engine.run(seconds, &alarm)?;
        (seconds, outcome)
    };

    Display::show_outcome(outcome, seconds);
    if outcome == CountdownOutcome::Cancelled {
        debug!("Countdown cancelled by user");
    }
    Ok(())
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::parse_from(["timerpal"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_parse_completions() {
        let cli = Cli::parse_from(["timerpal", "completions", "fish"]);
        assert!(matches!(cli.command, Some(Commands::Completions { .. })));
    }

    #[test]
    fn test_cli_parse_verbose() {
        let cli = Cli::parse_from(["timerpal", "--verbose"]);
        assert!(cli.verbose);
    }

    #[test]
    fn test_load_config_applies_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.json");
        std::fs::write(&config_path, r#"{"quit_key": "x"}"#).unwrap();

        let cli = Cli::parse_from([
            "timerpal",
            "--no-notify",
            "--sound",
            "/tmp/ding.ogg",
            "--config",
            config_path.to_str().unwrap(),
        ]);
        let config = load_config(&cli).unwrap();

        assert_eq!(config.quit_key, 'x');
        assert!(!config.notify_enabled);
        assert!(config.sound_enabled);
        assert_eq!(config.sound, Some(PathBuf::from("/tmp/ding.ogg")));
    }

    #[test]
    fn test_load_config_no_sound() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli::parse_from([
            "timerpal",
            "--no-sound",
            "--config",
            dir.path().join("missing.json").to_str().unwrap(),
        ]);
        let config = load_config(&cli).unwrap();
        assert!(!config.sound_enabled);
    }

    #[test]
    fn test_load_config_broken_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.json");
        std::fs::write(&config_path, "{").unwrap();

        let cli = Cli::parse_from(["timerpal", "--config", config_path.to_str().unwrap()]);
        assert!(load_config(&cli).is_err());
    }

    #[test]
    fn test_error_hint_for_terminal_failure() {
        let err = anyhow::Error::new(TerminalError::from(std::io::Error::other("not a tty")))
            .context("端末を初期化できません");
        assert_eq!(
            error_hint(&err),
            Some(TerminalError::from(std::io::Error::other("x")).suggestion())
        );
    }

    #[test]
    fn test_error_hint_through_countdown_error() {
        let overflow = TerminalError::Overflow {
            width: 40,
            height: 6,
            cols: 20,
            rows: 4,
        };
        let err = anyhow::Error::new(CountdownError::from(overflow));
        assert!(error_hint(&err).unwrap().contains("端末ウィンドウ"));
    }

    #[test]
    fn test_error_hint_none_for_config_error() {
        let err = anyhow::Error::new(timerpal::ConfigError::Invalid("x".to_string()));
        assert!(error_hint(&err).is_none());
    }

    #[test]
    fn test_select_sound_missing_file_falls_back() {
        let config = TimerConfig::default().with_sound("/nonexistent/sound.ogg");
        let source = select_sound(&config);
        assert_ne!(source, SoundSource::file("/nonexistent/sound.ogg"));
    }

    #[test]
    fn test_select_sound_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ding.wav");
        std::fs::write(&path, b"RIFF").unwrap();

        let config = TimerConfig::default().with_sound(&path);
        assert_eq!(select_sound(&config), SoundSource::file(&path));
    }
}
