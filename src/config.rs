//! Configuration and CLI argument handling

use std::{path::PathBuf, time::Duration};

use clap::Parser;

use crate::alarm::ManagerConfig;

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "alarm-keeper")]
#[command(about = "A local service that plays, vibrates and auto-stops alarms by id")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Directory holding the alarm sound files
    #[arg(short, long, default_value = "sounds")]
    pub sounds_dir: PathBuf,

    /// Command used to play a sound file (the file path is appended)
    #[arg(long, default_value = "paplay")]
    pub player: String,

    /// Extra argument passed to the player command before the file path
    #[arg(long = "player-arg", allow_hyphen_values = true)]
    pub player_args: Vec<String>,

    /// Command run for every haptic pulse; pulses are only logged if unset
    #[arg(long)]
    pub haptic_command: Option<String>,

    /// Extra argument passed to the haptic command
    #[arg(long = "haptic-arg", allow_hyphen_values = true)]
    pub haptic_args: Vec<String>,

    /// Sound played for transient UI feedback
    #[arg(long)]
    pub feedback_sound: Option<String>,

    /// Minutes after which an endlessly looping alarm is stopped
    #[arg(long, default_value = "15")]
    pub auto_stop_minutes: u64,

    /// Milliseconds between haptic pulses of a vibrating alarm
    #[arg(long, default_value = "1700", value_parser = clap::value_parser!(u64).range(1..))]
    pub vibration_period_ms: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Alarm manager settings derived from the CLI flags
    pub fn manager_config(&self) -> ManagerConfig {
        ManagerConfig {
            auto_stop_after: Duration::from_secs(self.auto_stop_minutes.saturating_mul(60)),
            vibration_period: Duration::from_millis(self.vibration_period_ms),
            feedback_sound: self.feedback_sound.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alarm::{DEFAULT_AUTO_STOP_AFTER, DEFAULT_VIBRATION_PERIOD};

    #[test]
    fn defaults_match_manager_defaults() {
        let config = Config::try_parse_from(["alarm-keeper"]).unwrap();

        assert_eq!(config.address(), "127.0.0.1:20554");
        assert_eq!(config.log_level(), "info");

        let manager = config.manager_config();
        assert_eq!(manager.auto_stop_after, DEFAULT_AUTO_STOP_AFTER);
        assert_eq!(manager.vibration_period, DEFAULT_VIBRATION_PERIOD);
        assert_eq!(manager.feedback_sound, None);
    }

    #[test]
    fn flags_override_defaults() {
        let config = Config::try_parse_from([
            "alarm-keeper",
            "-v",
            "--port",
            "9000",
            "--player",
            "ffplay",
            "--player-arg",
            "-nodisp",
            "--player-arg",
            "-autoexit",
            "--auto-stop-minutes",
            "5",
            "--vibration-period-ms",
            "500",
            "--feedback-sound",
            "click",
        ])
        .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.log_level(), "debug");
        assert_eq!(config.player, "ffplay");
        assert_eq!(config.player_args, vec!["-nodisp", "-autoexit"]);

        let manager = config.manager_config();
        assert_eq!(manager.auto_stop_after, Duration::from_secs(300));
        assert_eq!(manager.vibration_period, Duration::from_millis(500));
        assert_eq!(manager.feedback_sound.as_deref(), Some("click"));
    }

    #[test]
    fn zero_vibration_period_is_rejected() {
        let result = Config::try_parse_from(["alarm-keeper", "--vibration-period-ms", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn huge_auto_stop_saturates() {
        let minutes = u64::MAX.to_string();
        let config =
            Config::try_parse_from(["alarm-keeper", "--auto-stop-minutes", minutes.as_str()])
                .unwrap();

        assert_eq!(config.manager_config().auto_stop_after, Duration::from_secs(u64::MAX));
    }
}
