//! # Joystick Panel
//!
//! Host build of the joystick panel firmware loop.
//!
//! Runs the control cycle against simulated peripherals: the joystick sweeps
//! a fixed path, the LEDs and display log their state, and the two buttons
//! are pressed by typing on stdin.
//!
//! # Control Flow
//!
//! 1. **Initialization**
//!    - Set up logging with tracing subscriber
//!    - Load configuration (defaults if the file is missing)
//!    - Put LEDs and display in their power-on state
//!
//! 2. **Main Loop**
//!    - One control cycle every `cycle_ms` (10 ms by default)
//!    - Button edges arrive through the event queue and are applied at the
//!      start of the next cycle
//!    - Handle Ctrl+C for graceful shutdown
//!
//! 3. **Shutdown**
//!    - A sensor failure stops the loop with an error
//!    - Ctrl+C stops it cleanly and logs the cycle count
//!
//! # Examples
//!
//! ```bash
//! RUST_LOG=joystick_panel=debug cargo run --release -- config/default.toml
//! ```
//!
//! Then type `a` + Enter to toggle the PWM LEDs, `j` + Enter to toggle the
//! indicator.

use anyhow::{Context, Result};
use std::io::BufRead;
use std::time::{Duration, Instant};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use joystick_panel::config::Config;
use joystick_panel::hal::sim::{SimulatedJoystick, SimulatedLed, SimulatedPwm, TerminalDisplay};
use joystick_panel::input::{event_queue, ButtonId, EdgeNotifier};
use joystick_panel::panel::{Panel, Peripherals, SharedModeState};

/// Configuration file used when no path is given
const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Display flushes between text dumps of the frame (5 s at 100 Hz)
const RENDER_EVERY_FLUSHES: u64 = 500;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let (writer, _log_guard) = tracing_appender::non_blocking(std::io::stdout());
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Joystick Panel v{} starting...", env!("CARGO_PKG_VERSION"));

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = Config::load_or_default(&config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path))?;
    info!(
        "Configuration: dead zone {}, refractory {} ms ({:?} debounce), cycle {} ms",
        config.joystick.dead_zone,
        config.buttons.refractory_ms,
        config.buttons.debounce,
        config.runtime.cycle_ms
    );

    let boot = Instant::now();
    let (notifier, queue) = event_queue();

    let hw = Peripherals {
        adc: SimulatedJoystick::new(config.joystick.x_channel, config.joystick.y_channel),
        pwm: SimulatedPwm::new(),
        led: SimulatedLed::new(),
        display: TerminalDisplay::new(RENDER_EVERY_FLUSHES),
    };
    let mut panel = Panel::new(&config, hw, queue);
    panel.start().context("Failed to initialize peripherals")?;

    // Edge source runs outside the runtime so a pending stdin read never
    // holds up shutdown
    std::thread::spawn(move || read_button_edges(notifier, boot));

    let status = tokio::spawn(report_status(
        panel.mode_handle(),
        config.runtime.status_interval(),
    ));

    let mut cycle = interval(config.runtime.cycle());
    cycle.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!("Starting control loop at {} ms per cycle", config.runtime.cycle_ms);
    info!("Type 'a' (PWM toggle) or 'j' (indicator toggle) and Enter; Ctrl+C to exit");

    loop {
        tokio::select! {
            _ = cycle.tick() => {
                if let Err(e) = panel.run_cycle() {
                    error!("Control loop halted after {} cycles: {}", panel.cycles(), e);
                    status.abort();
                    return Err(e.into());
                }
            }

            // Handle Ctrl+C for graceful shutdown
            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl+C, shutting down...");
                break;
            }
        }
    }

    status.abort();
    info!("Total cycles: {}", panel.cycles());
    Ok(())
}

/// Maps one line of stdin to a button.
fn parse_button(line: &str) -> Option<ButtonId> {
    match line.trim() {
        "a" | "A" => Some(ButtonId::ModeToggle),
        "j" | "J" => Some(ButtonId::IndicatorToggle),
        _ => None,
    }
}

/// Stands in for the GPIO falling-edge interrupt: stamps each press and
/// enqueues it.
fn read_button_edges(notifier: EdgeNotifier, boot: Instant) {
    for line in std::io::stdin().lock().lines() {
        let Ok(line) = line else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        match parse_button(&line) {
            Some(id) => {
                if !notifier.notify(id, boot.elapsed()) {
                    break;
                }
            }
            None => warn!("Unknown input {:?}, expected 'a' or 'j'", line.trim()),
        }
    }
}

/// Logs the mode state periodically.
async fn report_status(mode: SharedModeState, period: Duration) {
    let mut ticker = interval(period);
    // First tick completes immediately
    ticker.tick().await;

    loop {
        ticker.tick().await;
        let snapshot = mode.snapshot();
        info!(
            pwm_enabled = snapshot.pwm_enabled,
            secondary_led_on = snapshot.secondary_led_on,
            "Status"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_button() {
        assert_eq!(parse_button("a"), Some(ButtonId::ModeToggle));
        assert_eq!(parse_button(" J \n"), Some(ButtonId::IndicatorToggle));
        assert_eq!(parse_button("x"), None);
        assert_eq!(parse_button(""), None);
    }

    #[test]
    fn test_render_interval() {
        // At the default 10 ms cycle, one dump every 5 seconds
        let seconds = RENDER_EVERY_FLUSHES * joystick_panel::config::DEFAULT_CYCLE_MS / 1000;
        assert_eq!(seconds, 5);
    }

    #[test]
    fn test_default_config_file_parses() {
        let contents = include_str!("../config/default.toml");
        let config = Config::from_toml(contents).unwrap();
        assert_eq!(config.joystick.dead_zone, 100);
        assert_eq!(config.buttons.refractory_ms, 300);
    }
}
