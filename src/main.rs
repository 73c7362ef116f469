//! Remote-control demo firmware, serial console entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  UART console line                                           │
//! │      │ split_command_line                                    │
//! │      ▼                                                       │
//! │  RemoteControl::handle_command ──▶ Registry ──▶ Device state │
//! │      │                                 │                     │
//! │      ▼                                 ▼                     │
//! │  LineChannel output ──▶ stdout    (LogNotifier, PinNotifier) │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lines not addressed to `remote_control` are answered with `?` so a
//! terminal user can tell them apart from silence.
#![deny(unused_must_use)]

// ── Imports ───────────────────────────────────────────────────
use std::io::Write;
use std::sync::atomic::{AtomicU16, AtomicU32, Ordering};
use std::time::Duration;

use anyhow::Result;
use esp_idf_svc::hal::gpio::PinDriver;
use esp_idf_svc::hal::peripherals::Peripherals;
use log::{info, warn};

use remote_control::adapters::console_lines::ConsoleLines;
use remote_control::adapters::line_channel::LineChannel;
use remote_control::adapters::log_notifier::LogNotifier;
use remote_control::adapters::pin_notifier::PinNotifier;
use remote_control::codec::Packed;
use remote_control::config::RemoteControlConfig;
use remote_control::remote_control_table;
use remote_control::router::{CommandOutcome, RemoteControl, split_command_line};

/// Console poll period while no input is pending.
const POLL_MS: u32 = 10;

// ── Device context ────────────────────────────────────────────

#[derive(Default)]
struct StatusLight {
    brightness: u8,
    rgb: [u8; 3],
}

impl StatusLight {
    fn brightness(&self) -> u8 {
        self.brightness
    }

    fn set_brightness(&mut self, level: u8) {
        self.brightness = level;
        info!("LIGHT | brightness={level}");
    }

    fn colour(&self) -> [u8; 3] {
        self.rgb
    }

    fn set_colour(&mut self, rgb: [u8; 3]) {
        self.rgb = rgb;
        info!("LIGHT | rgb={rgb:?}");
    }
}

#[derive(Default, Clone, Copy, serde::Serialize, serde::Deserialize)]
struct Schedule {
    start_minute: u16,
    duration_minutes: u16,
    enabled: bool,
}

#[derive(Default)]
struct Device {
    light: StatusLight,
    counter: u16,
    threshold: f32,
    schedule: Packed<Schedule>,
}

static FAN_SPEED: AtomicU16 = AtomicU16::new(0);
static HEARTBEATS: AtomicU32 = AtomicU32::new(0);

fn fan_speed() -> u16 {
    FAN_SPEED.load(Ordering::Relaxed)
}

fn set_fan_speed(rpm: u16) {
    FAN_SPEED.store(rpm, Ordering::Relaxed);
    info!("FAN   | speed={rpm}");
}

fn heartbeat() {
    HEARTBEATS.fetch_add(1, Ordering::Relaxed);
}

fn reset_counter(device: &mut Device) {
    device.counter = 0;
    info!("RESET | counter cleared");
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  remote-control v{}                 ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Entry table ────────────────────────────────────────
    let registry = remote_control_table! {
        Device;
        object light: StatusLight => (brightness, set_brightness);
        direct counter: u16;
        functions (fan_speed, set_fan_speed);
        object light: StatusLight => (colour, set_colour);
        direct threshold: f32;
        direct schedule: Packed<Schedule>;
        functions unit(heartbeat, heartbeat);
        action reset_counter;
    }?;
    let rc = RemoteControl::new(RemoteControlConfig::default(), registry)?;

    // ── 3. Error indicator ────────────────────────────────────
    let peripherals = Peripherals::take()?;
    let led = PinDriver::output(peripherals.pins.gpio2)?;
    let mut notifier = (LogNotifier::new(), PinNotifier::new(led));

    // ── 4. Console loop ───────────────────────────────────────
    let mut device = Device::default();
    let mut stdin = std::io::stdin().lock();
    let mut stdout = std::io::stdout();
    let mut console = ConsoleLines::new();

    info!("Console ready, try `remote_control help`");
    loop {
        match console.poll(&mut stdin) {
            Ok(Some(line)) if !line.trim().is_empty() => {
                let (command, args) = split_command_line(&line);
                let mut channel = LineChannel::new(args);
                let outcome = rc.handle_command(command, &mut device, &mut channel, &mut notifier);
                if outcome == CommandOutcome::Ignored {
                    channel.end_line();
                    stdout.write_all(b"?")?;
                }
                stdout.write_all(channel.take_output().as_bytes())?;
                stdout.flush()?;
            }
            Ok(_) => {}
            Err(e) => warn!("console read failed: {e}"),
        }
        notifier.1.tick(POLL_MS);
        std::thread::sleep(Duration::from_millis(u64::from(POLL_MS)));
    }
}
