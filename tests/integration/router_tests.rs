//! Full command-line flow: raw host line → router → registry → response.

use remote_control::adapters::line_channel::LineChannel;
use remote_control::config::RemoteControlConfig;
use remote_control::dispatch::table::Operation;
use remote_control::error::{DispatchError, Error};
use remote_control::router::split_command_line;
use remote_control::{CommandOutcome, RemoteControl};

use super::mock_device::{Device, RecordingNotifier, registry};

struct Console {
    rc: RemoteControl<Device>,
    device: Device,
    notes: RecordingNotifier,
}

impl Console {
    fn new(config: RemoteControlConfig) -> Self {
        Self {
            rc: RemoteControl::new(config, registry()).unwrap(),
            device: Device::default(),
            notes: RecordingNotifier::default(),
        }
    }

    fn line(&mut self, line: &str) -> (CommandOutcome, String) {
        let (command, args) = split_command_line(line);
        let mut ch = LineChannel::new(args);
        let outcome = self
            .rc
            .handle_command(command, &mut self.device, &mut ch, &mut self.notes);
        (outcome, ch.take_output())
    }
}

#[test]
fn help_lists_every_entry_without_mutation() {
    let mut c = Console::new(RemoteControlConfig::default());
    c.device.counter = 5;

    let (outcome, out) = c.line("remote_control help");

    assert_eq!(outcome, CommandOutcome::Help);
    assert_eq!(
        out,
        "0: u8 -> u8\n\
         1: u16 -> u16\n\
         2: <unknown type> -> <unknown type>\n\
         3: i32 -> i32\n\
         4: void -> void\n"
    );
    assert_eq!(c.device.counter, 5);
    assert_eq!(c.device.reboots, 0);
}

#[test]
fn brightness_scenario_over_the_console() {
    let mut c = Console::new(RemoteControlConfig::default());

    let (outcome, out) = c.line("remote_control 0 200");
    assert_eq!(
        outcome,
        CommandOutcome::Dispatched {
            operation: Operation::Receive,
            entry: 0
        }
    );
    assert_eq!(out, "");

    let (_, out) = c.line("remote_control send 0");
    assert_eq!(out, "200\n");
}

#[test]
fn aggregate_values_travel_as_token_runs() {
    let mut c = Console::new(RemoteControlConfig::default());
    c.line("remote_control 2 255 128 0");
    assert_eq!(c.device.led.colour, [255, 128, 0]);

    let (_, out) = c.line("remote_control.send 2");
    assert_eq!(out, "255 128 0\n");
}

#[test]
fn tab_separated_lines_reach_the_registry() {
    let mut c = Console::new(RemoteControlConfig::default());
    c.line("remote_control\t0\t90");
    assert_eq!(c.device.led.level, 90);

    let (outcome, out) = c.line("remote_control\tsend\t0");
    assert!(matches!(
        outcome,
        CommandOutcome::Dispatched {
            operation: Operation::Send,
            entry: 0
        }
    ));
    assert_eq!(out, "90\n");
}

#[test]
fn trigger_over_the_console() {
    let mut c = Console::new(RemoteControlConfig::default());
    c.line("remote_control trigger 4");
    c.line("remote_control trigger 4");
    assert_eq!(c.device.reboots, 2);
}

#[test]
fn missing_value_notifies_once() {
    let mut c = Console::new(RemoteControlConfig::default());
    c.device.counter = 9;

    let (outcome, _) = c.line("remote_control 1");

    assert_eq!(
        outcome,
        CommandOutcome::Rejected(Error::Dispatch(DispatchError::ShortRead { entry: 1 }))
    );
    assert_eq!(c.device.counter, 9);
    assert_eq!(c.notes.errors, [DispatchError::ShortRead { entry: 1 }]);
}

#[test]
fn one_entry_per_line() {
    let mut c = Console::new(RemoteControlConfig::default());
    // Trailing tokens after the value are not a second command.
    c.line("remote_control 1 10 1 20");
    assert_eq!(c.device.counter, 10);
}

#[test]
fn custom_prefix_from_json() {
    let config = RemoteControlConfig::from_json(
        r#"{"command_prefix":"rc","help_enabled":true,"unknown_entry":"Notify"}"#,
    )
    .unwrap();
    let mut c = Console::new(config);

    assert_eq!(c.line("remote_control 1 3").0, CommandOutcome::Ignored);
    assert!(matches!(
        c.line("rc 1 3").0,
        CommandOutcome::Dispatched { entry: 1, .. }
    ));
    assert_eq!(c.device.counter, 3);
}

#[test]
fn bad_entry_id_notifies() {
    let mut c = Console::new(RemoteControlConfig::default());
    let (outcome, _) = c.line("remote_control led 5");
    // `led` is taken as an unknown keyword, not an id.
    assert_eq!(outcome, CommandOutcome::Ignored);

    let (outcome, _) = c.line("remote_control -1 5");
    assert_eq!(
        outcome,
        CommandOutcome::Rejected(Error::Dispatch(DispatchError::MalformedEntryId))
    );
    assert_eq!(c.notes.errors, [DispatchError::MalformedEntryId]);
}
