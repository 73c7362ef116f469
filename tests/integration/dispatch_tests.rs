//! Registry dispatch against the mock device.

use std::sync::atomic::{AtomicU32, Ordering};

use remote_control::Registry;
use remote_control::adapters::line_channel::LineChannel;
use remote_control::config::UnknownEntryPolicy;
use remote_control::dispatch::table::Operation;
use remote_control::entry::EntryKind;
use remote_control::entry::access::GlobalUnitPair;
use remote_control::error::{DispatchError, Error};

use super::mock_device::{ChannelCall, Device, RecordingChannel, RecordingNotifier, registry};

#[test]
fn object_entry_receive_then_send() {
    let r = registry();
    let mut dev = Device::default();
    let mut notes = RecordingNotifier::default();

    r.receive(0, &mut dev, &mut LineChannel::new("200"), &mut notes)
        .unwrap();
    let mut out = LineChannel::new("");
    r.send(0, &mut dev, &mut out, &mut notes).unwrap();

    assert_eq!(out.output(), "200");
    assert!(notes.errors.is_empty());
}

#[test]
fn direct_cell_receive_then_send() {
    let r = registry();
    let mut dev = Device::default();
    assert_eq!(dev.counter, 0);

    r.receive(1, &mut dev, &mut LineChannel::new("1000"), &mut RecordingNotifier::default())
        .unwrap();
    let mut out = LineChannel::new("");
    r.send(1, &mut dev, &mut out, &mut RecordingNotifier::default())
        .unwrap();

    assert_eq!(out.output(), "1000");
}

#[test]
fn receive_at_line_end_is_untouched_and_notifies_once() {
    let r = registry();
    let mut dev = Device::default();
    dev.led.level = 77;
    let mut notes = RecordingNotifier::default();
    let mut ch = RecordingChannel::new(&[]);

    let err = r.receive(0, &mut dev, &mut ch, &mut notes).unwrap_err();

    assert_eq!(err, Error::Dispatch(DispatchError::ShortRead { entry: 0 }));
    assert_eq!(dev.led.level, 77);
    assert_eq!(notes.errors.len(), 1);
    // End-of-line is checked before anything is consumed.
    assert_eq!(ch.calls, [ChannelCall::AtLineEnd]);
}

#[test]
fn aggregate_short_read_mid_value_mutates_nothing() {
    let r = registry();
    let mut dev = Device::default();
    dev.led.colour = [1, 2, 3];
    let mut notes = RecordingNotifier::default();

    let err = r
        .receive(2, &mut dev, &mut RecordingChannel::new(&[9, 9]), &mut notes)
        .unwrap_err();

    assert_eq!(err, Error::Dispatch(DispatchError::ShortRead { entry: 2 }));
    assert_eq!(dev.led.colour, [1, 2, 3]);
    assert_eq!(notes.errors, [DispatchError::ShortRead { entry: 2 }]);
}

#[test]
fn signed_cell_uses_signed_primitives() {
    let r = registry();
    let mut dev = Device::default();
    let mut ch = RecordingChannel::new(&[-40]);
    r.receive(3, &mut dev, &mut ch, &mut RecordingNotifier::default())
        .unwrap();
    assert_eq!(dev.offset, -40);

    let mut out = RecordingChannel::new(&[]);
    r.send(3, &mut dev, &mut out, &mut RecordingNotifier::default())
        .unwrap();
    assert_eq!(out.sent(), [ChannelCall::SendSigned(-40)]);
}

#[test]
fn trigger_has_no_channel_io() {
    let r = registry();
    let mut dev = Device::default();
    r.trigger(4, &mut dev, &mut RecordingNotifier::default())
        .unwrap();
    assert_eq!(dev.reboots, 1);

    // Actions have no receive/send thunks.
    let mut ch = RecordingChannel::new(&[1]);
    let mut notes = RecordingNotifier::default();
    assert_eq!(
        r.receive(4, &mut dev, &mut ch, &mut notes).unwrap_err(),
        Error::Dispatch(DispatchError::NotApplicable {
            entry: 4,
            operation: Operation::Receive
        })
    );
    assert!(ch.calls.is_empty());
    assert!(notes.errors.is_empty());
}

#[test]
fn out_of_range_id_is_a_no_op() {
    let r = registry();
    let mut dev = Device::default();
    let mut notes = RecordingNotifier::default();
    let mut ch = RecordingChannel::new(&[5]);

    assert!(r.receive(200, &mut dev, &mut ch, &mut notes).is_err());
    assert!(ch.calls.is_empty());
    assert_eq!(notes.errors, [DispatchError::UnknownEntry { entry: 200 }]);

    let r = r.with_unknown_entry_policy(UnknownEntryPolicy::Ignore);
    let mut quiet = RecordingNotifier::default();
    assert!(r.send(200, &mut dev, &mut ch, &mut quiet).is_err());
    assert!(quiet.errors.is_empty());
}

#[test]
fn kinds_and_shapes_are_introspectable() {
    let r = registry();
    let kinds: Vec<_> = (0..5).map(|id| r.kind(id).unwrap()).collect();
    assert_eq!(
        kinds,
        [
            EntryKind::ObjectSetterGetter,
            EntryKind::GlobalIntrinsic,
            EntryKind::ObjectSetterGetter,
            EntryKind::GlobalIntrinsic,
            EntryKind::GlobalFunctions,
        ]
    );
    let shape = r.shape(2).unwrap();
    assert_eq!(shape.getter_name(), "colour");
    assert_eq!(shape.setter_name(), "set_colour");
    assert!(r.shape(5).is_none());
}

#[test]
fn registry_can_be_shared_across_threads() {
    let r = std::sync::Arc::new(registry());
    let handles: Vec<_> = (0..4u8)
        .map(|i| {
            let r = std::sync::Arc::clone(&r);
            std::thread::spawn(move || {
                let mut dev = Device::default();
                let input = (i * 10).to_string();
                r.receive(0, &mut dev, &mut LineChannel::new(&input), &mut RecordingNotifier::default())
                    .unwrap();
                dev.led.level
            })
        })
        .collect();
    let levels: Vec<u8> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(levels, [0, 10, 20, 30]);
}

static WATCHDOG_READS: AtomicU32 = AtomicU32::new(0);
static WATCHDOG_FEEDS: AtomicU32 = AtomicU32::new(0);

fn watchdog_status() {
    WATCHDOG_READS.fetch_add(1, Ordering::Relaxed);
}

fn feed_watchdog() {
    WATCHDOG_FEEDS.fetch_add(1, Ordering::Relaxed);
}

#[test]
fn free_unit_pair_calls_setter_and_getter_without_channel_data() {
    let r = Registry::<Device>::builder()
        .entry(GlobalUnitPair::new(
            ("watchdog_status", watchdog_status),
            ("feed_watchdog", feed_watchdog),
        ))
        .build()
        .unwrap();
    assert_eq!(r.kind(0), Some(EntryKind::GlobalFunctions));

    let mut dev = Device::default();
    let mut notes = RecordingNotifier::default();

    // Receive on an empty line: setter runs once, nothing is read.
    let mut ch = RecordingChannel::new(&[]);
    r.receive(0, &mut dev, &mut ch, &mut notes).unwrap();
    assert_eq!(WATCHDOG_FEEDS.load(Ordering::Relaxed), 1);
    assert_eq!(WATCHDOG_READS.load(Ordering::Relaxed), 0);
    assert!(ch.calls.is_empty());

    // Send: getter runs once, nothing is written.
    let mut out = RecordingChannel::new(&[]);
    r.send(0, &mut dev, &mut out, &mut notes).unwrap();
    assert_eq!(WATCHDOG_READS.load(Ordering::Relaxed), 1);
    assert_eq!(WATCHDOG_FEEDS.load(Ordering::Relaxed), 1);
    assert!(out.calls.is_empty());

    assert!(notes.errors.is_empty());
}
