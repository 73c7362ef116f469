//! Mock device context, channel and notifier for integration tests.
//!
//! `RecordingChannel` logs every primitive call so tests can assert that a
//! command touched the channel exactly as much as it should.

use remote_control::channel::DataChannel;
use remote_control::error::{CodecError, DispatchError};
use remote_control::ports::ErrorNotifier;
use remote_control::{Registry, remote_control_table};

// ── Device context ────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct Led {
    pub level: u8,
    pub colour: [u8; 3],
}

impl Led {
    pub fn brightness(&self) -> u8 {
        self.level
    }

    pub fn set_brightness(&mut self, level: u8) {
        self.level = level;
    }

    pub fn colour(&self) -> [u8; 3] {
        self.colour
    }

    pub fn set_colour(&mut self, rgb: [u8; 3]) {
        self.colour = rgb;
    }
}

#[derive(Debug, Default)]
pub struct Device {
    pub led: Led,
    pub counter: u16,
    pub offset: i32,
    pub reboots: u32,
}

pub fn reboot(device: &mut Device) {
    device.reboots += 1;
}

/// Ids: 0 brightness, 1 counter, 2 colour, 3 offset, 4 reboot.
pub fn registry() -> Registry<Device> {
    remote_control_table! {
        Device;
        object led: Led => (brightness, set_brightness);
        direct counter: u16;
        object led: Led => (colour, set_colour);
        direct offset: i32;
        action reboot;
    }
    .expect("mock table is well formed")
}

// ── Recording notifier ────────────────────────────────────────

#[derive(Default)]
pub struct RecordingNotifier {
    pub errors: Vec<DispatchError>,
}

impl ErrorNotifier for RecordingNotifier {
    fn on_receive_error(&mut self, error: &DispatchError) {
        self.errors.push(*error);
    }
}

// ── Recording channel ─────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum ChannelCall {
    ReadUnsigned,
    ReadSigned,
    ReadFloat,
    SendUnsigned(u64),
    SendSigned(i64),
    SendFloat(f32),
    SendText(String),
    AtLineEnd,
    EndLine,
}

/// Channel fed from a queue of already-parsed values.
pub struct RecordingChannel {
    input: std::collections::VecDeque<i64>,
    pub calls: Vec<ChannelCall>,
}

#[allow(dead_code)]
impl RecordingChannel {
    pub fn new(values: &[i64]) -> Self {
        Self {
            input: values.iter().copied().collect(),
            calls: Vec::new(),
        }
    }

    pub fn reads(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| {
                matches!(
                    c,
                    ChannelCall::ReadUnsigned | ChannelCall::ReadSigned | ChannelCall::ReadFloat
                )
            })
            .count()
    }

    pub fn sent(&self) -> Vec<ChannelCall> {
        self.calls
            .iter()
            .filter(|c| {
                !matches!(
                    c,
                    ChannelCall::ReadUnsigned
                        | ChannelCall::ReadSigned
                        | ChannelCall::ReadFloat
                        | ChannelCall::AtLineEnd
                )
            })
            .cloned()
            .collect()
    }
}

impl DataChannel for RecordingChannel {
    fn read_unsigned(&mut self) -> Result<u64, CodecError> {
        self.calls.push(ChannelCall::ReadUnsigned);
        let v = self.input.pop_front().ok_or(CodecError::ShortRead)?;
        u64::try_from(v).map_err(|_| CodecError::Malformed)
    }

    fn read_signed(&mut self) -> Result<i64, CodecError> {
        self.calls.push(ChannelCall::ReadSigned);
        self.input.pop_front().ok_or(CodecError::ShortRead)
    }

    fn read_float(&mut self) -> Result<f32, CodecError> {
        self.calls.push(ChannelCall::ReadFloat);
        self.input
            .pop_front()
            .map(|v| v as f32)
            .ok_or(CodecError::ShortRead)
    }

    fn send_unsigned(&mut self, value: u64) {
        self.calls.push(ChannelCall::SendUnsigned(value));
    }

    fn send_signed(&mut self, value: i64) {
        self.calls.push(ChannelCall::SendSigned(value));
    }

    fn send_float(&mut self, value: f32) {
        self.calls.push(ChannelCall::SendFloat(value));
    }

    fn send_text(&mut self, text: &str) {
        self.calls.push(ChannelCall::SendText(text.to_owned()));
    }

    fn is_at_line_end(&mut self) -> bool {
        self.calls.push(ChannelCall::AtLineEnd);
        self.input.is_empty()
    }

    fn end_line(&mut self) {
        self.calls.push(ChannelCall::EndLine);
    }
}
