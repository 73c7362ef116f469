//! Fuzz target: `RemoteControl::handle_command`
//!
//! Feeds arbitrary console lines through `split_command_line` and the
//! router against a small table, and asserts that dispatch never panics
//! and notifies at most once per line.
//!
//! cargo fuzz run fuzz_router

#![no_main]

use libfuzzer_sys::fuzz_target;
use remote_control::adapters::line_channel::LineChannel;
use remote_control::codec::Packed;
use remote_control::error::DispatchError;
use remote_control::ports::ErrorNotifier;
use remote_control::router::split_command_line;
use remote_control::{RemoteControl, remote_control_table};

#[derive(Default)]
struct Ctx {
    level: u8,
    offset: i64,
    gain: f32,
    rgb: [u8; 3],
    pair: (u16, bool),
    blob: Packed<(u8, u32)>,
    resets: u32,
}

fn reset(ctx: &mut Ctx) {
    ctx.resets = ctx.resets.wrapping_add(1);
}

#[derive(Default)]
struct Count(u32);

impl ErrorNotifier for Count {
    fn on_receive_error(&mut self, _error: &DispatchError) {
        self.0 += 1;
    }
}

fuzz_target!(|data: &[u8]| {
    let Ok(line) = core::str::from_utf8(data) else {
        return;
    };
    let Ok(registry) = remote_control_table! {
        Ctx;
        direct level: u8;
        direct offset: i64;
        direct gain: f32;
        direct rgb: [u8; 3];
        direct pair: (u16, bool);
        direct blob: Packed<(u8, u32)>;
        action reset;
    } else {
        return;
    };
    let Ok(rc) = RemoteControl::new(Default::default(), registry) else {
        return;
    };

    let mut ctx = Ctx::default();
    let mut notes = Count::default();
    let (command, args) = split_command_line(line);
    let mut channel = LineChannel::new(args);
    let _ = rc.handle_command(command, &mut ctx, &mut channel, &mut notes);

    assert!(notes.0 <= 1, "one command line must notify at most once");
});
