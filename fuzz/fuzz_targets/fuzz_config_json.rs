//! Fuzz target: `RemoteControlConfig::from_json`
//!
//! Any config that parses must also validate, and must survive a postcard
//! round trip unchanged.
//!
//! cargo fuzz run fuzz_config_json

#![no_main]

use libfuzzer_sys::fuzz_target;
use remote_control::config::RemoteControlConfig;

fuzz_target!(|data: &[u8]| {
    let Ok(json) = core::str::from_utf8(data) else {
        return;
    };
    if let Ok(config) = RemoteControlConfig::from_json(json) {
        assert!(config.validate().is_ok());
        let bytes = config.to_postcard().expect("valid config encodes");
        let back = RemoteControlConfig::from_postcard(&bytes).expect("stored config decodes");
        assert_eq!(config, back);
    }
});
