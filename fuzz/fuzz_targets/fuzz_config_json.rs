//! Fuzz target: `PassportConfig::from_json`
//!
//! Arbitrary UTF-8 must either parse into a config that passes validation
//! or return an error. Never a panic.
//!
//! cargo fuzz run fuzz_config_json

#![no_main]

use dogpassport::config::PassportConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(raw) = core::str::from_utf8(data) else {
        return;
    };
    if let Ok(cfg) = PassportConfig::from_json(raw) {
        assert!(cfg.validate().is_ok(), "accepted config must validate");
    }
});
