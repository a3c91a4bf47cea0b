//! Process-wide logger installation
//!
//! Kept in its own test binary: the global instance lives for the whole
//! process.

use runlog::prelude::*;

#[test]
fn test_first_init_wins() {
    assert!(Logger::global().is_none());

    let mut first_config = LoggerConfig::console_only();
    first_config.copy_to_console = false;
    first_config.verbose = true;
    let first = Logger::init(first_config);

    let mut second_config = LoggerConfig::console_only();
    second_config.verbose = false;
    let second = Logger::init(second_config);

    assert!(std::ptr::eq(first, second));
    assert!(second.config().verbose);
    assert!(!second.config().copy_to_console);

    let third = Logger::init_from_file("/no/such/config.toml");
    assert!(std::ptr::eq(first, third));
    assert!(third.degradation().is_none());

    let global = Logger::global().expect("global logger installed");
    global.verbose("through the global instance");
    assert!(first
        .running_log(false, true)
        .contains("through the global instance"));
}
