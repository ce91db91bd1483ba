//! Contains console logger setup for the command line binary.

use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
};

/// Initializes the global logger, writing level-highlighted records to
/// stderr. `debug` lowers the threshold from info to debug.
///
/// Best effort: a second call (or a config error) leaves the existing
/// logger in place.
pub fn init(debug: bool) {
    let level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{h({l})} {m}{n}")))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level));
    if let Ok(config) = config {
        let _ = log4rs::init_config(config);
    }
}
