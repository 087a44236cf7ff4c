pub mod codelets;
pub mod coderack;
pub mod error;
pub mod random;
pub mod report;
pub mod run;
pub mod slipnet;
pub mod temperature;
pub mod workspace;

pub use error::CopycatError;
pub use report::{AnswerHistogram, AnswerStats};
pub use run::{run, run_many, Config, RunResult};

/// dimensional analysis types
pub type Activation = i32;
pub type Probability = f64;
pub type Urgency = f64;

// workspace / string-length bounds
pub const MAX_STRING_LENGTH: usize = 20;

// main loop defaults (see "Configuration knobs")
pub const DEFAULT_MAX_STEPS: usize = 5_000;
pub const DEFAULT_CLAMP_TIME: usize = 30;
pub const DEFAULT_SLIPNET_UPDATE_PERIOD: usize = 15;
pub const DEFAULT_TEMPERATURE_UPDATE_PERIOD: usize = 5;
pub const DEFAULT_CODERACK_UPDATE_PERIOD: usize = 10;

// coderack aging
pub const CODERACK_AGE_PERIOD: usize = 200;

/// initialize logging for the CLI binary; the library itself never calls this.
#[cfg(feature = "cli")]
pub fn init_logging() {
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    let _ = simplelog::CombinedLogger::init(vec![term]);
}
