use log::{LevelFilter, SetLoggerError};

/// Environment variable holding the log filters
pub const LOG_ENV: &str = "NRTRACE_LOG";

fn builder() -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();
    builder.default_format().filter_level(LevelFilter::Info);
    builder
}

/// Installs the stderr logger, at `info` unless [`LOG_ENV`] says otherwise.
pub fn init() -> Result<(), SetLoggerError> {
    builder().parse_env(LOG_ENV).try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level() {
        assert_eq!(builder().build().filter(), LevelFilter::Info);
    }

    #[test]
    fn test_filters_override_default() {
        assert_eq!(builder().parse_filters("trace").build().filter(), LevelFilter::Trace);
        assert_eq!(builder().parse_filters("off").build().filter(), LevelFilter::Off);
    }
}
