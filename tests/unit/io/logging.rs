//! Tests for log level selection and logger installation

#[cfg(test)]
mod tests {
    use simplelog::LevelFilter;
    use tilemosaic::io::logging::{init, level_for};

    // Tests verbosity count and quiet flag mapping
    // Verified by letting verbosity override quiet
    #[test]
    fn test_level_for() {
        assert_eq!(level_for(0, false), LevelFilter::Info);
        assert_eq!(level_for(1, false), LevelFilter::Debug);
        assert_eq!(level_for(2, false), LevelFilter::Trace);
        assert_eq!(level_for(9, false), LevelFilter::Trace);
        assert_eq!(level_for(3, true), LevelFilter::Error);
    }

    // Tests installing the logger more than once does not panic
    // Verified by unwrapping the install result
    #[test]
    fn test_init_twice() {
        init(LevelFilter::Warn);
        init(LevelFilter::Debug);
        log::warn!("logger installed");
    }
}
