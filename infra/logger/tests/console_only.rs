use ormlink_logger::{LevelFilter, Logger};

#[test]
fn console_logger_initializes_and_accepts_events() {
    Logger::builder()
        .level(LevelFilter::DEBUG)
        .env_filter("ormlink=trace")
        .init()
        .expect("logger init");

    tracing::info!("console logger up");
    tracing::debug!(value = 42, "structured event");
}

#[test]
fn malformed_filter_directive_is_rejected() {
    let err = Logger::builder().env_filter("===not a directive===").init().unwrap_err();
    assert!(matches!(err, ormlink_logger::LoggerError::Filter { .. }));
}
