use slackguard::setup_logging;

#[test]
fn test_logging_setup() {
    // Calling twice must not panic: only the first call installs a subscriber.
    let result = std::panic::catch_unwind(|| {
        setup_logging();
        setup_logging();
    });

    assert!(result.is_ok(), "setup_logging function should not panic");
}
