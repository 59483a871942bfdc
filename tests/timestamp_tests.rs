use slackguard::GuardError;
use slackguard::timestamp::{MAX_THREAD_TS_LENGTH, validate_thread_timestamp};

#[test]
fn test_valid_timestamps_are_accepted() {
    assert!(validate_thread_timestamp("").is_ok());
    assert!(validate_thread_timestamp("1234567890.123456").is_ok());
    assert!(validate_thread_timestamp("0000000000.000000").is_ok());
}

#[test]
fn test_malformed_timestamps_are_rejected() {
    let too_long = "1".repeat(MAX_THREAD_TS_LENGTH + 1);
    let invalid = [
        "1234567890.12345",
        "1234567890.1234567",
        "123456789.123456",
        "12345678901.123456",
        "1234567890123456",
        "abcdefghij.123456",
        "1234567890.abcdef",
        "1234567890.123.456",
        "1234567890,123456",
        " 1234567890.123456",
        "1234567890.123456\n",
        "١٢٣٤٥٦٧٨٩٠.١٢٣٤٥٦",
        too_long.as_str(),
    ];

    for ts in invalid {
        let result = validate_thread_timestamp(ts);
        assert!(
            matches!(result, Err(GuardError::InvalidTimestamp(_))),
            "Expected {ts:?} to be rejected, got {result:?}"
        );
    }
}

#[test]
fn test_revalidating_accepted_timestamp_succeeds() {
    let ts = "1712345678.000100";
    for _ in 0..3 {
        validate_thread_timestamp(ts).unwrap();
    }
}
