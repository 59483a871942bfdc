use slackguard::content::{ContentType, sanitize_message_content};
use slackguard::identifier::validate_channel_identifier;
use slackguard::policy::is_channel_allowed;
use slackguard::timestamp::validate_thread_timestamp;

fn main() {
    divan::main();
}

#[divan::bench]
fn sanitize_markdown(bencher: divan::Bencher) {
    let content = "Hello <script>alert('test')</script> world! ".repeat(100);
    bencher.bench(|| {
        sanitize_message_content(divan::black_box(content.as_bytes()), ContentType::Markdown)
    });
}

#[divan::bench]
fn sanitize_plain(bencher: divan::Bencher) {
    let content = "Hello <script>alert('test')</script> world! ".repeat(100);
    bencher.bench(|| {
        sanitize_message_content(divan::black_box(content.as_bytes()), ContentType::Plain)
    });
}

#[divan::bench(args = ["C1234567890", "#general", "@username"])]
fn validate_identifier(id: &str) -> bool {
    validate_channel_identifier(divan::black_box(id)).is_ok()
}

#[divan::bench]
fn validate_timestamp() -> bool {
    validate_thread_timestamp(divan::black_box("1234567890.123456")).is_ok()
}

#[divan::bench(args = ["true", "C1234567890,D0987654321", "!C1234567890,!D0987654321"])]
fn policy_check(config: &str) -> bool {
    is_channel_allowed(divan::black_box("C9999999999"), divan::black_box(config))
}
