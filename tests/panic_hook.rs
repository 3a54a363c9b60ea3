use std::process::Command;

const CHILD_ENV: &str = "BILL_SPLITTER_PANIC_CHILD";
const PANIC_MESSAGE: &str = "split bill exploded";

/// Re-runs this test in a child process where logging is initialised and
/// then panics; the panic message must still reach stderr.
#[test]
fn panic_message_reaches_stderr_after_logging_init() {
    if std::env::var_os(CHILD_ENV).is_some() {
        let _guard = bill_splitter::logging::init("bill_splitter=info");
        panic!("{}", PANIC_MESSAGE);
    }

    let exe = std::env::current_exe().unwrap();
    let output = Command::new(exe)
        .args([
            "--exact",
            "panic_message_reaches_stderr_after_logging_init",
            "--nocapture",
            "--test-threads=1",
        ])
        .env(CHILD_ENV, "1")
        .output()
        .unwrap();

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(
        stderr.contains(PANIC_MESSAGE),
        "panic message missing from stderr: {}",
        stderr
    );
}

#[test]
fn chained_hook_keeps_running_previous_hook() {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    if std::env::var_os(CHILD_ENV).is_some() {
        return;
    }

    let called = Arc::new(AtomicBool::new(false));
    let flag = called.clone();
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |_| flag.store(true, Ordering::SeqCst)));

    bill_splitter::logging::install_panic_hook();
    let result = std::panic::catch_unwind(|| panic!("caught"));

    let _ = std::panic::take_hook();
    std::panic::set_hook(previous);

    assert!(result.is_err());
    assert!(called.load(Ordering::SeqCst));
}
