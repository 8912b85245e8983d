//! Help and usage output.

mod common;

use common::TestEnv;

#[test]
fn help_lists_every_runtime_command() {
    let env = TestEnv::bare();
    let result = env.run(&["--help"]);

    assert!(result.success);
    for verb in [
        "start",
        "stop",
        "restart",
        "reload",
        "create-vhost",
        "upload-vhost",
        "download-vhost",
        "delete-vhost",
        "update-configuration",
    ] {
        assert!(
            result.stdout.contains(verb),
            "help output should list '{}'; got:\n{}",
            verb,
            result.stdout
        );
    }
}

#[test]
fn missing_verb_prints_usage_and_fails() {
    let env = TestEnv::bare();
    let result = env.run(&[]);

    assert!(!result.success);
    assert!(result.stderr.contains("Usage"));
}

#[test]
fn missing_environment_prints_usage_and_fails() {
    let env = TestEnv::bare();
    let result = env.run(&["restart"]);

    assert!(!result.success);
    assert!(result.stderr.contains("Usage"));
}
