//! Shared helpers for running the binary.

use assert_cmd::Command;
use invoicegen_cli::test_utils::TestEnvironment;

/// `invoicegen` running in the environment's project directory with its
/// test config (HTML engine, output under the project).
pub fn invoicegen(env: &TestEnvironment) -> Command {
    let config = env.write_config().unwrap();
    let mut cmd = Command::cargo_bin("invoicegen").unwrap();
    cmd.current_dir(env.project_path())
        .env("INVOICEGEN_CONFIG", config)
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}
