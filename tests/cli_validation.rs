// Runs the binary up to config validation, which happens before the tty check,
// so no terminal is needed.

use assert_cmd::Command;
use tempfile::tempdir;

#[test]
fn oversized_session_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let log = dir.path().join("flick.log");
    let config = dir.path().join("config.json");

    let out = Command::cargo_bin("flick")?
        .arg("--config")
        .arg(&config)
        .arg("--log-file")
        .arg(&log)
        .args(["--secs", "18446744073709551615"])
        .output()?;

    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("session duration must be at most 86400"));
    assert!(log.exists());
    Ok(())
}

#[test]
fn too_many_targets_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;

    let out = Command::cargo_bin("flick")?
        .arg("--config")
        .arg(dir.path().join("config.json"))
        .args(["--targets", "100000"])
        .output()?;

    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("target count must be at most 256"));
    Ok(())
}
