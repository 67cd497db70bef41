use std::{fs, path::PathBuf, process::Command};

fn session_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("dronewell-{}-{name}.toml", std::process::id()));
    fs::write(&path, contents).expect("temp dir is writable");
    path
}

#[test]
fn scripted_session_prints_a_summary() {
    let path = session_file(
        "scripted",
        r#"
        seed = 3
        frames = 240

        [[steps]]
        frames = 2
        keys = ["space"]

        [[steps]]
        frames = 60
        keys = ["d"]
        "#,
    );
    let output = Command::new(env!("CARGO_BIN_EXE_dronewell"))
        .arg("--config")
        .arg(&path)
        .output()
        .expect("failed to launch the dronewell binary");
    let _ = fs::remove_file(&path);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout.contains("Enemies Destroyed:"), "stdout: {stdout}");
    assert!(stdout.contains("Total Playtime: 0:00:0"), "stdout: {stdout}");
}

#[test]
fn broken_session_files_are_reported() {
    let path = session_file("broken", "frames = \"many\"");
    let output = Command::new(env!("CARGO_BIN_EXE_dronewell"))
        .arg("--config")
        .arg(&path)
        .output()
        .expect("failed to launch the dronewell binary");
    let _ = fs::remove_file(&path);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("Please report this"), "stderr: {stderr}");
    assert!(stderr.contains("failed to parse session toml contents"), "stderr: {stderr}");
}
