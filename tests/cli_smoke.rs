use std::path::PathBuf;

fn exe() -> PathBuf {
    std::env::var_os("CARGO_BIN_EXE_storyfx")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let mut p = PathBuf::from("target").join("debug");
            p.push(if cfg!(windows) {
                "storyfx.exe"
            } else {
                "storyfx"
            });
            p
        })
}

fn fixture_path() -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join("storyboard.json")
        .to_string_lossy()
        .to_string()
}

#[test]
fn cli_frame_prints_rendered_json() {
    let input = fixture_path();
    let out = std::process::Command::new(exe())
        .args(["frame", "--in", input.as_str(), "--frame", "15"])
        .output()
        .unwrap();
    assert!(out.status.success());

    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["frame"], 15);
    assert_eq!(v["phrases"][0]["phrase_id"], "p_open");
}

#[test]
fn cli_prompt_and_validate_succeed() {
    let input = fixture_path();
    let out = std::process::Command::new(exe())
        .args(["prompt", "--in", input.as_str()])
        .output()
        .unwrap();
    assert!(out.status.success());
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let prompt = v["prompt"].as_str().unwrap_or_default();
    assert!(prompt.starts_with("A cinematic scene matching these captions: The city never sleeps. BOOM"));

    let status = std::process::Command::new(exe())
        .args(["validate", "--in", input.as_str()])
        .status()
        .unwrap();
    assert!(status.success());
}

#[test]
fn cli_play_runs_headless() {
    let input = fixture_path();
    let status = std::process::Command::new(exe())
        .args(["--fps", "24", "play", "--in", input.as_str(), "--frames", "30"])
        .status()
        .unwrap();
    assert!(status.success());
}

#[test]
fn cli_rejects_missing_timeline() {
    let dir = PathBuf::from("target").join("cli_smoke");
    std::fs::create_dir_all(&dir).unwrap();
    let bad = dir.join("bad.json");
    std::fs::write(&bad, r#"{"title":"nothing"}"#).unwrap();

    let bad_arg = bad.to_string_lossy().to_string();
    let status = std::process::Command::new(exe())
        .args(["validate", "--in", bad_arg.as_str()])
        .status()
        .unwrap();
    assert!(!status.success());
}
