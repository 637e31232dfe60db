use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

fn plot_steps(dir: &TempDir, file: &str) -> Output {
    Command::new(env!("CARGO_BIN_EXE_plot_steps"))
        .arg(file)
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

#[test]
fn test_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    let out = plot_steps(&dir, "absent.log");

    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("absent.log"), "stderr: {}", stderr);
    assert!(!dir.path().join("absent.log.svg").exists());
}

#[test]
fn test_invalid_hex_aborts_without_plot() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("bad.log"),
              "single_sort_step [1 .. 2]\nsingle_sort_step [zz .. yy]\n").unwrap();
    let out = plot_steps(&dir, "bad.log");

    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("line 2"), "stderr: {}", stderr);
    assert!(stderr.contains("\"zz\""), "stderr: {}", stderr);
    assert!(!dir.path().join("bad.log.svg").exists());
}

#[test]
fn test_no_argument_is_a_usage_error() {
    let out = Command::new(env!("CARGO_BIN_EXE_plot_steps"))
        .output()
        .unwrap();
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
}

// The tests below drive Matplotlib.

#[test]
fn test_plot_file_is_named_after_the_log() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("trace.txt"),
              "qsort started\nsingle_sort_step [1a .. 2f]\n").unwrap();
    let out = plot_steps(&dir, "trace.txt");

    assert!(out.status.success(), "stderr: {}",
            String::from_utf8_lossy(&out.stderr));
    assert_eq!(String::from_utf8_lossy(&out.stdout),
               "plotfile = \"trace.txt.svg\"\n");
    let svg = fs::read_to_string(dir.path().join("trace.txt.svg")).unwrap();
    assert!(svg.contains("<svg"));
}

#[test]
fn test_malformed_and_empty_logs_still_plot() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("run.log"),
              "single_sort_step [1 .. 2\nsingle_sort_step done\nsorted 0.\n").unwrap();
    let out = plot_steps(&dir, "run.log");

    assert!(out.status.success(), "stderr: {}",
            String::from_utf8_lossy(&out.stderr));
    assert_eq!(String::from_utf8_lossy(&out.stdout),
               "plotfile = \"run.log.svg\"\n");
    assert!(dir.path().join("run.log.svg").exists());
}
