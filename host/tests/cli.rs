use std::process::Command;

fn mst_cost() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_mst-cost"));
    command.env_remove("RUST_LOG");
    command
}

#[test]
fn test_no_arguments_prints_default_cost() {
    let output = mst_cost().output().expect("Failed to run mst-cost binary");

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "21\n");
}

#[test]
fn test_vertices_flag() {
    let output = mst_cost()
        .args(["--vertices", "4294967296"])
        .output()
        .expect("Failed to run mst-cost binary");

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        format!("{}\n", u64::MAX - (1u64 << 32) + 2)
    );
}

#[test]
fn test_prove_prints_same_line() {
    let output = mst_cost()
        .args(["-v", "5", "--prove"])
        .output()
        .expect("Failed to run mst-cost binary");

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "21\n");
}

#[test]
fn test_overflow_exits_nonzero_with_empty_stdout() {
    let output = mst_cost()
        .args(["-v", "18446744073709551615"])
        .output()
        .expect("Failed to run mst-cost binary");

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("does not fit in u64"), "stderr: {stderr}");
}

#[test]
fn test_debug_logs_stay_off_stdout() {
    let output = mst_cost()
        .env("RUST_LOG", "debug")
        .arg("--prove")
        .output()
        .expect("Failed to run mst-cost binary");

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "21\n");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("computed mst cost"), "stderr: {stderr}");
}
