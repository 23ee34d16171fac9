use std::fs;
use std::io::Write;
use std::process::{Command, Output, Stdio};

const TOKEN_ABI: &str = r#"[
    {"type": "function", "name": "balanceOf", "stateMutability": "view",
     "inputs": [{"type": "address", "name": "owner"}], "outputs": [{"type": "uint256"}]},
    {"type": "event", "name": "Transfer", "inputs": [
        {"type": "address", "name": "from", "indexed": true},
        {"type": "address", "name": "to", "indexed": true},
        {"type": "uint256", "name": "value"}
    ]}
]"#;

fn converter() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_abi-converter"));
    cmd.env_remove("ABI_FORMAT");
    cmd
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn converts_single_file_in_requested_format() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("token.json");
    fs::write(&path, TOKEN_ABI).unwrap();

    let output = converter()
        .args(["--input", path.to_str().unwrap(), "--format", "minimal"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "function balanceOf(address) view returns (uint256)\n\
         event Transfer(address indexed,address indexed,uint256)\n"
    );
}

#[test]
fn format_defaults_to_full_and_reads_env() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("token.abi");
    fs::write(&path, TOKEN_ABI).unwrap();

    let full = converter().args(["-i", path.to_str().unwrap()]).output().unwrap();
    assert!(stdout(&full).starts_with("function balanceOf(address owner) view returns (uint256)\n"));

    let sighash = converter()
        .env("ABI_FORMAT", "sighash")
        .args(["-i", path.to_str().unwrap()])
        .output()
        .unwrap();
    assert_eq!(stdout(&sighash), "balanceOf(address)\nTransfer(address,address,uint256)\n");
}

#[test]
fn rejects_unknown_format() {
    let output = converter().args(["-i", "-", "--format", "yaml"]).output().unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown format"));
}

#[test]
fn reads_stdin() {
    let mut child = converter()
        .args(["-i", "-", "-f", "json"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(br#"[{"type": "function", "name": "ping", "constant": true}]"#)
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value[0]["stateMutability"], "view");
    assert!(value[0].get("constant").is_none());
}

#[test]
fn malformed_single_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, r#"[{"type": "error", "name": "E", "inputs": [{"type": "account"}]}]"#).unwrap();

    let output = converter().args(["-i", path.to_str().unwrap()]).output().unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("malformed type: account"));
}

#[test]
fn directory_mode_skips_bad_files() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("nested")).unwrap();
    fs::write(dir.path().join("a.json"), TOKEN_ABI).unwrap();
    fs::write(dir.path().join("nested").join("b.abi"), r#"[{"type": "receive"}]"#).unwrap();
    fs::write(dir.path().join("broken.json"), "{").unwrap();
    fs::write(dir.path().join("notes.txt"), "not an abi").unwrap();

    let output = converter()
        .args(["-i", dir.path().to_str().unwrap(), "-f", "sighash"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("balanceOf(address)"));
    assert!(out.contains("receive()"));
    assert!(out.contains("2 file(s) converted"));
    assert!(out.contains("1 file(s) failed"));
    assert!(out.contains("Total: 3 ABI file(s) as sighash"));
}

#[test]
fn dedup_flag_drops_repeats() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dup.json");
    fs::write(
        &path,
        r#"[{"type": "function", "name": "f"}, {"type": "function", "name": "f", "stateMutability": "view"}]"#,
    )
    .unwrap();

    let all = converter().args(["-i", path.to_str().unwrap()]).output().unwrap();
    assert_eq!(stdout(&all), "function f()\nfunction f() view\n");

    let deduped = converter().args(["-i", path.to_str().unwrap(), "--dedup"]).output().unwrap();
    assert_eq!(stdout(&deduped), "function f()\n");
}
