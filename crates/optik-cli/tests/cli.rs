//! Runs the optik binary against files in a temporary directory.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn optik(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_optik"))
        .arg("--color=never")
        .args(args)
        .env_remove("OPTIK_PROFILES_DIR")
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn write(dir: &Path, name: &str, bytes: &[u8]) -> String {
    let path = dir.join(name);
    fs::write(&path, bytes).unwrap();
    path.to_string_lossy().into_owned()
}

fn fixture() -> (TempDir, String, String) {
    let dir = TempDir::new().unwrap();
    // Windows-1254 bytes, as exported by older optical reader software.
    let key = write(
        dir.path(),
        "key.txt",
        b"Soru No\tDers\tCevap\n1\tT\xfcrk\xe7e\tA\n2\tT\xfcrk\xe7e\tB\n",
    );
    let answers = write(
        dir.path(),
        "answers.txt",
        "Öğrenci No;Ad Soyad;Kitapçık;Cevaplar\n\
         101;Ali Kaya;A;AB\n\
         102;Ece Şahin;A;AC\n"
            .as_bytes(),
    );
    (dir, key, answers)
}

#[test]
fn exams_lists_shipped_profiles() {
    let output = optik(&["exams"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for code in ["LGS", "TYT", "AYT_SAY"] {
        assert!(stdout.contains(code), "missing {code} in {stdout}");
    }
}

#[test]
fn detect_prints_matched_headers() {
    let (_dir, key, _answers) = fixture();
    let output = optik(&["detect", &key]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Soru No"));
    assert!(stdout.contains("Cevap"));
}

#[test]
fn score_json_report() {
    let (_dir, key, answers) = fixture();
    let output = optik(&[
        "score", "--exam", "TYT", "--key", &key, "--answers", &answers, "--json",
    ]);
    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["exam"], "TYT");
    assert_eq!(report["statistics"]["student_count"], 2);
    assert_eq!(report["students"][0]["student_name"], "Ali Kaya");
    assert_eq!(report["students"][0]["net"], 2.0);
    assert_eq!(report["students"][1]["net"], 0.75);
}

#[test]
fn missing_file_fails() {
    let output = optik(&["detect", "/nonexistent/key.txt"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("error:"));
}
