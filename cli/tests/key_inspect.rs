use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

fn project_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .to_path_buf()
}

fn test_key_path(name: &str) -> String {
    project_root()
        .join("testdata")
        .join(name)
        .to_string_lossy()
        .to_string()
}

fn kagi() -> Command {
    let mut cmd = Command::cargo_bin("kagi").unwrap();
    cmd.current_dir(project_root());
    cmd
}

#[test]
fn test_key_inspect_rsa_text() {
    kagi()
        .args(["key", "inspect", &test_key_path("pkcs1/rsa.key")])
        .assert()
        .success()
        .stdout(predicate::str::contains("Algorithm: RSA"))
        .stdout(predicate::str::contains("Key Size: 1024 bits"))
        .stdout(predicate::str::contains("Public Exponent: 65537"));
}

#[test]
fn test_key_inspect_ec_json() {
    kagi()
        .args([
            "key",
            "inspect",
            &test_key_path("sec1/secp256k1.key"),
            "-o",
            "json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"algorithm\": \"EC\""))
        .stdout(predicate::str::contains("\"name\": \"secp256k1\""))
        .stdout(predicate::str::contains("\"oid\": \"1.3.132.0.10\""));
}

#[test]
fn test_key_inspect_show_oid() {
    kagi()
        .args([
            "key",
            "inspect",
            &test_key_path("pkcs8/ed25519.key"),
            "--show-oid",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Algorithm: EdDSA (1.3.101.112)"))
        .stdout(predicate::str::contains("Type: Ed25519"));
}

#[test]
fn test_key_inspect_stdin() {
    let input = std::fs::read_to_string(test_key_path("pkcs8/x25519.key")).unwrap();
    kagi()
        .args(["key", "inspect"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Algorithm: XDH"));
}

#[test]
fn test_key_inspect_encrypted_with_password() {
    kagi()
        .args([
            "key",
            "inspect",
            &test_key_path("encrypted/ec-aes256.key"),
            "--password",
            "test",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Curve: secp256r1"));
}

#[test]
fn test_key_inspect_encrypted_password_env() {
    kagi()
        .env("KAGI_KEY_PASSWORD", "test")
        .args([
            "key",
            "inspect",
            &test_key_path("encrypted/rsa-aes256.key"),
            "--password-env",
            "KAGI_KEY_PASSWORD",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Algorithm: RSA"));
}

#[test]
fn test_key_inspect_encrypted_without_password() {
    kagi()
        .args(["key", "inspect", &test_key_path("encrypted/rsa-aes256.key")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error loading private key from"))
        .stderr(predicate::str::contains("password is required"));
}

#[test]
fn test_key_inspect_wrong_password() {
    kagi()
        .args([
            "key",
            "inspect",
            &test_key_path("encrypted/rsa-aes256.key"),
            "--password",
            "wrong",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to decrypt"));
}

#[test]
fn test_key_inspect_unsupported() {
    kagi()
        .args(["key", "inspect", &test_key_path("sec1/brainpoolP384t1.key")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unrecognized private key format"));
}

#[test]
fn test_key_inspect_not_pem() {
    kagi()
        .args(["key", "inspect", &test_key_path("banner.txt")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no PEM encoded private key found"));
}

#[test]
fn test_key_inspect_all() {
    kagi()
        .args([
            "key",
            "inspect",
            &test_key_path("mixed/two-keys.pem"),
            "--all",
            "-o",
            "json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"algorithm\": \"EdDSA\""))
        .stdout(predicate::str::contains("\"algorithm\": \"RSA\""));
}

#[test]
fn test_key_convert_sec1_to_pkcs8() {
    let expected = std::fs::read_to_string(test_key_path("pkcs8/secp384r1.key")).unwrap();
    kagi()
        .args(["key", "convert", &test_key_path("sec1/secp384r1.key")])
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn test_key_convert_encrypted() {
    let expected = std::fs::read_to_string(test_key_path("pkcs8/rsa.key")).unwrap();
    kagi()
        .args([
            "key",
            "convert",
            &test_key_path("encrypted/rsa-aes128-sha1.key"),
            "--password",
            "test",
        ])
        .assert()
        .success()
        .stdout(expected);
}
