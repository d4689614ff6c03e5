//! End-to-end tests for the fieldcrypt binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const KEY: &str = "MySuperSecretKey";

fn fieldcrypt(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("fieldcrypt").unwrap();
    cmd.env("FIELDCRYPT_CONFIG_DIR", config_dir.path())
        .env_remove("FIELDCRYPT_ENCRYPTION_KEY")
        .env_remove("RUST_LOG");
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output).unwrap().trim_end().to_string()
}

#[test]
fn encrypt_then_decrypt_date_with_env_key() {
    let dir = TempDir::new().unwrap();

    let stored = stdout_of(
        fieldcrypt(&dir)
            .env("FIELDCRYPT_ENCRYPTION_KEY", KEY)
            .args(["encrypt", "--kind", "date", "1988-03-28"]),
    );
    assert_eq!(stored, "u/JbG4KguO6q0Eh7PjGfYw==");

    fieldcrypt(&dir)
        .env("FIELDCRYPT_ENCRYPTION_KEY", KEY)
        .args(["decrypt", "--kind", "date", &stored])
        .assert()
        .success()
        .stdout("1988-03-28\n");
}

#[test]
fn explicit_key_round_trip() {
    let dir = TempDir::new().unwrap();

    let stored = stdout_of(fieldcrypt(&dir).args(["--key", KEY, "encrypt", "ma_chaine_a_chiffrer"]));
    assert_ne!(stored, "ma_chaine_a_chiffrer");

    fieldcrypt(&dir)
        .args(["--key", KEY, "decrypt", &stored])
        .assert()
        .success()
        .stdout("ma_chaine_a_chiffrer\n");
}

#[test]
fn no_key_passes_canonical_text_through() {
    let dir = TempDir::new().unwrap();

    fieldcrypt(&dir)
        .args(["encrypt", "--kind", "datetime", "2017-03-28T16:25:46"])
        .assert()
        .success()
        .stdout("2017-03-28T16:25:46\n");
}

#[test]
fn key_from_settings_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.json"),
        format!(r#"{{"encryption_key":"{}"}}"#, KEY),
    )
    .unwrap();

    fieldcrypt(&dir)
        .args(["encrypt", "--kind", "text", "plain last name"])
        .assert()
        .success()
        .stdout("QSsxt5JpKdKnyAGYl2HLbA==\n");
}

#[test]
fn decrypting_plaintext_fails() {
    let dir = TempDir::new().unwrap();

    fieldcrypt(&dir)
        .args(["--key", KEY, "decrypt", "--kind", "date", "1988-03-28"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("attribute conversion from storage failed"));
}

#[test]
fn invalid_key_length_fails_setup() {
    let dir = TempDir::new().unwrap();

    fieldcrypt(&dir)
        .args(["--key", "short", "encrypt", "value"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cipher setup failed"));
}

#[test]
fn init_and_config_never_print_key() {
    let dir = TempDir::new().unwrap();

    fieldcrypt(&dir).arg("init").assert().success();
    assert!(dir.path().join("config.json").exists());

    fieldcrypt(&dir)
        .args(["--key", KEY, "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Encryption enabled: true"))
        .stdout(predicate::str::contains(KEY).not());
}
