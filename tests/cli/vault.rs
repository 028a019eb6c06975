//! Tests for `kpas vault`.

use crate::support::*;

#[test]
fn test_encrypt_then_view() {
    let t = Test::new();
    let file = t.dir.path().join("secrets.yml");
    std::fs::write(&file, "token: abc\n").unwrap();

    let output = t.vault_encrypt(&file, "s3cret");
    assert_success(&output);
    assert_stdout_contains(&output, "encrypted");
    assert_vault_file(&file, "abc");

    let output = t.vault_view(&file, "s3cret");
    assert_success(&output);
    assert_eq!(stdout(&output), "token: abc\n");
}

#[test]
fn test_view_wrong_password() {
    let t = Test::new();
    let file = t.dir.path().join("secrets.yml");
    std::fs::write(&file, "token: abc\n").unwrap();
    assert_success(&t.vault_encrypt(&file, "right"));

    let output = t.vault_view(&file, "wrong");
    assert_failure(&output);
    assert_stderr_contains(&output, "wrong vault password");
    assert_stderr_contains(&output, "check the vault password");
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_view_plaintext_file_fails() {
    let t = Test::new();
    let file = t.dir.path().join("plain.yml");
    std::fs::write(&file, "a: 1\n").unwrap();

    let output = t.vault_view(&file, PASSWORD);
    assert_failure(&output);
    assert_stderr_contains(&output, "is not a vault file");
}

#[test]
fn test_view_reference_fixture() {
    let t = Test::new();
    let file = t.dir.path().join("fixture.yml");
    std::fs::write(&file, ANSIBLE_VAULT_FIXTURE).unwrap();

    let output = t.vault_view(&file, FIXTURE_PASSWORD);
    assert_success(&output);
    assert_eq!(stdout(&output), FIXTURE_PLAINTEXT);
}

#[test]
fn test_encrypt_already_encrypted_is_noop() {
    let t = Test::new();
    let file = t.dir.path().join("fixture.yml");
    std::fs::write(&file, ANSIBLE_VAULT_FIXTURE).unwrap();

    let output = t.vault_encrypt(&file, PASSWORD);
    assert_success(&output);
    assert_stdout_contains(&output, "already encrypted");
    assert_eq!(std::fs::read_to_string(&file).unwrap(), ANSIBLE_VAULT_FIXTURE);
}

#[test]
fn test_view_missing_file() {
    let t = Test::new();

    let output = t.vault_view(&t.dir.path().join("nope.yml"), PASSWORD);
    assert_failure(&output);
}
