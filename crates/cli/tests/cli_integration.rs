use std::process::Command;

fn arglet() -> Command {
    Command::new(env!("CARGO_BIN_EXE_arglet"))
}

#[test]
fn help_works() {
    let out = arglet()
        .arg("--help")
        .output()
        .expect("failed to run arglet --help");
    assert!(
        out.status.success(),
        "arglet --help failed:\nstatus: {}\nstderr:\n{}",
        out.status,
        String::from_utf8_lossy(&out.stderr),
    );
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(
        stdout.contains("Usage: arglet") && stdout.contains("--flag") && stdout.contains("--option"),
        "unexpected help output:\n{stdout}"
    );
}

#[test]
fn classifies_mixed_argv() {
    let out = arglet()
        .args(["--flag", "--feature-xyz", "--option", "-n", "--"])
        .args(["--feature-xyz", "-n5", "blah.c", "woof.moo"])
        .output()
        .expect("failed to run arglet");
    assert!(
        out.status.success(),
        "classification failed:\nstderr:\n{}",
        String::from_utf8_lossy(&out.stderr),
    );
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert_eq!(
        stdout,
        "flag --feature-xyz\nflag -n = 5\npositional blah.c\npositional woof.moo\n"
    );
}

#[test]
fn json_output() {
    let out = arglet()
        .args(["--json", "--option", "-o", "--", "-o42"])
        .output()
        .expect("failed to run arglet");
    assert!(
        out.status.success(),
        "json run failed:\nstderr:\n{}",
        String::from_utf8_lossy(&out.stderr),
    );
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(
        stdout.contains("\"flag\": \"-o\"") && stdout.contains("\"value\": \"42\""),
        "unexpected json output:\n{stdout}"
    );
}

#[test]
fn no_table_treats_dashes_as_positional() {
    let out = arglet()
        .args(["--", "-x", "--y"])
        .output()
        .expect("failed to run arglet");
    assert!(
        out.status.success(),
        "positional run failed:\nstderr:\n{}",
        String::from_utf8_lossy(&out.stderr),
    );
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert_eq!(stdout, "positional -x\npositional --y\n");
}

#[test]
fn unknown_argument_fails() {
    let out = arglet()
        .args(["--flag", "-a", "--", "-x"])
        .output()
        .expect("failed to run arglet");
    assert!(!out.status.success(), "scan of undeclared flag should fail");
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(
        stderr.contains("unknown argument"),
        "unexpected error output:\n{stderr}"
    );
}

#[test]
fn positional_bounds_are_enforced() {
    let out = arglet()
        .args(["--min", "2", "--", "only-one"])
        .output()
        .expect("failed to run arglet");
    assert!(!out.status.success(), "too few positionals should fail");
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(
        stderr.contains("positional"),
        "unexpected error output:\n{stderr}"
    );
}

#[test]
fn quiet_suppresses_output() {
    let out = arglet()
        .args(["-q", "--", "a", "b"])
        .output()
        .expect("failed to run arglet");
    assert!(out.status.success());
    assert!(out.stdout.is_empty(), "expected no stdout in quiet mode");
}
