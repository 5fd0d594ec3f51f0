use anyhow::Result;
use insta::assert_snapshot;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::{CliTest, run};

const RUST_MAIN: &str = r#"
fn main() {
    let url = std::env::var("DATABASE_URL").unwrap();
    let port = std::env::var(
        "PORT"
    ).unwrap_or_default();
}
"#;

#[test]
fn test_template_ok() -> Result<()> {
    let test = CliTest::with_files(&[
        (".env.example", "export DATABASE_URL=postgres://localhost/db\nexport PORT=8080\n"),
        ("src/main.rs", RUST_MAIN),
    ])?;

    let output = run(test.check_command())?;

    assert_eq!(output.code, Some(0));
    assert_snapshot!(output.stdout, @".env.example: OK");
    Ok(())
}

#[test]
fn test_unused_and_missing() -> Result<()> {
    let test = CliTest::with_files(&[
        (
            ".env.example",
            "# Database\nexport DATABASE_URL=postgres://localhost/db\nexport LEGACY_FLAG=1\n",
        ),
        ("src/main.rs", RUST_MAIN),
    ])?;

    let output = run(test.check_command())?;

    // Findings alone do not fail the run.
    assert_eq!(output.code, Some(0));
    assert_snapshot!(output.stdout, @r"
    .env.example: Unused envs
     LEGACY_FLAG
    .env.example: Missing envs
     PORT
    ");
    Ok(())
}

#[test]
fn test_strict_fails_on_findings() -> Result<()> {
    let test = CliTest::with_files(&[
        (".env.example", "export DATABASE_URL=x\n"),
        ("src/main.rs", RUST_MAIN),
    ])?;

    let mut cmd = test.check_command();
    cmd.arg("--strict");
    let output = run(cmd)?;

    assert_eq!(output.code, Some(1));
    assert_snapshot!(output.stdout, @r"
    .env.example: Missing envs
     PORT
    ");
    Ok(())
}

#[test]
fn test_strict_passes_when_clean() -> Result<()> {
    let test = CliTest::with_files(&[
        (".env.example", "export DATABASE_URL=x\nexport PORT=1\n"),
        (".env", "export DATABASE_URL=y\n"),
        ("src/main.rs", RUST_MAIN),
    ])?;

    let mut cmd = test.check_command();
    cmd.arg("--strict");
    let output = run(cmd)?;

    assert_eq!(output.code, Some(0));
    assert_snapshot!(output.stdout, @".env.example: OK");
    Ok(())
}

#[test]
fn test_missing_template() -> Result<()> {
    let test = CliTest::with_files(&[(".env", "export A=1\n")])?;

    let output = run(test.check_command())?;

    assert_eq!(output.code, Some(2));
    assert_eq!(output.stdout, "");
    assert!(
        output.stderr.contains(".env.example not found"),
        "stderr: {}",
        output.stderr
    );
    Ok(())
}

#[test]
fn test_invalid_template_aborts() -> Result<()> {
    let test = CliTest::with_files(&[
        (
            ".env.example",
            "export DATABASE_URL=x\nexport PORT=80 81\nPORT=1\n",
        ),
        (".env.local", "export UNDECLARED=1\n"),
        ("src/main.rs", RUST_MAIN),
    ])?;

    let output = run(test.check_command())?;

    assert_eq!(output.code, Some(2));
    assert_snapshot!(output.stdout, @r"
    .env.example: Error while parsing
     2: unquoted space
     3: line doesn't start with export: PORT=1
    ");
    Ok(())
}

#[test]
fn test_sibling_files_are_checked_independently() -> Result<()> {
    let test = CliTest::with_files(&[
        (".env.example", "export DATABASE_URL=x\nexport PORT=1\n"),
        (".env", "export DATABASE_URL=local\n"),
        (
            ".env.broken",
            "export PORT=1\nexport DATABASE_URL=$HOST/db\nexport PORT=2 3\n",
        ),
        (".env.staging", "export PORT=2\nexport SENTRY_DSN=abc\nexport DEBUG=1\n"),
        ("src/main.rs", RUST_MAIN),
    ])?;

    let output = run(test.check_command())?;

    assert_eq!(output.code, Some(0));
    assert_snapshot!(output.stdout, @r"
    .env.example: OK
    .env.broken: Error while parsing
     2: unknown variable $HOST
     3: unquoted space
    .env.staging: Error: Keys not declared in the template found
      DEBUG
      SENTRY_DSN
    ");
    Ok(())
}

#[test]
fn test_repeated_runs_are_identical() -> Result<()> {
    let test = CliTest::with_files(&[
        (".env.example", "export A=1\nexport B=2\n"),
        (".env.dev", "export C=1\n"),
        (".env.test", "nope\n"),
        ("src/lib.rs", r#"pub fn b() { let _ = std::env::var("B"); std::env::var("D"); }"#),
    ])?;

    let first = run(test.check_command())?;
    let second = run(test.check_command())?;

    assert_eq!(first.stdout, second.stdout);
    assert_eq!(first.code, second.code);
    Ok(())
}

#[test]
fn test_envconfig_and_hidden_dirs() -> Result<()> {
    let test = CliTest::with_files(&[
        (".env.example", "export RPC_URL=http://localhost:8899\n"),
        (
            "indexer/src/config.rs",
            "#[derive(Envconfig)]\npub struct Config {\n    #[envconfig(from = \"RPC_URL\")]\n    pub rpc_url: String,\n}\n",
        ),
        ("target/debug/build/out.rs", r#"std::env::var("BUILD_ONLY")"#),
        (".github/workflows/ci.rs", r#"std::env::var("CI_ONLY")"#),
    ])?;

    let output = run(test.check_command())?;

    assert_snapshot!(output.stdout, @".env.example: OK");
    Ok(())
}

#[test]
fn test_template_override() -> Result<()> {
    let test = CliTest::with_files(&[
        (".env.sample", "export DATABASE_URL=x\nexport PORT=1\n"),
        (".env", "export PORT=2\n"),
        ("src/main.rs", RUST_MAIN),
    ])?;

    let mut cmd = test.check_command();
    cmd.args(["--template", ".env.sample"]);
    let output = run(cmd)?;

    assert_eq!(output.code, Some(0));
    assert_snapshot!(output.stdout, @".env.sample: OK");
    Ok(())
}

#[test]
fn test_root_argument() -> Result<()> {
    let test = CliTest::with_files(&[
        ("service/.env.example", "export PORT=1\n"),
        ("service/src/main.rs", r#"std::env::var("PORT")"#),
        ("src/main.rs", r#"std::env::var("OUTSIDE")"#),
    ])?;

    let mut cmd = test.check_command();
    cmd.args(["--root", "service"]);
    let output = run(cmd)?;

    assert_eq!(output.code, Some(0));
    assert_snapshot!(output.stdout, @".env.example: OK");
    Ok(())
}

#[test]
fn test_config_file() -> Result<()> {
    let test = CliTest::with_files(&[
        (
            ".envcheckrc.json",
            r#"{
                "template": "deploy.env.template",
                "envFileName": "deploy.env",
                "ignores": ["vendor/**"],
                "accessPatterns": [{ "regex": "getenv\\(\\s*\"(\\w+)\"\\s*\\)", "group": 1 }],
                "strict": true
            }"#,
        ),
        ("deploy.env.template", "export API_TOKEN=secret\n"),
        ("deploy.env.prod", "export API_TOKEN=prod\nexport EXTRA=1\n"),
        ("scripts/run.php", r#"<?php $t = getenv("API_TOKEN");"#),
        ("vendor/lib.rs", r#"std::env::var("VENDORED")"#),
    ])?;

    let output = run(test.check_command())?;

    assert_eq!(output.code, Some(1));
    assert_snapshot!(output.stdout, @r"
    deploy.env.template: OK
    deploy.env.prod: Error: Keys not declared in the template found
      EXTRA
    ");
    Ok(())
}

#[test]
fn test_config_is_found_from_root_argument() -> Result<()> {
    let test = CliTest::with_files(&[
        ("service/.envcheckrc.json", r#"{ "template": "vars.template", "envFileName": "vars" }"#),
        ("service/vars.template", "export PORT=1\n"),
        ("service/vars.ci", "export PORT=2\nexport CI_ONLY=1\n"),
        ("service/src/main.rs", r#"std::env::var("PORT")"#),
    ])?;

    let mut cmd = test.check_command();
    cmd.args(["--root", "service"]);
    let output = run(cmd)?;

    assert_eq!(output.code, Some(0));
    assert_snapshot!(output.stdout, @r"
    vars.template: OK
    vars.ci: Error: Keys not declared in the template found
      CI_ONLY
    ");
    Ok(())
}

#[test]
fn test_invalid_config_is_error() -> Result<()> {
    let test = CliTest::with_files(&[
        (".envcheckrc.json", r#"{ "ignores": ["[invalid"] }"#),
        (".env.example", "export A=1\n"),
    ])?;

    let output = run(test.check_command())?;

    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("ignores"), "stderr: {}", output.stderr);
    Ok(())
}

#[test]
fn test_json_format() -> Result<()> {
    let test = CliTest::with_files(&[
        (".env.example", "export DATABASE_URL=x\nexport OLD=1\n"),
        (".env.bad", "export A=$B\n"),
        (".env.prod", "export NEW=1\n"),
        ("src/main.rs", RUST_MAIN),
    ])?;

    let mut cmd = test.check_command();
    cmd.args(["--format", "json"]);
    let output = run(cmd)?;

    assert_eq!(output.code, Some(0));
    let json: Value = serde_json::from_str(&output.stdout)?;
    assert_eq!(
        json,
        serde_json::json!({
            "template": {
                "file": ".env.example",
                "unused": ["OLD"],
                "missing": ["PORT"]
            },
            "files": [
                {
                    "file": ".env.bad",
                    "status": "parse_errors",
                    "errors": { "1": "unknown variable $B" }
                },
                {
                    "file": ".env.prod",
                    "status": "undeclared",
                    "keys": ["NEW"]
                }
            ]
        })
    );
    Ok(())
}
