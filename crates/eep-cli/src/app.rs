//! Runs one parsed command against a dump source and renders the result.

use std::io::Write;

use serde_json::Value;

use eep_tools::{DumpSource, ToolResult};

use crate::cli::{Cli, Command};
use crate::config::CliConfig;
use crate::registry::ToolRegistry;

pub const EXIT_OK: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;
/// `verify` found a stored checksum that does not match. Distinct from
/// clap's usage error status 2.
pub const EXIT_CHECKSUM_MISMATCH: u8 = 3;

/// Execute `cli.command` and write its output to `out`. Returns the process
/// exit status. Tool errors are rendered, not returned.
pub async fn run<W: Write>(
    cli: &Cli,
    config: &CliConfig,
    registry: &ToolRegistry,
    source: &dyn DumpSource,
    out: &mut W,
) -> anyhow::Result<u8> {
    let Some((tool, args)) = cli.command.invocation(config) else {
        render_tool_list(registry, cli.json, out)?;
        return Ok(EXIT_OK);
    };

    let result = match registry.execute(tool, args, source).await {
        Ok(result) => result,
        Err(e) => {
            tracing::error!(tool, error = %e, "tool failed");
            ToolResult::failure(tool, e.to_string())
        }
    };

    render_result(&result, cli.json, out)?;
    Ok(exit_status(&cli.command, &result))
}

fn exit_status(command: &Command, result: &ToolResult) -> u8 {
    if !result.success {
        return EXIT_FAILURE;
    }
    let mismatch = result
        .data
        .as_ref()
        .and_then(|d| d["valid"].as_bool())
        .is_some_and(|valid| !valid);
    if matches!(command, Command::Verify { .. }) && mismatch {
        EXIT_CHECKSUM_MISMATCH
    } else {
        EXIT_OK
    }
}

fn render_result<W: Write>(result: &ToolResult, json: bool, out: &mut W) -> anyhow::Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(result)?)?;
        return Ok(());
    }

    if let Some(error) = &result.error {
        writeln!(out, "error: {error}")?;
        return Ok(());
    }
    if let Some(summary) = &result.summary {
        writeln!(out, "{summary}")?;
    }
    if let Some(Value::Object(fields)) = &result.data {
        for (key, value) in fields {
            writeln!(out, "  {:<24} {}", label(key), plain(value))?;
        }
    }
    Ok(())
}

fn render_tool_list<W: Write>(registry: &ToolRegistry, json: bool, out: &mut W) -> anyhow::Result<()> {
    let tools = registry.list_tools();
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&tools)?)?;
    } else {
        for tool in tools {
            writeln!(out, "{:<18} {}", tool.name, tool.description)?;
        }
    }
    Ok(())
}

fn label(key: &str) -> String {
    format!("{}:", key.replace('_', " "))
}

/// Strings without quotes, null as "-", everything else as compact JSON.
fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "-".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use eep_codec::Field;
    use eep_tools::MockDumpSource;
    use eep_tools::mock::SAMPLE_PATH;

    async fn run_args(args: &[&str], source: &MockDumpSource) -> (u8, String) {
        let cli = Cli::try_parse_from(args.iter().copied()).unwrap();
        let registry = ToolRegistry::with_defaults();
        let mut out = Vec::new();
        let code = run(&cli, &CliConfig::default(), &registry, source, &mut out)
            .await
            .unwrap();
        (code, String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn read_prints_fields() {
        let source = MockDumpSource::with_sample_dump();
        let (code, out) = run_args(&["eep", "read", SAMPLE_PATH], &source).await;
        assert_eq!(code, EXIT_OK);
        assert!(out.starts_with("Odometer 154321 kms, checksum BB (valid)"));
        assert!(out.contains("immo bypass 1:"));
        assert!(out.contains("0A FF 10 20 30 40 50 60 70 80"));
    }

    #[tokio::test]
    async fn verify_mismatch_exit_status() {
        let source = MockDumpSource::new();
        let mut bytes = eep_codec::sample::sample_dump().into_vec();
        bytes[Field::MileageChecksum.offset()] = 0x00;
        source.add_file("/dumps/bad.bin", bytes);

        let (code, _) = run_args(&["eep", "verify", "/dumps/bad.bin"], &source).await;
        assert_eq!(code, EXIT_CHECKSUM_MISMATCH);

        // read stays informational
        let (code, out) = run_args(&["eep", "read", "/dumps/bad.bin"], &source).await;
        assert_eq!(code, EXIT_OK);
        assert!(out.contains("MISMATCH"));
    }

    #[test]
    fn mismatch_status_differs_from_usage_error() {
        for args in [&["eep", "verify"][..], &["eep", "patch", "x.bin", "abc"][..]] {
            let err = Cli::try_parse_from(args.iter().copied()).unwrap_err();
            assert_ne!(err.exit_code(), i32::from(EXIT_CHECKSUM_MISMATCH));
        }
        assert_eq!(EXIT_CHECKSUM_MISMATCH, 3);
    }

    #[tokio::test]
    async fn tool_error_is_rendered() {
        let source = MockDumpSource::new();
        let (code, out) = run_args(&["eep", "read", "/dumps/missing.bin"], &source).await;
        assert_eq!(code, EXIT_FAILURE);
        assert_eq!(out.trim(), "error: dump not found: /dumps/missing.bin");
    }

    #[tokio::test]
    async fn json_output_parses() {
        let source = MockDumpSource::with_sample_dump();
        let (code, out) = run_args(&["eep", "--json", "preview", SAMPLE_PATH, "12345"], &source).await;
        assert_eq!(code, EXIT_OK);
        let result: ToolResult = serde_json::from_str(&out).unwrap();
        assert_eq!(result.tool_name, "preview_checksum");
        assert_eq!(result.data.unwrap()["checksum"], "33");
    }

    #[tokio::test]
    async fn patch_writes_output() {
        let source = MockDumpSource::with_sample_dump();
        let (code, out) = run_args(&["eep", "patch", SAMPLE_PATH, "1000"], &source).await;
        assert_eq!(code, EXIT_OK);
        assert!(out.starts_with("Wrote /dumps/modified.bin: odometer 154321 -> 1000 kms"));
        assert!(source.file("/dumps/modified.bin").is_some());
    }

    #[tokio::test]
    async fn negative_odometer_fails() {
        let source = MockDumpSource::with_sample_dump();
        let (code, out) = run_args(&["eep", "patch", SAMPLE_PATH, "-1"], &source).await;
        assert_eq!(code, EXIT_FAILURE);
        assert!(out.contains("must not be negative"));
        assert!(source.written_paths().is_empty());
    }

    #[tokio::test]
    async fn tools_listing() {
        let source = MockDumpSource::new();
        let (code, out) = run_args(&["eep", "tools"], &source).await;
        assert_eq!(code, EXIT_OK);
        assert_eq!(out.lines().count(), 4);
        assert!(out.contains("patch_odometer"));
    }

    #[test]
    fn plain_values() {
        assert_eq!(plain(&Value::String("BB".into())), "BB");
        assert_eq!(plain(&Value::Null), "-");
        assert_eq!(plain(&serde_json::json!(true)), "true");
        assert_eq!(label("key_code_1"), "key code 1:");
    }
}
