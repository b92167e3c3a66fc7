use clap::{Parser, Subcommand};
use serde_json::{Value, json};

use crate::config::CliConfig;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Inspect and patch 24C16 odometer EEPROM dumps",
    long_about = None
)]
pub struct Cli {
    /// TOML config file (falls back to $EEP_CONFIG, then built-in defaults)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Print tool results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Decode odometer, checksum, immobilizer and key codes
    Read {
        /// 2048-byte .bin dump
        file: String,
    },
    /// Check the stored odometer checksum (exit status 3 on mismatch)
    Verify {
        /// 2048-byte .bin dump
        file: String,
    },
    /// Show the checksum a new odometer value would be written with
    Preview {
        /// Dump providing the checksum seed
        file: String,
        /// New odometer value in whole units
        #[arg(allow_negative_numbers = true)]
        odometer: i64,
    },
    /// Write a copy of the dump with a new odometer value
    Patch {
        /// Source dump
        file: String,
        /// New odometer value in whole units
        #[arg(allow_negative_numbers = true)]
        odometer: i64,
        /// Output path (default: configured file name next to the source)
        #[arg(long, short)]
        output: Option<String>,
        /// Skip the backup when the output overwrites the source
        #[arg(long)]
        no_backup: bool,
    },
    /// List available tools and their argument schemas
    Tools,
}

impl Command {
    /// Tool name and JSON arguments for this subcommand. `None` for `tools`.
    pub fn invocation(&self, config: &CliConfig) -> Option<(&'static str, Value)> {
        let require_bin = config.require_bin_extension;
        match self {
            Command::Read { file } => Some((
                "read_dump",
                json!({ "path": file, "require_bin_extension": require_bin }),
            )),
            Command::Verify { file } => Some((
                "verify_checksum",
                json!({ "path": file, "require_bin_extension": require_bin }),
            )),
            Command::Preview { file, odometer } => Some((
                "preview_checksum",
                json!({
                    "path": file,
                    "odometer": odometer,
                    "require_bin_extension": require_bin,
                }),
            )),
            Command::Patch {
                file,
                odometer,
                output,
                no_backup,
            } => {
                let mut args = json!({
                    "path": file,
                    "odometer": odometer,
                    "output_name": config.output.file_name,
                    "backup": config.output.backup && !no_backup,
                    "require_bin_extension": require_bin,
                });
                if let Some(output) = output {
                    args["output"] = json!(output);
                }
                Some(("patch_odometer", args))
            }
            Command::Tools => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_read() {
        let cli = Cli::try_parse_from(["eep", "read", "dump.bin"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Read {
                file: "dump.bin".into()
            }
        );
        assert!(!cli.json);
    }

    #[test]
    fn parse_patch_with_flags() {
        let cli = Cli::try_parse_from([
            "eep",
            "patch",
            "dump.bin",
            "120000",
            "-o",
            "out.bin",
            "--no-backup",
            "--json",
        ])
        .unwrap();
        assert!(cli.json);
        assert_eq!(
            cli.command,
            Command::Patch {
                file: "dump.bin".into(),
                odometer: 120_000,
                output: Some("out.bin".into()),
                no_backup: true,
            }
        );
    }

    #[test]
    fn negative_odometer_reaches_validation() {
        let cli = Cli::try_parse_from(["eep", "preview", "dump.bin", "-5"]).unwrap();
        assert!(matches!(cli.command, Command::Preview { odometer: -5, .. }));
    }

    #[test]
    fn non_numeric_odometer_rejected_by_parser() {
        assert!(Cli::try_parse_from(["eep", "patch", "dump.bin", "abc"]).is_err());
    }

    #[test]
    fn patch_invocation_uses_config() {
        let mut config = CliConfig::default();
        config.output.file_name = "fixed.bin".into();
        let command = Command::Patch {
            file: "dump.bin".into(),
            odometer: 10,
            output: None,
            no_backup: false,
        };
        let (tool, args) = command.invocation(&config).unwrap();
        assert_eq!(tool, "patch_odometer");
        assert_eq!(args["output_name"], "fixed.bin");
        assert_eq!(args["backup"], true);
        assert!(args.get("output").is_none());
    }

    #[test]
    fn no_backup_overrides_config() {
        let command = Command::Patch {
            file: "dump.bin".into(),
            odometer: 10,
            output: Some("dump.bin".into()),
            no_backup: true,
        };
        let (_, args) = command.invocation(&CliConfig::default()).unwrap();
        assert_eq!(args["backup"], false);
        assert_eq!(args["output"], "dump.bin");
    }

    #[test]
    fn tools_has_no_invocation() {
        assert!(Command::Tools.invocation(&CliConfig::default()).is_none());
    }
}
