use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use filedesk_core::{
    ActionOptions, ArchiveFormat, CombineMode, CombineOptions, CompressOptions, ConvertMode,
    ConvertOptions, DocumentFormat, ReduceMode, ReduceOptions, RenameMode, RenameOptions,
};
use filedesk_engine::SimulationSettings;
use filedesk_logging::LogDestination;

#[derive(Parser, Debug)]
#[command(name = "filedesk")]
#[command(about = "Queue document actions for a set of files and watch them run", long_about = None)]
pub struct Args {
    /// Files to add (docx, pdf, xls, png and friends)
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Action to queue, e.g. `convert:png`, `reduce:optimize:5`, `rename:before:2024-`
    #[arg(short, long = "action", value_name = "SPEC", value_parser = parse_action_spec)]
    pub actions: Vec<ActionOptions>,

    /// Load a saved action set and queue its actions before the ones given with --action
    #[arg(long, value_name = "NAME")]
    pub preset: Option<String>,

    /// Save the final queue as a named action set
    #[arg(long, value_name = "NAME")]
    pub save_preset: Option<String>,

    /// Directory holding saved action sets
    #[arg(long, value_name = "DIR", default_value = "presets")]
    pub presets_dir: PathBuf,

    /// Progress tick in milliseconds
    #[arg(long, default_value_t = 200)]
    pub tick_ms: u64,

    /// Delay between reaching 100% and completion, in milliseconds
    #[arg(long, default_value_t = 500)]
    pub settle_ms: u64,

    /// Seed for reproducible progress curves
    #[arg(long)]
    pub seed: Option<u64>,

    /// Where log output goes
    #[arg(long, value_enum, default_value_t = LogTarget::File)]
    pub log: LogTarget,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,

    /// Queue everything and print the plan without processing
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogTarget {
    Terminal,
    File,
    Both,
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::File => LogDestination::File,
            LogTarget::Both => LogDestination::Both,
        }
    }
}

/// Everything the app needs once arguments are validated.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub files: Vec<PathBuf>,
    pub actions: Vec<ActionOptions>,
    pub preset: Option<String>,
    pub save_preset: Option<String>,
    pub presets_dir: PathBuf,
    pub simulation: SimulationSettings,
    pub seed: Option<u64>,
    pub render_interval: Duration,
    pub dry_run: bool,
}

impl From<Args> for AppConfig {
    fn from(args: Args) -> Self {
        let simulation = SimulationSettings::with_timing(
            Duration::from_millis(args.tick_ms.max(1)),
            Duration::from_millis(args.settle_ms),
        );
        Self {
            files: args.files,
            actions: args.actions,
            preset: args.preset,
            save_preset: args.save_preset,
            presets_dir: args.presets_dir,
            render_interval: simulation.tick.max(Duration::from_millis(100)),
            simulation,
            seed: args.seed,
            dry_run: args.dry_run,
        }
    }
}

/// Parses `kind[:arg...]` into action options.
pub fn parse_action_spec(spec: &str) -> Result<ActionOptions, String> {
    let mut parts = spec.split(':');
    let kind = parts.next().unwrap_or_default().trim().to_ascii_lowercase();
    let args: Vec<&str> = parts.collect();

    match kind.as_str() {
        "convert" => {
            let format = args
                .first()
                .ok_or("convert needs a target format, e.g. convert:pdf")?;
            let target_format = parse_format(format)?;
            let mode = match args.get(1).map(|m| m.trim()) {
                None | Some("all") => ConvertMode::All,
                Some("individual") => ConvertMode::Individual,
                Some("selected") => ConvertMode::Selected,
                Some(other) => return Err(format!("unknown convert mode {other:?}")),
            };
            Ok(ActionOptions::Convert(ConvertOptions {
                target_format,
                mode,
            }))
        }
        "combine" => {
            let mode = match args.first().map(|m| m.trim()) {
                None | Some("same-format") => CombineMode::SameFormat,
                Some("merge") => CombineMode::Merge,
                Some("single-pdf") => CombineMode::SinglePdf,
                Some(other) => return Err(format!("unknown combine mode {other:?}")),
            };
            let output_format = match args.get(1) {
                Some(format) => Some(parse_format(format)?),
                None => CombineOptions::default().output_format,
            };
            let output_name = args
                .get(2)
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty());
            Ok(ActionOptions::Combine(CombineOptions {
                mode,
                output_format,
                output_name,
            }))
        }
        "reduce" => {
            let mode = match args.first().map(|m| m.trim()) {
                None | Some("optimize") => ReduceMode::Optimize,
                Some("maximum") => ReduceMode::Maximum,
                Some(other) => return Err(format!("unknown reduce mode {other:?}")),
            };
            let max_size_mb = match args.get(1) {
                Some(size) => Some(
                    size.trim()
                        .parse::<u32>()
                        .map_err(|_| format!("invalid max size {size:?}"))?,
                ),
                None if mode == ReduceMode::Optimize => ReduceOptions::default().max_size_mb,
                None => None,
            };
            Ok(ActionOptions::Reduce(ReduceOptions { mode, max_size_mb }))
        }
        "resize" => {
            if args.is_empty() {
                Ok(ActionOptions::Resize)
            } else {
                Err("resize takes no options".to_string())
            }
        }
        "rename" => {
            let mode = match args.first().map(|m| m.trim()) {
                Some("before") => RenameMode::AddBefore,
                Some("after") => RenameMode::AddAfter,
                Some("replace") => RenameMode::Replace,
                Some(other) => return Err(format!("unknown rename mode {other:?}")),
                None => return Err("rename needs a mode, e.g. rename:after:-final".to_string()),
            };
            // The text may itself contain ':'.
            let text = args.get(1..).map(|rest| rest.join(":")).unwrap_or_default();
            Ok(ActionOptions::Rename(RenameOptions::with_text(mode, text)))
        }
        "compress" => {
            let output_name = args
                .first()
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| CompressOptions::default().output_name);
            let format = match args.get(1).map(|f| f.trim()) {
                None | Some("zip") => ArchiveFormat::Zip,
                Some(other) => return Err(format!("unsupported archive format {other:?}")),
            };
            Ok(ActionOptions::Compress(CompressOptions {
                output_name,
                format,
            }))
        }
        "" => Err("empty action spec".to_string()),
        other => Err(format!("unknown action {other:?}")),
    }
}

fn parse_format(raw: &str) -> Result<DocumentFormat, String> {
    raw.parse::<DocumentFormat>().map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn convert_defaults_to_all_mode() {
        assert_eq!(
            parse_action_spec("convert:PNG"),
            Ok(ActionOptions::Convert(ConvertOptions {
                target_format: DocumentFormat::Png,
                mode: ConvertMode::All,
            }))
        );
        assert!(parse_action_spec("convert").is_err());
        assert!(parse_action_spec("convert:bmp").is_err());
    }

    #[test]
    fn combine_single_pdf_with_name() {
        assert_eq!(
            parse_action_spec("combine:single-pdf:pdf:bundle"),
            Ok(ActionOptions::Combine(CombineOptions {
                mode: CombineMode::SinglePdf,
                output_format: Some(DocumentFormat::Pdf),
                output_name: Some("bundle".to_string()),
            }))
        );
    }

    #[test]
    fn reduce_maximum_has_no_size_cap() {
        assert_eq!(
            parse_action_spec("reduce:maximum"),
            Ok(ActionOptions::Reduce(ReduceOptions {
                mode: ReduceMode::Maximum,
                max_size_mb: None,
            }))
        );
        assert_eq!(
            parse_action_spec("reduce"),
            Ok(ActionOptions::Reduce(ReduceOptions::default()))
        );
        assert!(parse_action_spec("reduce:optimize:big").is_err());
    }

    #[test]
    fn rename_keeps_colons_in_text() {
        let Ok(ActionOptions::Rename(options)) = parse_action_spec("rename:before:12:30 ") else {
            panic!("rename spec should parse");
        };
        assert_eq!(options.mode, RenameMode::AddBefore);
        assert_eq!(options.text, "12:30 ");
        assert!(parse_action_spec("rename").is_err());
    }

    #[test]
    fn compress_and_resize() {
        assert_eq!(
            parse_action_spec("compress"),
            Ok(ActionOptions::Compress(CompressOptions::default()))
        );
        assert_eq!(parse_action_spec("resize"), Ok(ActionOptions::Resize));
        assert!(parse_action_spec("resize:50%").is_err());
        assert!(parse_action_spec("compress:x:rar").is_err());
    }

    #[test]
    fn unknown_kind_is_rejected() {
        assert!(parse_action_spec("shred").is_err());
        assert!(parse_action_spec("").is_err());
    }

    #[test]
    fn args_parse_into_config() {
        let args = Args::parse_from([
            "filedesk",
            "a.pdf",
            "b.docx",
            "-a",
            "convert:png",
            "--action",
            "resize",
            "--tick-ms",
            "50",
            "--settle-ms",
            "0",
            "--seed",
            "7",
            "--dry-run",
        ]);
        let config = AppConfig::from(args);

        assert_eq!(config.files.len(), 2);
        assert_eq!(config.actions.len(), 2);
        assert_eq!(config.simulation.tick, Duration::from_millis(50));
        assert_eq!(config.simulation.settle, Duration::ZERO);
        assert_eq!(config.render_interval, Duration::from_millis(100));
        assert_eq!(config.seed, Some(7));
        assert!(config.dry_run);
    }
}
