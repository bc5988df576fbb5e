//! ChartLab CLI — compute indicators, validate parameters, manage presets.
//!
//! Commands:
//! - `compute` — enrich bars (file or synthetic) with indicator fields, print JSON
//! - `validate` — check one raw parameter value against its bounds
//! - `presets list|show|save|delete|export|import` — manage named presets

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use chartlab_core::data::{load_bars, synthetic_bars};
use chartlab_core::params::{validate_raw, ParamValue, ParameterForm};
use chartlab_core::{ChartConfig, IndicatorKind, ParameterSet, PresetStore};

#[derive(Parser)]
#[command(name = "chartlab", about = "ChartLab CLI — technical indicators for OHLCV bars")]
struct Cli {
    /// Path to a TOML config file. Missing file means defaults.
    #[arg(long, global = true, default_value = "chartlab.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute indicators over a bar series and print enriched points as JSON.
    Compute {
        /// CSV or JSON bar file.
        #[arg(long, conflicts_with = "synthetic")]
        bars: Option<PathBuf>,

        /// Generate this many synthetic bars instead of reading a file.
        #[arg(long)]
        synthetic: Option<usize>,

        /// Seed label for synthetic bars.
        #[arg(long, default_value = "demo")]
        label: String,

        /// Preset supplying parameters. Overrides the config file.
        #[arg(long)]
        preset: Option<String>,

        /// Comma-separated indicators (e.g. MA,RSI,MACD). Defaults to the config's list.
        #[arg(long, value_delimiter = ',')]
        indicators: Vec<IndicatorKind>,

        /// Parameter override as KIND.PARAM=VALUE (e.g. RSI.period=10). Repeatable.
        #[arg(long = "set")]
        overrides: Vec<String>,

        /// Write JSON here instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Validate one raw parameter value, e.g. `validate MA periods "10,20"`.
    Validate {
        indicator: String,
        param: String,
        value: String,
    },
    /// Preset management commands.
    Presets {
        #[command(subcommand)]
        action: PresetAction,
    },
}

#[derive(Subcommand)]
enum PresetAction {
    /// List built-in and custom presets.
    List,
    /// Print one preset as JSON.
    Show { name: String },
    /// Save a custom preset from a JSON parameter file.
    Save {
        name: String,

        #[arg(long)]
        from_file: PathBuf,

        #[arg(long, default_value = "")]
        description: String,
    },
    /// Delete a custom preset.
    Delete { name: String },
    /// Export custom presets as a JSON array.
    Export {
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Import custom presets from a JSON array file.
    Import { file: PathBuf },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ChartConfig::load(&cli.config)?;

    match cli.command {
        Commands::Compute {
            bars,
            synthetic,
            label,
            preset,
            indicators,
            overrides,
            output,
        } => run_compute(
            &config, bars, synthetic, &label, preset, indicators, &overrides, output,
        ),
        Commands::Validate {
            indicator,
            param,
            value,
        } => run_validate(&indicator, &param, &value),
        Commands::Presets { action } => run_presets(&config, action),
    }
}

#[allow(clippy::too_many_arguments)]
fn run_compute(
    config: &ChartConfig,
    bars_path: Option<PathBuf>,
    synthetic: Option<usize>,
    label: &str,
    preset: Option<String>,
    indicators: Vec<IndicatorKind>,
    overrides: &[String],
    output: Option<PathBuf>,
) -> Result<()> {
    let bars = match (bars_path, synthetic) {
        (Some(path), _) => load_bars(&path)
            .with_context(|| format!("failed to load bars from {}", path.display()))?,
        (None, Some(n)) => synthetic_bars(label, n),
        (None, None) => bail!("one of --bars or --synthetic is required"),
    };

    let mut config = config.clone();
    if preset.is_some() {
        config.preset = preset;
    }
    if !indicators.is_empty() {
        config.active = indicators;
    }

    let store = PresetStore::open(&config.preset_dir)?;
    let mut form = ParameterForm::new(config.resolve_parameters(&store)?);
    for raw in overrides {
        let (kind, param, value) = parse_override(raw)?;
        form.set(kind, param, value)
            .with_context(|| format!("invalid override '{raw}'"))?;
    }

    if form.has_errors() {
        let problems: Vec<String> = form
            .errors()
            .iter()
            .map(|((kind, param), e)| format!("{kind}.{param}: {e}"))
            .collect();
        bail!("invalid parameters: {}", problems.join("; "));
    }

    let points = form
        .preview(&bars, &config.active, &config.compute_options())
        .context("parameters incomplete for the requested indicators")?;
    tracing::info!(bars = bars.len(), indicators = config.active.len(), "computed indicators");

    let json = serde_json::to_string_pretty(&points)?;
    write_output(output.as_deref(), &json)
}

/// Split `KIND.PARAM=VALUE`.
fn parse_override(raw: &str) -> Result<(IndicatorKind, &str, &str)> {
    let (key, value) = raw
        .split_once('=')
        .with_context(|| format!("override '{raw}' must look like KIND.PARAM=VALUE"))?;
    let (kind, param) = key
        .split_once('.')
        .with_context(|| format!("override '{raw}' must look like KIND.PARAM=VALUE"))?;
    Ok((kind.trim().parse()?, param.trim(), value.trim()))
}

fn run_validate(indicator: &str, param: &str, value: &str) -> Result<()> {
    match validate_raw(indicator, param, value) {
        Ok(v) => {
            println!("ok: {}", format_value(&v));
            Ok(())
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

fn format_value(value: &ParamValue) -> String {
    match value {
        ParamValue::Integer(v) => v.to_string(),
        ParamValue::Number(v) => v.to_string(),
        ParamValue::Periods(v) => v
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(","),
    }
}

fn run_presets(config: &ChartConfig, action: PresetAction) -> Result<()> {
    let dir = &config.preset_dir;
    let mut store = PresetStore::open(dir)?;

    match action {
        PresetAction::List => {
            println!("{:<20} {:<8} {}", "Name", "Kind", "Indicators");
            println!("{}", "-".repeat(60));
            for preset in store.list() {
                let kinds: Vec<&str> = preset
                    .parameters
                    .kinds()
                    .iter()
                    .map(|k| k.as_str())
                    .collect();
                let origin = if preset.is_custom { "custom" } else { "built-in" };
                println!("{:<20} {:<8} {}", preset.name, origin, kinds.join(", "));
            }
        }
        PresetAction::Show { name } => {
            let Some(preset) = store.get(&name) else {
                bail!("unknown preset '{name}'");
            };
            println!("{}", serde_json::to_string_pretty(preset)?);
        }
        PresetAction::Save {
            name,
            from_file,
            description,
        } => {
            let text = std::fs::read_to_string(&from_file)
                .with_context(|| format!("failed to read {}", from_file.display()))?;
            let params: ParameterSet = serde_json::from_str(&text)
                .with_context(|| format!("invalid parameter JSON in {}", from_file.display()))?;
            params.validate()?;
            if !store.save(&name, params, &description) {
                bail!("preset name must not be blank");
            }
            store.persist(dir)?;
            println!("Saved preset '{}'", name.trim());
        }
        PresetAction::Delete { name } => {
            if !store.delete(&name) {
                bail!("no custom preset named '{name}'");
            }
            store.persist(dir)?;
            println!("Deleted preset '{name}'");
        }
        PresetAction::Export { output } => {
            let json = store.export_json()?;
            write_output(output.as_deref(), &json)?;
        }
        PresetAction::Import { file } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let saved = store.import_json(&text)?;
            store.persist(dir)?;
            println!("Imported {saved} preset(s)");
        }
    }
    Ok(())
}

fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Written to: {}", path.display());
        }
        None => println!("{content}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_compute() {
        let cli = Cli::try_parse_from([
            "chartlab",
            "compute",
            "--synthetic",
            "100",
            "--indicators",
            "MA,rsi,bb",
            "--set",
            "RSI.period=10",
        ])
        .unwrap();
        match cli.command {
            Commands::Compute {
                synthetic,
                indicators,
                overrides,
                ..
            } => {
                assert_eq!(synthetic, Some(100));
                assert_eq!(
                    indicators,
                    vec![
                        IndicatorKind::Ma,
                        IndicatorKind::Rsi,
                        IndicatorKind::BollingerBands
                    ]
                );
                assert_eq!(overrides, vec!["RSI.period=10".to_string()]);
            }
            _ => panic!("expected compute"),
        }
    }

    #[test]
    fn bars_and_synthetic_conflict() {
        assert!(Cli::try_parse_from([
            "chartlab",
            "compute",
            "--bars",
            "x.csv",
            "--synthetic",
            "10"
        ])
        .is_err());
    }

    #[test]
    fn override_syntax() {
        let (kind, param, value) = parse_override("MACD.fastPeriod = 8").unwrap();
        assert_eq!(kind, IndicatorKind::Macd);
        assert_eq!(param, "fastPeriod");
        assert_eq!(value, "8");
        assert!(parse_override("RSI.period").is_err());
        assert!(parse_override("period=3").is_err());
        assert!(parse_override("Ichimoku.period=3").is_err());
    }

    #[test]
    fn value_formatting() {
        assert_eq!(format_value(&ParamValue::Periods(vec![10, 20])), "10,20");
        assert_eq!(format_value(&ParamValue::Number(2.5)), "2.5");
    }
}
