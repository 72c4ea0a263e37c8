//! CLI entry point for chainhue.

use clap::{CommandFactory, Parser};
use color_eyre::eyre::{Result, WrapErr, bail, eyre};

use chainhue::cli::{Cli, OutputFormat};
use chainhue::color::{USAGE_HINT, parse_color};
use chainhue::config::PaletteConfig;
use chainhue::logging::init_logging;
use chainhue::pipeline::{PaletteResult, apply_chain, apply_chain_batch};
use chainhue::report::{PaletteReport, css_rgb, render_css, render_summary};
use chainhue::validation::validate_with_warnings;

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        clap_complete::generate(shell, &mut Cli::command(), "chainhue", &mut std::io::stdout());
        return Ok(());
    }

    let _guard = init_logging(cli.log_file.as_deref(), &cli.log_level);

    let config = PaletteConfig::resolve(cli.config.as_deref(), &cli.to_config_overrides())
        .wrap_err("Failed to load configuration")?;

    if let Some(ref path) = cli.save_config {
        config
            .save(path)
            .wrap_err_with(|| format!("Failed to write config to {}", path.display()))?;
        eprintln!("Wrote config to {}", path.display());
        if cli.colors.is_empty() {
            return Ok(());
        }
    }

    let bases = cli
        .colors
        .iter()
        .map(|input| {
            parse_color(input).map_err(|e| eyre!("Invalid color '{}': {} ({})", input, e, USAGE_HINT))
        })
        .collect::<Result<Vec<_>>>()?;

    let strategy = config.hover_strategy();
    let settings = config.chain_settings();

    let results = match bases.as_slice() {
        [base] => vec![apply_chain(*base, strategy.as_ref(), &settings)],
        _ => apply_chain_batch(&bases, strategy.as_ref(), &settings),
    };

    // Validate every palette before writing anything
    let mut failed = false;
    for result in &results {
        let warnings = validate_with_warnings(result, settings.target_contrast);
        if warnings.is_empty() {
            continue;
        }
        failed = true;
        let label = css_rgb(result.base);
        if cli.strict {
            eprintln!("Validation failed for {label}:");
            for warning in &warnings {
                eprintln!("  {warning}");
            }
        } else {
            for warning in &warnings {
                eprintln!("Warning ({label}): {warning}");
            }
        }
    }
    if cli.strict && failed {
        bail!("Validation failed");
    }

    let rendered = render(&results, cli.format)?;

    if let Some(ref path) = cli.output {
        std::fs::write(path, &rendered)
            .wrap_err_with(|| format!("Failed to write to {}", path.display()))?;
        eprintln!("Wrote palette to {}", path.display());
    } else {
        print!("{rendered}");
    }

    Ok(())
}

/// Render results in the requested format.
fn render(results: &[PaletteResult], format: OutputFormat) -> Result<String> {
    let reports = || results.iter().map(PaletteReport::from).collect::<Vec<_>>();

    let rendered = match format {
        OutputFormat::Text => results
            .iter()
            .map(render_summary)
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Css if results.len() == 1 => render_css(&results[0]),
        OutputFormat::Css => results
            .iter()
            .map(|r| format!("/* {} */\n{}", css_rgb(r.base), render_css(r)))
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Json => {
            let json = match reports().as_slice() {
                [single] => serde_json::to_string_pretty(single),
                many => serde_json::to_string_pretty(many),
            }
            .wrap_err("Failed to serialize palette to JSON")?;
            format!("{json}\n")
        }
        OutputFormat::Yaml => match reports().as_slice() {
            [single] => serde_yaml::to_string(single),
            many => serde_yaml::to_string(many),
        }
        .wrap_err("Failed to serialize palette to YAML")?,
    };

    Ok(rendered)
}
