use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use prisma_tortoise::{Config, Schema, generate, output};

/// Generate Tortoise ORM models from a Prisma DMMF document.
#[derive(Parser, Debug)]
#[clap(version, about)]
struct Cli {
    /// DMMF JSON file, or `-` for stdin
    input: PathBuf,

    /// Output directory (default: print the module to stdout)
    #[clap(short, long)]
    output: Option<PathBuf>,

    /// Generator option as KEY=VALUE, e.g. `-c appName=blog`
    #[clap(short = 'c', long = "option", value_parser = parse_key_val)]
    options: Vec<(String, String)>,
}

fn parse_key_val(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got `{}`", raw))?;
    Ok((key.trim().to_string(), value.to_string()))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    let config = Config::from_options(cli.options.iter().map(|(k, v)| (k, v)))
        .context("invalid generator options")?;

    let input = if cli.input.as_os_str() == "-" {
        io::read_to_string(io::stdin()).context("failed to read stdin")?
    } else {
        fs::read_to_string(&cli.input)
            .with_context(|| format!("failed to read {}", cli.input.display()))?
    };
    let schema = Schema::from_json(&input)
        .with_context(|| format!("failed to parse {}", cli.input.display()))?;

    let generated = generate(&schema, &config)?;

    match &cli.output {
        Some(dir) => {
            let written = output::write(dir, &config, &generated)
                .with_context(|| format!("failed to write to {}", dir.display()))?;
            eprintln!("wrote {}", written.models.display());
            if let Some(init) = &written.package_init {
                eprintln!("wrote {}", init.display());
            }
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(generated.source.as_bytes())?;
            stdout.flush()?;
        }
    }

    if !generated.warnings.is_empty() {
        let skipped = generated
            .warnings
            .iter()
            .filter(|w| w.kind.skips_field())
            .count();
        eprintln!(
            "{} warning(s), {} field(s) skipped:",
            generated.warnings.len(),
            skipped
        );
        for warning in &generated.warnings {
            eprintln!("  {}", warning);
        }
    }

    Ok(())
}
