//! Normalizes a raw seafood dataset and prints the canonical form.
//!
//! Reads JSON from a file or stdin, runs it through the same normalization
//! path the chat uses, and prints either the canonical model or its legacy
//! re-encoding. Normalization warnings go to stderr; `--strict` turns them
//! into a failing exit status.

use anyhow::{Result, bail};
use seafood_facts::{CatalogSource, normalize};
use serde_json::json;
use std::env;
use std::ffi::OsString;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = CliArgs::parse()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error")),
        )
        .with_writer(std::io::stderr)
        .init();

    let raw = args.source.load()?;
    let normalized = normalize(&raw);
    for warning in &normalized.warnings {
        eprintln!("warning: {warning}");
    }

    let output = match args.format {
        OutputFormat::Canonical => json!({
            "shape": normalized.shape,
            "catalog": normalized.model,
        }),
        OutputFormat::Legacy => normalized.model.to_legacy_json(),
    };
    let rendered = if args.compact {
        serde_json::to_string(&output)?
    } else {
        serde_json::to_string_pretty(&output)?
    };
    println!("{rendered}");

    if args.strict && !normalized.warnings.is_empty() {
        bail!(
            "{} normalization warning(s) reported under --strict",
            normalized.warnings.len()
        );
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Canonical,
    Legacy,
}

struct CliArgs {
    source: CatalogSource,
    format: OutputFormat,
    compact: bool,
    strict: bool,
}

impl CliArgs {
    fn parse() -> Result<Self> {
        let mut args = env::args_os().skip(1);
        let mut source: Option<CatalogSource> = None;
        let mut format = OutputFormat::Canonical;
        let mut compact = false;
        let mut strict = false;

        while let Some(arg_os) = args.next() {
            let arg = arg_os
                .into_string()
                .map_err(|_| anyhow::anyhow!("argument is not valid UTF-8"))?;
            match arg.as_str() {
                "--file" => {
                    let path = next_value(&mut args, "--file")?;
                    if source.is_some() {
                        bail!("--file/--stdin may only be provided once");
                    }
                    source = Some(CatalogSource::File(PathBuf::from(path)));
                }
                "--stdin" => {
                    if source.is_some() {
                        bail!("--file/--stdin may only be provided once");
                    }
                    source = Some(CatalogSource::Stdin);
                }
                "--legacy" => format = OutputFormat::Legacy,
                "--compact" => compact = true,
                "--strict" => strict = true,
                "--help" | "-h" => {
                    print!("{}", usage());
                    std::process::exit(0);
                }
                other => bail!("unknown flag: {other}"),
            }
        }

        Ok(CliArgs {
            source: source.unwrap_or(CatalogSource::Stdin),
            format,
            compact,
            strict,
        })
    }
}

fn next_value(args: &mut impl Iterator<Item = OsString>, flag: &str) -> Result<String> {
    args.next()
        .map(|os| {
            os.into_string()
                .map_err(|_| anyhow::anyhow!("value for {flag} is not valid UTF-8"))
        })
        .transpose()?
        .ok_or_else(|| anyhow::anyhow!("missing value for {flag}"))
}

fn usage() -> &'static str {
    "Usage: catalog-normalize [--file PATH|--stdin] [--legacy] [--compact] [--strict]\n\
Reads a seafood dataset in any supported layout and prints the canonical catalog as JSON\n\
(or, with --legacy, re-encoded as {categories, items}). Warnings are written to stderr;\n\
--strict exits non-zero when any were reported.\n"
}
