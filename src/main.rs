// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, bail};
use ucd_compiler::config::Config;
use ucd_compiler::{compiler, logging};

const HELP: &str = "\
Usage: ucd-compiler [options...]
  -h, --help            Prints help information
  --ucd-dir=<path>      Directory holding the UCD files (default: data/ucd)
  --out-dir=<path>      Where ucd_types.rs and ucd_tables.rs go (default: generated)

Set RUST_LOG to change the log level (default: info).
";

fn main() -> ExitCode {
    logging::init(tracing::Level::INFO);
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<()> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        eprint!("{HELP}");
        return Ok(());
    }

    let mut config = Config::default();
    if let Some(dir) = args.opt_value_from_os_str("--ucd-dir", parse_path)? {
        config.ucd_dir = dir;
    }
    if let Some(dir) = args.opt_value_from_os_str("--out-dir", parse_path)? {
        config.out_dir = dir;
    }
    let remaining = args.finish();
    if !remaining.is_empty() {
        bail!("unrecognized arguments: {:?}", remaining);
    }

    compiler::run(&config).with_context(|| {
        format!("compiling {} into {}", config.ucd_dir.display(), config.out_dir.display())
    })
}

fn parse_path(s: &std::ffi::OsStr) -> Result<PathBuf, &'static str> {
    Ok(s.into())
}
