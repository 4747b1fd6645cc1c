use anyhow::{Context, Result};
use clap::Parser;
use randtree::core::telemetry::logging::{init_logging, init_logging_with_default};
use randtree::models::save_packet::{FileType, SavePacket};
use randtree::{GenRandomFilesPlugin, HostDriver, JobReport, LevelSpec, PluginOptions};
use serde::Serialize;
use std::io::{self, BufWriter, Write};

/// Run a backup job against a synthetic, randomly named tree.
#[derive(Debug, Parser)]
#[command(name = "randtree", version)]
struct Args {
    /// Plugin definition, e.g. "python:module_name=gen-random-files:levels=2,3,4,5:topdir=/bench"
    plugindef: Option<String>,

    /// Tree shape as L1,L2,L3,L4 (overrides the definition)
    #[arg(long)]
    levels: Option<LevelSpec>,

    /// Root directory of the generated tree (overrides the definition)
    #[arg(long)]
    topdir: Option<String>,

    /// Fixed seed for reproducible names
    #[arg(long)]
    seed: Option<u64>,

    /// Print every entry as it is handed to the host
    #[arg(long)]
    list: bool,

    /// Emit the report (and listed entries) as JSON
    #[arg(long)]
    json: bool,

    /// Debug logging unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    options: &'a PluginOptions,
    report: &'a JobReport,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    entries: Vec<SavePacket>,
}

fn resolve_options(args: &Args) -> Result<PluginOptions> {
    let mut options = match &args.plugindef {
        Some(def) => {
            // Flags override the definition and may fill in what it leaves out.
            let levels = args.levels.map(|levels| levels.to_string());
            let mut overrides = Vec::new();
            if let Some(levels) = &levels {
                overrides.push(("levels", levels.as_str()));
            }
            if let Some(topdir) = &args.topdir {
                overrides.push(("topdir", topdir.as_str()));
            }
            PluginOptions::parse_with_overrides(def, &overrides)
                .context("invalid plugin definition")?
        }
        None => {
            let levels = args.levels.context("--levels is required without a plugin definition")?;
            let topdir = args
                .topdir
                .clone()
                .context("--topdir is required without a plugin definition")?;
            PluginOptions::new(levels, topdir)
        }
    };
    if let Some(seed) = args.seed {
        options.seed = Some(seed);
    }
    options.validate()?;
    Ok(options)
}

fn main() -> Result<()> {
    let args = Args::parse();
    if args.verbose {
        init_logging_with_default("randtree=debug");
    } else {
        init_logging();
    }

    let options = resolve_options(&args)?;
    let mut plugin = GenRandomFilesPlugin::new();
    let mut driver = HostDriver::new(&mut plugin);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut listed = Vec::new();
    let mut write_err = None;

    let report = driver.run_backup(&options, |packet| {
        if !args.list {
            return;
        }
        if args.json {
            listed.push(packet.clone());
        } else if write_err.is_none() {
            let marker = match packet.file_type {
                FileType::DirEnd => 'd',
                FileType::Regular => 'f',
            };
            let path = packet.link.as_deref().unwrap_or(&packet.fname);
            if let Err(e) = writeln!(out, "{marker} {path}") {
                write_err = Some(e);
            }
        }
    })?;
    if let Some(e) = write_err {
        return Err(e).context("failed to write entry listing");
    }

    if args.json {
        let output = JsonOutput {
            options: &options,
            report: &report,
            entries: listed,
        };
        serde_json::to_writer_pretty(&mut out, &output)?;
        writeln!(out)?;
    } else {
        writeln!(
            out,
            "{} directories, {} files under {} (levels {})",
            report.directories, report.files, options.topdir, report.levels
        )?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(argv: &[&str]) -> Result<PluginOptions> {
        let mut full = vec!["randtree"];
        full.extend_from_slice(argv);
        resolve_options(&Args::try_parse_from(full)?)
    }

    #[test]
    fn flags_alone_build_options() -> Result<()> {
        let options = resolve(&["--levels", "1,2,3,4", "--topdir", "/mnt/c:/bench", "--seed", "9"])?;
        assert_eq!(options.levels, LevelSpec::new(1, 2, 3, 4));
        assert_eq!(options.topdir, "/mnt/c:/bench");
        assert_eq!(options.seed, Some(9));
        Ok(())
    }

    #[test]
    fn topdir_flag_overrides_definition_verbatim() -> Result<()> {
        let options = resolve(&["levels=1,1,1,1:topdir=/a", "--topdir", "/mnt/c:/bench"])?;
        assert_eq!(options.topdir, "/mnt/c:/bench");
        assert_eq!(options.levels, LevelSpec::new(1, 1, 1, 1));
        Ok(())
    }

    #[test]
    fn levels_flag_overrides_definition() -> Result<()> {
        let options = resolve(&["levels=1,1,1,1:topdir=/a:seed=3", "--levels", "2,3,0,0"])?;
        assert_eq!(options.levels, LevelSpec::new(2, 3, 0, 0));
        assert_eq!(options.topdir, "/a");
        assert_eq!(options.seed, Some(3));
        Ok(())
    }

    #[test]
    fn flags_fill_in_missing_definition_options() -> Result<()> {
        let options = resolve(&["python:module_name=gen:levels=1,0,0,0", "--topdir", "/b"])?;
        assert_eq!(options.topdir, "/b");
        Ok(())
    }

    #[test]
    fn seed_flag_overrides_definition_seed() -> Result<()> {
        let options = resolve(&["levels=1,1,1,1:topdir=/a:seed=3", "--seed", "8"])?;
        assert_eq!(options.seed, Some(8));
        Ok(())
    }

    #[test]
    fn missing_options_are_errors() {
        assert!(resolve(&["--levels", "1,1,1,1"]).is_err());
        assert!(resolve(&["--topdir", "/a"]).is_err());
        assert!(resolve(&["levels=1,1,1,1"]).is_err());
    }
}
