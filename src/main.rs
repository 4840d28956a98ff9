use std::{
    fs::File,
    io::{self, BufWriter, Write},
};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use vulkaninfo::{Args, Config, Entry, OutputFormat, Report, Snapshot};

const HTML_PATH: &str = "vulkaninfo.html";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let config = Config::from(Args::parse());

    let entry = Entry::load()?;
    let snapshot = Snapshot::capture(&entry).context("Failed to query the Vulkan implementation")?;

    let report = match Report::new(&snapshot, &config) {
        Ok(report) => report,
        Err(error) => {
            println!("{error}");
            return Ok(());
        }
    };

    for document in report.documents() {
        match document.format {
            OutputFormat::Html => {
                let file = File::create(HTML_PATH)
                    .with_context(|| format!("Failed to create {HTML_PATH}"))?;

                let mut out = BufWriter::new(file);
                document.render(&mut out)?;
                out.flush()?;
            }
            _ => {
                let mut out = io::stdout().lock();
                document.render(&mut out)?;
                out.flush()?;
            }
        }
    }

    Ok(())
}
