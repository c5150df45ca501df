/* Copyright © 2024-2025 Adam Train <adam@trainrelay.net>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see <https://www.gnu.org/licenses/>.
 */
use crate::config::filesystem::Filesystem;
use crate::import::apaleo::core::ApaleoSource;
use crate::import::importer::{fetch, Snapshot, SnapshotSource};
use crate::reports::city_tax_reporter::CityTaxReporter;
use crate::reports::sink::{ReportHeader, Sink, TableSink, TsvSink};
use crate::tax::jurisdiction::Jurisdiction;
use crate::util::date::ReportWindow;
use anyhow::{bail, Error};
use chrono::Local;
use clap::Parser;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing_subscriber::EnvFilter;

mod config;
mod import;
mod reports;
mod tax;
mod util;

#[derive(Parser)]
#[command(
	name = "citytax",
	version = "1.0",
	about = "City tax reports for hotel properties"
)]
struct Cli {
	// ----------------
	// -- POSITIONAL --
	// ----------------
	/// The city whose rules the report follows
	city: Jurisdiction,

	// -----------
	// -- FLAGS --
	// -----------
	/// The property to report on
	#[arg(short, long)]
	property: String,

	/// First day of the report (YYYY-MM-DD)
	#[arg(short, long)]
	begin: String,

	/// Last day of the report, inclusive (YYYY-MM-DD)
	#[arg(short, long)]
	end: String,

	/// Read transactions and reservations from this JSON snapshot instead
	/// of the API
	#[arg(short)]
	file: Option<String>,

	/// Custom config file location (default: ~/.config/citytax/config.toml)
	#[arg(long)]
	config: Option<String>,

	/// Print tab-separated values instead of a table
	#[arg(long)]
	tsv: bool,

	/// Write the report as a TSV file into this directory
	#[arg(short, long)]
	output: Option<String>,
}

impl Cli {
	/// Extra validations on top of what clap does
	fn validate(&self) -> Result<(), Error> {
		if self.property.trim().is_empty() {
			bail!("Property must not be empty");
		}
		// the property ends up in the output file name
		if self.property.contains(['/', '\\']) {
			bail!("Property must not contain path separators");
		}
		if self.tsv && self.output.is_some() {
			bail!("--tsv and --output cannot be combined");
		}

		Ok(())
	}
}

fn main() -> Result<(), Error> {
	tracing_subscriber::fmt()
		.with_env_filter(
			EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| EnvFilter::new("warn")),
		)
		.with_writer(std::io::stderr)
		.init();

	let args = Cli::parse();
	args.validate()?;

	let window = ReportWindow::from_strs(&args.begin, &args.end)?;
	let snapshot = load_inputs(&args, &window)?;

	let header = ReportHeader {
		jurisdiction: args.city,
		property: args.property.clone(),
		window,
		executed: Local::now().format("%a, %-d %b %Y, %H:%M (%:z)").to_string(),
	};
	let reporter = CityTaxReporter::new(
		&snapshot.transactions,
		&snapshot.reservations,
		&window,
	);

	if let Some(dir) = &args.output {
		let path = Path::new(dir).join(format!("{}.tsv", header.name()));
		let mut sink = TsvSink::new(BufWriter::new(File::create(&path)?));
		reporter.render(&header, &mut sink)?;
		sink.into_inner().flush()?;
		println!("Wrote {}", path.display());
		return Ok(());
	}

	let stdout = std::io::stdout().lock();
	let mut sink: Box<dyn Sink> = if args.tsv {
		Box::new(TsvSink::new(stdout))
	} else {
		Box::new(TableSink::new(stdout))
	};
	reporter.render(&header, sink.as_mut())
}

/// Reads the snapshot given with -f, or fetches from the API otherwise.
fn load_inputs(args: &Cli, window: &ReportWindow) -> Result<Snapshot, Error> {
	let fs = Filesystem::new();

	if let Some(file) = &args.file {
		let source = SnapshotSource::open(&fs, file)?;
		return fetch(&source, &args.property, window);
	}

	// Only API access needs the config, so we don't bother to read it
	// until this point
	let config = fs.get_config(args.config.as_ref(), true)?;
	let source = ApaleoSource::new(config.apaleo.unwrap_or_default())?;
	fetch(&source, &args.property, window)
}
