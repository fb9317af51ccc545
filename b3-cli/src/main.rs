use b3::prelude::{Epoch, Observation, ObservationReader, ParsingError};

use clap::{Parser, Subcommand};
use itertools::Itertools;
use log::{debug, error, info, warn};
use walkdir::WalkDir;

use std::{
    path::{Path, PathBuf},
    process::ExitCode,
    str::FromStr,
};

#[derive(Parser)]
#[command(name = "b3-cli")]
#[command(about = "B3 observation files analysis and regeneration")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse B3 files and print every observation
    Parse {
        /// Files or directories (walked recursively)
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Pretty JSON output instead of one line summaries
        #[arg(long)]
        json: bool,
    },
    /// Regenerate B3 lines from parsed observations
    Regen {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Date every line with this epoch instead (for example "2023-02-14T12:34:56 UTC")
        #[arg(long)]
        epoch: Option<String>,
        /// Report lines that differ once regenerated
        #[arg(long)]
        check: bool,
    },
    /// Print the XA_OBS catalog of every observation
    Catalog {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
}

/// Regular files under `paths`, sorted and deduplicated.
fn walk(paths: &[PathBuf]) -> Vec<PathBuf> {
    paths
        .iter()
        .flat_map(|path| {
            WalkDir::new(path)
                .follow_links(true)
                .into_iter()
                .filter_map(|entry| match entry {
                    Ok(entry) => Some(entry),
                    Err(e) => {
                        warn!("{}", e);
                        None
                    },
                })
                .filter(|entry| entry.file_type().is_file())
                .map(|entry| entry.into_path())
        })
        .sorted()
        .dedup()
        .collect()
}

/// Streams every [Observation] of every file, reporting failures.
/// Returns the number of failures.
fn for_each_observation<F: FnMut(&Path, Observation)>(paths: &[PathBuf], mut f: F) -> usize {
    let mut failures = 0;

    for path in walk(paths) {
        let mut reader = match ObservationReader::from_file(&path) {
            Ok(reader) => reader,
            Err(e) => {
                error!("{}: {}", path.display(), e);
                failures += 1;
                continue;
            },
        };

        info!("{}", path.display());

        while let Some(result) = reader.next() {
            match result {
                Ok(obs) => f(&path, obs),
                Err(ParsingError::Io(e)) => {
                    error!("{}: {}", path.display(), e);
                    failures += 1;
                    break;
                },
                Err(e) => {
                    error!("{}:{}: {}", path.display(), reader.line_number(), e);
                    failures += 1;
                },
            }
        }
    }

    failures
}

fn summary(obs: &Observation) -> String {
    let equinox = obs
        .equinox
        .map(|equinox| equinox.to_string())
        .unwrap_or_else(|| "-".to_string());

    let quantities = [
        ("el/dec", obs.measurement.elevation_or_declination_deg()),
        ("az/ra", obs.measurement.azimuth_or_right_ascension_deg()),
        ("range", obs.measurement.range_km()),
        ("range_rate", obs.measurement.range_rate_km_s()),
        ("el_rate", obs.measurement.elevation_rate_deg_s()),
        ("az_rate", obs.measurement.azimuth_rate_deg_s()),
        ("range_accel", obs.measurement.range_accel_km_s2()),
    ]
    .iter()
    .filter_map(|(name, value)| value.map(|v| format!("{}={}", name, v)))
    .join(" ");

    let position = obs
        .measurement
        .position()
        .map(|p| format!(" pos=({}, {}, {})", p.x_km, p.y_km, p.z_km))
        .unwrap_or_default();

    format!(
        "{} {:05} {:03} {} type={} {} {}{}",
        obs.classification,
        obs.satellite,
        obs.sensor,
        obs.epoch,
        obs.observation_type(),
        equinox,
        quantities,
        position,
    )
}

fn parse(paths: &[PathBuf], json: bool) -> ExitCode {
    let failures = for_each_observation(paths, |_, obs| {
        if json {
            match serde_json::to_string_pretty(&obs) {
                Ok(content) => println!("{}", content),
                Err(e) => error!("json: {}", e),
            }
        } else {
            println!("{}", summary(&obs));
        }
    });

    if failures > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn regen(paths: &[PathBuf], epoch: Option<&str>, check: bool) -> ExitCode {
    let epoch = match epoch.map(Epoch::from_str).transpose() {
        Ok(epoch) => epoch,
        Err(e) => {
            error!("invalid epoch: {}", e);
            return ExitCode::FAILURE;
        },
    };

    let mut mismatches = 0;

    let failures = for_each_observation(paths, |path, obs| {
        let line = match epoch {
            Some(epoch) => obs.format_line_at(epoch),
            None => obs.format_line(),
        };

        let line = match line {
            Ok(line) => line,
            Err(e) => {
                error!("{}: {}", path.display(), e);
                mismatches += 1;
                return;
            },
        };

        if check {
            let source = obs.source_line().unwrap_or_default().trim_end();
            if source != line.trim_end() {
                warn!("{}: regenerated line differs", path.display());
                debug!("source:      \"{}\"", source);
                debug!("regenerated: \"{}\"", line);
                mismatches += 1;
            }
        }

        println!("{}", line);
    });

    if failures + mismatches > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn catalog(paths: &[PathBuf]) -> ExitCode {
    let failures = for_each_observation(paths, |_, obs| {
        match serde_json::to_string_pretty(&obs.to_catalog()) {
            Ok(content) => println!("{}", content),
            Err(e) => error!("json: {}", e),
        }
    });

    if failures > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Parse { paths, json } => parse(&paths, json),
        Commands::Regen {
            paths,
            epoch,
            check,
        } => regen(&paths, epoch.as_deref(), check),
        Commands::Catalog { paths } => catalog(&paths),
    }
}
