//! Query subcommands: argument layering, park loading and JSON output.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use ridepark_core::{RideId, VisitorId};
use ridepark_runtime::ParkConfig;
use serde::{Deserialize, Serialize};

use crate::layout::{CliPark, ParkLayout};
use crate::{
    ARG_FROM, ARG_LAYOUT, ARG_TO, ARG_VISITOR, CliError, ENV_PATH_FROM, ENV_PATH_LAYOUT, ENV_PATH_TO,
    ENV_QUEUES_LAYOUT, ENV_STATS_LAYOUT, ENV_SUGGEST_LAYOUT, ENV_SUGGEST_VISITOR,
    ENV_WAIT_TIMES_LAYOUT,
};

/// CLI arguments for the `wait-times` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(name = "wait-times", about = "List operational rides by current wait")]
#[ortho_config(prefix = "RIDEPARK")]
pub(crate) struct WaitTimesArgs {
    /// Path to the JSON park layout.
    #[arg(long = ARG_LAYOUT, value_name = "path")]
    #[serde(default)]
    pub(crate) layout: Option<Utf8PathBuf>,
    /// Minutes per dispatch cycle.
    #[arg(long, value_name = "minutes")]
    #[serde(default)]
    pub(crate) cycle_minutes: Option<u32>,
}

/// CLI arguments for the `queues` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(name = "queues", about = "Show both queue lanes of every ride")]
#[ortho_config(prefix = "RIDEPARK")]
pub(crate) struct QueuesArgs {
    /// Path to the JSON park layout.
    #[arg(long = ARG_LAYOUT, value_name = "path")]
    #[serde(default)]
    pub(crate) layout: Option<Utf8PathBuf>,
    /// Minutes per dispatch cycle.
    #[arg(long, value_name = "minutes")]
    #[serde(default)]
    pub(crate) cycle_minutes: Option<u32>,
}

/// CLI arguments for the `stats` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(name = "stats", about = "Summarise visitors, rides and waits")]
#[ortho_config(prefix = "RIDEPARK")]
pub(crate) struct StatsArgs {
    /// Path to the JSON park layout.
    #[arg(long = ARG_LAYOUT, value_name = "path")]
    #[serde(default)]
    pub(crate) layout: Option<Utf8PathBuf>,
    /// Minutes per dispatch cycle.
    #[arg(long, value_name = "minutes")]
    #[serde(default)]
    pub(crate) cycle_minutes: Option<u32>,
    /// Rides listed in the leaderboard.
    #[arg(long, value_name = "count")]
    #[serde(default)]
    pub(crate) top_rides: Option<usize>,
}

/// CLI arguments for the `suggest` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "suggest",
    about = "Recommend rides for a visitor",
    long_about = "Rank operational rides for a visitor by thrill match and \
                  queue length. Rides among the visitor's most recent are \
                  flagged rather than hidden."
)]
#[ortho_config(prefix = "RIDEPARK")]
pub(crate) struct SuggestArgs {
    /// Visitor to advise.
    #[arg(value_name = ARG_VISITOR)]
    #[serde(default)]
    pub(crate) visitor: Option<u32>,
    /// Path to the JSON park layout.
    #[arg(long = ARG_LAYOUT, value_name = "path")]
    #[serde(default)]
    pub(crate) layout: Option<Utf8PathBuf>,
    /// Minutes per dispatch cycle.
    #[arg(long, value_name = "minutes")]
    #[serde(default)]
    pub(crate) cycle_minutes: Option<u32>,
    /// Maximum suggestions returned.
    #[arg(long, value_name = "count")]
    #[serde(default)]
    pub(crate) suggestion_limit: Option<usize>,
    /// Recent rides flagged as already ridden.
    #[arg(long, value_name = "count")]
    #[serde(default)]
    pub(crate) recent_window: Option<usize>,
}

/// CLI arguments for the `path` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(name = "path", about = "Find the shortest walk between two rides")]
#[ortho_config(prefix = "RIDEPARK")]
pub(crate) struct PathArgs {
    /// Ride to start from.
    #[arg(value_name = ARG_FROM)]
    #[serde(default)]
    pub(crate) from: Option<u32>,
    /// Ride to walk to.
    #[arg(value_name = ARG_TO)]
    #[serde(default)]
    pub(crate) to: Option<u32>,
    /// Path to the JSON park layout.
    #[arg(long = ARG_LAYOUT, value_name = "path")]
    #[serde(default)]
    pub(crate) layout: Option<Utf8PathBuf>,
}

/// Resolved layout path and engine tuning shared by every command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParkSource {
    /// Path to the JSON park layout.
    pub(crate) layout: Utf8PathBuf,
    /// Validated engine tuning.
    pub(crate) config: ParkConfig,
}

impl ParkSource {
    fn resolve(
        layout: Option<Utf8PathBuf>,
        env: &'static str,
        config: ParkConfig,
    ) -> Result<Self, CliError> {
        let layout = layout.ok_or(CliError::MissingArgument {
            field: ARG_LAYOUT,
            env,
        })?;
        let config = config.validate().map_err(CliError::InvalidTuning)?;
        Ok(Self { layout, config })
    }

    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.layout, ARG_LAYOUT)
    }

    /// Check the layout file, then load it into a fresh park.
    pub(crate) fn open_park(&self) -> Result<CliPark, CliError> {
        self.validate_sources()?;
        ParkLayout::load(&self.layout)?
            .build(self.config)
            .map_err(|source| CliError::BuildPark {
                path: self.layout.clone(),
                source,
            })
    }
}

fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match crate::fs::file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn tuned(cycle_minutes: Option<u32>) -> ParkConfig {
    let defaults = ParkConfig::default();
    ParkConfig {
        cycle_minutes: cycle_minutes.unwrap_or(defaults.cycle_minutes),
        ..defaults
    }
}

impl TryFrom<WaitTimesArgs> for ParkSource {
    type Error = CliError;

    fn try_from(args: WaitTimesArgs) -> Result<Self, Self::Error> {
        Self::resolve(args.layout, ENV_WAIT_TIMES_LAYOUT, tuned(args.cycle_minutes))
    }
}

impl TryFrom<QueuesArgs> for ParkSource {
    type Error = CliError;

    fn try_from(args: QueuesArgs) -> Result<Self, Self::Error> {
        Self::resolve(args.layout, ENV_QUEUES_LAYOUT, tuned(args.cycle_minutes))
    }
}

impl TryFrom<StatsArgs> for ParkSource {
    type Error = CliError;

    fn try_from(args: StatsArgs) -> Result<Self, Self::Error> {
        let base = tuned(args.cycle_minutes);
        let config = ParkConfig {
            top_rides: args.top_rides.unwrap_or(base.top_rides),
            ..base
        };
        Self::resolve(args.layout, ENV_STATS_LAYOUT, config)
    }
}

/// Resolved `suggest` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SuggestConfig {
    pub(crate) source: ParkSource,
    pub(crate) visitor: u32,
}

impl TryFrom<SuggestArgs> for SuggestConfig {
    type Error = CliError;

    fn try_from(args: SuggestArgs) -> Result<Self, Self::Error> {
        let visitor = args.visitor.ok_or(CliError::MissingArgument {
            field: ARG_VISITOR,
            env: ENV_SUGGEST_VISITOR,
        })?;
        let base = tuned(args.cycle_minutes);
        let config = ParkConfig {
            suggestion_limit: args.suggestion_limit.unwrap_or(base.suggestion_limit),
            recent_window: args.recent_window.unwrap_or(base.recent_window),
            ..base
        };
        Ok(Self {
            source: ParkSource::resolve(args.layout, ENV_SUGGEST_LAYOUT, config)?,
            visitor,
        })
    }
}

/// Resolved `path` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PathConfig {
    pub(crate) source: ParkSource,
    pub(crate) from: u32,
    pub(crate) to: u32,
}

impl TryFrom<PathArgs> for PathConfig {
    type Error = CliError;

    fn try_from(args: PathArgs) -> Result<Self, Self::Error> {
        let from = args.from.ok_or(CliError::MissingArgument {
            field: ARG_FROM,
            env: ENV_PATH_FROM,
        })?;
        let to = args.to.ok_or(CliError::MissingArgument {
            field: ARG_TO,
            env: ENV_PATH_TO,
        })?;
        Ok(Self {
            source: ParkSource::resolve(args.layout, ENV_PATH_LAYOUT, ParkConfig::default())?,
            from,
            to,
        })
    }
}

pub(crate) fn run_wait_times_with(args: WaitTimesArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let merged = args.load_and_merge().map_err(CliError::Configuration)?;
    let park = ParkSource::try_from(merged)?.open_park()?;
    write_json(writer, &park.rides_by_wait_time())
}

pub(crate) fn run_queues_with(args: QueuesArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let merged = args.load_and_merge().map_err(CliError::Configuration)?;
    let park = ParkSource::try_from(merged)?.open_park()?;
    write_json(writer, &park.queues())
}

pub(crate) fn run_stats_with(args: StatsArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let merged = args.load_and_merge().map_err(CliError::Configuration)?;
    let park = ParkSource::try_from(merged)?.open_park()?;
    write_json(writer, &park.stats())
}

pub(crate) fn run_suggest_with(args: SuggestArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let merged = args.load_and_merge().map_err(CliError::Configuration)?;
    let config = SuggestConfig::try_from(merged)?;
    let park = config.source.open_park()?;
    let suggestions = VisitorId::new(config.visitor)
        .and_then(|visitor| park.suggest(visitor))
        .map_err(|source| CliError::Query {
            command: "suggest",
            source,
        })?;
    write_json(writer, &suggestions)
}

pub(crate) fn run_path_with(args: PathArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let merged = args.load_and_merge().map_err(CliError::Configuration)?;
    let config = PathConfig::try_from(merged)?;
    let park = config.source.open_park()?;
    let report = park
        .find_path(RideId::new(config.from), RideId::new(config.to))
        .map_err(|source| CliError::Query {
            command: "path",
            source,
        })?;
    write_json(writer, &report)
}

fn write_json<T: Serialize + ?Sized>(writer: &mut dyn Write, value: &T) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn suggest_config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<SuggestConfig, CliError> {
    let merged = SuggestArgs::merge_from_layers(layers).map_err(CliError::from)?;
    SuggestConfig::try_from(merged)
}
