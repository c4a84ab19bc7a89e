//! Rank command implementation for the Destinate CLI.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use destinate_core::{
    Criterion, CriterionWeights, RankRequest, RankedCandidate, Ranker, Ranking, WeightPreset,
    WeightVector,
};
use destinate_fs::{create_utf8_file, file_is_file, read_utf8_file};
use destinate_scorer::TopsisRanker;
use log::debug;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_RANK_DISTANCE_WEIGHT, ARG_RANK_OUTPUT, ARG_RANK_PRESET, ARG_RANK_PRICE_WEIGHT,
    ARG_RANK_RATING_COUNT_WEIGHT, ARG_RANK_RATING_WEIGHT, ARG_RANK_REQUEST, ARG_RANK_TOP,
    CliError, ENV_RANK_REQUEST,
};

/// CLI arguments for the `rank` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Rank the candidate destinations in a JSON-encoded RankRequest. \
                 Weights come from the request, a named preset, or per-criterion \
                 flags, in increasing order of precedence. Options can also be \
                 supplied through configuration files or DESTINATE_* \
                 environment variables.",
    about = "Rank candidate destinations"
)]
#[ortho_config(prefix = "DESTINATE")]
pub(crate) struct RankArgs {
    /// Path to a JSON file containing a RankRequest.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Weight preset: balanced, budget, top-rated or nearby.
    #[arg(long = ARG_RANK_PRESET, value_name = "name")]
    #[serde(default)]
    pub(crate) preset: Option<String>,
    /// Raw importance of a low price.
    #[arg(long = ARG_RANK_PRICE_WEIGHT, value_name = "weight")]
    #[serde(default)]
    pub(crate) price_weight: Option<f64>,
    /// Raw importance of a high rating.
    #[arg(long = ARG_RANK_RATING_WEIGHT, value_name = "weight")]
    #[serde(default)]
    pub(crate) rating_weight: Option<f64>,
    /// Raw importance of many reviews.
    #[arg(long = ARG_RANK_RATING_COUNT_WEIGHT, value_name = "weight")]
    #[serde(default)]
    pub(crate) rating_count_weight: Option<f64>,
    /// Raw importance of a short distance.
    #[arg(long = ARG_RANK_DISTANCE_WEIGHT, value_name = "weight")]
    #[serde(default)]
    pub(crate) distance_weight: Option<f64>,
    /// Only report the best `n` candidates.
    #[arg(long = ARG_RANK_TOP, value_name = "n")]
    #[serde(default)]
    pub(crate) top: Option<usize>,
    /// Write the JSON report to this file instead of stdout.
    #[arg(long = ARG_RANK_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl RankArgs {
    pub(crate) fn into_config(self) -> Result<RankConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RankConfig::try_from(merged)
    }
}

/// Per-criterion weights given explicitly on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) struct WeightOverrides {
    pub(crate) price: Option<f64>,
    pub(crate) rating: Option<f64>,
    pub(crate) rating_count: Option<f64>,
    pub(crate) distance: Option<f64>,
}

impl WeightOverrides {
    const fn entries(self) -> [(Criterion, Option<f64>); 4] {
        [
            (Criterion::Price, self.price),
            (Criterion::Rating, self.rating),
            (Criterion::RatingCount, self.rating_count),
            (Criterion::Distance, self.distance),
        ]
    }

    fn first_invalid(self) -> Option<(&'static str, f64)> {
        [
            ARG_RANK_PRICE_WEIGHT,
            ARG_RANK_RATING_WEIGHT,
            ARG_RANK_RATING_COUNT_WEIGHT,
            ARG_RANK_DISTANCE_WEIGHT,
        ]
        .into_iter()
        .zip(self.entries())
        .find_map(|(field, (_, value))| {
            value
                .filter(|weight| !weight.is_finite() || *weight < 0.0)
                .map(|weight| (field, weight))
        })
    }

    fn apply(self, base: CriterionWeights) -> CriterionWeights {
        self.entries()
            .into_iter()
            .fold(base, |weights, (criterion, value)| match value {
                Some(weight) => weights.with(criterion, weight),
                None => weights,
            })
    }
}

/// Resolved `rank` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RankConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// Preset replacing the request's weights, if any.
    pub(crate) preset: Option<WeightPreset>,
    /// Explicit per-criterion weights applied last.
    pub(crate) overrides: WeightOverrides,
    /// Maximum number of candidates to report.
    pub(crate) top: Option<usize>,
    /// Destination file for the report; stdout when `None`.
    pub(crate) output: Option<Utf8PathBuf>,
}

impl RankConfig {
    /// Combine the request's weights with the preset and explicit overrides.
    pub(crate) fn resolve_weights(&self, requested: CriterionWeights) -> CriterionWeights {
        let base = self.preset.map_or(requested, WeightPreset::weights);
        self.overrides.apply(base)
    }

    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        let path = &self.request_path;
        match file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field: ARG_RANK_REQUEST,
                path: path.clone(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field: ARG_RANK_REQUEST,
                    path: path.clone(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field: ARG_RANK_REQUEST,
                path: path.clone(),
                source,
            }),
        }
    }
}

impl TryFrom<RankArgs> for RankConfig {
    type Error = CliError;

    fn try_from(args: RankArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_RANK_REQUEST,
            env: ENV_RANK_REQUEST,
        })?;
        let preset = args
            .preset
            .as_deref()
            .map(str::parse::<WeightPreset>)
            .transpose()
            .map_err(|reason| CliError::InvalidArgument {
                field: ARG_RANK_PRESET,
                reason,
            })?;
        if args.top == Some(0) {
            return Err(CliError::InvalidArgument {
                field: ARG_RANK_TOP,
                reason: String::from("must be at least 1"),
            });
        }
        let overrides = WeightOverrides {
            price: args.price_weight,
            rating: args.rating_weight,
            rating_count: args.rating_count_weight,
            distance: args.distance_weight,
        };
        if let Some((field, value)) = overrides.first_invalid() {
            return Err(CliError::InvalidArgument {
                field,
                reason: format!("weight must be finite and non-negative, got {value}"),
            });
        }
        Ok(Self {
            request_path,
            preset,
            overrides,
            top: args.top,
            output: args.output,
        })
    }
}

/// JSON report printed by the `rank` command.
#[derive(Debug, Serialize)]
pub(crate) struct RankReport<'a> {
    /// Normalised weights used for the run.
    weights: WeightVector,
    /// Number of candidates ranked.
    candidates: usize,
    /// Headline figures for the best candidate.
    best: Option<BestSummary<'a>>,
    /// Mean distance from the user across every ranked candidate.
    average_distance_km: Option<f64>,
    /// Mean entry price across every ranked candidate.
    average_price: Option<f64>,
    /// Mean rating across every ranked candidate.
    average_rating: Option<f64>,
    /// Cheapest and dearest entry price.
    price_range: Option<ValueRange>,
    /// Lowest and highest rating.
    rating_range: Option<ValueRange>,
    /// Ranked candidates, best first, truncated to `--top`.
    results: &'a [RankedCandidate],
}

#[derive(Debug, Serialize)]
struct BestSummary<'a> {
    name: &'a str,
    topsis_score: f64,
    price: f64,
    rating: f64,
    distance_km: f64,
}

impl<'a> From<&'a RankedCandidate> for BestSummary<'a> {
    fn from(entry: &'a RankedCandidate) -> Self {
        Self {
            name: entry.candidate.name(),
            topsis_score: entry.topsis_score,
            price: entry.candidate.price(),
            rating: entry.candidate.rating(),
            distance_km: entry.distance_km,
        }
    }
}

#[derive(Debug, Serialize)]
struct ValueRange {
    min: f64,
    max: f64,
}

impl From<(f64, f64)> for ValueRange {
    fn from((min, max): (f64, f64)) -> Self {
        Self { min, max }
    }
}

impl<'a> RankReport<'a> {
    pub(crate) fn new(ranking: &'a Ranking, top: Option<usize>) -> Self {
        let results = match top {
            Some(limit) => ranking.top(limit),
            None => ranking.entries(),
        };
        Self {
            weights: ranking.weights(),
            candidates: ranking.len(),
            best: ranking.best().map(BestSummary::from),
            average_distance_km: ranking.average_distance_km(),
            average_price: ranking.average_price(),
            average_rating: ranking.average_rating(),
            price_range: ranking.price_range().map(ValueRange::from),
            rating_range: ranking.rating_range().map(ValueRange::from),
            results,
        }
    }
}

pub(super) fn run_rank(args: RankArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_rank_with(args, &TopsisRanker, &mut stdout)
}

pub(super) fn run_rank_with(
    args: RankArgs,
    ranker: &dyn Ranker,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = resolve_rank_config(args)?;
    let ranking = execute_rank(&config, ranker)?;
    let report = RankReport::new(&ranking, config.top);
    match &config.output {
        Some(path) => {
            let mut file = create_utf8_file(path).map_err(|source| CliError::CreateOutput {
                path: path.clone(),
                source,
            })?;
            write_report(&mut file, &report)?;
            writeln!(
                writer,
                "wrote {} ranked candidate(s) to {path}",
                report.results.len()
            )
            .map_err(CliError::WriteReport)
        }
        None => write_report(writer, &report),
    }
}

fn resolve_rank_config(args: RankArgs) -> Result<RankConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

fn execute_rank(config: &RankConfig, ranker: &dyn Ranker) -> Result<Ranking, CliError> {
    let mut request = load_rank_request(&config.request_path)?;
    request.weights = config.resolve_weights(request.weights);
    debug!(
        "loaded {} candidate(s) from {}",
        request.candidates.len(),
        config.request_path
    );
    ranker
        .rank(&request)
        .map_err(|source| CliError::Rank { source })
}

/// Loads a JSON-encoded [`RankRequest`] from disk.
pub(super) fn load_rank_request(path: &Utf8Path) -> Result<RankRequest, CliError> {
    let payload = read_utf8_file(path).map_err(|source| CliError::ReadRankRequest {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&payload).map_err(|source| CliError::ParseRankRequest {
        path: path.to_path_buf(),
        source,
    })
}

fn write_report(writer: &mut dyn Write, report: &RankReport<'_>) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(report).map_err(CliError::SerialiseReport)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteReport)?;
    writer.write_all(b"\n").map_err(CliError::WriteReport)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RankConfig, CliError> {
    let merged = RankArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RankConfig::try_from(merged)
}
