//! Monte Carlo simulation of ARM rate paths and their lifetime cost
//!
//! A [`PathGenerator`] bootstraps annual index changes from history into capped
//! ARM rate paths; the [`MonteCarloDriver`] amortizes each path and reduces the
//! resulting costs to a [`SimulationSummary`].

mod path;
mod summary;
mod driver;

pub use path::{generate_rate_path, PathGenerator, RatePath, INDEX_FLOOR_PERCENT, MIN_HISTORY_OBSERVATIONS};
pub use summary::{
    percentile, rate_bands, CostDistribution, RateBand, SimulationSummary, Verdict, INTERVAL_HIGH_PERCENTILE,
    INTERVAL_LOW_PERCENTILE,
};
pub use driver::{
    CancellationToken, MonteCarloDriver, NoProgress, ProgressObserver, SimulationConfig, MIN_SAMPLE_STRIDE,
};
