//! Metric generation seam.
//!
//! Real metric computation lives outside this service. [`MetricSource`] is
//! the boundary a strategy calls once its milestones are done; the default
//! [`RandomMetrics`] draws placeholder values in realistic ranges.

use std::ops::RangeInclusive;

use async_trait::async_trait;
use rand::Rng;
use redteam_core::error::ExecutionFault;
use redteam_core::results::{round_to, BlackBoxResults, WhiteBoxResults};
use redteam_core::submission::{BlackBoxParams, RunOptions, WhiteBoxParams};

#[async_trait]
pub trait MetricSource: Send + Sync {
    async fn white_box(
        &self,
        params: &WhiteBoxParams,
        options: &RunOptions,
    ) -> Result<WhiteBoxResults, ExecutionFault>;

    async fn black_box(
        &self,
        params: &BlackBoxParams,
        options: &RunOptions,
    ) -> Result<BlackBoxResults, ExecutionFault>;
}

// ---------------------------------------------------------------------------
// Placeholder ranges
// ---------------------------------------------------------------------------

const WHITE_ASR: RangeInclusive<f64> = 0.4..=0.8;
const WHITE_ACCURACY: RangeInclusive<f64> = 0.85..=0.95;
const WHITE_RECALL: RangeInclusive<f64> = 0.8..=0.9;
const WHITE_PRECISION: RangeInclusive<f64> = 0.8..=0.9;

const BLACK_ASR: RangeInclusive<f64> = 0.3..=0.9;
const BLACK_LATENCY_SECS: RangeInclusive<f64> = 1.0..=5.0;
const BLACK_TOKEN_USAGE: RangeInclusive<u32> = 500..=2000;

/// Uniformly random placeholder metrics.
///
/// Ignores [`RunOptions`]: `maxSamples` and the defense are validated and
/// logged on the run span but do not change the drawn values.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomMetrics;

impl RandomMetrics {
    fn draw_white_box() -> WhiteBoxResults {
        let mut rng = rand::rng();
        WhiteBoxResults::new(
            round_to(rng.random_range(WHITE_ASR), 3),
            round_to(rng.random_range(WHITE_ACCURACY), 3),
            round_to(rng.random_range(WHITE_RECALL), 3),
            round_to(rng.random_range(WHITE_PRECISION), 3),
        )
    }

    fn draw_black_box(attack_category: &str) -> BlackBoxResults {
        let mut rng = rand::rng();
        BlackBoxResults::new(
            round_to(rng.random_range(BLACK_ASR), 3),
            round_to(rng.random_range(BLACK_LATENCY_SECS), 2),
            rng.random_range(BLACK_TOKEN_USAGE),
            attack_category,
        )
    }
}

#[async_trait]
impl MetricSource for RandomMetrics {
    async fn white_box(
        &self,
        _params: &WhiteBoxParams,
        _options: &RunOptions,
    ) -> Result<WhiteBoxResults, ExecutionFault> {
        Ok(Self::draw_white_box())
    }

    async fn black_box(
        &self,
        params: &BlackBoxParams,
        _options: &RunOptions,
    ) -> Result<BlackBoxResults, ExecutionFault> {
        Ok(Self::draw_black_box(&params.attack_category))
    }
}
