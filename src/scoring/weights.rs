use serde::Serialize;

/// Weights used to blend the four sub-scores into the composite score.
///
/// These are business-owned. They must sum to exactly 1.0 so the composite
/// stays within [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreWeights {
    pub fee: f64,
    pub liquidity: f64,
    pub governance: f64,
    pub minimum: f64,
}

pub const WEIGHTS: ScoreWeights = ScoreWeights {
    fee: 0.35,
    liquidity: 0.35,
    governance: 0.20,
    minimum: 0.10,
};

impl Default for ScoreWeights {
    fn default() -> Self {
        WEIGHTS
    }
}

impl ScoreWeights {
    pub fn total(&self) -> f64 {
        self.fee + self.liquidity + self.governance + self.minimum
    }
}
