// crates/sigil-score/src/weights.rs
//
// Dimension weight vector for the legitimacy aggregator.
//
// Weights are re-normalized to sum to 1.0 before use, so a caller may
// override any subset and leave the rest at their defaults. Negative
// overrides are clamped to zero rather than rejected.

use serde::{Deserialize, Serialize};

/// Weights for the seven legitimacy dimensions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DimensionWeights {
    #[serde(default = "default_identity")]
    pub identity: f64,
    #[serde(default = "default_wallet")]
    pub wallet: f64,
    #[serde(default = "default_social")]
    pub social: f64,
    #[serde(default = "default_ens")]
    pub ens: f64,
    #[serde(default = "default_memory")]
    pub memory: f64,
    #[serde(default = "default_external")]
    pub external: f64,
    #[serde(default = "default_overlap")]
    pub overlap: f64,
}

fn default_identity() -> f64 {
    0.32
}

fn default_wallet() -> f64 {
    0.23
}

fn default_social() -> f64 {
    0.17
}

fn default_ens() -> f64 {
    0.09
}

fn default_memory() -> f64 {
    0.12
}

fn default_external() -> f64 {
    0.04
}

fn default_overlap() -> f64 {
    0.03
}

impl Default for DimensionWeights {
    fn default() -> Self {
        Self {
            identity: default_identity(),
            wallet: default_wallet(),
            social: default_social(),
            ens: default_ens(),
            memory: default_memory(),
            external: default_external(),
            overlap: default_overlap(),
        }
    }
}

impl DimensionWeights {
    /// Clamp negatives to zero and re-normalize to sum to 1.0.
    ///
    /// If every weight resolves to zero, the defaults are used untouched.
    pub fn normalized(&self) -> Self {
        let clamp = |w: f64| if w.is_finite() && w > 0.0 { w } else { 0.0 };
        let identity = clamp(self.identity);
        let wallet = clamp(self.wallet);
        let social = clamp(self.social);
        let ens = clamp(self.ens);
        let memory = clamp(self.memory);
        let external = clamp(self.external);
        let overlap = clamp(self.overlap);

        let sum = identity + wallet + social + ens + memory + external + overlap;
        if sum <= 0.0 {
            return Self::default();
        }

        Self {
            identity: identity / sum,
            wallet: wallet / sum,
            social: social / sum,
            ens: ens / sum,
            memory: memory / sum,
            external: external / sum,
            overlap: overlap / sum,
        }
    }

    /// Sum of all seven weights.
    pub fn sum(&self) -> f64 {
        self.identity + self.wallet + self.social + self.ens + self.memory + self.external
            + self.overlap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_sum_to_one() {
        let w = DimensionWeights::default();
        assert!((w.sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn partial_override_renormalizes_to_one() {
        let w = DimensionWeights {
            identity: 0.9,
            ..DimensionWeights::default()
        }
        .normalized();
        assert!((w.sum() - 1.0).abs() < 1e-9);
        assert!(w.identity > DimensionWeights::default().identity);
    }

    #[test]
    fn negative_weights_are_clamped_not_fatal() {
        let w = DimensionWeights {
            identity: -1.0,
            ..DimensionWeights::default()
        }
        .normalized();
        assert_eq!(w.identity, 0.0);
        assert!((w.sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn all_zero_falls_back_to_defaults() {
        let w = DimensionWeights {
            identity: 0.0,
            wallet: 0.0,
            social: 0.0,
            ens: 0.0,
            memory: 0.0,
            external: 0.0,
            overlap: 0.0,
        }
        .normalized();
        assert!((w.identity - 0.32).abs() < 1e-9);
        assert!((w.sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn partial_json_override_fills_defaults() {
        let w: DimensionWeights = serde_json::from_str(r#"{"identity": 0.5}"#).unwrap();
        assert!((w.identity - 0.5).abs() < 1e-9);
        assert!((w.wallet - 0.23).abs() < 1e-9);
    }
}
