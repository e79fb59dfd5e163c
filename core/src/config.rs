use crate::{
    error::{BoardError, BoardResult},
    types::Segment,
};
use serde::{Deserialize, Serialize};

/// Longest registration history the generator accepts (about a century).
pub const MAX_HISTORY_DAYS: i64 = 36_500;

/// Lowest purchase frequency (purchases per month) a profile may ask for.
/// The purchase walk steps roughly `30 / frequency` days at a time.
pub const MIN_FREQUENCY: f64 = 0.01;

/// Per-segment shape of the synthetic client book.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SegmentProfile {
    pub segment: Segment,
    /// Purchases per month, drawn uniformly from [min, max).
    pub frequency_min: f64,
    pub frequency_max: f64,
    /// Unit price, drawn uniformly from [min, max).
    pub price_min: f64,
    pub price_max: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneratorConfig {
    pub seed: u64,
    pub population: usize,
    /// Registrations are spread over this many trailing days.
    pub history_days: i64,
    pub max_quantity: u32,
    pub products: Vec<String>,
    pub segments: Vec<SegmentProfile>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            population: 500,
            history_days: 365,
            max_quantity: 5,
            products: ["Produto A", "Produto B", "Produto C", "Produto D", "Produto E"]
                .iter()
                .map(|p| p.to_string())
                .collect(),
            segments: vec![
                SegmentProfile {
                    segment: Segment::Premium,
                    frequency_min: 1.0,
                    frequency_max: 3.0,
                    price_min: 150.0,
                    price_max: 1000.0,
                },
                SegmentProfile {
                    segment: Segment::Standard,
                    frequency_min: 0.5,
                    frequency_max: 1.5,
                    price_min: 50.0,
                    price_max: 250.0,
                },
                SegmentProfile {
                    segment: Segment::Basic,
                    frequency_min: 0.1,
                    frequency_max: 0.5,
                    price_min: 10.0,
                    price_max: 100.0,
                },
            ],
        }
    }
}

impl GeneratorConfig {
    /// Load `{data_dir}/generator.json`.
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let path = format!("{data_dir}/generator.json");
        let content = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: GeneratorConfig = serde_json::from_str(&content)?;
        config
            .validate()
            .map_err(|e| anyhow::anyhow!("{path}: {e}"))?;
        Ok(config)
    }

    /// Config with hardcoded defaults for use in tests: a 50-client book.
    pub fn default_test() -> Self {
        Self {
            population: 50,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn profile(&self, segment: Segment) -> Option<&SegmentProfile> {
        self.segments.iter().find(|p| p.segment == segment)
    }

    pub fn validate(&self) -> BoardResult<()> {
        if self.products.is_empty() {
            return Err(BoardError::InvalidConfig("product list is empty".into()));
        }
        if self.history_days <= 0 || self.history_days > MAX_HISTORY_DAYS {
            return Err(BoardError::InvalidConfig(format!(
                "history_days must be in 1..={MAX_HISTORY_DAYS}, got {}",
                self.history_days
            )));
        }
        if self.max_quantity == 0 {
            return Err(BoardError::InvalidConfig("max_quantity must be at least 1".into()));
        }
        for segment in Segment::ALL {
            let p = self.profile(segment).ok_or_else(|| {
                BoardError::InvalidConfig(format!("no profile for segment {segment}"))
            })?;
            let frequency_ok = p.frequency_min >= MIN_FREQUENCY
                && p.frequency_max.is_finite()
                && p.frequency_max >= p.frequency_min;
            if !frequency_ok {
                return Err(BoardError::InvalidConfig(format!(
                    "{segment}: bad frequency range {}..{}",
                    p.frequency_min, p.frequency_max
                )));
            }
            let price_ok =
                p.price_min > 0.0 && p.price_max.is_finite() && p.price_max >= p.price_min;
            if !price_ok {
                return Err(BoardError::InvalidConfig(format!(
                    "{segment}: bad price range {}..{}",
                    p.price_min, p.price_max
                )));
            }
        }
        Ok(())
    }
}
