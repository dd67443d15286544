use std::time::Duration;

use criterion::BenchmarkGroup;
use criterion::SamplingMode;
use criterion::measurement::Measurement;
use rand::SeedableRng;
use rand::rngs::StdRng;

const RNG_SEED: u64 = 0x5EED_2026;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RuntimeTier {
    Small,
    Medium,
    Large,
}

impl RuntimeTier {
    /// Tier for an input of `size` vertices or keys.
    pub fn for_size(size: usize) -> Self {
        if size <= 4_096 {
            Self::Small
        } else if size <= 16_384 {
            Self::Medium
        } else {
            Self::Large
        }
    }

    fn sample_size(self) -> usize {
        match self {
            Self::Small | Self::Medium => 15,
            Self::Large => 10,
        }
    }

    fn warm_up(self) -> Duration {
        match self {
            Self::Small => Duration::from_millis(100),
            Self::Medium => Duration::from_millis(300),
            Self::Large => Duration::from_millis(500),
        }
    }

    fn measurement(self) -> Duration {
        match self {
            Self::Small => Duration::from_millis(200),
            Self::Medium => Duration::from_millis(600),
            Self::Large => Duration::from_millis(1_200),
        }
    }
}

// Large inputs run long enough per iteration that flat sampling is cheaper.
pub fn apply_runtime_config<M: Measurement>(group: &mut BenchmarkGroup<'_, M>, size: usize) {
    let tier = RuntimeTier::for_size(size);
    group.sample_size(tier.sample_size());
    group.warm_up_time(tier.warm_up());
    group.measurement_time(tier.measurement());
    group.sampling_mode(match tier {
        RuntimeTier::Large => SamplingMode::Flat,
        RuntimeTier::Small | RuntimeTier::Medium => SamplingMode::Auto,
    });
}

pub fn default_rng() -> StdRng {
    StdRng::seed_from_u64(RNG_SEED)
}
