use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Supplies the random weights and capacities of road network edges.
///
/// Created once per run and used only by the road network builder.
pub trait EdgeAttributeSource: std::fmt::Debug {
    /// Returns an integer in `low..=high`.
    fn draw(&mut self, low: i64, high: i64) -> i64;
}

/// Uniform draws from a `StdRng`. The same seed yields the same sequence.
#[derive(Debug, Clone)]
pub struct SeededEdgeSource {
    rng: StdRng,
}

impl SeededEdgeSource {
    pub fn from_seed(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    pub fn from_os_rng() -> Self {
        Self { rng: StdRng::from_os_rng() }
    }

    /// Seeded when a seed is given, OS entropy otherwise.
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::from_os_rng(),
        }
    }
}

impl EdgeAttributeSource for SeededEdgeSource {
    fn draw(&mut self, low: i64, high: i64) -> i64 {
        self.rng.random_range(low..=high)
    }
}

/// Replays a fixed list of values, cycling when exhausted.
///
/// Values outside the requested range are clamped into it; an empty script always yields `low`.
#[derive(Debug, Clone)]
pub struct ScriptedEdgeSource {
    values: Vec<i64>,
    cursor: usize,
}

impl ScriptedEdgeSource {
    pub fn new(values: Vec<i64>) -> Self {
        Self { values, cursor: 0 }
    }

    /// Every draw returns `value` (clamped).
    pub fn constant(value: i64) -> Self {
        Self::new(vec![value])
    }
}

impl EdgeAttributeSource for ScriptedEdgeSource {
    fn draw(&mut self, low: i64, high: i64) -> i64 {
        if self.values.is_empty() {
            return low;
        }

        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;

        value.clamp(low, high)
    }
}
