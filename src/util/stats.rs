use std::fmt::Display;

/// Step counts of the rays traced in a pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    pub rays: usize,
    pub total_steps: u64,
    /// `None` until the first ray is recorded.
    pub range: Option<(usize, usize)>,
}

impl Stats {
    pub fn record(&mut self, steps: usize) {
        self.rays += 1;
        self.total_steps += steps as u64;
        self.range = Some(match self.range {
            Some((min, max)) => (min.min(steps), max.max(steps)),
            None => (steps, steps),
        });
    }

    /// Folds in the summary of a chunk traced after this one.
    pub fn absorb(&mut self, chunk: &Stats) {
        self.rays += chunk.rays;
        self.total_steps += chunk.total_steps;
        self.range = match (self.range, chunk.range) {
            (Some((a_min, a_max)), Some((b_min, b_max))) => Some((a_min.min(b_min), a_max.max(b_max))),
            (a, b) => a.or(b),
        };
    }

    pub fn mean_steps(&self) -> Option<f64> {
        (self.rays > 0).then(|| self.total_steps as f64 / self.rays as f64)
    }
}

impl Extend<usize> for Stats {
    fn extend<I: IntoIterator<Item = usize>>(&mut self, iter: I) {
        for steps in iter {
            self.record(steps);
        }
    }
}

impl FromIterator<usize> for Stats {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut stats = Stats::default();
        stats.extend(iter);
        stats
    }
}

impl Display for Stats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.range, self.mean_steps()) {
            (Some((min, max)), Some(mean)) => write!(
                f,
                "{} rays, {min}..={max} steps, mean {mean:.1}",
                self.rays
            ),
            _ => write!(f, "no rays"),
        }
    }
}
