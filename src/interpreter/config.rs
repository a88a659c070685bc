/// How the driver decides that reduction has reached weak head normal form
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Convergence {
    /// Stop as soon as no rewrite rule applies to the head
    #[default]
    RuleFired,
    /// Stop once reassembling head and spine yields the same expression
    /// twice in a row
    Structural,
}

/// Knobs for a [`super::Reducer`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReducerConfig {
    /// Upper bound on rewrite steps, unbounded when `None`
    pub max_steps: Option<u64>,
    pub convergence: Convergence,
}

impl ReducerConfig {
    pub fn with_max_steps(mut self, max_steps: u64) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    pub fn with_convergence(mut self, convergence: Convergence) -> Self {
        self.convergence = convergence;
        self
    }
}
