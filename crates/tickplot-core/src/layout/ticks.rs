//! Tick-label thinning.
//!
//! One shared rule for all three chart variants: short series label every
//! bar, long series label a thinned subset so the axis stays readable.

/// Series up to this length get a label on every bar.
pub const MAX_FULLY_LABELED: usize = 20;
/// Target label count once thinning kicks in.
pub const TARGET_TICKS: usize = 10;

/// One labeled axis position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tick {
    pub index: usize,
    pub label: String,
}

/// Strictly increasing set of labeled x positions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TickPlan {
    ticks: Vec<Tick>,
}

impl TickPlan {
    /// Choose which of `labels` get an axis label.
    ///
    /// For more than [`MAX_FULLY_LABELED`] bars the step is
    /// `ceil(len / TARGET_TICKS)`, starting at index 0. The tail can stay
    /// unlabeled for up to `step - 1` positions; no final label is forced.
    pub fn plan(labels: &[String]) -> Self {
        let count = labels.len();
        if count <= MAX_FULLY_LABELED {
            let ticks = labels
                .iter()
                .enumerate()
                .map(|(index, label)| Tick {
                    index,
                    label: label.clone(),
                })
                .collect();
            return Self { ticks };
        }

        let step = count.div_ceil(TARGET_TICKS);
        let ticks = (0..count)
            .step_by(step)
            .map(|index| Tick {
                index,
                label: labels[index].clone(),
            })
            .collect();
        Self { ticks }
    }

    pub fn ticks(&self) -> &[Tick] {
        &self.ticks
    }

    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    /// Labeled x positions as chart coordinates.
    pub fn positions(&self) -> Vec<f64> {
        self.ticks.iter().map(|tick| tick.index as f64).collect()
    }

    /// Label for the tick at exactly `index`, if that index is labeled.
    pub fn label_at(&self, index: usize) -> Option<&str> {
        self.ticks
            .iter()
            .find(|tick| tick.index == index)
            .map(|tick| tick.label.as_str())
    }
}
