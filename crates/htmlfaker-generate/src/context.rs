use htmlfaker_core::{BlockKind, Configuration};

use crate::model::DocumentReport;
use crate::random::RandomSource;
use crate::text::TextSource;

/// Everything a composer reads or draws from while rendering.
pub struct ComposeContext<'a> {
    pub config: &'a Configuration,
    pub random: &'a mut RandomSource,
    pub text: &'a mut dyn TextSource,
    pub report: &'a mut DocumentReport,
}

impl<'a> ComposeContext<'a> {
    pub fn new(
        config: &'a Configuration,
        random: &'a mut RandomSource,
        text: &'a mut dyn TextSource,
        report: &'a mut DocumentReport,
    ) -> Self {
        Self {
            config,
            random,
            text,
            report,
        }
    }
}

/// Kind of a top-level unit emitted by the document loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnitKind {
    Heading,
    Paragraph,
    Block,
}

/// Mutable state of one generation run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationState {
    pub heading_level: u8,
    /// Level recorded when the current paragraph run started.
    pub original_heading_level: u8,
    pub last_unit: Option<UnitKind>,
    pub last_block: Option<BlockKind>,
}

impl GenerationState {
    pub fn new(heading_level: u8) -> Self {
        Self {
            heading_level,
            original_heading_level: heading_level,
            last_unit: None,
            last_block: None,
        }
    }

    /// Start a paragraph run at the current level.
    pub fn begin_run(&mut self) {
        self.original_heading_level = self.heading_level;
    }

    /// Move one level deeper or back up, staying within
    /// `[original_heading_level, max_level]`.
    pub fn step_heading(&mut self, deeper: bool, max_level: u8) {
        let floor = self.original_heading_level;
        let ceiling = max_level.max(floor);
        let level = if deeper {
            self.heading_level.saturating_add(1)
        } else {
            self.heading_level.saturating_sub(1)
        };
        self.heading_level = level.clamp(floor, ceiling);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_steps_stay_inside_run_bounds() {
        let mut state = GenerationState::new(2);
        state.step_heading(false, 4);
        assert_eq!(state.heading_level, 2);
        state.step_heading(true, 4);
        state.step_heading(true, 4);
        state.step_heading(true, 4);
        assert_eq!(state.heading_level, 4);
        state.step_heading(false, 4);
        assert_eq!(state.heading_level, 3);
    }

    #[test]
    fn begin_run_raises_the_floor() {
        let mut state = GenerationState::new(2);
        state.step_heading(true, 6);
        state.begin_run();
        state.step_heading(false, 6);
        assert_eq!(state.heading_level, 3);
    }
}
