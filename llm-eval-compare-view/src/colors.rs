//! Stable per-run colors, scoped to one selection session.

use llm_eval_compare_core::EvaluationRunId;
use serde::Serialize;
use std::collections::HashMap;

use crate::selection::RunSelection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteEntry {
    pub name: &'static str,
    pub emphasized: (u8, u8, u8),
    pub muted: (u8, u8, u8),
}

pub const PALETTE: [PaletteEntry; 10] = [
    PaletteEntry { name: "blue", emphasized: (37, 99, 235), muted: (219, 234, 254) },
    PaletteEntry { name: "purple", emphasized: (147, 51, 234), muted: (243, 232, 255) },
    PaletteEntry { name: "green", emphasized: (22, 163, 74), muted: (220, 252, 231) },
    PaletteEntry { name: "red", emphasized: (220, 38, 38), muted: (254, 226, 226) },
    PaletteEntry { name: "amber", emphasized: (217, 119, 6), muted: (254, 243, 199) },
    PaletteEntry { name: "pink", emphasized: (219, 39, 119), muted: (252, 231, 243) },
    PaletteEntry { name: "teal", emphasized: (13, 148, 136), muted: (204, 251, 241) },
    PaletteEntry { name: "indigo", emphasized: (79, 70, 229), muted: (224, 231, 255) },
    PaletteEntry { name: "orange", emphasized: (234, 88, 12), muted: (255, 237, 213) },
    PaletteEntry { name: "cyan", emphasized: (8, 145, 178), muted: (207, 250, 254) },
];

/// A palette slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RunColor {
    pub slot: usize,
    pub name: &'static str,
}

impl RunColor {
    fn from_slot(slot: usize) -> Self {
        Self {
            slot,
            name: PALETTE[slot % PALETTE.len()].name,
        }
    }

    /// Class-style identifier; `emphasized` selects the hover rendering.
    pub fn identifier(&self, emphasized: bool) -> String {
        if emphasized {
            format!("bg-{}-600 text-white", self.name)
        } else {
            format!("bg-{}-100 text-{}-800", self.name, self.name)
        }
    }

    pub fn rgb(&self, emphasized: bool) -> (u8, u8, u8) {
        let entry = &PALETTE[self.slot % PALETTE.len()];
        if emphasized {
            entry.emphasized
        } else {
            entry.muted
        }
    }
}

/// Color assignments for one selection. Slots are handed out in first-request order.
#[derive(Debug, Clone)]
pub struct ColorSession {
    selection: RunSelection,
    assignments: HashMap<EvaluationRunId, RunColor>,
}

impl ColorSession {
    pub fn new(selection: RunSelection) -> Self {
        Self {
            selection,
            assignments: HashMap::new(),
        }
    }

    /// Returns the run's color, assigning the next slot on first request.
    /// Wraps around once every slot is taken.
    pub fn assign(&mut self, run_id: &EvaluationRunId) -> RunColor {
        if let Some(color) = self.assignments.get(run_id) {
            return *color;
        }
        let color = RunColor::from_slot(self.assignments.len() % PALETTE.len());
        self.assignments.insert(run_id.clone(), color);
        color
    }

    pub fn color(&mut self, run_id: &EvaluationRunId, emphasized: bool) -> String {
        self.assign(run_id).identifier(emphasized)
    }

    pub fn assigned(&self, run_id: &str) -> Option<RunColor> {
        self.assignments.get(run_id).copied()
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

/// Hands out the session for the current selection, starting a fresh one
/// whenever the selection handle changes.
#[derive(Debug, Default)]
pub struct ColorAssigner {
    session: Option<ColorSession>,
}

impl ColorAssigner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&mut self, selection: &RunSelection) -> &mut ColorSession {
        let stale = self
            .session
            .as_ref()
            .map_or(true, |session| !session.selection.same_session(selection));
        if stale {
            tracing::debug!(runs = selection.len(), "Starting new color session");
            self.session = Some(ColorSession::new(selection.clone()));
        }
        self.session.get_or_insert_with(|| ColorSession::new(selection.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(id: &str) -> EvaluationRunId {
        EvaluationRunId::from(id)
    }

    #[test]
    fn test_same_run_same_color() {
        let mut session = ColorSession::new(RunSelection::parse("r1,r2"));
        let first = session.assign(&run("r1"));
        let second = session.assign(&run("r1"));
        assert_eq!(first, second);
        assert_eq!(session.len(), 1);
    }

    #[test]
    fn test_distinct_runs_distinct_colors() {
        let mut session = ColorSession::new(RunSelection::default());
        let colors: Vec<RunColor> = (0..PALETTE.len())
            .map(|i| session.assign(&run(&format!("r{}", i))))
            .collect();
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_first_request_order() {
        let mut session = ColorSession::new(RunSelection::default());
        assert_eq!(session.assign(&run("later")).slot, 0);
        assert_eq!(session.assign(&run("earlier")).slot, 1);
        assert_eq!(session.assigned("later").map(|c| c.slot), Some(0));
        assert_eq!(session.assigned("never"), None);
    }

    #[test]
    fn test_palette_wraps() {
        let mut session = ColorSession::new(RunSelection::default());
        for i in 0..PALETTE.len() {
            session.assign(&run(&format!("r{}", i)));
        }
        assert_eq!(session.assign(&run("overflow")).slot, 0);
    }

    #[test]
    fn test_out_of_range_slot_wraps() {
        let color = RunColor { slot: PALETTE.len(), name: "blue" };
        assert_eq!(color.rgb(true), PALETTE[0].emphasized);
        assert_eq!(RunColor::from_slot(PALETTE.len() + 3).name, PALETTE[3].name);
    }

    #[test]
    fn test_variants_share_slot() {
        let mut session = ColorSession::new(RunSelection::default());
        let hover = session.color(&run("r1"), true);
        let muted = session.color(&run("r1"), false);
        assert_eq!(hover, "bg-blue-600 text-white");
        assert_eq!(muted, "bg-blue-100 text-blue-800");
        assert_eq!(session.len(), 1);
    }

    #[test]
    fn test_assigner_resets_on_new_selection() {
        let mut assigner = ColorAssigner::new();
        let selection = RunSelection::parse("r1,r2");

        assigner.session(&selection).assign(&run("r2"));
        assert_eq!(assigner.session(&selection.clone()).assigned("r2").map(|c| c.slot), Some(0));

        let reparsed = RunSelection::parse("r1,r2");
        let session = assigner.session(&reparsed);
        assert!(session.is_empty());
        assert_eq!(session.assign(&run("r1")).slot, 0);
    }
}
