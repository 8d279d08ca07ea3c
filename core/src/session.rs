//! Editing session for one flow's step tree

use crate::edit::{add_step, delete_step};
use crate::model::Step;

/// Working copy of a flow's tree plus the pending new-step draft.
///
/// The tree is loaded whole, edited locally and saved whole; `original`
/// is the last state known to be stored on the server.
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    flow_id: i64,
    original: Vec<Step>,
    steps: Vec<Step>,
    draft: Step,
}

impl EditSession {
    pub fn new(flow_id: i64, steps: Vec<Step>) -> Self {
        Self {
            flow_id,
            original: steps.clone(),
            steps,
            draft: Step::blank(),
        }
    }

    pub fn flow_id(&self) -> i64 {
        self.flow_id
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn draft(&self) -> &Step {
        &self.draft
    }

    pub fn set_draft(&mut self, draft: Step) {
        self.draft = draft;
    }

    /// Replaces the working tree with `f(current)`
    pub fn apply<F>(&mut self, f: F)
    where
        F: FnOnce(&[Step]) -> Vec<Step>,
    {
        self.steps = f(&self.steps);
    }

    /// Appends the draft to the root sequence and resets it to blank
    pub fn add_step(&mut self) {
        let draft = std::mem::take(&mut self.draft);
        self.steps = add_step(&self.steps, draft);
    }

    pub fn delete_step(&mut self, index: usize) {
        self.steps = delete_step(&self.steps, index);
    }

    pub fn is_dirty(&self) -> bool {
        self.steps != self.original
    }

    /// An empty tree is never submitted
    pub fn can_save(&self) -> bool {
        !self.steps.is_empty()
    }

    pub fn mark_saved(&mut self) {
        self.original = self.steps.clone();
    }

    /// Records `saved` as the stored tree. Edits made while the save was in
    /// flight stay dirty.
    pub fn mark_saved_as(&mut self, saved: Vec<Step>) {
        self.original = saved;
    }

    /// Drops local edits and returns to the stored tree
    pub fn discard(&mut self) {
        self.steps = self.original.clone();
    }
}
