//! # Edit history
//!
//! Every recorded mutation is stored next to the inverse computed against the document
//! it was applied to. Undo replays inverses newest first; redo replays the mutations.
//!
//! Mutations that change nothing (deleting an absent node) are applied but never
//! recorded. Groups collect several mutations into one step and may nest: only the
//! outermost group closes the step, so a script run inside an open group becomes part
//! of it. A group can be rolled back to a mark without touching what came before.

use std::collections::VecDeque;

use formbuilder_document::Document;

use crate::{Mutation, MutationError};

/// Steps kept before the oldest is forgotten
const HISTORY_LIMIT: usize = 100;

/// One undo step
#[derive(Debug, Clone, Default)]
struct Step {
    label: Option<String>,
    /// In application order
    forward: Vec<Mutation>,
    /// `backward[i]` reverts `forward[i]`
    backward: Vec<Mutation>,
}

impl Step {
    fn revert(&self, doc: &mut Document) -> Result<(), MutationError> {
        self.backward.iter().rev().try_for_each(|inverse| inverse.apply(doc))
    }

    fn replay(&self, doc: &mut Document) -> Result<(), MutationError> {
        self.forward.iter().try_for_each(|mutation| mutation.apply(doc))
    }
}

#[derive(Debug, Default)]
pub struct UndoStack {
    done: VecDeque<Step>,
    undone: Vec<Step>,
    open: Option<Step>,
    depth: usize,
}

impl UndoStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `mutation` to `doc` and remember how to revert it.
    ///
    /// Returns `false` for a no-op, which leaves the history untouched.
    pub fn record(&mut self, mutation: &Mutation, doc: &mut Document) -> Result<bool, MutationError> {
        let inverse = mutation.to_inverse(doc)?;
        mutation.apply(doc)?;

        let Some(inverse) = inverse else {
            return Ok(false);
        };

        match &mut self.open {
            Some(step) => {
                step.forward.push(mutation.clone());
                step.backward.push(inverse);
            }
            None => self.push(Step {
                label: None,
                forward: vec![mutation.clone()],
                backward: vec![inverse],
            }),
        }
        Ok(true)
    }

    /// Open a group. The first label given to the outermost group names the step.
    pub fn begin_group(&mut self, label: Option<String>) {
        let step = self.open.get_or_insert_with(Step::default);
        if step.label.is_none() {
            step.label = label;
        }
        self.depth += 1;
    }

    /// Close a group; closing the outermost one commits its step if it changed anything
    pub fn end_group(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        if self.depth > 0 {
            return;
        }
        if let Some(step) = self.open.take() {
            if !step.forward.is_empty() {
                self.push(step);
            }
        }
    }

    /// Position inside the open group, for [`UndoStack::rollback_to`]
    pub fn mark(&self) -> usize {
        self.open.as_ref().map_or(0, |step| step.forward.len())
    }

    /// Revert and forget what the open group recorded after `mark`
    pub fn rollback_to(&mut self, mark: usize, doc: &mut Document) -> Result<(), MutationError> {
        let Some(step) = &mut self.open else {
            return Ok(());
        };
        while step.forward.len() > mark {
            step.forward.pop();
            if let Some(inverse) = step.backward.pop() {
                inverse.apply(doc)?;
            }
        }
        Ok(())
    }

    fn push(&mut self, step: Step) {
        self.done.push_back(step);
        if self.done.len() > HISTORY_LIMIT {
            self.done.pop_front();
        }
        self.undone.clear();
    }

    pub fn undo(&mut self, doc: &mut Document) -> Result<bool, MutationError> {
        let Some(step) = self.done.pop_back() else {
            return Ok(false);
        };
        step.revert(doc)?;
        self.undone.push(step);
        Ok(true)
    }

    pub fn redo(&mut self, doc: &mut Document) -> Result<bool, MutationError> {
        let Some(step) = self.undone.pop() else {
            return Ok(false);
        };
        step.replay(doc)?;
        self.done.push_back(step);
        Ok(true)
    }

    pub fn can_undo(&self) -> bool {
        !self.done.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }

    pub fn undo_label(&self) -> Option<&str> {
        self.done.back().and_then(|step| step.label.as_deref())
    }

    pub fn redo_label(&self) -> Option<&str> {
        self.undone.last().and_then(|step| step.label.as_deref())
    }
}
