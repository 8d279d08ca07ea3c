//! Addressing steps at any depth.
//!
//! A [`StepPath`] names a root step followed by zero or more
//! `(option, step)` hops into nested continuations. Written as dot separated
//! indices: `2` is the third root step, `2.1.0` is the first step under the
//! second option of that step.
//!
//! Edits at depth are built from the one-level operations in
//! [`crate::edit`]: the target is rewritten, then each ancestor is rebuilt
//! with [`Step::update_next_step`] on the way back up.

use crate::edit::{delete_step, move_item, update_step};
use crate::error::PathError;
use crate::model::Step;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StepPath {
    pub root: usize,
    pub hops: Vec<(usize, usize)>,
}

impl StepPath {
    pub fn root(index: usize) -> Self {
        Self {
            root: index,
            hops: Vec::new(),
        }
    }

    /// Path to step `step_index` under option `option_index` of this step
    pub fn child(&self, option_index: usize, step_index: usize) -> Self {
        let mut hops = self.hops.clone();
        hops.push((option_index, step_index));
        Self {
            root: self.root,
            hops,
        }
    }

    /// Path of the step owning this one, `None` for root steps
    pub fn parent(&self) -> Option<StepPath> {
        let (_, parent_hops) = self.hops.split_last()?;
        Some(Self {
            root: self.root,
            hops: parent_hops.to_vec(),
        })
    }

    pub fn depth(&self) -> usize {
        self.hops.len()
    }

    /// Index of the addressed step among its siblings
    pub fn index(&self) -> usize {
        self.hops.last().map_or(self.root, |&(_, step)| step)
    }

    /// Same parent and option, different sibling index
    pub fn with_index(&self, index: usize) -> Self {
        let mut path = self.clone();
        match path.hops.last_mut() {
            Some((_, step)) => *step = index,
            None => path.root = index,
        }
        path
    }
}

impl fmt::Display for StepPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root)?;
        for (option, step) in &self.hops {
            write!(f, ".{}.{}", option, step)?;
        }
        Ok(())
    }
}

impl FromStr for StepPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PathError::Empty);
        }
        let indices = s
            .split('.')
            .map(|part| {
                part.trim()
                    .parse::<usize>()
                    .map_err(|_| PathError::InvalidComponent(part.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        if indices.len() % 2 == 0 {
            return Err(PathError::DanglingOption(s.to_string()));
        }
        Ok(Self {
            root: indices[0],
            hops: indices[1..].chunks(2).map(|c| (c[0], c[1])).collect(),
        })
    }
}

/// Step at `path`, if every index along the way exists
pub fn get<'a>(steps: &'a [Step], path: &StepPath) -> Option<&'a Step> {
    path.hops
        .iter()
        .try_fold(steps.get(path.root)?, |step, &(option, index)| {
            step.next_step(option, index)
        })
}

/// Rewrites the step at `path` with `f`. Unchanged copy when the path does
/// not resolve.
pub fn update_at<F>(steps: &[Step], path: &StepPath, f: F) -> Vec<Step>
where
    F: FnOnce(&Step) -> Step,
{
    match steps.get(path.root) {
        Some(root) => update_step(steps, path.root, update_within(root, &path.hops, f)),
        None => steps.to_vec(),
    }
}

fn update_within<F>(step: &Step, hops: &[(usize, usize)], f: F) -> Step
where
    F: FnOnce(&Step) -> Step,
{
    match hops.split_first() {
        None => f(step),
        Some((&(option, index), rest)) => match step.next_step(option, index) {
            Some(child) => step.update_next_step(option, index, update_within(child, rest, f)),
            None => step.clone(),
        },
    }
}

/// Removes the step at `path`
pub fn delete_at(steps: &[Step], path: &StepPath) -> Vec<Step> {
    match (path.parent(), path.hops.last()) {
        (Some(parent), Some(&(option, index))) => {
            update_at(steps, &parent, |p| p.delete_next_step(option, index))
        }
        _ => delete_step(steps, path.root),
    }
}

/// Moves the step at `path` to sibling position `to`
pub fn reorder_at(steps: &[Step], path: &StepPath, to: usize) -> Vec<Step> {
    match (path.parent(), path.hops.last()) {
        (Some(parent), Some(&(option, index))) => {
            update_at(steps, &parent, |p| p.reorder_next_steps(option, index, to))
        }
        _ => move_item(steps, path.root, to).unwrap_or_else(|| steps.to_vec()),
    }
}
