//! Step-tree edit model.
//!
//! Every operation takes the current value by reference and returns a new
//! one; nothing is mutated in place. Out-of-range indices are absorbed: the
//! input comes back unchanged, which keeps stale indices from a UI event
//! harmless.
//!
//! Operations here act on one level: a step's options, or one option's
//! `proximo_paso`. Deeper edits compose them through
//! [`Step::update_next_step`], see [`crate::path`].

use crate::model::{InputKind, Step, StepKind, StepOption, StepType};

/// Field of an option targeted by [`Step::update_option`]
#[derive(Debug, Clone, PartialEq)]
pub enum OptionField {
    Valor(String),
    Mensaje(String),
    ProximoPaso(Vec<Step>),
}

impl Step {
    /// Replaces the step kind.
    ///
    /// Options survive a switch between the two selection kinds. Switching
    /// to a non-selection kind drops them, and switching into a selection
    /// kind from any other kind starts with no options.
    pub fn with_type(&self, step_type: StepType) -> Step {
        let options = self.options().to_vec();
        Step {
            kind: StepKind::from_type(step_type, options),
            ..self.clone()
        }
    }

    pub fn with_message(&self, text: impl Into<String>) -> Step {
        Step {
            message: text.into(),
            ..self.clone()
        }
    }

    pub fn with_input_kind(&self, input_kind: InputKind) -> Step {
        Step {
            input_kind: Some(input_kind),
            ..self.clone()
        }
    }

    /// Marks or unmarks the step as the end of the flow
    pub fn with_final(&self, is_final: bool) -> Step {
        Step {
            is_final: is_final.then_some(true),
            ..self.clone()
        }
    }

    /// Appends a blank option labeled with its position. No-op on
    /// non-selection kinds.
    pub fn add_option(&self) -> Step {
        self.map_options(|options| {
            let mut options = options.to_vec();
            options.push(StepOption::at_position(options.len() + 1));
            Some(options)
        })
    }

    pub fn update_option(&self, index: usize, field: OptionField) -> Step {
        self.map_options(|options| {
            let mut options = options.to_vec();
            let option = options.get_mut(index)?;
            match field {
                OptionField::Valor(value) => option.value = value,
                OptionField::Mensaje(message) => option.message = message,
                OptionField::ProximoPaso(steps) => option.next_steps = steps,
            }
            Some(options)
        })
    }

    /// Removes the option at `index` and renumbers the rest to 1..N
    pub fn delete_option(&self, index: usize) -> Step {
        self.map_options(|options| {
            if index >= options.len() {
                return None;
            }
            let mut options = options.to_vec();
            options.remove(index);
            Some(renumber_options(options))
        })
    }

    /// Appends a blank step to the continuation of option `option_index`
    pub fn add_next_step(&self, option_index: usize) -> Step {
        self.map_next_steps(option_index, |steps| Some(add_step(steps, Step::blank())))
    }

    /// Replaces one nested step wholesale. Siblings are untouched.
    pub fn update_next_step(&self, option_index: usize, step_index: usize, step: Step) -> Step {
        self.map_next_steps(option_index, |steps| {
            (step_index < steps.len()).then(|| update_step(steps, step_index, step))
        })
    }

    pub fn delete_next_step(&self, option_index: usize, step_index: usize) -> Step {
        self.map_next_steps(option_index, |steps| {
            (step_index < steps.len()).then(|| delete_step(steps, step_index))
        })
    }

    /// Moves an option and renumbers all options to match their new position
    pub fn reorder_options(&self, from: usize, to: usize) -> Step {
        self.map_options(|options| move_item(options, from, to).map(renumber_options))
    }

    pub fn reorder_next_steps(&self, option_index: usize, from: usize, to: usize) -> Step {
        self.map_next_steps(option_index, |steps| move_item(steps, from, to))
    }

    // Rebuilds the step with `f(options)`, or clones it unchanged when the
    // kind has no options or `f` declines.
    fn map_options<F>(&self, f: F) -> Step
    where
        F: FnOnce(&[StepOption]) -> Option<Vec<StepOption>>,
    {
        let Some(options) = self.kind.options() else {
            return self.clone();
        };
        match f(options) {
            Some(options) => Step {
                kind: StepKind::from_type(self.step_type(), options),
                ..self.clone()
            },
            None => self.clone(),
        }
    }

    fn map_next_steps<F>(&self, option_index: usize, f: F) -> Step
    where
        F: FnOnce(&[Step]) -> Option<Vec<Step>>,
    {
        self.map_options(|options| {
            let next_steps = f(&options.get(option_index)?.next_steps)?;
            let mut options = options.to_vec();
            options[option_index].next_steps = next_steps;
            Some(options)
        })
    }
}

/// Appends `step` to the end of the sequence
pub fn add_step(steps: &[Step], step: Step) -> Vec<Step> {
    let mut steps = steps.to_vec();
    steps.push(step);
    steps
}

pub fn update_step(steps: &[Step], index: usize, step: Step) -> Vec<Step> {
    let mut steps = steps.to_vec();
    if let Some(slot) = steps.get_mut(index) {
        *slot = step;
    }
    steps
}

pub fn delete_step(steps: &[Step], index: usize) -> Vec<Step> {
    steps
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, s)| s.clone())
        .collect()
}

/// Moves the step at `from` to `to`, shifting the steps in between
pub fn reorder_steps(steps: &[Step], from: usize, to: usize) -> Vec<Step> {
    move_item(steps, from, to).unwrap_or_else(|| steps.to_vec())
}

/// Remove-then-insert move. `None` when either index is out of range.
pub fn move_item<T: Clone>(items: &[T], from: usize, to: usize) -> Option<Vec<T>> {
    if from >= items.len() || to >= items.len() {
        return None;
    }
    let mut items = items.to_vec();
    let item = items.remove(from);
    items.insert(to, item);
    Some(items)
}

/// Relabels options with their 1-based position
pub fn renumber_options(options: Vec<StepOption>) -> Vec<StepOption> {
    options
        .into_iter()
        .enumerate()
        .map(|(i, option)| StepOption {
            value: (i + 1).to_string(),
            ..option
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(value: &str, message: &str, next_steps: Vec<Step>) -> StepOption {
        StepOption {
            value: value.to_string(),
            message: message.to_string(),
            next_steps,
        }
    }

    fn menu(options: Vec<StepOption>) -> Step {
        Step::new("Menú", StepKind::SeleccionLista { options })
    }

    fn values(step: &Step) -> Vec<String> {
        step.options().iter().map(|o| o.value.clone()).collect()
    }

    #[test]
    fn test_with_type_between_selections_keeps_options() {
        let step = menu(vec![option("1", "A", vec![])]);
        let buttons = step.with_type(StepType::SeleccionBotones);
        assert_eq!(buttons.step_type(), StepType::SeleccionBotones);
        assert_eq!(buttons.options(), step.options());
    }

    #[test]
    fn test_with_type_to_message_drops_options() {
        let step = menu(vec![option("1", "A", vec![])]);
        let plain = step.with_type(StepType::Mensaje);
        assert_eq!(plain.kind, StepKind::Mensaje);
        assert!(plain.options().is_empty());
        // the input is untouched
        assert_eq!(step.options().len(), 1);
    }

    #[test]
    fn test_with_type_into_selection_starts_empty() {
        let step = Step::message("Hola").with_type(StepType::SeleccionLista);
        assert_eq!(step.kind, StepKind::SeleccionLista { options: vec![] });
    }

    #[test]
    fn test_field_updates() {
        let step = Step::blank()
            .with_message("¿Tu edad?")
            .with_input_kind(InputKind::Numero)
            .with_final(true);
        assert_eq!(step.message, "¿Tu edad?");
        assert_eq!(step.input_kind, Some(InputKind::Numero));
        assert!(step.is_final());
        assert_eq!(step.with_final(false).is_final, None);
    }

    #[test]
    fn test_add_option_numbers_by_position() {
        let step = menu(vec![]).add_option().add_option().add_option();
        assert_eq!(values(&step), vec!["1", "2", "3"]);
        assert!(step.options().iter().all(|o| o.message.is_empty()));
    }

    #[test]
    fn test_add_option_ignored_on_message() {
        let step = Step::message("Hola");
        assert_eq!(step.add_option(), step);
    }

    #[test]
    fn test_update_option_fields() {
        let step = menu(vec![option("1", "", vec![])])
            .update_option(0, OptionField::Mensaje("Ver saldo".into()))
            .update_option(0, OptionField::Valor("saldo".into()));
        assert_eq!(step.options()[0].message, "Ver saldo");
        assert_eq!(step.options()[0].value, "saldo");

        let replaced =
            step.update_option(0, OptionField::ProximoPaso(vec![Step::message("Tu saldo es...")]));
        assert_eq!(replaced.options()[0].next_steps.len(), 1);
    }

    #[test]
    fn test_update_option_out_of_bounds_is_noop() {
        let step = menu(vec![option("1", "A", vec![])]);
        assert_eq!(step.update_option(3, OptionField::Mensaje("x".into())), step);
    }

    #[test]
    fn test_delete_option_renumbers() {
        let step = menu(vec![
            option("1", "A", vec![]),
            option("2", "B", vec![]),
            option("3", "C", vec![]),
        ]);
        let result = step.delete_option(1);
        assert_eq!(values(&result), vec!["1", "2"]);
        assert_eq!(result.options()[1].message, "C");
        assert_eq!(step.delete_option(5), step);
    }

    #[test]
    fn test_add_next_step() {
        let step = menu(vec![option("1", "A", vec![])]).add_next_step(0);
        assert_eq!(step.options()[0].next_steps, vec![Step::blank()]);
    }

    #[test]
    fn test_add_next_step_out_of_range_is_noop() {
        let step = menu(vec![option("1", "A", vec![])]);
        assert_eq!(step.add_next_step(1), step);
        assert_eq!(Step::message("x").add_next_step(0), Step::message("x"));
    }

    #[test]
    fn test_update_next_step_leaves_siblings() {
        let step = menu(vec![option(
            "1",
            "A",
            vec![Step::message("uno"), Step::message("dos"), Step::message("tres")],
        )]);
        let result = step.update_next_step(0, 1, Step::message("DOS"));
        let nested = &result.options()[0].next_steps;
        assert_eq!(nested[0], Step::message("uno"));
        assert_eq!(nested[1], Step::message("DOS"));
        assert_eq!(nested[2], Step::message("tres"));
        assert_eq!(step.update_next_step(0, 3, Step::message("x")), step);
    }

    #[test]
    fn test_delete_next_step_preserves_order() {
        let step = menu(vec![option(
            "1",
            "A",
            vec![Step::message("uno"), Step::message("dos"), Step::message("tres")],
        )]);
        let result = step.delete_next_step(0, 0);
        assert_eq!(
            result.options()[0].next_steps,
            vec![Step::message("dos"), Step::message("tres")]
        );
        assert_eq!(step.delete_next_step(0, 9), step);
    }

    #[test]
    fn test_reorder_options_moves_and_renumbers() {
        let step = menu(vec![
            option("1", "A", vec![]),
            option("2", "B", vec![]),
            option("3", "C", vec![]),
        ]);
        let result = step.reorder_options(0, 2);
        let messages: Vec<_> = result.options().iter().map(|o| o.message.as_str()).collect();
        assert_eq!(messages, vec!["B", "C", "A"]);
        assert_eq!(values(&result), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_reorder_next_steps() {
        let step = menu(vec![option(
            "1",
            "A",
            vec![Step::message("uno"), Step::message("dos")],
        )]);
        let result = step.reorder_next_steps(0, 1, 0);
        assert_eq!(
            result.options()[0].next_steps,
            vec![Step::message("dos"), Step::message("uno")]
        );
        assert_eq!(step.reorder_next_steps(0, 0, 2), step);
    }

    #[test]
    fn test_root_operations() {
        let steps = vec![Step::message("a"), Step::message("b"), Step::message("c")];

        assert_eq!(
            reorder_steps(&steps, 2, 0),
            vec![Step::message("c"), Step::message("a"), Step::message("b")]
        );
        assert_eq!(reorder_steps(&steps, 0, 3), steps);
        assert_eq!(delete_step(&steps, 1), vec![Step::message("a"), Step::message("c")]);
        assert_eq!(delete_step(&steps, 7), steps);
        assert_eq!(update_step(&steps, 0, Step::message("z"))[0], Step::message("z"));
        assert_eq!(update_step(&steps, 9, Step::message("z")), steps);
        assert_eq!(add_step(&steps, Step::message("d")).len(), 4);
    }

    #[test]
    fn test_move_item_same_index_is_identity() {
        assert_eq!(move_item(&[1, 2, 3], 1, 1), Some(vec![1, 2, 3]));
        assert_eq!(move_item::<i32>(&[], 0, 0), None);
    }
}
