use flujos_core::path::{self, StepPath};
use flujos_core::{EditSession, OptionField, Step, StepKind, StepOption, StepType};
use serde_json::json;

fn values(step: &Step) -> Vec<String> {
    step.options().iter().map(|o| o.value.clone()).collect()
}

fn menu_with(count: usize) -> Step {
    (0..count).fold(
        Step::message("Menú").with_type(StepType::SeleccionLista),
        |step, i| {
            let step = step.add_option();
            step.update_option(i, OptionField::Mensaje(format!("opción {}", i)))
        },
    )
}

#[test]
fn test_delete_option_always_leaves_contiguous_values() {
    for count in 1..6 {
        let step = menu_with(count);
        for index in 0..count {
            let result = step.delete_option(index);
            let expected: Vec<String> = (1..count).map(|n| n.to_string()).collect();
            assert_eq!(values(&result), expected, "count={} index={}", count, index);
        }
    }
}

#[test]
fn test_reorder_options_round_trip() {
    let step = menu_with(4);
    for i in 0..4 {
        for j in 0..4 {
            if i == j {
                continue;
            }
            let back = step.reorder_options(i, j).reorder_options(j, i);
            assert_eq!(back, step, "i={} j={}", i, j);
        }
    }
}

#[test]
fn test_add_next_step_out_of_bounds_is_deep_equal() {
    let step = menu_with(2);
    assert_eq!(step.add_next_step(2), step);
    assert_eq!(step.add_next_step(usize::MAX), step);
}

#[test]
fn test_delete_first_of_two_options() {
    let step: Step = serde_json::from_value(json!({
        "mensaje": "Elige",
        "tipo": "seleccion_botones",
        "opciones": [
            {"valor": "1", "mensaje": "Primera", "proximo_paso": []},
            {"valor": "2", "mensaje": "Segunda", "proximo_paso": [{"mensaje": "Fin", "tipo": "mensaje"}]}
        ]
    }))
    .unwrap();

    let result = step.delete_option(0);
    assert_eq!(result.options().len(), 1);
    assert_eq!(result.options()[0].value, "1");
    assert_eq!(result.options()[0].message, "Segunda");
    assert_eq!(result.options()[0].next_steps, vec![Step::message("Fin")]);
}

#[test]
fn test_add_draft_to_empty_root() {
    let mut session = EditSession::new(10, Vec::new());
    session.set_draft(Step::new("Hola", StepKind::Mensaje));
    session.add_step();

    assert_eq!(
        serde_json::to_value(session.steps()).unwrap(),
        json!([{"mensaje": "Hola", "tipo": "mensaje"}])
    );
    assert_eq!(session.draft(), &Step::blank());
}

#[test]
fn test_delete_only_nested_step_of_second_option() {
    let step = Step::new(
        "Menú",
        StepKind::SeleccionLista {
            options: vec![
                StepOption {
                    value: "1".into(),
                    message: "Uno".into(),
                    next_steps: vec![Step::message("queda")],
                },
                StepOption {
                    value: "2".into(),
                    message: "Dos".into(),
                    next_steps: vec![Step::message("se va")],
                },
            ],
        },
    );

    let result = step.delete_next_step(1, 0);
    assert!(result.options()[1].next_steps.is_empty());
    assert_eq!(result.options()[0], step.options()[0]);
}

#[test]
fn test_same_vocabulary_applies_at_every_depth() {
    // Build three levels of menus through the path API only
    let mut steps = vec![Step::message("Menú").with_type(StepType::SeleccionLista)];
    let mut at = StepPath::root(0);
    for _ in 0..3 {
        steps = path::update_at(&steps, &at, |s| {
            s.with_type(StepType::SeleccionLista).add_option().add_next_step(0)
        });
        at = at.child(0, 0);
    }

    let leaf = path::get(&steps, &at).unwrap();
    assert_eq!(leaf, &Step::blank());
    assert_eq!(at.to_string(), "0.0.0.0.0.0.0");

    let renamed = path::update_at(&steps, &at, |s| s.with_message("hoja"));
    assert_eq!(path::get(&renamed, &at).unwrap().message, "hoja");
    assert_eq!(path::get(&steps, &at).unwrap().message, "");
}

#[test]
fn test_wire_round_trip_preserves_order() {
    let payload = json!([
        {"mensaje": "Hola", "tipo": "mensaje"},
        {"mensaje": "¿Edad?", "tipo": "entrada_numero", "tipo_entrada": "numero"},
        {
            "mensaje": "Menú",
            "tipo": "seleccion_lista",
            "opciones": [
                {"valor": "1", "mensaje": "B", "proximo_paso": [{"mensaje": "Foto", "tipo": "entrada_imagen"}]},
                {"valor": "2", "mensaje": "A", "proximo_paso": []}
            ],
            "final_flujo": true
        }
    ]);

    let steps: Vec<Step> = serde_json::from_value(payload.clone()).unwrap();
    assert_eq!(serde_json::to_value(&steps).unwrap(), payload);
}
