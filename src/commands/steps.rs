use super::confirm;
use crate::application::{load_session, save_session};
use crate::cli::{ExportFormat, StepArg, StepsCommand};
use crate::domain::FlowsPort;
use anyhow::{anyhow, bail, Context, Result};
use colored::Colorize;
use flujos_core::path;
use flujos_core::{build_tree, render_text, EditSession, OptionField, Step};
use std::path::Path;
use tracing::debug;

pub async fn handle(command: StepsCommand, port: &dyn FlowsPort) -> Result<()> {
    match command {
        StepsCommand::Show { flow } => {
            let session = load_session(port, flow.flow).await?;
            print_tree(session.steps());
            Ok(())
        }
        StepsCommand::Export { flow, format, output } => {
            let session = load_session(port, flow.flow).await?;
            let text = export_steps(session.steps(), format)?;
            match output {
                Some(file) => {
                    std::fs::write(&file, text)
                        .with_context(|| format!("Failed to write {}", file.display()))?;
                    println!("{} Pasos exportados a {}", "✓".green(), file.display());
                }
                None => print!("{}", text),
            }
            Ok(())
        }
        StepsCommand::Import { flow, file } => {
            let contents = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let steps = parse_steps(&contents, &file)?;
            let mut session = load_session(port, flow.flow).await?;
            session.apply(|_| steps);
            commit(port, session).await
        }
        StepsCommand::Add {
            flow,
            message,
            step_type,
            input,
            is_final,
        } => {
            let mut session = load_session(port, flow.flow).await?;
            session.set_draft(
                Step::blank()
                    .with_type(step_type)
                    .with_message(message)
                    .with_input_kind(input)
                    .with_final(is_final),
            );
            session.add_step();
            commit(port, session).await
        }
        StepsCommand::Delete { step, yes } => {
            let mut session = open_at(port, &step).await?;
            if !confirm(&format!("¿Eliminar el paso {}?", step.path), yes)? {
                println!("Cancelado");
                return Ok(());
            }
            session.apply(|steps| path::delete_at(steps, &step.path));
            commit(port, session).await
        }
        StepsCommand::Move { step, to } => {
            let mut session = open_at(port, &step).await?;
            if path::get(session.steps(), &step.path.with_index(to)).is_none() {
                bail!("Cannot move step {} to position {}: out of range", step.path, to);
            }
            session.apply(|steps| path::reorder_at(steps, &step.path, to));
            commit(port, session).await
        }
        StepsCommand::SetType { step, step_type } => {
            edit_at(port, &step, |s| s.with_type(step_type)).await
        }
        StepsCommand::SetMessage { step, message } => {
            edit_at(port, &step, |s| s.with_message(message)).await
        }
        StepsCommand::SetInput { step, input } => {
            edit_at(port, &step, |s| s.with_input_kind(input)).await
        }
        StepsCommand::SetFinal { step, value } => {
            edit_at(port, &step, |s| s.with_final(value)).await
        }
        StepsCommand::OptionAdd { step } => {
            edit_options(port, &step, &[], Step::add_option).await
        }
        StepsCommand::OptionSet {
            step,
            option,
            value,
            message,
        } => {
            if value.is_none() && message.is_none() {
                bail!("Nothing to change: pass --value and/or --message");
            }
            edit_options(port, &step, &[option], |s| {
                let mut updated = s.clone();
                if let Some(value) = value {
                    updated = updated.update_option(option, OptionField::Valor(value));
                }
                if let Some(message) = message {
                    updated = updated.update_option(option, OptionField::Mensaje(message));
                }
                updated
            })
            .await
        }
        StepsCommand::OptionDelete { step, option, yes } => {
            let session = open_options(port, &step, &[option]).await?;
            if !confirm(&format!("¿Eliminar la opción {} del paso {}?", option, step.path), yes)? {
                println!("Cancelado");
                return Ok(());
            }
            commit_at(port, session, &step, |s| s.delete_option(option)).await
        }
        StepsCommand::OptionMove { step, from, to } => {
            edit_options(port, &step, &[from, to], |s| s.reorder_options(from, to)).await
        }
        StepsCommand::NextAdd { step, option } => {
            edit_options(port, &step, &[option], |s| s.add_next_step(option)).await
        }
    }
}

/// Loads the flow and checks that `step.path` resolves
async fn open_at(port: &dyn FlowsPort, step: &StepArg) -> Result<EditSession> {
    let session = load_session(port, step.flow).await?;
    if path::get(session.steps(), &step.path).is_none() {
        bail!("No step at {} in flow {}", step.path, step.flow);
    }
    Ok(session)
}

/// Like [`open_at`], and also checks that the step is a selection step
/// owning every index in `options`
async fn open_options(port: &dyn FlowsPort, step: &StepArg, options: &[usize]) -> Result<EditSession> {
    let session = open_at(port, step).await?;
    let Some(target) = path::get(session.steps(), &step.path) else {
        bail!("No step at {} in flow {}", step.path, step.flow);
    };
    if !target.step_type().is_selection() {
        bail!(
            "Step {} in flow {} is {}, which has no options",
            step.path,
            step.flow,
            target.step_type()
        );
    }
    if let Some(missing) = options.iter().find(|&&i| target.option(i).is_none()) {
        bail!(
            "Step {} in flow {} has no option {} ({} options)",
            step.path,
            step.flow,
            missing,
            target.options().len()
        );
    }
    Ok(session)
}

async fn edit_at<F>(port: &dyn FlowsPort, step: &StepArg, f: F) -> Result<()>
where
    F: FnOnce(&Step) -> Step,
{
    let session = open_at(port, step).await?;
    commit_at(port, session, step, f).await
}

async fn edit_options<F>(port: &dyn FlowsPort, step: &StepArg, options: &[usize], f: F) -> Result<()>
where
    F: FnOnce(&Step) -> Step,
{
    let session = open_options(port, step, options).await?;
    commit_at(port, session, step, f).await
}

async fn commit_at<F>(port: &dyn FlowsPort, mut session: EditSession, step: &StepArg, f: F) -> Result<()>
where
    F: FnOnce(&Step) -> Step,
{
    session.apply(|steps| path::update_at(steps, &step.path, f));
    commit(port, session).await
}

/// Saves the session if the edit changed anything, then prints the tree
async fn commit(port: &dyn FlowsPort, mut session: EditSession) -> Result<()> {
    if !session.is_dirty() {
        println!("{}", "Sin cambios".dimmed());
        return Ok(());
    }
    if !session.can_save() {
        bail!("Refusing to save an empty step tree for flow {}", session.flow_id());
    }

    save_session(port, &mut session).await?;
    println!("{} Pasos guardados", "✓".green());
    print_tree(session.steps());
    Ok(())
}

fn print_tree(steps: &[Step]) {
    if steps.is_empty() {
        println!("{}", "No hay pasos configurados".dimmed());
        return;
    }
    print!("{}", render_text(&build_tree(steps), |_| true));
}

pub fn export_steps(steps: &[Step], format: ExportFormat) -> Result<String> {
    Ok(match format {
        ExportFormat::Json => format!("{}\n", serde_json::to_string_pretty(steps)?),
        ExportFormat::Yaml => serde_yaml::to_string(steps)?,
    })
}

/// Parses a step tree, as YAML for `.yaml`/`.yml` files and JSON otherwise
pub fn parse_steps(contents: &str, file: &Path) -> Result<Vec<Step>> {
    let extension = file
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    debug!(file = %file.display(), ?extension, "parsing step tree");

    match extension.as_deref() {
        Some("yaml") | Some("yml") => serde_yaml::from_str(contents)
            .map_err(|e| anyhow!("Invalid YAML step tree in {}: {}", file.display(), e)),
        _ => serde_json::from_str(contents)
            .map_err(|e| anyhow!("Invalid JSON step tree in {}: {}", file.display(), e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flujos_core::{StepKind, StepOption, StepType};

    fn sample() -> Vec<Step> {
        vec![
            Step::message("Hola"),
            Step::new(
                "¿Qué necesitas?",
                StepKind::SeleccionBotones {
                    options: vec![StepOption {
                        value: "1".to_string(),
                        message: "Soporte".to_string(),
                        next_steps: vec![Step::message("Te contactamos")],
                    }],
                },
            ),
        ]
    }

    #[test]
    fn test_export_then_import_keeps_the_tree() {
        let steps = sample();

        let json = export_steps(&steps, ExportFormat::Json).unwrap();
        assert!(json.contains("\"tipo\": \"seleccion_botones\""));
        assert_eq!(parse_steps(&json, Path::new("pasos.json")).unwrap(), steps);

        let yaml = export_steps(&steps, ExportFormat::Yaml).unwrap();
        assert!(yaml.contains("proximo_paso"));
        assert_eq!(parse_steps(&yaml, Path::new("pasos.YML")).unwrap(), steps);
    }

    #[test]
    fn test_parse_reports_format_by_extension() {
        let err = parse_steps("- [", Path::new("pasos.yaml")).unwrap_err();
        assert!(err.to_string().starts_with("Invalid YAML"));

        let err = parse_steps("{", Path::new("pasos")).unwrap_err();
        assert!(err.to_string().starts_with("Invalid JSON"));

        let steps = parse_steps(r#"[{"mensaje":"Hola","tipo":"entrada_numero"}]"#, Path::new("x.json")).unwrap();
        assert_eq!(steps[0].step_type(), StepType::EntradaNumero);
    }
}
