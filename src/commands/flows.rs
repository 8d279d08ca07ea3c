use super::confirm;
use crate::application::FlowStore;
use crate::cli::FlowsCommand;
use crate::domain::{Flow, FlowDraft, FlowsPort};
use anyhow::{bail, Result};
use colored::Colorize;
use std::sync::Arc;

pub async fn handle(command: FlowsCommand, port: Arc<dyn FlowsPort>) -> Result<()> {
    let store = FlowStore::open(port).await;

    match command {
        FlowsCommand::List => {
            let state = store.snapshot().await;
            if let Some(error) = state.error {
                bail!(error);
            }
            print_flows(&state.flows);
        }
        FlowsCommand::Create { name, inactive } => {
            store.create(&FlowDraft::new(name.as_str(), !inactive)).await?;
            println!("{} Flujo {} creado", "✓".green(), name.bold());
            print_flows(&store.flows().await);
        }
        FlowsCommand::Update { id, name, active } => {
            if name.is_none() && active.is_none() {
                bail!("Nothing to change: pass --name and/or --active");
            }
            let Some(current) = store.find(id).await else {
                match store.snapshot().await.error {
                    Some(error) => bail!(error),
                    None => bail!("No flow with id {}", id),
                }
            };
            let draft = FlowDraft::new(
                name.unwrap_or(current.name),
                active.unwrap_or(current.active),
            );
            store.update(id, &draft).await?;
            println!("{} Flujo {} actualizado", "✓".green(), id);
            print_flows(&store.flows().await);
        }
        FlowsCommand::Delete { id, yes } => {
            let label = match store.find(id).await {
                Some(flow) => format!("{} ({})", flow.name, flow.id),
                None => id.to_string(),
            };
            if !confirm(&format!("¿Eliminar el flujo {}?", label), yes)? {
                println!("Cancelado");
                return Ok(());
            }
            store.delete(id).await?;
            println!("{} Flujo {} eliminado", "✓".green(), label);
        }
    }

    Ok(())
}

fn print_flows(flows: &[Flow]) {
    if flows.is_empty() {
        println!("{}", "No hay flujos".dimmed());
        return;
    }

    println!("{:>6}  {:<8}  {}", "ID".bold(), "ESTADO".bold(), "NOMBRE".bold());
    for flow in flows {
        let status = if flow.active {
            format!("{:<8}", "activo").green()
        } else {
            format!("{:<8}", "inactivo").yellow()
        };
        println!("{:>6}  {}  {}", flow.id, status, flow.name);
    }
}
