use clap::{Args, Parser, Subcommand, ValueEnum};
use flujos_core::{InputKind, StepPath, StepType};
use std::path::PathBuf;

/// Conversation flow authoring tool
#[derive(Parser, Debug, Clone)]
#[command(name = "flujos", version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, env = "FLUJOS_CONFIG", default_value = "flujos.toml", global = true)]
    pub config: PathBuf,

    /// Base URL of the flow server
    #[arg(long, env = "FLUJOS_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Manage flows
    #[command(subcommand)]
    Flows(FlowsCommand),
    /// Inspect and edit the step tree of a flow
    #[command(subcommand)]
    Steps(StepsCommand),
    /// Serve the browser UI
    Serve {
        /// Address to bind
        #[arg(long)]
        host: Option<String>,
        /// Port to bind
        #[arg(long)]
        port: Option<u16>,
        /// Directory with the built UI
        #[arg(long)]
        dist: Option<PathBuf>,
    },
    /// Print the effective configuration
    Config,
}

#[derive(Subcommand, Debug, Clone)]
pub enum FlowsCommand {
    /// List all flows
    List,
    /// Create a flow
    Create {
        #[arg(long)]
        name: String,
        /// Create the flow disabled
        #[arg(long)]
        inactive: bool,
    },
    /// Rename and/or toggle a flow. Omitted fields keep their current value.
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, action = clap::ArgAction::Set)]
        active: Option<bool>,
    },
    /// Delete a flow
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct FlowArg {
    /// Flow id
    pub flow: i64,
}

#[derive(Args, Debug, Clone)]
pub struct StepArg {
    /// Flow id
    pub flow: i64,
    /// Step address: root index followed by option.step pairs, e.g. 2.1.0
    pub path: StepPath,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ExportFormat {
    #[default]
    Json,
    Yaml,
}

#[derive(Subcommand, Debug, Clone)]
pub enum StepsCommand {
    /// Print the step tree
    Show {
        #[command(flatten)]
        flow: FlowArg,
    },
    /// Write the step tree to stdout or a file
    Export {
        #[command(flatten)]
        flow: FlowArg,
        #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Replace the stored step tree with the contents of a JSON or YAML file
    Import {
        #[command(flatten)]
        flow: FlowArg,
        file: PathBuf,
    },
    /// Append a step to the root of the tree
    Add {
        #[command(flatten)]
        flow: FlowArg,
        #[arg(long)]
        message: String,
        #[arg(long = "type", value_parser = parse_step_type, default_value = "mensaje")]
        step_type: StepType,
        #[arg(long, value_parser = parse_input_kind, default_value = "texto")]
        input: InputKind,
        /// Mark as the final step of the flow
        #[arg(long = "final")]
        is_final: bool,
    },
    /// Delete the step at a path
    Delete {
        #[command(flatten)]
        step: StepArg,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Move a step among its siblings
    Move {
        #[command(flatten)]
        step: StepArg,
        to: usize,
    },
    /// Change the type of a step
    SetType {
        #[command(flatten)]
        step: StepArg,
        #[arg(value_parser = parse_step_type)]
        step_type: StepType,
    },
    /// Change the message of a step
    SetMessage {
        #[command(flatten)]
        step: StepArg,
        message: String,
    },
    /// Change the expected input kind of a step
    SetInput {
        #[command(flatten)]
        step: StepArg,
        #[arg(value_parser = parse_input_kind)]
        input: InputKind,
    },
    /// Mark or unmark a step as final
    SetFinal {
        #[command(flatten)]
        step: StepArg,
        #[arg(action = clap::ArgAction::Set)]
        value: bool,
    },
    /// Append an option to a selection step
    OptionAdd {
        #[command(flatten)]
        step: StepArg,
    },
    /// Change the label or message of an option
    OptionSet {
        #[command(flatten)]
        step: StepArg,
        option: usize,
        #[arg(long)]
        value: Option<String>,
        #[arg(long)]
        message: Option<String>,
    },
    /// Delete an option (remaining options are renumbered)
    OptionDelete {
        #[command(flatten)]
        step: StepArg,
        option: usize,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Move an option (options are renumbered)
    OptionMove {
        #[command(flatten)]
        step: StepArg,
        from: usize,
        to: usize,
    },
    /// Append a blank step to an option's continuation
    NextAdd {
        #[command(flatten)]
        step: StepArg,
        option: usize,
    },
}

fn parse_step_type(s: &str) -> Result<StepType, String> {
    s.parse()
}

fn parse_input_kind(s: &str) -> Result<InputKind, String> {
    s.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["flujos", "flows", "list"]);
        assert_eq!(cli.config, PathBuf::from("flujos.toml"));
        assert!(cli.api_url.is_none());
        assert_eq!(cli.verbose, 0);
        assert!(matches!(cli.command, Command::Flows(FlowsCommand::List)));
    }

    #[test]
    fn test_cli_with_global_args() {
        let cli = Cli::parse_from([
            "flujos",
            "steps",
            "show",
            "12",
            "--api-url",
            "http://api:9000",
            "-vv",
        ]);
        assert_eq!(cli.api_url, Some("http://api:9000".to_string()));
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Steps(StepsCommand::Show { flow }) => assert_eq!(flow.flow, 12),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_step_path_and_type_arguments() {
        let cli = Cli::parse_from(["flujos", "steps", "set-type", "3", "1.0.2", "seleccion_botones"]);
        match cli.command {
            Command::Steps(StepsCommand::SetType { step, step_type }) => {
                assert_eq!(step.flow, 3);
                assert_eq!(step.path, "1.0.2".parse().unwrap());
                assert_eq!(step_type, StepType::SeleccionBotones);
            }
            other => panic!("unexpected command: {:?}", other),
        }

        assert!(Cli::try_parse_from(["flujos", "steps", "delete", "3", "1.0"]).is_err());
        assert!(Cli::try_parse_from(["flujos", "steps", "set-type", "3", "0", "otro"]).is_err());
    }

    #[test]
    fn test_flow_update_active_flag() {
        let cli = Cli::parse_from(["flujos", "flows", "update", "5", "--name", "Ventas", "--active", "false"]);
        match cli.command {
            Command::Flows(FlowsCommand::Update { id, name, active }) => {
                assert_eq!(id, 5);
                assert_eq!(name.as_deref(), Some("Ventas"));
                assert_eq!(active, Some(false));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_flow_rename_leaves_active_unset() {
        let cli = Cli::parse_from(["flujos", "flows", "update", "5", "--name", "Renombrado"]);
        match cli.command {
            Command::Flows(FlowsCommand::Update { name, active, .. }) => {
                assert_eq!(name.as_deref(), Some("Renombrado"));
                assert!(active.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
