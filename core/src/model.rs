//! Wire types shared with the flow server and the chat runtime.
//!
//! Field names on the wire are Spanish (`mensaje`, `tipo`, `opciones`, ...)
//! and are kept exactly; the Rust side uses English names.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named, toggleable container for one step tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flow {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "activo", default)]
    pub active: bool,
}

/// Request body for creating or updating a flow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowDraft {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "activo")]
    pub active: bool,
}

impl FlowDraft {
    pub fn new(name: impl Into<String>, active: bool) -> Self {
        Self {
            name: name.into(),
            active,
        }
    }
}

impl Default for FlowDraft {
    fn default() -> Self {
        Self::new("", true)
    }
}

impl From<&Flow> for FlowDraft {
    fn from(flow: &Flow) -> Self {
        Self::new(flow.name.clone(), flow.active)
    }
}

/// Response body of the flow list endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowList {
    #[serde(rename = "flujos", default)]
    pub flows: Vec<Flow>,
}

/// Expected input format of a prompt step.
///
/// The server stores `tipo_entrada` as free text, so values outside the
/// known kinds decode into [`InputKind::Other`] and are written back as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InputKind {
    #[default]
    Texto,
    Numero,
    Imagen,
    Telefono,
    Other(String),
}

impl InputKind {
    pub const ALL: [InputKind; 4] = [
        InputKind::Texto,
        InputKind::Numero,
        InputKind::Imagen,
        InputKind::Telefono,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            InputKind::Texto => "texto",
            InputKind::Numero => "numero",
            InputKind::Imagen => "imagen",
            InputKind::Telefono => "telefono",
            InputKind::Other(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, InputKind::Other(_))
    }
}

impl From<String> for InputKind {
    fn from(raw: String) -> Self {
        InputKind::ALL
            .into_iter()
            .find(|k| k.as_str() == raw)
            .unwrap_or(InputKind::Other(raw))
    }
}

impl From<InputKind> for String {
    fn from(kind: InputKind) -> Self {
        match kind {
            InputKind::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strict parse for user input: only the known kinds are accepted
impl FromStr for InputKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InputKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| format!("Unknown input kind '{}'", s))
    }
}

/// The `tipo` of a step, without payload.
///
/// Used wherever a kind has to be chosen (selectors, CLI arguments) before
/// the step itself is rebuilt with [`Step::with_type`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepType {
    Mensaje,
    SeleccionLista,
    SeleccionBotones,
    EntradaNumero,
    EntradaTexto,
    EntradaImagen,
}

impl StepType {
    pub const ALL: [StepType; 6] = [
        StepType::Mensaje,
        StepType::SeleccionLista,
        StepType::SeleccionBotones,
        StepType::EntradaNumero,
        StepType::EntradaTexto,
        StepType::EntradaImagen,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StepType::Mensaje => "mensaje",
            StepType::SeleccionLista => "seleccion_lista",
            StepType::SeleccionBotones => "seleccion_botones",
            StepType::EntradaNumero => "entrada_numero",
            StepType::EntradaTexto => "entrada_texto",
            StepType::EntradaImagen => "entrada_imagen",
        }
    }

    /// Human label: first underscore becomes a space, then uppercased
    pub fn label(&self) -> String {
        self.as_str().replacen('_', " ", 1).to_uppercase()
    }

    pub fn is_selection(&self) -> bool {
        matches!(self, StepType::SeleccionLista | StepType::SeleccionBotones)
    }
}

impl fmt::Display for StepType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StepType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StepType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("Unknown step type '{}'", s))
    }
}

/// Step kind with its kind-specific payload.
///
/// Only the two selection kinds own options; a plain message carrying
/// stale options cannot be represented. When decoding, `opciones` sent on a
/// non-selection step are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tipo", rename_all = "snake_case")]
pub enum StepKind {
    Mensaje,
    SeleccionLista {
        #[serde(rename = "opciones", default, deserialize_with = "null_as_empty")]
        options: Vec<StepOption>,
    },
    SeleccionBotones {
        #[serde(rename = "opciones", default, deserialize_with = "null_as_empty")]
        options: Vec<StepOption>,
    },
    EntradaNumero,
    EntradaTexto,
    EntradaImagen,
}

impl StepKind {
    /// Builds the kind for `step_type`, keeping `options` only when the
    /// target kind can own them.
    pub fn from_type(step_type: StepType, options: Vec<StepOption>) -> Self {
        match step_type {
            StepType::Mensaje => StepKind::Mensaje,
            StepType::SeleccionLista => StepKind::SeleccionLista { options },
            StepType::SeleccionBotones => StepKind::SeleccionBotones { options },
            StepType::EntradaNumero => StepKind::EntradaNumero,
            StepType::EntradaTexto => StepKind::EntradaTexto,
            StepType::EntradaImagen => StepKind::EntradaImagen,
        }
    }

    pub fn step_type(&self) -> StepType {
        match self {
            StepKind::Mensaje => StepType::Mensaje,
            StepKind::SeleccionLista { .. } => StepType::SeleccionLista,
            StepKind::SeleccionBotones { .. } => StepType::SeleccionBotones,
            StepKind::EntradaNumero => StepType::EntradaNumero,
            StepKind::EntradaTexto => StepType::EntradaTexto,
            StepKind::EntradaImagen => StepType::EntradaImagen,
        }
    }

    /// Options of a selection kind, `None` for every other kind
    pub fn options(&self) -> Option<&[StepOption]> {
        match self {
            StepKind::SeleccionLista { options } | StepKind::SeleccionBotones { options } => {
                Some(options)
            }
            _ => None,
        }
    }
}

/// One interaction node of a flow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    #[serde(rename = "mensaje")]
    pub message: String,
    #[serde(flatten)]
    pub kind: StepKind,
    #[serde(rename = "tipo_entrada", default, skip_serializing_if = "Option::is_none")]
    pub input_kind: Option<InputKind>,
    #[serde(
        rename = "final_flujo",
        alias = "es_final",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub is_final: Option<bool>,
}

impl Step {
    pub fn new(message: impl Into<String>, kind: StepKind) -> Self {
        Self {
            message: message.into(),
            kind,
            input_kind: None,
            is_final: None,
        }
    }

    /// Plain message step without input kind
    pub fn message(text: impl Into<String>) -> Self {
        Self::new(text, StepKind::Mensaje)
    }

    /// Empty message step with the default input kind
    pub fn blank() -> Self {
        Self {
            input_kind: Some(InputKind::default()),
            ..Self::message("")
        }
    }

    pub fn step_type(&self) -> StepType {
        self.kind.step_type()
    }

    /// Options of this step; empty for non-selection kinds
    pub fn options(&self) -> &[StepOption] {
        self.kind.options().unwrap_or(&[])
    }

    pub fn option(&self, index: usize) -> Option<&StepOption> {
        self.options().get(index)
    }

    pub fn next_step(&self, option_index: usize, step_index: usize) -> Option<&Step> {
        self.option(option_index)
            .and_then(|o| o.next_steps.get(step_index))
    }

    pub fn is_final(&self) -> bool {
        self.is_final.unwrap_or(false)
    }
}

impl Default for Step {
    fn default() -> Self {
        Self::blank()
    }
}

/// A labeled branch out of a selection step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepOption {
    /// Positional label, renumbered to 1..N after structural changes
    #[serde(rename = "valor", deserialize_with = "valor_as_string")]
    pub value: String,
    #[serde(rename = "mensaje", default)]
    pub message: String,
    #[serde(
        rename = "proximo_paso",
        default,
        deserialize_with = "null_as_empty"
    )]
    pub next_steps: Vec<Step>,
}

impl StepOption {
    /// Blank option labeled with its 1-based position
    pub fn at_position(position: usize) -> Self {
        Self {
            value: position.to_string(),
            message: String::new(),
            next_steps: Vec::new(),
        }
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

// `valor` is numeric-as-string by convention but older trees store numbers
fn valor_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Float(n) => n.to_string(),
    })
}
