//! Error types for step addressing and user-facing failures

use thiserror::Error;

/// Errors produced when parsing a [`StepPath`](crate::path::StepPath)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// Empty input
    #[error("Step path is empty")]
    Empty,

    /// A component is not a non-negative integer
    #[error("Invalid path component '{0}'")]
    InvalidComponent(String),

    /// Paths alternate step/option indices and must end on a step
    #[error("Step path '{0}' must end on a step index (expected an odd number of components)")]
    DanglingOption(String),
}

/// User-facing failures. The message is fixed per operation kind and shared
/// by the CLI and the browser UI; the underlying transport error is logged
/// where it happens and not carried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Ocurrió un error al obtener los flujos")]
    Load,

    #[error("Ocurrió un error al crear el flujo")]
    Create,

    #[error("Ocurrió un error al actualizar el flujo")]
    Update,

    #[error("Ocurrió un error al eliminar el flujo")]
    Delete,

    #[error("Ocurrió un error al obtener los pasos del flujo")]
    LoadSteps,

    #[error("Ocurrió un error al guardar los pasos")]
    SaveSteps,
}
