use async_trait::async_trait;

pub use flujos_core::model::{Flow, FlowDraft, FlowList, InputKind, Step, StepKind, StepOption, StepType};

use crate::error::ApiError;

/// Remote flow server.
///
/// Flows and their step trees are separate resources keyed by the same id.
/// A tree is always read and written whole.
#[async_trait]
pub trait FlowsPort: Send + Sync {
    async fn list_flows(&self) -> Result<Vec<Flow>, ApiError>;

    /// Returns the created flow when the server echoes it back
    async fn create_flow(&self, draft: &FlowDraft) -> Result<Option<Flow>, ApiError>;

    async fn update_flow(&self, id: i64, draft: &FlowDraft) -> Result<Option<Flow>, ApiError>;

    async fn delete_flow(&self, id: i64) -> Result<(), ApiError>;

    async fn get_steps(&self, flow_id: i64) -> Result<Vec<Step>, ApiError>;

    /// Replaces the stored tree for `flow_id` in one call
    async fn save_steps(&self, flow_id: i64, steps: &[Step]) -> Result<(), ApiError>;
}

/// Reaction to a 401 from the flow server
pub trait UnauthorizedHandler: Send + Sync {
    fn on_unauthorized(&self, login_url: &str);
}
