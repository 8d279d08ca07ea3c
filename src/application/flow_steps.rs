//! Loading and saving a flow's step tree

use crate::domain::FlowsPort;
use crate::error::StoreError;
use flujos_core::EditSession;
use tracing::{info, warn};

/// Fetches the tree for `flow_id` and opens an editing session on it
pub async fn load_session(port: &dyn FlowsPort, flow_id: i64) -> Result<EditSession, StoreError> {
    let steps = port.get_steps(flow_id).await.map_err(|e| {
        warn!(error = %e, flow_id, "Failed to fetch flow steps");
        StoreError::LoadSteps
    })?;
    Ok(EditSession::new(flow_id, steps))
}

/// Replaces the stored tree with the session's working tree.
///
/// On success the session's baseline moves to what was saved; on failure
/// the session keeps its local edits.
pub async fn save_session(port: &dyn FlowsPort, session: &mut EditSession) -> Result<(), StoreError> {
    port.save_steps(session.flow_id(), session.steps())
        .await
        .map_err(|e| {
            warn!(error = %e, flow_id = session.flow_id(), "Failed to save flow steps");
            StoreError::SaveSteps
        })?;
    session.mark_saved();
    info!(flow_id = session.flow_id(), steps = session.steps().len(), "Flow steps saved");
    Ok(())
}
