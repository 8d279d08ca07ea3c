pub mod flow_steps;
pub mod flow_store;

pub use flow_steps::{load_session, save_session};
pub use flow_store::{FlowStore, StoreState};
