//! # Flujos - conversation flow authoring
//!
//! Native client for a flow server that stores chatbot conversation flows.
//! A flow is a named on/off record that owns a tree of steps; selection
//! steps branch into options, and each option continues with its own
//! sequence of steps.
//!
//! ## Features
//!
//! - **Flow management**: list, create, rename, toggle and delete flows
//! - **Step editing**: edit the tree at any depth by path (`2.1.0`)
//! - **Import/Export**: step trees as JSON or YAML
//! - **Browser UI**: serves the Leptos app in `ui/` with its runtime config
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use flujos::adapters::api_client::ApiClient;
//! use flujos::application::FlowStore;
//! use flujos::config::Settings;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::new()?;
//!     let client = ApiClient::new(&settings.api)?;
//!
//!     let store = FlowStore::open(Arc::new(client)).await;
//!     for flow in store.flows().await {
//!         println!("{} {}", flow.id, flow.name);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **Domain**: wire types (from `flujos-core`) and the `FlowsPort` seam
//! - **Application**: flow store and step-tree sessions
//! - **Adapters**: HTTP client, UI static server, health checks
//! - **Config**: file, environment and CLI layering

pub mod adapters;
pub mod application;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod error;

pub use adapters::api_client::ApiClient;
pub use adapters::ui_handler::ui_router;
pub use application::FlowStore;
pub use config::Settings;
pub use error::{ApiError, StoreError};
