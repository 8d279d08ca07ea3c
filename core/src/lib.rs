//! # flujos-core
//!
//! Data model and pure edit operations for conversation flows.
//!
//! A flow owns one ordered tree of [`Step`]s. Selection steps carry
//! [`StepOption`]s, and every option carries its own ordered continuation of
//! steps, so the tree is co-recursive: step → option → step → ...
//!
//! Nothing in this crate performs I/O. Both the native client and the
//! browser UI build on it.
//!
//! ## Modules
//!
//! - [`model`]: wire types (`Step`, `StepOption`, `Flow`, ...)
//! - [`edit`]: add/update/delete/reorder operations, one level at a time
//! - [`path`]: addressing and editing at arbitrary depth
//! - [`tree`]: read-only tree view model
//! - [`session`]: editing session with draft and unsaved-changes tracking
//! - [`auth`]: login redirect target
//! - [`error`]: path parse errors and the fixed user-facing messages

pub mod auth;
pub mod edit;
pub mod error;
pub mod model;
pub mod path;
pub mod session;
pub mod tree;

pub use edit::{add_step, delete_step, reorder_steps, update_step, OptionField};
pub use auth::{login_url, DEFAULT_LOGIN_PATH};
pub use error::{PathError, StoreError};
pub use model::{Flow, FlowDraft, FlowList, InputKind, Step, StepKind, StepOption, StepType};
pub use path::StepPath;
pub use session::EditSession;
pub use tree::{build_tree, node_at, render_text, NodeIcon, TreeNode};
