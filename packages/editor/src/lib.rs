//! # Formbuilder Editor
//!
//! Editing engine for content trees.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ document: JSON ⇄ Document                   │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: EditSession                         │
//! │  - Insert/update/move/delete nodes          │
//! │  - Registry checks + default props          │
//! │  - Undo/redo of concrete mutations          │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ renderer: Document → RenderedPage           │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Document is the source of truth**: rendered output is always derived
//! 2. **Advisory validation**: field specs never block an edit
//! 3. **Stable identity**: node ids survive every edit that doesn't delete the node
//!
//! ## Usage
//!
//! ```rust,ignore
//! use formbuilder_editor::EditSession;
//!
//! let mut session = EditSession::new(Document::new_page(), registry);
//!
//! let heading = session.insert_node("Heading", 0, Props::new())?;
//! session.set_prop(&heading, "text", "Contact us")?;
//! session.move_node(&heading, 3)?;
//!
//! store.save(key, &session.serialize()).await?;
//! ```

mod errors;
mod mutations;
mod session;
mod undo_stack;

pub use errors::EditorError;
pub use mutations::{Mutation, MutationError};
pub use session::EditSession;
pub use undo_stack::UndoStack;
