//! # Formbuilder Document
//!
//! The persisted content model for pages and forms.
//!
//! A [`Document`] is a root props bag plus an ordered list of [`ContentNode`]s.
//! Each node names a component type, carries a dynamic props bag and a stable id.
//! Order in `content` is document order and is significant.
//!
//! ## Wire format
//!
//! ```json
//! {
//!   "root": { "props": { "title": "Contact" } },
//!   "content": [
//!     { "type": "Heading", "id": "Heading-1a2b-1", "props": { "text": "Hi" } }
//!   ]
//! }
//! ```
//!
//! Legacy payloads that keep the id in `props.id`, or have no id at all, are accepted;
//! see [`Document::backfill_ids`].

pub mod document;
pub mod error;
pub mod id_generator;

pub use document::{ContentNode, Document, Props, Root, DEFAULT_PAGE_TITLE};
pub use error::{DocumentError, DocumentResult};
pub use id_generator::{get_document_seed, IdGenerator};
