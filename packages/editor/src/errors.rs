//! Error types for the editor

use formbuilder_document::DocumentError;
use thiserror::Error;

use crate::mutations::MutationError;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Mutation error: {0}")]
    Mutation(#[from] MutationError),

    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    #[error("Invalid edit script: {0}")]
    Script(#[from] serde_json::Error),
}
