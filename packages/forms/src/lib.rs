//! # Form Submissions
//!
//! The content tree only describes fields. Submitted values are a separate record keyed
//! by each form component's `name` prop (never its node id):
//!
//! 1. [`form_fields`] lists the inputs a document declares
//! 2. [`capture`] turns posted `name=value` pairs into a [`Submission`], under the
//!    form's [`FormSettings`]
//!
//! [`slugify`] and [`unique_slug`] derive public form URLs from titles.

mod schema;
mod settings;
mod slug;
mod submission;

pub use schema::{form_fields, FormField};
pub use settings::FormSettings;
pub use slug::{slugify, unique_slug};
pub use submission::{capture, Submission, SubmissionError};
