//! Response payloads for the REST surface.
//!
//! Every logical outcome is sent with status 200; success and failure
//! are told apart only by payload shape:
//! - [`Outcome::Done`] - the created issue, or a [`ResultPayload`]
//! - [`Outcome::Failed`] - an [`ErrorPayload`] with an `error` string

mod output;

pub use output::{DELETED, ErrorPayload, Outcome, ResultPayload, UPDATED, VersionOutput};
