//! The submission side of email triage: validate user input, post it as a
//! multipart form to the analysis API, and project the response onto a
//! result view.

pub mod handler;
pub mod submission;
pub mod view;

pub use handler::*;
pub use submission::*;
pub use view::*;
