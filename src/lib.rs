//! Content renderer for a self-hosted blog.
//!
//! [`application::render::render`] turns the author markup dialect (headings,
//! bold, inline code, fenced code, links, images, simple lists, blockquotes,
//! paragraphs) into an HTML fragment. The remaining modules carry the
//! configuration, telemetry and error plumbing used by the `inkpress` binary.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
