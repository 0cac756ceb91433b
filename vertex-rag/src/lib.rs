//! Vertex AI RAG Engine client.
//!
//! Creates and manages RAG corpora, imports and uploads files into them,
//! retrieves contexts and generates grounded answers. Every long-running
//! operation can be awaited through [`operations::Operations`] or the
//! `*_and_wait` helpers, all backed by [`poller::poll_until_done`].

mod auth;
pub mod client;
pub mod error;
pub mod models;
pub mod operations;
pub mod poller;
pub mod rag_corpora;
pub mod rag_files;
mod request;
pub mod retrieval;

#[cfg(test)]
mod test_support;

pub use vertex_rag_types as types;

pub use client::{Client, ClientBuilder, Credentials, HttpOptions, VertexConfig};
pub use error::{Error, Result};
pub use poller::PollOptions;
