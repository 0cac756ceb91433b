//! Shared types for the Vertex AI RAG client.

pub mod content;
pub mod http;
pub mod models;
pub mod operations;
pub mod rag_corpora;
pub mod rag_files;
pub mod retrieval;
pub mod tool;
