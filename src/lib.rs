//! nepsum - client for a Nepali news summarization service
//!
//! Submits an article (by URL or pasted text) to a remote summarizer, tracks
//! the single in-flight request with a countdown estimate, and keeps a short
//! history of results with their ROUGE scores.

pub mod cli;
pub mod client;
pub mod config;
pub mod coordinator;
pub mod eta;
pub mod history;
pub mod logging;
