//! # Cue Library
//!
//! Text-to-audio sample retrieval. Text queries and audio samples are
//! embedded by external models, aligned by one of three strategies, and
//! matched with an exact inner-product index. An evaluator scores each
//! strategy on labeled queries with a confusion matrix.

pub mod alignment;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod error;
pub mod evaluation;
pub mod models;
pub mod retrieval;
pub mod runtime;
pub mod storage;
pub mod ui;

pub use error::{Error, Result};
