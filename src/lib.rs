//! # Tailorbird - DNA sequence text editor
//!
//! A terminal editor for nucleotide sequences, one per line, using ratatui.
//!
//! ## Architecture
//!
//! The application follows an event-driven architecture with clear separation:
//! - `seq`: complement and reverse complement over a fixed symbol table
//! - `ops`: per-line buffer operations (case, reverse, complement, head/tail)
//! - `buffer`: editable text buffers with cursor and scrolling
//! - `model`: application state and the read/transform/write cycle
//! - `event`: keyboard and paste handling
//! - `ui`: TUI rendering with ratatui
//! - `controller`: terminal setup and the main loop
//! - `batch`, `config`, `logging`: command line support

pub mod batch;
pub mod buffer;
pub mod config;
pub mod controller;
pub mod event;
pub mod logging;
pub mod model;
pub mod ops;
pub mod seq;
pub mod ui;
