//! `escalafon` library crate.
//!
//! The binary (`escalafon`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the classifier and reconciler are reusable from other tools
//! - code stays easy to navigate as the project grows
//!
//! The crate ingests scraped disclosure records for public officials, resolves
//! noisy OCR'd job titles to a controlled vocabulary (judge / prosecutor /
//! other), and reconstructs a best-guess `YYYYMM` start date per
//! (person, role) from conflicting OCR date readings.

pub mod app;
pub mod classify;
pub mod cli;
pub mod domain;
pub mod error;
pub mod group;
pub mod io;
pub mod reconcile;
pub mod report;
pub mod text;
