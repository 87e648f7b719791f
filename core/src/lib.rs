//! # Alloc-Core: Tabletop Session Allocation Engine
//!
//! This crate assigns player groups to game sessions within a single time
//! slot, minimizing aggregate preference loss subject to each session's
//! capacity window, then minimizing deviation from each session's optimal
//! size. It uses randomized restart local search: every trial seats groups
//! greedily by preference, repairs under-filled sessions by pulling groups
//! from over-filled ones, and the best of `n_trials` independent attempts
//! wins.
//!
//! ## Quick Example
//!
//! ```no_run
//! use alloc_core::{run_allocator, models::*};
//! use std::collections::HashMap;
//!
//! let input = AllocationInput {
//!     sessions: vec![
//!         Session { id: "dungeon-crawl".into(), min: 2, optimal: 4, max: 5, metadata: HashMap::new() },
//!         Session { id: "heist".into(), min: 2, optimal: 4, max: 5, metadata: HashMap::new() },
//!     ],
//!     groups: vec![
//!         Group { id: "alice+bob".into(), player_ids: vec!["alice".into(), "bob".into()], avg_compensation: 0.0 },
//!     ],
//!     preferences: PreferenceTable::default(),
//!     solver: AllocatorConfig { run_seed: 42, n_trials: 20, logging: LoggingOptions::default() },
//! };
//!
//! match run_allocator(&input) {
//!     Ok(report) => println!("{}", report.display()),
//!     Err(e) => eprintln!("allocation failed: {e}"),
//! }
//! ```

pub mod error;
pub mod evaluator;
pub mod models;
pub mod placement;
pub mod preference;
pub mod repair;
pub mod rng;
pub mod state;
pub mod trial;
pub mod validation;

pub use error::AllocatorError;
pub use models::{AllocationInput, AllocationReport};
pub use trial::{run_allocator, run_allocator_parallel};
