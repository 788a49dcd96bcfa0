//! Relative placement scoring for judged competitions.
//!
//! Each judge ranks every competitor; a competitor's place is decided by
//! where a majority of judges agree, with a fixed cascade of tie-breaks
//! (cumulative count, sum of scores, extended rank window, head-to-head)
//! before competitors are declared equal.
//!
//! ```rust
//! use relative_placement::calculate_results;
//!
//! let competitors = vec!["A".to_string(), "B".to_string(), "C".to_string()];
//! let rankings = vec![vec![3, 2, 1], vec![2, 3, 1], vec![2, 1, 3]];
//!
//! let results = calculate_results(&competitors, &rankings).unwrap();
//! let order: Vec<&str> = results.iter().map(|r| r.competitor.as_str()).collect();
//! assert_eq!(order, ["C", "B", "A"]);
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod placement;
pub mod sheet;
pub mod summary;

pub use error::{DegenerateInputError, DimensionError, ScoringError};
pub use placement::{
    CompetitorResult, EngineOptions, ValidationMode, calculate_results, calculate_results_with,
};
