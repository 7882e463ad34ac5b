//! Aggregate questions asked of the prepared movie table.
//!
//! Each analyzer takes the table by reference and returns a plain result
//! value; none of them depend on each other. [`analyzer::run_all`] runs the
//! full set for the `report` command.

pub mod analyzer;
pub mod breakout;
pub mod director;
pub mod genre;
pub mod growth;
pub mod types;
