//! Grade aggregation and passing-criteria evaluation for semester-based schools.
//!
//! The engine (`rounding`, `average`, `resolver`, `criteria`, `stats`) is a set of
//! pure functions over a [`models::SchoolConfig`] snapshot. `store`, `import`,
//! `templates` and `report` are the collaborators used by the command-line tool.

pub mod average;
pub mod criteria;
pub mod import;
pub mod models;
pub mod report;
pub mod resolver;
pub mod rounding;
pub mod stats;
pub mod store;
pub mod templates;

#[cfg(test)]
mod fixtures;
