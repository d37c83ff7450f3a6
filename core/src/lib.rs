//! Core of the user metrics dashboard.
//!
//! Four fixed relations (users, accounts, calls, emails) go in; a
//! per-user aggregate and the view-models a renderer needs come out.
//! Nothing in here draws anything or talks to the network.

pub mod aggregator;
pub mod config;
pub mod dataset;
pub mod error;
pub mod model;
pub mod selection;
pub mod store;
pub mod types;
pub mod view;

pub use aggregator::{compute_metrics, UserMetrics};
pub use dataset::Dataset;
pub use selection::SelectionStore;
