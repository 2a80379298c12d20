//! The cluster tick engine.
//!
//! [`Cluster`] drives the simulation: it owns the processor pool, the
//! waiting-call queue, and the running-program set, and executes the
//! fixed per-tick phase sequence. [`ClusterConfig`] carries construction
//! parameters; [`TickObserver`] is the boundary through which external
//! collaborators watch state and inject work.

mod config;
mod engine;
mod observer;

pub use config::ClusterConfig;
pub use engine::Cluster;
pub use observer::{StopToken, TickContext, TickObserver};
