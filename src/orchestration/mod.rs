// Tue Jan 25 2026 - Alex

pub mod coordinator;
pub mod discovery;
pub mod finalizer;
pub mod scheduler;

pub use coordinator::{Pipeline, Stage};
pub use discovery::{Discovery, DiscoveryManager, InterfacePair};
pub use finalizer::{EmissionFailure, EmissionSummary, OutputFinalizer, PipelineReport};
pub use scheduler::WorkerPool;
