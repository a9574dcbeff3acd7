pub mod cancel;
pub mod config;
pub mod error;
pub mod iteration;
pub mod scheduler;

pub use cancel::{CancelReason, CancellationSignal, RoundContext};
pub use config::{DuplicatePolicy, IndexConfig};
pub use error::{IterationError, Result, SourceError};
pub use iteration::{InMemoryJobIterator, JobContextIterator, MultiJobsIterator, QueuedJobsIterator};
pub use scheduler::{InMemoryJobRepository, Job, JobRepository, JobRun, JobSource, SchedulingContext};
