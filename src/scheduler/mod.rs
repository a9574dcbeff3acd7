pub mod context;
pub mod job;
pub mod repository;
pub mod source;

pub use context::SchedulingContext;
pub use job::{Job, JobRun};
pub use repository::InMemoryJobRepository;
pub use source::{JobRepository, JobSource};
