mod actor;
mod handle;
pub mod models;
pub mod reconcile;
mod scheduler;
pub mod time;

pub use handle::FeedImportHandle;
pub use models::{CustomField, FeedEvent, RunMode, RunSummary};
pub use scheduler::start_scheduler;
