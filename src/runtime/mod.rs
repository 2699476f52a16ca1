//! Loop plumbing that does not know about components: the idle-wait wakeup
//! and the worker pool key handlers run on.

pub mod pool;
pub mod wakeup;

pub use pool::{PoolStats, WorkerPool};
pub use wakeup::{wakeup_pipe, WakeupReceiver, WakeupSender};
