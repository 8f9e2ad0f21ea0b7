//! Port traits defining external boundaries.
//!
//! Each trait is a boundary between the pipeline and something outside the
//! process (the repository host, the local disk). Implementations live in
//! `src/adapters/`.

pub mod filesystem;
pub mod repo_host;

pub use filesystem::FileSystem;
pub use repo_host::{HostError, HostFuture, RepoHost};
