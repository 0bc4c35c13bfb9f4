pub mod service;
pub mod update;

pub use service::{NewTask, TaskService};
pub use update::{TaskPatch, build_update};
