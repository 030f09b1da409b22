//! Application services for task record upkeep.

mod lifecycle;

pub use lifecycle::{ListTasksRequest, TaskService, TaskServiceError, TaskServiceResult};
