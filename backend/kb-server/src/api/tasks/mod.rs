pub mod create_task_request;
pub mod reorder_response;
pub mod reorder_tasks_request;
pub mod task_dto;
pub mod task_response;
pub mod tasks;
pub mod update_task_request;
