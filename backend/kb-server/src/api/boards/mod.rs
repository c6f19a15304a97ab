pub mod board_dto;
pub mod board_list_response;
pub mod board_request;
pub mod board_response;
pub mod board_tasks_response;
pub mod boards;
