pub mod response;
pub mod user_dto;
