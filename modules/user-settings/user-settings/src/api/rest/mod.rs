pub mod body;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod headers;
pub mod pagination;
pub mod problem;
pub mod routes;
