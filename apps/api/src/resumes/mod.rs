pub mod form;
pub mod handlers;
pub mod service;
pub mod upload;
