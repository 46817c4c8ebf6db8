pub mod document_repository;
pub mod store_error;
pub mod user_repository;
