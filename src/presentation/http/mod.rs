pub mod documents;
pub mod error;
pub mod extract;
pub mod health;
pub mod shares;
pub mod upload_form;
pub mod users;
