pub mod documents;
pub mod shares;
pub mod users;
