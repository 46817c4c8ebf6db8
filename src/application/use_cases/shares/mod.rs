pub mod create_share;
pub mod get_shared;
pub mod revoke_share;
