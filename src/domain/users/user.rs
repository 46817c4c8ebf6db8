#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub username: String,
    /// Opaque credential, stored as given and never returned over HTTP.
    pub password: String,
}
