use crate::domain::documents::document::Document;

/// The caller on whose behalf a request runs. Built by the presentation
/// layer and passed explicitly to every use case that needs an owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: i64,
}

impl Identity {
    pub fn new(user_id: i64) -> Self {
        Self { user_id }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Capability {
    None,
    View,
}

// A share code only grants read access while the document is public.
pub fn resolve_shared(doc: &Document, code: &str) -> Capability {
    let matches = doc.share_code.as_deref() == Some(code);
    if matches && doc.is_public {
        Capability::View
    } else {
        Capability::None
    }
}
