#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub id: i64,
    pub title: String,
    pub filename: String,
    pub file_type: String,
    pub content: Option<String>,
    pub tags: Vec<String>,
    pub user_id: Option<i64>,
    pub is_public: bool,
    pub share_code: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Fields supplied when a document is first stored. The owner is passed
/// separately so the store never invents one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDocument {
    pub title: String,
    pub filename: String,
    pub file_type: String,
    pub content: Option<String>,
    pub tags: Vec<String>,
    pub is_public: bool,
}

/// Partial update. Only the mutable fields of a document appear here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentChanges {
    pub title: Option<String>,
    // None => not provided; Some(None) => set NULL; Some(Some(text)) => set value
    pub content: Option<Option<String>>,
    pub tags: Option<Vec<String>>,
    pub is_public: Option<bool>,
}

impl DocumentChanges {
    pub fn apply_to(self, doc: &mut Document) {
        if let Some(title) = self.title {
            doc.title = title;
        }
        if let Some(content) = self.content {
            doc.content = content;
        }
        if let Some(tags) = self.tags {
            doc.tags = tags;
        }
        if let Some(is_public) = self.is_public {
            doc.is_public = is_public;
        }
    }
}
