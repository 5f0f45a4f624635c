use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct DiaryEntry {
    pub id: i64,
    pub title: String,
    pub content: String,
}

/// Body of `POST /diaries` and `PUT /diaries/{id}`.
///
/// Both fields are optional at the serde level so a missing field reaches
/// validation instead of failing deserialization.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DiaryRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl DiaryRequest {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            content: Some(content.into()),
        }
    }

    /// Returns the `(title, content)` pair when both are present and
    /// non-empty. Whitespace counts as content.
    pub fn validated(self) -> Option<(String, String)> {
        let title = self.title.filter(|t| !t.is_empty())?;
        let content = self.content.filter(|c| !c.is_empty())?;
        Some((title, content))
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validated_requires_both_fields() {
        assert!(DiaryRequest::new("t", "c").validated().is_some());
        assert!(DiaryRequest {
            title: Some("t".into()),
            content: None
        }
        .validated()
        .is_none());
        assert!(DiaryRequest {
            title: None,
            content: Some("c".into())
        }
        .validated()
        .is_none());
    }

    #[test]
    fn validated_rejects_empty_but_keeps_whitespace() {
        assert!(DiaryRequest::new("", "c").validated().is_none());
        assert!(DiaryRequest::new("t", "").validated().is_none());
        assert_eq!(
            DiaryRequest::new(" ", "   ").validated(),
            Some((" ".to_string(), "   ".to_string()))
        );
    }

    #[test]
    fn request_tolerates_missing_and_null_fields() {
        let req: DiaryRequest = serde_json::from_str(r#"{"title":"Test Title"}"#).unwrap();
        assert_eq!(req.title.as_deref(), Some("Test Title"));
        assert!(req.content.is_none());

        let req: DiaryRequest = serde_json::from_str(r#"{"title":null,"content":"x"}"#).unwrap();
        assert!(req.title.is_none());
    }
}
