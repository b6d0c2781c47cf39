//! View-models and validation for the editing surfaces.
//!
//! Handlers validate input with these pure functions before any
//! persistence call; a validation failure never reaches the backend.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Maximum length of a quiz question's text.
pub const MAX_QUESTION_LENGTH: usize = 2000;

/// Maximum length of an option key ("A", "B", ... in practice).
pub const MAX_OPTION_KEY_LENGTH: usize = 8;

/// Maximum length of entity titles and names.
pub const MAX_TITLE_LENGTH: usize = 300;

// ---------------------------------------------------------------------------
// Publication status
// ---------------------------------------------------------------------------

/// Draft/published state shared by content entities (events, stories,
/// learning materials, courses).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublishStatus {
    Draft,
    Published,
}

impl PublishStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            other => Err(CoreError::Validation(format!(
                "Invalid status '{other}'. Must be one of: draft, published"
            ))),
        }
    }
}

impl std::fmt::Display for PublishStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Account state for members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberStatus {
    Active,
    Inactive,
}

impl MemberStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            other => Err(CoreError::Validation(format!(
                "Invalid member status '{other}'. Must be one of: active, inactive"
            ))),
        }
    }
}

impl std::fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// View-models
// ---------------------------------------------------------------------------

/// The quiz-question detail form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestionForm {
    pub question: String,
    #[serde(default)]
    pub correct_answer: String,
    pub reason: Option<String>,
}

impl QuestionForm {
    pub fn validate(&self) -> Result<(), CoreError> {
        let question = self.question.trim();
        if question.is_empty() {
            return Err(CoreError::Validation(
                "Question text must not be empty".to_string(),
            ));
        }
        if question.len() > MAX_QUESTION_LENGTH {
            return Err(CoreError::Validation(format!(
                "Question text exceeds maximum length of {MAX_QUESTION_LENGTH} characters"
            )));
        }
        Ok(())
    }
}

/// A single answer option inside the question form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OptionForm {
    pub option_key: String,
    pub text: String,
}

impl OptionForm {
    pub fn validate(&self) -> Result<(), CoreError> {
        let key = self.option_key.trim();
        if key.is_empty() {
            return Err(CoreError::Validation(
                "Option key must not be empty".to_string(),
            ));
        }
        if key.len() > MAX_OPTION_KEY_LENGTH {
            return Err(CoreError::Validation(format!(
                "Option key exceeds maximum length of {MAX_OPTION_KEY_LENGTH} characters"
            )));
        }
        if self.text.trim().is_empty() {
            return Err(CoreError::Validation(
                "Option text must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// One row of the course-learning association form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseLearningForm {
    pub learnings_id: DbId,
    pub quiz_id: Option<DbId>,
}

impl CourseLearningForm {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.learnings_id <= 0 {
            return Err(CoreError::Validation(format!(
                "learnings_id must be a persisted learning material id, got {}",
                self.learnings_id
            )));
        }
        if let Some(quiz_id) = self.quiz_id {
            if quiz_id <= 0 {
                return Err(CoreError::Validation(format!(
                    "quiz_id must be a persisted quiz id, got {quiz_id}"
                )));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Shared field validation
// ---------------------------------------------------------------------------

/// Validate a required title/name field.
pub fn validate_title(field: &'static str, value: &str) -> Result<(), CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    if trimmed.len() > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "{field} exceeds maximum length of {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Derive a URL slug from a display name.
///
/// Lowercases, folds Vietnamese diacritics to ASCII, and collapses
/// everything else into single hyphens. Mirrors how course and category
/// slugs are generated from their names in the admin UI.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_hyphen = true;

    for c in name.chars() {
        for folded in fold_char(c) {
            if folded.is_ascii_alphanumeric() {
                slug.push(folded.to_ascii_lowercase());
                last_hyphen = false;
            } else if !last_hyphen {
                slug.push('-');
                last_hyphen = true;
            }
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Fold one character to its ASCII base form, covering the Vietnamese
/// alphabet's accented vowels and đ.
fn fold_char(c: char) -> impl Iterator<Item = char> {
    let folded: &str = match c {
        'à' | 'á' | 'ả' | 'ã' | 'ạ' | 'ă' | 'ằ' | 'ắ' | 'ẳ' | 'ẵ' | 'ặ' | 'â' | 'ầ' | 'ấ'
        | 'ẩ' | 'ẫ' | 'ậ' => "a",
        'À' | 'Á' | 'Ả' | 'Ã' | 'Ạ' | 'Ă' | 'Ằ' | 'Ắ' | 'Ẳ' | 'Ẵ' | 'Ặ' | 'Â' | 'Ầ' | 'Ấ'
        | 'Ẩ' | 'Ẫ' | 'Ậ' => "A",
        'è' | 'é' | 'ẻ' | 'ẽ' | 'ẹ' | 'ê' | 'ề' | 'ế' | 'ể' | 'ễ' | 'ệ' => "e",
        'È' | 'É' | 'Ẻ' | 'Ẽ' | 'Ẹ' | 'Ê' | 'Ề' | 'Ế' | 'Ể' | 'Ễ' | 'Ệ' => "E",
        'ì' | 'í' | 'ỉ' | 'ĩ' | 'ị' => "i",
        'Ì' | 'Í' | 'Ỉ' | 'Ĩ' | 'Ị' => "I",
        'ò' | 'ó' | 'ỏ' | 'õ' | 'ọ' | 'ô' | 'ồ' | 'ố' | 'ổ' | 'ỗ' | 'ộ' | 'ơ' | 'ờ' | 'ớ'
        | 'ở' | 'ỡ' | 'ợ' => "o",
        'Ò' | 'Ó' | 'Ỏ' | 'Õ' | 'Ọ' | 'Ô' | 'Ồ' | 'Ố' | 'Ổ' | 'Ỗ' | 'Ộ' | 'Ơ' | 'Ờ' | 'Ớ'
        | 'Ở' | 'Ỡ' | 'Ợ' => "O",
        'ù' | 'ú' | 'ủ' | 'ũ' | 'ụ' | 'ư' | 'ừ' | 'ứ' | 'ử' | 'ữ' | 'ự' => "u",
        'Ù' | 'Ú' | 'Ủ' | 'Ũ' | 'Ụ' | 'Ư' | 'Ừ' | 'Ứ' | 'Ử' | 'Ữ' | 'Ự' => "U",
        'ỳ' | 'ý' | 'ỷ' | 'ỹ' | 'ỵ' => "y",
        'Ỳ' | 'Ý' | 'Ỷ' | 'Ỹ' | 'Ỵ' => "Y",
        'đ' => "d",
        'Đ' => "D",
        _ => return Fold::Keep(std::iter::once(c)),
    };
    Fold::Mapped(folded.chars())
}

/// Iterator shim so `fold_char` can return either branch.
enum Fold<A, B> {
    Keep(A),
    Mapped(B),
}

impl<A, B> Iterator for Fold<A, B>
where
    A: Iterator<Item = char>,
    B: Iterator<Item = char>,
{
    type Item = char;

    fn next(&mut self) -> Option<char> {
        match self {
            Fold::Keep(a) => a.next(),
            Fold::Mapped(b) => b.next(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn publish_status_roundtrip() {
        assert_eq!(PublishStatus::parse("draft").unwrap(), PublishStatus::Draft);
        assert_eq!(
            PublishStatus::parse("published").unwrap().as_str(),
            "published"
        );
        assert_matches!(
            PublishStatus::parse("archived"),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn member_status_roundtrip() {
        assert_eq!(MemberStatus::parse("active").unwrap(), MemberStatus::Active);
        assert_matches!(MemberStatus::parse(""), Err(CoreError::Validation(_)));
    }

    #[test]
    fn question_form_requires_text() {
        let form = QuestionForm {
            question: "   ".into(),
            ..Default::default()
        };
        assert_matches!(form.validate(), Err(CoreError::Validation(_)));

        let form = QuestionForm {
            question: "What is ownership?".into(),
            ..Default::default()
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn question_form_rejects_oversized_text() {
        let form = QuestionForm {
            question: "x".repeat(MAX_QUESTION_LENGTH + 1),
            ..Default::default()
        };
        assert_matches!(form.validate(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn option_form_requires_key_and_text() {
        let ok = OptionForm {
            option_key: "A".into(),
            text: "Borrowing".into(),
        };
        assert!(ok.validate().is_ok());

        let no_key = OptionForm {
            option_key: "".into(),
            text: "Borrowing".into(),
        };
        assert_matches!(no_key.validate(), Err(CoreError::Validation(_)));

        let no_text = OptionForm {
            option_key: "B".into(),
            text: " ".into(),
        };
        assert_matches!(no_text.validate(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn course_learning_form_requires_real_references() {
        assert!(CourseLearningForm {
            learnings_id: 3,
            quiz_id: None
        }
        .validate()
        .is_ok());
        assert!(CourseLearningForm {
            learnings_id: 3,
            quiz_id: Some(9)
        }
        .validate()
        .is_ok());
        assert_matches!(
            CourseLearningForm {
                learnings_id: 0,
                quiz_id: None
            }
            .validate(),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            CourseLearningForm {
                learnings_id: 3,
                quiz_id: Some(-1)
            }
            .validate(),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn validate_title_trims_and_bounds() {
        assert!(validate_title("name", "Rust căn bản").is_ok());
        assert_matches!(validate_title("name", "  "), Err(CoreError::Validation(_)));
        assert_matches!(
            validate_title("name", &"x".repeat(MAX_TITLE_LENGTH + 1)),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn slugify_folds_vietnamese_and_collapses_separators() {
        assert_eq!(slugify("Khóa học Rust căn bản"), "khoa-hoc-rust-can-ban");
        assert_eq!(slugify("Đường   dẫn // đặc biệt"), "duong-dan-dac-biet");
        assert_eq!(slugify("  Hello World!  "), "hello-world");
        assert_eq!(slugify(""), "");
    }
}
