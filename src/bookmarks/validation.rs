//! Field rules for bookmark write payloads.
//!
//! Create and update share one ordered rule list ([`FIELDS`]). Evaluation stops at the
//! first violated rule, so a payload with several problems reports them one request at a
//! time.

use serde::Deserialize;
use serde_json::Value;
use url::Url;

use super::{BookmarkChanges, NewBookmark};
use crate::error::ValidationError;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// Raw write payload as sent by the client. Every field is optional at this stage;
/// `rating` stays untyped so a wrong type reports as a rating error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookmarkFields {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub rating: Option<Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Url,
    Description,
    Rating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Create,
    Update,
}

const FIELDS: [Field; 4] = [Field::Title, Field::Url, Field::Description, Field::Rating];

impl Field {
    fn name(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Url => "url",
            Field::Description => "description",
            Field::Rating => "rating",
        }
    }

    fn required_on_create(self) -> bool {
        !matches!(self, Field::Description)
    }
}

impl BookmarkFields {
    fn is_supplied(&self, field: Field) -> bool {
        match field {
            Field::Title => self.title.is_some(),
            Field::Url => self.url.is_some(),
            Field::Description => self.description.is_some(),
            Field::Rating => !matches!(self.rating, None | Some(Value::Null)),
        }
    }

    fn check(&self, field: Field) -> Result<(), ValidationError> {
        match field {
            Field::Title => required_text(self.title.as_deref(), field).map(|_| ()),
            Field::Url => {
                let raw = required_text(self.url.as_deref(), field)?;
                parse_url(raw).map(|_| ())
            }
            Field::Description => Ok(()),
            Field::Rating => match &self.rating {
                Some(value) => parse_rating(value).map(|_| ()),
                None => Err(ValidationError::MissingField(field.name())),
            },
        }
    }

    fn evaluate(&self, mode: Mode) -> Result<(), ValidationError> {
        if mode == Mode::Update && !FIELDS.iter().any(|f| self.is_supplied(*f)) {
            return Err(ValidationError::EmptyUpdate);
        }

        for field in FIELDS {
            if !self.is_supplied(field) {
                if mode == Mode::Create && field.required_on_create() {
                    return Err(ValidationError::MissingField(field.name()));
                }
                continue;
            }
            self.check(field)?;
        }

        Ok(())
    }
}

/// Validates a create payload. `description` defaults to an empty string.
pub fn validate_create(fields: BookmarkFields) -> Result<NewBookmark, ValidationError> {
    fields.evaluate(Mode::Create)?;

    let rating = match &fields.rating {
        Some(value) => parse_rating(value)?,
        None => return Err(ValidationError::MissingField(Field::Rating.name())),
    };

    Ok(NewBookmark {
        title: fields.title.unwrap_or_default(),
        url: fields.url.map(|u| u.trim().to_string()).unwrap_or_default(),
        description: fields.description.unwrap_or_default(),
        rating,
    })
}

/// Validates a partial update. At least one field must be supplied.
pub fn validate_update(fields: BookmarkFields) -> Result<BookmarkChanges, ValidationError> {
    fields.evaluate(Mode::Update)?;

    let rating = match &fields.rating {
        Some(Value::Null) | None => None,
        Some(value) => Some(parse_rating(value)?),
    };

    Ok(BookmarkChanges {
        title: fields.title,
        url: fields.url.map(|u| u.trim().to_string()),
        description: fields.description,
        rating,
    })
}

fn required_text(value: Option<&str>, field: Field) -> Result<&str, ValidationError> {
    match value {
        Some(s) if !s.trim().is_empty() => Ok(s),
        _ => Err(ValidationError::MissingField(field.name())),
    }
}

/// Absolute URI with at least a scheme and a host.
pub fn parse_url(raw: &str) -> Result<Url, ValidationError> {
    let url = Url::parse(raw.trim()).map_err(|_| ValidationError::InvalidUrl)?;
    if !url.has_host() {
        return Err(ValidationError::InvalidUrl);
    }
    Ok(url)
}

/// Integral JSON number in `MIN_RATING..=MAX_RATING`. `4.0` is accepted, `"4"` is not.
pub fn parse_rating(value: &Value) -> Result<u8, ValidationError> {
    let number = match value {
        Value::Number(n) => n,
        _ => return Err(ValidationError::InvalidRating),
    };

    let rating = if let Some(i) = number.as_i64() {
        i
    } else {
        match number.as_f64() {
            Some(f) if f.fract() == 0.0 && f.is_finite() => f as i64,
            _ => return Err(ValidationError::InvalidRating),
        }
    };

    if rating < MIN_RATING as i64 || rating > MAX_RATING as i64 {
        return Err(ValidationError::InvalidRating);
    }

    Ok(rating as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> BookmarkFields {
        serde_json::from_value(value).unwrap()
    }

    fn valid() -> Value {
        json!({
            "title": "Test",
            "url": "https://x.com",
            "description": "d",
            "rating": 4
        })
    }

    #[test]
    fn test_create_accepts_valid_payload() {
        let draft = validate_create(fields(valid())).unwrap();
        assert_eq!(
            draft,
            NewBookmark {
                title: "Test".to_string(),
                url: "https://x.com".to_string(),
                description: "d".to_string(),
                rating: 4,
            }
        );
    }

    #[test]
    fn test_create_description_is_optional() {
        let draft =
            validate_create(fields(json!({"title": "T", "url": "https://x.com", "rating": 1})))
                .unwrap();
        assert_eq!(draft.description, "");
    }

    #[test]
    fn test_create_reports_first_missing_field() {
        assert_eq!(
            validate_create(fields(json!({"url": "dummy"}))),
            Err(ValidationError::MissingField("title"))
        );
        assert_eq!(
            validate_create(fields(json!({"title": "T", "rating": 3}))),
            Err(ValidationError::MissingField("url"))
        );
        assert_eq!(
            validate_create(fields(json!({"title": "T", "url": "https://x.com"}))),
            Err(ValidationError::MissingField("rating"))
        );
        assert_eq!(
            validate_create(fields(json!({"title": "T", "url": "https://x.com", "rating": null}))),
            Err(ValidationError::MissingField("rating"))
        );
    }

    #[test]
    fn test_blank_title_counts_as_missing() {
        let mut payload = valid();
        payload["title"] = json!("   ");
        assert_eq!(
            validate_create(fields(payload)),
            Err(ValidationError::MissingField("title"))
        );
    }

    #[test]
    fn test_rejects_malformed_urls() {
        for bad in ["dummy", "https://", "mailto:someone@example.com", "/relative/path"] {
            let mut payload = valid();
            payload["url"] = json!(bad);
            assert_eq!(
                validate_create(fields(payload)),
                Err(ValidationError::InvalidUrl),
                "{bad}"
            );
        }
    }

    #[test]
    fn test_rating_boundaries() {
        assert_eq!(parse_rating(&json!(1)), Ok(1));
        assert_eq!(parse_rating(&json!(5)), Ok(5));
        assert_eq!(parse_rating(&json!(0)), Err(ValidationError::InvalidRating));
        assert_eq!(parse_rating(&json!(6)), Err(ValidationError::InvalidRating));
        assert_eq!(parse_rating(&json!(-1)), Err(ValidationError::InvalidRating));
    }

    #[test]
    fn test_rating_must_be_integral_number() {
        assert_eq!(parse_rating(&json!(4.0)), Ok(4));
        assert_eq!(parse_rating(&json!(4.5)), Err(ValidationError::InvalidRating));
        assert_eq!(parse_rating(&json!("5")), Err(ValidationError::InvalidRating));
        assert_eq!(parse_rating(&json!(true)), Err(ValidationError::InvalidRating));
    }

    #[test]
    fn test_update_requires_a_field() {
        assert_eq!(
            validate_update(fields(json!({}))),
            Err(ValidationError::EmptyUpdate)
        );
        assert_eq!(
            validate_update(fields(json!({"unknown": 1, "rating": null}))),
            Err(ValidationError::EmptyUpdate)
        );
    }

    #[test]
    fn test_update_keeps_only_supplied_fields() {
        let changes = validate_update(fields(json!({"title": "New"}))).unwrap();
        assert_eq!(
            changes,
            BookmarkChanges {
                title: Some("New".to_string()),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_update_applies_same_rules_to_supplied_fields() {
        assert_eq!(
            validate_update(fields(json!({"url": "dummy"}))),
            Err(ValidationError::InvalidUrl)
        );
        assert_eq!(
            validate_update(fields(json!({"rating": 6}))),
            Err(ValidationError::InvalidRating)
        );
        assert_eq!(
            validate_update(fields(json!({"title": ""}))),
            Err(ValidationError::MissingField("title"))
        );
    }

    #[test]
    fn test_url_is_stored_trimmed() {
        let mut payload = valid();
        payload["url"] = json!("  https://x.com  ");
        assert_eq!(validate_create(fields(payload)).unwrap().url, "https://x.com");

        let changes = validate_update(fields(json!({"url": " https://y.com\n"}))).unwrap();
        assert_eq!(changes.url.as_deref(), Some("https://y.com"));
    }

    #[test]
    fn test_update_allows_clearing_description() {
        let changes = validate_update(fields(json!({"description": ""}))).unwrap();
        assert_eq!(changes.description, Some(String::new()));
    }
}
