//! The résumé schema, expressed as data.
//!
//! Every object schema is closed: keys not listed are reported as unknown.

use regex::Regex;
use std::sync::OnceLock;

/// Accepted values for `languages[].proficiency`.
pub const PROFICIENCY_LEVELS: &[&str] = &["native", "fluent", "advanced", "intermediate", "basic"];

/// String formats checked with a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// `YYYY`, `YYYY-MM`, `YYYY-MM-DD` or `present`
    Date,
    /// One `@`, with a `.` somewhere after it
    Email,
    /// Starts with `http://` or `https://`
    HttpUrl,
    /// Two lowercase letters
    LanguageCode,
}

static DATE_REGEX: OnceLock<Regex> = OnceLock::new();
static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
static HTTP_URL_REGEX: OnceLock<Regex> = OnceLock::new();
static LANGUAGE_CODE_REGEX: OnceLock<Regex> = OnceLock::new();

impl Format {
    fn regex(self) -> &'static Regex {
        match self {
            Format::Date => DATE_REGEX
                .get_or_init(|| Regex::new(r"^([0-9]{4}(-[0-9]{2}(-[0-9]{2})?)?|present)$").unwrap()),
            Format::Email => {
                EMAIL_REGEX.get_or_init(|| Regex::new(r"^[^@]+@[^@]+\.[^@]+$").unwrap())
            }
            Format::HttpUrl => HTTP_URL_REGEX.get_or_init(|| Regex::new(r"^https?://").unwrap()),
            Format::LanguageCode => {
                LANGUAGE_CODE_REGEX.get_or_init(|| Regex::new(r"^[a-z]{2}$").unwrap())
            }
        }
    }

    pub fn matches(self, text: &str) -> bool {
        self.regex().is_match(text)
    }

    /// Reason shown when a value does not match.
    pub fn reason(self) -> &'static str {
        match self {
            Format::Date => "must be a date in YYYY, YYYY-MM or YYYY-MM-DD format, or \"present\"",
            Format::Email => "must be an email address with one \"@\" followed by a domain",
            Format::HttpUrl => "must start with http:// or https://",
            Format::LanguageCode => "must be a two-letter lowercase language code",
        }
    }
}

#[derive(Debug)]
pub enum Schema {
    /// Plain string or per-language map of strings.
    Text { non_empty: bool },
    /// Plain string only.
    PlainText { non_empty: bool },
    StringOrNumber,
    Boolean,
    Formatted(Format),
    Enum(&'static [&'static str]),
    Nullable(Box<Schema>),
    Array { items: Box<Schema>, unique: bool },
    Object(Vec<Field>),
}

#[derive(Debug)]
pub struct Field {
    pub name: &'static str,
    pub schema: Schema,
    pub required: bool,
}

fn required(name: &'static str, schema: Schema) -> Field {
    Field {
        name,
        schema,
        required: true,
    }
}

fn optional(name: &'static str, schema: Schema) -> Field {
    Field {
        name,
        schema,
        required: false,
    }
}

fn text() -> Schema {
    Schema::Text { non_empty: false }
}

fn non_empty_text() -> Schema {
    Schema::Text { non_empty: true }
}

fn plain() -> Schema {
    Schema::PlainText { non_empty: false }
}

fn list_of(items: Schema) -> Schema {
    Schema::Array {
        items: Box::new(items),
        unique: false,
    }
}

fn date() -> Schema {
    Schema::Formatted(Format::Date)
}

fn profile() -> Schema {
    Schema::Object(vec![
        required("name", non_empty_text()),
        optional("title", text()),
        optional("dateOfBirth", date()),
        optional("phone", plain()),
        optional("email", Schema::Formatted(Format::Email)),
        optional("city", text()),
        optional("country", text()),
        optional("address", text()),
        optional("introduction", text()),
        optional("photo", plain()),
        optional("website", plain()),
    ])
}

fn experience() -> Schema {
    list_of(Schema::Object(vec![
        required("company", non_empty_text()),
        required("position", non_empty_text()),
        optional("location", text()),
        required("startDate", date()),
        optional("endDate", Schema::Nullable(Box::new(date()))),
        optional("description", text()),
        optional("tasks", list_of(text())),
        optional("technologies", list_of(plain())),
        optional("url", plain()),
    ]))
}

fn education() -> Schema {
    list_of(Schema::Object(vec![
        required("institution", non_empty_text()),
        required("degree", non_empty_text()),
        optional("field", text()),
        optional("location", text()),
        optional("startDate", date()),
        optional("endDate", Schema::Nullable(Box::new(date()))),
        optional("gpa", Schema::StringOrNumber),
        optional("honors", text()),
        optional("description", text()),
    ]))
}

fn skills() -> Schema {
    list_of(Schema::Object(vec![
        required("category", text()),
        required("items", list_of(text())),
    ]))
}

fn languages() -> Schema {
    list_of(Schema::Object(vec![
        required("language", non_empty_text()),
        required("proficiency", Schema::Enum(PROFICIENCY_LEVELS)),
    ]))
}

fn social() -> Schema {
    list_of(Schema::Object(vec![
        required("platform", Schema::PlainText { non_empty: true }),
        required("url", Schema::Formatted(Format::HttpUrl)),
        optional("username", plain()),
    ]))
}

fn site() -> Schema {
    Schema::Object(vec![
        optional("defaultLanguage", Schema::Formatted(Format::LanguageCode)),
        optional(
            "languages",
            Schema::Array {
                items: Box::new(Schema::Formatted(Format::LanguageCode)),
                unique: true,
            },
        ),
        optional("effects", Schema::Boolean),
    ])
}

static RESUME_SCHEMA: OnceLock<Schema> = OnceLock::new();

/// Schema of the whole configuration document.
pub fn resume_schema() -> &'static Schema {
    RESUME_SCHEMA.get_or_init(|| {
        Schema::Object(vec![
            required("profile", profile()),
            optional("experience", experience()),
            optional("education", education()),
            optional("skills", skills()),
            optional("languages", languages()),
            optional("hobbies", list_of(non_empty_text())),
            optional("social", social()),
            optional("site", site()),
        ])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_format() {
        for ok in ["2020", "2020-05", "2020-05-17", "present"] {
            assert!(Format::Date.matches(ok), "{} should match", ok);
        }
        for bad in ["20", "2020-5", "May 2020", "Present", "2020-05-17T00:00"] {
            assert!(!Format::Date.matches(bad), "{} should not match", bad);
        }
    }

    #[test]
    fn test_date_format_rejects_non_ascii_digits() {
        assert!(!Format::Date.matches("١٩٩٠"));
        assert!(!Format::Date.matches("١٩٩٠-٠٤-١٢"));
        assert!(!Format::Date.matches("２０２０-０５"));
    }

    #[test]
    fn test_email_format() {
        assert!(Format::Email.matches("john@example.com"));
        assert!(!Format::Email.matches("john.example.com"));
        assert!(!Format::Email.matches("john@@example.com"));
        assert!(!Format::Email.matches("john@example"));
        assert!(!Format::Email.matches("a@b@c.com"));
    }

    #[test]
    fn test_http_url_format() {
        assert!(Format::HttpUrl.matches("https://github.com/john"));
        assert!(Format::HttpUrl.matches("http://example.com"));
        assert!(!Format::HttpUrl.matches("ftp://example.com"));
        assert!(!Format::HttpUrl.matches("github.com/john"));
    }

    #[test]
    fn test_language_code_format() {
        assert!(Format::LanguageCode.matches("en"));
        assert!(!Format::LanguageCode.matches("EN"));
        assert!(!Format::LanguageCode.matches("eng"));
    }

    #[test]
    fn test_root_schema_requires_profile() {
        let Schema::Object(fields) = resume_schema() else {
            panic!("root schema must be an object");
        };
        let profile = fields.iter().find(|f| f.name == "profile").unwrap();
        assert!(profile.required);
        assert!(fields.iter().filter(|f| f.required).count() == 1);
    }
}
