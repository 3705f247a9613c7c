//! Title page information

use serde::{Deserialize, Serialize};
use std::fmt;

/// Longest title accepted without a warning, in characters
pub const MAX_TITLE_CHARS: usize = 100;

/// Longest author name accepted without a warning, in characters
pub const MAX_AUTHOR_CHARS: usize = 80;

/// Longest description accepted without a warning, in characters
pub const MAX_DESCRIPTION_CHARS: usize = 500;

/// A line of the title page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TitleField {
    Title,
    Author,
    Description,
    Contact,
    Date,
}

impl TitleField {
    pub fn as_str(&self) -> &'static str {
        match self {
            TitleField::Title => "title",
            TitleField::Author => "author",
            TitleField::Description => "description",
            TitleField::Contact => "contact",
            TitleField::Date => "date",
        }
    }

    /// Length limit, for fields that have one
    pub fn max_chars(&self) -> Option<usize> {
        match self {
            TitleField::Title => Some(MAX_TITLE_CHARS),
            TitleField::Author => Some(MAX_AUTHOR_CHARS),
            TitleField::Description => Some(MAX_DESCRIPTION_CHARS),
            TitleField::Contact | TitleField::Date => None,
        }
    }
}

impl fmt::Display for TitleField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cover page of a screenplay.
///
/// When present it becomes page 1 and holds no blocks; the script starts on
/// page 2. A blank title means no title page at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TitlePage {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl TitlePage {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_contact(mut self, contact: impl Into<String>) -> Self {
        self.contact = Some(contact.into());
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Whether this produces a page; a blank title does not
    pub fn is_present(&self) -> bool {
        !self.title.trim().is_empty()
    }

    /// Text of `field`, if set
    pub fn field(&self, field: TitleField) -> Option<&str> {
        match field {
            TitleField::Title => Some(self.title.as_str()),
            TitleField::Author => self.author.as_deref(),
            TitleField::Description => self.description.as_deref(),
            TitleField::Contact => self.contact.as_deref(),
            TitleField::Date => self.date.as_deref(),
        }
        .filter(|text| !text.is_empty())
    }

    /// Fields over their length limit, with their lengths in characters
    pub fn overlong_fields(&self) -> Vec<(TitleField, usize)> {
        [TitleField::Title, TitleField::Author, TitleField::Description]
            .into_iter()
            .filter_map(|field| {
                let length = self.field(field)?.chars().count();
                let max = field.max_chars()?;
                (length > max).then_some((field, length))
            })
            .collect()
    }

    /// Display text for `field`: the title upper-cased, the author as a byline
    pub fn display_text(&self, field: TitleField) -> Option<String> {
        let text = self.field(field)?;
        Some(match field {
            TitleField::Title => text.to_uppercase(),
            TitleField::Author => format!("by {text}"),
            _ => text.to_string(),
        })
    }
}
