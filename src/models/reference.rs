//! Reference model representing one bibliographic record.

use serde::{Deserialize, Serialize};

/// Year used when a record carries no `originInfo` at all
pub const DEFAULT_YEAR: &str = "1900";

/// Label used for a reference without any author
pub const ANONYMOUS: &str = "anonymous";

/// A single author of a reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Given name(s), possibly empty
    pub given_name: String,

    /// Family name, possibly empty
    pub family_name: String,
}

impl Author {
    pub fn new(given_name: impl Into<String>, family_name: impl Into<String>) -> Self {
        Self {
            given_name: given_name.into(),
            family_name: family_name.into(),
        }
    }
}

/// The publication a reference appeared in (journal, proceedings, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Host {
    /// Host title
    pub title: String,

    /// Category label such as "conference" or "journal"
    pub genre: String,
}

impl Host {
    pub fn new(title: impl Into<String>, genre: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            genre: genre.into(),
        }
    }
}

/// A bibliographic reference extracted from one MODS record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    /// Record identifier (the `ID` attribute), empty when absent
    pub id: String,

    /// Main title
    pub title: String,

    /// Subtitle, when the record has one
    pub subtitle: Option<String>,

    /// Authors in document order
    pub authors: Vec<Author>,

    /// Publication year; empty when the record dates are explicitly missing
    pub year: String,

    /// Publisher, when the record has one
    pub publisher: Option<String>,

    /// Host publication
    pub host: Option<Host>,
}

impl Reference {
    /// Create a reference with only an identifier; all other fields take their defaults
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            subtitle: None,
            authors: Vec::new(),
            year: DEFAULT_YEAR.to_string(),
            publisher: None,
            host: None,
        }
    }

    /// Author family names joined for display (see [`format_authors`])
    pub fn authors_label(&self) -> String {
        format_authors(&self.authors)
    }

    /// Title of the host publication, if any
    pub fn host_title(&self) -> Option<&str> {
        self.host.as_ref().map(|h| h.title.as_str())
    }
}

/// Format an author list as "A, B & C".
///
/// Family names are separated by ", " except the last pair, which is joined
/// with " & ". An empty list yields "anonymous".
pub fn format_authors(authors: &[Author]) -> String {
    let names: Vec<&str> = authors.iter().map(|a| a.family_name.as_str()).collect();
    join_with_last(&names, ", ", " & ").unwrap_or_else(|| ANONYMOUS.to_string())
}

/// Join items with `sep`, using `last_sep` before the final item.
///
/// Returns `None` for an empty slice.
fn join_with_last(items: &[&str], sep: &str, last_sep: &str) -> Option<String> {
    match items.split_last() {
        None => None,
        Some((last, [])) => Some(last.to_string()),
        Some((last, rest)) => Some(format!("{}{}{}", rest.join(sep), last_sep, last)),
    }
}

/// Builder for constructing Reference objects
#[derive(Debug, Clone)]
pub struct ReferenceBuilder {
    reference: Reference,
}

impl ReferenceBuilder {
    /// Create a new builder for the given identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            reference: Reference::new(id),
        }
    }

    /// Set title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.reference.title = title.into();
        self
    }

    /// Set subtitle
    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.reference.subtitle = Some(subtitle.into());
        self
    }

    /// Append an author
    pub fn author(mut self, author: Author) -> Self {
        self.reference.authors.push(author);
        self
    }

    /// Replace the author list
    pub fn authors(mut self, authors: Vec<Author>) -> Self {
        self.reference.authors = authors;
        self
    }

    /// Set year
    pub fn year(mut self, year: impl Into<String>) -> Self {
        self.reference.year = year.into();
        self
    }

    /// Set publisher
    pub fn publisher(mut self, publisher: impl Into<String>) -> Self {
        self.reference.publisher = Some(publisher.into());
        self
    }

    /// Set host publication
    pub fn host(mut self, host: Host) -> Self {
        self.reference.host = Some(host);
        self
    }

    /// Build the Reference
    pub fn build(self) -> Reference {
        self.reference
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authors(families: &[&str]) -> Vec<Author> {
        families.iter().map(|f| Author::new("", *f)).collect()
    }

    #[test]
    fn test_format_authors_empty() {
        assert_eq!(format_authors(&[]), "anonymous");
    }

    #[test]
    fn test_format_authors_single() {
        assert_eq!(format_authors(&authors(&["Doe"])), "Doe");
    }

    #[test]
    fn test_format_authors_two() {
        assert_eq!(format_authors(&authors(&["Doe", "Smith"])), "Doe & Smith");
    }

    #[test]
    fn test_format_authors_many() {
        assert_eq!(
            format_authors(&authors(&["Doe", "Smith", "Jones"])),
            "Doe, Smith & Jones"
        );
        assert_eq!(
            format_authors(&authors(&["A", "B", "C", "D"])),
            "A, B, C & D"
        );
    }

    #[test]
    fn test_format_authors_empty_family_names() {
        // Authors without a family name still take a slot
        assert_eq!(format_authors(&authors(&["", ""])), " & ");
    }

    #[test]
    fn test_reference_builder() {
        let reference = ReferenceBuilder::new("r1")
            .title("A Study")
            .subtitle("Part One")
            .author(Author::new("Jane", "Doe"))
            .year("1999")
            .publisher("ACM")
            .host(Host::new("Proc. Conf. X", "conference"))
            .build();

        assert_eq!(reference.id, "r1");
        assert_eq!(reference.title, "A Study");
        assert_eq!(reference.subtitle.as_deref(), Some("Part One"));
        assert_eq!(reference.authors_label(), "Doe");
        assert_eq!(reference.year, "1999");
        assert_eq!(reference.publisher.as_deref(), Some("ACM"));
        assert_eq!(reference.host_title(), Some("Proc. Conf. X"));
    }

    #[test]
    fn test_reference_defaults() {
        let reference = Reference::new("");
        assert_eq!(reference.year, DEFAULT_YEAR);
        assert!(reference.authors.is_empty());
        assert!(reference.host.is_none());
        assert_eq!(reference.authors_label(), "anonymous");
    }
}
