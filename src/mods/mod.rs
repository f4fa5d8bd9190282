//! MODS record parsing.
//!
//! A [`ModsParser`] turns a MODS v3 document into a list of [`Reference`]s,
//! one per `mods` element. Optional fields that are missing are normalized to
//! empty values; only a document that fails to parse as XML is an error.
//!
//! ```rust
//! use mods2dot::mods::ModsParser;
//!
//! let xml = r#"<mods xmlns="http://www.loc.gov/mods/v3" ID="r1">
//!   <name><namePart type="family">Doe</namePart></name>
//!   <originInfo><dateIssued>2020-05-01</dateIssued></originInfo>
//! </mods>"#;
//!
//! let references = ModsParser::new().parse_str(xml).unwrap();
//! assert_eq!(references[0].id, "r1");
//! assert_eq!(references[0].year, "2020");
//! ```

pub mod tree;

use std::path::{Path, PathBuf};

use crate::models::{Author, Host, Reference, ReferenceBuilder, DEFAULT_YEAR};

pub use tree::{parse_document, XmlElement};

/// Namespace URI of MODS version 3
pub const MODS_NAMESPACE: &str = "http://www.loc.gov/mods/v3";

/// Errors that can occur while reading a MODS document
#[derive(Debug, thiserror::Error)]
pub enum ModsError {
    /// The document is not well-formed XML
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The document parsed but has an unusable structure
    #[error("Malformed document: {0}")]
    Malformed(String),

    /// The input file could not be read
    #[error("Cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Extracts references from MODS elements
#[derive(Debug, Clone)]
pub struct ModsParser {
    namespace: String,
    default_year: String,
}

impl ModsParser {
    /// Create a parser for the MODS v3 namespace
    pub fn new() -> Self {
        Self {
            namespace: MODS_NAMESPACE.to_string(),
            default_year: DEFAULT_YEAR.to_string(),
        }
    }

    /// Match records in a different namespace (empty for no namespace)
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Year used for records without `originInfo`
    pub fn with_default_year(mut self, year: impl Into<String>) -> Self {
        self.default_year = year.into();
        self
    }

    /// Namespace URI that record elements must carry
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Read and parse a MODS file
    pub fn parse_file(&self, path: &Path) -> Result<Vec<Reference>, ModsError> {
        let content = std::fs::read_to_string(path).map_err(|source| ModsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("Read {} bytes from {}", content.len(), path.display());
        self.parse_str(&content)
    }

    /// Parse a MODS document held in memory
    pub fn parse_str(&self, content: &str) -> Result<Vec<Reference>, ModsError> {
        let root = parse_document(content)?;
        Ok(self.parse_tree(&root))
    }

    /// Collect a reference for every record element in the tree, in document order
    pub fn parse_tree(&self, root: &XmlElement) -> Vec<Reference> {
        let references: Vec<Reference> = root
            .descendants()
            .filter_map(|element| self.parse_record(element))
            .collect();
        tracing::debug!("Found {} MODS records", references.len());
        references
    }

    /// Build a reference from one record element.
    ///
    /// Returns `None` when the element is not a `mods` record.
    pub fn parse_record(&self, element: &XmlElement) -> Option<Reference> {
        if !element.is(&self.namespace, "mods") {
            tracing::trace!("Skipping <{}>: not a MODS record", element.local_name);
            return None;
        }

        let mut builder = ReferenceBuilder::new(element.attr("ID").unwrap_or_default())
            .year(self.parse_year(element));

        if let Some(title_info) = element.find(&self.namespace, "titleInfo") {
            builder = builder.title(self.title_of(title_info));
            if let Some(subtitle) = title_info.find_text(&self.namespace, "subTitle") {
                builder = builder.subtitle(subtitle);
            }
        }

        let authors = element
            .children_named(&self.namespace, "name")
            .map(|name| self.parse_name(name))
            .collect();
        builder = builder.authors(authors);

        if let Some(publisher) = element
            .find(&self.namespace, "originInfo")
            .and_then(|origin| origin.find_text(&self.namespace, "publisher"))
        {
            builder = builder.publisher(publisher);
        }

        if let Some(host) = self.parse_host(element) {
            builder = builder.host(host);
        }

        let reference = builder.build();
        tracing::debug!(
            id = %reference.id,
            authors = reference.authors.len(),
            year = %reference.year,
            "Parsed MODS record"
        );
        Some(reference)
    }

    /// Text of `titleInfo/title`, empty when missing
    fn title_of(&self, title_info: &XmlElement) -> String {
        title_info
            .find_text(&self.namespace, "title")
            .unwrap_or_default()
            .to_string()
    }

    /// One author from a `name` element; name parts may be split over several elements
    fn parse_name(&self, name: &XmlElement) -> Author {
        let mut given = String::new();
        let mut family = String::new();
        for part in &name.children {
            match part.attr("type") {
                Some("given") => given.push_str(&part.text),
                Some("family") => family.push_str(&part.text),
                _ => {}
            }
        }
        Author::new(given, family)
    }

    /// Year from `originInfo/dateIssued`, keeping the part before the first '-'
    fn parse_year(&self, record: &XmlElement) -> String {
        let Some(origin) = record.find(&self.namespace, "originInfo") else {
            return self.default_year.clone();
        };
        match origin.find_text(&self.namespace, "dateIssued") {
            Some(date) => date.split('-').next().unwrap_or_default().to_string(),
            None => String::new(),
        }
    }

    /// Host publication from `relatedItem[@type="host"]`
    fn parse_host(&self, record: &XmlElement) -> Option<Host> {
        let related = record
            .children_named(&self.namespace, "relatedItem")
            .find(|item| item.attr("type") == Some("host"))?;

        let title = related
            .find(&self.namespace, "titleInfo")
            .map(|title_info| self.title_of(title_info))
            .unwrap_or_default();
        // Repeated genres: the last one wins
        let genre = related
            .children_named(&self.namespace, "genre")
            .last()
            .map(|genre| genre.text.as_str())
            .unwrap_or_default();

        Some(Host::new(title, genre))
    }
}

impl Default for ModsParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a MODS v3 document with the default settings
pub fn parse_mods(content: &str) -> Result<Vec<Reference>, ModsError> {
    ModsParser::new().parse_str(content)
}
