//! Core data models for bibliographic references.

mod reference;

pub use reference::{
    format_authors, Author, Host, Reference, ReferenceBuilder, ANONYMOUS, DEFAULT_YEAR,
};
