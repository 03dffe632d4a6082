//! Structural units: whole domain-meaningful spans prior to size splitting

/// A whole semantic span of the source document (one email message, one
/// slide) as detected by the boundary detector.
///
/// Unit number 0 is reserved for header/preamble content appearing before
/// the first structural marker. Units are scoped to a single chunking call
/// and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuralUnit {
    /// Sequence position; 0 means preamble before the first marker
    pub unit_number: usize,
    /// Raw text span between this unit's start boundary and the next
    pub content: String,
}

impl StructuralUnit {
    /// Create a unit
    pub fn new(unit_number: usize, content: impl Into<String>) -> Self {
        Self {
            unit_number,
            content: content.into(),
        }
    }
}
