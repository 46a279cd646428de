/// Precondition violations raised while decoding an argument tree.
///
/// Unresolvable enumeration codes are never reported here: parsers turn them
/// into placeholder payloads instead.
#[derive(Debug, thiserror::Error)]
pub enum SemanticsError {
    /// A composite has the wrong number of children
    #[error("{role}: expected {expected} child nodes, found {actual}")]
    ArityMismatch {
        role: &'static str,
        expected: usize,
        actual: usize,
    },
    /// A node holds a payload of the wrong shape
    #[error("{role}: expected {expected} payload, found {found}")]
    UnexpectedPayload {
        role: &'static str,
        expected: &'static str,
        found: &'static str,
    },
    #[error("{0} decimals exceed the precision of a 256-bit value")]
    DecimalsOutOfRange(u8),
    /// The tree itself could not be built from its serialized form
    #[error("invalid argument tree: {0}")]
    InvalidTree(String),
    #[error("action {index}: {source}")]
    Action {
        index: usize,
        #[source]
        source: Box<SemanticsError>,
    },
}
