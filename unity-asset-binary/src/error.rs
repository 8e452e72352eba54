//! Error types for Unity binary parsing

use thiserror::Error;

/// Result type for Unity binary operations
pub type Result<T> = std::result::Result<T, BinaryError>;

/// Errors that can occur during Unity binary parsing
#[derive(Error, Debug)]
pub enum BinaryError {
    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid file format
    #[error("Invalid file format: {0}")]
    InvalidFormat(String),

    /// Unsupported file version
    #[error("Unsupported file version: {0}")]
    UnsupportedVersion(String),

    /// Unsupported compression format
    #[error("Unsupported compression: {0}")]
    UnsupportedCompression(String),

    /// Decompression failed
    #[error("Decompression failed: {0}")]
    DecompressionFailed(String),

    /// Invalid data
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Parsing error
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Not enough data
    #[error("Not enough data: expected {expected}, got {actual}")]
    NotEnoughData { expected: usize, actual: usize },

    /// Invalid signature
    #[error("Invalid signature: expected {expected}, got {actual}")]
    InvalidSignature { expected: String, actual: String },

    /// Unsupported feature
    #[error("Unsupported feature: {0}")]
    Unsupported(String),

    /// Memory allocation error
    #[error("Memory allocation error: {0}")]
    MemoryError(String),

    /// Timeout error
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// Resource limit exceeded
    #[error("Resource limit exceeded: {0}")]
    ResourceLimitExceeded(String),

    /// Corrupted data
    #[error("Corrupted data detected: {0}")]
    CorruptedData(String),

    /// Version compatibility error
    #[error("Version compatibility error: {0}")]
    VersionCompatibility(String),

    /// Generic error with context
    #[error("Error: {0}")]
    Generic(String),

    /// Truncated input: a read ran past the end of the available bytes.
    #[error("truncated input: {0}")]
    Truncated(String),

    /// A magic/signature value didn't match anything this crate recognizes.
    #[error("invalid magic: {0}")]
    InvalidMagic(String),

    /// A compression codec failed to produce its declared output size.
    #[error("compression failure ({codec}): {message}")]
    CompressionFailure { codec: String, message: String },

    /// A field was not aligned the way the format requires.
    #[error("alignment violation at offset {offset} (expected {alignment}-byte alignment)")]
    AlignmentViolation { offset: u64, alignment: u64 },

    /// A string field was not valid UTF-8.
    #[error("invalid UTF-8: {0}")]
    Utf8(String),

    /// An offset/length pair fell outside the bounds of its buffer.
    #[error("bounds violation: {0}")]
    BoundsViolation(String),

    /// A PPtr/path_id reference pointed at an object that doesn't exist.
    #[error("cross-reference missing: {kind}")]
    CrossReferenceMissing { kind: String },

    /// Tolerant probing could not decide between candidate decodes.
    #[error("ambiguous probe: {0}")]
    ProbeAmbiguous(String),

    /// A Mesh object used a layout this decoder doesn't support.
    #[error("unsupported mesh layout: {0}")]
    MeshUnsupported(String),

    /// Decode was aborted by the caller's cancellation probe.
    #[error("decode cancelled")]
    Cancelled,
}

impl BinaryError {
    /// Create a new invalid format error
    pub fn invalid_format<S: Into<String>>(msg: S) -> Self {
        Self::InvalidFormat(msg.into())
    }

    /// Create a generic error (for compatibility)
    pub fn format<S: Into<String>>(msg: S) -> Self {
        Self::Generic(msg.into())
    }

    /// Create a new unsupported version error
    pub fn unsupported_version<S: Into<String>>(version: S) -> Self {
        Self::UnsupportedVersion(version.into())
    }

    /// Create a new unsupported compression error
    pub fn unsupported_compression<S: Into<String>>(compression: S) -> Self {
        Self::UnsupportedCompression(compression.into())
    }

    /// Create a new decompression failed error
    pub fn decompression_failed<S: Into<String>>(msg: S) -> Self {
        Self::DecompressionFailed(msg.into())
    }

    /// Create a new invalid data error
    pub fn invalid_data<S: Into<String>>(msg: S) -> Self {
        Self::InvalidData(msg.into())
    }

    /// Create a new parse error
    pub fn parse_error<S: Into<String>>(msg: S) -> Self {
        Self::ParseError(msg.into())
    }

    /// Create a new not enough data error
    pub fn not_enough_data(expected: usize, actual: usize) -> Self {
        Self::NotEnoughData { expected, actual }
    }

    /// Create a new invalid signature error
    pub fn invalid_signature<S: Into<String>>(expected: S, actual: S) -> Self {
        Self::InvalidSignature {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create a new unsupported feature error
    pub fn unsupported<S: Into<String>>(feature: S) -> Self {
        Self::Unsupported(feature.into())
    }

    /// Create a new generic error
    pub fn generic<S: Into<String>>(msg: S) -> Self {
        Self::Generic(msg.into())
    }

    /// Create a new I/O error (alias for generic)
    pub fn io_error<S: Into<String>>(msg: S) -> Self {
        Self::Generic(msg.into())
    }

    /// Create a truncated-input error
    pub fn truncated<S: Into<String>>(msg: S) -> Self {
        Self::Truncated(msg.into())
    }

    /// Create an invalid-magic error
    pub fn invalid_magic<S: Into<String>>(msg: S) -> Self {
        Self::InvalidMagic(msg.into())
    }

    /// Create a compression-failure error naming the codec
    pub fn compression_failure<C: Into<String>, M: Into<String>>(codec: C, message: M) -> Self {
        Self::CompressionFailure {
            codec: codec.into(),
            message: message.into(),
        }
    }

    /// Create an alignment-violation error
    pub fn alignment_violation(offset: u64, alignment: u64) -> Self {
        Self::AlignmentViolation { offset, alignment }
    }

    /// Create a bounds-violation error
    pub fn bounds_violation<S: Into<String>>(msg: S) -> Self {
        Self::BoundsViolation(msg.into())
    }

    /// Create a cross-reference-missing error naming the referenced kind
    pub fn cross_reference_missing<S: Into<String>>(kind: S) -> Self {
        Self::CrossReferenceMissing { kind: kind.into() }
    }

    /// Create an ambiguous-probe error
    pub fn probe_ambiguous<S: Into<String>>(msg: S) -> Self {
        Self::ProbeAmbiguous(msg.into())
    }

    /// Create an unsupported-mesh-layout error
    pub fn mesh_unsupported<S: Into<String>>(msg: S) -> Self {
        Self::MeshUnsupported(msg.into())
    }

    /// Create a cancellation error
    pub fn cancelled() -> Self {
        Self::Cancelled
    }
}

// Conversion from other error types
impl From<lz4_flex::block::DecompressError> for BinaryError {
    fn from(err: lz4_flex::block::DecompressError) -> Self {
        Self::decompression_failed(format!("LZ4 decompression failed: {}", err))
    }
}

impl From<lz4_flex::frame::Error> for BinaryError {
    fn from(err: lz4_flex::frame::Error) -> Self {
        Self::decompression_failed(format!("LZ4 frame error: {}", err))
    }
}

impl From<std::string::FromUtf8Error> for BinaryError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        Self::invalid_data(format!("Invalid UTF-8 string: {}", err))
    }
}

impl From<std::str::Utf8Error> for BinaryError {
    fn from(err: std::str::Utf8Error) -> Self {
        Self::invalid_data(format!("Invalid UTF-8 string: {}", err))
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Low severity - can be ignored
    Low,
    /// Medium severity - should be logged
    Medium,
    /// High severity - requires attention
    High,
    /// Critical severity - operation cannot continue
    Critical,
}

impl BinaryError {
    /// Create a memory error
    pub fn memory_error(msg: impl Into<String>) -> Self {
        BinaryError::MemoryError(msg.into())
    }

    /// Create a timeout error
    pub fn timeout(msg: impl Into<String>) -> Self {
        BinaryError::Timeout(msg.into())
    }

    /// Create a corrupted data error
    pub fn corrupted_data(msg: impl Into<String>) -> Self {
        BinaryError::CorruptedData(msg.into())
    }

    /// Create a version compatibility error
    pub fn version_compatibility(msg: impl Into<String>) -> Self {
        BinaryError::VersionCompatibility(msg.into())
    }

    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            BinaryError::Io(_) => false,
            BinaryError::InvalidFormat(_) => false,
            BinaryError::UnsupportedVersion(_) => false,
            BinaryError::UnsupportedCompression(_) => true, // Might try different compression
            BinaryError::DecompressionFailed(_) => true,    // Might retry or skip
            BinaryError::InvalidData(_) => true,            // Might skip corrupted object
            BinaryError::ParseError(_) => true,             // Might skip problematic object
            BinaryError::NotEnoughData { .. } => false,
            BinaryError::InvalidSignature { .. } => false,
            BinaryError::Unsupported(_) => true, // Might skip unsupported feature
            BinaryError::MemoryError(_) => false,
            BinaryError::Timeout(_) => true, // Might retry
            BinaryError::ResourceLimitExceeded(_) => true, // Might reduce limits
            BinaryError::CorruptedData(_) => true, // Might skip corrupted section
            BinaryError::VersionCompatibility(_) => true, // Might use compatibility mode
            BinaryError::Generic(_) => true, // Generic errors are usually recoverable
            BinaryError::Truncated(_) => false,
            BinaryError::InvalidMagic(_) => false,
            BinaryError::CompressionFailure { .. } => false,
            BinaryError::AlignmentViolation { .. } => true, // skip the offending field
            BinaryError::Utf8(_) => true,                  // skip the offending string
            BinaryError::BoundsViolation(_) => true,        // skip the offending object
            BinaryError::CrossReferenceMissing { .. } => true, // drop the dangling reference
            BinaryError::ProbeAmbiguous(_) => true,         // skip the ambiguous object
            BinaryError::MeshUnsupported(_) => true,        // omit the mesh, keep decoding
            BinaryError::Cancelled => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            BinaryError::Io(_) => ErrorSeverity::Critical,
            BinaryError::InvalidFormat(_) => ErrorSeverity::Critical,
            BinaryError::UnsupportedVersion(_) => ErrorSeverity::High,
            BinaryError::UnsupportedCompression(_) => ErrorSeverity::Medium,
            BinaryError::DecompressionFailed(_) => ErrorSeverity::Medium,
            BinaryError::InvalidData(_) => ErrorSeverity::Medium,
            BinaryError::ParseError(_) => ErrorSeverity::Medium,
            BinaryError::NotEnoughData { .. } => ErrorSeverity::High,
            BinaryError::InvalidSignature { .. } => ErrorSeverity::High,
            BinaryError::Unsupported(_) => ErrorSeverity::Low,
            BinaryError::MemoryError(_) => ErrorSeverity::Critical,
            BinaryError::Timeout(_) => ErrorSeverity::Medium,
            BinaryError::ResourceLimitExceeded(_) => ErrorSeverity::Medium,
            BinaryError::CorruptedData(_) => ErrorSeverity::Medium,
            BinaryError::VersionCompatibility(_) => ErrorSeverity::Low,
            BinaryError::Generic(_) => ErrorSeverity::Medium,
            BinaryError::Truncated(_) => ErrorSeverity::Critical,
            BinaryError::InvalidMagic(_) => ErrorSeverity::Critical,
            BinaryError::CompressionFailure { .. } => ErrorSeverity::High,
            BinaryError::AlignmentViolation { .. } => ErrorSeverity::Medium,
            BinaryError::Utf8(_) => ErrorSeverity::Low,
            BinaryError::BoundsViolation(_) => ErrorSeverity::Medium,
            BinaryError::CrossReferenceMissing { .. } => ErrorSeverity::Low,
            BinaryError::ProbeAmbiguous(_) => ErrorSeverity::Low,
            BinaryError::MeshUnsupported(_) => ErrorSeverity::Medium,
            BinaryError::Cancelled => ErrorSeverity::Low,
        }
    }

    /// Get suggested recovery action
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            BinaryError::UnsupportedCompression(_) => Some("Try different compression method"),
            BinaryError::DecompressionFailed(_) => Some("Skip compressed section or retry"),
            BinaryError::InvalidData(_) => Some("Skip corrupted object and continue"),
            BinaryError::ParseError(_) => Some("Skip problematic object and continue"),
            BinaryError::Unsupported(_) => Some("Skip unsupported feature"),
            BinaryError::Timeout(_) => Some("Retry with longer timeout"),
            BinaryError::ResourceLimitExceeded(_) => Some("Reduce processing limits"),
            BinaryError::CorruptedData(_) => Some("Skip corrupted section"),
            BinaryError::VersionCompatibility(_) => Some("Enable compatibility mode"),
            BinaryError::AlignmentViolation { .. } => Some("Skip the misaligned field"),
            BinaryError::Utf8(_) => Some("Skip the offending string"),
            BinaryError::BoundsViolation(_) => Some("Skip the offending object"),
            BinaryError::CrossReferenceMissing { .. } => Some("Drop the dangling reference"),
            BinaryError::ProbeAmbiguous(_) => Some("Skip the ambiguous object"),
            BinaryError::MeshUnsupported(_) => Some("Omit the mesh and continue"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = BinaryError::invalid_format("test format");
        assert!(matches!(err, BinaryError::InvalidFormat(_)));
        assert_eq!(err.to_string(), "Invalid file format: test format");
    }

    #[test]
    fn test_not_enough_data_error() {
        let err = BinaryError::not_enough_data(100, 50);
        assert!(matches!(err, BinaryError::NotEnoughData { .. }));
        assert_eq!(err.to_string(), "Not enough data: expected 100, got 50");
    }

    #[test]
    fn test_invalid_signature_error() {
        let err = BinaryError::invalid_signature("UnityFS", "UnityWeb");
        assert!(matches!(err, BinaryError::InvalidSignature { .. }));
        assert_eq!(
            err.to_string(),
            "Invalid signature: expected UnityFS, got UnityWeb"
        );
    }
}
