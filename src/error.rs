//! Contract errors reported by the engine.

/// Errors raised when a caller violates the contract of [`Context`](crate::Context)
/// or hands [`Digest`](crate::Digest) a malformed fingerprint.
///
/// Every variant is detected before the context is touched, so a failed call
/// leaves the hash state exactly as it was.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum Error {
    /// The requested input region does not lie inside the supplied bytes.
    #[error("input region at offset {offset} with length {length} exceeds {available} available bytes")]
    BufferBounds {
        /// Start of the requested region.
        offset: usize,
        /// Length of the requested region.
        length: usize,
        /// Length of the supplied byte slice.
        available: usize,
    },

    /// Fewer than 16 bytes follow `offset` in the output buffer.
    #[error("insufficient space in output buffer at offset {offset} ({available} bytes) to store the digest")]
    InsufficientOutputSpace {
        /// Requested write position.
        offset: usize,
        /// Bytes available from `offset` to the end of the buffer.
        available: usize,
    },

    /// The caller asked for fewer than 16 bytes of output.
    #[error("partial digests not returned (requested {length} bytes)")]
    PartialDigestUnsupported {
        /// Requested output length.
        length: usize,
    },

    /// A textual digest is not 32 hexadecimal digits.
    #[error("invalid hexadecimal digest: {0}")]
    InvalidHex(hex::FromHexError),
}

/// A result whose error type is [`Error`].
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_values() {
        let error = Error::BufferBounds {
            offset: 4,
            length: 10,
            available: 12,
        };
        assert_eq!(
            error.to_string(),
            "input region at offset 4 with length 10 exceeds 12 available bytes"
        );

        let error = Error::InsufficientOutputSpace {
            offset: 8,
            available: 8,
        };
        assert!(error.to_string().contains("insufficient space"));

        let error = Error::PartialDigestUnsupported { length: 15 };
        assert_eq!(error.to_string(), "partial digests not returned (requested 15 bytes)");
    }

    #[test]
    fn hex_errors_are_wrapped() {
        let error = Error::InvalidHex(hex::FromHexError::OddLength);
        assert!(error.to_string().starts_with("invalid hexadecimal digest"));
    }
}
