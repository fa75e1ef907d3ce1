//! Error types for lattice operations.

/// Errors that can occur while describing or indexing a lattice.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum SpatialError {
    /// Every lattice dimension must be strictly positive.
    #[error("invalid lattice dimensions: {x}x{y}x{z} (all components must be positive)")]
    InvalidDimensions {
        /// Extent along X.
        x: i32,
        /// Extent along Y.
        y: i32,
        /// Extent along Z.
        z: i32,
    },

    /// The identifiers of a lattice this large do not fit in 64 bits.
    #[error("lattice dimensions {x}x{y}x{z} exceed the 64-bit identifier space")]
    IdSpaceOverflow {
        /// Extent along X.
        x: i32,
        /// Extent along Y.
        y: i32,
        /// Extent along Z.
        z: i32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_dimensions_display() {
        let err = SpatialError::InvalidDimensions { x: 0, y: 2, z: 3 };
        assert!(err.to_string().contains("0x2x3"));
    }

    #[test]
    fn test_id_space_overflow_display() {
        let err = SpatialError::IdSpaceOverflow { x: 1 << 22, y: 1, z: 1 };
        assert!(err.to_string().contains("4194304x1x1"));
        assert!(err.to_string().contains("64-bit"));
    }
}
