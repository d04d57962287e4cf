//! Bit-packed error code layout.
//!
//! Every generated code packs three fields into one integer:
//!
//! | Field     | Default width | Role                                |
//! |-----------|---------------|-------------------------------------|
//! | module    | 5 bits        | Owning module id                    |
//! | submodule | 5 bits        | Submodule id (0 = module-level)     |
//! | error     | 6 bits        | Error id within the (sub)module     |
//!
//! Packed as `module << (submodule_bits + error_bits)
//! | submodule << error_bits | error`, then published negated so that
//! every generated code is a negative value and 0 stays free for success.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum total width of a packed code.
pub const MAX_CODE_BITS: u8 = 16;

/// Errors from layout construction or field encoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// A field id does not fit its configured width.
    #[error("{field} {value} exceeds the {bits}-bit field width")]
    FieldOverflow {
        field: &'static str,
        value: u32,
        bits: u8,
    },

    /// The configured widths exceed [`MAX_CODE_BITS`] in total.
    #[error("layout is {total} bits wide (maximum {MAX_CODE_BITS})")]
    WidthTooLarge { total: u16 },

    /// A field was configured with zero width.
    #[error("{field} field must be at least 1 bit wide")]
    ZeroWidth { field: &'static str },
}

/// Field widths for packed codes.
///
/// Constructed through [`CodeLayout::new`] (or [`Default`]), which enforces
/// the width invariants that `encode`/`decode` rely on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CodeLayout {
    module_bits: u8,
    submodule_bits: u8,
    error_bits: u8,
}

impl Default for CodeLayout {
    fn default() -> Self {
        Self {
            module_bits: 5,
            submodule_bits: 5,
            error_bits: 6,
        }
    }
}

/// The three fields decoded from a packed code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeFields {
    pub module_id: u32,
    pub submodule_id: u32,
    pub error_id: u32,
}

const fn mask(bits: u8) -> u32 {
    (1u32 << bits) - 1
}

impl CodeLayout {
    /// Creates a layout, rejecting zero-width fields and totals over
    /// [`MAX_CODE_BITS`].
    pub fn new(module_bits: u8, submodule_bits: u8, error_bits: u8) -> Result<Self, LayoutError> {
        for (field, bits) in [
            ("module", module_bits),
            ("submodule", submodule_bits),
            ("error", error_bits),
        ] {
            if bits == 0 {
                return Err(LayoutError::ZeroWidth { field });
            }
        }
        let total = u16::from(module_bits) + u16::from(submodule_bits) + u16::from(error_bits);
        if total > u16::from(MAX_CODE_BITS) {
            return Err(LayoutError::WidthTooLarge { total });
        }
        Ok(Self {
            module_bits,
            submodule_bits,
            error_bits,
        })
    }

    /// Module field width.
    #[must_use]
    pub const fn module_bits(&self) -> u8 {
        self.module_bits
    }

    /// Submodule field width.
    #[must_use]
    pub const fn submodule_bits(&self) -> u8 {
        self.submodule_bits
    }

    /// Error field width.
    #[must_use]
    pub const fn error_bits(&self) -> u8 {
        self.error_bits
    }

    /// Total width of a packed code.
    #[must_use]
    pub const fn total_bits(&self) -> u8 {
        self.module_bits
            .saturating_add(self.submodule_bits)
            .saturating_add(self.error_bits)
    }

    /// Packs the three field ids into a code magnitude.
    pub fn encode(
        &self,
        module_id: u32,
        submodule_id: u32,
        error_id: u32,
    ) -> Result<u32, LayoutError> {
        for (field, value, bits) in [
            ("module id", module_id, self.module_bits),
            ("submodule id", submodule_id, self.submodule_bits),
            ("error id", error_id, self.error_bits),
        ] {
            if value > mask(bits) {
                return Err(LayoutError::FieldOverflow { field, value, bits });
            }
        }

        Ok((module_id << (self.submodule_bits + self.error_bits))
            | (submodule_id << self.error_bits)
            | error_id)
    }

    /// Packs the three field ids into a published (negative) code value.
    pub fn code_value(
        &self,
        module_id: u32,
        submodule_id: u32,
        error_id: u32,
    ) -> Result<crate::catalog::ErrorCode, LayoutError> {
        let packed = self.encode(module_id, submodule_id, error_id)?;
        // Total width is capped at 16 bits, so the magnitude always fits.
        Ok(-(packed as i32))
    }

    /// Splits a code back into its fields.
    ///
    /// Works from the code magnitude, so both the published negative value
    /// and the raw packed form decode identically. Bits above
    /// [`Self::total_bits`] are ignored.
    #[must_use]
    pub fn decode(&self, code: crate::catalog::ErrorCode) -> CodeFields {
        let magnitude = code.unsigned_abs();
        CodeFields {
            module_id: (magnitude >> (self.submodule_bits + self.error_bits))
                & mask(self.module_bits),
            submodule_id: (magnitude >> self.error_bits) & mask(self.submodule_bits),
            error_id: magnitude & mask(self.error_bits),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_widths() {
        let layout = CodeLayout::default();
        assert_eq!(layout.total_bits(), 16);
    }

    #[test]
    fn test_encode_packs_fields() {
        let layout = CodeLayout::default();
        // module 1, submodule 0, error 1 => 1 << 11 | 1
        assert_eq!(layout.encode(1, 0, 1), Ok(0x0801));
        // module 1, submodule 1, error 1 => 1 << 11 | 1 << 6 | 1
        assert_eq!(layout.encode(1, 1, 1), Ok(0x0841));
        assert_eq!(layout.encode(31, 31, 63), Ok(0xffff));
    }

    #[test]
    fn test_code_value_is_negative() {
        let layout = CodeLayout::default();
        assert_eq!(layout.code_value(1, 0, 1), Ok(-0x0801));
        assert_eq!(layout.code_value(31, 31, 63), Ok(-0xffff));
    }

    #[test]
    fn test_encode_rejects_overflowing_fields() {
        let layout = CodeLayout::default();
        assert_eq!(
            layout.encode(32, 0, 1),
            Err(LayoutError::FieldOverflow {
                field: "module id",
                value: 32,
                bits: 5,
            })
        );
        assert_eq!(
            layout.encode(1, 32, 1),
            Err(LayoutError::FieldOverflow {
                field: "submodule id",
                value: 32,
                bits: 5,
            })
        );
        assert_eq!(
            layout.encode(1, 0, 64),
            Err(LayoutError::FieldOverflow {
                field: "error id",
                value: 64,
                bits: 6,
            })
        );
    }

    #[test]
    fn test_layout_construction_limits() {
        assert!(CodeLayout::new(5, 5, 6).is_ok());
        assert!(CodeLayout::new(4, 4, 8).is_ok());
        assert_eq!(
            CodeLayout::new(8, 8, 8),
            Err(LayoutError::WidthTooLarge { total: 24 })
        );
        assert_eq!(
            CodeLayout::new(0, 5, 6),
            Err(LayoutError::ZeroWidth { field: "module" })
        );
    }

    #[test]
    fn test_decode_inverts_encode() {
        let layout = CodeLayout::default();
        let code = layout.code_value(3, 2, 17).unwrap();
        assert_eq!(
            layout.decode(code),
            CodeFields {
                module_id: 3,
                submodule_id: 2,
                error_id: 17,
            }
        );
    }

    #[test]
    fn test_decode_custom_layout() {
        let layout = CodeLayout::new(4, 4, 8).unwrap();
        let code = layout.code_value(15, 15, 255).unwrap();
        assert_eq!(code, -0xffff);
        assert_eq!(
            layout.decode(code),
            CodeFields {
                module_id: 15,
                submodule_id: 15,
                error_id: 255,
            }
        );
    }
}
