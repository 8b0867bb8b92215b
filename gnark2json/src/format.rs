//! serialization format constants for gnark public witnesses

use ark_ff::PrimeField;

/// gnark writes three big-endian u32 before the vector: number of public
/// inputs, number of secret inputs (always zero in a public witness) and the
/// vector length.
pub const GNARK_WITNESS_HEADER_LEN: usize = 12;

/// Byte width of a BN254 scalar field element.
pub const BN254_FR_BYTES: usize = 32;

/// Layout of a binary public witness: `header_len` bytes of metadata followed
/// by `element_width`-byte field elements.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct WitnessFormat {
    pub header_len: usize,
    pub element_width: usize,
}

impl WitnessFormat {
    /// gnark >= 0.9 witness encoding over the BN254 scalar field.
    pub const GNARK_BN254: Self = Self {
        header_len: GNARK_WITNESS_HEADER_LEN,
        element_width: BN254_FR_BYTES,
    };

    pub const fn new(header_len: usize, element_width: usize) -> Self {
        Self {
            header_len,
            element_width,
        }
    }

    /// gnark header with the element width derived from the field's modulus.
    pub fn for_field<F: PrimeField>() -> Self {
        Self::new(GNARK_WITNESS_HEADER_LEN, field_byte_width::<F>())
    }
}

impl Default for WitnessFormat {
    fn default() -> Self {
        Self::GNARK_BN254
    }
}

pub fn field_byte_width<F: PrimeField>() -> usize {
    (F::MODULUS_BIT_SIZE as usize + 7) / 8
}
