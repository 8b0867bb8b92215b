//! gnark public witness decoding
//!
//! A gnark public witness is written as
//!
//! | number of public |  4 bytes  |
//! | number of secret |  4 bytes  |
//! | number of vector |  4 bytes  |
//! | vector of fr     |  32 bytes for each |
//!
//! Only the vector is exported. The header is parsed for diagnostics but the
//! element count is always taken from the byte length.

use std::fs;
use std::path::Path;

use ark_bn254::Fr;
use ark_ff::PrimeField;
use tracing::{debug, warn};

use crate::encoding::{decode_elements, to_decimal};
use crate::error::{ConvertError, Result};
use crate::format::{WitnessFormat, GNARK_WITNESS_HEADER_LEN};

/// Decodes a binary public witness into decimal strings, one per element, in
/// the order they appear in the blob.
pub fn decode_public_witness<F: PrimeField>(
    blob: &[u8],
    format: &WitnessFormat,
) -> Result<Vec<String>> {
    if blob.len() < format.header_len {
        return Err(ConvertError::MalformedWitness {
            len: blob.len(),
            header_len: format.header_len,
        });
    }
    let stream = &blob[format.header_len..];
    let values = decode_elements::<F>(stream, format.element_width)?;
    Ok(values.iter().map(to_decimal).collect())
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct WitnessHeader {
    pub nb_public: u32,
    pub nb_secret: u32,
    pub vector_len: u32,
}

impl WitnessHeader {
    pub fn parse(blob: &[u8]) -> Option<Self> {
        let word = |i: usize| -> Option<u32> {
            let bytes = blob.get(i * 4..i * 4 + 4)?;
            Some(u32::from_be_bytes(bytes.try_into().ok()?))
        };
        Some(Self {
            nb_public: word(0)?,
            nb_secret: word(1)?,
            vector_len: word(2)?,
        })
    }
}

/// A binary public witness as produced by gnark's `MarshalBinary`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicWitness {
    bytes: Vec<u8>,
    format: WitnessFormat,
}

impl PublicWitness {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self::with_format(bytes, WitnessFormat::GNARK_BN254)
    }

    pub fn with_format(bytes: Vec<u8>, format: WitnessFormat) -> Self {
        Self { bytes, format }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)?;
        debug!(path = %path.display(), len = bytes.len(), "read public witness");
        Ok(Self::from_bytes(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn format(&self) -> WitnessFormat {
        self.format
    }

    /// Parsed gnark header, or `None` if the blob is shorter than the header.
    pub fn header(&self) -> Option<WitnessHeader> {
        if self.format.header_len != GNARK_WITNESS_HEADER_LEN {
            return None;
        }
        WitnessHeader::parse(&self.bytes)
    }

    /// The public input vector over the BN254 scalar field.
    pub fn public_vector(&self) -> Result<Vec<String>> {
        self.public_vector_in::<Fr>()
    }

    pub fn public_vector_in<F: PrimeField>(&self) -> Result<Vec<String>> {
        let vector = decode_public_witness::<F>(&self.bytes, &self.format)?;
        if let Some(header) = self.header() {
            if header.vector_len as usize != vector.len() {
                warn!(
                    header_vector_len = header.vector_len,
                    decoded_len = vector.len(),
                    "witness header disagrees with element count"
                );
            }
        }
        debug!(elements = vector.len(), "decoded public witness");
        Ok(vector)
    }
}
