//! field element encoding helpers

use ark_ff::PrimeField;
use num_bigint::BigUint;
use num_traits::Num;

use crate::error::{ConvertError, Result};

pub fn modulus<F: PrimeField>() -> BigUint {
    F::MODULUS.into()
}

/// Decodes a big-endian element, rejecting values outside `[0, modulus)`.
/// `index` is reported in the error.
pub fn decode_element(bytes: &[u8], modulus: &BigUint, index: usize) -> Result<BigUint> {
    let value = BigUint::from_bytes_be(bytes);
    if &value >= modulus {
        return Err(ConvertError::InvalidFieldEncoding { index });
    }
    Ok(value)
}

/// Splits `stream` into `width`-byte chunks and decodes each one in order.
pub fn decode_elements<F: PrimeField>(stream: &[u8], width: usize) -> Result<Vec<BigUint>> {
    if width == 0 || stream.len() % width != 0 {
        return Err(ConvertError::MisalignedElementStream {
            len: stream.len(),
            element_width: width,
        });
    }
    let modulus = modulus::<F>();
    stream
        .chunks_exact(width)
        .enumerate()
        .map(|(index, chunk)| decode_element(chunk, &modulus, index))
        .collect()
}

pub fn to_decimal(value: &BigUint) -> String {
    value.to_str_radix(10)
}

pub fn parse_decimal(decimal: &str) -> Result<BigUint> {
    if decimal.is_empty() || !decimal.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ConvertError::InvalidDecimal(decimal.to_string()));
    }
    BigUint::from_str_radix(decimal, 10)
        .map_err(|_| ConvertError::InvalidDecimal(decimal.to_string()))
}

/// Left-pads the big-endian bytes of `value` to `width`.
pub fn to_fixed_be(value: &BigUint, width: usize) -> Option<Vec<u8>> {
    let bytes = value.to_bytes_be();
    // to_bytes_be yields [0] for zero
    let bytes: &[u8] = if bytes == [0] { &[] } else { &bytes };
    if bytes.len() > width {
        return None;
    }
    let mut out = vec![0u8; width];
    out[width - bytes.len()..].copy_from_slice(bytes);
    Some(out)
}

/// Inverse of decoding: decimal string back to a `width`-byte big-endian
/// element.
pub fn encode_element(decimal: &str, width: usize) -> Result<Vec<u8>> {
    let value = parse_decimal(decimal)?;
    to_fixed_be(&value, width).ok_or_else(|| ConvertError::InvalidDecimal(decimal.to_string()))
}
