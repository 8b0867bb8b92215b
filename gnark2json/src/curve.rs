//! affine points in gnark's raw (uncompressed) encoding

use std::fmt;
use std::str::FromStr;

use num_bigint::BigUint;
use serde::{Serialize, Serializer};

use crate::encoding::{decode_element, modulus, to_decimal, to_fixed_be};
use crate::error::{ConvertError, Result};
use crate::format::field_byte_width;

/// Pairing curves gnark can write Groth16 artifacts for.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Curve {
    #[default]
    Bn254,
    Bls12_381,
}

impl Curve {
    pub fn name(self) -> &'static str {
        match self {
            Self::Bn254 => "Bn254",
            Self::Bls12_381 => "Bls12_381",
        }
    }

    /// Byte width of a base field coordinate.
    pub fn fq_bytes(self) -> usize {
        match self {
            Self::Bn254 => field_byte_width::<ark_bn254::Fq>(),
            Self::Bls12_381 => field_byte_width::<ark_bls12_381::Fq>(),
        }
    }

    pub fn fq_modulus(self) -> BigUint {
        match self {
            Self::Bn254 => modulus::<ark_bn254::Fq>(),
            Self::Bls12_381 => modulus::<ark_bls12_381::Fq>(),
        }
    }

    pub fn g1_raw_bytes(self) -> usize {
        2 * self.fq_bytes()
    }

    pub fn g2_raw_bytes(self) -> usize {
        4 * self.fq_bytes()
    }

    // gnark keeps its encoding flags in the spare top bits of the first byte:
    // two on BN254 (254-bit Fq), three on BLS12-381 (381-bit Fq).
    fn flag_mask(self) -> u8 {
        match self {
            Self::Bn254 => 0b11 << 6,
            Self::Bls12_381 => 0b111 << 5,
        }
    }

    /// Flag marking an uncompressed point at infinity. BN254 writes infinity
    /// as plain zero bytes.
    fn uncompressed_infinity_flag(self) -> Option<u8> {
        match self {
            Self::Bn254 => None,
            Self::Bls12_381 => Some(0b010 << 5),
        }
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Curve {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "bn254" | "bn128" => Ok(Self::Bn254),
            "bls12381" => Ok(Self::Bls12_381),
            _ => Err(ConvertError::UnsupportedCurve(s.to_string())),
        }
    }
}

/// Cursor over a byte slice.
pub struct ByteReader<'a> {
    bytes: &'a [u8],
}

impl<'a> ByteReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len()
    }

    pub fn read_slice(&mut self, len: usize) -> Result<&'a [u8]> {
        if self.bytes.len() < len {
            return Err(ConvertError::UnexpectedEof {
                needed: len,
                remaining: self.bytes.len(),
            });
        }
        let (head, tail) = self.bytes.split_at(len);
        self.bytes = tail;
        Ok(head)
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_slice(N)?);
        Ok(out)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(u32::from_be_bytes(self.read_array()?))
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        Ok(u64::from_be_bytes(self.read_array()?))
    }

    /// Reads a u32 length prefix followed by that many items.
    pub fn read_vec<T>(&mut self, mut read: impl FnMut(&mut Self) -> Result<T>) -> Result<Vec<T>> {
        let len = self.read_u32()? as usize;
        // cap the preallocation, the prefix is untrusted
        let mut out = Vec::with_capacity(len.min(self.remaining()));
        for _ in 0..len {
            out.push(read(self)?);
        }
        Ok(out)
    }

    pub fn finish(self) -> Result<()> {
        if self.bytes.is_empty() {
            Ok(())
        } else {
            Err(ConvertError::TrailingBytes(self.bytes.len()))
        }
    }
}

fn decimal<S: Serializer>(value: &BigUint, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&to_decimal(value))
}

fn read_coordinates<const N: usize>(
    reader: &mut ByteReader<'_>,
    curve: Curve,
) -> Result<[BigUint; N]> {
    let width = curve.fq_bytes();
    let raw = reader.read_slice(N * width)?;
    let flags = raw.first().map_or(0, |b| b & curve.flag_mask());
    let mut out: [BigUint; N] = std::array::from_fn(|_| BigUint::default());
    if flags != 0 {
        if Some(flags) != curve.uncompressed_infinity_flag() {
            return Err(ConvertError::CompressedPoint);
        }
        let body_is_zero = raw[0] & !curve.flag_mask() == 0 && raw[1..].iter().all(|b| *b == 0);
        if !body_is_zero {
            return Err(ConvertError::InvalidFieldEncoding { index: 0 });
        }
        return Ok(out);
    }
    let modulus = curve.fq_modulus();
    for (index, (slot, chunk)) in out.iter_mut().zip(raw.chunks_exact(width)).enumerate() {
        *slot = decode_element(chunk, &modulus, index)?;
    }
    Ok(out)
}

/// Big-endian coordinate, rejecting values that are not below the modulus.
fn coordinate_bytes(value: &BigUint, curve: Curve, index: usize) -> Result<Vec<u8>> {
    if value >= &curve.fq_modulus() {
        return Err(ConvertError::InvalidFieldEncoding { index });
    }
    to_fixed_be(value, curve.fq_bytes()).ok_or(ConvertError::InvalidFieldEncoding { index })
}

fn raw_bytes(coordinates: &[&BigUint], curve: Curve) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(coordinates.len() * curve.fq_bytes());
    for (index, c) in coordinates.iter().enumerate() {
        out.extend(coordinate_bytes(c, curve, index)?);
    }
    Ok(out)
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct G1Point {
    #[serde(rename = "X", serialize_with = "decimal")]
    pub x: BigUint,
    #[serde(rename = "Y", serialize_with = "decimal")]
    pub y: BigUint,
}

impl G1Point {
    pub fn read(reader: &mut ByteReader<'_>, curve: Curve) -> Result<Self> {
        let [x, y] = read_coordinates::<2>(reader, curve)?;
        Ok(Self { x, y })
    }

    pub fn is_infinity(&self) -> bool {
        self.x == BigUint::default() && self.y == BigUint::default()
    }

    /// `X || Y`, big-endian.
    pub fn to_raw_bytes(&self, curve: Curve) -> Result<Vec<u8>> {
        raw_bytes(&[&self.x, &self.y], curve)
    }
}

/// Element of the quadratic extension, `A0 + A1 * u`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Fq2 {
    #[serde(rename = "A0", serialize_with = "decimal")]
    pub a0: BigUint,
    #[serde(rename = "A1", serialize_with = "decimal")]
    pub a1: BigUint,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct G2Point {
    #[serde(rename = "X")]
    pub x: Fq2,
    #[serde(rename = "Y")]
    pub y: Fq2,
}

impl G2Point {
    /// gnark writes `X.A1 || X.A0 || Y.A1 || Y.A0`.
    pub fn read(reader: &mut ByteReader<'_>, curve: Curve) -> Result<Self> {
        let [x_a1, x_a0, y_a1, y_a0] = read_coordinates::<4>(reader, curve)?;
        Ok(Self {
            x: Fq2 { a0: x_a0, a1: x_a1 },
            y: Fq2 { a0: y_a0, a1: y_a1 },
        })
    }

    pub fn to_raw_bytes(&self, curve: Curve) -> Result<Vec<u8>> {
        raw_bytes(&[&self.x.a1, &self.x.a0, &self.y.a1, &self.y.a0], curve)
    }
}
