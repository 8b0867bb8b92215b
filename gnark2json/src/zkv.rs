//! zkVerify Groth16 encoding
//!
//! zkVerify takes points as `0x`-prefixed hex of the uncompressed encoding
//! with every base field coordinate in the curve's byte order (little-endian
//! for BN254, big-endian for BLS12-381), and public inputs as 32-byte
//! little-endian scalars.

use serde::Serialize;

use crate::curve::{Curve, G1Point, G2Point};
use crate::encoding::{parse_decimal, to_fixed_be};
use crate::error::{ConvertError, Result};
use crate::format::BN254_FR_BYTES;
use crate::proof::Groth16Proof;
use crate::vk::Groth16VerifyingKey;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ZkvProof {
    pub a: String,
    pub b: String,
    pub c: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZkvVerifyingKey {
    pub curve: String,
    pub alpha_g1: String,
    pub beta_g2: String,
    pub gamma_g2: String,
    pub delta_g2: String,
    pub gamma_abc_g1: Vec<String>,
}

fn to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Reverses every `chunk`-byte coordinate of a big-endian encoding.
fn to_little_endian(mut bytes: Vec<u8>, chunk: usize) -> Vec<u8> {
    for c in bytes.chunks_mut(chunk) {
        c.reverse();
    }
    bytes
}

/// Puts gnark's big-endian point bytes in zkVerify's order for `curve`,
/// `chunk` being the width of one coordinate.
fn point_hex(raw: Vec<u8>, curve: Curve, chunk: usize) -> String {
    match curve {
        Curve::Bn254 => to_hex(&to_little_endian(raw, chunk)),
        Curve::Bls12_381 => to_hex(&raw),
    }
}

pub fn g1_to_hex(point: &G1Point, curve: Curve) -> Result<String> {
    Ok(point_hex(point.to_raw_bytes(curve)?, curve, curve.fq_bytes()))
}

/// Each G2 coordinate is an Fq2 element `A1 || A0` in big-endian form. On
/// BN254 reversing it whole gives `A0 || A1` with both halves little-endian.
pub fn g2_to_hex(point: &G2Point, curve: Curve) -> Result<String> {
    Ok(point_hex(point.to_raw_bytes(curve)?, curve, 2 * curve.fq_bytes()))
}

pub fn convert_proof(proof: &Groth16Proof, curve: Curve) -> Result<ZkvProof> {
    Ok(ZkvProof {
        a: g1_to_hex(&proof.ar, curve)?,
        b: g2_to_hex(&proof.bs, curve)?,
        c: g1_to_hex(&proof.krs, curve)?,
    })
}

pub fn convert_vk(vk: &Groth16VerifyingKey, curve: Curve) -> Result<ZkvVerifyingKey> {
    Ok(ZkvVerifyingKey {
        curve: curve.name().to_string(),
        alpha_g1: g1_to_hex(&vk.g1.alpha, curve)?,
        beta_g2: g2_to_hex(&vk.g2.beta, curve)?,
        gamma_g2: g2_to_hex(&vk.g2.gamma, curve)?,
        delta_g2: g2_to_hex(&vk.g2.delta, curve)?,
        gamma_abc_g1: vk
            .g1
            .k
            .iter()
            .map(|p| g1_to_hex(p, curve))
            .collect::<Result<_>>()?,
    })
}

/// Converts a decoded public vector (decimal strings) to little-endian hex
/// scalars.
pub fn convert_pubs<S: AsRef<str>>(inputs: &[S]) -> Result<Vec<String>> {
    inputs
        .iter()
        .map(|input| {
            let input = input.as_ref();
            let value = parse_decimal(input)?;
            let bytes = to_fixed_be(&value, BN254_FR_BYTES)
                .ok_or_else(|| ConvertError::InvalidDecimal(input.to_string()))?;
            Ok(to_hex(&to_little_endian(bytes, BN254_FR_BYTES)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::Fq2;
    use crate::proof::tests::PROOF_WITH_COMMITMENT;
    use crate::vk::tests::{legacy_vk_bytes, legacy_vk_bytes_on};
    use num_bigint::BigUint;

    fn small_g2() -> G2Point {
        G2Point {
            x: Fq2 {
                a0: BigUint::from(1u32),
                a1: BigUint::from(2u32),
            },
            y: Fq2 {
                a0: BigUint::from(3u32),
                a1: BigUint::from(4u32),
            },
        }
    }

    #[test]
    fn test_pubs_little_endian() {
        let pubs = convert_pubs(&["1", "256"]).unwrap();
        assert_eq!(pubs[0], format!("0x01{}", "00".repeat(31)));
        assert_eq!(pubs[1], format!("0x0001{}", "00".repeat(30)));
    }

    #[test]
    fn test_pubs_rejects_bad_input() {
        assert!(convert_pubs(&["abc"]).is_err());
        let too_wide = BigUint::from(1u32) << 256usize;
        assert!(convert_pubs(&[too_wide.to_string()]).is_err());
    }

    #[test]
    fn test_g1_hex() {
        let p = G1Point {
            x: BigUint::from(1u32),
            y: BigUint::from(2u32),
        };
        let expected = format!("0x01{}02{}", "00".repeat(31), "00".repeat(31));
        assert_eq!(g1_to_hex(&p, Curve::Bn254).unwrap(), expected);
    }

    #[test]
    fn test_g1_hex_bls12_381_is_big_endian() {
        let p = G1Point {
            x: BigUint::from(1u32),
            y: BigUint::from(2u32),
        };
        let expected = format!("0x{}01{}02", "00".repeat(47), "00".repeat(47));
        assert_eq!(g1_to_hex(&p, Curve::Bls12_381).unwrap(), expected);
    }

    #[test]
    fn test_g1_hex_rejects_unencodable_point() {
        let p = G1Point {
            x: BigUint::from(1u32) << 256usize,
            y: BigUint::from(2u32),
        };
        assert!(matches!(
            g1_to_hex(&p, Curve::Bn254),
            Err(ConvertError::InvalidFieldEncoding { index: 0 })
        ));
    }

    #[test]
    fn test_g2_hex_coordinate_order() {
        let hex = g2_to_hex(&small_g2(), Curve::Bn254).unwrap();
        let bytes = hex::decode(hex.trim_start_matches("0x")).unwrap();
        assert_eq!(bytes.len(), 128);
        assert_eq!(bytes[0], 1);
        assert_eq!(bytes[32], 2);
        assert_eq!(bytes[64], 3);
        assert_eq!(bytes[96], 4);
    }

    #[test]
    fn test_g2_hex_bls12_381_keeps_gnark_order() {
        let p = small_g2();
        let hex = g2_to_hex(&p, Curve::Bls12_381).unwrap();
        let bytes = hex::decode(hex.trim_start_matches("0x")).unwrap();
        assert_eq!(bytes, p.to_raw_bytes(Curve::Bls12_381).unwrap());
        // X.A1 first, each coordinate big-endian
        assert_eq!(bytes[47], 2);
        assert_eq!(bytes[95], 1);
        assert_eq!(bytes[143], 4);
        assert_eq!(bytes[191], 3);
    }

    #[test]
    fn test_convert_proof() {
        let proof = Groth16Proof::from_gnark_bytes(&PROOF_WITH_COMMITMENT, Curve::Bn254).unwrap();
        let zkv = convert_proof(&proof, Curve::Bn254).unwrap();
        assert_eq!(zkv.a.len(), 2 + 128);
        assert_eq!(zkv.b.len(), 2 + 256);
        assert_eq!(zkv.c.len(), 2 + 128);

        // Ar.X big-endian on the wire, little-endian in the output
        let a = hex::decode(zkv.a.trim_start_matches("0x")).unwrap();
        let mut x = PROOF_WITH_COMMITMENT[..32].to_vec();
        x.reverse();
        assert_eq!(&a[..32], &x[..]);
    }

    #[test]
    fn test_convert_vk() {
        let vk = Groth16VerifyingKey::from_gnark_bytes(&legacy_vk_bytes(2), Curve::Bn254).unwrap();
        let zkv = convert_vk(&vk, Curve::Bn254).unwrap();
        assert_eq!(zkv.curve, "Bn254");
        assert_eq!(zkv.gamma_abc_g1.len(), 2);

        let value = serde_json::to_value(&zkv).unwrap();
        for key in ["curve", "alphaG1", "betaG2", "gammaG2", "deltaG2", "gammaAbcG1"] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
    }

    #[test]
    fn test_convert_vk_bls12_381() {
        let bytes = legacy_vk_bytes_on(Curve::Bls12_381, 1);
        let vk = Groth16VerifyingKey::from_gnark_bytes(&bytes, Curve::Bls12_381).unwrap();
        let zkv = convert_vk(&vk, Curve::Bls12_381).unwrap();
        assert_eq!(zkv.curve, "Bls12_381");
        // alpha is the first G1 on the wire and passes through unchanged
        assert_eq!(zkv.alpha_g1, format!("0x{}", hex::encode(&bytes[..96])));
        assert_eq!(zkv.beta_g2.len(), 2 + 2 * 192);
    }
}
