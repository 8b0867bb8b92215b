//! gnark Groth16 verifying key decoding

use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::curve::{ByteReader, Curve, G1Point, G2Point};
use crate::error::Result;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct VkG1 {
    pub alpha: G1Point,
    pub beta: G1Point,
    pub delta: G1Point,
    pub k: Vec<G1Point>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct VkG2 {
    pub beta: G2Point,
    pub delta: G2Point,
    pub gamma: G2Point,
}

/// Pedersen commitment verifying key attached to keys of circuits that use
/// commitments.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CommitmentKey {
    pub g: G2Point,
    pub g_sigma_neg: G2Point,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Groth16VerifyingKey {
    #[serde(rename = "G1")]
    pub g1: VkG1,
    #[serde(rename = "G2")]
    pub g2: VkG2,
    pub commitment_keys: Vec<CommitmentKey>,
    pub public_and_commitment_committed: Vec<Vec<u64>>,
}

impl Groth16VerifyingKey {
    /// Decodes gnark's raw encoding:
    ///
    /// G1.Alpha, G1.Beta, G2.Beta, G2.Gamma, G1.Delta, G2.Delta, G1.K, then,
    /// for keys written by gnark >= 0.9, PublicAndCommitmentCommitted and the
    /// commitment keys.
    pub fn from_gnark_bytes(bytes: &[u8], curve: Curve) -> Result<Self> {
        let mut reader = ByteReader::new(bytes);
        let alpha = G1Point::read(&mut reader, curve)?;
        let g1_beta = G1Point::read(&mut reader, curve)?;
        let g2_beta = G2Point::read(&mut reader, curve)?;
        let gamma = G2Point::read(&mut reader, curve)?;
        let g1_delta = G1Point::read(&mut reader, curve)?;
        let g2_delta = G2Point::read(&mut reader, curve)?;
        let k = reader.read_vec(|r| G1Point::read(r, curve))?;

        let mut public_and_commitment_committed = Vec::new();
        let mut commitment_keys = Vec::new();
        if reader.remaining() > 0 {
            public_and_commitment_committed =
                reader.read_vec(|r| r.read_vec(|r| r.read_u64()))?;
            commitment_keys = reader.read_vec(|r| {
                Ok(CommitmentKey {
                    g: G2Point::read(r, curve)?,
                    g_sigma_neg: G2Point::read(r, curve)?,
                })
            })?;
        }
        reader.finish()?;

        debug!(
            %curve,
            k = k.len(),
            commitment_keys = commitment_keys.len(),
            "decoded groth16 verifying key"
        );
        Ok(Self {
            g1: VkG1 {
                alpha,
                beta: g1_beta,
                delta: g1_delta,
                k,
            },
            g2: VkG2 {
                beta: g2_beta,
                delta: g2_delta,
                gamma,
            },
            commitment_keys,
            public_and_commitment_committed,
        })
    }

    pub fn from_file(path: &Path, curve: Curve) -> Result<Self> {
        let bytes = fs::read(path)?;
        debug!(path = %path.display(), len = bytes.len(), "read verifying key");
        Self::from_gnark_bytes(&bytes, curve)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::ConvertError;
    use num_bigint::BigUint;

    /// `n` coordinates of `curve`, coordinate `i` holding `tag + i`.
    fn coordinates(curve: Curve, n: usize, tag: u8) -> Vec<u8> {
        let w = curve.fq_bytes();
        let mut out = vec![0u8; n * w];
        for i in 0..n {
            out[w * (i + 1) - 1] = tag + i as u8;
        }
        out
    }

    pub(crate) fn g1(tag: u8) -> Vec<u8> {
        coordinates(Curve::Bn254, 2, tag)
    }

    pub(crate) fn g2(tag: u8) -> Vec<u8> {
        coordinates(Curve::Bn254, 4, tag)
    }

    /// Key in the pre-commitment layout with `nb_k` points in K.
    pub(crate) fn legacy_vk_bytes(nb_k: u8) -> Vec<u8> {
        legacy_vk_bytes_on(Curve::Bn254, nb_k)
    }

    pub(crate) fn legacy_vk_bytes_on(curve: Curve, nb_k: u8) -> Vec<u8> {
        let g1 = |tag| coordinates(curve, 2, tag);
        let g2 = |tag| coordinates(curve, 4, tag);
        let mut bytes = Vec::new();
        bytes.extend(g1(1)); // alpha
        bytes.extend(g1(3)); // G1.beta
        bytes.extend(g2(10)); // G2.beta
        bytes.extend(g2(20)); // gamma
        bytes.extend(g1(5)); // G1.delta
        bytes.extend(g2(30)); // G2.delta
        bytes.extend_from_slice(&(nb_k as u32).to_be_bytes());
        for i in 0..nb_k {
            bytes.extend(g1(100 + 2 * i));
        }
        bytes
    }

    #[test]
    fn test_legacy_layout() {
        let vk = Groth16VerifyingKey::from_gnark_bytes(&legacy_vk_bytes(3), Curve::Bn254).unwrap();
        assert_eq!(vk.g1.alpha.x, BigUint::from(1u32));
        assert_eq!(vk.g1.beta.x, BigUint::from(3u32));
        assert_eq!(vk.g1.delta.y, BigUint::from(6u32));
        assert_eq!(vk.g1.k.len(), 3);
        assert_eq!(vk.g1.k[2].x, BigUint::from(104u32));
        // X.A1 comes first on the wire
        assert_eq!(vk.g2.beta.x.a1, BigUint::from(10u32));
        assert_eq!(vk.g2.beta.x.a0, BigUint::from(11u32));
        assert_eq!(vk.g2.gamma.y.a0, BigUint::from(23u32));
        assert_eq!(vk.g2.delta.y.a1, BigUint::from(32u32));
        assert!(vk.commitment_keys.is_empty());
        assert!(vk.public_and_commitment_committed.is_empty());
    }

    #[test]
    fn test_commitment_layout() {
        let mut bytes = legacy_vk_bytes(2);
        bytes.extend_from_slice(&1u32.to_be_bytes());
        bytes.extend_from_slice(&2u32.to_be_bytes());
        bytes.extend_from_slice(&1u64.to_be_bytes());
        bytes.extend_from_slice(&2u64.to_be_bytes());
        bytes.extend_from_slice(&1u32.to_be_bytes());
        bytes.extend(g2(40));
        bytes.extend(g2(50));

        let vk = Groth16VerifyingKey::from_gnark_bytes(&bytes, Curve::Bn254).unwrap();
        assert_eq!(vk.public_and_commitment_committed, vec![vec![1, 2]]);
        assert_eq!(vk.commitment_keys.len(), 1);
        assert_eq!(vk.commitment_keys[0].g.x.a1, BigUint::from(40u32));
        assert_eq!(vk.commitment_keys[0].g_sigma_neg.x.a1, BigUint::from(50u32));
    }

    #[test]
    fn test_vk_json_shape() {
        let vk = Groth16VerifyingKey::from_gnark_bytes(&legacy_vk_bytes(2), Curve::Bn254).unwrap();
        let value = serde_json::to_value(&vk).unwrap();
        let keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(
            keys,
            vec!["G1", "G2", "CommitmentKeys", "PublicAndCommitmentCommitted"]
        );
        assert_eq!(value["G1"]["K"][1]["X"], "102");
        assert_eq!(value["G2"]["Gamma"]["X"]["A1"], "20");
    }

    #[test]
    fn test_truncated_tail() {
        let mut bytes = legacy_vk_bytes(1);
        bytes.extend_from_slice(&[0u8, 0]);
        let err = Groth16VerifyingKey::from_gnark_bytes(&bytes, Curve::Bn254).unwrap_err();
        assert!(matches!(err, ConvertError::UnexpectedEof { needed: 4, remaining: 2 }));
    }

    #[test]
    fn test_bls12_381_key() {
        let bytes = legacy_vk_bytes_on(Curve::Bls12_381, 2);
        assert_eq!(bytes.len(), 5 * 96 + 3 * 192 + 4);
        let vk = Groth16VerifyingKey::from_gnark_bytes(&bytes, Curve::Bls12_381).unwrap();
        assert_eq!(vk.g1.k[1].x, BigUint::from(102u32));
        assert_eq!(vk.g2.delta.y.a1, BigUint::from(32u32));
    }
}
