//! gnark Groth16 proof decoding
//!
//! gnark's raw proof encoding is
//! `Ar (G1) || Bs (G2) || Krs (G1) || u32 n || n x G1 || CommitmentPok (G1)`,
//! with every point uncompressed. Field names and their order follow gnark's
//! own JSON output.

use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::curve::{ByteReader, Curve, G1Point, G2Point};
use crate::error::Result;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Groth16Proof {
    pub ar: G1Point,
    pub krs: G1Point,
    pub bs: G2Point,
    /// Pedersen commitments a la <https://eprint.iacr.org/2022/1072>
    pub commitments: Vec<G1Point>,
    /// Batched proof of knowledge of the above commitments
    pub commitment_pok: G1Point,
}

impl Groth16Proof {
    pub fn from_gnark_bytes(bytes: &[u8], curve: Curve) -> Result<Self> {
        let mut reader = ByteReader::new(bytes);
        let ar = G1Point::read(&mut reader, curve)?;
        let bs = G2Point::read(&mut reader, curve)?;
        let krs = G1Point::read(&mut reader, curve)?;
        let commitments = reader.read_vec(|r| G1Point::read(r, curve))?;
        let commitment_pok = G1Point::read(&mut reader, curve)?;
        reader.finish()?;

        debug!(%curve, commitments = commitments.len(), "decoded groth16 proof");
        Ok(Self {
            ar,
            krs,
            bs,
            commitments,
            commitment_pok,
        })
    }

    pub fn from_file(path: &Path, curve: Curve) -> Result<Self> {
        let bytes = fs::read(path)?;
        debug!(path = %path.display(), len = bytes.len(), "read proof");
        Self::from_gnark_bytes(&bytes, curve)
    }
}
