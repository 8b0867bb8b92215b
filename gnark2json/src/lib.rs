//! Convert gnark public witnesses, Groth16 proofs and verifying keys to JSON

pub mod curve;
pub mod encoding;
pub mod error;
pub mod format;
pub mod json;
pub mod proof;
pub mod vk;
pub mod witness;
pub mod zkv;

pub use curve::{Curve, Fq2, G1Point, G2Point};
pub use error::{ConvertError, Result};
pub use format::WitnessFormat;
pub use json::{render_json, save_to_json, save_value, Artifact};
pub use proof::Groth16Proof;
pub use vk::Groth16VerifyingKey;
pub use witness::{decode_public_witness, PublicWitness, WitnessHeader};

use std::path::Path;

/// Decodes `witness` and writes its public vector to `output`, returning the
/// vector that was written.
pub fn convert_public_witness(witness: &PublicWitness, output: &Path) -> Result<Vec<String>> {
    let vector = witness.public_vector()?;
    save_value(output, &vector)?;
    Ok(vector)
}
