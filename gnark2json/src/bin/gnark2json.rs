use std::path::{Path, PathBuf};

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use gnark2json::{
    convert_public_witness, save_value, zkv, Curve, Groth16Proof, Groth16VerifyingKey,
    PublicWitness, Result,
};

const USAGE: &str = "Usage:
  gnark2json [--curve <bn254|bls12_381>] <command> ...

  gnark2json witness <public_witness> <out.json>
  gnark2json proof <proof> <out.json>
  gnark2json vk <verifying_key> <out.json>
  gnark2json all <public_witness> <proof> <verifying_key> <out_dir>
  gnark2json zkv <public_witness> <proof> <verifying_key> <out_dir>

The curve defaults to bn254.";

fn usage() -> ! {
    eprintln!("{USAGE}");
    std::process::exit(1);
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let mut curve = Curve::default();
    if args.first().map(String::as_str) == Some("--curve") {
        let Some(name) = args.get(1) else { usage() };
        curve = match name.parse() {
            Ok(curve) => curve,
            Err(err) => {
                error!("{err}");
                usage()
            }
        };
        args.drain(..2);
    }
    let paths: Vec<PathBuf> = args.iter().skip(1).map(PathBuf::from).collect();

    let ok = match (args.first().map(String::as_str), paths.as_slice()) {
        (Some("witness"), [input, output]) => report("witness", witness(input, output)),
        (Some("proof"), [input, output]) => report("proof", proof(input, output, curve)),
        (Some("vk"), [input, output]) => report("verifying key", vk(input, output, curve)),
        (Some("all"), [pw, proof_path, vk_path, out_dir]) => {
            // each conversion stands alone, a failure does not stop the others
            let results = [
                report("witness", witness(pw, &out_dir.join("WitnessPublic.json"))),
                report("proof", proof(proof_path, &out_dir.join("proof.json"), curve)),
                report("verifying key", vk(vk_path, &out_dir.join("vk.json"), curve)),
            ];
            results.iter().all(|ok| *ok)
        }
        (Some("zkv"), [pw, proof_path, vk_path, out_dir]) => report(
            "zkverify",
            zkverify(pw, proof_path, vk_path, out_dir, curve),
        ),
        _ => usage(),
    };

    if !ok {
        std::process::exit(1);
    }
}

fn report(what: &str, result: Result<()>) -> bool {
    match result {
        Ok(()) => true,
        Err(err) => {
            error!("failed to convert {what}: {err}");
            false
        }
    }
}

fn witness(input: &Path, output: &Path) -> Result<()> {
    let witness = PublicWitness::from_file(input)?;
    let vector = convert_public_witness(&witness, output)?;
    info!(elements = vector.len(), "witness json saved to {}", output.display());
    Ok(())
}

fn proof(input: &Path, output: &Path, curve: Curve) -> Result<()> {
    let proof = Groth16Proof::from_file(input, curve)?;
    save_value(output, &proof)?;
    info!("proof saved to {}", output.display());
    Ok(())
}

fn vk(input: &Path, output: &Path, curve: Curve) -> Result<()> {
    let vk = Groth16VerifyingKey::from_file(input, curve)?;
    save_value(output, &vk)?;
    info!("vk saved to {}", output.display());
    Ok(())
}

fn zkverify(
    pw: &Path,
    proof_path: &Path,
    vk_path: &Path,
    out_dir: &Path,
    curve: Curve,
) -> Result<()> {
    let pubs = zkv::convert_pubs(&PublicWitness::from_file(pw)?.public_vector()?)?;
    let proof = zkv::convert_proof(&Groth16Proof::from_file(proof_path, curve)?, curve)?;
    let vk = zkv::convert_vk(&Groth16VerifyingKey::from_file(vk_path, curve)?, curve)?;

    save_value(&out_dir.join("zkv_pubs.json"), &pubs)?;
    save_value(&out_dir.join("zkv_proof.json"), &proof)?;
    save_value(&out_dir.join("zkv_vk.json"), &vk)?;
    info!(%curve, "zkverify artifacts saved to {}", out_dir.display());
    Ok(())
}
