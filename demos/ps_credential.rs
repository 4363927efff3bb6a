// Copyright 2025 Fondazione LINKS

// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at

//     http://www.apache.org/licenses/LICENSE-2.0

// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

#[cfg(feature = "ps_blind")]
mod ps_example {
    use ps_anoncreds::{
        errors::Error,
        keys::pair::KeyPair,
        ps::{
            issuance::IssuanceSession,
            schema::{AttributeMap, AttributeSchema},
        },
        schemes::{
            algorithms::{Scheme, PS},
            generics::{BlindSignature, PoKSignature},
        },
        utils::util::ps_utils::generate_nonce,
    };

    pub(crate) fn ps_main<S: Scheme>() -> Result<(), Error> {
        let schema = AttributeSchema::new(["age", "country", "role"])?;
        log::info!("Attribute schema: {:?}", schema.names());

        log::info!("Keypair Generation");
        let issuer_keypair = KeyPair::<PS<S::Ciphersuite>>::generate(schema)?;
        let issuer_sk = issuer_keypair.private_key();
        let issuer_pk = issuer_keypair.public_key();
        log::info!("PK: {}", issuer_pk.encode());

        // the Holder keeps its age hidden, the Issuer vouches for country and role
        let hidden = AttributeMap::new().with("age", 25u64);
        let known = AttributeMap::new().with("country", 7u64).with("role", 2u64);

        log::info!("Computing commitment on hidden attributes and proof of knowledge of its opening");
        let (session, request) = IssuanceSession::<S::Ciphersuite>::new(issuer_pk, hidden)?;
        log::info!("Issue request: {}", hex::encode(request.to_bytes()));

        log::info!("Verification of the proof and computation of a blind signature");
        let blind_signature = BlindSignature::<PS<S::Ciphersuite>>::blind_sign(issuer_sk, issuer_pk, &request, &known)?;
        log::info!("Blind signature: {}", hex::encode(blind_signature.to_bytes()));

        log::info!("Signature unblinding and verification...");
        let credential = session.obtain_credential(issuer_pk, &blind_signature, &known)?;
        log::info!("Signature is VALID!");

        //Holder receives nonce from Verifier
        let nonce_verifier = generate_nonce()?;
        log::info!("Nonce: {}", hex::encode(&nonce_verifier));

        log::info!("Computation of a disclosure proof revealing country and role");
        let proof = credential.present(issuer_pk, &["country", "role"], &nonce_verifier)?;
        let proof_bytes = proof.to_bytes();
        log::info!("Proof: {}", hex::encode(&proof_bytes));

        log::info!("Disclosure proof verification...");
        let received = PoKSignature::<PS<S::Ciphersuite>>::from_bytes(&proof_bytes)?;
        let revealed = received.proof_verify(issuer_pk, &nonce_verifier)?;
        log::info!("Disclosure proof is VALID!");
        for (name, value) in revealed.iter() {
            log::info!("  {} = {}", name, hex::encode(value.to_bytes_be()));
        }

        Ok(())
    }
}

#[cfg(feature = "ps_blind")]
fn main() {
    use crate::ps_example::ps_main;
    use ps_anoncreds::schemes::algorithms::{PsBls12381Sha256, PsBls12381Shake256};
    use std::env;

    dotenvy::dotenv().ok();
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() != 2 {
        println!(
            "Usage: {} <cipher_suite>
                Ciphersuites:
                    - BLS12-381-SHA-256
                    - BLS12-381-SHAKE-256",
            args[0]
        );
        return;
    }

    let cipher_suite = &args[1];

    let result = match cipher_suite.as_str() {
        "BLS12-381-SHA-256" => {
            log::info!("Ciphersuite: BLS12-381-SHA-256");
            ps_main::<PsBls12381Sha256>()
        }
        "BLS12-381-SHAKE-256" => {
            log::info!("Ciphersuite: BLS12-381-SHAKE-256");
            ps_main::<PsBls12381Shake256>()
        }
        _ => {
            println!("Unknown cipher suite: {}", cipher_suite);
            return;
        }
    };

    if let Err(e) = result {
        log::error!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "ps_blind"))]
fn main() {}
