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

use bls12_381_plus::G1Projective;
use serde::{Deserialize, Serialize};

use super::{
    ciphersuites::PsCiphersuite,
    commitment::BlindFactor,
    keys::{PSPublicKey, PSSecretKey},
    schema::AttributeMap,
    signature::PSSignature,
};
use crate::{
    errors::Error,
    schemes::{
        algorithms::PS,
        generics::{BlindSignature, Commitment, Signature},
    },
    utils::util::ps_utils::{g1_to_bytes, get_random, OctetReader, G1_COMPRESSED_BYTES},
};

/// Blind signature `(s1, s2)` with `s1 = g1^u` and `s2 = (X1 · C · Π_{known} Y1_i^{m_i})^u`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct PSBlindSignature {
    pub(crate) s1: G1Projective,
    pub(crate) s2: G1Projective,
}

impl PSBlindSignature {
    pub const BLIND_SIGNATURE_LENGTH: usize = 2 * G1_COMPRESSED_BYTES;

    pub fn to_bytes(&self) -> [u8; Self::BLIND_SIGNATURE_LENGTH] {
        let mut bytes = [0u8; Self::BLIND_SIGNATURE_LENGTH];
        bytes[..G1_COMPRESSED_BYTES].copy_from_slice(&g1_to_bytes(&self.s1));
        bytes[G1_COMPRESSED_BYTES..].copy_from_slice(&g1_to_bytes(&self.s2));
        bytes
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, Error> {
        let mut reader = OctetReader::new(data);
        let s1 = reader.read_g1()?;
        let s2 = reader.read_g1()?;
        reader.finish()?;
        Ok(Self { s1, s2 })
    }
}

impl<CS: PsCiphersuite> BlindSignature<PS<CS>> {
    /// # Description
    /// Issuer side of the blind issuance. The proof in `commitment` is checked first; then the
    /// committed positions and the ones in `known` must partition the schema.
    ///
    /// # Inputs:
    /// * `sk` (REQUIRED), the Issuer secret key.
    /// * `pk` (REQUIRED), the Issuer public key.
    /// * `commitment` (REQUIRED), the issue request received from the User.
    /// * `known` (REQUIRED), the attributes chosen by the Issuer, named by the schema.
    ///
    /// # Output:
    /// a [`BlindSignature::PS`] or [`Error`]. Nothing is signed on failure.
    pub fn blind_sign(
        sk: &PSSecretKey,
        pk: &PSPublicKey,
        commitment: &Commitment<PS<CS>>,
        known: &AttributeMap,
    ) -> Result<Self, Error> {
        if sk.attribute_count() != pk.attribute_count() {
            return Err(Error::DimensionMismatch {
                expected: pk.attribute_count(),
                received: sk.attribute_count(),
            });
        }

        commitment.verify(pk)?;

        let known = pk.schema.resolve(known)?;
        let known_indexes: Vec<usize> = known.iter().map(|(i, _)| *i).collect();
        pk.schema.check_partition(commitment.committed_indexes(), &known_indexes)?;

        let u = get_random()?;

        let mut base = sk.X1 + commitment.psCommitment().commitment;
        for (i, m) in &known {
            base += pk.Y1[*i] * m.value;
        }

        let s1 = pk.g1 * u;
        let s2 = base * u;

        log::debug!(
            "Blind signature issued: {} committed, {} known attributes",
            commitment.committed_indexes().len(),
            known.len()
        );

        Ok(Self::PS(PSBlindSignature { s1, s2 }))
    }

    /// # Description
    /// Removes the User blinding: `(s1, s2 / s1^t)`. Does not check the result, see
    /// [`crate::ps::issuance::IssuanceSession::obtain_credential`] for the checked variant.
    pub fn unblind_sign(&self, blind_factor: &BlindFactor) -> Result<Signature<PS<CS>>, Error> {
        let blind = self.psBlindSignature();
        if bool::from(blind.s1.is_identity()) {
            log::warn!("Blind signature rejected: s1 == Identity_G1");
            return Err(Error::IdentityElementError);
        }

        let s = blind.s2 - blind.s1 * blind_factor.0;

        Ok(Signature::<PS<CS>>::PS(PSSignature { h: blind.s1, s }))
    }

    pub fn to_bytes(&self) -> [u8; PSBlindSignature::BLIND_SIGNATURE_LENGTH] {
        self.psBlindSignature().to_bytes()
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, Error> {
        Ok(Self::PS(PSBlindSignature::from_bytes(data)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        keys::pair::KeyPair,
        ps::schema::AttributeSchema,
        schemes::algorithms::{PsBls12381Sha256, PsBls12381Shake256, Scheme},
        utils::message::Attribute,
    };

    macro_rules! blind_tests {
        ( $( $t:ident: { $( $n:ident => $f:ident, )+ }, )+ ) => { $($(
            #[test] fn $n() { $f::<$t>(); }
        )+)+ }
    }

    blind_tests! {
        PsBls12381Sha256: {
            blind_sign_unblind_sha256 => blind_sign_unblind,
            bad_partition_sha256 => bad_partition,
            blind_octets_sha256 => blind_octets,
        },
        PsBls12381Shake256: {
            blind_sign_unblind_shake256 => blind_sign_unblind,
            bad_partition_shake256 => bad_partition,
            blind_octets_shake256 => blind_octets,
        },
    }

    fn keys<S: Scheme>() -> (PSSecretKey, PSPublicKey) {
        let schema = AttributeSchema::new(["age", "country", "role"]).unwrap();
        KeyPair::<PS<S::Ciphersuite>>::generate(schema).unwrap().into_parts()
    }

    fn blind_sign_unblind<S: Scheme>() {
        let (sk, pk) = keys::<S>();
        let hidden = AttributeMap::new().with("age", 25u64);
        let known = AttributeMap::new().with("country", 7u64).with("role", 2u64);

        let (commitment, blind) = Commitment::<PS<S::Ciphersuite>>::commit(&pk, &hidden).unwrap();
        let blind_signature = BlindSignature::<PS<S::Ciphersuite>>::blind_sign(&sk, &pk, &commitment, &known).unwrap();
        let signature = blind_signature.unblind_sign(&blind).unwrap();

        let messages = [Attribute::from(25u64), Attribute::from(7u64), Attribute::from(2u64)];
        assert!(signature.verify(&pk, &messages).is_ok());

        let wrong_blind = BlindFactor::random().unwrap();
        let wrong = blind_signature.unblind_sign(&wrong_blind).unwrap();
        assert_eq!(wrong.verify(&pk, &messages), Err(Error::InvalidSignature));
    }

    fn bad_partition<S: Scheme>() {
        let (sk, pk) = keys::<S>();
        let hidden = AttributeMap::new().with("age", 25u64);
        let (commitment, _) = Commitment::<PS<S::Ciphersuite>>::commit(&pk, &hidden).unwrap();

        let overlapping = AttributeMap::new()
            .with("age", 30u64)
            .with("country", 7u64)
            .with("role", 2u64);
        assert_eq!(
            BlindSignature::<PS<S::Ciphersuite>>::blind_sign(&sk, &pk, &commitment, &overlapping),
            Err(Error::DuplicateAttribute("age".to_owned()))
        );

        let missing = AttributeMap::new().with("country", 7u64);
        assert_eq!(
            BlindSignature::<PS<S::Ciphersuite>>::blind_sign(&sk, &pk, &commitment, &missing),
            Err(Error::DimensionMismatch { expected: 3, received: 2 })
        );
    }

    fn blind_octets<S: Scheme>() {
        let (sk, pk) = keys::<S>();
        let hidden = AttributeMap::new().with("age", 25u64).with("role", 2u64);
        let known = AttributeMap::new().with("country", 7u64);

        let (commitment, _) = Commitment::<PS<S::Ciphersuite>>::commit(&pk, &hidden).unwrap();
        let blind_signature = BlindSignature::<PS<S::Ciphersuite>>::blind_sign(&sk, &pk, &commitment, &known).unwrap();

        let restored = BlindSignature::<PS<S::Ciphersuite>>::from_bytes(&blind_signature.to_bytes()).unwrap();
        assert_eq!(restored, blind_signature);
        let bytes = blind_signature.to_bytes();
        assert_eq!(bytes.len(), 2 * G1_COMPRESSED_BYTES);
        assert_eq!(&bytes[..G1_COMPRESSED_BYTES], &g1_to_bytes(&blind_signature.psBlindSignature().s1)[..]);
        assert!(BlindSignature::<PS<S::Ciphersuite>>::from_bytes(&bytes[..bytes.len() - 1]).is_err());
    }

    #[test]
    fn forged_request_is_not_signed() {
        let (sk, pk) = keys::<PsBls12381Sha256>();
        let hidden = AttributeMap::new().with("age", 25u64);
        let (commitment, _) = Commitment::<PsBls12381Sha256>::commit(&pk, &hidden).unwrap();

        let mut forged = commitment.psCommitment().clone();
        forged.commitment = forged.commitment + pk.Y1[0];
        let forged = Commitment::<PsBls12381Sha256>::PS(forged);

        let known = AttributeMap::new().with("country", 7u64).with("role", 2u64);
        assert_eq!(
            BlindSignature::<PsBls12381Sha256>::blind_sign(&sk, &pk, &forged, &known),
            Err(Error::InvalidProof)
        );
    }

    #[test]
    fn identity_s1_is_rejected() {
        let blind_signature = BlindSignature::<PsBls12381Sha256>::PS(PSBlindSignature {
            s1: G1Projective::IDENTITY,
            s2: G1Projective::GENERATOR,
        });
        let blind = BlindFactor::random().unwrap();
        assert_eq!(blind_signature.unblind_sign(&blind), Err(Error::IdentityElementError));
    }
}
