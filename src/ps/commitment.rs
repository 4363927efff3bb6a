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

use bls12_381_plus::{G1Projective, Scalar};
use serde::{Deserialize, Serialize};

use super::{ciphersuites::PsCiphersuite, keys::PSPublicKey, proof::PSZKPoK, schema::AttributeMap};
use crate::{
    errors::Error,
    schemes::{
        algorithms::PS,
        generics::{Commitment, ZKPoK},
    },
    utils::util::ps_utils::{
        g1_to_bytes, get_random, i2osp, OctetReader, ScalarExt, LENGTH_BYTES, SCALAR_BYTES,
    },
};

/// Issue request sent by the User: `C = g1^t · Π_{i∈hidden} Y1_i^{m_i}`, the committed schema
/// positions and the proof of knowledge of the opening.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct PSCommitment {
    pub(crate) commitment: G1Projective,
    pub(crate) committed_indexes: Vec<usize>,
    pub(crate) proof: PSZKPoK,
}

impl PSCommitment {
    pub fn value(&self) -> G1Projective {
        self.commitment
    }

    pub fn committed_indexes(&self) -> &[usize] {
        &self.committed_indexes
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes: Vec<u8> = Vec::new();
        bytes.extend_from_slice(&g1_to_bytes(&self.commitment));
        bytes.extend_from_slice(&i2osp(self.committed_indexes.len(), LENGTH_BYTES));
        self.committed_indexes
            .iter()
            .for_each(|&i| bytes.extend_from_slice(&i2osp(i, LENGTH_BYTES)));
        bytes.extend_from_slice(&self.proof.to_bytes());
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let mut reader = OctetReader::new(bytes);
        let commitment = reader.read_g1()?;
        // each committed index is followed later by its response scalar
        let M = reader.read_count(LENGTH_BYTES + SCALAR_BYTES)?;
        let committed_indexes = (0..M).map(|_| reader.read_usize()).collect::<Result<Vec<_>, _>>()?;
        let proof = PSZKPoK::read(&mut reader, M)?;
        reader.finish()?;

        Ok(Self { commitment, committed_indexes, proof })
    }
}

/// The User blinding scalar `t`. Never sent to the Issuer.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct BlindFactor(pub(crate) Scalar);

impl BlindFactor {
    pub fn random() -> Result<Self, Error> {
        Ok(Self(get_random()?))
    }

    pub fn to_bytes(&self) -> [u8; SCALAR_BYTES] {
        self.0.to_bytes_be()
    }

    pub fn from_bytes(bytes: &[u8; SCALAR_BYTES]) -> Result<Self, Error> {
        Ok(Self(<Scalar as ScalarExt>::from_bytes_be(bytes)?))
    }
}

impl<CS: PsCiphersuite> Commitment<PS<CS>> {
    /// # Description
    /// Creates the issue request for the attributes in `hidden`, which the Issuer will never see.
    ///
    /// # Inputs:
    /// * `pk` (REQUIRED), the Issuer public key.
    /// * `hidden` (REQUIRED), attributes committed to, named by the schema.
    ///
    /// # Output:
    /// the [`Commitment::PS`] to send and the [`BlindFactor`] to keep, or [`Error`].
    pub fn commit(pk: &PSPublicKey, hidden: &AttributeMap) -> Result<(Self, BlindFactor), Error> {
        pk.check_dimensions()?;
        let committed = pk.schema.resolve(hidden)?;

        let blind_factor = BlindFactor::random()?;

        let mut commitment = pk.g1 * blind_factor.0;
        for (i, m) in &committed {
            commitment += pk.Y1[*i] * m.value;
        }

        let proof = ZKPoK::<PS<CS>>::generate_proof(pk, &commitment, &blind_factor.0, &committed)?;
        let committed_indexes: Vec<usize> = committed.iter().map(|(i, _)| *i).collect();

        log::debug!("Issue request created over {} hidden attributes", committed_indexes.len());

        Ok((
            Self::PS(PSCommitment {
                commitment,
                committed_indexes,
                proof: proof.psZKPoK().clone(),
            }),
            blind_factor,
        ))
    }

    /// # Description
    /// Issuer-side check of the proof of knowledge carried by the issue request.
    ///
    /// # Output:
    /// [`Ok`] or [`Error::InvalidProof`] (structural problems are reported before any group operation).
    pub fn verify(&self, pk: &PSPublicKey) -> Result<(), Error> {
        pk.check_dimensions()?;
        let commitment = self.psCommitment();

        let L = pk.attribute_count();
        let mut previous: Option<usize> = None;
        for &i in &commitment.committed_indexes {
            if i >= L || previous.map_or(false, |p| p >= i) {
                return Err(Error::InvalidAttributeIndex(i));
            }
            previous = Some(i);
        }

        ZKPoK::<PS<CS>>::PS(commitment.proof.clone())
            .verify_proof(pk, &commitment.commitment, &commitment.committed_indexes)
            .map_err(|e| {
                log::warn!("Issue request rejected: {}", e);
                e
            })
    }

    pub fn committed_indexes(&self) -> &[usize] {
        &self.psCommitment().committed_indexes
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.psCommitment().to_bytes()
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        Ok(Self::PS(PSCommitment::from_bytes(bytes)?))
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

    macro_rules! commitment_tests {
        ( $( $t:ident: { $( $n:ident => $f:ident, )+ }, )+ ) => { $($(
            #[test] fn $n() { $f::<$t>(); }
        )+)+ }
    }

    commitment_tests! {
        PsBls12381Sha256: {
            commit_and_verify_sha256 => commit_and_verify,
            tampered_request_sha256 => tampered_request,
            commitment_octets_sha256 => commitment_octets,
        },
        PsBls12381Shake256: {
            commit_and_verify_shake256 => commit_and_verify,
            tampered_request_shake256 => tampered_request,
            commitment_octets_shake256 => commitment_octets,
        },
    }

    fn public_key<S: Scheme>() -> PSPublicKey {
        let schema = AttributeSchema::new(["age", "country", "role"]).unwrap();
        KeyPair::<PS<S::Ciphersuite>>::generate(schema)
            .unwrap()
            .public_key()
            .clone()
    }

    fn commit_and_verify<S: Scheme>() {
        let pk = public_key::<S>();
        let hidden = AttributeMap::new().with("role", 2u64).with("age", 25u64);
        let (commitment, blind) = Commitment::<PS<S::Ciphersuite>>::commit(&pk, &hidden).unwrap();

        assert_eq!(commitment.committed_indexes(), &[0, 2]);
        assert!(commitment.verify(&pk).is_ok());

        let expected = pk.g1 * blind.0 + pk.Y1[0] * Attribute::from(25u64).value + pk.Y1[2] * Attribute::from(2u64).value;
        assert_eq!(commitment.psCommitment().value(), expected);

        // committing to nothing still proves knowledge of t
        let (empty, _) = Commitment::<PS<S::Ciphersuite>>::commit(&pk, &AttributeMap::new()).unwrap();
        assert!(empty.verify(&pk).is_ok());
    }

    fn tampered_request<S: Scheme>() {
        let pk = public_key::<S>();
        let hidden = AttributeMap::new().with("age", 25u64);
        let (commitment, _) = Commitment::<PS<S::Ciphersuite>>::commit(&pk, &hidden).unwrap();
        let inner = commitment.psCommitment().clone();

        let mut shifted = inner.clone();
        shifted.commitment += pk.Y1[0];
        assert_eq!(Commitment::<PS<S::Ciphersuite>>::PS(shifted).verify(&pk), Err(Error::InvalidProof));

        let mut moved = inner.clone();
        moved.committed_indexes = vec![1];
        assert_eq!(Commitment::<PS<S::Ciphersuite>>::PS(moved).verify(&pk), Err(Error::InvalidProof));

        let mut out_of_range = inner;
        out_of_range.committed_indexes = vec![3];
        assert_eq!(
            Commitment::<PS<S::Ciphersuite>>::PS(out_of_range).verify(&pk),
            Err(Error::InvalidAttributeIndex(3))
        );

        let other_pk = public_key::<S>();
        assert_eq!(commitment.verify(&other_pk), Err(Error::InvalidProof));
    }

    fn commitment_octets<S: Scheme>() {
        let pk = public_key::<S>();
        let hidden = AttributeMap::new().with("age", 25u64).with("country", 7u64);
        let (commitment, blind) = Commitment::<PS<S::Ciphersuite>>::commit(&pk, &hidden).unwrap();

        let restored = Commitment::<PS<S::Ciphersuite>>::from_bytes(&commitment.to_bytes()).unwrap();
        assert_eq!(restored, commitment);
        assert!(restored.verify(&pk).is_ok());
        assert_eq!(BlindFactor::from_bytes(&blind.to_bytes()).unwrap(), blind);

        let bytes = commitment.to_bytes();
        assert!(Commitment::<PS<S::Ciphersuite>>::from_bytes(&bytes[..bytes.len() - 1]).is_err());
    }

    #[test]
    fn unknown_hidden_attribute() {
        let pk = public_key::<PsBls12381Sha256>();
        let hidden = AttributeMap::new().with("height", 180u64);
        assert_eq!(
            Commitment::<PsBls12381Sha256>::commit(&pk, &hidden),
            Err(Error::UnknownAttribute("height".to_owned()))
        );
    }
}
