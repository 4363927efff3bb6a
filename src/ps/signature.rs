// Copyright 2023 Fondazione LINKS

// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at

//     http://www.apache.org/licenses/LICENSE-2.0

// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use bls12_381_plus::{multi_miller_loop, G1Projective, G2Prepared, G2Projective, Gt, Scalar};
use group::Curve;
use serde::{Deserialize, Serialize};

use super::{
    ciphersuites::PsCiphersuite,
    keys::{PSPublicKey, PSSecretKey},
    schema::AttributeMap,
};
use crate::{
    errors::Error,
    schemes::{algorithms::PS, generics::Signature},
    utils::{
        message::Attribute,
        util::ps_utils::{g1_to_bytes, get_random, OctetReader, G1_COMPRESSED_BYTES},
    },
};

/// `(h, s)` with `s = h^(x + Σ y_i·m_i)`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct PSSignature {
    pub h: G1Projective,
    pub s: G1Projective,
}

impl PSSignature {
    pub const SIGNATURE_LENGTH: usize = 2 * G1_COMPRESSED_BYTES;

    pub fn to_bytes(&self) -> [u8; Self::SIGNATURE_LENGTH] {
        let mut bytes = [0u8; Self::SIGNATURE_LENGTH];
        bytes[0..G1_COMPRESSED_BYTES].copy_from_slice(&g1_to_bytes(&self.h));
        bytes[G1_COMPRESSED_BYTES..].copy_from_slice(&g1_to_bytes(&self.s));
        bytes
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, Error> {
        let mut reader = OctetReader::new(data);
        let signature = Self::read(&mut reader)?;
        reader.finish()?;
        Ok(signature)
    }

    pub(crate) fn read(reader: &mut OctetReader<'_>) -> Result<Self, Error> {
        let h = reader.read_g1()?;
        let s = reader.read_g1()?;
        Ok(Self { h, s })
    }

    /// `(h^r, (s · h^t)^r)`: a signature on the same attributes with exponent shifted by `t`.
    pub(crate) fn randomize(&self, r: Scalar, t: Scalar) -> Self {
        let h_prime = self.h * r;
        let s_prime = (self.s + self.h * t) * r;
        Self { h: h_prime, s: s_prime }
    }
}

impl<CS: PsCiphersuite> Signature<PS<CS>> {
    pub fn h(&self) -> G1Projective {
        self.psSignature().h
    }

    pub fn s(&self) -> G1Projective {
        self.psSignature().s
    }

    /// # Description
    /// Signs the attribute vector `messages` (one value per schema position).
    /// A fresh `h = g1^r` is drawn for every call.
    ///
    /// # Output:
    /// a [`Signature::PS`], or [`Error::DimensionMismatch`] if `len(messages) != L`.
    pub fn sign(sk: &PSSecretKey, messages: &[Attribute]) -> Result<Self, Error> {
        let signature = core_sign(sk, messages)?;
        Ok(Self::PS(signature))
    }

    /// Signs a map naming every attribute of the schema exactly once.
    pub fn sign_attributes(sk: &PSSecretKey, pk: &PSPublicKey, attributes: &AttributeMap) -> Result<Self, Error> {
        let messages = full_vector(pk, attributes)?;
        Self::sign(sk, &messages)
    }

    /// # Description
    /// Checks `e(h, X2 · Π Y2_i^{m_i}) = e(s, g2)`.
    ///
    /// # Output:
    /// [`Ok`], or [`Error::InvalidSignature`] when the relation fails,
    /// [`Error::IdentityElementError`] when `h` is the identity,
    /// [`Error::DimensionMismatch`] when `len(messages) != L`.
    pub fn verify(&self, pk: &PSPublicKey, messages: &[Attribute]) -> Result<(), Error> {
        core_verify(pk, self.psSignature(), messages)
    }

    pub fn verify_attributes(&self, pk: &PSPublicKey, attributes: &AttributeMap) -> Result<(), Error> {
        let messages = full_vector(pk, attributes)?;
        self.verify(pk, &messages)
    }

    /// Boolean form of [`Self::verify`], failing closed.
    pub fn is_valid(&self, pk: &PSPublicKey, messages: &[Attribute]) -> bool {
        self.verify(pk, messages).is_ok()
    }

    pub fn to_bytes(&self) -> [u8; PSSignature::SIGNATURE_LENGTH] {
        self.psSignature().to_bytes()
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, Error> {
        Ok(Self::PS(PSSignature::from_bytes(data)?))
    }
}

/// Orders a map covering the whole schema into the attribute vector.
pub(crate) fn full_vector(pk: &PSPublicKey, attributes: &AttributeMap) -> Result<Vec<Attribute>, Error> {
    let resolved = pk.schema.resolve(attributes)?;
    if resolved.len() != pk.schema.len() {
        return Err(Error::DimensionMismatch {
            expected: pk.schema.len(),
            received: resolved.len(),
        });
    }
    Ok(resolved.into_iter().map(|(_, m)| m).collect())
}

pub(crate) fn core_sign(sk: &PSSecretKey, messages: &[Attribute]) -> Result<PSSignature, Error> {
    let L = sk.y.len();
    if messages.len() != L {
        return Err(Error::DimensionMismatch {
            expected: L,
            received: messages.len(),
        });
    }

    let r = get_random()?;
    let h = G1Projective::GENERATOR * r;
    if bool::from(h.is_identity()) {
        return Err(Error::IdentityElementError);
    }

    let mut exponent = sk.x;
    for i in 0..L {
        exponent += sk.y[i] * messages[i].value;
    }

    Ok(PSSignature { h, s: h * exponent })
}

pub(crate) fn core_verify(pk: &PSPublicKey, signature: &PSSignature, messages: &[Attribute]) -> Result<(), Error> {
    pk.check_dimensions()?;
    let L = pk.attribute_count();
    if messages.len() != L {
        return Err(Error::DimensionMismatch {
            expected: L,
            received: messages.len(),
        });
    }

    if bool::from(signature.h.is_identity()) {
        return Err(Error::IdentityElementError);
    }

    let mut K = pk.X2;
    for i in 0..L {
        K += pk.Y2[i] * messages[i].value;
    }

    if pairing_check(&signature.h, &K, &signature.s, &pk.g2) {
        Ok(())
    } else {
        Err(Error::InvalidSignature)
    }
}

/// `e(h, K) == e(s, g2)`, computed as a single multi Miller loop.
pub(crate) fn pairing_check(h: &G1Projective, K: &G2Projective, s: &G1Projective, g2: &G2Projective) -> bool {
    let term1 = (&h.to_affine(), &G2Prepared::from(K.to_affine()));
    let term2 = (&(-s).to_affine(), &G2Prepared::from(g2.to_affine()));

    let pairing = multi_miller_loop(&[term1, term2]).final_exponentiation();

    pairing == Gt::IDENTITY
}
