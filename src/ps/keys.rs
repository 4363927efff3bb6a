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

use bls12_381_plus::{G1Projective, G2Projective, Scalar};
use serde::{Deserialize, Serialize};

use super::{ciphersuites::PsCiphersuite, schema::AttributeSchema};
use crate::{
    errors::Error,
    keys::{
        pair::KeyPair,
        traits::{PrivateKey, PublicKey},
    },
    schemes::algorithms::PS,
    utils::util::ps_utils::{
        calculate_random_scalars, g1_to_bytes, g2_to_bytes, i2osp, OctetReader, ScalarExt,
        G1_COMPRESSED_BYTES, G2_COMPRESSED_BYTES, LENGTH_BYTES, SCALAR_BYTES,
    },
};

/// Issuer public key `(g1, Y1_1..Y1_L, g2, X2, Y2_1..Y2_L)` together with the attribute schema.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct PSPublicKey {
    pub g1: G1Projective,
    pub Y1: Vec<G1Projective>,
    pub g2: G2Projective,
    pub X2: G2Projective,
    pub Y2: Vec<G2Projective>,
    pub schema: AttributeSchema,
}

impl PSPublicKey {
    /// Number of attributes `L` signed under this key.
    pub fn attribute_count(&self) -> usize {
        self.Y1.len()
    }

    pub(crate) fn check_dimensions(&self) -> Result<(), Error> {
        let L = self.schema.len();
        if self.Y1.len() != L || self.Y2.len() != L {
            return Err(Error::DimensionMismatch {
                expected: L,
                received: self.Y1.len().min(self.Y2.len()),
            });
        }
        Ok(())
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes: Vec<u8> = Vec::new();
        bytes.extend_from_slice(&i2osp(self.attribute_count(), LENGTH_BYTES));
        bytes.extend_from_slice(&g1_to_bytes(&self.g1));
        self.Y1.iter().for_each(|p| bytes.extend_from_slice(&g1_to_bytes(p)));
        bytes.extend_from_slice(&g2_to_bytes(&self.g2));
        bytes.extend_from_slice(&g2_to_bytes(&self.X2));
        self.Y2.iter().for_each(|p| bytes.extend_from_slice(&g2_to_bytes(p)));
        bytes.extend_from_slice(&self.schema.to_bytes());
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let mut reader = OctetReader::new(bytes);
        let L = reader.read_count(G1_COMPRESSED_BYTES + G2_COMPRESSED_BYTES)?;

        let g1 = reader.read_g1()?;
        let Y1 = (0..L).map(|_| reader.read_g1()).collect::<Result<Vec<_>, _>>()?;
        let g2 = reader.read_g2()?;
        let X2 = reader.read_g2()?;
        let Y2 = (0..L).map(|_| reader.read_g2()).collect::<Result<Vec<_>, _>>()?;
        let schema = AttributeSchema::read(&mut reader)?;
        reader.finish()?;

        let pk = Self { g1, Y1, g2, X2, Y2, schema };
        pk.check_dimensions()
            .map_err(|e| Error::SerializationError(e.to_string()))?;
        Ok(pk)
    }

    pub fn encode(&self) -> String {
        hex::encode(self.to_bytes())
    }
}

/// Issuer secret key `(x, X1, y_1..y_L)`.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct PSSecretKey {
    pub(crate) x: Scalar,
    pub(crate) X1: G1Projective,
    pub(crate) y: Vec<Scalar>,
}

impl PSSecretKey {
    pub fn attribute_count(&self) -> usize {
        self.y.len()
    }

    //in BE order
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes: Vec<u8> = Vec::new();
        bytes.extend_from_slice(&i2osp(self.y.len(), LENGTH_BYTES));
        bytes.extend_from_slice(&self.x.to_bytes_be());
        bytes.extend_from_slice(&g1_to_bytes(&self.X1));
        self.y.iter().for_each(|y_i| bytes.extend_from_slice(&y_i.to_bytes_be()));
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let mut reader = OctetReader::new(bytes);
        let L = reader.read_count(SCALAR_BYTES)?;
        let x = reader.read_scalar()?;
        let X1 = reader.read_g1()?;
        let y = (0..L).map(|_| reader.read_scalar()).collect::<Result<Vec<_>, _>>()?;
        reader.finish()?;

        Ok(Self { x, X1, y })
    }

    pub fn encode(&self) -> String {
        hex::encode(self.to_bytes())
    }
}

impl PublicKey for PSPublicKey {
    type Output = Vec<u8>;

    fn to_bytes(&self) -> Self::Output {
        self.to_bytes()
    }

    fn encode(&self) -> String {
        self.encode()
    }
}

impl PrivateKey for PSSecretKey {
    type Output = Vec<u8>;

    fn to_bytes(&self) -> Self::Output {
        self.to_bytes()
    }

    fn encode(&self) -> String {
        self.encode()
    }
}

impl<CS: PsCiphersuite> KeyPair<PS<CS>> {
    /// # Description
    /// Generates the Issuer key pair for the attributes named by `schema`.
    /// `x` and `y_1..y_L` are drawn uniformly at random, then
    /// `X1 = g1^x`, `X2 = g2^x`, `Y1_i = g1^{y_i}`, `Y2_i = g2^{y_i}`.
    ///
    /// # Output:
    /// a [`KeyPair`] or [`Error::RandomnessError`] if the randomness source fails.
    pub fn generate(schema: AttributeSchema) -> Result<Self, Error> {
        let L = schema.len();
        if L == 0 {
            return Err(Error::KeyGenError("empty attribute schema".to_owned()));
        }

        let random_scalars = calculate_random_scalars(L + 1)?;
        let x = random_scalars[0];
        let y = random_scalars[1..].to_vec();

        let g1 = G1Projective::GENERATOR;
        let g2 = G2Projective::GENERATOR;

        let Y1: Vec<G1Projective> = y.iter().map(|y_i| g1 * y_i).collect();
        let Y2: Vec<G2Projective> = y.iter().map(|y_i| g2 * y_i).collect();

        let public = PSPublicKey { g1, Y1, g2, X2: g2 * x, Y2, schema };
        let private = PSSecretKey { x, X1: g1 * x, y };

        log::debug!("Generated a key pair for {} attributes", L);

        Ok(Self { public, private })
    }

    /// Generates a key pair for `len` positional attributes.
    pub fn generate_with_len(len: usize) -> Result<Self, Error> {
        Self::generate(AttributeSchema::positional(len)?)
    }
}
