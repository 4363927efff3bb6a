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

use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use super::{
    ciphersuites::PsCiphersuite,
    keys::PSPublicKey,
    schema::AttributeMap,
    signature::{full_vector, PSSignature},
};
use crate::{
    errors::Error,
    schemes::{
        algorithms::PS,
        generics::{PoKSignature, Signature},
    },
    utils::{
        message::Attribute,
        util::ps_utils::{i2osp, OctetReader, LENGTH_BYTES, SCALAR_BYTES},
    },
};

/// A signature held by the Holder together with every attribute value it signs, in schema order.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct AnonymousCredential<CS: PsCiphersuite> {
    signature: PSSignature,
    attributes: Vec<Attribute>,
    #[serde(skip)]
    _cs: PhantomData<CS>,
}

impl<CS: PsCiphersuite> AnonymousCredential<CS> {
    /// Wraps `signature` over the named `attributes`, which must cover the schema.
    /// The signature is verified before the credential is built.
    pub fn new(pk: &PSPublicKey, signature: &Signature<PS<CS>>, attributes: &AttributeMap) -> Result<Self, Error> {
        let attributes = full_vector(pk, attributes)?;
        signature.verify(pk, &attributes)?;

        Ok(Self {
            signature: *signature.psSignature(),
            attributes,
            _cs: PhantomData,
        })
    }

    pub fn signature(&self) -> Signature<PS<CS>> {
        Signature::<PS<CS>>::PS(self.signature)
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// The attribute values named by the schema of `pk`.
    pub fn attribute_map(&self, pk: &PSPublicKey) -> Result<AttributeMap, Error> {
        let indexed: Vec<(usize, Attribute)> = self.attributes.iter().copied().enumerate().collect();
        pk.schema.name_attributes(&indexed)
    }

    pub fn verify(&self, pk: &PSPublicKey) -> Result<(), Error> {
        self.signature().verify(pk, &self.attributes)
    }

    /// # Description
    /// Shows the credential, disclosing the attributes named in `disclose` and hiding all the others.
    ///
    /// # Output:
    /// a [`PoKSignature::PS`] bound to `message`, or [`Error`].
    pub fn present(&self, pk: &PSPublicKey, disclose: &[&str], message: &[u8]) -> Result<PoKSignature<PS<CS>>, Error> {
        let L = pk.attribute_count();
        if self.attributes.len() != L {
            return Err(Error::DimensionMismatch {
                expected: L,
                received: self.attributes.len(),
            });
        }

        for (k, name) in disclose.iter().enumerate() {
            if pk.schema.index_of(name).is_none() {
                return Err(Error::UnknownAttribute((*name).to_owned()));
            }
            if disclose[..k].contains(name) {
                return Err(Error::DuplicateAttribute((*name).to_owned()));
            }
        }

        let mut disclosed = AttributeMap::new();
        let mut hidden = AttributeMap::new();
        for (name, value) in pk.schema.names().iter().zip(&self.attributes) {
            if disclose.contains(&name.as_str()) {
                disclosed.insert(name.as_str(), *value);
            } else {
                hidden.insert(name.as_str(), *value);
            }
        }

        PoKSignature::<PS<CS>>::proof_gen(pk, &self.signature, &disclosed, &hidden, message)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes: Vec<u8> = Vec::new();
        bytes.extend_from_slice(&self.signature.to_bytes());
        bytes.extend_from_slice(&i2osp(self.attributes.len(), LENGTH_BYTES));
        self.attributes
            .iter()
            .for_each(|m| bytes.extend_from_slice(&m.to_bytes_be()));
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let mut reader = OctetReader::new(bytes);
        let signature = PSSignature::read(&mut reader)?;
        let L = reader.read_count(SCALAR_BYTES)?;
        let attributes = (0..L)
            .map(|_| reader.read_scalar().map(Attribute::new))
            .collect::<Result<Vec<_>, _>>()?;
        reader.finish()?;

        Ok(Self {
            signature,
            attributes,
            _cs: PhantomData,
        })
    }
}
