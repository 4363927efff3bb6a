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
    ciphersuites::PsCiphersuite, commitment::BlindFactor, credential::AnonymousCredential, keys::PSPublicKey,
    schema::AttributeMap,
};
use crate::{
    errors::Error,
    schemes::{
        algorithms::PS,
        generics::{BlindSignature, Commitment},
    },
};

/// Holder state between the issue request and the Issuer answer.
///
/// The blinding factor used for the commitment is the one used for unblinding, and
/// [`IssuanceSession::obtain_credential`] consumes the session so it cannot be used twice.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct IssuanceSession<CS: PsCiphersuite> {
    blind_factor: BlindFactor,
    hidden: AttributeMap,
    #[serde(skip)]
    _cs: PhantomData<CS>,
}

impl<CS: PsCiphersuite> IssuanceSession<CS> {
    /// Starts an issuance, committing to `hidden`. The returned commitment goes to the Issuer.
    pub fn new(pk: &PSPublicKey, hidden: AttributeMap) -> Result<(Self, Commitment<PS<CS>>), Error> {
        let (commitment, blind_factor) = Commitment::<PS<CS>>::commit(pk, &hidden)?;

        let session = Self {
            blind_factor,
            hidden,
            _cs: PhantomData,
        };
        Ok((session, commitment))
    }

    pub fn hidden_attributes(&self) -> &AttributeMap {
        &self.hidden
    }

    /// # Description
    /// Unblinds the Issuer answer and checks the resulting signature over the hidden
    /// attributes of the session together with the `known` ones chosen by the Issuer.
    ///
    /// # Output:
    /// an [`AnonymousCredential`], or [`Error::InvalidSignature`] if the Issuer did not sign the expected vector.
    pub fn obtain_credential(
        self,
        pk: &PSPublicKey,
        blind_signature: &BlindSignature<PS<CS>>,
        known: &AttributeMap,
    ) -> Result<AnonymousCredential<CS>, Error> {
        let signature = blind_signature.unblind_sign(&self.blind_factor)?;

        let mut attributes = self.hidden;
        for (name, value) in known.iter() {
            attributes.insert(name, *value);
        }

        let credential = AnonymousCredential::new(pk, &signature, &attributes).map_err(|e| {
            log::warn!("Unblinded signature rejected: {}", e);
            e
        })?;

        log::debug!("Credential obtained over {} attributes", credential.attributes().len());

        Ok(credential)
    }
}
