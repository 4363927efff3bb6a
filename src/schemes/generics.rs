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

use super::algorithms::Scheme;
use core::convert::Infallible;
use core::marker::PhantomData;
use serde::{Deserialize, Serialize};

use crate::ps::{proof::PSPoKSignature, signature::PSSignature};

#[cfg(feature = "ps_blind")]
use crate::ps::{blind::PSBlindSignature, commitment::PSCommitment, proof::PSZKPoK};

#[cfg(feature = "ps_blind")]
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub enum BlindSignature<S: Scheme> {
    PS(PSBlindSignature),
    #[serde(skip)]
    _Unreachable(PhantomData<S>, Infallible),
}

#[cfg(feature = "ps_blind")]
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub enum Commitment<S: Scheme> {
    PS(PSCommitment),
    #[serde(skip)]
    _Unreachable(PhantomData<S>, Infallible),
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub enum PoKSignature<S: Scheme> {
    PS(PSPoKSignature),
    #[serde(skip)]
    _Unreachable(PhantomData<S>, Infallible),
}

#[cfg(feature = "ps_blind")]
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub enum ZKPoK<S: Scheme> {
    PS(PSZKPoK),
    #[serde(skip)]
    _Unreachable(PhantomData<S>, Infallible),
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub enum Signature<S: Scheme> {
    PS(PSSignature),
    #[serde(skip)]
    _Unreachable(PhantomData<S>, Infallible),
}

#[cfg(feature = "ps_blind")]
impl<S: Scheme> BlindSignature<S> {
    pub fn psBlindSignature(&self) -> &PSBlindSignature {
        match self {
            Self::PS(inner) => inner,
            Self::_Unreachable(_, never) => match *never {},
        }
    }
}

#[cfg(feature = "ps_blind")]
impl<S: Scheme> Commitment<S> {
    pub fn psCommitment(&self) -> &PSCommitment {
        match self {
            Self::PS(inner) => inner,
            Self::_Unreachable(_, never) => match *never {},
        }
    }
}

impl<S: Scheme> PoKSignature<S> {
    pub fn psPoKSignature(&self) -> &PSPoKSignature {
        match self {
            Self::PS(inner) => inner,
            Self::_Unreachable(_, never) => match *never {},
        }
    }
}

#[cfg(feature = "ps_blind")]
impl<S: Scheme> ZKPoK<S> {
    pub fn psZKPoK(&self) -> &PSZKPoK {
        match self {
            Self::PS(inner) => inner,
            Self::_Unreachable(_, never) => match *never {},
        }
    }
}

impl<S: Scheme> Signature<S> {
    pub fn psSignature(&self) -> &PSSignature {
        match self {
            Self::PS(inner) => inner,
            Self::_Unreachable(_, never) => match *never {},
        }
    }
}
