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

use bls12_381_plus::Scalar;
use serde::{Deserialize, Serialize};

use crate::{
    errors::Error,
    utils::util::ps_utils::{get_random, ScalarExt, SCALAR_BYTES},
};

/// An attribute value, already encoded as a scalar.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Attribute {
    pub value: Scalar,
}

impl Attribute {
    pub fn new(value: Scalar) -> Self {
        Self { value }
    }

    pub fn random() -> Result<Self, Error> {
        Ok(Self { value: get_random()? })
    }

    pub fn to_bytes_be(&self) -> [u8; SCALAR_BYTES] {
        self.value.to_bytes_be()
    }

    pub fn from_bytes_be(bytes: &[u8; SCALAR_BYTES]) -> Result<Self, Error> {
        Ok(Self { value: <Scalar as ScalarExt>::from_bytes_be(bytes)? })
    }
}

impl From<Scalar> for Attribute {
    fn from(value: Scalar) -> Self {
        Self { value }
    }
}

impl From<u64> for Attribute {
    fn from(value: u64) -> Self {
        Self { value: Scalar::from(value) }
    }
}
