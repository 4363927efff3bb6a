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

use thiserror::Error;

#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("Error during keypair generation: {0}")]
    KeyGenError(String),
    #[error("The randomness source failed")]
    RandomnessError,
    #[error("Wrong number of attributes: expected {expected}, received {received}")]
    DimensionMismatch { expected: usize, received: usize },
    #[error("Attribute `{0}` is not part of the schema")]
    UnknownAttribute(String),
    #[error("Attribute `{0}` appears more than once")]
    DuplicateAttribute(String),
    #[error("Attribute index {0} is out of range or not sorted")]
    InvalidAttributeIndex(usize),
    #[error("Not a valid Signature")]
    InvalidSignature,
    #[error("Invalid Proof of Knowledge")]
    InvalidProof,
    /// A signature (or blind signature) component equals the identity of G1.
    #[error("h == Identity_G1")]
    IdentityElementError,
    #[error("Error during deserialization: {0}")]
    SerializationError(String),
    #[error("Error during hash to scalar computation")]
    HashToScalarError,
}
