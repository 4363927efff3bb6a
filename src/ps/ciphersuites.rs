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

use core::fmt::Debug;
use digest::HashMarker;
use elliptic_curve::hash2curve::{ExpandMsg, ExpandMsgXmd, ExpandMsgXof};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use sha3::Shake256;

pub trait PsCiphersuite: Clone + Copy + Eq + Debug + Send + Sync + 'static {
    const ID: &'static [u8];
    /// DST of the domain scalar binding the public key
    const DOMAIN_DST: &'static [u8];
    /// DST of the challenge of the proof of knowledge of a commitment opening
    const COMMIT_DST: &'static [u8];
    /// DST of the challenge of the disclosure proof
    const PROOF_DST: &'static [u8];
    type HashAlg: HashMarker;
    type Expander: for<'a> ExpandMsg<'a>;
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Bls12381Shake256 {}
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Bls12381Sha256 {}

impl PsCiphersuite for Bls12381Shake256 {
    const ID: &'static [u8] = b"PS_BLS12381G1_XOF:SHAKE-256_";
    const DOMAIN_DST: &'static [u8] = b"PS_BLS12381G1_XOF:SHAKE-256_H2S_DOMAIN_";
    const COMMIT_DST: &'static [u8] = b"PS_BLS12381G1_XOF:SHAKE-256_H2S_COMMIT_CHALLENGE_";
    const PROOF_DST: &'static [u8] = b"PS_BLS12381G1_XOF:SHAKE-256_H2S_PROOF_CHALLENGE_";
    type HashAlg = Shake256;
    type Expander = ExpandMsgXof<Self::HashAlg>;
}

impl PsCiphersuite for Bls12381Sha256 {
    const ID: &'static [u8] = b"PS_BLS12381G1_XMD:SHA-256_";
    const DOMAIN_DST: &'static [u8] = b"PS_BLS12381G1_XMD:SHA-256_H2S_DOMAIN_";
    const COMMIT_DST: &'static [u8] = b"PS_BLS12381G1_XMD:SHA-256_H2S_COMMIT_CHALLENGE_";
    const PROOF_DST: &'static [u8] = b"PS_BLS12381G1_XMD:SHA-256_H2S_PROOF_CHALLENGE_";
    type HashAlg = Sha256;
    type Expander = ExpandMsgXmd<Self::HashAlg>;
}
