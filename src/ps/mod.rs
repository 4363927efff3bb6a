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

//! The [Pointcheval-Sanders Signature Scheme](https://eprint.iacr.org/2015/525)
//! signs a vector of scalars with a signature made of two G1 points, whatever the number of attributes.
//! On top of it this module builds an anonymous credential system:
//! - **Blind Issuance**: the Holder commits to the attributes it wants to keep secret and proves knowledge
//!                       of the opening; the Issuer signs the commitment together with the attributes it knows,
//!                       and the Holder removes its blinding factor to obtain a plain signature.
//! - **Selective Disclosure**: the Holder re-randomizes the signature and proves, in zero-knowledge, knowledge
//!                             of the undisclosed attributes, revealing only the chosen ones.
//! - **Unlinkable Proofs**: every presentation uses fresh randomness, so two presentations of the same credential
//!                          cannot be correlated.
//! - **Replay resistance**: the Fiat-Shamir challenge binds a Verifier-chosen message (nonce, session identifier).
//! # Usage
//! Blind issuance is behind the `ps_blind` feature, enabled by default.
//! ```toml
//! ps-anoncreds = { version = "0.1", default-features = false }
//! ```

#[cfg(feature = "ps_blind")]
/// Module for blind signatures
pub mod blind;
/// Module for ciphersuites
pub mod ciphersuites;
#[cfg(feature = "ps_blind")]
/// Module for commitments
pub mod commitment;
/// Module for credentials
pub mod credential;
#[cfg(feature = "ps_blind")]
/// Module for the Holder side of the issuance protocol
pub mod issuance;
/// Module for keys
pub mod keys;
/// Module for proofs
pub mod proof;
/// Module for attribute schemas
pub mod schema;
/// Module for signatures
pub mod signature;
