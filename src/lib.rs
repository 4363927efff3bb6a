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

#![allow(non_snake_case)]
#![allow(non_upper_case_globals)]

//! Pointcheval-Sanders anonymous credentials over BLS12-381.
//!
//! An Issuer signs a vector of attributes, optionally without seeing some of them
//! (blind issuance), and the Holder later proves possession of the credential while
//! disclosing only a chosen subset, bound to a Verifier-chosen context message.

/// Errors
pub mod errors;
/// Key pair container and key traits
pub mod keys;
/// The Pointcheval-Sanders scheme
pub mod ps;
/// Scheme markers and generic protocol objects
pub mod schemes;
/// Utilities
pub mod utils;
