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

use super::{
    ciphersuites::PsCiphersuite,
    keys::PSPublicKey,
    schema::AttributeMap,
    signature::{pairing_check, PSSignature},
};
use crate::{
    errors::Error,
    schemes::{algorithms::PS, generics::PoKSignature},
    utils::{
        message::Attribute,
        util::{
            get_remaining_indexes,
            ps_utils::{
                calculate_domain, calculate_random_scalars, g1_to_bytes, g2_to_bytes, hash_to_scalar,
                i2osp, OctetReader, ScalarExt, LENGTH_BYTES, SCALAR_BYTES,
            },
        },
    },
};

#[cfg(feature = "ps_blind")]
use crate::schemes::generics::ZKPoK;

/// Non-interactive proof of knowledge of a credential, disclosing a subset of its attributes.
///
/// `(h', s')` is the randomized signature, `kappa = X2 · g2^t · Π_{hidden} Y2_j^{m_j}` links it to the
/// hidden attributes. The Schnorr proof `(challenge, t_cap, m_cap)` shows knowledge of the opening of
/// `kappa / X2` over `(g2, Y2_hidden)`.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct PSPoKSignature {
    h_prime: G1Projective,
    s_prime: G1Projective,
    kappa: G2Projective,
    disclosed: Vec<(usize, Attribute)>,
    challenge: Scalar,
    t_cap: Scalar,
    m_cap: Vec<Scalar>,
}

impl PSPoKSignature {
    pub fn h_prime(&self) -> G1Projective {
        self.h_prime
    }

    pub fn s_prime(&self) -> G1Projective {
        self.s_prime
    }

    /// Disclosed `(schema index, value)` pairs, sorted by index.
    pub fn disclosed(&self) -> &[(usize, Attribute)] {
        &self.disclosed
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes: Vec<u8> = Vec::new();

        bytes.extend_from_slice(&g1_to_bytes(&self.h_prime));
        bytes.extend_from_slice(&g1_to_bytes(&self.s_prime));
        bytes.extend_from_slice(&g2_to_bytes(&self.kappa));
        bytes.extend_from_slice(&i2osp(self.disclosed.len(), LENGTH_BYTES));
        self.disclosed.iter().for_each(|(i, m)| {
            bytes.extend_from_slice(&i2osp(*i, LENGTH_BYTES));
            bytes.extend_from_slice(&m.to_bytes_be());
        });
        bytes.extend_from_slice(&self.challenge.to_bytes_be());
        bytes.extend_from_slice(&self.t_cap.to_bytes_be());
        self.m_cap.iter().for_each(|v| bytes.extend_from_slice(&v.to_bytes_be()));
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let mut reader = OctetReader::new(bytes);

        let h_prime = reader.read_g1()?;
        let s_prime = reader.read_g1()?;
        let kappa = reader.read_g2()?;

        let R = reader.read_count(LENGTH_BYTES + SCALAR_BYTES)?;
        let mut disclosed = Vec::with_capacity(R);
        for _ in 0..R {
            let i = reader.read_usize()?;
            let m = Attribute::new(reader.read_scalar()?);
            disclosed.push((i, m));
        }

        let challenge = reader.read_scalar()?;
        let t_cap = reader.read_scalar()?;

        //every remaining chunk is a response for an undisclosed attribute
        let mut m_cap: Vec<Scalar> = Vec::new();
        while reader.remaining() > 0 {
            m_cap.push(reader.read_scalar()?);
        }
        reader.finish()?;

        Ok(Self { h_prime, s_prime, kappa, disclosed, challenge, t_cap, m_cap })
    }
}

impl<CS: PsCiphersuite> PoKSignature<PS<CS>> {
    /// # Description
    /// Creates a disclosure proof for a credential: the signature is re-randomized with fresh `r, t`,
    /// the attributes in `disclosed` are revealed and knowledge of the ones in `hidden` is proven
    /// in zero-knowledge. The proof is bound to `message`.
    ///
    /// # Inputs:
    /// * `pk` (REQUIRED), the Issuer public key.
    /// * `signature` (REQUIRED), the credential signature.
    /// * `disclosed` (REQUIRED), attributes revealed to the Verifier.
    /// * `hidden` (REQUIRED), attributes kept secret. Together with `disclosed` they must name every schema attribute once.
    /// * `message` (REQUIRED), Verifier-chosen context (nonce, session identifier).
    ///
    /// # Output:
    /// a [`PoKSignature::PS`] or [`Error`].
    pub fn proof_gen(
        pk: &PSPublicKey,
        signature: &PSSignature,
        disclosed: &AttributeMap,
        hidden: &AttributeMap,
        message: &[u8],
    ) -> Result<Self, Error> {
        pk.check_dimensions()?;
        let disclosed = pk.schema.resolve(disclosed)?;
        let hidden = pk.schema.resolve(hidden)?;

        let disclosed_indexes: Vec<usize> = disclosed.iter().map(|(i, _)| *i).collect();
        let hidden_indexes: Vec<usize> = hidden.iter().map(|(i, _)| *i).collect();
        pk.schema.check_partition(&disclosed_indexes, &hidden_indexes)?;

        if bool::from(signature.h.is_identity()) {
            return Err(Error::IdentityElementError);
        }

        let proof = core_proof_gen::<CS>(pk, signature, &disclosed, &hidden, message)?;

        Ok(Self::PS(proof))
    }

    /// # Description
    /// Verifies a disclosure proof against the Issuer public key and the context `message`.
    ///
    /// # Output:
    /// the disclosed attributes, named by the schema, or [`Error`] if the proof is rejected.
    pub fn proof_verify(&self, pk: &PSPublicKey, message: &[u8]) -> Result<AttributeMap, Error> {
        core_proof_verify::<CS>(pk, self.psPoKSignature(), message)
    }

    pub fn h_prime(&self) -> G1Projective {
        self.psPoKSignature().h_prime
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.psPoKSignature().to_bytes()
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        Ok(Self::PS(PSPoKSignature::from_bytes(bytes)?))
    }
}

fn core_proof_gen<CS: PsCiphersuite>(
    pk: &PSPublicKey,
    signature: &PSSignature,
    disclosed: &[(usize, Attribute)],
    hidden: &[(usize, Attribute)],
    message: &[u8],
) -> Result<PSPoKSignature, Error> {
    let U = hidden.len();

    let random_scalars = calculate_random_scalars(U + 3)?;
    let r = random_scalars[0];
    let t = random_scalars[1];
    let t_tilde = random_scalars[2];
    let m_tilde = &random_scalars[3..];

    let randomized = signature.randomize(r, t);

    let mut kappa = pk.X2 + pk.g2 * t;
    for (j, m) in hidden {
        kappa += pk.Y2[*j] * m.value;
    }

    let mut T = pk.g2 * t_tilde;
    for idx in 0..U {
        T += pk.Y2[hidden[idx].0] * m_tilde[idx];
    }

    let challenge = calculate_proof_challenge::<CS>(pk, &randomized, &kappa, &T, disclosed, message)?;

    let t_cap = t_tilde + t * challenge;
    let m_cap: Vec<Scalar> = (0..U).map(|idx| m_tilde[idx] + hidden[idx].1.value * challenge).collect();

    log::debug!("Disclosure proof generated: {} disclosed, {} hidden", disclosed.len(), U);

    Ok(PSPoKSignature {
        h_prime: randomized.h,
        s_prime: randomized.s,
        kappa,
        disclosed: disclosed.to_vec(),
        challenge,
        t_cap,
        m_cap,
    })
}

fn core_proof_verify<CS: PsCiphersuite>(pk: &PSPublicKey, proof: &PSPoKSignature, message: &[u8]) -> Result<AttributeMap, Error> {
    pk.check_dimensions()?;
    let L = pk.attribute_count();
    let R = proof.disclosed.len();

    let mut previous: Option<usize> = None;
    for (i, _) in &proof.disclosed {
        if *i >= L || previous.map_or(false, |p| p >= *i) {
            return Err(Error::InvalidAttributeIndex(*i));
        }
        previous = Some(*i);
    }

    // R <= L holds since indexes are unique and in range
    let U = L - R;
    if proof.m_cap.len() != U {
        return Err(Error::DimensionMismatch {
            expected: U,
            received: proof.m_cap.len(),
        });
    }

    if bool::from(proof.h_prime.is_identity()) {
        log::warn!("Disclosure proof rejected: h' == Identity_G1");
        return Err(Error::IdentityElementError);
    }

    let disclosed_indexes: Vec<usize> = proof.disclosed.iter().map(|(i, _)| *i).collect();
    let hidden_indexes = get_remaining_indexes(L, &disclosed_indexes);

    let mut T = pk.g2 * proof.t_cap;
    for idx in 0..U {
        T += pk.Y2[hidden_indexes[idx]] * proof.m_cap[idx];
    }
    T -= (proof.kappa - pk.X2) * proof.challenge;

    let randomized = PSSignature { h: proof.h_prime, s: proof.s_prime };
    let cv = calculate_proof_challenge::<CS>(pk, &randomized, &proof.kappa, &T, &proof.disclosed, message)?;
    if cv != proof.challenge {
        log::warn!("Disclosure proof rejected: challenge mismatch");
        return Err(Error::InvalidProof);
    }

    let mut K = proof.kappa;
    for (i, m) in &proof.disclosed {
        K += pk.Y2[*i] * m.value;
    }

    if !pairing_check(&proof.h_prime, &K, &proof.s_prime, &pk.g2) {
        log::warn!("Disclosure proof rejected: pairing check failed");
        return Err(Error::InvalidProof);
    }

    pk.schema.name_attributes(&proof.disclosed)
}

fn calculate_proof_challenge<CS: PsCiphersuite>(
    pk: &PSPublicKey,
    randomized: &PSSignature,
    kappa: &G2Projective,
    T: &G2Projective,
    disclosed: &[(usize, Attribute)],
    message: &[u8],
) -> Result<Scalar, Error> {
    let domain = calculate_domain::<CS>(pk)?;

    let mut c_arr: Vec<u8> = Vec::new();
    c_arr.extend_from_slice(&domain.to_bytes_be());
    c_arr.extend_from_slice(&g1_to_bytes(&randomized.h));
    c_arr.extend_from_slice(&g1_to_bytes(&randomized.s));
    c_arr.extend_from_slice(&g2_to_bytes(kappa));
    c_arr.extend_from_slice(&g2_to_bytes(T));
    c_arr.extend_from_slice(&i2osp(disclosed.len(), LENGTH_BYTES));
    disclosed.iter().for_each(|(i, m)| {
        c_arr.extend_from_slice(&i2osp(*i, LENGTH_BYTES));
        c_arr.extend_from_slice(&m.to_bytes_be());
    });
    c_arr.extend_from_slice(&i2osp(message.len(), LENGTH_BYTES));
    c_arr.extend_from_slice(message);

    hash_to_scalar::<CS>(&c_arr, CS::PROOF_DST)
}

/// Proof of knowledge of the opening `(t, m_j)` of a commitment `C = g1^t · Π_j Y1_j^{m_j}`.
#[cfg(feature = "ps_blind")]
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct PSZKPoK {
    pub(crate) challenge: Scalar,
    pub(crate) t_cap: Scalar,
    pub(crate) m_cap: Vec<Scalar>,
}

#[cfg(feature = "ps_blind")]
impl PSZKPoK {
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes: Vec<u8> = Vec::new();
        bytes.extend_from_slice(&self.challenge.to_bytes_be());
        bytes.extend_from_slice(&self.t_cap.to_bytes_be());
        self.m_cap.iter().for_each(|v| bytes.extend_from_slice(&v.to_bytes_be()));
        bytes
    }

    pub(crate) fn read(reader: &mut OctetReader<'_>, M: usize) -> Result<Self, Error> {
        let challenge = reader.read_scalar()?;
        let t_cap = reader.read_scalar()?;
        let m_cap = (0..M).map(|_| reader.read_scalar()).collect::<Result<Vec<_>, _>>()?;
        Ok(Self { challenge, t_cap, m_cap })
    }
}

#[cfg(feature = "ps_blind")]
impl<CS: PsCiphersuite> ZKPoK<PS<CS>> {
    /// # Description
    /// Proves knowledge of `blind` and of the committed attributes for `commitment = g1^blind · Π Y1_i^{m_i}`.
    /// `committed` pairs must be sorted by schema index.
    pub fn generate_proof(
        pk: &PSPublicKey,
        commitment: &G1Projective,
        blind: &Scalar,
        committed: &[(usize, Attribute)],
    ) -> Result<Self, Error> {
        let M = committed.len();

        let random_scalars = calculate_random_scalars(M + 1)?;
        let t_tilde = random_scalars[0];
        let m_tilde = &random_scalars[1..];

        let mut Cbar = pk.g1 * t_tilde;
        for i in 0..M {
            Cbar += pk.Y1[committed[i].0] * m_tilde[i];
        }

        let indexes: Vec<usize> = committed.iter().map(|(i, _)| *i).collect();
        let challenge = calculate_commit_challenge::<CS>(pk, commitment, &Cbar, &indexes)?;

        let t_cap = t_tilde + *blind * challenge;
        let m_cap: Vec<Scalar> = (0..M).map(|i| m_tilde[i] + committed[i].1.value * challenge).collect();

        Ok(Self::PS(PSZKPoK { challenge, t_cap, m_cap }))
    }

    /// # Description
    /// Verifies the proof for `commitment` over the schema positions `indexes`.
    ///
    /// # Output:
    /// [`Ok`] or [`Error::InvalidProof`].
    pub fn verify_proof(&self, pk: &PSPublicKey, commitment: &G1Projective, indexes: &[usize]) -> Result<(), Error> {
        let proof = self.psZKPoK();
        let M = indexes.len();

        if proof.m_cap.len() != M {
            return Err(Error::DimensionMismatch {
                expected: M,
                received: proof.m_cap.len(),
            });
        }
        if let Some(i) = indexes.iter().find(|&&i| i >= pk.Y1.len()) {
            return Err(Error::InvalidAttributeIndex(*i));
        }

        let mut Cbar = pk.g1 * proof.t_cap;
        for i in 0..M {
            Cbar += pk.Y1[indexes[i]] * proof.m_cap[i];
        }
        Cbar -= commitment * proof.challenge;

        let cv = calculate_commit_challenge::<CS>(pk, commitment, &Cbar, indexes)?;

        if cv != proof.challenge {
            Err(Error::InvalidProof)
        } else {
            Ok(())
        }
    }
}

#[cfg(feature = "ps_blind")]
fn calculate_commit_challenge<CS: PsCiphersuite>(
    pk: &PSPublicKey,
    commitment: &G1Projective,
    Cbar: &G1Projective,
    indexes: &[usize],
) -> Result<Scalar, Error> {
    let domain = calculate_domain::<CS>(pk)?;

    let mut c_arr: Vec<u8> = Vec::new();
    c_arr.extend_from_slice(&domain.to_bytes_be());
    c_arr.extend_from_slice(&g1_to_bytes(commitment));
    c_arr.extend_from_slice(&g1_to_bytes(Cbar));
    c_arr.extend_from_slice(&i2osp(indexes.len(), LENGTH_BYTES));
    indexes.iter().for_each(|&i| c_arr.extend_from_slice(&i2osp(i, LENGTH_BYTES)));

    hash_to_scalar::<CS>(&c_arr, CS::COMMIT_DST)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        keys::pair::KeyPair,
        ps::{keys::PSSecretKey, schema::AttributeSchema},
        schemes::{
            algorithms::{PsBls12381Sha256, PsBls12381Shake256, Scheme},
            generics::Signature,
        },
    };

    macro_rules! proof_tests {
        ( $( $t:ident: { $( $n:ident => $f:ident, )+ }, )+ ) => { $($(
            #[test] fn $n() { $f::<$t>(); }
        )+)+ }
    }

    proof_tests! {
        PsBls12381Sha256: {
            disclose_some_sha256 => disclose_some,
            disclose_none_and_all_sha256 => disclose_none_and_all,
            wrong_message_sha256 => wrong_message,
            mutated_disclosure_sha256 => mutated_disclosure,
            proof_octets_sha256 => proof_octets,
        },
        PsBls12381Shake256: {
            disclose_some_shake256 => disclose_some,
            disclose_none_and_all_shake256 => disclose_none_and_all,
            wrong_message_shake256 => wrong_message,
            mutated_disclosure_shake256 => mutated_disclosure,
            proof_octets_shake256 => proof_octets,
        },
    }

    const MESSAGE: &[u8] = b"session-42";

    fn setup<S: Scheme>() -> (PSSecretKey, PSPublicKey, PSSignature) {
        let schema = AttributeSchema::new(["age", "country", "role"]).unwrap();
        let (sk, pk) = KeyPair::<PS<S::Ciphersuite>>::generate(schema).unwrap().into_parts();
        let messages = [Attribute::from(25u64), Attribute::from(7u64), Attribute::from(2u64)];
        let signature = Signature::<PS<S::Ciphersuite>>::sign(&sk, &messages).unwrap();
        (sk, pk, *signature.psSignature())
    }

    fn disclosed() -> AttributeMap {
        AttributeMap::new().with("country", 7u64).with("role", 2u64)
    }

    fn hidden() -> AttributeMap {
        AttributeMap::new().with("age", 25u64)
    }

    fn disclose_some<S: Scheme>() {
        let (_, pk, signature) = setup::<S>();
        let proof =
            PoKSignature::<PS<S::Ciphersuite>>::proof_gen(&pk, &signature, &disclosed(), &hidden(), MESSAGE).unwrap();

        let revealed = proof.proof_verify(&pk, MESSAGE).unwrap();
        assert_eq!(revealed.len(), 2);
        assert_eq!(revealed.get("country"), Some(&Attribute::from(7u64)));
        assert_eq!(revealed.get("role"), Some(&Attribute::from(2u64)));
        assert!(!revealed.contains("age"));
        assert_ne!(proof.h_prime(), signature.h);
    }

    fn disclose_none_and_all<S: Scheme>() {
        let (_, pk, signature) = setup::<S>();
        let everything = AttributeMap::new()
            .with("age", 25u64)
            .with("country", 7u64)
            .with("role", 2u64);

        let none = PoKSignature::<PS<S::Ciphersuite>>::proof_gen(&pk, &signature, &AttributeMap::new(), &everything, MESSAGE)
            .unwrap();
        assert!(none.proof_verify(&pk, MESSAGE).unwrap().is_empty());

        let all = PoKSignature::<PS<S::Ciphersuite>>::proof_gen(&pk, &signature, &everything, &AttributeMap::new(), MESSAGE)
            .unwrap();
        assert_eq!(all.proof_verify(&pk, MESSAGE).unwrap().len(), 3);
    }

    fn wrong_message<S: Scheme>() {
        let (_, pk, signature) = setup::<S>();
        let proof =
            PoKSignature::<PS<S::Ciphersuite>>::proof_gen(&pk, &signature, &disclosed(), &hidden(), MESSAGE).unwrap();

        assert_eq!(proof.proof_verify(&pk, b"session-43"), Err(Error::InvalidProof));
        assert_eq!(proof.proof_verify(&pk, b""), Err(Error::InvalidProof));
    }

    fn mutated_disclosure<S: Scheme>() {
        let (_, pk, signature) = setup::<S>();
        let proof =
            PoKSignature::<PS<S::Ciphersuite>>::proof_gen(&pk, &signature, &disclosed(), &hidden(), MESSAGE).unwrap();
        let inner = proof.psPoKSignature().clone();

        // a different value for a disclosed attribute
        let mut altered = inner.clone();
        altered.disclosed[0].1 = Attribute::from(8u64);
        let altered = PoKSignature::<PS<S::Ciphersuite>>::PS(altered);
        assert_eq!(altered.proof_verify(&pk, MESSAGE), Err(Error::InvalidProof));

        // claiming fewer disclosed attributes
        let mut altered = inner.clone();
        altered.disclosed.pop();
        let altered = PoKSignature::<PS<S::Ciphersuite>>::PS(altered);
        assert!(altered.proof_verify(&pk, MESSAGE).is_err());

        // moving a disclosed value to another position
        let mut altered = inner.clone();
        altered.disclosed[1].0 = 0;
        altered.disclosed.swap(0, 1);
        let altered = PoKSignature::<PS<S::Ciphersuite>>::PS(altered);
        assert_eq!(altered.proof_verify(&pk, MESSAGE), Err(Error::InvalidProof));

        // disclosed index outside the schema
        let mut altered = inner.clone();
        altered.disclosed[1].0 = 9;
        let altered = PoKSignature::<PS<S::Ciphersuite>>::PS(altered);
        assert_eq!(altered.proof_verify(&pk, MESSAGE), Err(Error::InvalidAttributeIndex(9)));

        // disclosed pairs out of order
        let mut altered = inner.clone();
        altered.disclosed.swap(0, 1);
        let altered = PoKSignature::<PS<S::Ciphersuite>>::PS(altered);
        assert_eq!(altered.proof_verify(&pk, MESSAGE), Err(Error::InvalidAttributeIndex(1)));

        // one response more than the hidden attributes
        let mut altered = inner.clone();
        altered.m_cap.push(altered.t_cap);
        let altered = PoKSignature::<PS<S::Ciphersuite>>::PS(altered);
        assert_eq!(
            altered.proof_verify(&pk, MESSAGE),
            Err(Error::DimensionMismatch { expected: 1, received: 2 })
        );

        // tampered randomized signature
        let mut altered = inner.clone();
        altered.s_prime += G1Projective::GENERATOR;
        let altered = PoKSignature::<PS<S::Ciphersuite>>::PS(altered);
        assert_eq!(altered.proof_verify(&pk, MESSAGE), Err(Error::InvalidProof));

        let mut altered = inner;
        altered.h_prime = G1Projective::IDENTITY;
        let altered = PoKSignature::<PS<S::Ciphersuite>>::PS(altered);
        assert_eq!(altered.proof_verify(&pk, MESSAGE), Err(Error::IdentityElementError));
    }

    fn proof_octets<S: Scheme>() {
        let (_, pk, signature) = setup::<S>();
        let proof =
            PoKSignature::<PS<S::Ciphersuite>>::proof_gen(&pk, &signature, &disclosed(), &hidden(), MESSAGE).unwrap();

        let restored = PoKSignature::<PS<S::Ciphersuite>>::from_bytes(&proof.to_bytes()).unwrap();
        assert_eq!(restored, proof);
        assert!(restored.proof_verify(&pk, MESSAGE).is_ok());

        let mut bytes = proof.to_bytes();
        bytes.push(0);
        assert!(PoKSignature::<PS<S::Ciphersuite>>::from_bytes(&bytes).is_err());
    }

    #[test]
    fn proof_serde_json() {
        let (_, pk, signature) = setup::<PsBls12381Shake256>();
        let proof =
            PoKSignature::<PsBls12381Shake256>::proof_gen(&pk, &signature, &disclosed(), &hidden(), MESSAGE).unwrap();

        let json = serde_json::to_string(&proof).unwrap();
        let back: PoKSignature<PsBls12381Shake256> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, proof);
        assert!(back.proof_verify(&pk, MESSAGE).is_ok());

        let json = serde_json::to_string(pk.schema.names()).unwrap();
        assert_eq!(json, r#"["age","country","role"]"#);
    }

    #[test]
    fn proof_from_another_issuer_is_rejected() {
        let (_, pk, signature) = setup::<PsBls12381Sha256>();
        let (_, other_pk, _) = setup::<PsBls12381Sha256>();
        let proof =
            PoKSignature::<PsBls12381Sha256>::proof_gen(&pk, &signature, &disclosed(), &hidden(), MESSAGE).unwrap();

        assert!(proof.proof_verify(&other_pk, MESSAGE).is_err());
    }

    #[test]
    fn proof_is_bound_to_the_ciphersuite() {
        let (_, pk, signature) = setup::<PsBls12381Sha256>();
        let proof =
            PoKSignature::<PsBls12381Sha256>::proof_gen(&pk, &signature, &disclosed(), &hidden(), MESSAGE).unwrap();
        let shake = PoKSignature::<PsBls12381Shake256>::from_bytes(&proof.to_bytes()).unwrap();

        assert_eq!(shake.proof_verify(&pk, MESSAGE), Err(Error::InvalidProof));
    }

    #[test]
    fn wrong_hidden_value_gives_invalid_proof() {
        let (_, pk, signature) = setup::<PsBls12381Sha256>();
        let lie = AttributeMap::new().with("age", 30u64);
        let proof = PoKSignature::<PsBls12381Sha256>::proof_gen(&pk, &signature, &disclosed(), &lie, MESSAGE).unwrap();

        assert_eq!(proof.proof_verify(&pk, MESSAGE), Err(Error::InvalidProof));
    }

    #[test]
    fn overlapping_or_incomplete_partition_is_rejected() {
        let (_, pk, signature) = setup::<PsBls12381Sha256>();

        let overlap = AttributeMap::new().with("age", 25u64).with("role", 2u64);
        assert_eq!(
            PoKSignature::<PsBls12381Sha256>::proof_gen(&pk, &signature, &disclosed(), &overlap, MESSAGE),
            Err(Error::DuplicateAttribute("role".to_owned()))
        );

        assert_eq!(
            PoKSignature::<PsBls12381Sha256>::proof_gen(&pk, &signature, &disclosed(), &AttributeMap::new(), MESSAGE),
            Err(Error::DimensionMismatch { expected: 3, received: 2 })
        );
    }

    #[cfg(feature = "ps_blind")]
    #[test]
    fn commitment_proof_verifies() {
        use crate::utils::util::ps_utils::get_random;

        let (_, pk, _) = setup::<PsBls12381Sha256>();
        let blind = get_random().unwrap();
        let committed = vec![(0usize, Attribute::from(25u64)), (2usize, Attribute::from(2u64))];
        let commitment = pk.g1 * blind + pk.Y1[0] * committed[0].1.value + pk.Y1[2] * committed[1].1.value;

        let proof = ZKPoK::<PsBls12381Sha256>::generate_proof(&pk, &commitment, &blind, &committed).unwrap();
        assert!(proof.verify_proof(&pk, &commitment, &[0, 2]).is_ok());

        assert_eq!(proof.verify_proof(&pk, &commitment, &[0, 1]), Err(Error::InvalidProof));
        assert_eq!(
            proof.verify_proof(&pk, &(commitment + pk.g1), &[0, 2]),
            Err(Error::InvalidProof)
        );
        assert_eq!(proof.verify_proof(&pk, &commitment, &[0, 5]), Err(Error::InvalidAttributeIndex(5)));
    }
}
