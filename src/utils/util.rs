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

pub fn get_remaining_indexes(length: usize, indexes: &[usize]) -> Vec<usize> {
    let mut remaining: Vec<usize> = Vec::new();

    for i in 0..length {
        if !indexes.contains(&i) {
            remaining.push(i);
        }
    }

    remaining
}

pub mod ps_utils {
    use bls12_381_plus::{G1Affine, G1Projective, G2Affine, G2Projective, Scalar};
    use elliptic_curve::hash2curve::{ExpandMsg, Expander};
    use group::Curve;
    use rand::{rngs::OsRng, RngCore};

    use crate::{
        errors::Error,
        ps::{ciphersuites::PsCiphersuite, keys::PSPublicKey},
    };

    pub const G1_COMPRESSED_BYTES: usize = 48;
    pub const G2_COMPRESSED_BYTES: usize = 96;
    pub const SCALAR_BYTES: usize = 32;
    /// Length of every count and index in the octet encodings
    pub const LENGTH_BYTES: usize = 8;
    pub(crate) const EXPAND_LEN: usize = 48;

    /// Integer to Octet Stream, big-endian
    pub fn i2osp(x: usize, len: usize) -> Vec<u8> {
        let bytes = (x as u64).to_be_bytes();
        if len >= bytes.len() {
            let mut out = vec![0u8; len - bytes.len()];
            out.extend_from_slice(&bytes);
            out
        } else {
            bytes[bytes.len() - len..].to_vec()
        }
    }

    pub fn hash_to_scalar<CS: PsCiphersuite>(msg_octets: &[u8], dst: &[u8]) -> Result<Scalar, Error> {
        let mut uniform_bytes = [0u8; EXPAND_LEN];
        CS::Expander::expand_message(&[msg_octets], &[dst], EXPAND_LEN)
            .map_err(|_| Error::HashToScalarError)?
            .fill_bytes(&mut uniform_bytes);

        Ok(Scalar::from_okm(&uniform_bytes))
    }

    /// Draws a uniformly random non-zero scalar from the OS randomness source.
    pub fn get_random() -> Result<Scalar, Error> {
        let mut buf = [0u8; EXPAND_LEN];
        loop {
            OsRng
                .try_fill_bytes(&mut buf)
                .map_err(|_| Error::RandomnessError)?;
            let scalar = Scalar::from_okm(&buf);
            if scalar != Scalar::ZERO {
                return Ok(scalar);
            }
        }
    }

    pub fn calculate_random_scalars(count: usize) -> Result<Vec<Scalar>, Error> {
        (0..count).map(|_| get_random()).collect()
    }

    pub fn generate_nonce() -> Result<Vec<u8>, Error> {
        let mut nonce = vec![0u8; 32];
        OsRng
            .try_fill_bytes(&mut nonce)
            .map_err(|_| Error::RandomnessError)?;
        Ok(nonce)
    }

    /// Binds every challenge to the Issuer public key (schema included) and the ciphersuite.
    pub(crate) fn calculate_domain<CS: PsCiphersuite>(pk: &PSPublicKey) -> Result<Scalar, Error> {
        let mut dom_input: Vec<u8> = Vec::new();
        dom_input.extend_from_slice(&pk.to_bytes());
        dom_input.extend_from_slice(CS::ID);

        hash_to_scalar::<CS>(&dom_input, CS::DOMAIN_DST)
    }

    pub trait ScalarExt: Sized {
        fn to_bytes_be(&self) -> [u8; SCALAR_BYTES];
        fn from_bytes_be(bytes: &[u8; SCALAR_BYTES]) -> Result<Self, Error>;
    }

    impl ScalarExt for Scalar {
        fn to_bytes_be(&self) -> [u8; SCALAR_BYTES] {
            self.to_be_bytes()
        }

        fn from_bytes_be(bytes: &[u8; SCALAR_BYTES]) -> Result<Self, Error> {
            Option::<Scalar>::from(Scalar::from_be_bytes(bytes))
                .ok_or_else(|| Error::SerializationError("non-canonical scalar".to_owned()))
        }
    }

    pub fn g1_to_bytes(point: &G1Projective) -> [u8; G1_COMPRESSED_BYTES] {
        point.to_affine().to_compressed()
    }

    pub fn g2_to_bytes(point: &G2Projective) -> [u8; G2_COMPRESSED_BYTES] {
        point.to_affine().to_compressed()
    }

    pub fn parse_g1_projective(slice: &[u8]) -> Result<G1Projective, Error> {
        let bytes = <[u8; G1_COMPRESSED_BYTES]>::try_from(slice)
            .map_err(|_| Error::SerializationError("invalid G1 point length".to_owned()))?;
        Option::<G1Affine>::from(G1Affine::from_compressed(&bytes))
            .map(G1Projective::from)
            .ok_or_else(|| Error::SerializationError("invalid G1 point".to_owned()))
    }

    pub fn parse_g2_projective(slice: &[u8]) -> Result<G2Projective, Error> {
        let bytes = <[u8; G2_COMPRESSED_BYTES]>::try_from(slice)
            .map_err(|_| Error::SerializationError("invalid G2 point length".to_owned()))?;
        Option::<G2Affine>::from(G2Affine::from_compressed(&bytes))
            .map(G2Projective::from)
            .ok_or_else(|| Error::SerializationError("invalid G2 point".to_owned()))
    }

    pub fn parse_scalar(slice: &[u8]) -> Result<Scalar, Error> {
        let bytes = <[u8; SCALAR_BYTES]>::try_from(slice)
            .map_err(|_| Error::SerializationError("invalid scalar length".to_owned()))?;
        <Scalar as ScalarExt>::from_bytes_be(&bytes)
    }

    /// Sequential reader over a canonical octet encoding.
    pub struct OctetReader<'a> {
        bytes: &'a [u8],
        offset: usize,
    }

    impl<'a> OctetReader<'a> {
        pub fn new(bytes: &'a [u8]) -> Self {
            Self { bytes, offset: 0 }
        }

        pub fn remaining(&self) -> usize {
            self.bytes.len() - self.offset
        }

        pub fn take(&mut self, len: usize) -> Result<&'a [u8], Error> {
            let end = self
                .offset
                .checked_add(len)
                .filter(|&end| end <= self.bytes.len())
                .ok_or_else(|| Error::SerializationError("unexpected end of input".to_owned()))?;
            let out = &self.bytes[self.offset..end];
            self.offset = end;
            Ok(out)
        }

        pub fn read_g1(&mut self) -> Result<G1Projective, Error> {
            parse_g1_projective(self.take(G1_COMPRESSED_BYTES)?)
        }

        pub fn read_g2(&mut self) -> Result<G2Projective, Error> {
            parse_g2_projective(self.take(G2_COMPRESSED_BYTES)?)
        }

        pub fn read_scalar(&mut self) -> Result<Scalar, Error> {
            parse_scalar(self.take(SCALAR_BYTES)?)
        }

        pub fn read_usize(&mut self) -> Result<usize, Error> {
            let bytes = <[u8; LENGTH_BYTES]>::try_from(self.take(LENGTH_BYTES)?)
                .map_err(|_| Error::SerializationError("invalid length prefix".to_owned()))?;
            usize::try_from(u64::from_be_bytes(bytes))
                .map_err(|_| Error::SerializationError("length prefix overflow".to_owned()))
        }

        /// Reads an element count and checks that `count` items of `item_len` bytes can follow.
        pub fn read_count(&mut self, item_len: usize) -> Result<usize, Error> {
            let count = self.read_usize()?;
            match count.checked_mul(item_len) {
                Some(total) if total <= self.remaining() => Ok(count),
                _ => Err(Error::SerializationError("length prefix exceeds input".to_owned())),
            }
        }

        pub fn finish(self) -> Result<(), Error> {
            if self.remaining() == 0 {
                Ok(())
            } else {
                Err(Error::SerializationError("trailing bytes".to_owned()))
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn i2osp_pads_and_truncates() {
            assert_eq!(i2osp(258, 2), vec![1u8, 2]);
            assert_eq!(i2osp(1, 8), vec![0u8, 0, 0, 0, 0, 0, 0, 1]);
            assert_eq!(i2osp(5, 10).len(), 10);
        }

        #[test]
        fn random_scalars_are_distinct() {
            let scalars = calculate_random_scalars(4).unwrap();
            for i in 0..scalars.len() {
                assert_ne!(scalars[i], Scalar::ZERO);
                for j in i + 1..scalars.len() {
                    assert_ne!(scalars[i], scalars[j]);
                }
            }
        }

        #[test]
        fn reader_rejects_truncated_and_trailing_input() {
            let point = G1Projective::GENERATOR * Scalar::from(3u64);
            let mut bytes = g1_to_bytes(&point).to_vec();

            let mut reader = OctetReader::new(&bytes[..40]);
            assert!(reader.read_g1().is_err());

            bytes.push(0);
            let mut reader = OctetReader::new(&bytes);
            assert_eq!(reader.read_g1().unwrap(), point);
            assert!(reader.finish().is_err());
        }

        #[test]
        fn reader_rejects_oversized_count() {
            let bytes = i2osp(1 << 40, LENGTH_BYTES);
            let mut reader = OctetReader::new(&bytes);
            assert!(reader.read_count(SCALAR_BYTES).is_err());
        }

        #[test]
        fn non_canonical_scalar_is_rejected() {
            assert!(parse_scalar(&[0xffu8; SCALAR_BYTES]).is_err());
        }
    }
}
