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

use serde::{Deserialize, Serialize};

use crate::{
    errors::Error,
    utils::{
        message::Attribute,
        util::ps_utils::{i2osp, OctetReader, LENGTH_BYTES},
    },
};

/// Ordered list of attribute names fixed when the Issuer keys are generated.
/// The position of a name is the index of the public key element that signs it.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct AttributeSchema {
    names: Vec<String>,
}

impl AttributeSchema {
    pub fn new<I, N>(names: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(Error::KeyGenError("empty attribute schema".to_owned()));
        }
        for (i, name) in names.iter().enumerate() {
            if names[..i].contains(name) {
                return Err(Error::DuplicateAttribute(name.clone()));
            }
        }

        Ok(Self { names })
    }

    /// Schema whose attributes are only identified by position: `attr_0`, `attr_1`, ...
    pub fn positional(len: usize) -> Result<Self, Error> {
        Self::new((0..len).map(|i| format!("attr_{}", i)))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// Pairs every attribute of the map with its schema index, sorted by index.
    pub fn resolve(&self, attributes: &AttributeMap) -> Result<Vec<(usize, Attribute)>, Error> {
        let mut resolved: Vec<(usize, Attribute)> = Vec::with_capacity(attributes.len());
        for (name, value) in attributes.iter() {
            let index = self
                .index_of(name)
                .ok_or_else(|| Error::UnknownAttribute(name.to_owned()))?;
            if resolved.iter().any(|(i, _)| *i == index) {
                return Err(Error::DuplicateAttribute(name.to_owned()));
            }
            resolved.push((index, *value));
        }
        resolved.sort_by_key(|(i, _)| *i);

        Ok(resolved)
    }

    /// Builds the map naming each `(index, value)` pair. Indexes must be in range.
    pub fn name_attributes(&self, indexed: &[(usize, Attribute)]) -> Result<AttributeMap, Error> {
        let mut map = AttributeMap::new();
        for (index, value) in indexed {
            let name = self.name(*index).ok_or(Error::InvalidAttributeIndex(*index))?;
            map.insert(name, *value);
        }
        Ok(map)
    }

    /// Checks that two disjoint index sets cover the whole schema.
    pub(crate) fn check_partition(&self, first: &[usize], second: &[usize]) -> Result<(), Error> {
        for index in first.iter().chain(second) {
            if *index >= self.len() {
                return Err(Error::InvalidAttributeIndex(*index));
            }
        }
        if let Some(index) = first.iter().find(|i| second.contains(i)) {
            let name = self.names[*index].clone();
            return Err(Error::DuplicateAttribute(name));
        }
        let received = first.len() + second.len();
        if received != self.len() {
            return Err(Error::DimensionMismatch {
                expected: self.len(),
                received,
            });
        }

        Ok(())
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes: Vec<u8> = Vec::new();
        bytes.extend_from_slice(&i2osp(self.names.len(), LENGTH_BYTES));
        for name in &self.names {
            bytes.extend_from_slice(&i2osp(name.len(), LENGTH_BYTES));
            bytes.extend_from_slice(name.as_bytes());
        }
        bytes
    }

    pub(crate) fn read(reader: &mut OctetReader<'_>) -> Result<Self, Error> {
        let count = reader.read_count(LENGTH_BYTES)?;
        let mut names = Vec::with_capacity(count);
        for _ in 0..count {
            let len = reader.read_count(1)?;
            let name = core::str::from_utf8(reader.take(len)?)
                .map_err(|_| Error::SerializationError("attribute name is not UTF-8".to_owned()))?;
            names.push(name.to_owned());
        }

        Self::new(names).map_err(|e| Error::SerializationError(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let mut reader = OctetReader::new(bytes);
        let schema = Self::read(&mut reader)?;
        reader.finish()?;
        Ok(schema)
    }
}

/// Ordered `(name, value)` pairs selecting a subset of the schema.
#[derive(Clone, Default, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct AttributeMap {
    entries: Vec<(String, Attribute)>,
}

impl AttributeMap {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn with<N: Into<String>, A: Into<Attribute>>(mut self, name: N, value: A) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert<N: Into<String>, A: Into<Attribute>>(&mut self, name: N, value: A) {
        self.entries.push((name.into(), value.into()));
    }

    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Attribute)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }
}

impl<N: Into<String>, A: Into<Attribute>> FromIterator<(N, A)> for AttributeMap {
    fn from_iter<T: IntoIterator<Item = (N, A)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (name, value) in iter {
            map.insert(name, value);
        }
        map
    }
}
