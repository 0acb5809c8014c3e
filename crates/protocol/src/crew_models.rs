//! Crew definitions assembled from a crew's `agents.yaml` and `tasks.yaml`.
//!
//! The YAML files are mappings from string ids to specs. Document order is
//! meaningful (tasks run in the order they are written), so the mappings are
//! deserialized into [`NamedList`] rather than a hash map.

use crate::agent_models::AgentSpec;
use crate::task_models::TaskSpec;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;

/// A spec together with the key it was declared under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Named<T> {
    pub key: String,
    pub spec: T,
}

/// An insertion-ordered mapping of keys to specs.
///
/// Serializes as, and deserializes from, a plain mapping. Duplicate keys are
/// rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedList<T>(Vec<Named<T>>);

impl<T> NamedList<T> {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, key: impl Into<String>, spec: T) {
        self.0.push(Named {
            key: key.into(),
            spec,
        });
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.0.iter().find(|n| n.key == key).map(|n| &n.spec)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|n| n.key.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Named<T>> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Named<T>] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T> Default for NamedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> IntoIterator for &'a NamedList<T> {
    type Item = &'a Named<T>;
    type IntoIter = std::slice::Iter<'a, Named<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<T: Serialize> Serialize for NamedList<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for entry in &self.0 {
            map.serialize_entry(&entry.key, &entry.spec)?;
        }
        map.end()
    }
}

struct NamedListVisitor<T>(PhantomData<T>);

impl<'de, T: Deserialize<'de>> Visitor<'de> for NamedListVisitor<T> {
    type Value = NamedList<T>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a mapping of ids to definitions")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut list = NamedList::new();
        while let Some((key, spec)) = access.next_entry::<String, T>()? {
            if list.get(&key).is_some() {
                return Err(serde::de::Error::custom(format!(
                    "duplicate definition for '{key}'"
                )));
            }
            list.push(key, spec);
        }
        Ok(list)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for NamedList<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(NamedListVisitor(PhantomData))
    }
}

/// How a crew runs its tasks.
///
/// Only sequential execution exists: tasks run in declaration order and each
/// task sees the outputs of the ones before it.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProcessMode {
    #[default]
    Sequential,
}

/// A complete crew: its agents, its tasks and how the tasks are run.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CrewDefinition {
    /// Crew name, taken from the crew's directory under `crews/`.
    pub name: String,

    /// Agents from `agents.yaml`, in document order.
    pub agents: NamedList<AgentSpec>,

    /// Tasks from `tasks.yaml`, in document order.
    pub tasks: NamedList<TaskSpec>,

    #[serde(default)]
    pub process: ProcessMode,
}
