use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Exercise {
    pub name: String,
    pub enabled: bool,
}

impl Exercise {
    pub fn new(name: impl Into<String>, enabled: bool) -> Self {
        Self {
            name: name.into(),
            enabled,
        }
    }
}

/// Ordered `name -> enabled` mapping. Names are unique; insertion order is kept
/// and is also the order written to disk.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExerciseList {
    items: Vec<Exercise>,
}

impl ExerciseList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Exercise> {
        self.items.iter()
    }

    pub fn get(&self, name: &str) -> Option<bool> {
        self.items.iter().find(|e| e.name == name).map(|e| e.enabled)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Update an existing entry in place, or append a new one.
    pub fn set(&mut self, name: &str, enabled: bool) {
        match self.items.iter_mut().find(|e| e.name == name) {
            Some(e) => e.enabled = enabled,
            None => self.items.push(Exercise::new(name, enabled)),
        }
    }

    /// Names of enabled exercises, in list order.
    pub fn enabled_names(&self) -> Vec<String> {
        self.items
            .iter()
            .filter(|e| e.enabled)
            .map(|e| e.name.clone())
            .collect()
    }
}

impl<S: Into<String>> FromIterator<(S, bool)> for ExerciseList {
    fn from_iter<I: IntoIterator<Item = (S, bool)>>(iter: I) -> Self {
        let mut list = ExerciseList::new();
        for (name, enabled) in iter {
            let name: String = name.into();
            list.set(&name, enabled);
        }
        list
    }
}

impl Serialize for ExerciseList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.items.len()))?;
        for e in &self.items {
            map.serialize_entry(&e.name, &e.enabled)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ExerciseList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ListVisitor;

        impl<'de> Visitor<'de> for ListVisitor {
            type Value = ExerciseList;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a mapping of exercise name to enabled flag")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut list = ExerciseList::new();
                while let Some((name, enabled)) = access.next_entry::<String, bool>()? {
                    list.set(&name, enabled);
                }
                Ok(list)
            }
        }

        deserializer.deserialize_map(ListVisitor)
    }
}
