use crate::error::StoreError;
use ahash::AHashMap;
use std::fmt;

/// Ordered list of key components addressing one logical series.
///
/// A single key is a path with one component, a composite key such as
/// `["cpu", "user"]` is resolved level by level in a [`CompositeKeyIndex`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct KeyPath(Vec<String>);

impl KeyPath {
    pub fn new(components: Vec<String>) -> Self {
        Self(components)
    }

    pub fn components(&self) -> &[String] {
        &self.0
    }

    pub fn first(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    pub fn is_composite(&self) -> bool {
        self.0.len() > 1
    }

    pub fn validate(&self) -> Result<(), StoreError> {
        if self.0.is_empty() {
            return Err(StoreError::InvalidKeyAddressing);
        }
        Ok(())
    }
}

/// Joins components with `.`. A `.` or `\` inside a component is escaped with
/// `\`, so `["cpu", "user.time"]` prints as `cpu.user\.time` and never
/// collides with `["cpu", "user", "time"]`.
impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, component) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            for c in component.chars() {
                if c == '.' || c == '\\' {
                    f.write_str("\\")?;
                }
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

impl From<&str> for KeyPath {
    fn from(key: &str) -> Self {
        Self(vec![key.to_owned()])
    }
}

impl From<String> for KeyPath {
    fn from(key: String) -> Self {
        Self(vec![key])
    }
}

impl From<&String> for KeyPath {
    fn from(key: &String) -> Self {
        Self(vec![key.clone()])
    }
}

impl From<&KeyPath> for KeyPath {
    fn from(key: &KeyPath) -> Self {
        key.clone()
    }
}

impl<const N: usize> From<[&str; N]> for KeyPath {
    fn from(keys: [&str; N]) -> Self {
        Self(keys.iter().map(|key| (*key).to_owned()).collect())
    }
}

impl From<&[&str]> for KeyPath {
    fn from(keys: &[&str]) -> Self {
        Self(keys.iter().map(|key| (*key).to_owned()).collect())
    }
}

impl From<Vec<&str>> for KeyPath {
    fn from(keys: Vec<&str>) -> Self {
        Self(keys.into_iter().map(str::to_owned).collect())
    }
}

impl From<Vec<String>> for KeyPath {
    fn from(keys: Vec<String>) -> Self {
        Self(keys)
    }
}

#[derive(Debug)]
struct KeyNode<V> {
    children: AHashMap<String, KeyNode<V>>,
    value: Option<V>,
}

impl<V> Default for KeyNode<V> {
    fn default() -> Self {
        Self {
            children: AHashMap::new(),
            value: None,
        }
    }
}

impl<V> KeyNode<V> {
    fn collect<'a>(&'a self, path: &mut Vec<String>, entries: &mut Vec<(KeyPath, &'a V)>) {
        if let Some(value) = &self.value {
            entries.push((KeyPath::new(path.clone()), value));
        }
        for (component, child) in &self.children {
            path.push(component.clone());
            child.collect(path, entries);
            path.pop();
        }
    }
}

/// Trie of values addressed by [`KeyPath`].
///
/// Intermediate levels are created on first write and never pruned; a node may
/// hold a value and children at the same time.
#[derive(Debug)]
pub struct CompositeKeyIndex<V> {
    root: KeyNode<V>,
    len: usize,
}

impl<V> Default for CompositeKeyIndex<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> CompositeKeyIndex<V> {
    pub fn new() -> Self {
        Self {
            root: KeyNode::default(),
            len: 0,
        }
    }

    pub fn get(&self, key: &KeyPath) -> Option<&V> {
        let mut node = &self.root;
        for component in key.components() {
            node = node.children.get(component)?;
        }
        node.value.as_ref()
    }

    pub fn get_mut(&mut self, key: &KeyPath) -> Option<&mut V> {
        let mut node = &mut self.root;
        for component in key.components() {
            node = node.children.get_mut(component)?;
        }
        node.value.as_mut()
    }

    pub fn contains(&self, key: &KeyPath) -> bool {
        self.get(key).is_some()
    }

    pub fn get_or_insert_with<F>(&mut self, key: &KeyPath, create: F) -> Result<&mut V, StoreError>
    where
        F: FnOnce() -> V,
    {
        key.validate()?;
        let mut node = &mut self.root;
        for component in key.components() {
            node = node.children.entry(component.clone()).or_default();
        }
        if node.value.is_none() {
            self.len += 1;
        }
        Ok(node.value.get_or_insert_with(create))
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// All stored values with their full key paths, sorted by path.
    pub fn entries(&self) -> Vec<(KeyPath, &V)> {
        let mut entries = Vec::with_capacity(self.len);
        let mut path = Vec::new();
        self.root.collect(&mut path, &mut entries);
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    pub fn clear(&mut self) {
        self.root = KeyNode::default();
        self.len = 0;
    }
}
