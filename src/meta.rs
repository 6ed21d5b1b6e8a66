//! Naming of composed components, and the metadata carried over from
//! the wrapped view onto the component composed around it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::NeedsError;

/// Used when the wrapped view has neither a display name nor a usable
/// identifier.
pub const UNKNOWN: &str = "Unknown";

/// Keys owned by the component itself, never carried as metadata.
pub const RESERVED: &[&str] = &["display_name", "name", "props", "default_props", "lifecycles"];

/// Resolve the name of a wrapped view: the explicit display name if it
/// is non-empty, else the identifier derived from its Rust type name,
/// else [`UNKNOWN`].
pub fn component_name(display_name: Option<&str>, type_name: &str) -> String {
    match display_name.filter(|name| !name.is_empty()) {
        Some(name) => name.to_string(),
        None => identifier(type_name).unwrap_or_else(|| UNKNOWN.to_string()),
    }
}

// closures and other anonymous types have no name worth showing
fn identifier(type_name: &str) -> Option<String> {
    // drop generic arguments wherever they appear, keeping the path after them
    let mut depth = 0usize;
    let path = type_name
        .chars()
        .filter(|c| match c {
            '<' => {
                depth += 1;
                false
            }
            '>' => {
                depth = depth.saturating_sub(1);
                false
            }
            _ => depth == 0,
        })
        .collect::<String>();
    let ident = path.rsplit("::").next().unwrap_or(&path).trim();
    if ident.is_empty() || ident.contains('{') || ident.contains('(') {
        None
    } else {
        Some(ident.to_string())
    }
}

pub fn gate_name(name: &str) -> String {
    format!("NeedyComponent({name})")
}

pub fn wrapper_name(gate_name: &str) -> String {
    format!("Needs({gate_name})")
}

/// Arbitrary fields attached to a wrapped view that tooling may want to
/// find on the composed component as well.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata(BTreeMap<String, Value>);

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field, returning the value it replaced.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Option<Value>, NeedsError> {
        let key = key.into();
        if key.is_empty() {
            return Err(NeedsError::EmptyMetadataKey);
        }
        if RESERVED.contains(&key.as_str()) {
            return Err(NeedsError::ReservedMetadataKey(key));
        }
        Ok(self.0.insert(key, value.into()))
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Copy every non-reserved field of `source` over onto this.
    pub fn hoist_from(&mut self, source: &Metadata) {
        for (key, value) in source.0.iter() {
            if RESERVED.contains(&key.as_str()) {
                continue;
            }
            tracing::trace!(key = key.as_str(), "hoisting metadata");
            self.0.insert(key.clone(), value.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item_list() {}

    fn closure_in_generic<T>() -> String {
        let closure = |_: Option<T>| ();
        std::any::type_name_of_val(&closure).to_string()
    }

    #[test]
    fn name_resolution() {
        assert_eq!(component_name(Some("Foo"), "crate::Bar"), "Foo");
        assert_eq!(component_name(Some(""), "crate::view::Bar"), "Bar");
        assert_eq!(component_name(None, "crate::view::Bar<alloc::string::String>"), "Bar");
        assert_eq!(component_name(None, "crate::view::{{closure}}"), UNKNOWN);
        assert_eq!(component_name(None, ""), UNKNOWN);
        assert_eq!(
            component_name(None, std::any::type_name_of_val(&item_list)),
            "item_list",
        );
        let closure = || ();
        assert_eq!(
            component_name(None, std::any::type_name_of_val(&closure)),
            UNKNOWN,
        );
        assert_eq!(component_name(None, "crate::f<T>::{{closure}}"), UNKNOWN);
        assert_eq!(
            component_name(None, "crate::Outer<alloc::vec::Vec<u8>>::render"),
            "render",
        );
        assert_eq!(component_name(None, &closure_in_generic::<u8>()), UNKNOWN);
    }

    #[test]
    fn composed_names() {
        assert_eq!(
            wrapper_name(&gate_name("Foo")),
            "Needs(NeedyComponent(Foo))",
        );
    }

    #[test]
    fn reserved_keys_rejected() {
        let mut metadata = Metadata::new();
        assert_eq!(
            metadata.insert("display_name", "Foo"),
            Err(NeedsError::ReservedMetadataKey("display_name".to_string())),
        );
        assert_eq!(metadata.insert("", 1), Err(NeedsError::EmptyMetadataKey));
        assert_eq!(metadata.insert("route", "/items"), Ok(None));
        assert_eq!(metadata.insert("route", "/things"), Ok(Some(json!("/items"))));
        assert_eq!(metadata.len(), 1);
    }

    #[test]
    fn hoisting() -> anyhow::Result<()> {
        let mut source = Metadata::new();
        source.insert("route", "/items")?;
        source.insert("weight", 3)?;
        // only reachable through deserialization
        let reserved: Metadata = serde_json::from_value(json!({ "name": "Sneaky" }))?;

        let mut target = Metadata::new();
        target.hoist_from(&source);
        target.hoist_from(&reserved);
        assert_eq!(target.len(), 2);
        assert_eq!(target.get("weight"), Some(&json!(3)));
        assert_eq!(target.get("name"), None);
        assert_eq!(
            serde_json::to_value(&target)?,
            json!({ "route": "/items", "weight": 3 }),
        );
        Ok(())
    }
}
