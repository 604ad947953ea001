use std::collections::HashMap;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::Field;

/// One entry of `passbolt find --json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub uuid: String,
    pub name: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub uri: Option<String>,
}

impl Resource {
    /// Plaintext value of a non-secret field. Passwords have to go through gpg.
    pub fn plain(&self, field: Field) -> Option<&str> {
        match field {
            Field::Username => Some(self.username.as_deref().unwrap_or("")),
            Field::Url => Some(self.uri.as_deref().unwrap_or("")),
            Field::Password => None,
        }
    }
}

/// Menu text for a resource. The uuid goes last so it can be read back.
pub fn label(resource: &Resource) -> String {
    format!("{} ({})", resource.name, resource.uuid)
}

/// Pulls the uuid out of the trailing `(...)` of a label.
pub fn parse_label(label: &str) -> Option<&str> {
    let inner = label.strip_suffix(')')?;
    let open = inner.rfind('(')?;
    let id = &inner[open + 1..];
    if id.contains(')') {
        return None;
    }
    Some(id)
}

/// Resources keyed by uuid, remembering the order passbolt listed them in.
#[derive(Debug, Default)]
pub struct ResourceIndex {
    resources: Vec<Resource>,
    positions: HashMap<String, usize>,
}

impl ResourceIndex {
    pub fn from_json(json: &str) -> Result<ResourceIndex> {
        let resources: Vec<Resource> = serde_json::from_str(json)
            .with_context(|| "Failed to de-serialise JSON resource list")?;
        Ok(resources.into_iter().collect())
    }

    pub fn insert(&mut self, resource: Resource) {
        match self.positions.get(&resource.uuid) {
            Some(&i) => self.resources[i] = resource,
            None => {
                self.positions.insert(resource.uuid.clone(), self.resources.len());
                self.resources.push(resource);
            }
        }
    }

    pub fn get(&self, uuid: &str) -> Option<&Resource> {
        self.positions.get(uuid).map(|&i| &self.resources[i])
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Resource> {
        self.resources.iter()
    }

    pub fn labels(&self) -> Vec<String> {
        self.iter().map(label).collect()
    }

    /// Maps a menu choice back to its resource, None when it does not decode
    pub fn resolve_label(&self, label: &str) -> Option<&Resource> {
        parse_label(label).and_then(|uuid| self.get(uuid))
    }
}

impl std::iter::FromIterator<Resource> for ResourceIndex {
    fn from_iter<I: IntoIterator<Item = Resource>>(iter: I) -> Self {
        let mut index = ResourceIndex::default();
        for resource in iter {
            index.insert(resource);
        }
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIND_OUTPUT: &str = r#"[
        {"uuid": "abc", "name": "Mail", "username": "bob", "uri": "https://mail.example", "folder_parent_id": ""},
        {"uuid": "def", "name": "Bank (personal)", "username": null, "uri": "https://bank.example"},
        {"uuid": "0f1e", "name": "Router"}
    ]"#;

    fn resource(uuid: &str, name: &str) -> Resource {
        Resource {
            uuid: uuid.to_owned(),
            name: name.to_owned(),
            username: None,
            uri: None,
        }
    }

    #[test]
    fn one_entry_per_element() {
        let index = ResourceIndex::from_json(FIND_OUTPUT).unwrap();
        assert_eq!(index.len(), 3);
        assert_eq!(index.get("abc").unwrap().username.as_deref(), Some("bob"));
        assert_eq!(index.get("def").unwrap().name, "Bank (personal)");
        assert!(index.get("0f1e").unwrap().uri.is_none());
        assert!(index.get("zzz").is_none());
    }

    #[test]
    fn empty_list() {
        let index = ResourceIndex::from_json("[]").unwrap();
        assert!(index.is_empty());
        assert!(index.labels().is_empty());
    }

    #[test]
    fn rejects_non_array() {
        assert!(ResourceIndex::from_json(r#"{"uuid": "abc"}"#).is_err());
        assert!(ResourceIndex::from_json("").is_err());
    }

    #[test]
    fn duplicate_uuid_last_write_wins() {
        let index: ResourceIndex = vec![
            resource("a", "First"),
            resource("b", "Other"),
            resource("a", "Second"),
        ].into_iter().collect();
        assert_eq!(index.len(), 2);
        assert_eq!(index.get("a").unwrap().name, "Second");
        assert_eq!(index.labels(), vec!["Second (a)", "Other (b)"]);
    }

    #[test]
    fn labels_keep_listing_order() {
        let index = ResourceIndex::from_json(FIND_OUTPUT).unwrap();
        assert_eq!(index.labels(), vec![
            "Mail (abc)",
            "Bank (personal) (def)",
            "Router (0f1e)",
        ]);
    }

    #[test]
    fn labels_decode_to_their_uuid() {
        let index = ResourceIndex::from_json(FIND_OUTPUT).unwrap();
        for r in index.iter() {
            assert_eq!(parse_label(&label(r)), Some(r.uuid.as_str()));
            assert_eq!(index.resolve_label(&label(r)), Some(r));
        }
    }

    #[test]
    fn parse_label_fails_closed() {
        assert_eq!(parse_label("Mail"), None);
        assert_eq!(parse_label("Mail (abc"), None);
        assert_eq!(parse_label("Mail (abc) "), None);
        assert_eq!(parse_label("Mail abc)"), None);
        assert_eq!(parse_label("Mail (a)b)"), None);
        assert_eq!(parse_label("()"), Some(""));
    }

    #[test]
    fn unknown_uuid_does_not_resolve() {
        let index = ResourceIndex::from_json(FIND_OUTPUT).unwrap();
        assert!(index.resolve_label("Mail (nope)").is_none());
        assert!(index.resolve_label("typed garbage").is_none());
    }

    #[test]
    fn plain_fields() {
        let index = ResourceIndex::from_json(FIND_OUTPUT).unwrap();
        let mail = index.get("abc").unwrap();
        assert_eq!(mail.plain(Field::Username), Some("bob"));
        assert_eq!(mail.plain(Field::Url), Some("https://mail.example"));
        assert_eq!(mail.plain(Field::Password), None);
        let bank = index.get("def").unwrap();
        assert_eq!(bank.plain(Field::Username), Some(""));
    }
}
