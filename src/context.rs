use std::collections::HashMap;

pub const PARAM_KEY_PREFIX: &str = "param:";

pub fn param_key(name: &str) -> String {
    format!("{PARAM_KEY_PREFIX}{name}")
}

/// Per-request key-value store the router publishes bound parameters into.
pub trait RequestContext: Send {
    fn set_value(&mut self, key: String, value: String);

    fn value(&self, key: &str) -> Option<&str>;

    fn param(&self, name: &str) -> Option<&str> {
        self.value(&param_key(name))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextStore {
    values: HashMap<String, String>,
}

impl ContextStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn params(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().filter_map(|(key, value)| {
            key.strip_prefix(PARAM_KEY_PREFIX)
                .map(|name| (name, value.as_str()))
        })
    }
}

impl RequestContext for ContextStore {
    fn set_value(&mut self, key: String, value: String) {
        self.values.insert(key, value);
    }

    fn value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}
