use hashbrown::HashMap as FastHashMap;
use parking_lot::RwLock;
use regex::Regex;
use std::sync::Arc;

use super::{PatternError, PatternResult, SegmentPattern};

type CompiledEntry = Result<Arc<Regex>, String>;

// failed compilations are cached too, so each is reported once
#[derive(Debug, Default)]
pub struct ConstraintCache {
    compiled: RwLock<FastHashMap<Box<str>, CompiledEntry>>,
}

impl ConstraintCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn entry(&self, raw: &str) -> CompiledEntry {
        if let Some(entry) = self.compiled.read().get(raw) {
            return entry.clone();
        }

        let mut compiled = self.compiled.write();
        if let Some(entry) = compiled.get(raw) {
            return entry.clone();
        }

        let entry = Regex::new(&format!("^(?:{raw})$"))
            .map(Arc::new)
            .map_err(|err| err.to_string());
        if let Err(error) = &entry {
            tracing::event!(
                tracing::Level::WARN,
                constraint = %raw,
                error = %error,
                "regex constraint failed to compile"
            );
        }
        compiled.insert(raw.to_owned().into_boxed_str(), entry.clone());
        entry
    }

    pub fn compile(&self, name: &str, raw: &str) -> PatternResult<Arc<Regex>> {
        self.entry(raw)
            .map_err(|error| PatternError::RegexConstraintInvalid {
                pattern: format!(":{name}<{raw}>"),
                name: name.to_string(),
                error,
            })
    }

    pub fn lookup(&self, raw: &str) -> Option<Arc<Regex>> {
        self.entry(raw).ok()
    }

    /// Without `strict`, a malformed constraint stays uncompiled and never matches.
    pub fn hydrate(&self, segments: &mut [SegmentPattern], strict: bool) -> PatternResult<()> {
        for segment in segments.iter_mut() {
            if let SegmentPattern::Param {
                name,
                constraint: Some(constraint),
                ..
            } = segment
                && constraint.compiled().is_none()
            {
                let compiled = if strict {
                    Some(self.compile(name, constraint.raw())?)
                } else {
                    self.lookup(constraint.raw())
                };
                if let Some(regex) = compiled {
                    constraint.set_compiled(regex);
                }
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.compiled.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.compiled.write().clear();
    }
}
