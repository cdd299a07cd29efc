use std::collections::BTreeMap;

/// Deployable equipment (towed arrays, masts, ...) adding multiplicative drag.
#[derive(Debug, Clone)]
pub struct AppendageRegistry {
    entries: BTreeMap<String, f32>,
    max_total: f32,
}

impl Default for AppendageRegistry {
    fn default() -> Self {
        Self::new(2.0)
    }
}

impl AppendageRegistry {
    pub fn new(max_total: f32) -> Self {
        Self { entries: BTreeMap::new(), max_total: max_total.max(0.0) }
    }

    /// Registers or replaces `name`.
    pub fn add(&mut self, name: impl Into<String>, multiplier: f32) {
        self.entries.insert(name.into(), multiplier);
    }

    pub fn remove(&mut self, name: &str) -> bool {
        self.entries.remove(name).is_some()
    }

    pub fn has(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn set_max_total(&mut self, max_total: f32) {
        self.max_total = max_total.max(0.0);
    }

    /// Sum of all multipliers clamped to `[0, max_total]`.
    pub fn total(&self) -> f32 {
        let sum: f32 = self.entries.values().filter(|m| m.is_finite()).sum();
        sum.clamp(0.0, self.max_total)
    }
}
