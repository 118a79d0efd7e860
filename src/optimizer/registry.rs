use crate::frontend::ast::Type;
use crate::optimizer::collector::Slot;
use crate::util::env::Env;

/// all occurrences of a single reusable value in a block
#[derive(Debug, PartialEq, Clone)]
pub struct Entry {
    pub key: String,
    pub t: Type,
    /// index of the first statement containing the value
    pub first_index: usize,
    /// in discovery order
    pub occurrences: Vec<Slot>,
}

impl Entry {
    pub fn is_reusable(&self) -> bool {
        self.occurrences.len() >= 2
    }
}

/// candidates of a single block, grouped by canonical key,
/// slots are only valid until the block's statements are modified
#[derive(Debug, Default)]
pub struct Registry {
    entries: Vec<Entry>,
    by_key: Env<usize>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, key: String, t: Type, slot: Slot) {
        match self.by_key.get(&key) {
            Some(&i) => {
                let entry = &mut self.entries[i];
                entry.first_index = entry.first_index.min(slot.stmt_index);
                entry.occurrences.push(slot);
            }
            None => {
                self.by_key.insert(key.clone(), self.entries.len());
                self.entries.push(Entry { key, t, first_index: slot.stmt_index, occurrences: vec![slot] });
            }
        }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// entries occurring at least twice, ordered by their first statement,
    /// entries starting at the same statement keep registration order
    pub fn into_reusable(self) -> Vec<Entry> {
        let mut reusable: Vec<Entry> = self.entries.into_iter()
            .filter(Entry::is_reusable)
            .collect();
        reusable.sort_by_key(|entry| entry.first_index);
        reusable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(stmt_index: usize) -> Slot {
        Slot { stmt_index, path: vec![] }
    }

    #[test]
    fn occurrences_are_grouped_by_key() {
        let mut registry = Registry::new();
        registry.register(String::from("a"), Type::Int, slot(0));
        registry.register(String::from("b"), Type::Int, slot(0));
        registry.register(String::from("a"), Type::Int, slot(2));
        assert_eq!(registry.entries().len(), 2);
        assert_eq!(registry.entries()[0].occurrences, vec![slot(0), slot(2)]);
        assert_eq!(registry.entries()[1].occurrences, vec![slot(0)]);
    }

    #[test]
    fn first_index_is_the_minimum() {
        let mut registry = Registry::new();
        registry.register(String::from("a"), Type::Int, slot(3));
        registry.register(String::from("a"), Type::Int, slot(1));
        assert_eq!(registry.entries()[0].first_index, 1);
    }

    #[test]
    fn single_occurrences_are_not_reusable() {
        let mut registry = Registry::new();
        registry.register(String::from("once"), Type::Int, slot(0));
        registry.register(String::from("twice"), Type::Bool, slot(1));
        registry.register(String::from("twice"), Type::Bool, slot(2));
        let reusable = registry.into_reusable();
        assert_eq!(reusable.len(), 1);
        assert_eq!(reusable[0].key, "twice");
    }

    #[test]
    fn reusable_entries_are_sorted_stably() {
        let mut registry = Registry::new();
        for (key, index) in vec![("late", 4), ("early", 1), ("tie", 4), ("early", 2), ("late", 5), ("tie", 6)] {
            registry.register(String::from(key), Type::Int, slot(index));
        }
        let keys: Vec<String> = registry.into_reusable().into_iter().map(|e| e.key).collect();
        assert_eq!(keys, vec!["early", "late", "tie"]);
    }
}
