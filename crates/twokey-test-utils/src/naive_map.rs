use crate::test_triple::TestTriple;
use twokey::KeyKind;

/// A naive, inefficient two-key map that acts as an oracle for
/// property-based tests.
///
/// Triples are stored in a vector without any indexes, and every operation is
/// a linear scan.
#[derive(Debug, Default)]
pub struct NaiveMap {
    triples: Vec<TestTriple>,
}

impl NaiveMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Adds a triple, reporting the first conflicting key kind (A-keys are
    /// checked first).
    pub fn add(&mut self, triple: TestTriple) -> Result<(), KeyKind> {
        if self.get_a(triple.key_a).is_some() {
            return Err(KeyKind::A);
        }
        if self.get_b(triple.key_b).is_some() {
            return Err(KeyKind::B);
        }
        self.triples.push(triple);
        Ok(())
    }

    /// Removes the triples sharing either key with `triple`, then adds it.
    /// The A-key match is returned first.
    pub fn insert_overwrite(&mut self, triple: TestTriple) -> Vec<TestTriple> {
        let mut dups = Vec::new();
        dups.extend(self.remove_a(triple.key_a));
        dups.extend(self.remove_b(triple.key_b));
        self.triples.push(triple);
        dups
    }

    pub fn get_a(&self, key_a: u8) -> Option<&TestTriple> {
        self.triples.iter().find(|t| t.key_a == key_a)
    }

    pub fn get_b(&self, key_b: char) -> Option<&TestTriple> {
        self.triples.iter().find(|t| t.key_b == key_b)
    }

    pub fn set_a(&mut self, key_a: u8, value: String) -> Option<String> {
        let triple = self.triples.iter_mut().find(|t| t.key_a == key_a)?;
        Some(std::mem::replace(&mut triple.value, value))
    }

    pub fn set_b(&mut self, key_b: char, value: String) -> Option<String> {
        let triple = self.triples.iter_mut().find(|t| t.key_b == key_b)?;
        Some(std::mem::replace(&mut triple.value, value))
    }

    pub fn remove_a(&mut self, key_a: u8) -> Option<TestTriple> {
        let index = self.triples.iter().position(|t| t.key_a == key_a)?;
        Some(self.triples.remove(index))
    }

    pub fn remove_b(&mut self, key_b: char) -> Option<TestTriple> {
        let index = self.triples.iter().position(|t| t.key_b == key_b)?;
        Some(self.triples.remove(index))
    }

    /// Removes the triple with the same B-key, if its value also matches.
    pub fn remove_triple(&mut self, triple: &TestTriple) -> bool {
        match self.triples.iter().position(|t| t.key_b == triple.key_b) {
            Some(index) if self.triples[index].value == triple.value => {
                self.triples.remove(index);
                true
            }
            _ => false,
        }
    }

    pub fn retain<F>(&mut self, f: F)
    where
        F: FnMut(&mut TestTriple) -> bool,
    {
        self.triples.retain_mut(f);
    }

    pub fn clear(&mut self) {
        self.triples.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &TestTriple> {
        self.triples.iter()
    }

    /// Returns the triples sorted, for comparing against a map whose slot
    /// order differs.
    pub fn sorted(&self) -> Vec<TestTriple> {
        let mut triples = self.triples.clone();
        triples.sort();
        triples
    }
}
