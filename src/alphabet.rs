use std::{collections::BTreeSet, fmt::Display};

use itertools::Itertools;

use crate::{fresh_id, AutomatonError};

/// Identifier of a [`Symbol`] within its [`Alphabet`].
pub type SymbolId = u32;

/// The reserved symbol value that labels transitions which consume no input.
pub const EPSILON: char = 'ε';

/// Returns true if `value` is the reserved [`EPSILON`] value.
#[inline]
pub fn is_epsilon(value: char) -> bool {
    value == EPSILON
}

/// A symbol of an alphabet, consisting of a stable identifier and a single character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol {
    /// Identifier, unique within the owning alphabet.
    pub id: SymbolId,
    /// The character this symbol stands for.
    pub value: char,
}

impl Symbol {
    /// Creates a new symbol.
    pub fn new(id: SymbolId, value: char) -> Self {
        Self { id, value }
    }

    /// Creates the ε symbol with the given id.
    pub fn epsilon(id: SymbolId) -> Self {
        Self::new(id, EPSILON)
    }

    /// Returns true if this symbol is ε.
    pub fn is_epsilon(&self) -> bool {
        is_epsilon(self.value)
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// The symbol registry of an automaton. Symbol values are pairwise distinct, and so
/// are symbol ids. Symbols are kept in insertion order.
///
/// The registry may hold the ε symbol, which is then usable as a transition label.
/// It is never part of the [`Alphabet::universe`], i.e. the symbols over which
/// completeness, determinization and word enumeration range.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<Symbol>,
}

impl Alphabet {
    /// Creates an empty alphabet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an alphabet from the given characters, numbering them from 1 in order.
    /// Repeated characters are rejected.
    pub fn from_values<I: IntoIterator<Item = char>>(values: I) -> Result<Self, AutomatonError> {
        let mut alphabet = Self::new();
        for value in values {
            let id = alphabet.next_id();
            alphabet.insert(Symbol::new(id, value))?;
        }
        Ok(alphabet)
    }

    /// Adds a symbol. Fails if its value or its id is already present.
    pub fn insert(&mut self, symbol: Symbol) -> Result<(), AutomatonError> {
        if self.contains(symbol.value) {
            return Err(AutomatonError::DuplicateSymbol(symbol.value));
        }
        if self.get(symbol.id).is_some() {
            return Err(AutomatonError::DuplicateSymbolId(symbol.id));
        }
        self.symbols.push(symbol);
        Ok(())
    }

    /// Looks up a symbol by id.
    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.iter().find(|s| s.id == id)
    }

    /// Looks up a symbol by value.
    pub fn by_value(&self, value: char) -> Option<&Symbol> {
        self.symbols.iter().find(|s| s.value == value)
    }

    /// Returns true if a symbol with the given value is registered.
    pub fn contains(&self, value: char) -> bool {
        self.by_value(value).is_some()
    }

    /// Iterates over all registered symbols, ε included, in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Symbol> {
        self.symbols.iter()
    }

    /// Iterates over the values of all symbols except ε, in insertion order.
    pub fn universe(&self) -> impl Iterator<Item = char> + '_ {
        self.symbols
            .iter()
            .filter(|s| !s.is_epsilon())
            .map(|s| s.value)
    }

    /// The values of [`Alphabet::universe`] as an ordered set.
    pub fn universe_set(&self) -> BTreeSet<char> {
        self.universe().collect()
    }

    /// Returns true if both alphabets range over the same non-ε values, regardless of
    /// ids and order.
    pub fn same_universe(&self, other: &Alphabet) -> bool {
        self.universe_set() == other.universe_set()
    }

    /// A copy of this alphabet with the ε symbol removed, ids unchanged.
    pub fn without_epsilon(&self) -> Alphabet {
        Self {
            symbols: self
                .symbols
                .iter()
                .filter(|s| !s.is_epsilon())
                .copied()
                .collect(),
        }
    }

    /// Number of registered symbols, ε included.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Returns true if no symbol is registered.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// The id the next added symbol should receive: one more than the largest id in use,
    /// or the smallest free one if the largest is `SymbolId::MAX`.
    pub fn next_id(&self) -> SymbolId {
        fresh_id(self.symbols.iter().map(|s| s.id))
    }

    /// Comma separated, sorted listing of the universe, used in messages.
    pub fn show(&self) -> String {
        self.universe_set().into_iter().join(", ")
    }
}

impl<'a> IntoIterator for &'a Alphabet {
    type Item = &'a Symbol;
    type IntoIter = std::slice::Iter<'a, Symbol>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_values_are_rejected() {
        let mut alphabet = Alphabet::from_values(['a', 'b']).unwrap();
        assert_eq!(
            alphabet.insert(Symbol::new(7, 'a')),
            Err(AutomatonError::DuplicateSymbol('a'))
        );
        assert_eq!(
            alphabet.insert(Symbol::new(2, 'c')),
            Err(AutomatonError::DuplicateSymbolId(2))
        );
        assert_eq!(alphabet.len(), 2);
        assert_eq!(alphabet.next_id(), 3);

        alphabet.insert(Symbol::new(SymbolId::MAX, 'z')).unwrap();
        assert_eq!(alphabet.next_id(), 3);
    }

    #[test]
    fn epsilon_is_not_in_universe() {
        let mut alphabet = Alphabet::from_values(['b', 'a']).unwrap();
        alphabet.insert(Symbol::epsilon(3)).unwrap();
        assert!(alphabet.contains(EPSILON));
        assert_eq!(alphabet.universe().collect::<Vec<_>>(), vec!['b', 'a']);
        assert_eq!(alphabet.show(), "a, b");

        let other = Alphabet::from_values(['a', 'b']).unwrap();
        assert!(alphabet.same_universe(&other));
    }
}
