use std::{collections::BTreeSet, fmt::Display};

/// Identifier of a [`State`], unique within its automaton.
pub type StateId = u32;

/// An ordered set of state ids. The ordering makes equal sets compare and hash
/// equally regardless of insertion order, which is what subset construction relies on.
pub type StateSet = BTreeSet<StateId>;

/// The role of a state. Being initial and being final are independent flags, a
/// state that is both lets an automaton accept the empty word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Role {
    /// Runs may start in this state.
    pub is_initial: bool,
    /// Runs ending in this state accept.
    pub is_final: bool,
}

impl Role {
    /// Neither initial nor final.
    pub const NORMAL: Role = Role::new(false, false);
    /// Initial only.
    pub const INITIAL: Role = Role::new(true, false);
    /// Final only.
    pub const FINAL: Role = Role::new(false, true);
    /// Initial and final.
    pub const INITIAL_FINAL: Role = Role::new(true, true);

    /// Creates a role from its two flags.
    pub const fn new(is_initial: bool, is_final: bool) -> Self {
        Self {
            is_initial,
            is_final,
        }
    }

    /// Reads a role from its textual form. Matching is case insensitive and by
    /// substring, so `"initial"`, `"final"`, `"initial final"` and `"initial_final"`
    /// are all understood. Anything else is a normal state.
    pub fn parse(text: &str) -> Self {
        let text = text.to_lowercase();
        Self::new(text.contains("initial"), text.contains("final"))
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.is_initial, self.is_final) {
            (true, true) => write!(f, "initial final"),
            (true, false) => write!(f, "initial"),
            (false, true) => write!(f, "final"),
            (false, false) => write!(f, "normal"),
        }
    }
}

/// A state of an automaton.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct State {
    /// Identifier, unique within the owning automaton.
    pub id: StateId,
    /// Display label, not necessarily unique.
    pub label: String,
    /// Whether the state is initial and/or final.
    pub role: Role,
}

impl State {
    /// Creates a new state.
    pub fn new<L: Into<String>>(id: StateId, label: L, role: Role) -> Self {
        Self {
            id,
            label: label.into(),
            role,
        }
    }

    /// Returns true if the state is initial.
    pub fn is_initial(&self) -> bool {
        self.role.is_initial
    }

    /// Returns true if the state is final.
    pub fn is_final(&self) -> bool {
        self.role.is_final
    }
}

impl Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}, {})", self.label, self.id, self.role)
    }
}
