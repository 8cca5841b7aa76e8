//! A directory of automata saved as JSON, one file per automaton named after it.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use itertools::Itertools;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{convert::AutomatonRecord, Automaton, AutomatonError};

/// Errors of a [`Store`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the store directory failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// A file did not hold a valid record, or a record could not be written.
    #[error("malformed automaton file: {0}")]
    Json(#[from] serde_json::Error),
    /// The record was well formed but does not describe a valid automaton.
    #[error("invalid automaton: {0}")]
    Invalid(#[from] AutomatonError),
    /// No automaton of that name is saved.
    #[error("no automaton named '{0}'")]
    NotFound(String),
    /// An automaton of that name is saved already.
    #[error("an automaton named '{0}' exists already")]
    AlreadyExists(String),
    /// The name cannot be used as a file name.
    #[error("'{0}' is not a valid automaton name")]
    InvalidName(String),
    /// The [`AccessGate`] refused the action.
    #[error("access to '{0}' denied")]
    Denied(String),
}

/// What a caller wants to do with a saved automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Load or list.
    Read,
    /// Create or overwrite.
    Write,
    /// Remove.
    Delete,
}

/// Verdict of an [`AccessGate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Go ahead.
    Proceed,
    /// Refuse the action.
    Denied,
}

/// Decides whether an action on a saved automaton may take place. This is where a
/// credential check plugs in; the store itself knows nothing about users.
pub trait AccessGate {
    /// Called before every action on the automaton called `name`.
    fn check(&self, action: Action, name: &str) -> Access;
}

/// Lets everything through.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenGate;

impl AccessGate for OpenGate {
    fn check(&self, _action: Action, _name: &str) -> Access {
        Access::Proceed
    }
}

/// Saved automata in a directory.
pub struct Store {
    dir: PathBuf,
    gate: Box<dyn AccessGate>,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store").field("dir", &self.dir).finish()
    }
}

impl Store {
    /// Opens the store in `dir`, creating the directory if needed. All actions are allowed
    /// until a gate is installed with [`Store::with_gate`].
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        debug!("opened store at {}", dir.display());
        Ok(Self {
            dir,
            gate: Box::new(OpenGate),
        })
    }

    /// Replaces the access gate.
    pub fn with_gate<G: AccessGate + 'static>(mut self, gate: G) -> Self {
        self.gate = Box::new(gate);
        self
    }

    /// The directory holding the files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, name: &str) -> Result<PathBuf, StoreError> {
        let usable = !name.is_empty()
            && name != "."
            && name != ".."
            && !name.contains(['/', '\\', '\0']);
        if usable {
            Ok(self.dir.join(format!("{name}.json")))
        } else {
            Err(StoreError::InvalidName(name.to_string()))
        }
    }

    fn guard(&self, action: Action, name: &str) -> Result<(), StoreError> {
        match self.gate.check(action, name) {
            Access::Proceed => Ok(()),
            Access::Denied => {
                warn!("{action:?} on '{name}' denied");
                Err(StoreError::Denied(name.to_string()))
            }
        }
    }

    /// Returns true if an automaton called `name` is saved.
    pub fn exists(&self, name: &str) -> bool {
        self.path(name).map_or(false, |p| p.is_file())
    }

    /// Saves `aut` under its name, replacing an earlier version.
    pub fn save(&self, aut: &Automaton) -> Result<(), StoreError> {
        self.guard(Action::Write, aut.name())?;
        let path = self.path(aut.name())?;
        fs::write(&path, aut.to_json()?)?;
        info!("saved {} to {}", aut.name(), path.display());
        Ok(())
    }

    /// Saves `aut` under its name, failing if that name is taken.
    pub fn create(&self, aut: &Automaton) -> Result<(), StoreError> {
        if self.exists(aut.name()) {
            return Err(StoreError::AlreadyExists(aut.name().to_string()));
        }
        self.save(aut)
    }

    /// Loads the automaton called `name`. The file name wins over the name stored inside the
    /// file, so saving the result writes back to the same file.
    pub fn load(&self, name: &str) -> Result<Automaton, StoreError> {
        self.guard(Action::Read, name)?;
        let path = self.path(name)?;
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StoreError::NotFound(name.to_string()))
            }
            Err(e) => return Err(e.into()),
        };
        let record: AutomatonRecord = serde_json::from_str(&json)?;
        let mut aut = Automaton::try_from(record)?;
        if aut.name() != name {
            warn!("{} holds an automaton named '{}'", path.display(), aut.name());
            aut.set_name(name);
        }
        debug!("loaded {} with {} states", aut.name(), aut.size());
        Ok(aut)
    }

    /// Names of all saved automata, sorted.
    pub fn list(&self) -> Result<Vec<String>, StoreError> {
        let mut names = vec![];
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().map_or(false, |ext| ext == "json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }
        Ok(names
            .into_iter()
            .filter(|name| self.gate.check(Action::Read, name) == Access::Proceed)
            .sorted()
            .collect())
    }

    /// Removes the automaton called `name`.
    pub fn delete(&self, name: &str) -> Result<(), StoreError> {
        self.guard(Action::Delete, name)?;
        let path = self.path(name)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                info!("deleted {name}");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StoreError::NotFound(name.to_string())),
            Err(e) => Err(e.into()),
        }
    }
}
