//! Alias definitions and their one-level substitution.

use crate::lexer;
use std::fmt;

/// A single `name='command'` alias definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasEntry {
    pub name: String,
    pub command: String,
}

impl fmt::Display for AliasEntry {
    /// Renders the entry the way the `alias` builtin prints it: `name='command'`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}='{}'", self.name, self.command)
    }
}

/// Insertion-ordered set of aliases with at most one entry per name.
///
/// Redefining a name replaces its command in place and keeps its original position.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    entries: Vec<AliasEntry>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the alias `name`, or replace the command of an existing one.
    pub fn define(&mut self, name: impl Into<String>, command: impl Into<String>) {
        let name = name.into();
        let command = command.into();
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(entry) => entry.command = command,
            None => self.entries.push(AliasEntry { name, command }),
        }
    }

    pub fn get(&self, name: &str) -> Option<&AliasEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Iterate over all entries, most recently added first.
    pub fn iter(&self) -> impl Iterator<Item = &AliasEntry> {
        self.entries.iter().rev()
    }

    /// Replace the first word of `tokens` with its alias definition, if any.
    ///
    /// The stored command is joined with the remaining words using single spaces and the
    /// result is split into tokens again. Returns `None` on a miss.
    ///
    /// Only one level is expanded: a definition that itself starts with an alias name is
    /// returned as is.
    pub fn substitute(&self, tokens: &[String]) -> Option<Vec<String>> {
        let (name, rest) = tokens.split_first()?;
        let entry = self.get(name)?;

        let mut line = entry.command.clone();
        for arg in rest {
            line.push(' ');
            line.push_str(arg);
        }
        log::debug!("alias {} expanded to {:?}", name, line);
        Some(lexer::split_into_tokens(&line))
    }
}
