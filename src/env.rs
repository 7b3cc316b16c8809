use crate::alias::AliasTable;
use std::collections::HashMap;
use std::env as stdenv;

/// Mutable state threaded through every stage of the interpreter.
///
/// The environment contains:
/// - `vars`: the variables that will be visible to executed commands.
/// - `aliases`: the alias table managed by the `alias` builtin.
///
/// The process environment is only read once, in [`Environment::new`]. Afterwards
/// `export` and `unset` change `vars`, and spawned children receive exactly `vars`.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    /// Key-value store of environment variables (e.g., PATH, HOME).
    pub vars: HashMap<String, String>,
    /// Aliases defined during this session.
    pub aliases: AliasTable,
}

impl Environment {
    /// Capture the current process environment into a new `Environment`.
    ///
    /// Variables whose name or value is not valid unicode are skipped.
    pub fn new() -> Self {
        let vars = stdenv::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();
        Self {
            vars,
            aliases: AliasTable::new(),
        }
    }

    /// Get the value of a variable, or `None` if it is not set.
    pub fn get_var(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Set or override a variable.
    pub fn set_var(&mut self, key: impl Into<String>, val: impl Into<String>) {
        self.vars.insert(key.into(), val.into());
    }

    /// Remove a variable, returning its previous value if it was set.
    pub fn remove_var(&mut self, key: &str) -> Option<String> {
        self.vars.remove(key)
    }
}
