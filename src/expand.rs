//! Variable substitution for `$NAME` words.

use crate::env::Environment;

/// Marks a word as a variable reference.
pub const SIGIL: char = '$';

/// Replace every word that starts with `$` by the value of the named variable.
///
/// Unset variables become an empty word. Only whole words are substituted: `a$B` is
/// left untouched. The environment is never modified.
pub fn substitute_variables(tokens: Vec<String>, env: &Environment) -> Vec<String> {
    tokens
        .into_iter()
        .map(|token| match token.strip_prefix(SIGIL) {
            Some(name) => {
                let value = env.get_var(name).unwrap_or_default().to_owned();
                log::debug!("${} expanded to {:?}", name, value);
                value
            }
            None => token,
        })
        .collect()
}
