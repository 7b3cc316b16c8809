//! Output redirection (`CMD ARGS > PATH`).

use crate::error::{Result, ShellError};
use std::fs::{File, OpenOptions};

/// The only redirection operator, matched as a whole word.
pub const OUTPUT_OPERATOR: &str = ">";

/// Look for `>` in `tokens` and open the file that follows it.
///
/// The first operator wins. On success the operator and every word after it are
/// removed from `tokens`, and the opened target is returned. Without an operator
/// `tokens` is left unchanged and `None` is returned.
///
/// The target is created if missing and truncated otherwise, readable and writable by
/// the owner only when newly created.
pub fn resolve(tokens: &mut Vec<String>) -> Result<Option<File>> {
    let Some(pos) = tokens.iter().position(|t| t == OUTPUT_OPERATOR) else {
        return Ok(None);
    };
    let path = tokens.get(pos + 1).ok_or(ShellError::MissingRedirectTarget)?;

    let file = open_target(path).map_err(|source| ShellError::RedirectOpen {
        path: path.clone(),
        source,
    })?;
    log::debug!("stdout redirected to {}", path);

    tokens.truncate(pos);
    Ok(Some(file))
}

fn open_target(path: &str) -> std::io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    options.open(path)
}
