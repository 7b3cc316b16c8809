use crate::command::{CommandFactory, ExecutableCommand, ExitCode, Streams};
use crate::env::Environment;
use crate::error::{Result, ShellError};
use crate::interpreter::Factory;
use std::io::Write;

/// Built-in commands known to the shell at compile time.
///
/// Builtins take no options: every word after the name is an operand, including
/// `--`, `-h` or `help`. They run in-process without spawning a child process.
pub(crate) trait BuiltinCommand: Sized {
    /// Canonical name of the command, e.g. "alias" or "export".
    fn name() -> &'static str;

    /// Build the command from the words following its name.
    fn from_words(args: &[&str]) -> Self;

    /// Executes the command, writing any listing to `stdout`.
    ///
    /// Errors are returned rather than printed; the interpreter reports them.
    fn execute(self, stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode>;
}

impl<T: BuiltinCommand> ExecutableCommand for T {
    fn execute(self: Box<Self>, io: &mut Streams<'_>, env: &mut Environment) -> Result<ExitCode> {
        <T as BuiltinCommand>::execute(*self, io.stdout, env)
    }
}

impl<T: BuiltinCommand + 'static> CommandFactory for Factory<T> {
    fn try_create(
        &self,
        _env: &Environment,
        name: &str,
        args: &[&str],
    ) -> Option<Box<dyn ExecutableCommand>> {
        (name == T::name()).then(|| Box::new(T::from_words(args)) as Box<dyn ExecutableCommand>)
    }
}

fn owned(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}

/// Define or display aliases.
/// Without arguments, list every alias, most recently added first.
pub struct Alias {
    /// Alias name, optionally followed by the words of the command it stands for.
    pub args: Vec<String>,
}

impl BuiltinCommand for Alias {
    fn name() -> &'static str {
        "alias"
    }

    fn from_words(args: &[&str]) -> Self {
        Self { args: owned(args) }
    }

    fn execute(self, stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        match self.args.as_slice() {
            [] => {
                for entry in env.aliases.iter() {
                    writeln!(stdout, "{}", entry)?;
                }
            }
            [name] => {
                let entry = env
                    .aliases
                    .get(name)
                    .ok_or_else(|| ShellError::AliasNotFound(name.clone()))?;
                writeln!(stdout, "{}", entry)?;
            }
            [name, words @ ..] => {
                let command = words.join(" ");
                log::debug!("defining alias {}='{}'", name, command);
                env.aliases.define(name.as_str(), command);
            }
        }
        Ok(0)
    }
}

/// Set an environment variable for the rest of the session.
pub struct Export {
    /// Expected to hold a single `NAME=VALUE` assignment.
    pub assignments: Vec<String>,
}

impl BuiltinCommand for Export {
    fn name() -> &'static str {
        "export"
    }

    fn from_words(args: &[&str]) -> Self {
        Self {
            assignments: owned(args),
        }
    }

    fn execute(self, _stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        let [assignment] = self.assignments.as_slice() else {
            return Err(ShellError::InvalidExport);
        };
        let (name, value) = parse_assignment(assignment).ok_or(ShellError::InvalidExport)?;
        log::debug!("export {}={:?}", name, value);
        env.set_var(name, value);
        Ok(0)
    }
}

/// Split `NAME=VALUE` at the first `=`. Both sides must be non-empty.
fn parse_assignment(assignment: &str) -> Option<(&str, &str)> {
    let (name, value) = assignment.split_once('=')?;
    if name.is_empty() || value.is_empty() || name.contains('\0') {
        return None;
    }
    Some((name, value))
}

/// Remove environment variables.
pub struct Unset {
    pub names: Vec<String>,
}

impl BuiltinCommand for Unset {
    fn name() -> &'static str {
        "unset"
    }

    fn from_words(args: &[&str]) -> Self {
        Self { names: owned(args) }
    }

    fn execute(self, _stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        if self.names.is_empty() {
            return Err(ShellError::InvalidUnset);
        }

        // every name is attempted even after a failure
        let missing: Vec<String> = self
            .names
            .into_iter()
            .filter(|name| env.remove_var(name).is_none())
            .collect();

        if missing.is_empty() {
            Ok(0)
        } else {
            Err(ShellError::VariableNotPresent(missing))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn run(cmd: impl BuiltinCommand, env: &mut Environment) -> (Result<ExitCode>, String) {
        let mut out = Vec::<u8>::new();
        let res = BuiltinCommand::execute(cmd, &mut out, env);
        (res, String::from_utf8(out).unwrap())
    }

    fn alias(args: &[&str]) -> Alias {
        Alias {
            args: args.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn run_words<T: BuiltinCommand + 'static>(
        env: &mut Environment,
        name: &str,
        args: &[&str],
    ) -> (Result<ExitCode>, String) {
        let cmd = Factory::<T>::default().try_create(env, name, args).unwrap();
        let (mut out, mut err) = (Vec::<u8>::new(), Vec::<u8>::new());
        let mut io = Streams {
            stdout: &mut out,
            stderr: &mut err,
        };
        let res = cmd.execute(&mut io, env);
        assert!(err.is_empty());
        (res, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_alias_define_then_show() {
        let mut env = Environment::default();

        let (res, out) = run(alias(&["x", "echo", "hi"]), &mut env);
        assert_matches!(res, Ok(0));
        assert_eq!(out, "");

        let (res, out) = run(alias(&["x"]), &mut env);
        assert_matches!(res, Ok(0));
        assert_eq!(out, "x='echo hi'\n");
    }

    #[test]
    fn test_alias_lists_most_recent_first() {
        let mut env = Environment::default();
        run(alias(&["a", "echo", "a"]), &mut env).0.unwrap();
        run(alias(&["b", "echo", "b"]), &mut env).0.unwrap();

        let (res, out) = run(alias(&[]), &mut env);
        assert_matches!(res, Ok(0));
        assert_eq!(out, "b='echo b'\na='echo a'\n");
    }

    #[test]
    fn test_alias_list_empty_table() {
        let mut env = Environment::default();
        let (res, out) = run(alias(&[]), &mut env);
        assert_matches!(res, Ok(0));
        assert_eq!(out, "");
    }

    #[test]
    fn test_alias_update_returns_latest() {
        let mut env = Environment::default();
        for cmd in ["one", "two", "three"] {
            run(alias(&["x", "echo", cmd]), &mut env).0.unwrap();
        }
        let (_, out) = run(alias(&["x"]), &mut env);
        assert_eq!(out, "x='echo three'\n");
        assert_eq!(env.aliases.iter().count(), 1);
    }

    #[test]
    fn test_alias_not_found() {
        let mut env = Environment::default();
        let (res, out) = run(alias(&["missing"]), &mut env);
        assert_matches!(res, Err(ShellError::AliasNotFound(name)) if name == "missing");
        assert_eq!(out, "");
    }

    #[test]
    fn test_export_sets_variable() {
        let mut env = Environment::default();
        let export = Export {
            assignments: vec!["FOO=bar".to_string()],
        };
        assert_matches!(run(export, &mut env).0, Ok(0));
        assert_eq!(env.get_var("FOO"), Some("bar"));
    }

    #[test]
    fn test_export_keeps_later_equal_signs() {
        let mut env = Environment::default();
        let export = Export {
            assignments: vec!["OPTS=a=b".to_string()],
        };
        assert_matches!(run(export, &mut env).0, Ok(0));
        assert_eq!(env.get_var("OPTS"), Some("a=b"));
    }

    #[test]
    fn test_export_invalid_formats() {
        for args in [vec![], vec!["FOO"], vec!["FOO="], vec!["=bar"], vec!["A=1", "B=2"]] {
            let mut env = Environment::default();
            let export = Export {
                assignments: args.iter().map(|s| s.to_string()).collect(),
            };
            assert_matches!(run(export, &mut env).0, Err(ShellError::InvalidExport));
            assert!(env.vars.is_empty(), "no mutation expected for {:?}", args);
        }
    }

    #[test]
    fn test_unset_removes_variables() {
        let mut env = Environment::default();
        env.set_var("A", "1");
        env.set_var("B", "2");
        let unset = Unset {
            names: vec!["A".to_string(), "B".to_string()],
        };
        assert_matches!(run(unset, &mut env).0, Ok(0));
        assert!(env.vars.is_empty());
    }

    #[test]
    fn test_unset_partial_failure_still_removes_the_rest() {
        let mut env = Environment::default();
        env.set_var("A", "1");
        env.set_var("C", "3");
        let unset = Unset {
            names: vec!["A".to_string(), "B".to_string(), "C".to_string()],
        };
        assert_matches!(
            run(unset, &mut env).0,
            Err(ShellError::VariableNotPresent(missing)) if missing == ["B"]
        );
        assert_eq!(env.get_var("A"), None);
        assert_eq!(env.get_var("C"), None);
    }

    #[test]
    fn test_unset_without_arguments() {
        let mut env = Environment::default();
        let unset = Unset { names: Vec::new() };
        assert_matches!(run(unset, &mut env).0, Err(ShellError::InvalidUnset));
    }

    #[test]
    fn test_factory_matches_only_own_name() {
        let env = Environment::default();
        let factory = Factory::<Alias>::default();
        assert!(factory.try_create(&env, "alias", &[]).is_some());
        assert!(factory.try_create(&env, "export", &["A=1"]).is_none());
    }

    #[test]
    fn test_factory_passes_dashed_words_to_alias() {
        let mut env = Environment::default();
        let (res, _) = run_words::<Alias>(&mut env, "alias", &["ll", "ls", "-l", "--color"]);
        assert_matches!(res, Ok(0));
        assert_eq!(env.aliases.get("ll").unwrap().command, "ls -l --color");
    }

    #[test]
    fn test_help_is_an_ordinary_alias_name() {
        let mut env = Environment::default();
        let (res, out) = run_words::<Alias>(&mut env, "alias", &["help", "echo", "usage"]);
        assert_matches!(res, Ok(0));
        assert_eq!(out, "");
        assert_eq!(env.aliases.get("help").unwrap().command, "echo usage");

        let (_, out) = run_words::<Alias>(&mut env, "alias", &["--help"]);
        assert_eq!(out, "");
    }

    #[test]
    fn test_double_dash_is_an_ordinary_alias_name() {
        let mut env = Environment::default();
        let (res, _) = run_words::<Alias>(&mut env, "alias", &["--", "x", "y"]);
        assert_matches!(res, Ok(0));
        assert_eq!(env.aliases.get("--").unwrap().command, "x y");
        assert!(env.aliases.get("x").is_none());
    }

    #[test]
    fn test_dashed_operands_are_not_options() {
        let mut env = Environment::default();
        let (res, _) = run_words::<Alias>(&mut env, "alias", &["-h"]);
        assert_matches!(res, Err(ShellError::AliasNotFound(name)) if name == "-h");

        let (res, _) = run_words::<Export>(&mut env, "export", &["-x=1"]);
        assert_matches!(res, Ok(0));
        assert_eq!(env.get_var("-x"), Some("1"));
    }

    #[test]
    fn test_unset_help_removes_the_variable() {
        let mut env = Environment::default();
        env.set_var("help", "1");
        let (res, out) = run_words::<Unset>(&mut env, "unset", &["help"]);
        assert_matches!(res, Ok(0));
        assert_eq!(out, "");
        assert_eq!(env.get_var("help"), None);
    }
}
