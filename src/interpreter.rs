use crate::command::{CommandFactory, ExitCode, Stdout, Streams};
use crate::env::Environment;
use crate::error::Result;
use crate::expand::substitute_variables;
use crate::external::ExternalCommand;
use crate::{lexer, redirect};
use std::io::Write;

/// Factory allows creating instances of ExecutableCommand.
///
/// Only supports the builtins defined in this crate.
pub(crate) struct Factory<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Default for Factory<T> {
    fn default() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

/// A minimal shell-like interpreter that executes one command line at a time.
///
/// Each line goes through these stages, in order:
/// 1. split into words,
/// 2. `$NAME` substitution,
/// 3. builtin dispatch (`alias`, `export`, `unset`), which ends the line if it matches,
/// 4. one level of alias substitution followed by a second `$NAME` substitution,
/// 5. output redirection,
/// 6. launching the external program and waiting for it.
///
/// Builtins are checked before aliases, so an alias named like a builtin is never used.
///
/// Example
/// ```
/// use wish::Interpreter;
/// let mut sh = Interpreter::default();
/// let (mut out, mut err) = (Vec::<u8>::new(), Vec::<u8>::new());
/// sh.execute_line("alias x echo hi", &mut out, &mut err);
/// sh.execute_line("alias x", &mut out, &mut err);
/// assert_eq!(out, b"x='echo hi'\n");
/// ```
pub struct Interpreter {
    env: Environment,
    builtins: Vec<Box<dyn CommandFactory>>,
}

impl Interpreter {
    /// Create a new interpreter with a custom set of builtin factories.
    pub fn new(env: Environment, builtins: Vec<Box<dyn CommandFactory>>) -> Self {
        Self { env, builtins }
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn env_mut(&mut self) -> &mut Environment {
        &mut self.env
    }

    /// Execute one command line, writing builtin output and error reports to the given
    /// streams.
    ///
    /// Errors never escape: they are printed to `stderr` as `Error: <message>` and the
    /// returned exit code is 1. The exit code of an external program is discarded and 0
    /// is returned once it has been waited for.
    pub fn execute_line(
        &mut self,
        line: &str,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> ExitCode {
        let mut io = Streams { stdout, stderr };
        match self.execute_tokens(line, &mut io) {
            Ok(code) => code,
            Err(e) => {
                log::debug!("line failed: {:?}", e);
                // the error stream itself failing leaves nothing to report to
                let _ = writeln!(io.stderr, "Error: {}", e);
                1
            }
        }
    }

    fn execute_tokens(&mut self, line: &str, io: &mut Streams<'_>) -> Result<ExitCode> {
        let tokens = lexer::split_into_tokens(line);
        if tokens.is_empty() {
            return Ok(0);
        }
        let tokens = substitute_variables(tokens, &self.env);
        log::debug!("tokens: {:?}", tokens);

        if let Some(code) = self.run_builtin(&tokens, io)? {
            return Ok(code);
        }

        let mut argv = match self.env.aliases.substitute(&tokens) {
            Some(replaced) => substitute_variables(replaced, &self.env),
            None => tokens,
        };

        let redirected = redirect::resolve(&mut argv)?;
        let command = ExternalCommand::resolve(&self.env, &argv)?;
        let stdout = redirected.map(|file| Box::new(file) as Box<dyn Stdout>);

        let code = command.spawn_and_wait(stdout, &self.env)?;
        if code != 0 {
            log::debug!("ignoring exit code {}", code);
        }
        Ok(0)
    }

    /// Returns `None` if the first word does not name a builtin.
    fn run_builtin(&mut self, tokens: &[String], io: &mut Streams<'_>) -> Result<Option<ExitCode>> {
        let Some((name, args)) = tokens.split_first() else {
            return Ok(None);
        };
        let args: Vec<&str> = args.iter().map(String::as_str).collect();

        for factory in &self.builtins {
            if let Some(cmd) = factory.try_create(&self.env, name, &args) {
                log::debug!("running builtin {}", name);
                return cmd.execute(io, &mut self.env).map(Some);
            }
        }
        Ok(None)
    }
}

impl Default for Interpreter {
    /// Create an interpreter over the current process environment with the builtins
    /// `alias`, `export` and `unset`.
    fn default() -> Self {
        use crate::builtin::*;
        Self::new(
            Environment::new(),
            vec![
                Box::new(Factory::<Alias>::default()),
                Box::new(Factory::<Export>::default()),
                Box::new(Factory::<Unset>::default()),
            ],
        )
    }
}
