use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use duprun::errors::{DuprunError, Result};
use duprun::exec::{ProcessRunner, ToolInvocation};

type ExitRule = Box<dyn Fn(&ToolInvocation) -> Option<i32> + Send + Sync>;

/// A fake runner that:
/// - records every invocation it is asked to run
/// - returns scripted exit codes (0 unless a rule says otherwise)
/// - can pretend a program is missing
///
/// Clones share their recording, so keep one clone in the test and hand the
/// other to the code under test.
#[derive(Clone, Default)]
pub struct FakeRunner {
    invocations: Arc<Mutex<Vec<ToolInvocation>>>,
    rules: Arc<Mutex<Vec<ExitRule>>>,
    missing: Arc<Mutex<Vec<PathBuf>>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exit with `code` whenever `program` is launched.
    pub fn exit_code_for_program(self, program: impl Into<PathBuf>, code: i32) -> Self {
        let program = program.into();
        self.rule(move |inv| (inv.program == program).then_some(code))
    }

    /// Exit with `code` whenever the first argument is `first_arg`.
    pub fn exit_code_for_first_arg(self, first_arg: &str, code: i32) -> Self {
        let first_arg = first_arg.to_string();
        self.rule(move |inv| (inv.args.first() == Some(&first_arg)).then_some(code))
    }

    /// Exit with `code` for every invocation not matched by an earlier rule.
    pub fn exit_code_for_all(self, code: i32) -> Self {
        self.rule(move |_| Some(code))
    }

    /// Fail to launch `program` with `LaunchFailed`.
    pub fn missing_program(self, program: impl Into<PathBuf>) -> Self {
        self.missing.lock().unwrap().push(program.into());
        self
    }

    fn rule<F>(self, rule: F) -> Self
    where
        F: Fn(&ToolInvocation) -> Option<i32> + Send + Sync + 'static,
    {
        self.rules.lock().unwrap().push(Box::new(rule));
        self
    }

    pub fn invocations(&self) -> Vec<ToolInvocation> {
        self.invocations.lock().unwrap().clone()
    }

    /// Programs launched so far, in order.
    pub fn programs(&self) -> Vec<PathBuf> {
        self.invocations().into_iter().map(|i| i.program).collect()
    }

    pub fn launched(&self, program: &Path) -> usize {
        self.invocations()
            .iter()
            .filter(|i| i.program == program)
            .count()
    }
}

impl ProcessRunner for FakeRunner {
    fn run<'a>(
        &'a mut self,
        invocation: &'a ToolInvocation,
    ) -> Pin<Box<dyn Future<Output = Result<i32>> + Send + 'a>> {
        let this = self.clone();

        Box::pin(async move {
            tracing::debug!(?invocation, "fake runner invoked");

            if this.missing.lock().unwrap().contains(&invocation.program) {
                return Err(DuprunError::LaunchFailed {
                    program: invocation.program.clone(),
                    source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
                });
            }

            this.invocations.lock().unwrap().push(invocation.clone());

            let code = this
                .rules
                .lock()
                .unwrap()
                .iter()
                .find_map(|rule| rule(invocation))
                .unwrap_or(0);
            Ok(code)
        })
    }
}
