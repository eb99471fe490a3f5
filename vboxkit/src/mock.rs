//! Scripted runner for testing and development.
//!
//! [`MockRunner`] replays a fixed transcript of expected invocations without
//! requiring VirtualBox to be installed. Each expected call carries the full
//! argument vector and the output to return; an out-of-order or unexpected
//! invocation panics, which surfaces as a test failure.

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::error::Result;
use crate::runner::{CommandRunner, RunOutput};

struct ScriptedCall {
    args: Vec<String>,
    output: RunOutput,
}

/// Runner that replays a scripted transcript of tool invocations.
pub struct MockRunner {
    script: Mutex<VecDeque<ScriptedCall>>,
}

impl MockRunner {
    /// Create an empty transcript.
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
        }
    }

    /// Append an expected invocation and the output it produces.
    pub fn expect(self, args: &[&str], output: RunOutput) -> Self {
        self.script
            .lock()
            .expect("mock script lock poisoned")
            .push_back(ScriptedCall {
                args: args.iter().map(|a| a.to_string()).collect(),
                output,
            });
        self
    }

    /// True when every scripted call has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.script
            .lock()
            .expect("mock script lock poisoned")
            .is_empty()
    }
}

impl Default for MockRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, _binary: &str, args: &[String]) -> Result<RunOutput> {
        let next = self
            .script
            .lock()
            .expect("mock script lock poisoned")
            .pop_front();

        match next {
            Some(call) => {
                assert_eq!(
                    call.args, args,
                    "scripted invocation does not match actual arguments"
                );
                Ok(call.output)
            }
            None => panic!("unexpected invocation: {args:?}"),
        }
    }
}
