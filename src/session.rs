//! Interactive yes/no loop driving repeated runs.

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// Question shown before every run.
pub const PROMPT: &str = "Start image processing? (y/n): ";

const GOODBYE: &str = "Exiting.";

/// Work performed each time the user answers yes.
#[async_trait]
pub trait Job: Send + Sync {
    /// Runs to completion. Failures are the job's own business.
    async fn run_once(&self);
}

/// Session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Waiting for the user to answer the prompt.
    AwaitingInput,
    /// The user declined or input ended.
    Terminated,
}

/// Prompts on `output`, reads answers from `input`, and runs a [`Job`] per yes.
pub struct Session<R, W> {
    input: R,
    output: W,
    state: State,
}

impl<R, W> Session<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Creates a session in the [`State::AwaitingInput`] state.
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            state: State::AwaitingInput,
        }
    }

    /// Current state.
    pub fn state(&self) -> State {
        self.state
    }

    /// Loops until the user declines, running `job` after every `y`.
    ///
    /// A run always finishes before the next prompt. Returns how many runs
    /// were started.
    pub async fn run<J: Job + ?Sized>(&mut self, job: &J) -> std::io::Result<usize> {
        let mut runs = 0;
        let mut line = String::new();

        while self.state == State::AwaitingInput {
            self.output.write_all(PROMPT.as_bytes()).await?;
            self.output.flush().await?;

            line.clear();
            let read = self.input.read_line(&mut line).await?;
            if read > 0 && is_affirmative(&line) {
                job.run_once().await;
                runs += 1;
            } else {
                self.output.write_all(format!("\n{GOODBYE}\n").as_bytes()).await?;
                self.output.shutdown().await?;
                self.state = State::Terminated;
            }
        }

        Ok(runs)
    }

    /// Consumes the session, returning the writer.
    pub fn into_output(self) -> W {
        self.output
    }
}

fn is_affirmative(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingJob {
        runs: AtomicUsize,
    }

    #[async_trait]
    impl Job for CountingJob {
        async fn run_once(&self) {
            self.runs.fetch_add(1, Ordering::SeqCst);
        }
    }

    async fn drive(input: &str) -> (usize, usize, String) {
        let job = CountingJob::default();
        let mut session = Session::new(input.as_bytes(), Vec::new());
        let runs = session.run(&job).await.unwrap();
        assert_eq!(session.state(), State::Terminated);
        let output = String::from_utf8(session.into_output()).unwrap();
        (runs, job.runs.load(Ordering::SeqCst), output)
    }

    #[test]
    fn test_is_affirmative() {
        assert!(is_affirmative("y\n"));
        assert!(is_affirmative("  Y \r\n"));
        assert!(!is_affirmative("yes\n"));
        assert!(!is_affirmative("n\n"));
        assert!(!is_affirmative("\n"));
    }

    #[tokio::test]
    async fn test_decline_runs_nothing() {
        let (runs, executed, output) = drive("n\n").await;
        assert_eq!(runs, 0);
        assert_eq!(executed, 0);
        assert_eq!(output.matches(PROMPT).count(), 1);
        assert!(output.ends_with("Exiting.\n"));
    }

    #[tokio::test]
    async fn test_reprompts_after_each_run() {
        let (runs, executed, output) = drive("y\nY\nq\ny\n").await;
        assert_eq!(runs, 2);
        assert_eq!(executed, 2);
        assert_eq!(output.matches(PROMPT).count(), 3);
    }

    #[tokio::test]
    async fn test_end_of_input_terminates() {
        let (runs, executed, _) = drive("y\n").await;
        assert_eq!(runs, 1);
        assert_eq!(executed, 1);
    }

    #[tokio::test]
    async fn test_long_session_does_not_grow_stack() {
        let input = "y\n".repeat(10_000);
        let (runs, executed, _) = drive(&input).await;
        assert_eq!(runs, 10_000);
        assert_eq!(executed, 10_000);
    }
}
