//! # Process Runner
//!
//! Executes one resolved command line as a child process and captures its
//! output. This module follows the same trait-based split as the rest of the
//! crate: the [`CommandRunner`] trait is the seam the dispatcher talks to,
//! and [`ProcessRunner`] is the real implementation backed by
//! `std::process`. Tests swap in a recording runner to count launches
//! without spawning anything.
//!
//! ## Behaviour
//!
//! - The child runs in `working_dir` when that directory exists; otherwise
//!   it inherits the caller's working directory. This lets commands such as
//!   a connection test run before any working copy has been checked out.
//! - stdout and stderr are drained concurrently into one buffer, so the
//!   captured text is the merged output in arrival order.
//! - A watchdog bounds the whole call by `timeout`. A child still running at
//!   the deadline is killed; output pipes still held open at the deadline
//!   (by a background grandchild) are abandoned. Either way the call fails
//!   with [`ExecutionFailure::Timeout`], carrying whatever was captured so far.
//! - Exactly one attempt is made. Retrying belongs to the caller.

use std::io::{self, Read};
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::{debug, warn};
use wait_timeout::ChildExt;

use crate::error::ExecutionFailure;

/// Trait for running a resolved command - allows mocking in tests
pub trait CommandRunner: Send + Sync {
    /// Run `argv` and return its merged stdout/stderr.
    fn run(
        &self,
        argv: &[String],
        working_dir: Option<&Path>,
        timeout: Duration,
    ) -> Result<Vec<u8>, ExecutionFailure>;
}

/// The default implementation of `CommandRunner`, which spawns real
/// child processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(
        &self,
        argv: &[String],
        working_dir: Option<&Path>,
        timeout: Duration,
    ) -> Result<Vec<u8>, ExecutionFailure> {
        let (program, args) = argv.split_first().ok_or_else(|| {
            ExecutionFailure::Launch(io::Error::new(
                io::ErrorKind::InvalidInput,
                "empty command line",
            ))
        })?;

        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        match working_dir {
            Some(dir) if dir.is_dir() => {
                cmd.current_dir(dir);
            }
            Some(dir) => debug!(
                "Working directory [{}] does not exist, using current directory",
                dir.display()
            ),
            None => {}
        }

        let mut child = cmd.spawn().map_err(ExecutionFailure::Launch)?;

        let deadline = Instant::now() + timeout;
        let merged = Arc::new(Mutex::new(Vec::new()));
        let (done_tx, done_rx) = mpsc::channel();
        let mut pumps = Vec::with_capacity(2);
        if let Some(stdout) = child.stdout.take() {
            pumps.push(pump(stdout, Arc::clone(&merged), done_tx.clone()));
        }
        if let Some(stderr) = child.stderr.take() {
            pumps.push(pump(stderr, Arc::clone(&merged), done_tx.clone()));
        }
        drop(done_tx);

        let status = match child.wait_timeout(timeout) {
            Ok(Some(status)) => status,
            Ok(None) => {
                warn!(
                    "Command [{}] still running after {}ms, killing",
                    program,
                    timeout.as_millis()
                );
                // The child may already have exited between the wait and the kill.
                let _ = child.kill();
                let _ = child.wait();
                // Pumps are left to finish on their own: a grandchild can keep
                // the pipes open long after the direct child is gone.
                return Err(ExecutionFailure::Timeout {
                    timeout,
                    output: lossy(&snapshot(&merged)),
                });
            }
            Err(e) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(ExecutionFailure::Launch(e));
            }
        };

        // The direct child is gone, but a background grandchild can still hold
        // the pipes open. Readers get whatever is left of the timeout.
        let mut finished = 0;
        while finished < pumps.len() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match done_rx.recv_timeout(remaining) {
                Ok(()) => finished += 1,
                Err(RecvTimeoutError::Disconnected) => break,
                Err(RecvTimeoutError::Timeout) => {
                    warn!(
                        "Output of [{}] still open after {}ms, giving up",
                        program,
                        timeout.as_millis()
                    );
                    return Err(ExecutionFailure::Timeout {
                        timeout,
                        output: lossy(&snapshot(&merged)),
                    });
                }
            }
        }

        for handle in pumps {
            if handle.join().is_err() {
                warn!("Output reader thread for [{}] panicked", program);
            }
        }
        let output = snapshot(&merged);

        debug!("Command [{}] finished with {}", program, status);
        if status.success() {
            Ok(output)
        } else {
            Err(ExecutionFailure::ExitStatus {
                code: status.code(),
                output: lossy(&output),
            })
        }
    }
}

fn pump<R: Read + Send + 'static>(
    mut reader: R,
    sink: Arc<Mutex<Vec<u8>>>,
    done: Sender<()>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut buf = [0u8; 8192];
        loop {
            match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => sink
                    .lock()
                    .unwrap_or_else(|poisoned| poisoned.into_inner())
                    .extend_from_slice(&buf[..n]),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(_) => break,
            }
        }
        let _ = done.send(());
    })
}

fn snapshot(buffer: &Mutex<Vec<u8>>) -> Vec<u8> {
    buffer
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .clone()
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
