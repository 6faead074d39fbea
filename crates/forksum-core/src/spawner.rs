//! Unit creation, result channels, and the read-then-reap sequence.
//!
//! A [`Spawner`] launches one unit of work for a half-range and hands back
//! a [`UnitHandle`]. The creator first drains the unit's channel with
//! [`UnitHandle::read`], then waits for the unit to terminate with
//! [`Delivered::reap`]. A result is only trusted once both steps succeed.

use std::ffi::OsString;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::thread::{self, JoinHandle};

use tracing::{debug, trace, warn};

use crate::channel::byte_channel;
use crate::constants::{RETRY_LOG_INTERVAL, UNIT_STACK_SIZE};
use crate::driver::Driver;
use crate::error::ForkSumError;
use crate::outcome::ForkSum;
use crate::range::UnitRange;
use crate::wire;

/// Creates units of work.
pub trait Spawner: Send + Sync {
    /// Launch a unit that computes `range` and writes its result to a new
    /// channel. `driver` is the creator's driver, for backends that run the
    /// unit in-process.
    fn spawn(&self, driver: &Driver, range: UnitRange) -> Result<UnitHandle, ForkSumError>;

    /// Name of this backend.
    fn name(&self) -> &str;
}

/// Waits for a unit to terminate.
pub trait Reap: Send {
    /// Block until the unit has terminated. Errors report how the unit
    /// itself failed.
    fn reap(self: Box<Self>) -> Result<(), ForkSumError>;
}

/// Creator-side handle to a running unit.
pub struct UnitHandle {
    range: UnitRange,
    reader: Box<dyn BufRead + Send>,
    reaper: Box<dyn Reap>,
}

impl UnitHandle {
    /// Pair the reading end of a unit's channel with the unit's reaper.
    pub fn new(
        range: UnitRange,
        reader: impl BufRead + Send + 'static,
        reaper: impl Reap + 'static,
    ) -> Self {
        Self {
            range,
            reader: Box::new(reader),
            reaper: Box::new(reaper),
        }
    }

    /// Range this unit was spawned for.
    #[must_use]
    pub fn range(&self) -> UnitRange {
        self.range
    }

    /// Read the unit's two result lines.
    ///
    /// On failure the unit is reaped before returning, and its own error
    /// (if it has one) is returned in place of the channel error.
    pub fn read(mut self) -> Result<Delivered, ForkSumError> {
        match wire::decode(&mut self.reader) {
            Ok(result) => Ok(Delivered {
                range: self.range,
                result,
                reaper: self.reaper,
            }),
            Err(err) => {
                drop(self.reader);
                debug!(range = %self.range, error = %err, "unit channel failed, reaping");
                Err(self.reaper.reap().err().unwrap_or(err))
            }
        }
    }
}

/// A unit whose result has been read but which has not been reaped yet.
pub struct Delivered {
    range: UnitRange,
    result: ForkSum,
    reaper: Box<dyn Reap>,
}

impl Delivered {
    /// Wait for the unit to terminate and release its result.
    pub fn reap(self) -> Result<ForkSum, ForkSumError> {
        self.reaper.reap()?;
        trace!(range = %self.range, sum = self.result.sum, count = self.result.count, "unit reaped");
        Ok(self.result)
    }
}

/// errno values for ENOMEM, ENFILE and EMFILE, which agree across Unixes.
#[cfg(unix)]
const EXHAUSTION_ERRNOS: [i32; 3] = [12, 23, 24];

/// Whether a creation failure is momentary resource exhaustion.
#[must_use]
pub fn is_transient(err: &io::Error) -> bool {
    if matches!(
        err.kind(),
        io::ErrorKind::WouldBlock | io::ErrorKind::OutOfMemory | io::ErrorKind::Interrupted
    ) {
        return true;
    }
    #[cfg(unix)]
    {
        err.raw_os_error()
            .is_some_and(|code| EXHAUSTION_ERRNOS.contains(&code))
    }
    #[cfg(not(unix))]
    {
        false
    }
}

/// Run `create` until it succeeds, retrying transient failures without
/// bound. Any other failure is fatal.
pub fn retry_transient<T>(
    range: UnitRange,
    mut create: impl FnMut() -> io::Result<T>,
) -> Result<T, ForkSumError> {
    let mut failures: u64 = 0;
    loop {
        match create() {
            Ok(value) => {
                if failures > 0 {
                    debug!(%range, failures, "unit created after transient failures");
                }
                return Ok(value);
            }
            Err(err) if is_transient(&err) => {
                failures += 1;
                if failures == 1 || failures % RETRY_LOG_INTERVAL == 0 {
                    warn!(%range, failures, error = %err, "unit creation failed, retrying");
                }
                thread::yield_now();
            }
            Err(source) => return Err(ForkSumError::Spawn { range, source }),
        }
    }
}

/// Runs each unit on its own OS thread with an in-memory byte channel.
#[derive(Debug, Clone)]
pub struct ThreadSpawner {
    stack_size: usize,
}

impl ThreadSpawner {
    /// Create a thread spawner with the default unit stack size.
    #[must_use]
    pub fn new() -> Self {
        Self::with_stack_size(UNIT_STACK_SIZE)
    }

    /// Create a thread spawner with the given unit stack size.
    #[must_use]
    pub fn with_stack_size(stack_size: usize) -> Self {
        Self { stack_size }
    }
}

impl Default for ThreadSpawner {
    fn default() -> Self {
        Self::new()
    }
}

impl Spawner for ThreadSpawner {
    fn spawn(&self, driver: &Driver, range: UnitRange) -> Result<UnitHandle, ForkSumError> {
        let (handle, reader) = retry_transient(range, || {
            let (mut writer, reader) = byte_channel();
            let driver = driver.clone();
            let handle = thread::Builder::new()
                .name(format!("forksum {range}"))
                .stack_size(self.stack_size)
                .spawn(move || {
                    let result = driver.compute(range)?;
                    wire::encode(&result, &mut writer)
                })?;
            Ok((handle, reader))
        })?;
        trace!(%range, "spawned thread unit");
        Ok(UnitHandle::new(
            range,
            BufReader::new(reader),
            ThreadReaper { range, handle },
        ))
    }

    fn name(&self) -> &str {
        "thread"
    }
}

struct ThreadReaper {
    range: UnitRange,
    handle: JoinHandle<Result<(), ForkSumError>>,
}

impl Reap for ThreadReaper {
    fn reap(self: Box<Self>) -> Result<(), ForkSumError> {
        let Self { range, handle } = *self;
        handle
            .join()
            .map_err(|_| ForkSumError::UnitPanicked(range))?
    }
}

/// Runs each unit as a child process that writes the wire format to its
/// stdout.
///
/// The child is invoked as `program [args...] -- <start> <end>` and is
/// expected to compute the range and exit with status 0.
#[derive(Debug, Clone)]
pub struct ProcessSpawner {
    program: PathBuf,
    args: Vec<OsString>,
}

impl ProcessSpawner {
    /// Create a spawner that runs `program`.
    #[must_use]
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Add an argument passed before the range bounds.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    fn command(&self, range: UnitRange) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .arg("--")
            .arg(range.start.to_string())
            .arg(range.end.to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit());
        cmd
    }
}

impl Spawner for ProcessSpawner {
    fn spawn(&self, _driver: &Driver, range: UnitRange) -> Result<UnitHandle, ForkSumError> {
        let mut child = retry_transient(range, || self.command(range).spawn())?;
        let Some(stdout) = child.stdout.take() else {
            return Err(ForkSumError::Io(io::Error::other("unit stdout was not captured")));
        };
        trace!(%range, pid = child.id(), "spawned process unit");
        Ok(UnitHandle::new(
            range,
            BufReader::new(stdout),
            ProcessReaper { range, child },
        ))
    }

    fn name(&self) -> &str {
        "process"
    }
}

struct ProcessReaper {
    range: UnitRange,
    child: Child,
}

impl Reap for ProcessReaper {
    fn reap(mut self: Box<Self>) -> Result<(), ForkSumError> {
        let status = self.child.wait()?;
        if status.success() {
            Ok(())
        } else {
            Err(ForkSumError::UnitExited {
                range: self.range,
                status: status.to_string(),
            })
        }
    }
}
