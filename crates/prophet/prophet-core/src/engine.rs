//! Subprocess-backed forecast engine.

use std::io::{self, Read, Write};
use std::process::{ChildStdin, Command, ExitStatus, Stdio};
use std::thread;

use prophet_api::EngineConfig;
use prophet_spi::{ForecastEngine, ProphetError, Result};
use tracing::{debug, warn};

use crate::script::FORECAST_SCRIPT;

const OUTPUT_CAPACITY: usize = 1024;

/// Runs the forecasting engine as a child process, once per call.
///
/// The command line is `<program> [leading args] -c <embedded script>
/// [option args]`, or `<program> [leading args] <script> [option args]`
/// when a script file is configured. The child inherits the environment and
/// stderr; stdin gets the payload and is then closed; stdout is captured.
#[derive(Debug, Clone, Default)]
pub struct ProcessEngine {
    config: EngineConfig,
}

impl ProcessEngine {
    /// Engine running the embedded script with `python3`.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Engine honoring the `PROPHET_PYTHON` interpreter override.
    pub fn from_env() -> Self {
        Self::from_config(EngineConfig::from_env())
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Human-readable command line for `args`, with the embedded script
    /// body elided.
    pub fn command_line(&self, args: &[String]) -> Vec<String> {
        let mut line = vec![self.config.program.clone()];
        line.extend(self.config.leading_args.iter().cloned());
        match &self.config.script {
            Some(path) => line.push(path.display().to_string()),
            None => {
                line.push("-c".to_string());
                line.push("<embedded forecast script>".to_string());
            }
        }
        line.extend(args.iter().cloned());
        line
    }

    fn command(&self, args: &[String]) -> Command {
        let mut command = Command::new(&self.config.program);
        command.args(&self.config.leading_args);
        match &self.config.script {
            Some(path) => {
                command.arg(path);
            }
            None => {
                command.arg("-c").arg(FORECAST_SCRIPT);
            }
        }
        command
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit());
        command
    }
}

impl ForecastEngine for ProcessEngine {
    fn name(&self) -> &str {
        &self.config.program
    }

    fn execute(&self, payload: &[u8], args: &[String]) -> Result<Vec<u8>> {
        debug!(
            program = %self.config.program,
            args = ?args,
            payload_bytes = payload.len(),
            "spawning forecast engine"
        );

        let mut child = self
            .command(args)
            .spawn()
            .map_err(|source| ProphetError::ProcessLaunch {
                program: self.config.program.clone(),
                source,
            })?;

        let stdin = child.stdin.take();
        let stdout = child.stdout.take();

        // Stdin is fed from its own thread so a child that writes before it
        // has read everything cannot block on a full stdout pipe.
        let (written, read) = thread::scope(|scope| {
            let writer = scope.spawn(move || match stdin {
                Some(stdin) => feed_stdin(stdin, payload),
                None => Ok(()),
            });

            let mut buffer = Vec::with_capacity(OUTPUT_CAPACITY);
            let read = match stdout {
                Some(mut stdout) => stdout.read_to_end(&mut buffer).map(|_| buffer),
                None => Ok(buffer),
            };

            let written = writer.join().unwrap_or_else(|_| {
                Err(io::Error::new(io::ErrorKind::Other, "stdin writer panicked"))
            });
            (written, read)
        });

        let status = child.wait().map_err(ProphetError::ProcessIo)?;
        check_status(status)?;
        written.map_err(ProphetError::ProcessIo)?;
        let output = read.map_err(ProphetError::ProcessIo)?;

        debug!(output_bytes = output.len(), "forecast engine finished");
        Ok(output)
    }
}

/// Write the payload and close stdin. A child that exits without reading
/// all of it is judged by its exit status, not by the broken pipe.
fn feed_stdin(mut stdin: ChildStdin, payload: &[u8]) -> io::Result<()> {
    match stdin.write_all(payload) {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

fn check_status(status: ExitStatus) -> Result<()> {
    match status.code() {
        Some(0) => Ok(()),
        Some(code) => {
            warn!(code, "forecast engine exited with non-zero status");
            Err(ProphetError::ExitCode { code })
        }
        None => {
            warn!(%status, "forecast engine terminated without exit code");
            Err(ProphetError::Terminated {
                status: status.to_string(),
            })
        }
    }
}
