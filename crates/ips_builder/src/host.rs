use std::ffi::OsString;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use tracing::debug;

/// A single run of an external program.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    pub current_dir: PathBuf,
}

impl Invocation {
    pub fn new(program: impl Into<PathBuf>, current_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: vec![],
            current_dir: current_dir.into(),
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// How a tool run ended. `None` when the process was killed by a signal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToolStatus(pub Option<i32>);

impl ToolStatus {
    pub const SUCCESS: ToolStatus = ToolStatus(Some(0));

    pub fn success(&self) -> bool {
        self.0 == Some(0)
    }
}

impl From<ExitStatus> for ToolStatus {
    fn from(status: ExitStatus) -> Self {
        ToolStatus(status.code())
    }
}

impl fmt::Display for ToolStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(code) => write!(f, "exit code {}", code),
            None => write!(f, "terminated by signal"),
        }
    }
}

/// Everything the builder needs from the outside world.
pub trait Host {
    fn exists(&self, path: &Path) -> bool;

    /// Files directly inside `dir` with the given extension, in the order the directory lists
    /// them. Hidden files are skipped.
    fn list_sources(&self, dir: &Path, extension: &str) -> io::Result<Vec<PathBuf>>;

    /// Copy `from` over `to`, creating `to` if needed.
    fn copy(&self, from: &Path, to: &Path) -> io::Result<()>;

    fn create_dir_all(&self, dir: &Path) -> io::Result<()>;

    /// Run the program to completion.
    fn run(&self, invocation: &Invocation) -> io::Result<ToolStatus>;
}

/// The real file system and real processes.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemHost;

impl Host for SystemHost {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn list_sources(&self, dir: &Path, extension: &str) -> io::Result<Vec<PathBuf>> {
        let mut sources = vec![];
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            if entry.file_name().to_string_lossy().starts_with('.') {
                continue;
            }
            let path = entry.path();
            if path.is_file() && path.extension().map_or(false, |e| e == extension) {
                sources.push(path);
            }
        }
        Ok(sources)
    }

    fn copy(&self, from: &Path, to: &Path) -> io::Result<()> {
        std::fs::copy(from, to).map(|_| ())
    }

    fn create_dir_all(&self, dir: &Path) -> io::Result<()> {
        std::fs::create_dir_all(dir)
    }

    fn run(&self, invocation: &Invocation) -> io::Result<ToolStatus> {
        debug!("Running: {}", invocation);
        Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&invocation.current_dir)
            .status()
            .map(ToolStatus::from)
    }
}
