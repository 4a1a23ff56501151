use std::fmt;
use std::path::PathBuf;

use crate::host::ToolStatus;

/// One of the files that has to be in place before anything is built.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Prerequisite {
    BaseImage,
    Assembler,
    Patcher,
}

impl Prerequisite {
    /// Where to get the file from, if it is something that can be downloaded.
    pub fn download_hint(&self) -> Option<&'static str> {
        match self {
            Prerequisite::BaseImage => None,
            Prerequisite::Assembler => Some("https://github.com/RPGHacker/asar"),
            Prerequisite::Patcher => Some("https://www.romhacking.net/utilities/1040/"),
        }
    }
}

impl fmt::Display for Prerequisite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prerequisite::BaseImage => write!(f, "base image"),
            Prerequisite::Assembler => write!(f, "assembler"),
            Prerequisite::Patcher => write!(f, "patch tool"),
        }
    }
}

fn file_name(path: &std::path::Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{} missing", file_name(.path))]
    MissingPrerequisite {
        prerequisite: Prerequisite,
        path: PathBuf,
    },

    #[error("Could not {action} ({}). {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("The working copy ({}) is the base image", .path.display())]
    WorkingCopyIsBaseImage { path: PathBuf },

    #[error("{invocation} failed ({status})")]
    ToolFailed { invocation: String, status: ToolStatus },
}

impl Error {
    pub(crate) fn io(
        action: &'static str,
        path: impl Into<PathBuf>,
    ) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Error::Io {
            action,
            path,
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
