//! Builds IPS patches by running an assembler over copies of a base ROM and diffing the result
//! against the original.

pub mod builder;
pub mod error;
pub mod host;
pub mod layout;
pub mod tools;

pub use builder::{BuildOptions, PatchBuilder, PatchOutcome, Report};
pub use error::{Error, Prerequisite, Result};
pub use host::{Host, Invocation, SystemHost, ToolStatus};
pub use layout::{Layout, LayoutOverrides};
