use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{Error, Prerequisite, Result};
use crate::host::{Host, Invocation, ToolStatus};
use crate::layout::Layout;
use crate::tools;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Stop at the first tool that exits with a failure instead of carrying on.
    pub strict: bool,
}

/// What happened while building the patch for one source file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatchOutcome {
    pub source: PathBuf,
    pub patch: PathBuf,
    pub assembler: ToolStatus,
    pub patcher: ToolStatus,
    /// The patch file exists after the patch tool ran.
    pub written: bool,
}

impl PatchOutcome {
    pub fn succeeded(&self) -> bool {
        self.assembler.success() && self.patcher.success() && self.written
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Report {
    pub outcomes: Vec<PatchOutcome>,
}

impl Report {
    pub fn failures(&self) -> impl Iterator<Item = &PatchOutcome> {
        self.outcomes.iter().filter(|o| !o.succeeded())
    }

    pub fn is_clean(&self) -> bool {
        self.failures().next().is_none()
    }
}

pub struct PatchBuilder<H: Host> {
    layout: Layout,
    host: H,
    options: BuildOptions,
}

impl<H: Host> PatchBuilder<H> {
    pub fn new(layout: Layout, host: H) -> Self {
        Self {
            layout,
            host,
            options: BuildOptions::default(),
        }
    }

    pub fn with_options(mut self, options: BuildOptions) -> Self {
        self.options = options;
        self
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// The base image, the assembler and the patch tool have to exist, checked in that order.
    pub fn check_prerequisites(&self) -> Result<()> {
        let required = [
            (Prerequisite::BaseImage, self.layout.base_image_path()),
            (Prerequisite::Assembler, self.layout.assembler_path()),
            (Prerequisite::Patcher, self.layout.patcher_path()),
        ];

        for (prerequisite, path) in required {
            if !self.host.exists(&path) {
                return Err(Error::MissingPrerequisite { prerequisite, path });
            }
        }

        // Copying the base image onto itself would truncate it.
        let working_copy = self.layout.working_copy_path();
        if working_copy == self.layout.base_image_path() {
            return Err(Error::WorkingCopyIsBaseImage { path: working_copy });
        }

        Ok(())
    }

    /// The source files to build. A missing source directory has no sources.
    pub fn sources(&self) -> Result<Vec<PathBuf>> {
        let dir = self.layout.source_dir_path();
        match self.host.list_sources(&dir, &self.layout.source_extension) {
            Ok(sources) => Ok(sources),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("Source directory {} does not exist", dir.display());
                Ok(vec![])
            }
            Err(err) => Err(Error::io("list sources in", dir)(err)),
        }
    }

    /// Check the prerequisites, then build one patch for every source file.
    pub fn run(&self) -> Result<Report> {
        self.check_prerequisites()?;

        let output_dir = self.layout.output_dir_path();
        self.host
            .create_dir_all(&output_dir)
            .map_err(Error::io("create output directory", &output_dir))?;

        let sources = self.sources()?;
        debug!("Found {} source file(s)", sources.len());

        let mut report = Report::default();
        for source in sources {
            report.outcomes.push(self.build_one(&source)?);
        }

        Ok(report)
    }

    /// Reset the working copy, assemble `source` into it and diff it against the base image.
    pub fn build_one(&self, source: &Path) -> Result<PatchOutcome> {
        let patch = self.layout.patch_path(source);
        info!("Creating {}", self.layout.patch_name(source).display());

        let base_image = self.layout.base_image_path();
        let working_copy = self.layout.working_copy_path();
        self.host
            .copy(&base_image, &working_copy)
            .map_err(Error::io("copy base image to", &working_copy))?;

        let assembler = self.run_tool(tools::assemble(&self.layout, source), "run assembler")?;
        let patcher = self.run_tool(tools::create_patch(&self.layout, &patch), "run patch tool")?;

        let written = self.host.exists(&patch);
        if !written {
            warn!("No patch was written to {}", patch.display());
        }

        Ok(PatchOutcome {
            source: source.to_path_buf(),
            patch,
            assembler,
            patcher,
            written,
        })
    }

    fn run_tool(&self, invocation: Invocation, action: &'static str) -> Result<ToolStatus> {
        let status = self
            .host
            .run(&invocation)
            .map_err(Error::io(action, &invocation.program))?;

        if !status.success() {
            if self.options.strict {
                return Err(Error::ToolFailed {
                    invocation: invocation.to_string(),
                    status,
                });
            }
            warn!("{} failed ({})", invocation, status);
        }

        Ok(status)
    }

    /// Copy every patch in the output directory into `destination`, returning the copied files.
    pub fn copy_patches(&self, destination: &Path) -> Result<Vec<PathBuf>> {
        let output_dir = self.layout.output_dir_path();
        let patches = self
            .host
            .list_sources(&output_dir, &self.layout.patch_extension)
            .map_err(Error::io("list patches in", &output_dir))?;

        self.host
            .create_dir_all(destination)
            .map_err(Error::io("create directory", destination))?;

        let mut copied = vec![];
        for patch in patches {
            let Some(name) = patch.file_name() else {
                continue;
            };
            let target = destination.join(name);
            self.host
                .copy(&patch, &target)
                .map_err(Error::io("copy patch to", &target))?;
            info!("Copied {} to {}", patch.display(), target.display());
            copied.push(target);
        }

        Ok(copied)
    }
}
