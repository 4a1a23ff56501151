use std::path::{Path, PathBuf};

use serde::Deserialize;

#[cfg(windows)]
const ASSEMBLER: &str = "asar.exe";
#[cfg(not(windows))]
const ASSEMBLER: &str = "asar";

#[cfg(windows)]
const PATCHER: &str = "flips.exe";
#[cfg(not(windows))]
const PATCHER: &str = "flips-linux";

/// Where everything lives. Relative paths are resolved against `resources`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    pub resources: PathBuf,
    pub base_image: PathBuf,
    pub assembler: PathBuf,
    pub patcher: PathBuf,
    pub source_dir: PathBuf,
    pub source_extension: String,
    pub working_copy: PathBuf,
    pub output_dir: PathBuf,
    pub patch_extension: String,
}

/// Partial [Layout], as read from a config file. Missing keys keep the defaults.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutOverrides {
    pub base_image: Option<PathBuf>,
    pub assembler: Option<PathBuf>,
    pub patcher: Option<PathBuf>,
    pub source_dir: Option<PathBuf>,
    pub source_extension: Option<String>,
    pub working_copy: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub patch_extension: Option<String>,
}

impl Layout {
    pub fn new(resources: impl Into<PathBuf>) -> Self {
        Self {
            resources: resources.into(),
            base_image: PathBuf::from("sm.sfc"),
            assembler: PathBuf::from(ASSEMBLER),
            patcher: PathBuf::from(PATCHER),
            source_dir: ["..", "src", "ips_patches", "sm"].iter().collect(),
            source_extension: "asm".to_owned(),
            working_copy: PathBuf::from("working.sfc"),
            output_dir: ["..", "build"].iter().collect(),
            patch_extension: "ips".to_owned(),
        }
    }

    pub fn apply(&mut self, overrides: LayoutOverrides) {
        macro_rules! apply {
            ($($field:ident),*) => {
                $(
                    if let Some(value) = overrides.$field {
                        self.$field = value;
                    }
                )*
            };
        }

        apply!(
            base_image,
            assembler,
            patcher,
            source_dir,
            source_extension,
            working_copy,
            output_dir,
            patch_extension
        );
    }

    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.resources.join(path)
        }
    }

    pub fn base_image_path(&self) -> PathBuf {
        self.resolve(&self.base_image)
    }

    pub fn assembler_path(&self) -> PathBuf {
        self.resolve(&self.assembler)
    }

    pub fn patcher_path(&self) -> PathBuf {
        self.resolve(&self.patcher)
    }

    pub fn source_dir_path(&self) -> PathBuf {
        self.resolve(&self.source_dir)
    }

    pub fn working_copy_path(&self) -> PathBuf {
        self.resolve(&self.working_copy)
    }

    pub fn output_dir_path(&self) -> PathBuf {
        self.resolve(&self.output_dir)
    }

    /// File name of the patch produced for `source`, e.g. `intro.asm` -> `intro.ips`.
    pub fn patch_name(&self, source: &Path) -> PathBuf {
        let name = source.file_name().unwrap_or(source.as_os_str());
        Path::new(name).with_extension(&self.patch_extension)
    }

    pub fn patch_path(&self, source: &Path) -> PathBuf {
        self.output_dir_path().join(self.patch_name(source))
    }
}
