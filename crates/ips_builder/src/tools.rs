//! Command lines for the external assembler and patch tool.

use std::path::Path;

use crate::host::Invocation;
use crate::layout::Layout;

/// `asar <source> <working copy>`. The assembler patches the working copy in place.
pub fn assemble(layout: &Layout, source: &Path) -> Invocation {
    Invocation::new(layout.assembler_path(), &layout.resources)
        .arg(source)
        .arg(layout.working_copy_path())
}

/// `flips -c --ips <original> <modified> <output>`.
pub fn create_patch(layout: &Layout, output: &Path) -> Invocation {
    Invocation::new(layout.patcher_path(), &layout.resources)
        .arg("-c")
        .arg("--ips")
        .arg(layout.base_image_path())
        .arg(layout.working_copy_path())
        .arg(output)
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn assembler_command_line() {
        let layout = Layout::new("res");
        let invocation = assemble(&layout, Path::new("src/intro.asm"));

        assert_eq!(invocation.program, layout.assembler_path());
        assert_eq!(invocation.current_dir, PathBuf::from("res"));
        assert_eq!(
            invocation.args,
            vec![
                OsString::from("src/intro.asm"),
                layout.working_copy_path().into_os_string(),
            ]
        );
    }

    #[test]
    fn patch_command_line() {
        let layout = Layout::new("res");
        let output = layout.patch_path(Path::new("intro.asm"));
        let invocation = create_patch(&layout, &output);

        assert_eq!(invocation.program, layout.patcher_path());
        assert_eq!(
            invocation.args,
            vec![
                OsString::from("-c"),
                OsString::from("--ips"),
                layout.base_image_path().into_os_string(),
                layout.working_copy_path().into_os_string(),
                output.into_os_string(),
            ]
        );
    }
}
