//! External command invocation shared by every pipeline stage.

use std::ffi::OsStr;
use std::path::Path;
use std::process::Command;

use crate::{Error, HarnessConfig, Result};

/// Run an external tool, blocking until it exits.
///
/// stdout and stderr are captured. When not quiet the command line is echoed
/// before the run and the captured stdout after it. A non-zero exit status
/// is fatal for the whole run: the returned error carries the program name,
/// the exit status, and the captured stderr.
pub fn exec_cmd(config: &HarnessConfig, program: &Path, args: &[&OsStr]) -> Result<()> {
    if !config.quiet {
        let mut line = program.display().to_string();
        for arg in args {
            line.push(' ');
            line.push_str(&arg.to_string_lossy());
        }
        println!("Executing {}", line);
    }

    let output = Command::new(program).args(args).output()?;

    if !config.quiet {
        print!("{}", String::from_utf8_lossy(&output.stdout));
    }

    if !output.status.success() {
        return Err(Error::ToolFailed {
            program: program.display().to_string(),
            status: output.status.code().unwrap_or(-1),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    Ok(())
}
