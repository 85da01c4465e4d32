use std::process::Command;

use crate::error::AppError;

/// Fire-and-forget execution of a stored removal command through the
/// platform shell. There is no feedback contract beyond "process spawned
/// or not"; a spawn failure is the one error surfaced to the user.
pub fn invoke_removal(command: &str) -> Result<(), AppError> {
    if command.trim().is_empty() {
        return Err(AppError::Invoke("empty removal command".to_string()));
    }

    shell_command(command).spawn().map_err(|err| AppError::Invoke(err.to_string()))?;
    Ok(())
}

#[cfg(windows)]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", command]);
    cmd
}

#[cfg(not(windows))]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.args(["-c", command]);
    cmd
}
