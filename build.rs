// Author: Eshan Roy
// SPDX-License-Identifier: MIT

use vergen::EmitBuilder;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Outside a git checkout the VERGEN_GIT_* variables are simply left unset.
    EmitBuilder::builder()
        .git_sha(false)
        .git_commit_date()
        .fail_on_error()
        .emit()
        .or_else(|_| EmitBuilder::builder().emit())?;
    Ok(())
}
