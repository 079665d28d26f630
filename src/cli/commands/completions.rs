//! Shell completion generation
//!
//! ```bash
//! # Bash - add to ~/.bashrc
//! source <(ebom completions bash)
//!
//! # Zsh - somewhere on $fpath
//! ebom completions zsh > ~/.zfunc/_ebom
//!
//! # Fish
//! ebom completions fish > ~/.config/fish/completions/ebom.fish
//! ```
//!
//! Finish, category and format values complete from their value enums.

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use miette::Result;
use std::io::{self, Write};

use crate::cli::Cli;

#[derive(clap::Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

pub fn run(args: CompletionsArgs) -> Result<()> {
    write_completions(args.shell, &mut io::stdout());
    Ok(())
}

/// Write the completion script for `shell`, registered under the command's own name
pub fn write_completions(shell: Shell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, out);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn script(shell: Shell) -> String {
        let mut buf = Vec::new();
        write_completions(shell, &mut buf);
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_every_shell_names_ebom() {
        for shell in [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::PowerShell, Shell::Elvish] {
            let out = script(shell);
            assert!(out.contains("ebom"), "{:?}", shell);
            assert!(out.contains("catalog"), "{:?}", shell);
        }
    }

    #[test]
    fn test_finish_values_complete() {
        let out = script(Shell::Fish);
        assert!(out.contains("metal"));
        assert!(out.contains("wood"));
    }
}
