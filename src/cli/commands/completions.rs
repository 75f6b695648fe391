//! `pinvault completions` prints a shell completion script to stdout.

use std::io::{self, Write};

use clap::CommandFactory;
use clap_complete::{generate, Shell};

use crate::cli::Cli;
use crate::errors::Result;

/// Execute the `completions` command.
pub fn execute(shell: Shell) -> Result<()> {
    let mut stdout = io::stdout().lock();
    write_script(shell, &mut stdout);
    stdout.flush()?;
    Ok(())
}

/// Render the completion script for `shell` into `out`.
pub fn write_script(shell: Shell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, out);
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{Parser, ValueEnum};

    fn script(shell: Shell) -> String {
        let mut buf = Vec::new();
        write_script(shell, &mut buf);
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn every_shell_gets_a_script_for_the_binary() {
        for shell in Shell::value_variants() {
            let text = script(*shell);
            assert!(text.contains("pinvault"), "{shell} script names the binary");
        }
    }

    #[test]
    fn bash_script_covers_nested_subcommands() {
        let text = script(Shell::Bash);
        for word in ["password", "note", "search", "export", "import"] {
            assert!(text.contains(word), "missing {word}");
        }
    }

    #[test]
    fn shell_argument_is_parsed_by_clap() {
        assert!(Cli::try_parse_from(["pinvault", "completions", "fish"]).is_ok());
        assert!(Cli::try_parse_from(["pinvault", "completions", "tcsh"]).is_err());
    }
}
