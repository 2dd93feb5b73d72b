#![forbid(unsafe_code)]
//! Writes shell completions and man pages for `pathtree`.
//!
//! Usage: `generate-assets [OUT_DIR]` (default `dist`).

use clap::CommandFactory;
use clap_complete::{generate_to, Shell};
use clap_mangen::Man;
use pathtree::cli::Args;
use std::fs;
use std::path::{Path, PathBuf};

const BIN_NAME: &str = "pathtree";

fn main() -> anyhow::Result<()> {
    let out_dir = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("dist"));
    let completions_dir = out_dir.join("completions");
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&completions_dir)?;
    fs::create_dir_all(&man_dir)?;

    for shell in [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::PowerShell, Shell::Elvish] {
        let mut cmd = Args::command();
        generate_to(shell, &mut cmd, BIN_NAME, &completions_dir)?;
    }

    // One page for the top-level command and one per source subcommand.
    let cmd = Args::command();
    write_man(&man_dir, BIN_NAME, Man::new(cmd.clone()))?;
    for sub in cmd.get_subcommands() {
        let name = format!("{BIN_NAME}-{}", sub.get_name());
        write_man(&man_dir, &name, Man::new(sub.clone()).title(name.clone()))?;
    }

    eprintln!(
        "generated shell completions and man pages under {}",
        out_dir.display()
    );
    Ok(())
}

fn write_man(dir: &Path, name: &str, man: Man) -> anyhow::Result<()> {
    let mut buffer = Vec::new();
    man.render(&mut buffer)?;
    fs::write(dir.join(format!("{name}.1")), buffer)?;
    Ok(())
}
