//! `generate` subcommand.
use anyhow::{Context, Result};
use std::fs::File;
use std::path::PathBuf;

/// Render man pages for `cmd` and every nested subcommand into
/// `output_dir`, defaulting to the current directory.
///
/// Subcommand pages are written under hyphenated names (`jd-generate.1`,
/// `jd-generate-man.1`, …) so that NAME, SYNOPSIS, and SEE ALSO sections
/// carry the full invocation path.
///
/// # Errors
///
/// Returns an error if the output directory or any page file cannot be
/// created.
pub fn man_pages(cmd: &clap::Command, output_dir: Option<PathBuf>) -> Result<()> {
    let output_dir = match output_dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("resolve current directory")?,
    };
    std::fs::create_dir_all(&output_dir)
        .context("create man page output directory")?;

    // worklist of (page name, command), seeded with the root command
    let mut pending = vec![(cmd.get_name().to_string(), cmd.clone())];
    while let Some((name, command)) = pending.pop() {
        for sub in command.get_subcommands() {
            pending.push((format!("{name}-{}", sub.get_name()), sub.clone()));
        }

        let path = output_dir.join(format!("{name}.1"));
        let mut file = File::create(&path)
            .with_context(|| format!("create {}", path.display()))?;

        // Rename so clap_mangen prints the hyphenated page name. The leaked
        // &'static str is fine here since page generation is a one-shot
        // operation.
        let page_name: &'static str = Box::leak(name.into_boxed_str());
        clap_mangen::Man::new(
            command.name(page_name).disable_help_subcommand(true),
        )
        .render(&mut file)
        .with_context(|| format!("render {}", path.display()))?;

        println!("Generated: {}", path.display());
    }

    Ok(())
}
