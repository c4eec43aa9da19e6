//! `generate` subcommand.
use anyhow::{Context, Result};
use log::debug;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Write a man page for `cmd` and one for every subcommand, recursively, into
/// `output_dir` (the current directory if `None`). Subcommand pages are named
/// after their full invocation, e.g. `j5-generate-man.1`.
///
/// Returns the paths of the pages written, parents before children.
///
/// # Errors
///
/// Returns an [`anyhow::Error`] if the output directory or a page could not
/// be created.
pub fn generate_man_pages(
    cmd: &clap::Command,
    output_dir: Option<PathBuf>,
) -> Result<Vec<PathBuf>> {
    let output_dir = match output_dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("Opening current directory")?,
    };
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("create man directory {}", output_dir.display()))?;

    let mut written = Vec::new();
    let name = cmd.get_name().to_string();
    render_page(cmd.clone(), &output_dir, &name, &mut written)?;
    Ok(written)
}

/// Render `cmd` as `<name>.1`, then recurse into its subcommands.
fn render_page(
    cmd: clap::Command,
    output_dir: &Path,
    name: &str,
    written: &mut Vec<PathBuf>,
) -> Result<()> {
    let page_path = output_dir.join(format!("{name}.1"));
    let mut file = File::create(&page_path)
        .with_context(|| format!("failed to create {}", page_path.display()))?;

    // clap_mangen takes the page title from the command name, which must be
    // 'static. Page generation runs once per process.
    let title: &'static str = Box::leak(name.to_string().into_boxed_str());
    clap_mangen::Man::new(cmd.clone().name(title).disable_help_subcommand(true))
        .render(&mut file)
        .with_context(|| format!("failed to render {}", page_path.display()))?;
    debug!("rendered man page {}", page_path.display());
    written.push(page_path);

    for subcmd in cmd.get_subcommands() {
        let sub_name = format!("{name}-{}", subcmd.get_name());
        render_page(subcmd.clone(), output_dir, &sub_name, written)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{Arg, Command};

    fn demo_command() -> Command {
        Command::new("demo")
            .about("Demo tool")
            .subcommand(Command::new("first").arg(Arg::new("input")))
            .subcommand(
                Command::new("second").subcommand(Command::new("inner")),
            )
    }

    #[test]
    fn writes_page_per_subcommand() {
        let dir = tempfile::tempdir().unwrap();
        let written =
            generate_man_pages(&demo_command(), Some(dir.path().to_path_buf()))
                .unwrap();

        let names: Vec<String> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            ["demo.1", "demo-first.1", "demo-second.1", "demo-second-inner.1"]
        );
        for page in &written {
            let text = std::fs::read_to_string(page).unwrap();
            assert!(text.contains(".TH"), "{} is not a man page", page.display());
        }
    }

    #[test]
    fn creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("share").join("man1");
        generate_man_pages(&Command::new("solo"), Some(nested.clone())).unwrap();
        assert!(nested.join("solo.1").is_file());
    }
}
