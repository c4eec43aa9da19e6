/*!
Main binary for json5kit.
*/

use anyhow::{Context, Result, bail};
use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use clap_complete::generate;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use log::{debug, info};
use std::io::{self, IsTerminal, Read, stdout};
use std::{fs, path::PathBuf};

use json5kit::path::parse_path;
use json5kit::tokenizer::{Lexer, Token, TokenKind};
use json5kit::{commands, utils};

/// Inspect JSON5 documents and path expressions.
#[derive(Parser)]
#[command(
    name = "j5",
    version,
    about,
    arg_required_else_help = true,
    long_about = None,
    disable_help_subcommand = true
)]
struct Args {
    #[command(subcommand)]
    command: Commands,
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

/// Available subcommands for `j5`
#[derive(Subcommand)]
enum Commands {
    /// Print the tokens of a JSON5 document, one per line.
    Lex {
        #[arg(value_name = "FILE")]
        /// Optional path to a JSON5 file. If omitted, reads from STDIN
        input: Option<PathBuf>,
        /// Print the tokens as a JSON array
        #[arg(long, action = ArgAction::SetTrue)]
        json: bool,
        /// Leave line and block comments out of the output
        #[arg(long, action = ArgAction::SetTrue)]
        no_comments: bool,
        /// Fail if the document contains illegal tokens
        #[arg(long, action = ArgAction::SetTrue)]
        strict: bool,
    },
    /// Parse a path expression and print its segments.
    Path {
        /// Path expression (e.g., "$.foo.bar[3]")
        expr: String,
        /// Print the segments as a JSON array
        #[arg(long, action = ArgAction::SetTrue)]
        json: bool,
    },
    #[command(subcommand)]
    /// Generate additional documentation and/or completions
    Generate(GenerateCommand),
}

/// Generate shell completions and man page
#[derive(Subcommand)]
enum GenerateCommand {
    /// Generate shell completions for the given shell to stdout.
    Shell { shell: clap_complete::Shell },
    /// Generate a man page for j5 to output directory if specified, else
    /// the current directory.
    Man {
        /// The output directory to write the man pages.
        #[clap(short, long)]
        output_dir: Option<PathBuf>,
    },
}

/// Entry point for main binary.
///
/// Input for `lex` is read from the given file, or from STDIN when it is
/// piped in. Output goes to STDOUT; diagnostics go to STDERR.
fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    match args.command {
        Commands::Lex {
            input,
            json,
            no_comments,
            strict,
        } => {
            let Some(source) = read_input(input)? else {
                let mut cmd = Args::command();
                let lex_cmd = cmd
                    .find_subcommand_mut("lex")
                    .context("lex subcommand")?;
                return Ok(lex_cmd.print_help()?);
            };
            lex(&source, json, no_comments, strict)?;
        }
        Commands::Path { expr, json } => {
            let path = match parse_path(&expr) {
                Ok(path) => path,
                Err(err) => {
                    // Printed bare so the caret lines up with the expression
                    eprintln!("{}", utils::colorize_path_error(&err));
                    std::process::exit(1);
                }
            };
            debug!("parsed {} segment(s) from {expr:?}", path.len());
            let mut out = stdout().lock();
            if json {
                utils::write_json(&mut out, &path, false)?;
            } else {
                utils::write_colored_path(&mut out, &path)?;
            }
        }
        Commands::Generate(cmd) => match cmd {
            GenerateCommand::Shell { shell } => {
                let mut cmd = Args::command();
                generate(shell, &mut cmd, "j5", &mut stdout().lock());
            }
            GenerateCommand::Man { output_dir } => {
                let written = commands::generate::generate_man_pages(
                    &Args::command(),
                    output_dir,
                )?;
                for page in written {
                    println!("Generated: {}", page.display());
                }
            }
        },
    }

    Ok(())
}

/// Reads the document from `input`, or from STDIN when it is piped in.
/// Returns `None` when there is nothing to read.
fn read_input(input: Option<PathBuf>) -> Result<Option<String>> {
    if let Some(path) = input {
        let source = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file {}", path.display()))?;
        return Ok(Some(source));
    }
    if io::stdin().is_terminal() {
        // No piped input and no file specified
        return Ok(None);
    }
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read STDIN")?;
    Ok(Some(buffer))
}

/// Tokenize `source` and print the result.
fn lex(source: &str, json: bool, no_comments: bool, strict: bool) -> Result<()> {
    let tokens: Vec<Token> = Lexer::new(source)
        .filter(|token| !(no_comments && token.kind().is_comment()))
        .collect();
    info!("scanned {} token(s)", tokens.len());

    let mut out = stdout().lock();
    if json {
        utils::write_json(&mut out, &tokens, true)?;
    } else {
        utils::write_colored_tokens(&mut out, &tokens)?;
    }

    if strict {
        let illegal: Vec<&Token> =
            tokens.iter().filter(|t| t.kind() == TokenKind::Illegal).collect();
        if let Some(first) = illegal.first() {
            bail!(
                "{} illegal token(s), first at {}: {:?}",
                illegal.len(),
                first.position(),
                first.literal()
            );
        }
    }
    Ok(())
}
