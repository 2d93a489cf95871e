//! lispython CLI entry point.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use clap::{Parser, Subcommand};
use rhizome_lispython_codegen_python::loader::is_lispython;
use rhizome_lispython_codegen_python::samples::SAMPLES;
use rhizome_lispython_codegen_python::{EmitOptions, load_file, load_source, translate_with};
use rhizome_lispython_ir::Program;
use rhizome_lispython_syntax_sexpr::parse;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lispython")]
#[command(about = "Translate lispython s-expressions to Python")]
struct Cli {
    /// Spaces per indentation level (overrides the config file)
    #[arg(long, global = true)]
    indent: Option<usize>,

    /// TOML file with emit options
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate lispython files to Python
    Translate {
        /// Input file(s), or - for stdin
        #[arg(required = true)]
        files: Vec<String>,

        /// Output directory
        #[arg(short, long)]
        out: Option<String>,

        /// Write to stdout instead of files
        #[arg(long)]
        stdout: bool,
    },

    /// Dump the parse tree as JSON
    Parse {
        /// Input file (or - for stdin)
        file: String,
    },

    /// Print the source a tagged file loads as
    Load {
        /// Input file
        file: PathBuf,
    },

    /// Load a file and execute it with a Python interpreter
    Run {
        /// Input file
        file: PathBuf,

        /// Interpreter to pipe the source into
        #[arg(long, default_value = "python3")]
        python: String,
    },

    /// Print the translation of each built-in sample
    Demo,
}

fn read_input(file: &str) -> std::io::Result<String> {
    if file == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        std::fs::read_to_string(file)
    }
}

fn emit_options(cli: &Cli) -> Result<EmitOptions, Box<dyn std::error::Error>> {
    let mut options: EmitOptions = match &cli.config {
        Some(path) => toml::from_str(&std::fs::read_to_string(path)?)?,
        None => EmitOptions::default(),
    };
    if let Some(indent) = cli.indent {
        options.indent_width = indent;
    }
    options.validate()?;
    Ok(options)
}

fn output_path(file: &str, out: Option<&str>) -> PathBuf {
    let path = Path::new(file);
    match out {
        Some(output_dir) => {
            let stem = path.file_stem().unwrap_or_default();
            Path::new(output_dir).join(stem).with_extension("py")
        }
        None if file == "-" => PathBuf::from("output.py"),
        None => path.with_extension("py"),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so translated source on stdout stays clean
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("rhizome_lispython=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let options = emit_options(&cli)?;
    debug!(indent_width = options.indent_width, "emit options");

    match cli.command {
        Commands::Translate { files, out, stdout } => {
            for file in files {
                let source = read_input(&file)?;
                let python = translate_with(&source, &options)?;

                if stdout {
                    print!("{}", python);
                } else {
                    let out_path = output_path(&file, out.as_deref());
                    std::fs::write(&out_path, &python)?;
                    info!("{} -> {}", file, out_path.display());
                }
            }
        }

        Commands::Parse { file } => {
            let source = read_input(&file)?;
            let program: Program = parse(&source)?;
            println!("{}", serde_json::to_string_pretty(&program)?);
        }

        Commands::Load { file } => {
            let loaded = load_file(&file, &options)?;
            print!("{}", loaded.source());
        }

        Commands::Run { file, python } => {
            let loaded = load_file(&file, &options)?;
            info!(
                "running {} with {} (translated: {})",
                file.display(),
                python,
                loaded.is_translated()
            );

            let mut child = Command::new(&python)
                .arg("-")
                .stdin(Stdio::piped())
                .spawn()?;
            if let Some(mut stdin) = child.stdin.take() {
                stdin.write_all(loaded.source().as_bytes())?;
            }
            let status = child.wait()?;
            if !status.success() {
                return Err(format!("{} exited with {}", python, status).into());
            }
        }

        Commands::Demo => {
            for sample in SAMPLES {
                let python = if is_lispython(sample.source) {
                    load_source(sample.source, &options)?.into_source()
                } else {
                    translate_with(sample.source, &options)?
                };
                println!("# {}", sample.name);
                println!("{}", python);
                println!("---------------");
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path() {
        assert_eq!(output_path("src/a.lpy", None), PathBuf::from("src/a.py"));
        assert_eq!(
            output_path("src/a.lpy", Some("build")),
            PathBuf::from("build/a.py")
        );
        assert_eq!(output_path("-", None), PathBuf::from("output.py"));
    }

    #[test]
    fn test_cli_parses_global_flags() {
        let cli =
            Cli::try_parse_from(["lispython", "translate", "--indent", "2", "a.lpy"]).unwrap();
        assert_eq!(cli.indent, Some(2));
        match cli.command {
            Commands::Translate { files, stdout, .. } => {
                assert_eq!(files, vec!["a.lpy".to_string()]);
                assert!(!stdout);
            }
            _ => panic!("expected translate"),
        }
    }

    #[test]
    fn test_emit_options_flag_overrides_default() {
        let cli = Cli::try_parse_from(["lispython", "--indent", "8", "demo"]).unwrap();
        assert_eq!(emit_options(&cli).unwrap().indent_width, 8);

        let cli = Cli::try_parse_from(["lispython", "--indent", "0", "demo"]).unwrap();
        assert!(emit_options(&cli).is_err());
    }
}
