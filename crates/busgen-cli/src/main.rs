//! busgen CLI - D-Bus code and documentation generator
//!
//! ```text
//! busgen [OPTIONS] FILE...
//! ```
//!
//! Reads one or more introspection XML files, applies `--annotate`
//! annotations, and writes C code and/or DocBook pages.

use anyhow::{Context, Result};
use busgen_cli::generate;
use busgen_cli::logging::init_logging;
use busgen_core::{AnnotationSpec, GeneratorConfig, PostProcessScope};
use clap::{ArgAction, Parser, ValueEnum};
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "busgen")]
#[command(author, version, about = "D-Bus code and documentation generator", long_about = None)]
struct Cli {
    /// D-Bus introspection XML files
    #[arg(value_name = "FILE", required = true)]
    files: Vec<PathBuf>,

    /// String to strip from D-Bus interface names for code and docs
    #[arg(long, value_name = "PREFIX")]
    interface_prefix: Option<String>,

    /// The namespace to use for generated C code
    #[arg(long, value_name = "NAMESPACE")]
    c_namespace: Option<String>,

    /// Generate a GDBusObjectManagerClient proxy type lookup function
    #[arg(long, overrides_with = "no_c_generate_object_manager")]
    c_generate_object_manager: bool,

    /// Skip the proxy type lookup function even if the config file enables it
    #[arg(long, overrides_with = "c_generate_object_manager")]
    no_c_generate_object_manager: bool,

    /// Generate C code in OUTBASE.h and OUTBASE.c
    #[arg(long, value_name = "OUTBASE")]
    generate_c_code: Option<PathBuf>,

    /// Generate DocBook pages in OUTBASE-<interface>.xml
    #[arg(long, value_name = "OUTBASE")]
    generate_docbook: Option<PathBuf>,

    /// Add annotation KEY=VALUE to the node named by WHAT (repeatable)
    #[arg(
        long,
        num_args = 3,
        value_names = ["WHAT", "KEY", "VALUE"],
        action = ArgAction::Append
    )]
    annotate: Vec<String>,

    /// TOML file with defaults for the options above
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Which interfaces get C names derived
    #[arg(long, value_enum)]
    post_process_scope: Option<ScopeArg>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ScopeArg {
    /// Every loaded interface
    All,
    /// Only interfaces from the last input file
    LastSource,
}

impl From<ScopeArg> for PostProcessScope {
    fn from(arg: ScopeArg) -> Self {
        match arg {
            ScopeArg::All => PostProcessScope::All,
            ScopeArg::LastSource => PostProcessScope::LastSource,
        }
    }
}

impl Cli {
    /// Config file values with command-line values laid over them
    fn generator_config(&self) -> Result<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let content = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file: {}", path.display()))?;
                GeneratorConfig::from_toml_str(&content)
                    .with_context(|| format!("Invalid config file: {}", path.display()))?
            }
            None => GeneratorConfig::new(),
        };

        if let Some(prefix) = &self.interface_prefix {
            config.interface_prefix = prefix.clone();
        }
        if let Some(namespace) = &self.c_namespace {
            config.c_namespace = namespace.clone();
        }
        if self.no_c_generate_object_manager {
            config.c_generate_object_manager = false;
        } else if self.c_generate_object_manager {
            config.c_generate_object_manager = true;
        }
        if let Some(outbase) = &self.generate_c_code {
            config.generate_c_code = Some(outbase.clone());
        }
        if let Some(outbase) = &self.generate_docbook {
            config.generate_docbook = Some(outbase.clone());
        }
        if let Some(scope) = self.post_process_scope {
            config.post_process_scope = scope.into();
        }

        Ok(config)
    }

    /// `--annotate` values in command-line order
    fn annotation_specs(&self) -> Vec<AnnotationSpec> {
        self.annotate
            .chunks_exact(3)
            .map(|chunk| AnnotationSpec::new(&chunk[0], &chunk[1], &chunk[2]))
            .collect()
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.generator_config()?;
    let annotations = cli.annotation_specs();

    let pipeline = generate(&cli.files, &annotations, config).context("Code generation failed")?;

    info!(
        interfaces = pipeline.interfaces().len(),
        stage = %pipeline.stage(),
        "generation complete"
    );
    Ok(())
}
