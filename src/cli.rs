//! Minimal CLI: check JSON documents against a union | run the model demos
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use typed_union::{PrimitiveKind, RawType, TypeDescriptor, Union, UnionConfig};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// assign JSON documents to a union of declared types and report which type each one matched
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// check each input document against the declared types
    Check(CheckCmd),
    /// run the model-embedding samples
    Demo,
}

#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
struct TypeSettings {
    /// allowed types in declaration order, e.g. `String i64 'list<list<String>>'`
    ///
    /// JSON integers probe as i64 (u64 past i64::MAX), other numbers as f64.
    /// Declare `long`/`i64` and `double`/`f64` for numbers; `int`, `i32` and
    /// `f32` never match a JSON document.
    #[arg(long, num_args = 1..)]
    types: Vec<String>,

    /// JSON file with `{ "types": [...] }`
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// treat input as newline-delimited JSON (NDJSON)
    #[arg(long, default_value_t = false)]
    ndjson: bool,

    /// JSON Pointer to select a subnode in each document (e.g. /data/items/0/payload)
    #[arg(long)]
    json_pointer: Option<String>,

    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(clap::Parser, Debug)]
struct CheckCmd {
    #[command(flatten)]
    type_settings: TypeSettings,

    #[command(flatten)]
    input_settings: InputSettings,

    /// only print rejected documents
    #[arg(long, short)]
    quiet: bool,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl TypeSettings {
    fn build_union(&self) -> Result<Union> {
        let config = match self.config.as_ref() {
            Some(path) => UnionConfig::load(path)?,
            None => UnionConfig::new(self.types.iter().cloned()),
        };
        let union = config.build().context("invalid union declaration")?;
        tracing::info!(%union, "declared union");
        for descriptor in union.types().iter().filter(|d| never_matches_json(d)) {
            tracing::warn!(%descriptor, "JSON numbers probe as i64, u64 or f64; this type never matches");
        }
        Ok(union)
    }
}

impl InputSettings {
    /// Feed every selected document to `apply` as `(label, value)`.
    fn load_process(&self, mut apply: impl FnMut(String, serde_json::Value)) -> Result<()> {
        let source_paths = resolve_file_path_patterns(&self.input)
            .context("failed to resolve input file paths")?;
        for source_path in source_paths {
            let source_path_str = source_path.to_string_lossy().to_string();
            let source = std::fs::read_to_string(&source_path)
                .with_context(|| format!("failed to read source file ({source_path_str})"))?;
            let documents: Vec<(String, &str)> = if self.ndjson {
                source
                    .lines()
                    .enumerate()
                    .filter(|(_, line)| !line.trim().is_empty())
                    .map(|(i, line)| (format!("{source_path_str}:{}", i + 1), line))
                    .collect()
            } else {
                vec![(source_path_str.clone(), source.as_str())]
            };
            for (label, text) in documents {
                let json_value = serde_json::from_str::<serde_json::Value>(text)
                    .with_context(|| format!("failed to parse JSON ({label})"))?;
                let json_value = match self.json_pointer.as_deref() {
                    None => json_value,
                    Some(pointer) => match json_value.pointer(pointer) {
                        Some(node) => node.clone(),
                        None => bail!("JSON pointer {pointer} selects nothing in {label}"),
                    },
                };
                apply(label, json_value);
            }
        }
        Ok(())
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    /// Returns `false` when any checked document was rejected.
    pub fn run(&self) -> Result<bool> {
        match &self.cmd {
            Command::Check(target) => {
                let mut union = target.type_settings.build_union()?;
                let mut rejected = 0usize;
                let mut total = 0usize;
                target.input_settings.load_process(|label, value| {
                    total += 1;
                    match union.set_value(value) {
                        Ok(ty) => {
                            if !target.quiet {
                                println!("{} {label}: {ty}", "✓".green());
                            }
                        }
                        Err(error) => {
                            rejected += 1;
                            println!("{} {label}: {error}", "✗".red());
                        }
                    }
                })?;
                let summary = format!("{} of {total} document(s) matched", total - rejected);
                if rejected == 0 {
                    eprintln!("{}", summary.green());
                } else {
                    eprintln!("{}", summary.yellow());
                }
                Ok(rejected == 0)
            }
            Command::Demo => {
                crate::demo::run()?;
                Ok(true)
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                // Pattern was explicitly a glob but matched nothing -> surface as an error
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}

/// True when a JSON number can never satisfy `descriptor` or one of its arguments.
fn never_matches_json(descriptor: &TypeDescriptor) -> bool {
    let narrow = [
        RawType::of::<i8>(),
        RawType::of::<i16>(),
        RawType::of::<i32>(),
        RawType::of::<u8>(),
        RawType::of::<u16>(),
        RawType::of::<u32>(),
        RawType::of::<f32>(),
    ];
    let raw_is_narrow = match descriptor.raw() {
        RawType::Primitive(kind) => matches!(
            kind,
            PrimitiveKind::Byte | PrimitiveKind::Short | PrimitiveKind::Int | PrimitiveKind::Float
        ),
        raw => narrow.contains(raw),
    };
    raw_is_narrow || descriptor.args().iter().any(never_matches_json)
}
