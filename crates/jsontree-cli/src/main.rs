//! `jtree` CLI — format, query and edit JSON documents from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Compact a document (stdin → stdout)
//! echo '{ "name": "Alice", "age": 30 }' | jtree fmt
//!
//! # Pretty-print from file to file
//! jtree fmt --pretty -i data.json -o pretty.json
//!
//! # Read one node by JSON Pointer
//! jtree get /server/ports/0 -i config.json
//!
//! # Create or replace a node, writing the edited document
//! jtree set /server/tls '{"cert":"/etc/cert.pem"}' -i config.json -o config.json
//!
//! # Show node counts and nesting depth
//! jtree stats -i data.json
//!
//! # Verbose logging
//! RUST_LOG=jtree=debug jtree stats -i data.json
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use jsontree::{ParseOptions, Value, ValueType};
use std::io::{self, Read};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "jtree",
    version,
    about = "Format, query and edit JSON documents"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Maximum nesting depth accepted by the parser
    #[arg(long, global = true, default_value_t = ParseOptions::DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a document and write it back as compact JSON
    Fmt {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Indent the output instead of writing compact JSON
        #[arg(long)]
        pretty: bool,
    },
    /// Print the node addressed by a JSON Pointer (e.g. /server/ports/0)
    Get {
        /// JSON Pointer to the node; "" is the whole document
        pointer: String,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Place a JSON value at a JSON Pointer, creating missing parents
    Set {
        /// JSON Pointer to the node to create or replace
        pointer: String,
        /// The new value, as JSON text
        value: String,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Show node counts per type, nesting depth and compact size
    Stats {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let options = ParseOptions::new().with_max_depth(cli.max_depth);

    match cli.command {
        Commands::Fmt {
            input,
            output,
            pretty,
        } => {
            let doc = read_document(input.as_deref(), &options)?;
            let text = if pretty {
                serde_json::to_string_pretty(&doc).context("Failed to pretty-print document")?
            } else {
                doc.dump()
            };
            write_output(output.as_deref(), &text)?;
        }
        Commands::Get { pointer, input } => {
            let doc = read_document(input.as_deref(), &options)?;
            let node = doc
                .pointer(&pointer)
                .with_context(|| format!("No value at pointer {:?}", pointer))?;
            debug!(pointer = %pointer, kind = %node.value_type(), "resolved pointer");
            write_output(None, &node.dump())?;
        }
        Commands::Set {
            pointer,
            value,
            input,
            output,
        } => {
            let mut doc = read_document(input.as_deref(), &options)?;
            let new_value = Value::parse_with(&value, &options)
                .with_context(|| format!("Failed to parse value argument: {}", value))?;
            let slot = doc
                .pointer_or_create(&pointer)
                .with_context(|| format!("Cannot create pointer {:?}", pointer))?;
            let previous = slot.replace(new_value);
            info!(pointer = %pointer, replaced = %previous.value_type(), "set value");
            write_output(output.as_deref(), &doc.dump())?;
        }
        Commands::Stats { input } => {
            let doc = read_document(input.as_deref(), &options)?;
            let mut stats = Stats::default();
            stats.visit(&doc, 1);
            println!("Nodes:      {}", stats.total());
            for (kind, count) in stats.counts() {
                if count > 0 {
                    println!("  {:<8}  {}", kind.as_str(), count);
                }
            }
            println!("Max depth:  {}", stats.max_depth);
            println!("Compact:    {} bytes", doc.dump().len());
        }
    }

    Ok(())
}

/// Node counts per alternative and the deepest nesting level seen.
#[derive(Debug, Default)]
struct Stats {
    nulls: usize,
    bools: usize,
    ints: usize,
    floats: usize,
    strings: usize,
    arrays: usize,
    objects: usize,
    max_depth: usize,
}

impl Stats {
    fn visit(&mut self, value: &Value, depth: usize) {
        self.max_depth = self.max_depth.max(depth);
        match value {
            Value::Null => self.nulls += 1,
            Value::Bool(_) => self.bools += 1,
            Value::Int(_) => self.ints += 1,
            Value::Float(_) => self.floats += 1,
            Value::String(_) => self.strings += 1,
            Value::Array(items) => {
                self.arrays += 1;
                for item in items {
                    self.visit(item, depth + 1);
                }
            }
            Value::Object(members) => {
                self.objects += 1;
                for member in members {
                    self.visit(member.value(), depth + 1);
                }
            }
        }
    }

    fn counts(&self) -> [(ValueType, usize); 7] {
        [
            (ValueType::Object, self.objects),
            (ValueType::Array, self.arrays),
            (ValueType::String, self.strings),
            (ValueType::Int, self.ints),
            (ValueType::Float, self.floats),
            (ValueType::Bool, self.bools),
            (ValueType::Null, self.nulls),
        ]
    }

    fn total(&self) -> usize {
        self.counts().iter().map(|(_, n)| n).sum()
    }
}

fn read_document(path: Option<&str>, options: &ParseOptions) -> Result<Value> {
    let text = read_input(path)?;
    debug!(bytes = text.len(), source = path.unwrap_or("<stdin>"), "read input");
    Value::parse_with(&text, options).context("Failed to parse JSON input")
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
            debug!(bytes = content.len(), path, "wrote output");
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
