// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Callflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Callflow CLI entrypoint.
//!
//! Every command works on one configuration document. Mutating commands go through the editor,
//! so a rejected edit leaves the file untouched.

use std::error::Error;
use std::path::{Path, PathBuf};

use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

use callflow::editor::Editor;
use callflow::format::configuration_schema;
use callflow::layout::{layout_tree, LayoutMetrics};
use callflow::model::{Configuration, NodeId};
use callflow::ops::validate_tree;
use callflow::render::render_outline;
use callflow::store::{ConfigStore, JsonFileStore, WriteDurability};

const DEFAULT_PRAXIS_NAME: &str = "Praxis";

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [-v..] init <config.json> [--name <praxis>]\n  {program} [-v..] show <config.json> [--metrics <metrics.json>]\n  {program} [-v..] layout <config.json> [--metrics <metrics.json>]\n  {program} [-v..] check <config.json>\n  {program} [-v..] add-child <config.json> <parent-id>\n  {program} [-v..] insert-before <config.json> <target-id>\n  {program} [-v..] delete <config.json> <node-id>\n  {program} [-v..] rename <config.json> <praxis-name>\n  {program} [-v..] import <config.json> <payload.json>\n  {program} schema\n\n-v/-vv/-vvv raise log verbosity (info/debug/trace); RUST_LOG overrides.\n--durable-writes syncs saved files to disk (fsync where supported)."
    );
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Init { file: PathBuf, name: Option<String> },
    Show { file: PathBuf },
    Layout { file: PathBuf },
    Check { file: PathBuf },
    AddChild { file: PathBuf, parent: String },
    InsertBefore { file: PathBuf, target: String },
    Delete { file: PathBuf, node: String },
    Rename { file: PathBuf, name: String },
    Import { file: PathBuf, payload: PathBuf },
    Schema,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    verbosity: u8,
    durable_writes: bool,
    metrics: Option<PathBuf>,
    command: Command,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut verbosity = 0u8;
    let mut durable_writes = false;
    let mut metrics: Option<PathBuf> = None;
    let mut name: Option<String> = None;
    let mut positional = Vec::new();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--verbose" => verbosity = verbosity.saturating_add(1),
            "--durable-writes" => {
                if durable_writes {
                    return Err(());
                }
                durable_writes = true;
            }
            "--metrics" => {
                if metrics.is_some() {
                    return Err(());
                }
                metrics = Some(PathBuf::from(args.next().ok_or(())?));
            }
            "--name" => {
                if name.is_some() {
                    return Err(());
                }
                name = Some(args.next().ok_or(())?);
            }
            flags if flags.len() > 1 && flags.starts_with('-') && flags[1..].bytes().all(|b| b == b'v') => {
                verbosity = verbosity.saturating_add((flags.len() - 1) as u8);
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => positional.push(arg),
        }
    }

    let mut positional = positional.into_iter();
    let command_name = positional.next().ok_or(())?;
    let mut next = || positional.next().ok_or(());

    let command = match command_name.as_str() {
        "init" => Command::Init {
            file: next()?.into(),
            name: name.take(),
        },
        "show" => Command::Show { file: next()?.into() },
        "layout" => Command::Layout { file: next()?.into() },
        "check" => Command::Check { file: next()?.into() },
        "add-child" => Command::AddChild {
            file: next()?.into(),
            parent: next()?,
        },
        "insert-before" => Command::InsertBefore {
            file: next()?.into(),
            target: next()?,
        },
        "delete" => Command::Delete {
            file: next()?.into(),
            node: next()?,
        },
        "rename" => Command::Rename {
            file: next()?.into(),
            name: next()?,
        },
        "import" => Command::Import {
            file: next()?.into(),
            payload: next()?.into(),
        },
        "schema" => Command::Schema,
        _ => return Err(()),
    };
    if positional.next().is_some() {
        return Err(());
    }

    // Flags only make sense for the commands that read them.
    if name.is_some() {
        return Err(());
    }
    if metrics.is_some() && !matches!(command, Command::Show { .. } | Command::Layout { .. }) {
        return Err(());
    }

    Ok(CliOptions {
        verbosity,
        durable_writes,
        metrics,
        command,
    })
}

fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter))
        .init();
}

fn load_metrics(path: Option<&Path>) -> Result<LayoutMetrics, Box<dyn Error>> {
    let Some(path) = path else {
        return Ok(LayoutMetrics::default());
    };
    let raw = std::fs::read_to_string(path)
        .map_err(|err| format!("cannot read metrics {}: {err}", path.display()))?;
    let metrics = serde_json::from_str(&raw)
        .map_err(|err| format!("invalid metrics {}: {err}", path.display()))?;
    Ok(metrics)
}

fn store_for(file: &Path, durable_writes: bool) -> JsonFileStore {
    let store = JsonFileStore::new(file);
    if durable_writes {
        store.with_durability(WriteDurability::Durable)
    } else {
        store
    }
}

fn load_config(store: &JsonFileStore) -> Result<Configuration, Box<dyn Error>> {
    store
        .load()
        .ok_or_else(|| format!("no readable configuration at {}", store.path().display()).into())
}

/// Editor over the stored snapshot. Fails on a missing or unreadable document instead of
/// starting over.
fn open_editor(file: &Path, durable_writes: bool) -> Result<Editor<JsonFileStore>, Box<dyn Error>> {
    if !file.exists() {
        return Err(format!("{} does not exist; run `init` first", file.display()).into());
    }
    let store = store_for(file, durable_writes);
    let config = load_config(&store)?;
    Ok(Editor::with_config(store, config))
}

fn run(options: CliOptions) -> Result<i32, Box<dyn Error>> {
    let durable = options.durable_writes;
    match options.command {
        Command::Init { file, name } => {
            if file.exists() {
                return Err(format!("{} already exists", file.display()).into());
            }
            let config = Configuration::new(name.as_deref().unwrap_or(DEFAULT_PRAXIS_NAME));
            store_for(&file, durable).save(&config)?;
            println!("{}", config.id);
        }
        Command::Show { file } => {
            let metrics = load_metrics(options.metrics.as_deref())?;
            let config = load_config(&store_for(&file, durable))?;
            let layout = layout_tree(&config.nodes, &metrics);
            println!("{}", render_outline(&config, &layout));
        }
        Command::Layout { file } => {
            let metrics = load_metrics(options.metrics.as_deref())?;
            let config = load_config(&store_for(&file, durable))?;
            let layout = layout_tree(&config.nodes, &metrics);
            println!("{}", serde_json::to_string_pretty(&layout)?);
        }
        Command::Check { file } => {
            let config = load_config(&store_for(&file, durable))?;
            let violations = validate_tree(&config.nodes);
            if violations.is_empty() {
                println!("ok: {} nodes", config.nodes.len());
                return Ok(0);
            }
            for violation in &violations {
                println!("{violation}");
            }
            return Ok(1);
        }
        Command::AddChild { file, parent } => {
            let mut editor = open_editor(&file, durable)?;
            let node = editor.add_child(&NodeId::new(parent)?)?;
            println!("{}", node.id);
        }
        Command::InsertBefore { file, target } => {
            let mut editor = open_editor(&file, durable)?;
            let node = editor.insert_before(&NodeId::new(target)?)?;
            println!("{}", node.id);
        }
        Command::Delete { file, node } => {
            let mut editor = open_editor(&file, durable)?;
            for removed in editor.delete_node(&NodeId::new(node)?)? {
                println!("{removed}");
            }
        }
        Command::Rename { file, name } => {
            let mut editor = open_editor(&file, durable)?;
            editor.rename(name)?;
        }
        Command::Import { file, payload } => {
            let json = std::fs::read_to_string(&payload)
                .map_err(|err| format!("cannot read {}: {err}", payload.display()))?;
            let mut editor = Editor::open(store_for(&file, durable), DEFAULT_PRAXIS_NAME);
            editor.import_json(&json)?;
            println!("{}", editor.config().id);
        }
        Command::Schema => {
            println!("{}", serde_json::to_string_pretty(&configuration_schema())?);
        }
    }
    Ok(0)
}

fn main() {
    let mut args = std::env::args();
    let program = args.next().unwrap_or_else(|| "callflow".to_owned());

    let options = match parse_options(args) {
        Ok(options) => options,
        Err(()) => {
            print_usage(&program);
            std::process::exit(2);
        }
    };

    setup_logging(options.verbosity);

    match run(options) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("callflow: {err}");
            std::process::exit(1);
        }
    }
}
