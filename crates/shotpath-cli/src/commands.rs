//! Command implementations.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context};
use serde_json::json;
use tracing::debug;

use shotpath_config::{vars, ConfigLoader, Environment};
use shotpath_schema::{Schema, Style, StylePreset};

use crate::cli::{BuildArgs, Cli, Command, KeyView, KeysArgs, ParseArgs};

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let (template, style) = resolve(&cli)?;
    debug!(template, "resolved template");

    match &cli.command {
        Command::Check => check(&template, style, cli.json),
        Command::Keys(args) => keys(&template, style, args, cli.json),
        Command::Parse(args) => parse(&template, style, args, cli.json),
        Command::Build(args) => build(&template, style, args, cli.json),
    }
}

/// Resolve template and style: flags and their env fallbacks win, then the
/// project config, then the built-in default.
fn resolve(cli: &Cli) -> anyhow::Result<(String, Style)> {
    let _ = Environment::init();

    let project_dir = Environment::get(vars::SHOTPATH_CONFIG_PATH)
        .map(PathBuf::from)
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_default();
    let config = ConfigLoader::new(project_dir)
        .load()
        .context("failed to load project configuration")?;

    let template = cli.template.clone().unwrap_or(config.template);
    let preset = match &cli.style {
        Some(name) => StylePreset::parse(name)
            .ok_or_else(|| anyhow!("unknown style preset: {name}"))?,
        None => config.style.preset,
    };
    let style = Style::preset(preset).with_multidelimited(config.style.allow_multidelimited);
    Ok((template, style))
}

fn compile(template: &str, style: Style) -> anyhow::Result<Schema> {
    Schema::compile(template, style).map_err(|errors| {
        let reasons: Vec<String> = errors.iter().map(ToString::to_string).collect();
        anyhow!("template does not compile:\n  {}", reasons.join("\n  "))
    })
}

fn check(template: &str, style: Style, json: bool) -> anyhow::Result<()> {
    let schema = Schema::compile_lenient(template, style);
    if json {
        let errors: Vec<String> = schema.errors().iter().map(ToString::to_string).collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "valid": schema.is_valid(),
                "template": schema.template(),
                "anchor": schema.anchor(),
                "segments": schema.grouping().segment_count(),
                "keys": schema.keys(),
                "errors": errors,
            }))?
        );
    } else if schema.is_valid() {
        println!(
            "ok: {} segments, keys: {}",
            schema.grouping().segment_count(),
            schema.keys().join(", ")
        );
    } else {
        for error in schema.errors() {
            eprintln!("error: {error}");
        }
    }
    if !schema.is_valid() {
        bail!("template has {} error(s)", schema.errors().len());
    }
    Ok(())
}

fn keys(template: &str, style: Style, args: &KeysArgs, json: bool) -> anyhow::Result<()> {
    let schema = compile(template, style)?;
    let keys = match args.view {
        KeyView::All => schema.keys(),
        KeyView::Editable => schema.keys_editable(),
        KeyView::Hidden => schema.keys_hidden(),
        KeyView::Optional => schema.keys_optional(),
        KeyView::NonOptional => schema.keys_non_optional(),
        KeyView::NonEditable => schema.keys_non_editable(),
    };
    if json {
        println!("{}", serde_json::to_string_pretty(&keys)?);
    } else {
        for key in keys {
            println!("{key}");
        }
    }
    Ok(())
}

fn parse(template: &str, style: Style, args: &ParseArgs, json: bool) -> anyhow::Result<()> {
    let schema = compile(template, style)?;
    let mapping = schema.dict_from_path(&args.path)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&mapping)?);
    } else {
        let mut entries: Vec<(&String, &String)> = mapping.iter().collect();
        entries.sort();
        for (key, value) in entries {
            println!("{key} = {value}");
        }
    }
    Ok(())
}

fn build(template: &str, style: Style, args: &BuildArgs, json: bool) -> anyhow::Result<()> {
    let schema = compile(template, style)?;

    let mut values: HashMap<String, String> = HashMap::new();
    for pair in &args.pairs {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| anyhow!("expected key=value, got '{pair}'"))?;
        if !schema.style().is_valid_value(value) {
            bail!("value '{value}' for key '{key}' does not fit the naming style");
        }
        values.insert(key.to_string(), value.to_string());
    }

    let path = schema.path_from_dict(&values)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&json!({ "path": path }))?);
    } else {
        println!("{path}");
    }
    Ok(())
}
