//! Razor CLI - command-line front end for the razor template rewriter
//!
//! Normalizes template files, prints the cache name a template would be
//! stored under, and lists the contents of a template cache.

use std::{
    ffi::OsString,
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use razor_core::{
    config::{DEFAULT_HELPERS_NAME, DEFAULT_IGNORE_END, DEFAULT_IGNORE_START, DEFAULT_PAGE_DIR_TYPE},
    naming, Models, NormalizerConfig, SyntaxNormalizer, TemplateCache,
};
use tracing::{debug, warn};

/// Build the `razor` command tree
pub fn build_cli() -> Command {
    Command::new("razor")
        .version(razor_core::VERSION)
        .about("Rewrite Razor-style templates into Vash syntax")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Log razor internals at debug level")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("normalize")
                .about("Normalize a template file")
                .arg(
                    Arg::new("file")
                        .value_name("FILE")
                        .help("Template to normalize")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("out")
                        .long("out")
                        .short('o')
                        .value_name("PATH")
                        .help("Write the result here instead of stdout")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("ignore-start")
                        .long("ignore-start")
                        .value_name("MARKER")
                        .help("Marker opening an ignored span")
                        .default_value(DEFAULT_IGNORE_START),
                )
                .arg(
                    Arg::new("ignore-end")
                        .long("ignore-end")
                        .value_name("MARKER")
                        .help("Marker closing an ignored span")
                        .default_value(DEFAULT_IGNORE_END),
                )
                .arg(
                    Arg::new("helpers")
                        .long("helpers")
                        .value_name("NAME")
                        .help("Helper namespace receiving foreach calls")
                        .default_value(DEFAULT_HELPERS_NAME),
                )
                .arg(
                    Arg::new("models")
                        .long("models")
                        .value_name("PATH")
                        .help("Models file prepended to page templates after normalizing")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(dir_type_arg())
                .arg(page_type_arg()),
        )
        .subcommand(
            Command::new("name")
                .about("Print the cache name of a template path")
                .arg(
                    Arg::new("file")
                        .value_name("FILE")
                        .help("Template path")
                        .required(true),
                )
                .arg(dir_type_arg())
                .arg(page_type_arg()),
        )
        .subcommand(
            Command::new("cache").about("Inspect a template cache").subcommand(
                Command::new("list")
                    .about("List the template names stored in a cache file")
                    .arg(
                        Arg::new("cache")
                            .value_name("CACHE")
                            .help("Path to the JSON cache")
                            .required(true)
                            .value_parser(clap::value_parser!(PathBuf)),
                    ),
            ),
        )
}

fn dir_type_arg() -> Arg {
    Arg::new("dir-type")
        .long("dir-type")
        .value_name("TYPE")
        .help("Directory type to look for; may be repeated")
        .action(ArgAction::Append)
}

fn page_type_arg() -> Arg {
    Arg::new("page-type")
        .long("page-type")
        .value_name("TYPE")
        .help("Type used when no directory type matches")
        .default_value(DEFAULT_PAGE_DIR_TYPE)
}

/// Parse `args` and run the selected subcommand, writing results to `out`
pub fn run<I, T>(args: I, out: &mut dyn Write) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = build_cli().try_get_matches_from(args)?;
    run_matches(&matches, out)
}

/// Run the subcommand selected in already parsed `matches`
pub fn run_matches(matches: &ArgMatches, out: &mut dyn Write) -> Result<()> {
    match matches.subcommand() {
        Some(("normalize", sub)) => normalize(sub, out),
        Some(("name", sub)) => name(sub, out),
        Some(("cache", sub)) => match sub.subcommand() {
            Some(("list", list)) => cache_list(list, out),
            _ => anyhow::bail!("Unknown cache command, try 'razor cache list <CACHE>'"),
        },
        _ => anyhow::bail!("Unknown command"),
    }
}

fn string_arg(matches: &ArgMatches, id: &str) -> String {
    matches.get_one::<String>(id).cloned().unwrap_or_default()
}

/// Directory types from repeated `--dir-type`, or just the page type
fn dir_types(matches: &ArgMatches, page_type: &str) -> Vec<String> {
    match matches.get_many::<String>("dir-type") {
        Some(types) => types.cloned().collect(),
        None => vec![page_type.to_string()],
    }
}

fn normalize(matches: &ArgMatches, out: &mut dyn Write) -> Result<()> {
    let file = matches
        .get_one::<PathBuf>("file")
        .context("missing template file")?;
    let config = NormalizerConfig {
        ignore_start: string_arg(matches, "ignore-start"),
        ignore_end: string_arg(matches, "ignore-end"),
        helpers_name: string_arg(matches, "helpers"),
    };

    let source = fs::read_to_string(file)
        .with_context(|| format!("Failed to read template {}", file.display()))?;
    let normalized = SyntaxNormalizer::new(&config)?
        .normalize(&source)
        .with_context(|| format!("Failed to normalize {}", file.display()))?;

    if !normalized.diagnostics.is_empty() {
        warn!(
            file = %file.display(),
            count = normalized.diagnostics.len(),
            "template normalized with warnings"
        );
    }

    let text = match matches.get_one::<PathBuf>("models") {
        Some(models_path) => {
            let page_type = string_arg(matches, "page-type");
            let dir_types = dir_types(matches, &page_type);
            let dir_type = naming::dir_type_from_path(
                &file.to_string_lossy(),
                dir_types.as_slice(),
                &page_type,
            );
            Models::load(models_path).prepend(&dir_type, &page_type, &normalized.text)
        }
        None => normalized.text,
    };

    match matches.get_one::<PathBuf>("out") {
        Some(dest) => {
            write_output(dest, &text)?;
            writeln!(out, "Wrote {}", dest.display())?;
        }
        None => write!(out, "{text}")?,
    }
    Ok(())
}

fn write_output(dest: &Path, text: &str) -> Result<()> {
    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(dest, text).with_context(|| format!("Failed to write {}", dest.display()))
}

fn name(matches: &ArgMatches, out: &mut dyn Write) -> Result<()> {
    let file = string_arg(matches, "file");
    let page_type = string_arg(matches, "page-type");
    let dir_types = dir_types(matches, &page_type);

    let dir_type = naming::dir_type_from_path(&file, dir_types.as_slice(), &page_type);
    debug!(%file, %dir_type, "resolved directory type");
    writeln!(out, "{}", naming::template_name(&file, &dir_type))?;
    Ok(())
}

fn cache_list(matches: &ArgMatches, out: &mut dyn Write) -> Result<()> {
    let path = matches
        .get_one::<PathBuf>("cache")
        .context("missing cache path")?;
    let cache = TemplateCache::load(path)?;
    for name in cache.names() {
        writeln!(out, "{name}")?;
    }
    Ok(())
}
