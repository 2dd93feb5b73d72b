#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use clap::Parser;
use pathtree::cli::{Args, SourceCommand};
use pathtree::config::AppConfig;
use pathtree::render::RenderConfig;
use pathtree::session::Session;
use pathtree::source::{local, DatasetSource, ListLayout, RepoRef, Source};
use pathtree::{event_loop, logging, terminal};
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::sync::Arc;

fn main() {
    if let Err(e) = run_app() {
        eprintln!("pathtree: {e:#}");
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let args = Args::parse().validated();
    logging::init(args.verbosity(), args.log_file.as_deref(), args.interactive)?;

    let config = AppConfig::load(args.config.as_deref());
    let patterns = config.pattern_set(args.no_defaults, args.glob, &args.ignore);
    let render_config = RenderConfig {
        use_color: config.use_color(args.no_color),
    };
    let source = resolve_source(&args.source, &config)?;
    let mut session = Session::new(patterns);

    if args.interactive {
        // Fixed datasets are already in memory; others load in the viewer.
        if let Source::Fixed(dataset) = &source {
            session.load(dataset.clone());
        }
        let (_guard, mut term) = terminal::init().context("failed to initialize terminal")?;
        return event_loop::run(
            &mut term,
            Arc::new(source),
            session,
            render_config,
            args.search.as_deref(),
        );
    }

    let dataset = source
        .load()
        .with_context(|| format!("{}: failed to load", source.describe()))?;
    session.load(dataset);

    let with_stats = !args.no_stats;
    let text = match args.search.as_deref() {
        Some(query) => session.export_view(&session.search(query), with_stats),
        None => session.export(with_stats),
    };

    match &args.output {
        Some(path) => std::fs::write(path, text)
            .with_context(|| format!("{}: failed to write output", path.display()))?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

/// Turn the chosen subcommand into a loadable source.
fn resolve_source(command: &SourceCommand, config: &AppConfig) -> Result<Source> {
    Ok(match command {
        SourceCommand::Dir {
            path,
            follow_symlinks,
        } => {
            let path = path
                .canonicalize()
                .with_context(|| format!("{}: failed to resolve path", path.display()))?;
            anyhow::ensure!(path.is_dir(), "{}: Not a directory", path.display());
            Source::Dir {
                path,
                follow_symlinks: *follow_symlinks,
            }
        }
        SourceCommand::List {
            file,
            root,
            full_paths,
        } => {
            let layout = if *full_paths {
                ListLayout::FullPaths
            } else {
                ListLayout::Relative {
                    root_name: root.clone(),
                }
            };
            let dataset = match file {
                Some(path) => {
                    let f = File::open(path)
                        .with_context(|| format!("{}: failed to open path list", path.display()))?;
                    local::from_path_list(BufReader::new(f), layout)?
                }
                None => local::from_path_list(io::stdin().lock(), layout)?,
            };
            Source::Fixed(dataset)
        }
        SourceCommand::Github { repo, branch } => Source::Github {
            repo: RepoRef::parse(repo)?,
            options: config.fetch_options(branch.as_deref()),
        },
    })
}
