use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, Viewer};
use crate::cli::args::{Cli, Commands, ConfigCommands, KindArgs, SourceKind};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_dir, global_config_path, local_config_path, Settings};
use crate::domain::{NamingScheme, Point, RandomColours};
use crate::tree_traits::TreeNodeConvert;
use crate::util::path::expand_path;
use crate::variants::{
    build_file_system_tree, build_paper_tree, load_papers, CategoryNaming, FileSystemNaming,
    FileSystemTree, PaperTree,
};

/// What to print for a loaded tree.
#[derive(Debug, Clone, Copy)]
enum Report {
    Tree,
    Rects,
    Locate(Point),
}

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Tree { source, kind }) => _show(cli, source.as_deref(), kind, Report::Tree),
        Some(Commands::Rects { source, kind }) => {
            _show(cli, source.as_deref(), kind, Report::Rects)
        }
        Some(Commands::Locate { source, x, y, kind }) => _show(
            cli,
            Some(source.as_path()),
            kind,
            Report::Locate(Point::new(*x, *y)),
        ),
        Some(Commands::Config { command }) => _config(cli, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Ok(()),
    }
}

/// Loads layered settings and applies command-line overrides on top.
fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let local_dir = match &cli.config_dir {
        Some(dir) => Some(dir.clone()),
        None => std::env::current_dir().ok(),
    };
    let mut settings = Settings::load(local_dir.as_deref())?;
    if let Some(seed) = cli.seed {
        settings.seed = Some(seed);
    }
    if let Some(width) = cli.width {
        settings.width = width;
    }
    if let Some(height) = cli.height {
        settings.height = height;
    }
    settings.validate()?;
    debug!(?settings, "settings loaded");
    Ok(settings)
}

#[instrument(skip(cli))]
fn _show(cli: &Cli, source: Option<&Path>, kind: &KindArgs, report: Report) -> CliResult<()> {
    let settings = load_settings(cli)?;
    match kind.kind {
        SourceKind::Fs => {
            let path = expand_path(source.unwrap_or(Path::new(".")));
            let mut tree = FileSystemTree::new(
                FileSystemNaming,
                Box::new(RandomColours::from_seed_option(settings.seed)),
            );
            let root = build_file_system_tree(&mut tree, &path)?;
            let viewer = Viewer::new(tree, root, settings.screen()).with_step(settings.step);
            _report(viewer, report)
        }
        SourceKind::Papers => {
            let path = source
                .map(expand_path)
                .unwrap_or_else(|| settings.papers_file.clone());
            let by_year = settings.by_year && !kind.no_year;
            let map = load_papers(&path, by_year)?;
            let mut tree = PaperTree::new(
                CategoryNaming,
                Box::new(RandomColours::from_seed_option(settings.seed)),
            );
            let root = build_paper_tree(&mut tree, &settings.papers_root, &map);
            let viewer = Viewer::new(tree, root, settings.screen()).with_step(settings.step);
            _report(viewer, report)
        }
    }
}

fn _report<N: NamingScheme>(mut viewer: Viewer<N>, report: Report) -> CliResult<()> {
    viewer
        .tree()
        .check_invariants(viewer.root())
        .map_err(ApplicationError::from)?;
    match report {
        Report::Tree => {
            output::info(&viewer.tree().to_tree_string(viewer.root()));
        }
        Report::Rects => {
            let tree = viewer.tree();
            for unit in tree.display_units(viewer.root()) {
                if let Some(node) = tree.node(unit) {
                    output::swatch(
                        node.colour(),
                        &format!("{} {}", node.rect(), tree.path_string_with_suffixes(unit)),
                    );
                }
            }
        }
        Report::Locate(point) => {
            if viewer.select_at(point).is_none() {
                return Err(CliError::Usage(format!(
                    "no unit at {} inside {}",
                    point,
                    viewer.screen()
                )));
            }
            if let Some(status) = viewer.status() {
                output::info(&status);
            }
        }
    }
    Ok(())
}

#[instrument(skip(cli))]
fn _config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    let local_dir = cli
        .config_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));
    match command {
        ConfigCommands::Show => {
            let settings = load_settings(cli)?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Path => {
            output::header("Config paths");
            match global_config_path() {
                Some(path) => output::detail(&format!("global: {}", path.display())),
                None => output::detail(&"global: <no home directory>"),
            }
            output::detail(&format!("local:  {}", local_config_path(&local_dir).display()));
        }
        ConfigCommands::Init { global } => {
            let path = if *global {
                let dir = global_config_dir()
                    .ok_or_else(|| CliError::Usage("no home directory for global config".into()))?;
                fs::create_dir_all(&dir).map_err(|e| CliError::Io {
                    context: "cannot create config directory",
                    path: dir.clone(),
                    source: e,
                })?;
                dir.join("tmtree.toml")
            } else {
                local_config_path(&local_dir)
            };
            if path.exists() {
                output::warning(&format!("config already exists: {}", path.display()));
                return Ok(());
            }
            fs::write(&path, Settings::template()).map_err(|e| CliError::Io {
                context: "cannot write config",
                path: path.clone(),
                source: e,
            })?;
            output::action("Created", &path.display());
        }
    }
    Ok(())
}
