use std::path::{Path, PathBuf};

mod init;
mod terminal;
mod terms;

use clap::ArgAction;
use init::Init;
use litmine::{Config, ProjectDirectory};
use terminal::Colorize;
use terms::Terms;
use tracing::instrument;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The path to the base folder of the project
    ///
    /// For `init`, this is the folder the project folder is created in.
    #[arg(short, long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);
        self.command.run(&self.root)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Create the project folder structure
    ///
    /// Running this on an existing project only creates missing folders.
    Init(Init),

    /// Show the path of every folder in the project
    Paths,

    /// Show the files and folders of the project on disk
    Tree,

    /// List the files in a project folder
    Files(Files),

    /// Load a term file and show the terms and their queries
    Terms(Terms),
}

impl Command {
    fn run(self, root: &Path) -> anyhow::Result<()> {
        match self {
            Self::Init(command) => command.run(root)?,
            Self::Paths => paths(root)?,
            Self::Tree => tree(root)?,
            Self::Files(command) => command.run(root)?,
            Self::Terms(command) => command.run(root)?,
        }
        Ok(())
    }
}

/// Open the project at `root`, using its configured structure.
fn open_project(root: &Path) -> anyhow::Result<ProjectDirectory> {
    let config = Config::load_or_default(root);
    let structure = config.structure()?;
    Ok(ProjectDirectory::with_structure(root, structure))
}

#[instrument]
fn paths(root: &Path) -> anyhow::Result<()> {
    let project = open_project(root)?;

    for (name, path) in project.structure().walk(project.base()) {
        println!("{:<12} {}", name.heading(), path.display());
    }
    Ok(())
}

#[instrument]
fn tree(root: &Path) -> anyhow::Result<()> {
    let project = open_project(root)?;
    project.check_file_structure(&mut std::io::stdout().lock())?;
    Ok(())
}

#[derive(Debug, clap::Parser)]
pub struct Files {
    /// The project folder to list (e.g. 'terms', 'counts')
    folder: String,

    /// Drop file extensions
    #[arg(long)]
    drop_ext: bool,

    /// Keep directory order instead of sorting by name
    #[arg(long)]
    unsorted: bool,
}

impl Files {
    #[instrument]
    fn run(self, root: &Path) -> anyhow::Result<()> {
        let project = open_project(root)?;
        let files = project.get_files(&self.folder, self.drop_ext, !self.unsorted)?;

        if files.is_empty() {
            println!("{}", format!("No files in '{}'", self.folder).dim());
        }
        for file in files {
            println!("{file}");
        }
        Ok(())
    }
}
