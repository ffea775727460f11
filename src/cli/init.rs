use std::path::Path;

use litmine::{
    Config, ProjectDirectory, create_file_structure, domain::CONFIG_FILE, storage::DEFAULT_NAME,
};
use tracing::instrument;

use crate::cli::terminal::Colorize;

#[derive(Debug, clap::Parser)]
pub struct Init {
    /// Name of the project folder, created inside the root
    #[arg(long, default_value = DEFAULT_NAME)]
    name: String,
}

impl Init {
    #[instrument]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let project = init_project(root, &self.name)?;

        println!(
            "{}",
            format!("Initialized project in {}", project.base().display()).success()
        );
        for (name, path) in project.structure().walk(project.base()).into_iter().skip(1) {
            println!("  {:<10} {}", name, path.display().to_string().dim());
        }
        println!();
        println!("Next steps:");
        if let Ok(terms) = project.get_folder_path("terms") {
            println!("  Add term files to {}, one term per line", terms.display());
        }
        println!("  litmine --root {} terms <FILE>", project.base().display());

        Ok(())
    }
}

/// Create the project `root/name`, keeping the layout of an existing config.
fn init_project(root: &Path, name: &str) -> anyhow::Result<ProjectDirectory> {
    let base = root.join(name);
    let config = Config::load_or_default(&base);
    let project = create_file_structure(Some(root), name, config.structure()?)?;

    let config_path = project.base().join(CONFIG_FILE);
    if config_path.exists() {
        tracing::debug!("Keeping existing {}", config_path.display());
    } else {
        config
            .save(&config_path)
            .map_err(|e| anyhow::anyhow!("Failed to create {CONFIG_FILE}: {e}"))?;
    }

    Ok(project)
}

#[cfg(test)]
mod tests {
    use litmine::Structure;
    use tempfile::TempDir;

    use super::*;
    use crate::cli::open_project;

    #[test]
    fn initialized_project_opens_at_its_base() {
        let tmp = TempDir::new().unwrap();

        let created = init_project(tmp.path(), DEFAULT_NAME).unwrap();
        let opened = open_project(created.base()).unwrap();

        assert_eq!(created.paths(), opened.paths());
        assert!(created.base().join(CONFIG_FILE).is_file());
    }

    #[test]
    fn existing_config_sets_the_layout() {
        let tmp = TempDir::new().unwrap();
        let base = tmp.path().join("custom");
        std::fs::create_dir(&base).unwrap();
        let structure = Structure::from_parents([("terms", "base"), ("raw", "terms")]).unwrap();
        Config::with_structure(&structure)
            .save(&base.join(CONFIG_FILE))
            .unwrap();

        let project = init_project(tmp.path(), "custom").unwrap();

        assert_eq!(project.structure(), &structure);
        assert!(base.join("terms").join("raw").is_dir());
        assert!(!base.join("data").exists());
    }
}
