use std::path::Path;

use litmine::{TermKind, TermSet, TermSource};
use tracing::instrument;

use crate::cli::{open_project, terminal::Colorize};

#[derive(Debug, clap::Parser)]
pub struct Terms {
    /// Name of the term file in the 'terms' folder, without '.txt'
    file: String,

    /// Term file with inclusions, one line per term
    #[arg(long, short)]
    inclusions: Option<String>,

    /// Term file with exclusions, one line per term
    #[arg(long, short)]
    exclusions: Option<String>,

    /// Comma-separated labels, one per term
    #[arg(long, short, value_delimiter = ',')]
    labels: Vec<String>,
}

impl Terms {
    #[instrument]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let project = open_project(root)?;
        let mut terms = TermSet::new();

        terms.add_terms(TermSource::file(&self.file), TermKind::Terms, &project, false)?;
        if let Some(file) = &self.inclusions {
            terms.add_terms(TermSource::file(file), TermKind::Inclusions, &project, false)?;
        }
        if let Some(file) = &self.exclusions {
            terms.add_terms(TermSource::file(file), TermKind::Exclusions, &project, false)?;
        }
        if !self.labels.is_empty() {
            terms.add_labels(self.labels, true)?;
        }

        tracing::info!("Loaded {} terms from '{}'", terms.n_terms(), self.file);

        if !terms.has_terms() {
            println!("{}", format!("No terms in '{}'", self.file).dim());
            return Ok(());
        }

        for (index, term) in terms.iter().enumerate() {
            println!("{} {}", format!("{index:>3}").dim(), term.display_label().heading());
            println!("    search:     {}", term.search().join(", "));
            if !term.inclusions().is_empty() {
                println!("    inclusions: {}", term.inclusions().join(", "));
            }
            if !term.exclusions().is_empty() {
                println!("    exclusions: {}", term.exclusions().join(", "));
            }
            println!("    query:      {}", term.query().dim());
        }
        Ok(())
    }
}
