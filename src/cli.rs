//! Command-line interface.
//!
//! A thin presentation layer over the library: it resolves configuration,
//! loads the catalog, validates user input the core assumes valid (the
//! track name, integer credit limits) and renders results as text or JSON.

use std::fmt;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use thiserror::Error;

use crate::catalog::{load_courses, Catalog};
use crate::config::{load_planner_config, PlannerConfig};
use crate::error::{CatalogError, ConfigError};
use crate::recommend::{Recommendations, Recommender};
use crate::report::{PlanFormatter, PlanReport};
use crate::scheduler::{PlanKpi, PlanRequest, TermScheduler};
use crate::validation::{diagnose_catalog, ValidationError};

/// Catalog used when neither the command line nor the config names one.
pub const DEFAULT_CATALOG: &str = "data/courses.csv";

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("unknown track '{track}' (known tracks: {known})")]
    UnknownTrack { track: String, known: String },
    #[error("catalog validation failed with {0} error(s)")]
    ValidationFailed(usize),
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Term-by-term degree planner", long_about = None)]
pub struct Cli {
    /// Course catalog (CSV or JSON)
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,
    /// Planner configuration (TOML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Builds a term-by-term plan
    Plan(PlanArgs),
    /// Lists courses available next, ranked by relevance
    Recommend(RecommendArgs),
    /// Checks the catalog for data problems
    Validate,
    /// Lists the tracks found in the catalog
    Tracks,
}

#[derive(Args, Debug, Clone)]
pub struct PlanArgs {
    /// Track to plan for
    #[arg(long)]
    pub track: String,
    /// Completed course IDs
    #[arg(long, num_args = 0..)]
    pub completed: Vec<String>,
    /// Maximum credits per term (defaults to the config value)
    #[arg(long)]
    pub max_credits: Option<u32>,
}

#[derive(Args, Debug, Clone)]
pub struct RecommendArgs {
    /// Track to rank courses for
    #[arg(long)]
    pub track: String,
    /// Completed course IDs
    #[arg(long, num_args = 0..)]
    pub completed: Vec<String>,
}

pub fn run(cli: Cli) -> Result<()> {
    let context = AppContext::new(&cli)?;

    match &cli.command {
        Commands::Plan(args) => {
            let report = context.plan(args)?;
            render(&report, cli.format)?;
        }
        Commands::Recommend(args) => {
            let recommendations = context.recommend(args)?;
            render(&recommendations, cli.format)?;
        }
        Commands::Validate => {
            let report = context.validate()?;
            render(&report, cli.format)?;
            let errors = report.error_count();
            if errors > 0 {
                return Err(AppError::ValidationFailed(errors));
            }
        }
        Commands::Tracks => {
            let tracks = TrackList {
                tracks: context.catalog.tracks(),
            };
            render(&tracks, cli.format)?;
        }
    }

    Ok(())
}

fn render<T>(value: &T, format: OutputFormat) -> Result<()>
where
    T: Serialize + DisplayFallback,
{
    match format {
        OutputFormat::Text => {
            print!("{}", value.display());
            Ok(())
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(value)?;
            println!("{}", json);
            Ok(())
        }
    }
}

trait DisplayFallback {
    fn display(&self) -> String;
}

impl DisplayFallback for PlanReport {
    fn display(&self) -> String {
        self.to_string()
    }
}

impl DisplayFallback for Recommendations {
    fn display(&self) -> String {
        let mut out = String::new();
        if self.recommended.is_empty() {
            out.push_str("No courses available.\n");
        }
        for rec in &self.recommended {
            out.push_str(&format!(
                "{:>2}  {:<10} {}\n",
                rec.score, rec.course_id, rec.course_name
            ));
        }
        if !self.locked.is_empty() {
            out.push_str("Locked:\n");
            for locked in &self.locked {
                out.push_str(&format!(
                    "  {:<10} missing {}\n",
                    locked.course_id,
                    locked.missing.join(", ")
                ));
            }
        }
        out
    }
}

/// Output of `validate`.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub catalog: PathBuf,
    pub courses: usize,
    pub findings: Vec<ValidationError>,
}

impl ValidationReport {
    pub fn error_count(&self) -> usize {
        self.findings.iter().filter(|f| f.is_error()).count()
    }
}

impl DisplayFallback for ValidationReport {
    fn display(&self) -> String {
        let mut out = String::new();
        for finding in &self.findings {
            out.push_str(&format!("{finding}\n"));
        }
        out.push_str(&format!(
            "{}: {} courses, {} error(s), {} warning(s)\n",
            self.catalog.display(),
            self.courses,
            self.error_count(),
            self.findings.len() - self.error_count()
        ));
        out
    }
}

/// Output of `tracks`.
#[derive(Debug, Clone, Serialize)]
pub struct TrackList {
    pub tracks: Vec<String>,
}

impl DisplayFallback for TrackList {
    fn display(&self) -> String {
        self.tracks.iter().map(|t| format!("{t}\n")).collect()
    }
}

impl fmt::Display for TrackList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tracks.join(", "))
    }
}

#[derive(Debug)]
struct AppContext {
    config: PlannerConfig,
    catalog_path: PathBuf,
    catalog: Catalog,
}

impl AppContext {
    fn new(cli: &Cli) -> Result<Self> {
        let config = match &cli.config {
            Some(path) => load_planner_config(path)?,
            None => PlannerConfig::default(),
        };
        let catalog_path = cli
            .catalog
            .clone()
            .or_else(|| config.catalog.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG));
        let catalog = Catalog::load(&catalog_path)?;

        Ok(Self {
            config,
            catalog_path,
            catalog,
        })
    }

    fn ensure_track(&self, track: &str) -> Result<()> {
        if self.catalog.has_track(track) {
            return Ok(());
        }
        Err(AppError::UnknownTrack {
            track: track.to_string(),
            known: TrackList {
                tracks: self.catalog.tracks(),
            }
            .to_string(),
        })
    }

    fn plan(&self, args: &PlanArgs) -> Result<PlanReport> {
        self.ensure_track(&args.track)?;

        let resolver = self.config.resolver();
        let scheduler = TermScheduler::new()
            .with_resolver(resolver.clone())
            .with_equivalence_groups(self.config.equivalence_groups());
        let request = PlanRequest::new(&args.track)
            .with_completed(args.completed.iter().cloned())
            .with_max_credits(args.max_credits.unwrap_or(self.config.max_credits));

        let plan = scheduler.schedule(&self.catalog, &request);
        let stats = PlanKpi::calculate(&plan, &self.catalog, &args.completed);
        Ok(PlanFormatter::new(resolver)
            .format(&plan, &self.catalog)
            .with_stats(stats))
    }

    fn recommend(&self, args: &RecommendArgs) -> Result<Recommendations> {
        self.ensure_track(&args.track)?;

        let recommender = Recommender::new().with_resolver(self.config.resolver());
        Ok(recommender.recommend(&self.catalog, &args.track, &args.completed))
    }

    fn validate(&self) -> Result<ValidationReport> {
        // Raw records, so duplicate ids are still visible
        let courses = load_courses(&self.catalog_path)?;
        let findings = diagnose_catalog(
            &courses,
            &self.config.resolver(),
            &self.config.equivalence_groups(),
        );
        Ok(ValidationReport {
            catalog: self.catalog_path.clone(),
            courses: courses.len(),
            findings,
        })
    }
}
