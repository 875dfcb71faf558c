use clap::{Args, Parser, Subcommand};

use forge_analytics::format_util::{format_number, kpi_detail, kpi_value};
use forge_analytics::{
    AnalyticsBundle, ChartSpec, ForgeAnalytics, MetricRecord, ProjectInput, RandomSource,
    MAX_PROJECTS,
};

#[derive(Parser)]
#[command(name = "forge-analytics", about = "Analytics project dashboard CLI")]
struct Cli {
    /// Database path (default: ~/.forge-analytics/forge-analytics.db)
    #[arg(long)]
    db: Option<String>,

    /// Increase logging verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage analytics projects
    Project {
        #[command(subcommand)]
        action: ProjectAction,
    },
    /// Show the analytics view for a project
    View {
        /// Project id
        id: String,
        /// Output the full bundle as JSON
        #[arg(long)]
        json: bool,
        /// Seed for reproducible placeholder data
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Manage dashboard configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Show dashboard status
    Status,
}

#[derive(Subcommand)]
enum ProjectAction {
    /// Create a new project
    Create {
        /// Project name
        #[arg(long)]
        name: String,
        #[command(flatten)]
        fields: ProjectFields,
    },
    /// List all projects
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Launch a new project from an existing one, with changes applied
    Edit {
        /// Id of the project to copy
        id: String,
        /// New project name
        #[arg(long)]
        name: Option<String>,
        #[command(flatten)]
        fields: ProjectFields,
    },
    /// Delete a project
    Delete {
        /// Project id
        id: String,
    },
}

/// Form fields shared by `create` and `edit`. Numbers are taken as typed;
/// anything unparseable falls back to zero.
#[derive(Args)]
struct ProjectFields {
    /// Analytics type (e.g. "Revenue Analytics")
    #[arg(long = "type", value_name = "TYPE")]
    analytics_type: Option<String>,
    /// Data source
    #[arg(long)]
    source: Option<String>,
    /// Time range
    #[arg(long)]
    range: Option<String>,
    /// Metrics of interest
    #[arg(long)]
    metrics: Option<String>,
    #[arg(long)]
    target_revenue: Option<String>,
    #[arg(long)]
    current_revenue: Option<String>,
    #[arg(long)]
    target_users: Option<String>,
    #[arg(long)]
    current_users: Option<String>,
    /// Target conversion rate (%)
    #[arg(long)]
    target_conversion: Option<String>,
    /// Current conversion rate (%)
    #[arg(long)]
    current_conversion: Option<String>,
    #[arg(long)]
    budget: Option<String>,
    #[arg(long)]
    team_size: Option<String>,
}

impl ProjectFields {
    fn into_input(self, name: Option<String>) -> ProjectInput {
        ProjectInput {
            name: name.unwrap_or_default(),
            analytics_type: self.analytics_type.unwrap_or_default(),
            data_source: self.source.unwrap_or_default(),
            time_range: self.range.unwrap_or_default(),
            metrics_of_interest: self.metrics.unwrap_or_default(),
            target_revenue: self.target_revenue,
            current_revenue: self.current_revenue,
            target_users: self.target_users,
            current_users: self.current_users,
            target_conversion: self.target_conversion,
            current_conversion: self.current_conversion,
            budget: self.budget,
            team_size: self.team_size,
        }
    }
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Get a config value
    Get { key: String },
    /// Set a config value
    Set { key: String, value: String },
    /// List all config values
    List,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let db = match &cli.db {
        Some(path) => forge_analytics::Database::open_at(path).await?,
        None => forge_analytics::Database::open().await?,
    };
    let forge = ForgeAnalytics::load(db).await?;

    match cli.command {
        Commands::Project { action } => {
            handle_project(&forge, action).await?;
        }
        Commands::View { id, json, seed } => {
            let bundle = match seed {
                Some(seed) => forge.open_with(
                    &id,
                    chrono::Local::now().date_naive(),
                    &mut RandomSource::seeded(seed),
                )?,
                None => forge.open(&id)?,
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&bundle)?);
            } else {
                print_bundle(&bundle);
            }
        }
        Commands::Config { action } => {
            handle_config(&forge, action).await?;
        }
        Commands::Status => {
            print_status(&forge).await?;
        }
    }

    Ok(())
}

async fn handle_project(forge: &ForgeAnalytics, action: ProjectAction) -> anyhow::Result<()> {
    match action {
        ProjectAction::Create { name, fields } => {
            if name.trim().is_empty() {
                anyhow::bail!("Project name must not be empty");
            }
            let record = forge.create_project(&fields.into_input(Some(name))).await?;
            println!("Created: {} ({})", record.name, record.id);
        }
        ProjectAction::List { json } => {
            let projects = forge.projects();
            if json {
                println!("{}", serde_json::to_string_pretty(&*projects)?);
            } else if projects.is_empty() {
                println!("No Analytics Projects Yet");
                println!("Create your first project with 'forge-analytics project create'.");
            } else {
                for project in projects.iter() {
                    print_project_card(project);
                }
            }
        }
        ProjectAction::Edit { id, name, fields } => {
            let record = forge.create_version(&id, fields.into_input(name)).await?;
            println!("Created new version: {} ({})", record.name, record.id);
        }
        ProjectAction::Delete { id } => {
            forge.delete_project(&id).await?;
            println!("Deleted: {id}");
        }
    }
    Ok(())
}

fn print_project_card(p: &MetricRecord) {
    println!("{} [{}]", p.name, p.id);
    if !p.analytics_type.is_empty() {
        println!("  Type:       {}", p.analytics_type);
    }
    println!(
        "  Revenue:    ${} / ${} ({:.1}%)",
        format_number(p.current_revenue),
        format_number(p.target_revenue),
        p.revenue_progress()
    );
    println!(
        "  Users:      {} / {} ({:.1}%)",
        format_number(p.current_users as f64),
        format_number(p.target_users as f64),
        p.user_progress()
    );
    println!(
        "  Conversion: {}% (target {}%)",
        p.current_conversion, p.target_conversion
    );
    println!("  Budget:     ${}", format_number(p.budget));
    println!("  Team:       {}", p.team_size);
    println!("  Created:    {}", p.created_at.format("%Y-%m-%d"));
    println!();
}

fn print_bundle(bundle: &AnalyticsBundle) {
    println!("{}", bundle.title);
    println!();
    for entry in bundle.kpis.iter() {
        let arrow = if entry.signal.is_favorable() { "+" } else { "-" };
        println!(
            "  [{arrow}] {:<16} {:>10}  {}",
            entry.label,
            kpi_value(entry),
            kpi_detail(&entry.detail)
        );
    }
    for chart in bundle.charts.iter() {
        println!();
        print_chart(chart);
    }
}

fn print_chart(chart: &ChartSpec) {
    println!("{} ({:?}, {} labels)", chart.title, chart.kind, chart.labels.len());
    for series in &chart.series {
        let (min, max) = series
            .points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(*v), hi.max(*v))
            });
        if series.points.len() <= 6 {
            let values: Vec<String> = series.points.iter().map(|v| format!("{v:.1}")).collect();
            println!("  {}: {}", series.name, values.join(", "));
        } else {
            println!(
                "  {}: {} points, {:.1} to {:.1}",
                series.name,
                series.points.len(),
                min,
                max
            );
        }
    }
}

async fn print_status(forge: &ForgeAnalytics) -> anyhow::Result<()> {
    let config = forge.dashboard_config().await?;
    let projects = forge.projects();

    println!("{}", config.dashboard_title);
    println!("{}", config.company_name);
    println!("  {}", config.welcome_message);
    println!("  {}", config.tagline);
    println!();
    println!("  Projects: {} / {MAX_PROJECTS}", projects.len());
    let total_budget: f64 = projects.iter().map(|p| p.budget).sum();
    println!("  Budget:   ${}", format_number(total_budget));
    println!("  Schema:   v{}", forge.db().schema_version().await?);
    Ok(())
}

async fn handle_config(forge: &ForgeAnalytics, action: ConfigAction) -> anyhow::Result<()> {
    match action {
        ConfigAction::Get { key } => match forge.config_get(&key).await? {
            Some(v) => println!("{key} = {v}"),
            None => println!("{key} is not set"),
        },
        ConfigAction::Set { key, value } => {
            forge.config_set(&key, &value).await?;
            println!("Config updated.");
        }
        ConfigAction::List => {
            let items = forge.config_list().await?;
            if items.is_empty() {
                println!("No configuration set.");
            } else {
                for (k, v) in items {
                    println!("{k} = {v}");
                }
            }
        }
    }
    Ok(())
}
