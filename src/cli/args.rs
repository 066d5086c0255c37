use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "oil-co2-dashboard")]
#[command(about = "Oil production and CO₂ emissions dashboard data engine")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, help = "Configuration file (TOML)")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Primary CSV source (oil production)")]
    pub primary: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        help = "Secondary CSV source joined on Entity, Code and Year (CO₂ emissions)"
    )]
    pub secondary: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        conflicts_with = "secondary",
        help = "Load only the primary source"
    )]
    pub single_source: bool,

    #[arg(long, global = true, help = "First year to keep")]
    pub min_year: Option<i32>,

    #[arg(long, global = true, help = "Last year to keep")]
    pub max_year: Option<i32>,

    #[arg(long, global = true, help = "Entity,Continent mapping CSV")]
    pub continents: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(
        short,
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Only log warnings and hide progress"
    )]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the line chart for a set of countries
    Line {
        #[arg(short, long = "country", help = "Country to plot (repeatable) [default: configured countries]")]
        countries: Vec<String>,

        #[arg(short, long, help = "Metric column [default: configured metric]")]
        metric: Option<String>,

        #[arg(
            short,
            long,
            num_args = 0..=1,
            help = "Write JSON to a file [default: output/line-chart-{YYMMDD}.json]"
        )]
        output: Option<Option<PathBuf>>,
    },

    /// Build the animated choropleth map for a continent
    Map {
        #[arg(short, long, help = "Continent or 'World' [default: configured continent]")]
        continent: Option<String>,

        #[arg(
            short,
            long,
            num_args = 0..=1,
            help = "Write JSON to a file [default: output/choropleth-map-{YYMMDD}.json]"
        )]
        output: Option<Option<PathBuf>>,
    },

    /// Render a saved view state
    Render {
        #[arg(short, long, help = "View state JSON file")]
        state: PathBuf,

        #[arg(
            short,
            long,
            num_args = 0..=1,
            help = "Write JSON to a file [default: output/figure-{YYMMDD}.json]"
        )]
        output: Option<Option<PathBuf>>,
    },

    /// Print the selectable countries, metrics and continents
    Options,

    /// Load the sources and print the integrity report
    Validate {
        #[arg(long, help = "Print the report as JSON")]
        json: bool,
    },
}
