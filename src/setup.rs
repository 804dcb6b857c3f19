use clap::{Arg, Command, ValueEnum, builder::EnumValueParser};
use env_logger::{Builder, Env};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::io::Write;

/// The query a single CLI invocation runs against the chosen scenario.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize, ValueEnum)]
pub enum QueryKind {
    /// P(hypothesis | givens), the general entry point
    #[serde(rename = "probability")]
    Probability,

    /// Joint probability of the hypothesis via the chain rule
    #[serde(rename = "joint")]
    Joint,

    /// Marginal probability of the hypothesis
    #[serde(rename = "marginal")]
    Marginal,

    /// Numerical conditional independence of var1 and var2
    #[serde(rename = "independence")]
    Independence,

    /// Structural (graphical) conditional independence of var1 and var2
    #[serde(rename = "structure")]
    Structure,

    /// Minimum number of free CPT parameters
    #[serde(rename = "parameters")]
    Parameters,

    /// Ancestor set of a variable
    #[serde(rename = "ancestors")]
    Ancestors,

    /// Descendant set of a variable
    #[serde(rename = "descendants")]
    Descendants,

    /// Marginal distribution of every variable
    #[serde(rename = "marginals")]
    Marginals,
}

/// These options define the inputs from the user.
/// Nothing is owned by basic data types so this class can be easily freely around.
#[derive(Deserialize, Clone, Debug)]
pub struct CommandLineOptions {
    pub scenario_name: String,
    pub query: QueryKind,
    pub hypothesis: Option<String>,
    pub givens: Option<String>,
    pub variable: Option<String>,
    pub var1: Option<String>,
    pub var2: Option<String>,
    pub marginal_output_file: Option<String>,
}

pub fn parse_configuration_options() -> CommandLineOptions {
    Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let file = record.file().unwrap_or("unknown");
            let line = record.line().unwrap_or(0);
            writeln!(
                buf,
                "{} [{}:{}] {}",
                record.level(),
                file,
                line,
                record.args()
            )
        })
        .init();
    let matches = Command::new("BELIEFNET")
        .version("1.0")
        .about("Exact inference over discrete Bayesian networks.")
        .arg(
            Arg::new("scenario_name")
                .long("scenario_name")
                .value_name("STRING")
                .help("Sets the scenario to query")
                .required(true),
        )
        .arg(
            Arg::new("query")
                .long("query")
                .value_parser(EnumValueParser::<QueryKind>::new())
                .help("The query to run against the scenario")
                .default_value("probability"),
        )
        .arg(
            Arg::new("hypothesis")
                .long("hypothesis")
                .value_name("ASSIGNMENT")
                .help("Hypothesis assignment, e.g. 'Rain=true,Grade=2'"),
        )
        .arg(
            Arg::new("givens")
                .long("givens")
                .value_name("ASSIGNMENT")
                .help("Conditioning assignment, e.g. 'Cloudy=false' (optional)"),
        )
        .arg(
            Arg::new("variable")
                .long("variable")
                .value_name("STRING")
                .help("Variable for the ancestors/descendants queries"),
        )
        .arg(
            Arg::new("var1")
                .long("var1")
                .value_name("STRING")
                .help("First variable for the independence queries"),
        )
        .arg(
            Arg::new("var2")
                .long("var2")
                .value_name("STRING")
                .help("Second variable for the independence queries"),
        )
        .arg(
            Arg::new("marginal_output_file")
                .long("marginal_output_file")
                .value_name("FILE")
                .help("Sets the file name for marginal output (optional)"),
        )
        .get_matches();

    let scenario_name: String = matches
        .get_one::<String>("scenario_name")
        .expect("scenario_name is required") // As it's required, unwrap directly
        .to_string();
    let query = matches
        .get_one::<QueryKind>("query")
        .copied()
        .unwrap_or(QueryKind::Probability);
    let hypothesis = matches.get_one::<String>("hypothesis").map(|s| s.to_string());
    let givens = matches.get_one::<String>("givens").map(|s| s.to_string());
    let variable = matches.get_one::<String>("variable").map(|s| s.to_string());
    let var1 = matches.get_one::<String>("var1").map(|s| s.to_string());
    let var2 = matches.get_one::<String>("var2").map(|s| s.to_string());
    let marginal_output_file = matches
        .get_one::<String>("marginal_output_file")
        .map(|s| s.to_string());

    CommandLineOptions {
        scenario_name,
        query,
        hypothesis,
        givens,
        variable,
        var1,
        var2,
        marginal_output_file,
    }
}

/// Write a marginal table to a JSON file, one object per variable.
pub fn write_marginal_output(
    path: &str,
    table: &BTreeMap<String, BTreeMap<String, f64>>,
) -> anyhow::Result<()> {
    use anyhow::Context;
    let rendered = serde_json::to_string_pretty(table).context("Failed to render marginal table")?;
    std::fs::write(path, rendered)
        .with_context(|| format!("Failed to write marginal output to '{}'", path))?;
    Ok(())
}
