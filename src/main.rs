use anyhow::{Context, Result, bail};
use beliefnet::graph::models::{Assignment, parse_assignment};
use beliefnet::inference::{engine, structure, traversal};
use beliefnet::scenarios::ScenarioMakerFactory;
use beliefnet::setup::{QueryKind, parse_configuration_options, write_marginal_output};
use colored::Colorize;
use log::info;

fn main() -> Result<()> {
    let options = parse_configuration_options();
    info!("building scenario '{}'", options.scenario_name);
    let scenario = ScenarioMakerFactory::new_shared(&options.scenario_name)?;
    let net = scenario.setup_scenario()?;

    let hypothesis = parse_optional_assignment(options.hypothesis.as_deref())?;
    let givens = parse_optional_assignment(options.givens.as_deref())?;

    match options.query {
        QueryKind::Probability | QueryKind::Joint | QueryKind::Marginal => {
            let hypothesis =
                hypothesis.context("this query needs --hypothesis 'Var=value,...'")?;
            let value = match options.query {
                QueryKind::Probability => {
                    engine::probability(&net, &hypothesis, givens.as_ref())?
                }
                QueryKind::Joint => engine::probability_joint(&net, &hypothesis)?,
                _ => engine::probability_marginal(&net, &hypothesis)?,
            };
            println!("{} {:.10}", "P =".green(), value);
        }
        QueryKind::Independence | QueryKind::Structure => {
            let (var1, var2) = variable_pair(&options.var1, &options.var2)?;
            for variable in [&var1, &var2] {
                if !net.contains(variable) {
                    bail!("unknown variable '{}'", variable);
                }
            }
            let independent = match options.query {
                QueryKind::Independence => {
                    engine::is_independent(&net, &var1, &var2, givens.as_ref())?
                }
                _ => structure::is_structurally_independent(&net, &var1, &var2, givens.as_ref()),
            };
            if independent {
                println!("{}", "independent".green());
            } else {
                println!("{}", "dependent".red());
            }
        }
        QueryKind::Parameters => {
            println!("{}", structure::number_of_parameters(&net));
        }
        QueryKind::Ancestors | QueryKind::Descendants => {
            let variable = options
                .variable
                .as_deref()
                .context("this query needs --variable")?;
            if !net.contains(variable) {
                bail!("unknown variable '{}'", variable);
            }
            let reached = match options.query {
                QueryKind::Ancestors => traversal::ancestors(&net, variable),
                _ => traversal::descendants(&net, variable),
            };
            let mut reached: Vec<String> = reached.into_iter().collect();
            reached.sort();
            println!("{}", reached.join(" "));
        }
        QueryKind::Marginals => {
            let table = engine::marginal_table(&net)?;
            for (variable, distribution) in &table {
                println!("{}", variable.yellow());
                for (value, probability) in distribution {
                    println!("  {} {:.10}", value, probability);
                }
            }
            if let Some(path) = &options.marginal_output_file {
                write_marginal_output(path, &table)?;
                info!("wrote marginal table to '{}'", path);
            }
        }
    }

    Ok(())
}

fn parse_optional_assignment(text: Option<&str>) -> Result<Option<Assignment>> {
    text.map(parse_assignment).transpose()
}

fn variable_pair(var1: &Option<String>, var2: &Option<String>) -> Result<(String, String)> {
    match (var1, var2) {
        (Some(var1), Some(var2)) => Ok((var1.clone(), var2.clone())),
        _ => bail!("this query needs both --var1 and --var2"),
    }
}
