use clap::{Parser, Subcommand};
use itertools::Itertools;
use sqlsurveyor::{GenericDialect, ParsedQuery, ParsedSql, Result, SqlSurveyor};
use std::{io::Read, path::PathBuf};
use tracing_subscriber::EnvFilter;

/// Survey SQL scripts and complete them at a cursor.
#[derive(Debug, Parser)]
#[command(name = "sqlsurveyor", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the nested query structure of a script.
    Survey {
        /// Script to read; standard input when omitted.
        file: Option<PathBuf>,
    },
    /// Print completion options at a byte offset.
    Complete {
        /// Script to read; standard input when omitted.
        file: Option<PathBuf>,
        /// Byte offset of the caret; end of the script when omitted.
        #[arg(short, long)]
        at: Option<usize>,
    },
}

fn main() -> Result {
    let cli = Cli::parse();
    let config = sqlsurveyor::config()?;
    let filter = EnvFilter::try_new(&config.log).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let surveyor = SqlSurveyor::new(GenericDialect);
    match cli.command {
        Command::Survey { file } => {
            let sql = read_script(file)?;
            config.check_script(&sql)?;
            print_survey(&surveyor.survey(&sql));
        }
        Command::Complete { file, at } => {
            let sql = read_script(file)?;
            config.check_script(&sql)?;
            match surveyor.autocomplete(&sql, at) {
                Some(options) => options.iter().for_each(|option| println!("{option}")),
                None => tracing::info!(?at, "nothing to complete"),
            }
        }
    }
    Ok(())
}

fn read_script(file: Option<PathBuf>) -> Result<String> {
    match file {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut sql = String::new();
            std::io::stdin().read_to_string(&mut sql)?;
            Ok(sql)
        }
    }
}

fn print_survey(parsed: &ParsedSql) {
    for query in parsed.queries() {
        print_query(query, None, 0);
    }
    for error in &parsed.unbound_errors {
        println!("! {error}");
    }
}

fn print_query(query: &ParsedQuery, name: Option<&str>, depth: usize) {
    let indent = "  ".repeat(depth);
    let label = name.map(|name| format!(" {name}")).unwrap_or_default();
    let tables = query.referenced_tables.keys().join(", ");
    println!("{indent}{} {}{label} [{}] tables: {tables}", query.id, query.query_type, query.location);
    for error in &query.query_errors {
        println!("{indent}  ! {error}");
    }
    for (name, cte) in &query.common_table_expressions {
        print_query(cte, Some(name), depth + 1);
    }
    for subquery in &query.subqueries {
        print_query(subquery, None, depth + 1);
    }
}
