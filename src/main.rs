//! Collection pipeline samples.
//!
//! Runs a fixed set of pipelines over small in-memory lists and prints the results to stdout.
//! Pipeline events are logged to stderr through `tracing` (`RUST_LOG=debug` to see them).

use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use collection_pipelines::execution::{Pipeline, PipelineOptions, TracingPipelineObserver};
use collection_pipelines::processing::{self, filter, map, sort_natural};
use collection_pipelines::types::{BinaryOperation, Employee};

const VALUES: [i64; 5] = [12, 13, 14, 67, 12];

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    integer_statistics()?;
    integer_ordering();
    names_starting_with_a();
    binary_operation();
    employees();

    Ok(())
}

fn options(name: &str) -> PipelineOptions {
    PipelineOptions::named(name).with_observer(Arc::new(TracingPipelineObserver))
}

fn joined<T: ToString>(items: impl IntoIterator<Item = T>) -> String {
    items
        .into_iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Renders a list the way the sample output shows it: `[AMANDA, ANA]`.
fn bracketed<T: ToString>(items: impl IntoIterator<Item = T>) -> String {
    let items: Vec<String> = items.into_iter().map(|v| v.to_string()).collect();
    format!("[{}]", items.join(", "))
}

fn integer_statistics() -> Result<()> {
    println!("Soma {}", processing::sum(VALUES));
    println!("{}", joined(VALUES));

    println!("Menor valor {}", Pipeline::with_options(VALUES, options("min")).min()?);
    println!("Maior valor {}", Pipeline::with_options(VALUES, options("max")).max()?);
    println!("Média {}", Pipeline::with_options(VALUES, options("average")).average()?);

    let sum = Pipeline::with_options(VALUES, options("sum-reduce")).reduce(0, |a, b| a + b);
    println!("Soma {sum}");

    let squares = processing::reduce(VALUES, 0, |a, b| a + b * b);
    println!("Soma dos quadrados {squares}");

    let product = processing::reduce(VALUES, 1, |a, b| a * b);
    println!("Produto {product}");

    println!("Pares ordenados");
    let evens: Vec<i64> = Pipeline::with_options(VALUES, options("evens"))
        .filter(|v| v % 2 == 0)
        .sorted()
        .collect();
    println!("{}", joined(evens));

    println!("Impares multiplicados por dez");
    let odds: Vec<i64> = Pipeline::with_options(VALUES, options("odds-times-ten"))
        .filter(|v| v % 2 != 0)
        .map(|v| v * 10)
        .sorted()
        .collect();
    println!("{}", joined(odds));

    Ok(())
}

fn integer_ordering() {
    println!("Valores originais");
    println!("Valores originais: {}", bracketed(VALUES));
    println!("Valores ordenados {}", bracketed(sort_natural(VALUES)));

    println!("Valores ordenados");
    let sorted: Vec<i64> = Pipeline::with_options(VALUES, options("sorted")).sorted().collect();
    println!("{}", joined(sorted));

    println!("Valores maiores que 20");
    Pipeline::with_options(VALUES, options("over-twenty"))
        .filter(|v| *v > 20)
        .for_each(|v| println!("{v}"));

    println!("Valores impares ordenados");
    let odds_desc: Vec<i64> = Pipeline::with_options(VALUES, options("odds-descending"))
        .filter(|v| v % 2 != 0)
        .sorted_by(|a, b| b.cmp(a))
        .collect();
    println!("{}", joined(odds_desc));
}

fn names_starting_with_a() {
    let names = ["Ana", "Marcos", "Carlos", "Beatriz", "Amanda"];
    let upper = map(filter(names, |n| n.starts_with('A')), str::to_uppercase);
    println!("{}", bracketed(sort_natural(upper)));
}

fn binary_operation() {
    let sum = |a: i64, b: i64| a + b;
    println!("Soma de 5 e 3: {}", sum.apply(5, 3));
}

fn employees() {
    let staff = vec![
        Employee::new(1, "Ana", 1200.00, "TI"),
        Employee::new(2, "Carlos", 1500.0, "Comercial"),
        Employee::new(3, "Beatriz", 2000.0, "Financeiro"),
        Employee::new(4, "Marcos", 1800.00, "TI"),
        Employee::new(5, "Tereza", 3000.00, "TI"),
    ];

    println!("Dados de todos os empregados");
    staff.iter().for_each(|e| println!("{e}"));

    println!("Dados dos empregados do departamento TI");
    Pipeline::with_options(&staff, options("department-ti"))
        .filter(|e| e.works_in("TI"))
        .for_each(|e| println!("{e}"));

    println!("Dados dos empregados que recebem acima de 2000 em ordem por nome de funcionarios");
    Pipeline::with_options(&staff, options("high-earners"))
        .filter(|e| e.salary >= 2000.0)
        .sorted_by(|a, b| b.name.cmp(&a.name))
        .for_each(|e| println!("{e}"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bracketed_lists_have_no_quotes() {
        let names = map(filter(["Ana", "Marcos", "Amanda"], |n| n.starts_with('A')), str::to_uppercase);
        assert_eq!(bracketed(sort_natural(names)), "[AMANDA, ANA]");
        assert_eq!(bracketed(Vec::<i64>::new()), "[]");
    }

    #[test]
    fn sorted_values_render_space_separated() {
        assert_eq!(bracketed(VALUES), "[12, 13, 14, 67, 12]");
        assert_eq!(joined(sort_natural(VALUES)), "12 12 13 14 67");
    }
}
