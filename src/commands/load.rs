use anyhow::{Context, Result};
use std::path::PathBuf;

use moviegraph::config::Config;
use moviegraph::loading::{load_data, DatasetPair};

pub async fn load(config: Config, pair: String, data_dir: Option<PathBuf>, json: bool) -> Result<()> {
    let pair: DatasetPair = pair.parse()?;
    let data_dir = data_dir.unwrap_or(config.paths.data_dir);

    let data = load_data(&data_dir, pair)
        .with_context(|| format!("Failed to load pair {pair} from {}", data_dir.display()))?;
    let summary = data.summary(pair);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    let (left, right) = pair.sources();
    println!("Benchmark pair: {pair}");
    println!("================================");
    println!("  {left} attribute triples:    {}", summary.attr_triples_1);
    println!("  {right} attribute triples:    {}", summary.attr_triples_2);
    println!("  {left} relationship triples: {}", summary.rel_triples_1);
    println!("  {right} relationship triples: {}", summary.rel_triples_2);
    println!("  Entity links: {}", summary.ent_links);

    for (n, (train, test, valid)) in summary.folds.iter().enumerate() {
        println!("  Fold {}: train={train} test={test} valid={valid}", n + 1);
    }

    match summary.intra_ent_links {
        Some((l, r)) => println!("  Intra links: {left}={l} {right}={r}"),
        None => println!("  Intra links: none"),
    }

    Ok(())
}
