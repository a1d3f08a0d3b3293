pub mod cli;
pub mod config;
pub mod dataset;
pub mod dedup;
pub mod domain;
pub mod errors;
pub mod normalization;
pub mod ranking;
pub mod report;

use std::io;
use std::path::Path;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use cli::Cli;
use log::info;

use crate::cli::{AliasArgs, Command, InputArgs, RankingArgs};
use crate::config::AppConfig;
use crate::dedup::ContestDeduplicator;
use crate::domain::RankedEntry;
use crate::normalization::{AliasTable, NameNormalizer};
use crate::ranking::RankingEngine;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_rank(input: &InputArgs, output: Option<&Path>, ranking: &RankingArgs) -> Result<()> {
    let mut config = app_config(&input.aliases);
    config.ranking = ranking.to_config();
    config.dataset = input.dataset_settings();

    let ranked = rank_file(&input.input, &config)?;
    report::print_leaderboard(&ranked);

    if let Some(path) = output {
        report::write_leaderboard_csv(path, &ranked)?;
    }
    Ok(())
}

pub fn handle_dedup(input: &InputArgs, output: &Path) -> Result<()> {
    let mut config = app_config(&input.aliases);
    config.dataset = input.dataset_settings();

    let deduplicator = ContestDeduplicator::new(NameNormalizer::new(load_alias_table(&config)?));
    let records = dataset::load_records(&input.input, &config.dataset)?;
    let deduped = deduplicator.deduplicate(&records);
    dataset::write_records(output, &deduped)
}

pub fn handle_normalize(names: &[String], aliases: &AliasArgs) -> Result<()> {
    let config = app_config(aliases);
    let normalizer = NameNormalizer::new(load_alias_table(&config)?);

    for name in names {
        println!("{}\t{}", name, normalizer.normalize(name));
    }
    Ok(())
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut io::stdout());
    Ok(())
}

/// Loads, filters and ranks one dataset file
pub fn rank_file<P: AsRef<Path>>(path: P, config: &AppConfig) -> Result<Vec<RankedEntry>> {
    let normalizer = NameNormalizer::new(load_alias_table(config)?);
    let engine = RankingEngine::new(config.ranking.clone(), normalizer)?;
    info!("Ranking against reference year {}", engine.reference_year());

    let records = dataset::load_records(path, &config.dataset)?;
    Ok(engine.compute(&records))
}

/// Built-in rules first (unless disabled), then rules from the alias file if one is set
pub fn load_alias_table(config: &AppConfig) -> Result<AliasTable> {
    let mut table = if config.default_aliases {
        AliasTable::builtin()
    } else {
        AliasTable::empty()
    };

    if let Some(path) = &config.aliases_path {
        table.extend(AliasTable::from_json_file(path)?);
    }
    Ok(table)
}

fn app_config(aliases: &AliasArgs) -> AppConfig {
    let mut config = AppConfig::new();
    if let Some(path) = &aliases.aliases {
        config.aliases_path = Some(path.clone());
    }
    config.default_aliases = !aliases.no_default_aliases;
    config
}
