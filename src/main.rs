use std::io::{BufRead, Write};
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pravka::cli::{Cli, Commands};
use pravka::config::Config;
use pravka::correction::SpellCorrector;
use pravka::customdict::{CustomDictStore, FileStore};
use pravka::morphology::{MorphAnalyzer, TableMorphAnalyzer};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::new(if cli.debug { "pravka=debug" } else { "pravka=info" })
            }),
        )
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load_or_default(&config_path)
        .with_context(|| format!("loading config from {}", config_path.display()))?
        .with_env_overrides();

    if let Some(path) = cli.dictionary {
        config.dictionary.path = path;
    }
    if let Some(path) = cli.morphology {
        config.dictionary.morphology = Some(path);
    }
    if let Some(path) = cli.custom_words {
        config.dictionary.custom_words = Some(path);
    }

    // a broken analyser or store only degrades the engine; the
    // dictionary below stays fatal
    let analyzer: Option<Arc<dyn MorphAnalyzer>> =
        config.dictionary.morphology.as_ref().and_then(|path| {
            match TableMorphAnalyzer::from_file(path) {
                Ok(analyzer) => Some(Arc::new(analyzer) as Arc<dyn MorphAnalyzer>),
                Err(e) => {
                    tracing::warn!(error = %e, "morphology unavailable, continuing without it");
                    None
                }
            }
        });

    let store: Option<Box<dyn CustomDictStore>> =
        config.dictionary.custom_words.as_ref().and_then(|path| {
            match FileStore::open(path) {
                Ok(store) => Some(Box::new(store) as Box<dyn CustomDictStore>),
                Err(e) => {
                    tracing::warn!(error = %e, "custom word store unavailable, starting empty");
                    None
                }
            }
        });

    let corrector = SpellCorrector::new(
        config.corrector.clone(),
        &config.dictionary.path,
        analyzer,
        store,
    )
    .with_context(|| format!("loading dictionary from {}", config.dictionary.path.display()))?;

    match cli.command {
        Some(Commands::Correct { text, json }) => {
            let result = corrector.correct_text(&text, cli.debug);
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_result(&result);
            }
        }
        Some(Commands::Repl) | None => repl(&corrector, cli.debug)?,
        Some(Commands::AddWord { word }) => {
            corrector.add_custom_word(&word)?;
            println!("added: {}", word.to_lowercase());
        }
        Some(Commands::RemoveWord { word }) => {
            corrector.remove_custom_word(&word)?;
            println!("removed: {}", word.to_lowercase());
        }
    }

    Ok(())
}

fn repl(corrector: &SpellCorrector, debug: bool) -> anyhow::Result<()> {
    println!("pravka. Введите текст (quit для выхода).");
    let stdin = std::io::stdin();
    loop {
        print!("Текст: ");
        std::io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        if input.eq_ignore_ascii_case("quit") {
            break;
        }
        if input.is_empty() {
            continue;
        }
        let result = corrector.correct_text(input, debug);
        print_result(&result);
        println!("{}", "-".repeat(50));
    }
    Ok(())
}

fn print_result(result: &pravka::CorrectionResult) {
    println!("Исходный:     {}", result.original);
    println!("Исправленный: {}", result.corrected);
    if !result.detailed_suggestions.is_empty() {
        println!("\nПредложения:");
        let mut positions: Vec<_> = result.detailed_suggestions.iter().collect();
        positions.sort_by_key(|(pos, _)| **pos);
        for (pos, info) in positions {
            println!(
                "  Позиция {}: '{}' -> [{}] ({})",
                pos,
                info.token,
                info.suggestions.join(", "),
                match info.decision {
                    pravka::Decision::AutoReplace => "auto_replace",
                    pravka::Decision::HintOnly => "hint_only",
                }
            );
        }
    }
}
