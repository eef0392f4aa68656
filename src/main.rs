use anyhow::{Context, Result};
use clap::Parser;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use passim::{
    CancellationToken, Category, CategoryFilter, Corpus, Language, SearchConfig, SearchEvent,
    SearchOptions, SearchOrchestrator, SearchState,
};

mod cli;
use cli::display::{paint, row, section_bot, section_mid, section_top, Color};
use cli::{Cli, Commands};

fn main() {
    // Logs go to stderr; stdout carries results
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Search {
            corpus,
            query,
            strict,
            single,
            languages,
            categories,
            config,
            json,
            timeout_ms,
        } => SearchArgs {
            corpus: &corpus,
            query: &query,
            strict,
            single,
            languages: &languages,
            categories: &categories,
            config: config.as_deref(),
            json,
            timeout_ms,
        }
        .run(),
        Commands::Inspect { corpus } => run_inspect(&corpus),
    };

    if let Err(e) = result {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

struct SearchArgs<'a> {
    corpus: &'a Path,
    query: &'a str,
    strict: bool,
    single: bool,
    languages: &'a [String],
    categories: &'a [String],
    config: Option<&'a Path>,
    json: bool,
    timeout_ms: Option<u64>,
}

impl SearchArgs<'_> {
    fn options(&self) -> Result<SearchOptions> {
        let mut options = SearchOptions {
            strict: self.strict,
            single_result_per_document: self.single,
            ..SearchOptions::default()
        };
        if !self.languages.is_empty() {
            options.languages = self
                .languages
                .iter()
                .map(|l| l.parse::<Language>())
                .collect::<passim::Result<_>>()?;
        }
        let categories = self
            .categories
            .iter()
            .map(|c| c.parse::<Category>())
            .collect::<passim::Result<Vec<_>>>()?;
        options.categories = CategoryFilter::only(categories);
        Ok(options)
    }

    fn run(&self) -> Result<()> {
        let config = SearchConfig::load(self.config).context("Failed to load config")?;
        let corpus = Corpus::from_path(self.corpus)
            .with_context(|| format!("Failed to read corpus {}", self.corpus.display()))?;
        let options = self.options()?;
        let highlight = config.highlight();

        let token = CancellationToken::new();
        if let Some(ms) = self.timeout_ms {
            let timer = token.clone();
            std::thread::spawn(move || {
                std::thread::sleep(Duration::from_millis(ms));
                timer.cancel();
            });
        }

        #[cfg(feature = "parallel")]
        let progress = (!self.json && atty::is(atty::Stream::Stderr)).then(|| {
            let pb = indicatif::ProgressBar::new(0);
            pb.set_style(cli::display::progress_style());
            pb.set_prefix("Searching");
            pb
        });

        let json = self.json;
        let mut orchestrator = SearchOrchestrator::new(config);
        let outcome = orchestrator.start(&corpus, self.query, &options, &token, |event| {
            match event {
                SearchEvent::Result(result) if json => match serde_json::to_string(&result) {
                    Ok(line) => println!("{}", line),
                    Err(e) => tracing::warn!(error = %e, "failed to serialize result"),
                },
                SearchEvent::Result(result) => {
                    #[cfg(feature = "parallel")]
                    if let Some(pb) = &progress {
                        pb.suspend(|| cli::display::print_result(&result, &highlight));
                        return;
                    }
                    cli::display::print_result(&result, &highlight);
                }
                SearchEvent::Progress(p) => {
                    #[cfg(feature = "parallel")]
                    if let Some(pb) = &progress {
                        pb.set_length(p.total as u64);
                        pb.set_position(p.completed as u64);
                    }
                    #[cfg(not(feature = "parallel"))]
                    let _ = p;
                }
            }
        });

        #[cfg(feature = "parallel")]
        if let Some(pb) = &progress {
            pb.finish_and_clear();
        }

        if outcome.state == SearchState::Stopped {
            eprintln!(
                "⚠️  Search stopped after {}/{} units",
                outcome.progress.completed, outcome.progress.total
            );
        }
        if outcome.results == 0 && !self.json {
            println!("No results found");
        }
        Ok(())
    }
}

fn run_inspect(path: &Path) -> Result<()> {
    let corpus = Corpus::from_path(path)
        .with_context(|| format!("Failed to read corpus {}", path.display()))?;

    section_top(&path.display().to_string());
    for (i, language) in Language::ALL.into_iter().enumerate() {
        let documents = corpus.documents(language);
        if i > 0 {
            section_mid(language.as_str());
        } else {
            row(&format!(" {}", paint(Color::Heading, true, language.as_str())));
        }

        let segments: usize = documents.iter().map(|d| d.body.len()).sum();
        let with_commentary = documents.iter().filter(|d| d.has_commentary()).count();
        let comments: usize = documents
            .iter()
            .filter_map(|d| d.commentary.as_ref())
            .map(|c| c.len())
            .sum();
        row(&format!("   Documents:        {:>8}", documents.len()));
        row(&format!("   Segments:         {:>8}", segments));
        row(&format!(
            "   With commentary:  {:>8}  {}",
            with_commentary,
            paint(Color::Muted, false, &format!("({} comment lines)", comments))
        ));

        let mut by_category: BTreeMap<String, usize> = BTreeMap::new();
        for doc in documents {
            let name = Category::of(&doc.id).map_or_else(|| "other".to_string(), |c| c.to_string());
            *by_category.entry(name).or_default() += 1;
        }
        for (name, count) in by_category {
            row(&format!("     {:<6}          {:>8}", name, count));
        }
    }
    section_bot();
    Ok(())
}
