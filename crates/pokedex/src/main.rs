use pokedex::domain::a001_pokemon::{ListStatus, PokeApiClient, PokemonAggregator, PokemonListState};
use pokedex::shared::config;
use pokedex::shared::state::AppGlobalContext;
use clap::Parser;
use std::sync::Arc;

/// Список покемонов из PokeAPI с поиском и локализацией
#[derive(Debug, Parser)]
#[command(name = "pokedex", version)]
struct Args {
    /// Строка поиска (имя, номер или тип)
    search: Option<String>,

    /// Язык отображения, например `de`
    #[arg(long)]
    lang: Option<String>,

    /// Загрузить все страницы листинга
    #[arg(long)]
    all: bool,

    /// Показать одного покемона по имени
    #[arg(long)]
    name: Option<String>,
}

impl Args {
    /// Язык из командной строки важнее языка из конфигурации
    fn language<'a>(&'a self, config: &'a config::Config) -> &'a str {
        self.lang.as_deref().unwrap_or(&config.list.default_language)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    // Создаем директорию для логов
    let log_dir = std::path::Path::new("target").join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("pokedex.log"))?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,reqwest=warn,hyper=warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::sync::Arc::new(log_file))
                .with_ansi(false),
        )
        .init();

    let config = config::load_config()?;

    let api = PokeApiClient::from_config(&config.api)
        .map_err(|e| anyhow::anyhow!("HTTP client init failed: {e}"))?;
    let aggregator = PokemonAggregator::new(api);

    let ctx = AppGlobalContext::new(args.language(&config));

    if let Some(name) = args.name {
        let language = ctx.language();
        match aggregator.fetch_by_name(&name, Some(&language)).await {
            Some(pokemon) => println!("{}", serde_json::to_string_pretty(&pokemon)?),
            None => println!("Pokémon '{}' not found", name),
        }
        ctx.shutdown();
        return Ok(());
    }

    let list = Arc::new(PokemonListState::new(
        aggregator,
        config.list.page_size,
        &ctx.language(),
    ));
    let _language_sub = list.follow_language(&ctx);

    let loaded = if args.all {
        list.load_all().await
    } else {
        list.load_initial().await
    };
    if let Err(e) = loaded {
        tracing::error!("{}", e);
    }

    if let Some(term) = args.search {
        ctx.update_search_term(term);
    }

    match list.status() {
        ListStatus::Failed { message } => eprintln!("{}", message),
        _ => {
            for pokemon in list.visible(&ctx.search_term()) {
                println!(
                    "#{:<4} {:<16} {:<16} {} ({})",
                    pokemon.id.value(),
                    pokemon.localized_name,
                    pokemon.localized_types.join("/"),
                    pokemon.primary_type,
                    pokemon.type_color
                );
            }
            if let Some(total) = list.total_count() {
                println!("{} of {} loaded", list.len(), total);
            }
        }
    }

    ctx.shutdown();
    Ok(())
}
