use clap::Parser;
use dining_concierge::utils::{logger, validation::Validate};
use dining_concierge::{
    CliConfig, ConciergeError, Credentials, OpenAiClient, Orchestrator, PlacesClient, RunOutcome,
    SearchQuery, YelpClient,
};

fn fail(e: ConciergeError) -> ! {
    tracing::error!("❌ {}", e);
    eprintln!("❌ {}", e.user_friendly_message());
    std::process::exit(e.exit_code());
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting dining-concierge");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        fail(e);
    }

    // Credentials are resolved once, before any run; a missing key fails fast.
    let credentials = Credentials::from_env().unwrap_or_else(|e| fail(e));

    let directory = YelpClient::new(credentials.yelp_api_key.clone()).unwrap_or_else(|e| fail(e));
    let places = PlacesClient::new(credentials.google_api_key.clone()).unwrap_or_else(|e| fail(e));
    let generator =
        OpenAiClient::new(credentials.openai_api_key.clone()).unwrap_or_else(|e| fail(e));
    let orchestrator = Orchestrator::new(directory, places, generator, config.concurrent_requests);

    let query = SearchQuery::new(config.location.clone(), config.preferences.clone())
        .with_limit(config.limit);

    println!("🍽️ Luxury Restaurant Recommender 🍷");
    println!("🔍 Searching top restaurants in {}...", config.location);

    match orchestrator.run(&query).await {
        Ok(RunOutcome::Done(text)) => {
            tracing::info!("✅ Recommendation run completed");
            println!("\n🧠 Refined recommendations:\n");
            println!("{}", text);
        }
        Ok(RunOutcome::NoResults) => {
            tracing::info!("Run finished with no directory results");
            println!(
                "\nNo restaurants found for \"{}\". Try a different destination.",
                config.location
            );
        }
        Err(e) => fail(e),
    }

    Ok(())
}
