mod output;

use agi_client::{blocking, PlaceSearchRequest, RestClient, ReverseSearchRequest, SoapClient};
use agi_core::{AgiConfig, SearchResult};
use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "agi-cli")]
#[command(about = "Address Geocode International command line client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Forward geocode an address or place
    PlaceSearch {
        #[command(flatten)]
        call: CallOptions,
        #[command(flatten)]
        request: PlaceSearchArgs,
    },
    /// Reverse geocode a coordinate pair
    ReverseSearch {
        #[command(flatten)]
        call: CallOptions,
        #[command(flatten)]
        request: ReverseSearchArgs,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Binding {
    Rest,
    Soap,
}

#[derive(Debug, Args)]
struct CallOptions {
    /// Transport binding
    #[arg(long, value_enum, env = "AGI_BINDING", default_value_t = Binding::Rest)]
    binding: Binding,
    /// Use the blocking client instead of the async one
    #[arg(long)]
    blocking: bool,
}

#[derive(Debug, Args)]
struct PlaceSearchArgs {
    /// Whole address on one line, e.g. "17 Battery Place, New York, NY 10004"
    #[arg(long, default_value = "")]
    single_line: String,
    #[arg(long, default_value = "")]
    address1: String,
    #[arg(long, default_value = "")]
    address2: String,
    #[arg(long, default_value = "")]
    address3: String,
    #[arg(long, default_value = "")]
    address4: String,
    #[arg(long, default_value = "")]
    address5: String,
    #[arg(long, default_value = "")]
    locality: String,
    #[arg(long, default_value = "")]
    administrative_area: String,
    #[arg(long, default_value = "")]
    postal_code: String,
    #[arg(long, default_value = "")]
    country: String,
    #[arg(long, default_value = "")]
    boundaries: String,
    #[arg(long, default_value = "")]
    max_results: String,
    #[arg(long, default_value = "")]
    search_type: String,
    #[arg(long, default_value = "")]
    extras: String,
}

impl From<PlaceSearchArgs> for PlaceSearchRequest {
    fn from(a: PlaceSearchArgs) -> Self {
        Self {
            single_line: a.single_line,
            address1: a.address1,
            address2: a.address2,
            address3: a.address3,
            address4: a.address4,
            address5: a.address5,
            locality: a.locality,
            administrative_area: a.administrative_area,
            postal_code: a.postal_code,
            country: a.country,
            boundaries: a.boundaries,
            max_results: a.max_results,
            search_type: a.search_type,
            extras: a.extras,
        }
    }
}

#[derive(Debug, Args)]
struct ReverseSearchArgs {
    #[arg(long, allow_hyphen_values = true)]
    latitude: String,
    #[arg(long, allow_hyphen_values = true)]
    longitude: String,
    /// Search radius in kilometres
    #[arg(long, default_value = "")]
    search_radius: String,
    #[arg(long, default_value = "")]
    country: String,
    #[arg(long, default_value = "")]
    max_results: String,
    #[arg(long, default_value = "")]
    search_type: String,
}

impl From<ReverseSearchArgs> for ReverseSearchRequest {
    fn from(a: ReverseSearchArgs) -> Self {
        Self {
            latitude: a.latitude,
            longitude: a.longitude,
            search_radius: a.search_radius,
            country: a.country,
            max_results: a.max_results,
            search_type: a.search_type,
        }
    }
}

/// A parsed request for either operation.
enum Request {
    Place(PlaceSearchRequest),
    Reverse(ReverseSearchRequest),
}

// Not `#[tokio::main]`: the blocking clients own their runtime and panic if
// started inside another one.
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = agi_core::load_agi_config().context("failed to load AGI configuration")?;
    init_tracing(&config.log_level)?;
    if config.license_key.is_empty() {
        tracing::warn!("AGI_LICENSE_KEY is not set; the service will reject the call");
    }

    let (call, request) = match cli.command {
        Commands::PlaceSearch { call, request } => {
            let request = PlaceSearchRequest::from(request);
            print!("{}", output::render_place_input(&request, &config));
            (call, Request::Place(request))
        }
        Commands::ReverseSearch { call, request } => {
            let request = ReverseSearchRequest::from(request);
            print!("{}", output::render_reverse_input(&request, &config));
            (call, Request::Reverse(request))
        }
    };

    tracing::info!(binding = ?call.binding, blocking = call.blocking, mode = %config.mode, "calling AGI");
    let result = if call.blocking {
        run_blocking(&config, call.binding, &request)?
    } else {
        tokio::runtime::Runtime::new()
            .context("failed to start tokio runtime")?
            .block_on(run_async(&config, call.binding, &request))?
    };

    print!("{}", output::render_result(&result));
    Ok(())
}

fn init_tracing(default_level: &str) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

async fn run_async(
    config: &AgiConfig,
    binding: Binding,
    request: &Request,
) -> anyhow::Result<SearchResult> {
    let result = match binding {
        Binding::Rest => {
            let client = RestClient::new(config)?;
            match request {
                Request::Place(r) => client.place_search(r).await?,
                Request::Reverse(r) => client.reverse_search(r).await?,
            }
        }
        Binding::Soap => {
            let client = SoapClient::new(config)?;
            match request {
                Request::Place(r) => client.place_search(r).await?,
                Request::Reverse(r) => client.reverse_search(r).await?,
            }
        }
    };
    Ok(result)
}

fn run_blocking(
    config: &AgiConfig,
    binding: Binding,
    request: &Request,
) -> anyhow::Result<SearchResult> {
    let result = match binding {
        Binding::Rest => {
            let client = blocking::RestClient::new(config)?;
            match request {
                Request::Place(r) => client.place_search(r)?,
                Request::Reverse(r) => client.reverse_search(r)?,
            }
        }
        Binding::Soap => {
            let client = blocking::SoapClient::new(config)?;
            match request {
                Request::Place(r) => client.place_search(r)?,
                Request::Reverse(r) => client.reverse_search(r)?,
            }
        }
    };
    Ok(result)
}

#[cfg(test)]
mod tests;
