use clap::Parser;
use rebus_core::TopicChoice;

/// Used when neither the location hash nor the build environment name an API base.
pub(crate) const DEFAULT_API_BASE: &str = "api";

/// Build-time override for the API base, e.g. `REBUS_API_BASE_URL=https://host/v1 trunk build`.
const BUILD_API_BASE: Option<&str> = option_env!("REBUS_API_BASE_URL");

/// Runtime options, read from the location hash: `#-vv&--topic=Time Travel&--api-base=http://localhost:8000`.
#[derive(Parser, Debug, Default)]
#[command(version, about, long_about = None)]
pub(crate) struct Args {
    /// What log level to use
    #[command(flatten)]
    pub(crate) verbose: clap_verbosity_flag::Verbosity,

    /// Always ask for this topic instead of a random one
    #[arg(short, long)]
    pub(crate) topic: Option<String>,

    /// Base URL of the puzzle API
    #[arg(long)]
    pub(crate) api_base: Option<String>,
}

impl Args {
    /// `hash` is expected to be percent-decoded already.
    pub(crate) fn from_location_hash(hash: &str) -> Result<Self, clap::Error> {
        Self::try_parse_from(hash.split(['#', '&']))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ClientConfig {
    pub(crate) api_base: String,
    pub(crate) topic: TopicChoice,
}

impl ClientConfig {
    pub(crate) fn from_args(args: &Args) -> Self {
        Self::resolve(args.api_base.clone(), BUILD_API_BASE, args.topic.clone())
    }

    fn resolve(arg: Option<String>, build: Option<&str>, topic: Option<String>) -> Self {
        let api_base = arg
            .filter(|base| !base.trim().is_empty())
            .or_else(|| build.filter(|base| !base.trim().is_empty()).map(str::to_string))
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        Self {
            api_base,
            topic: TopicChoice::from_option(topic),
        }
    }
}
