use std::{path::PathBuf, process};
use structopt::StructOpt;
use tracing::error;
use tracing_subscriber::EnvFilter;

use sfmc_users::Client;

/// Export all Marketing Cloud account users with their roles to CSV.
#[derive(Debug, StructOpt)]
#[structopt(name = "sfmc-users")]
struct Opt {
    /// Client ID of the installed package.
    #[structopt(long, env = "SFMC_CLIENT_ID", hide_env_values = true)]
    client_id: Option<String>,
    /// Client secret of the installed package.
    #[structopt(long, env = "SFMC_CLIENT_SECRET", hide_env_values = true)]
    client_secret: Option<String>,
    /// REST endpoint to request the access token from.
    #[structopt(long, env = "SFMC_TOKEN_URL")]
    token_url: Option<String>,
    /// SOAP endpoint of your stack.
    #[structopt(long, env = "SFMC_DATA_URL")]
    data_url: Option<String>,
    /// Where to write the CSV.
    #[structopt(
        long,
        short,
        env = "SFMC_OUTPUT_FILE",
        default_value = "ExactTargetUserList.csv",
        parse(from_os_str)
    )]
    output: PathBuf,
}

async fn run(opt: Opt) -> Result<usize, sfmc_users::Error> {
    // structopt already resolved the environment, so the builder doesn't
    // need to look again.
    let mut builder = Client::builder().no_env();
    if let Some(client_id) = opt.client_id {
        builder = builder.with_client_id(client_id);
    }
    if let Some(client_secret) = opt.client_secret {
        builder = builder.with_client_secret(client_secret);
    }
    if let Some(token_url) = opt.token_url {
        builder = builder.with_token_url(token_url);
    }
    if let Some(data_url) = opt.data_url {
        builder = builder.with_data_url(data_url);
    }

    builder.build()?.export(&opt.output).await
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let opt = Opt::from_args();
    if let Err(e) = run(opt).await {
        error!("{}", e);
        process::exit(1);
    }
}
