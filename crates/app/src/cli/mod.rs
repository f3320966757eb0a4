use clap::{Args, Parser, Subcommand};

use propbox_app::{
    config::ApiConfig,
    context::AppContext,
    session::{BearerToken, Session},
};

mod cart;
mod checkout;
mod payment_return;
mod quote;

#[derive(Debug, Parser)]
#[command(name = "propbox", about = "PropBox storefront CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Quote(quote::QuoteArgs),
    Checkout(checkout::CheckoutArgs),
    Cart(cart::CartCommand),
    PaymentReturn(payment_return::PaymentReturnArgs),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Quote(args) => quote::run(args).await,
            Commands::Checkout(args) => checkout::run(args).await,
            Commands::Cart(command) => cart::run(command).await,
            Commands::PaymentReturn(args) => payment_return::run(args).await,
        }
    }
}

#[derive(Debug, Args)]
pub(crate) struct SessionArgs {
    /// Storefront API base URL
    #[arg(long, env = "PROPBOX_API_URL")]
    base_url: String,

    /// Customer user id
    #[arg(long, env = "PROPBOX_USER_ID")]
    user_id: String,

    /// Bearer token for the storefront API
    #[arg(long, env = "PROPBOX_API_TOKEN", hide_env_values = true)]
    token: String,
}

impl SessionArgs {
    pub(crate) fn connect(self) -> Result<(AppContext, Session), String> {
        let ctx = AppContext::from_config(ApiConfig::new(self.base_url))
            .map_err(|error| format!("failed to initialise HTTP client: {error}"))?;
        let session = Session::new(self.user_id.into(), BearerToken::new(self.token));

        Ok((ctx, session))
    }
}

/// Format a minor-unit amount as rupees.
pub(crate) fn rupees(minor: u64) -> String {
    format!("Rs {}.{:02}", minor / 100, minor % 100)
}
