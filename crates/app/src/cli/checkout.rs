use clap::{Args, ValueEnum};

use propbox_app::{
    checkout::{self, CheckoutOutcome},
    domain::orders::models::PaymentMethod,
};

use crate::cli::{SessionArgs, quote, rupees};

#[derive(Debug, Args)]
pub(crate) struct CheckoutArgs {
    #[command(flatten)]
    session: SessionArgs,

    /// How the order is paid
    #[arg(long, value_enum, default_value_t = Method::Cod)]
    method: Method,

    /// Check out a single prop directly instead of the cart
    #[arg(long)]
    prop_id: Option<String>,

    /// Purchase quantity for a direct checkout
    #[arg(long, conflicts_with = "rental_days", requires = "prop_id")]
    quantity: Option<u32>,

    /// Rental duration in days for a direct checkout
    #[arg(long, requires = "prop_id")]
    rental_days: Option<u32>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Method {
    Cod,
    Online,
}

pub(crate) async fn run(args: CheckoutArgs) -> Result<(), String> {
    let (ctx, session) = args.session.connect()?;

    let quote = match args.prop_id {
        Some(prop_id) => {
            let mode = quote::line_mode(args.quantity, args.rental_days);

            checkout::buy_now_quote(&ctx, &session, &prop_id.into(), mode)
                .await
                .map_err(|error| format!("failed to quote prop: {error}"))?
        }
        None => checkout::cart_quote(&ctx, &session)
            .await
            .map_err(|error| format!("failed to quote cart: {error}"))?,
    };

    let method = match args.method {
        Method::Cod => PaymentMethod::Cod,
        Method::Online => PaymentMethod::Online,
    };

    let outcome = checkout::checkout(&ctx, &session, &quote, method)
        .await
        .map_err(|error| format!("checkout failed: {error}"))?;

    match outcome {
        CheckoutOutcome::Placed(order) => {
            println!("order placed: {}", order.id);
            println!("total: {}", rupees(quote.total));
        }
        CheckoutOutcome::PaymentRedirect(session_id) => {
            println!("complete payment at hosted session: {session_id}");
        }
    }

    Ok(())
}
