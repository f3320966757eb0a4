use clap::Args;
use reqwest::Url;

use propbox_app::checkout::reconcile::{self, PaymentReturn, ReturnOutcome};

use crate::cli::SessionArgs;

#[derive(Debug, Args)]
pub(crate) struct PaymentReturnArgs {
    #[command(flatten)]
    session: SessionArgs,

    /// The full return URL the payment provider redirected to
    #[arg(long)]
    url: String,
}

pub(crate) async fn run(args: PaymentReturnArgs) -> Result<(), String> {
    let url = Url::parse(&args.url).map_err(|error| format!("invalid return URL: {error}"))?;
    let request = PaymentReturn::from_return_url(&url);

    let (ctx, session) = args.session.connect()?;

    let outcome = reconcile::reconcile(&ctx, Some(&session), &request)
        .await
        .map_err(|error| format!("payment return failed: {error}"))?;

    match outcome {
        ReturnOutcome::AlreadyPlaced { payment_intent } => {
            println!("order already placed for payment {payment_intent}");
        }
        ReturnOutcome::Placed {
            order,
            cart_cleared,
        } => {
            println!("order confirmed: {}", order.id);

            if !cart_cleared {
                println!("warning: cart could not be cleared; clear it manually");
            }
        }
    }

    Ok(())
}
