use clap::Args;

use propbox::lines::LineMode;
use propbox_app::checkout::{self, CheckoutQuote};

use crate::cli::{SessionArgs, rupees};

#[derive(Debug, Args)]
pub(crate) struct QuoteArgs {
    #[command(flatten)]
    session: SessionArgs,

    /// Quote a single prop instead of the cart
    #[arg(long)]
    prop_id: Option<String>,

    /// Purchase quantity for a single-prop quote
    #[arg(long, conflicts_with = "rental_days")]
    quantity: Option<u32>,

    /// Rental duration in days for a single-prop quote
    #[arg(long)]
    rental_days: Option<u32>,
}

pub(crate) async fn run(args: QuoteArgs) -> Result<(), String> {
    let (ctx, session) = args.session.connect()?;

    let quote = match args.prop_id {
        Some(prop_id) => {
            let mode = line_mode(args.quantity, args.rental_days);

            checkout::buy_now_quote(&ctx, &session, &prop_id.into(), mode)
                .await
                .map_err(|error| format!("failed to quote prop: {error}"))?
        }
        None => checkout::cart_quote(&ctx, &session)
            .await
            .map_err(|error| format!("failed to quote cart: {error}"))?,
    };

    print_quote(&quote);

    Ok(())
}

pub(crate) fn line_mode(quantity: Option<u32>, rental_days: Option<u32>) -> LineMode {
    match rental_days {
        Some(days) => LineMode::Rental { days },
        None => LineMode::Purchase {
            quantity: quantity.unwrap_or(1),
        },
    }
}

pub(crate) fn print_quote(quote: &CheckoutQuote) {
    for line in &quote.lines {
        let mode = match line.mode {
            LineMode::Purchase { quantity } => format!("buy x{quantity}"),
            LineMode::Rental { days } => format!("rent {days}d"),
        };

        println!("{} ({mode}): {}", line.prop_name, rupees(line.total_price));
    }

    println!("subtotal: {}", rupees(quote.subtotal));
    println!("delivery: {}", rupees(quote.delivery_fee));
    println!("total: {}", rupees(quote.total));
}
