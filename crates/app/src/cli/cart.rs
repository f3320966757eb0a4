use clap::{Args, Subcommand};

use propbox::lines::LineMode;
use propbox_app::{
    context::AppContext,
    domain::carts::models::{CartLineId, CartLineUpdate, stepped_quantity, stepped_rental_days},
    session::Session,
};

use crate::cli::{SessionArgs, rupees};

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(flatten)]
    session: SessionArgs,

    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// List the cart's lines and totals
    Show,
    /// Step a line's quantity or rental duration
    Update(UpdateArgs),
    /// Remove a line from the cart
    Remove(RemoveArgs),
    /// Remove every line from the cart
    Clear,
}

#[derive(Debug, Args)]
struct UpdateArgs {
    /// Cart line id
    #[arg(long)]
    line_id: String,

    /// Quantity steps to apply, negative to decrease
    #[arg(long, allow_hyphen_values = true, conflicts_with = "weeks")]
    steps: Option<i32>,

    /// Rental weeks to add, negative to remove
    #[arg(long, allow_hyphen_values = true)]
    weeks: Option<i32>,
}

#[derive(Debug, Args)]
struct RemoveArgs {
    /// Cart line id
    #[arg(long)]
    line_id: String,
}

pub(crate) async fn run(command: CartCommand) -> Result<(), String> {
    let (ctx, session) = command.session.connect()?;

    match command.command {
        CartSubcommand::Show => show(&ctx, &session).await,
        CartSubcommand::Update(args) => update(&ctx, &session, args).await,
        CartSubcommand::Remove(args) => remove(&ctx, &session, args).await,
        CartSubcommand::Clear => clear(&ctx, &session).await,
    }
}

async fn show(ctx: &AppContext, session: &Session) -> Result<(), String> {
    let lines = ctx
        .carts
        .cart_lines(session)
        .await
        .map_err(|error| format!("failed to load cart: {error}"))?;

    if lines.is_empty() {
        println!("cart is empty");

        return Ok(());
    }

    for line in &lines {
        let mode = match line.mode {
            LineMode::Purchase { quantity } => format!("buy x{quantity}"),
            LineMode::Rental { days } => format!("rent {days}d"),
        };

        println!(
            "{} {} ({mode}): {}",
            line.id,
            line.prop_name,
            rupees(line.total_price)
        );
    }

    Ok(())
}

async fn update(ctx: &AppContext, session: &Session, args: UpdateArgs) -> Result<(), String> {
    let line_id = CartLineId::new(args.line_id);

    let lines = ctx
        .carts
        .cart_lines(session)
        .await
        .map_err(|error| format!("failed to load cart: {error}"))?;

    let line = lines
        .iter()
        .find(|line| line.id == line_id)
        .ok_or_else(|| format!("no cart line {line_id}"))?;

    let change = match (args.steps, args.weeks, line.mode) {
        (Some(steps), _, LineMode::Purchase { quantity }) => {
            CartLineUpdate::Quantity(stepped_quantity(quantity, steps))
        }
        (_, Some(weeks), LineMode::Rental { days }) => {
            CartLineUpdate::RentalDays(stepped_rental_days(days, weeks))
        }
        (Some(_), _, LineMode::Rental { .. }) => {
            return Err("line is a rental; use --weeks".to_string());
        }
        (_, Some(_), LineMode::Purchase { .. }) => {
            return Err("line is a purchase; use --steps".to_string());
        }
        (None, None, _) => return Err("nothing to change; pass --steps or --weeks".to_string()),
    };

    let updated = ctx
        .carts
        .update_line(session, &line_id, change)
        .await
        .map_err(|error| format!("failed to update line: {error}"))?;

    println!("{}: {}", updated.prop_name, rupees(updated.total_price));

    Ok(())
}

async fn remove(ctx: &AppContext, session: &Session, args: RemoveArgs) -> Result<(), String> {
    let line_id = CartLineId::new(args.line_id);

    ctx.carts
        .remove_line(session, &line_id)
        .await
        .map_err(|error| format!("failed to remove line: {error}"))?;

    println!("removed {line_id}");

    Ok(())
}

async fn clear(ctx: &AppContext, session: &Session) -> Result<(), String> {
    ctx.carts
        .clear_cart(session)
        .await
        .map_err(|error| format!("failed to clear cart: {error}"))?;

    println!("cart cleared");

    Ok(())
}
