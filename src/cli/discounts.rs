use clap::{Args, Subcommand};
use jiff::Timestamp;
use uuid::Uuid;

use checkout_discounts::{
    config::DatabaseConfig, context::AppContext,
    domain::discounts::data::DiscountCalculationInput,
};

use super::output::{print_json, print_policy};

#[derive(Debug, Args)]
pub(crate) struct DiscountsCommand {
    #[command(subcommand)]
    command: DiscountsSubcommand,
}

#[derive(Debug, Subcommand)]
enum DiscountsSubcommand {
    /// Apply one policy to an order total
    Apply(ApplyArgs),

    /// Preview every available policy against an order total
    Preview(PreviewArgs),
}

#[derive(Debug, Args)]
struct ApplyArgs {
    #[command(flatten)]
    database: DatabaseConfig,

    /// Discount policy UUID
    #[arg(long)]
    policy: Uuid,

    /// Order total in minor units
    #[arg(long)]
    total: u64,

    /// Evaluate at this instant instead of now
    #[arg(long)]
    at: Option<Timestamp>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct PreviewArgs {
    #[command(flatten)]
    database: DatabaseConfig,

    /// Order total in minor units
    #[arg(long)]
    total: u64,

    /// Evaluate at this instant instead of now
    #[arg(long)]
    at: Option<Timestamp>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

pub(crate) async fn run(command: DiscountsCommand) -> Result<(), String> {
    match command.command {
        DiscountsSubcommand::Apply(args) => apply(args).await,
        DiscountsSubcommand::Preview(args) => preview(args).await,
    }
}

async fn apply(args: ApplyArgs) -> Result<(), String> {
    let ctx = AppContext::from_database_url(&args.database.database_url)
        .await
        .map_err(|error| format!("failed to initialise: {error}"))?;

    let applied = ctx
        .discounts
        .apply_discount(
            args.policy.into(),
            DiscountCalculationInput::new(args.total),
            args.at.unwrap_or_else(Timestamp::now),
        )
        .await;

    if args.json {
        return print_json(&applied);
    }

    if let Some(policy) = &applied.policy {
        print_policy(policy);
        println!();
    }

    println!("applicable: {}", applied.result.is_applicable);
    println!("discount_amount: {}", applied.result.discount_amount);
    println!("final_amount: {}", applied.result.final_amount);
    println!("message: {}", applied.result.message);

    Ok(())
}

async fn preview(args: PreviewArgs) -> Result<(), String> {
    let ctx = AppContext::from_database_url(&args.database.database_url)
        .await
        .map_err(|error| format!("failed to initialise: {error}"))?;

    let previews = ctx
        .discounts
        .preview_all(args.total, args.at.unwrap_or_else(Timestamp::now))
        .await;

    if args.json {
        return print_json(&previews);
    }

    if previews.is_empty() {
        println!("no discounts available");
        return Ok(());
    }

    for preview in previews {
        println!("policy_uuid: {}", preview.policy.uuid);
        println!("name: {}", preview.policy.name);
        println!("can_apply: {}", preview.can_apply);
        println!("discount_amount: {}", preview.discount_amount);
        println!("final_amount: {}", preview.final_amount);
        println!("message: {}", preview.message);
        println!();
    }

    Ok(())
}
