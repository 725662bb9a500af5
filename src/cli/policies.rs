use clap::{Args, Subcommand};
use jiff::{SignedDuration, Timestamp};

use checkout_discounts::{
    config::DatabaseConfig,
    context::AppContext,
    domain::discounts::{
        data::NewDiscountPolicy,
        factory::rule_for,
        records::{DiscountKind, DiscountPolicyUuid},
    },
};

use super::output::{print_json, print_policy};

#[derive(Debug, Args)]
pub(crate) struct PoliciesCommand {
    #[command(subcommand)]
    command: PoliciesSubcommand,
}

#[derive(Debug, Subcommand)]
enum PoliciesSubcommand {
    /// List policies available at a point in time
    List(ListArgs),

    /// Insert the storefront's sample fixed amount policies
    Seed(SeedArgs),
}

#[derive(Debug, Args)]
struct ListArgs {
    #[command(flatten)]
    database: DatabaseConfig,

    /// List policies available at this instant instead of now
    #[arg(long)]
    at: Option<Timestamp>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct SeedArgs {
    #[command(flatten)]
    database: DatabaseConfig,

    /// Number of days the seeded policies stay valid
    #[arg(long, default_value_t = 365)]
    days: u16,
}

/// Name, description, amount off and minimum order total.
const SAMPLE_POLICIES: &[(&str, &str, u64, u64)] = &[
    ("5,000 off your first order", "Instant discount on a first purchase", 5_000, 30_000),
    ("10,000 off for new members", "Welcome discount for newly registered customers", 10_000, 50_000),
    ("15,000 off for VIP members", "Member discount for VIP customers", 15_000, 80_000),
    ("25,000 off for premium members", "Largest member discount for premium customers", 25_000, 100_000),
    ("7,000 off weekend special", "Weekend-only special discount", 7_000, 40_000),
];

pub(crate) async fn run(command: PoliciesCommand) -> Result<(), String> {
    match command.command {
        PoliciesSubcommand::List(args) => list(args).await,
        PoliciesSubcommand::Seed(args) => seed(args).await,
    }
}

async fn list(args: ListArgs) -> Result<(), String> {
    let ctx = AppContext::from_database_url(&args.database.database_url)
        .await
        .map_err(|error| format!("failed to initialise: {error}"))?;

    let policies = ctx
        .discounts
        .list_available_policies(args.at.unwrap_or_else(Timestamp::now))
        .await;

    if args.json {
        return print_json(&policies);
    }

    if policies.is_empty() {
        println!("no discounts available");
        return Ok(());
    }

    for policy in policies {
        print_policy(&policy);

        if let Ok(rule) = rule_for(&policy) {
            println!("summary: {}", rule.describe());
        }

        println!();
    }

    Ok(())
}

async fn seed(args: SeedArgs) -> Result<(), String> {
    let ctx = AppContext::from_database_url(&args.database.database_url)
        .await
        .map_err(|error| format!("failed to initialise: {error}"))?;

    let valid_from = Timestamp::now();
    let valid_to = valid_from
        .checked_add(SignedDuration::from_hours(i64::from(args.days) * 24))
        .map_err(|error| format!("invalid validity window: {error}"))?;

    for &(name, description, value, min_amount) in SAMPLE_POLICIES {
        let policy = ctx
            .policies
            .create_policy(NewDiscountPolicy {
                uuid: DiscountPolicyUuid::new(),
                name: name.to_string(),
                description: Some(description.to_string()),
                kind: DiscountKind::FixedAmount,
                value,
                min_amount: Some(min_amount),
                max_amount: None,
                is_active: true,
                valid_from,
                valid_to,
            })
            .await
            .map_err(|error| format!("failed to create policy {name:?}: {error}"))?;

        println!("created {} ({})", policy.uuid, policy.name);
    }

    Ok(())
}
