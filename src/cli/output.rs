use serde::Serialize;

use checkout_discounts::domain::discounts::records::DiscountPolicy;

pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|error| format!("failed to serialise output: {error}"))?;

    println!("{json}");

    Ok(())
}

pub(crate) fn print_policy(policy: &DiscountPolicy) {
    println!("policy_uuid: {}", policy.uuid);
    println!("name: {}", policy.name);
    println!(
        "description: {}",
        policy.description.as_deref().unwrap_or("none")
    );
    println!("kind: {}", policy.kind);
    println!("value: {}", policy.value);
    println!(
        "min_amount: {}",
        policy
            .min_amount
            .map_or_else(|| "none".to_string(), |value| value.to_string())
    );
    println!(
        "max_amount: {}",
        policy
            .max_amount
            .map_or_else(|| "none".to_string(), |value| value.to_string())
    );
    println!("active: {}", policy.is_active);
    println!("valid_from: {}", policy.valid_from);
    println!("valid_to: {}", policy.valid_to);
}
