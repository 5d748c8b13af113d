//! Passive tree example: parsing allocated nodes and querying a store
//!
//! This example demonstrates:
//! - Plugging a stat parser into a `CalcEnv`
//! - Building the merged modifier list of allocated passive nodes
//! - Reusing the node cache on a second build
//! - Reading through the node list from a `ModStore` with conditions and multipliers

use zzmod::*;

/// A tiny stat parser for a handful of passive tree lines.
fn parse_stat(text: &str) -> (Vec<Modifier>, String) {
    if let Some(n) = text
        .strip_prefix('+')
        .and_then(|t| t.strip_suffix(" to maximum Life"))
    {
        return match n.parse::<f64>() {
            Ok(v) => (vec![Modifier::float("Life", ModType::Base, v)], String::new()),
            Err(e) => (Vec::new(), e.to_string()),
        };
    }

    if let Some(n) = text.strip_suffix("% increased Fire Damage") {
        return match n.parse::<f64>() {
            Ok(v) => (
                vec![Modifier::float("Damage", ModType::Increase, v)
                    .with_keyword_flags(KeywordFlags::FIRE)],
                String::new(),
            ),
            Err(e) => (Vec::new(), e.to_string()),
        };
    }

    if let Some(n) = text.strip_suffix("% increased Damage per Frenzy Charge") {
        return match n.parse::<f64>() {
            Ok(v) => (
                vec![Modifier::float("Damage", ModType::Increase, v)
                    .with_tag(MultiplierTag::new("FrenzyCharge"))],
                String::new(),
            ),
            Err(e) => (Vec::new(), e.to_string()),
        };
    }

    if text == "20% more Damage while on Full Life" {
        return (
            vec![Modifier::float("Damage", ModType::More, 20.0)
                .with_tag(ConditionTag::new("FullLife"))],
            String::new(),
        );
    }

    (Vec::new(), "unrecognised stat".to_string())
}

fn main() -> Result<(), ModError> {
    let nodes = vec![
        PassiveNode::new(
            101,
            "Heart of the Warrior",
            vec!["+30 to maximum Life".into(), "+10 to maximum Life".into()],
        ),
        PassiveNode::new(
            102,
            "Burning Soul",
            vec![
                "25% increased Fire Damage".into(),
                "Enemies you kill have a chance to be a goat".into(),
            ],
        ),
        PassiveNode::new(
            103,
            "Frenzied Might",
            vec![
                "4% increased Damage per Frenzy Charge".into(),
                "20% more Damage while on Full Life".into(),
            ],
        ),
    ];

    // The environment owns the parser and the node cache
    let mut env = CalcEnv::new(parse_stat);

    println!("Building node modifiers...");
    let aggregate = env.build_node_mods(&nodes)?;
    println!("  - {} modifiers from {} nodes", aggregate.mods.len(), nodes.len());

    for diagnostic in &aggregate.diagnostics {
        println!("  ! {}", diagnostic);
    }

    // Second build hits the cache
    let again = env.build_node_mods(&nodes)?;
    println!(
        "  - rebuilt from cache: {} cached nodes, {} new diagnostics",
        env.cache().len(),
        again.diagnostics.len()
    );

    // Character state lives in a store reading through the node list
    let mut store = ModStore::with_parent(&aggregate.mods);
    store.add_mod(Modifier::float("Life", ModType::Base, 38.0).with_source(ModSource::Base));
    store.set_multiplier("FrenzyCharge", 3.0);

    let fire = ModFilter::new().with_keyword_flags(KeywordFlags::FIRE);
    let cold = ModFilter::new().with_keyword_flags(KeywordFlags::COLD);

    println!("\n=== Without Full Life ===");
    println!("Life:                {}", store.sum(ModType::Base, None, &["Life"])?);
    println!(
        "Fire damage inc:     {}%",
        store.sum(ModType::Increase, Some(&fire), &["Damage"])?
    );
    println!(
        "Cold damage inc:     {}%",
        store.sum(ModType::Increase, Some(&cold), &["Damage"])?
    );
    println!(
        "Damage multiplier:   {:.2}",
        store.effect_multiplier(None, &["Damage"])?
    );

    store.set_condition("FullLife", true);

    println!("\n=== On Full Life ===");
    println!(
        "Damage multiplier:   {:.2}",
        store.effect_multiplier(None, &["Damage"])?
    );

    Ok(())
}
