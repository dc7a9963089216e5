//! Browse the closed set of component types.

use anyhow::Result;
use clap::Parser;
use console::style;
use rules_core::schema::{ComponentSchema, create_component, schema_for};
use rules_core::{ComponentType, EffectId};
use strum::IntoEnumIterator;

/// List component types or show one type's defaults
#[derive(Parser)]
pub struct Schema {
    /// Component type to show (e.g. damage, roll-mod); lists all types when omitted
    #[arg(value_name = "TYPE")]
    component_type: Option<String>,
}

impl Schema {
    pub fn execute(self) -> Result<()> {
        match self.component_type {
            Some(name) => show(&name),
            None => {
                list();
                Ok(())
            }
        }
    }
}

fn flags(schema: &ComponentSchema) -> String {
    [
        (schema.is_active, "active"),
        (schema.is_linked, "linked"),
        (schema.is_single, "single"),
        (schema.is_rollable, "rollable"),
    ]
    .iter()
    .filter(|(set, _)| *set)
    .map(|(_, name)| *name)
    .collect::<Vec<_>>()
    .join(", ")
}

fn list() {
    println!("{}", style("=== Component Types ===").bold().green());
    for kind in ComponentType::iter() {
        let schema = kind.schema();
        let category = schema
            .category
            .map(|c| c.to_string())
            .unwrap_or_else(|| "addon".to_owned());
        println!(
            "  {:<14} {:<12} {}",
            style(kind.to_string()).bold(),
            category,
            style(flags(&schema)).dim()
        );
    }
}

fn show(name: &str) -> Result<()> {
    let schema = schema_for(name)?;
    let component = create_component(name, &EffectId::new("example"))?;

    println!("{} {}", style("Type:").bold().cyan(), schema.component_type);
    if let Some(category) = schema.category {
        println!("{} {}", style("Category:").bold().cyan(), category);
    }
    println!("{} {}", style("Flags:").bold().cyan(), flags(&schema));
    println!();
    println!("{}", style("Defaults:").bold().yellow());
    println!("{}", serde_json::to_string_pretty(&component)?);
    Ok(())
}
