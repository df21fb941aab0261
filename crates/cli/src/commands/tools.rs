//! `authproof tools` — List the registered tools and their parameters.

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let registry = authproof_tools::default_registry();

    println!();
    for spec in registry.specs() {
        println!("  {}", spec.name);
        println!("    {}", spec.description);
        for param in &spec.params {
            let required = if param.required { "required" } else { "optional" };
            let default = param
                .default
                .as_ref()
                .map(|d| format!(", default {d}"))
                .unwrap_or_default();
            println!(
                "    - {} ({}, {}{}) — {}",
                param.name,
                param.kind.type_name(),
                required,
                default,
                param.description
            );
        }
        println!();
    }

    Ok(())
}
