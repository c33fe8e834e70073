//! The `nursebot fluid` command.

use anyhow::Result;

use nursebot_core::fluid::{maintenance_fluid, FluidInput};

pub fn execute(age: Option<String>, weight: Option<String>) -> Result<()> {
    let input = FluidInput::parse(
        age.as_deref().unwrap_or_default(),
        weight.as_deref().unwrap_or_default(),
    );

    match input {
        Ok(input) => println!("Recommended daily fluid: {}", maintenance_fluid(&input)),
        Err(e) => println!("Please enter a valid age and weight: {e}"),
    }
    Ok(())
}
