use clap::Args;
use cometwatch_core::classify_str;
use serde::Serialize;

#[derive(Args)]
pub struct ClassifyArgs {
    /// Distance measurement (AU in the reference feed); omit for Unknown
    pub distance: Option<String>,
}

#[derive(Serialize)]
struct ClassifyView {
    category: cometwatch_core::ProximityCategory,
    label: &'static str,
    intensity: cometwatch_core::IntensityTier,
}

pub fn run(args: ClassifyArgs) -> Result<(), Box<dyn std::error::Error>> {
    let category = classify_str(args.distance.as_deref());
    let view = ClassifyView {
        category,
        label: category.label(),
        intensity: category.intensity(),
    };
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}
