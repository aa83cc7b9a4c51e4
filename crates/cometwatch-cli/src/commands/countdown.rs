use clap::Args;
use cometwatch_core::{evaluate, format, TimeTarget};

#[derive(Args)]
pub struct CountdownArgs {
    /// Target timestamp (RFC 3339, or a date/time without offset read as UTC)
    #[arg(long)]
    pub target: String,
    /// Evaluate at this instant instead of the current time
    #[arg(long)]
    pub now: Option<String>,
}

pub fn run(args: CountdownArgs) -> Result<(), Box<dyn std::error::Error>> {
    let now = super::resolve_now(args.now.as_deref())?;
    let state = evaluate(&TimeTarget::new(args.target), now);

    let mut json = serde_json::to_value(state)?;
    if let Some(delta) = state.delta() {
        json["display"] = serde_json::Value::String(format::format_delta(&delta));
    }
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
