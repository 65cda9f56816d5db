use clap::Args;

#[derive(Args, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub config: crate::cli::ConfigArgs,
}

pub fn execute(args: ValidateArgs, _global: &crate::cli::GlobalFlags) -> anyhow::Result<()> {
    let config = args.config.load()?;
    tracing::debug!(?config, "Configuration loaded");

    println!("Configuration is valid.");
    Ok(())
}
