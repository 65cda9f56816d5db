use anyhow::Context;
use clap::Args;
use vbox_builder::{Builder, ConsoleUi, Driver, VBoxManageDriver};

#[derive(Args, Debug)]
pub struct BuildArgs {
    #[command(flatten)]
    pub config: crate::cli::ConfigArgs,
}

pub fn execute(args: BuildArgs, _global: &crate::cli::GlobalFlags) -> anyhow::Result<()> {
    let config = args.config.load()?;

    let driver = VBoxManageDriver::discover(config.vboxmanage_path.as_deref())?;
    driver
        .verify()
        .with_context(|| format!("{} is not usable", driver.path().display()))?;

    let outcome = Builder::new(config, Box::new(driver), Box::new(ConsoleUi::stdio()))
        .run()
        .context("Build failed")?;

    println!("{}", outcome.vm_name);
    Ok(())
}
