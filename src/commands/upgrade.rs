use crate::commands::list::PatchFilters;
use crate::core::{
    command_init::{log_cache_error, CommandContext, CommandInit},
    error::{Result, ZypperDockerError},
    image_name::ImageName,
    print_success,
    zypper::ZypperCommand,
};
use clap::Args;

/// Options shared by `update` and `patch`.
#[derive(Args, Debug, Clone)]
pub struct UpgradeArgs {
    /// Image to upgrade
    pub image: String,

    /// Name of the new image, as repository[:tag]
    pub new_image: String,

    /// Automatically say 'yes' to third party license confirmation prompt
    #[arg(short = 'l', long)]
    pub auto_agree_with_licenses: bool,

    /// Do not install packages which are only recommended
    #[arg(long)]
    pub no_recommends: bool,

    /// Install the packages even if they replace files from other packages
    #[arg(long)]
    pub replacefiles: bool,
}

impl UpgradeArgs {
    fn apply(&self, command: ZypperCommand) -> ZypperCommand {
        command
            .flag("auto-agree-with-licenses", self.auto_agree_with_licenses)
            .flag("no-recommends", self.no_recommends)
            .flag("replacefiles", self.replacefiles)
    }
}

pub fn execute_update(args: &UpgradeArgs) -> Result<()> {
    let command = args.apply(ZypperCommand::new("up"));
    upgrade(args, command)
}

pub fn execute_patch(args: &UpgradeArgs, filters: &PatchFilters) -> Result<()> {
    let command = filters.apply(args.apply(ZypperCommand::new("patch")));
    upgrade(args, command)
}

fn upgrade(args: &UpgradeArgs, command: ZypperCommand) -> Result<()> {
    let target = ImageName::parse(&args.new_image)?;
    let mut context = CommandInit::initialize()?;

    prevent_image_overwrite(&context, &target)?;
    let id = context.require_suse_image(&args.image)?;

    log::info!("Running '{command}' on {}", args.image);
    let new_id = context.docker.commit_with_command(
        &id,
        &command.after_refresh(),
        &target.repo,
        &target.tag,
    )?;

    record_upgrade(&mut context, &args.image, &new_id)?;
    print_success(&format!("{target} successfully created"));
    Ok(())
}

fn prevent_image_overwrite(context: &CommandContext, target: &ImageName) -> Result<()> {
    if context.docker.image_exists(&target.repo, &target.tag)? {
        return Err(ZypperDockerError::image_already_exists(
            &target.repo,
            &target.tag,
        ));
    }
    Ok(())
}

fn record_upgrade(context: &mut CommandContext, image: &str, new_id: &str) -> Result<()> {
    let result = context
        .cache
        .update_cache_after_update(image, new_id, &context.docker);
    log_cache_error(result)
}
