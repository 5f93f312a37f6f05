use crate::core::{
    command_init::CommandInit,
    docker::is_zypper_success,
    error::{Result, ZypperDockerError},
    print_section_header,
    zypper::ZypperCommand,
};
use clap::Args;

/// Filters accepted by `zypper list-patches` and `zypper patch`.
#[derive(Args, Debug, Clone, Default)]
pub struct PatchFilters {
    /// Only patches fixing the given bugzilla issue
    #[arg(long)]
    pub bugzilla: Option<String>,

    /// Only patches fixing the given CVE
    #[arg(long)]
    pub cve: Option<String>,

    /// Only patches of the given category (security, recommended...)
    #[arg(long)]
    pub category: Option<String>,
}

impl PatchFilters {
    pub fn apply(&self, command: ZypperCommand) -> ZypperCommand {
        command
            .option("bugzilla", self.bugzilla.as_deref())
            .option("cve", self.cve.as_deref())
            .option("category", self.category.as_deref())
    }
}

pub fn execute_list_updates(image: &str) -> Result<()> {
    list_in_image(image, ZypperCommand::new("lu"), "Updates")
}

pub fn execute_list_patches(image: &str, filters: &PatchFilters) -> Result<()> {
    list_in_image(image, filters.apply(ZypperCommand::new("lp")), "Patches")
}

fn list_in_image(image: &str, command: ZypperCommand, title: &str) -> Result<()> {
    let mut context = CommandInit::initialize()?;
    let id = context.require_suse_image(image)?;

    print_section_header(&format!("{title} for {image}"));
    let code = context.docker.run_in_image(&id, &command.after_refresh())?;
    if !is_zypper_success(code) {
        return Err(ZypperDockerError::docker_command_failed(
            "run",
            format!("'{command}' failed in {image}"),
        ));
    }
    Ok(())
}
