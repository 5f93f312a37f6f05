use crate::commands::images::short_id;
use crate::core::{
    command_init::CommandInit,
    error::Result,
    output::{print_info, print_table},
};

/// Lists running containers whose image has been patched or updated since.
pub fn execute_ps() -> Result<()> {
    let context = CommandInit::initialize()?;
    let containers = context.docker.list_containers()?;

    let mut rows = vec![vec![
        "CONTAINER ID".to_string(),
        "IMAGE".to_string(),
        "NAMES".to_string(),
        "STATUS".to_string(),
    ]];

    for container in containers {
        let image_id = match context.docker.container_image_id(&container.id) {
            Ok(id) => id,
            Err(e) => {
                log::warn!("Cannot inspect container {}: {e}", container.name);
                continue;
            }
        };
        if context.cache.is_image_outdated(&image_id) {
            rows.push(vec![
                short_id(&container.id).to_string(),
                container.image,
                container.name,
                container.status,
            ]);
        }
    }

    if rows.len() == 1 {
        print_info("No running containers are based on outdated images.");
        return Ok(());
    }

    print_table(&rows);
    print_info("These containers run on images that have been patched or updated. Restart them from the new images.");
    Ok(())
}
