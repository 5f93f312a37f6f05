use crate::core::{
    command_init::{log_cache_error, CommandContext, CommandInit},
    docker::ImageSummary,
    error::Result,
    output::{print_info, print_table},
};

pub fn execute_images(force: bool) -> Result<()> {
    let mut context = CommandInit::initialize()?;

    if force {
        log::debug!("Resetting the classification cache");
        log_cache_error(context.cache.reset())?;
    }

    let images = suse_images(&mut context)?;
    if images.is_empty() {
        print_info("No SUSE based images found.");
        return Ok(());
    }

    let mut rows = vec![header()];
    rows.extend(images.iter().map(row));
    print_table(&rows);

    Ok(())
}

/// Tagged images that are SUSE based, in the order docker lists them.
pub fn suse_images(context: &mut CommandContext) -> Result<Vec<ImageSummary>> {
    let images = context.docker.list_images()?;
    log::debug!("Classifying {} images", images.len());

    Ok(images
        .into_iter()
        .filter(|image| context.is_suse(&image.id))
        .collect())
}

fn header() -> Vec<String> {
    ["REPOSITORY", "TAG", "IMAGE ID", "CREATED", "SIZE"]
        .iter()
        .map(|h| h.to_string())
        .collect()
}

fn row(image: &ImageSummary) -> Vec<String> {
    vec![
        image.repository.clone(),
        image.tag.clone(),
        short_id(&image.id).to_string(),
        image.created.clone(),
        image.size.clone(),
    ]
}

/// First 12 hex digits of an image id, without the digest prefix.
pub fn short_id(id: &str) -> &str {
    let id = id.strip_prefix("sha256:").unwrap_or(id);
    match id.char_indices().nth(12) {
        Some((end, _)) => &id[..end],
        None => id,
    }
}
