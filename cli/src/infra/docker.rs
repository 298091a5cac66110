//! Image metadata via the docker CLI.
//!
//! Pulls the image so `docker image inspect` sees registry-only images, then
//! reads the image config.

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use crate::application::ports::{CommandRunner, ImageMetadataSource};
use crate::domain::ImageMetadata;
use crate::infra::command_runner::PULL_TIMEOUT;

/// Image config section of `docker image inspect`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct ImageConfig {
    working_dir: String,
    entrypoint: Option<Vec<String>>,
    cmd: Option<Vec<String>>,
    exposed_ports: Option<serde_json::Map<String, serde_json::Value>>,
}

/// `ImageMetadataSource` backed by `docker pull` + `docker image inspect`.
pub struct DockerMetadataFetcher<R> {
    runner: R,
}

impl<R: CommandRunner> DockerMetadataFetcher<R> {
    #[must_use]
    pub fn new(runner: R) -> Self {
        Self { runner }
    }
}

impl<R: CommandRunner> ImageMetadataSource for DockerMetadataFetcher<R> {
    async fn fetch(&self, image: &str) -> Result<ImageMetadata> {
        let pull = self
            .runner
            .run_with_timeout("docker", &["pull", "--quiet", image], PULL_TIMEOUT)
            .await
            .context("running docker pull")?;
        anyhow::ensure!(
            pull.status.success(),
            "docker pull {image} failed: {}",
            String::from_utf8_lossy(&pull.stderr).trim()
        );

        let inspect = self
            .runner
            .run(
                "docker",
                &["image", "inspect", "--format", "{{json .Config}}", image],
            )
            .await
            .context("running docker image inspect")?;
        anyhow::ensure!(
            inspect.status.success(),
            "docker image inspect {image} failed: {}",
            String::from_utf8_lossy(&inspect.stderr).trim()
        );

        debug!(image, "inspected image config");
        parse_image_config(&inspect.stdout)
    }
}

/// Parse the JSON printed by `docker image inspect --format '{{json .Config}}'`.
///
/// The start command is the entrypoint followed by the command. Exposed port
/// keys look like `8080/tcp`; the protocol suffix is dropped.
///
/// # Errors
///
/// Returns an error if the JSON is malformed or a port key is not numeric.
pub fn parse_image_config(json: &[u8]) -> Result<ImageMetadata> {
    let config: Option<ImageConfig> =
        serde_json::from_slice(json).context("parsing docker image config")?;
    let config = config.unwrap_or_default();

    let start_command = config
        .entrypoint
        .into_iter()
        .flatten()
        .chain(config.cmd.into_iter().flatten())
        .collect();

    let exposed_ports = config
        .exposed_ports
        .unwrap_or_default()
        .keys()
        .map(|key| {
            let port = key.split('/').next().unwrap_or(key);
            port.parse::<u16>()
                .with_context(|| format!("invalid exposed port '{key}' in image config"))
        })
        .collect::<Result<Vec<u16>>>()?;

    Ok(ImageMetadata {
        working_dir: config.working_dir,
        start_command,
        exposed_ports,
    })
}
