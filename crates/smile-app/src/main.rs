mod cli;
mod controls;
mod shell;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use winit::dpi::LogicalSize;

use smile_engine::RenderError;
use smile_engine::assets::{AssetSource, DirAssets, EmbeddedAssets};
use smile_engine::device::GpuInit;
use smile_engine::logging::{init_logging, LoggingConfig};
use smile_engine::scene::{SceneConfig, SceneRenderer};
use smile_engine::window::{Runtime, RuntimeConfig};

use crate::cli::Cli;
use crate::shell::Shell;

fn main() -> ExitCode {
    let cli = cli::parse();
    init_logging(cli.log.clone().map(LoggingConfig::with_filter).unwrap_or_default());

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", user_message(&err));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let assets: Arc<dyn AssetSource> = match &cli.assets {
        Some(dir) => {
            if !dir.is_dir() {
                log::warn!("{} is not a directory; using bundled assets", dir.display());
            }
            Arc::new(DirAssets::new(dir))
        }
        None => Arc::new(EmbeddedAssets),
    };

    let mut renderer = SceneRenderer::new(SceneConfig::default());
    renderer.bind(assets);

    let config = RuntimeConfig {
        title: shell::TITLE.to_string(),
        initial_size: LogicalSize::new(cli.width, cli.height),
    };
    Runtime::run(config, GpuInit::default(), Shell::new(renderer, cli.autostart))
}

/// Capability failures get a short message; everything else prints its full chain.
fn user_message(err: &anyhow::Error) -> String {
    let render_err = err.chain().find_map(|e| e.downcast_ref::<RenderError>());
    match render_err {
        Some(RenderError::UnsupportedCapability { required, .. }) => {
            format!("GPU API level {required} is not supported")
        }
        _ => format!("smile: {err:#}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn capability_failure_is_short() {
        let err = Err::<(), _>(RenderError::UnsupportedCapability { found: 1, required: 2 })
            .context("GPU initialization failed")
            .unwrap_err();
        assert_eq!(user_message(&err), "GPU API level 2 is not supported");
    }

    #[test]
    fn other_failures_keep_context() {
        let err = Err::<(), _>(RenderError::HostNotBound)
            .context("startup")
            .unwrap_err();
        let msg = user_message(&err);
        assert!(msg.starts_with("smile: startup"));
        assert!(msg.contains("no host bound"));
    }
}
