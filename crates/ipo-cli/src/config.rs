use anyhow::{Context, Result};
use ipo_core::Config as CoreConfig;
use ipo_loaders::{LoaderConfig, LoaderContext, ProcessTracker};
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
  pub pipeline: CoreConfig,
  pub show_progress: bool,
}

impl Config {
  pub fn from_env() -> Result<Self> {
    let pipeline = CoreConfig::from_env().context("Invalid IPO_* environment configuration")?;

    let show_progress = env::var("IPO_NO_PROGRESS").is_err();

    Ok(Self { pipeline, show_progress })
  }

  /// Stage context with a fresh process tracker
  pub fn loader_context(&self) -> LoaderContext {
    let loader_config = LoaderConfig { show_progress: self.show_progress, ..LoaderConfig::from(&self.pipeline) };
    LoaderContext::new(loader_config).with_process_tracker(ProcessTracker::new())
  }
}
