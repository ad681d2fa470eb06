/*
 *
 *
 *
 *
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-at-]dwightjbrowne[-dot-]com
 *
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

pub mod run;
pub mod scan;
pub mod score;
pub mod unzip;

use anyhow::{Context, Result};
use ipo_core::{config::parse_tickers, Config, SamplingMode};
use ipo_loaders::{LoaderContext, ProcessState};
use tracing::{info, warn};

/// Apply `--tickers` to the configured ticker list
pub(crate) fn override_tickers(config: &mut Config, tickers: Option<&str>) -> Result<()> {
  if let Some(list) = tickers {
    config.tickers = parse_tickers(list).context("Invalid --tickers")?;
  }
  Ok(())
}

/// Apply `--sample-ratio` / `--seed` to the configured sampling mode.
///
/// A seed alone reseeds an already configured fraction and is ignored for
/// full scans.
pub(crate) fn override_sampling(config: &mut Config, ratio: Option<f64>, seed: Option<u64>) -> Result<()> {
  config.sampling = match (ratio, config.sampling) {
    (Some(ratio), SamplingMode::Fraction { seed: current, .. }) => {
      SamplingMode::fraction(ratio, seed.or(current))?
    }
    (Some(ratio), SamplingMode::Full) => SamplingMode::fraction(ratio, seed)?,
    (None, SamplingMode::Fraction { ratio, seed: current }) => {
      SamplingMode::Fraction { ratio, seed: seed.or(current) }
    }
    (None, SamplingMode::Full) => {
      if seed.is_some() {
        warn!("--seed has no effect without a sample ratio");
      }
      SamplingMode::Full
    }
  };
  Ok(())
}

/// Log every tracked stage and how it ended
pub(crate) fn log_process_summary(context: &LoaderContext) -> Result<()> {
  let Some(tracker) = &context.process_tracker else {
    return Ok(());
  };

  let processes = tracker.get_all()?;
  let failed = processes.iter().filter(|p| p.state == ProcessState::Failed).count();
  let with_errors = processes.iter().filter(|p| p.state == ProcessState::CompletedWithErrors).count();

  for process in &processes {
    let elapsed = process.end_time.map(|end| (end - process.start_time).num_milliseconds());
    info!(
      "  {:<32} {:?} records={} elapsed_ms={}",
      process.process_name,
      process.state,
      process.records_processed.map(|n| n.to_string()).unwrap_or_else(|| "-".to_string()),
      elapsed.map(|ms| ms.to_string()).unwrap_or_else(|| "-".to_string())
    );
  }
  info!("{} stages, {} failed, {} completed with errors", processes.len(), failed, with_errors);
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_override_tickers() {
    let mut config = Config::with_dirs("/corpus", "/out");
    override_tickers(&mut config, None).unwrap();
    assert_eq!(config.tickers.len(), 5);

    override_tickers(&mut config, Some("acme, glbx")).unwrap();
    assert_eq!(config.tickers.iter().map(|t| t.as_str()).collect::<Vec<_>>(), vec!["ACME", "GLBX"]);
    assert!(override_tickers(&mut config, Some(",")).is_err());
  }

  #[test]
  fn test_override_sampling() {
    let mut config = Config::with_dirs("/corpus", "/out");
    override_sampling(&mut config, None, Some(7)).unwrap();
    assert_eq!(config.sampling, SamplingMode::Full);

    override_sampling(&mut config, Some(0.5), None).unwrap();
    assert_eq!(config.sampling, SamplingMode::Fraction { ratio: 0.5, seed: None });

    override_sampling(&mut config, None, Some(7)).unwrap();
    assert_eq!(config.sampling, SamplingMode::Fraction { ratio: 0.5, seed: Some(7) });

    override_sampling(&mut config, Some(0.25), None).unwrap();
    assert_eq!(config.sampling, SamplingMode::Fraction { ratio: 0.25, seed: Some(7) });

    assert!(override_sampling(&mut config, Some(1.5), None).is_err());
  }
}
