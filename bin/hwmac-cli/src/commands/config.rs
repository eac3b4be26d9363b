// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `hwmac config` command: print the effective configuration.

use super::RangeArgs;
use trial::TrialConfig;

pub fn execute(mut config: TrialConfig, ranges: RangeArgs) -> anyhow::Result<()> {
    ranges.apply(&mut config);
    print!("{}", config.normalized().to_toml()?);
    Ok(())
}
