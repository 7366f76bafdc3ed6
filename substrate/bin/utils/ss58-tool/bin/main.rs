// This file is part of Substrate.

// Copyright (C) Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later WITH Classpath-exception-2.0

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

use clap::Parser;
use sp_ss58::set_default_ss58_version;
use ss58_tool::{run, Ss58Tool};
use tracing_subscriber::EnvFilter;

fn main() {
	if let Err(e) = inner_main() {
		eprintln!("{e}");
		std::process::exit(1);
	}
}

fn inner_main() -> Result<(), String> {
	let _ = tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::from_default_env())
		.with_writer(std::io::stderr)
		.try_init();

	let tool = Ss58Tool::parse();
	if let Some(network) = tool.network {
		set_default_ss58_version(network).map_err(|e| e.to_string())?;
	}

	let output = run(&tool.command, tool.network)?.render(tool.output_type)?;
	println!("{output}");
	Ok(())
}
