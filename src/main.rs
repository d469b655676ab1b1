// Copyright 2025 Lablup Inc. and Jeongkyu Shin
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use anyhow::Result;
use clap::Parser;

use mikbak::{app, error::BackupError, utils::init_logging, Cli, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let date = chrono::Local::now().date_naive();

    if let Err(e) = run(&cli, date).await {
        fail(&e);
    }

    Ok(())
}

async fn run(cli: &Cli, date: chrono::NaiveDate) -> Result<(), BackupError> {
    let config = Config::load(&cli.config).await?;
    let params = cli.connection_params(&config);

    let mut stdout = std::io::stdout().lock();
    app::execute(params, date, &mut stdout).await?;
    Ok(())
}

/// Report a failed stage and exit with status 1.
fn fail(error: &BackupError) -> ! {
    println!("\n[!] {}: {error}", error.tag());
    std::process::exit(1);
}
