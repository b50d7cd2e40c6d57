// Copyright 2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

mod bridge;
mod cli;
mod config;
mod error;
mod report;
mod runner;
mod types;
mod ui;

use report::RenderContext;

fn main() {
    env_logger::init();

    // Parse CLI arguments
    let args = cli::CliArgs::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        ui::print_error(&e);
        std::process::exit(1);
    }

    let config = match config::build_report_config(&args) {
        Ok(c) => c,
        Err(e) => {
            ui::print_error(&format!("Configuration error: {}", e));
            std::process::exit(1);
        }
    };

    let suite = match types::load_suite_result(&config.input) {
        Ok(s) => s,
        Err(e) => {
            ui::print_error(&e);
            std::process::exit(1);
        }
    };

    let ctx = match RenderContext::html() {
        Ok(ctx) => ctx,
        Err(e) => {
            ui::print_error(&format!("Template error: {}", e));
            std::process::exit(1);
        }
    };

    match runner::generate_reports(&suite, &ctx, &config) {
        Ok(summary) => {
            ui::status(&format!(
                "wrote {} page(s) for {} spec(s) to {}",
                summary.pages.len(),
                suite.spec_results.len(),
                config.report_dir.display()
            ));
            if suite.pre_hook_failure.is_some() {
                ui::status("Before Suite hook failed, only the index page was generated");
            }
        }
        Err(e) => {
            ui::print_error(&format!("Report generation failed: {}", e));
            std::process::exit(1);
        }
    }
}
