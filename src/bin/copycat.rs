//! CLI driver: a `clap`-derive parser over the
//! `run_many` entry point, grounded on the `Query` enum pattern in
//! `analysis/query.rs` -- an enum deriving `Parser` directly, one variant
//! per subcommand. Exit code 0 whenever at least one run completes, non-zero
//! only on a configuration error.

use clap::Parser;
use colored::Colorize;
use copycat::{run_many, Config};

#[derive(Parser)]
#[command(author, version, about = "Solve letter-string analogies by stochastic search.", long_about = None)]
enum Cli {
    /// Run a letter-string analogy problem and report the answer distribution
    Run {
        /// the initial string, e.g. "abc"
        initial: String,
        /// the modified string, e.g. "abd"
        modified: String,
        /// the target string, e.g. "ijk"
        target: String,

        /// number of independent runs to aggregate
        #[arg(long, default_value_t = 1)]
        iterations: usize,
        /// PRNG seed, for reproducible runs
        #[arg(long)]
        seed: Option<u64>,
        /// upper bound on codelet steps per run
        #[arg(long, default_value_t = copycat::DEFAULT_MAX_STEPS)]
        max_steps: usize,
        /// steps during which temperature is held at 100
        #[arg(long, default_value_t = copycat::DEFAULT_CLAMP_TIME)]
        clamp_time: usize,
        /// the registered temperature-adjustment formula to use
        #[arg(long, default_value = "inverse")]
        formula: String,
        /// slipnet spreading-activation update period, in steps
        #[arg(long, default_value_t = copycat::DEFAULT_SLIPNET_UPDATE_PERIOD)]
        slipnet_period: usize,
        /// temperature recomputation period, in steps
        #[arg(long, default_value_t = copycat::DEFAULT_TEMPERATURE_UPDATE_PERIOD)]
        temperature_period: usize,
        /// coderack bootstrap-replenishment period, in steps
        #[arg(long, default_value_t = copycat::DEFAULT_CODERACK_UPDATE_PERIOD)]
        coderack_period: usize,
    },
}

fn main() {
    copycat::init_logging();
    let Cli::Run {
        initial,
        modified,
        target,
        iterations,
        seed,
        max_steps,
        clamp_time,
        formula,
        slipnet_period,
        temperature_period,
        coderack_period,
    } = Cli::parse();

    let config = Config {
        seed,
        max_steps,
        clamp_time,
        slipnet_update_period: slipnet_period,
        temperature_update_period: temperature_period,
        coderack_update_period: coderack_period,
        temperature_formula: formula,
    };

    match run_many(&initial, &modified, &target, iterations.max(1), &config) {
        Ok(histogram) => {
            print!("{}", histogram.render_table());
            match histogram.modal_answer() {
                Some(answer) => println!("\nmodal answer: {}", answer.green().bold()),
                None => println!("\nno runs completed"),
            }
        }
        Err(err) => {
            eprintln!("{} {err}", "error:".red().bold());
            std::process::exit(1);
        }
    }
}
