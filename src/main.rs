mod cli_options;
mod probe;

use log::{error, info, LevelFilter};

use cli_options::CliOptions;

/// Logs at `level` unless RUST_LOG says otherwise.
fn init_logger(level: LevelFilter) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level.as_str()))
        .init();
}

fn main() {
    init_logger(LevelFilter::Info);

    let options = match cli_options::parse_args(std::env::args().collect()) {
        Ok(options) => options,
        Err(e) => {
            error!("{}", e);
            eprintln!("Usage: {}", CliOptions::message());
            std::process::exit(1);
        }
    };
    if options.show_help {
        println!("Usage: {}", CliOptions::message());
        return;
    }

    if !options.use_multi_thread {
        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(1)
            .build_global()
        {
            error!("Can't limit the thread pool to a single thread: {}", e);
            std::process::exit(1);
        }
    }
    info!(
        "Running {} check(s) with {} samples on {} thread(s)",
        options.check,
        options.samples,
        rayon::current_num_threads()
    );

    let summaries = probe::run(options.check, options.samples);
    let failures: usize = summaries.iter().map(|s| s.failures).sum();
    if failures > 0 {
        error!("{} case(s) failed", failures);
        std::process::exit(2);
    }
    info!("All cases passed");
}
