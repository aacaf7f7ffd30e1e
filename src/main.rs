mod cli;

use clap::Parser;

use cli::Args;
use vto::config::Config;
use vto::trace::CallOrigin;

fn main() {
    let args = Args::parse();

    let config = match Config::load(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: Failed to load config file: {}", e);
            eprintln!("Using default settings.\n");
            Config::default()
        }
    };

    let name = args.command.name();
    let tracer = config
        .trace
        .tracer()
        .enabled(config.trace.enabled && args.trace)
        .origin(CallOrigin::here(name));

    let command = args.command;
    let config_path = args.config;
    let result = tracer.call(name, (), |_| {
        cli::run(command, &config, config_path.as_deref())
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
