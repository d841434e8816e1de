mod api;
mod args;
mod config;
mod defines;
mod dispatch;
mod errors;
mod impls;
mod rest;
mod timestamp;
mod types;

use clap::Parser;
use types::*;

fn main() {
    // parse arguments via clap
    let cmd_args = CommandlineArgs::parse();

    // verbosity is decided once here and carried in the context from now on
    let ctx = Context::from(&cmd_args);
    init_logger(&ctx);

    let result = dispatch::execute(&cmd_args.command, || {
        config::start_api(cmd_args.config.as_deref(), &ctx)
    });

    match result {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}

/// Log to stderr so stdout only ever carries command output.
fn init_logger(ctx: &Context) {
    env_logger::Builder::new()
        .filter_level(ctx.verbosity.level_filter())
        .format_timestamp(None)
        .target(env_logger::Target::Stderr)
        .init();

    match ctx.verbosity {
        Verbosity::Trace => log::debug!("Trace enabled"),
        Verbosity::Debug => log::debug!("Debug enabled"),
        Verbosity::Normal => {}
    }
}
