// serve.rs — Run the goalboard HTTP server.
//
// Same server and flags as the gb-daemon binary, so users can start
// everything from `gb` without knowing the daemon's name.

use anyhow::Context;

use gb_daemon::ServeArgs;

pub fn execute(args: ServeArgs) -> anyhow::Result<()> {
    let config = args.into_config().context("failed to load config")?;
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(gb_daemon::serve(config))
}
