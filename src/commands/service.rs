//! Apache daemon control
//!
//! start/stop/restart/reload run the init script as root and relay the
//! daemon output. Restart and reload are also side effects of the vhost
//! upload/delete operations.

use super::CommandContext;
use crate::error::ShipwayResult;

const INIT_SCRIPT: &str = "/etc/init.d/apache2";

fn run(ctx: &CommandContext, action: &str, announcement: &str) -> ShipwayResult<()> {
    ctx.reporter.info(announcement);
    let output = ctx
        .executor
        .execute_as_root(&format!("{} {}", INIT_SCRIPT, action))?;
    let output = output.trim();
    if !output.is_empty() {
        ctx.reporter.info(output);
    }
    Ok(())
}

pub fn start(ctx: &CommandContext) -> ShipwayResult<()> {
    run(ctx, "start", "Starting Apache.")
}

pub fn stop(ctx: &CommandContext) -> ShipwayResult<()> {
    run(ctx, "stop", "Stopping Apache.")
}

pub fn restart(ctx: &CommandContext) -> ShipwayResult<()> {
    run(ctx, "restart", "Restarting Apache.")
}

pub fn reload(ctx: &CommandContext) -> ShipwayResult<()> {
    run(ctx, "reload", "Reloading Apache configuration.")
}
