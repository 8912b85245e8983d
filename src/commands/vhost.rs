//! Virtual-host lifecycle
//!
//! A vhost artifact exists in two places: a local copy under the project
//! workspace and a remote copy in the server's sites-enabled directory.
//! The two are never synced automatically; every operation is explicit and
//! overwrites are confirmation-gated.

use std::fs;
use std::path::{Path, PathBuf};

use super::{service, CommandContext};
use crate::environment::Environment;
use crate::error::{ShipwayError, ShipwayResult};
use crate::executor::CopyDirection;
use crate::workspace::Workspace;

const SITES_ENABLED_DIR: &str = "/etc/apache2/sites-enabled";

/// Remote vhost path: `<sites-enabled>/<sanitized-app>.<env>.vhost`.
pub fn remote_path(environment: &Environment) -> PathBuf {
    Path::new(SITES_ENABLED_DIR).join(format!(
        "{}.{}.vhost",
        environment.sanitized_application_name(),
        environment.name
    ))
}

/// Local vhost path: `<project-local-dir>/apache/<env>.vhost`.
pub fn local_path(workspace: &Workspace, environment: &Environment) -> PathBuf {
    workspace
        .vhost_dir()
        .join(format!("{}.vhost", environment.name))
}

/// Default vhost template for an environment.
fn template(environment: &Environment) -> String {
    let public = environment.public_root();
    format!(
        "<VirtualHost *:80>\n\
         \x20 ServerName mydomain.com\n\
         \x20 ServerAlias www.mydomain.com\n\
         \x20 DocumentRoot {public}\n\
         \x20 <Directory {public}>\n\
         \x20   AllowOverride all\n\
         \x20   Options -MultiViews\n\
         \x20 </Directory>\n\
         </VirtualHost>\n"
    )
}

/// create-vhost: write a local template, confirming before overwrite.
pub fn create(ctx: &CommandContext) -> ShipwayResult<()> {
    let local = local_path(ctx.workspace, ctx.environment);

    if local.exists() {
        ctx.reporter
            .warn(&format!("{} already exists.", local.display()));
        if !ctx.prompter.confirm("Do you want to overwrite it?")? {
            return Err(ShipwayError::Aborted);
        }
    }

    ctx.workspace.ensure_vhost_dir()?;
    fs::write(&local, template(ctx.environment))?;
    ctx.reporter
        .info(&format!("The vhost has been created in {}.", local.display()));
    Ok(())
}

/// upload-vhost: push the local artifact to sites-enabled, then restart.
pub fn upload(ctx: &CommandContext) -> ShipwayResult<()> {
    let local = local_path(ctx.workspace, ctx.environment);
    if !local.exists() {
        return Err(ShipwayError::LocalVhostMissing {
            path: local,
            environment: ctx.environment.name.clone(),
        });
    }

    let remote = remote_path(ctx.environment);
    ctx.reporter.info(&format!(
        "Uploading {} to {}.",
        local.display(),
        remote.display()
    ));
    ctx.executor.copy(CopyDirection::Upload, &local, &remote)?;

    // restart so the new vhost takes effect immediately
    service::restart(ctx)
}

/// download-vhost: fetch the remote artifact, confirming before a local
/// overwrite. No remote mutation.
pub fn download(ctx: &CommandContext) -> ShipwayResult<()> {
    let remote = remote_path(ctx.environment);
    if !ctx.executor.file_exists(&remote) {
        return Err(ShipwayError::RemoteVhostMissing { path: remote });
    }

    ctx.workspace.ensure_vhost_dir()?;
    let local = local_path(ctx.workspace, ctx.environment);
    if local.exists() {
        ctx.reporter
            .warn(&format!("{} already exists.", local.display()));
        if !ctx.prompter.confirm("Do you want to overwrite it?")? {
            return Err(ShipwayError::Aborted);
        }
    }

    ctx.reporter.info("Downloading vhost..");
    ctx.executor.copy(CopyDirection::Download, &local, &remote)?;
    ctx.reporter
        .info(&format!("You can find the vhost in: {}.", local.display()));
    Ok(())
}

/// delete-vhost: remove the remote artifact, then reload. An absent remote
/// vhost is a non-destructive no-op.
pub fn delete(ctx: &CommandContext) -> ShipwayResult<()> {
    let remote = remote_path(ctx.environment);
    if !ctx.executor.file_exists(&remote) {
        ctx.reporter
            .info(&format!("{} does not exist.", remote.display()));
        return Ok(());
    }

    ctx.reporter.info(&format!("Deleting {}!", remote.display()));
    ctx.executor
        .execute_as_root(&format!("rm '{}'", remote.display()))?;
    service::reload(ctx)
}
