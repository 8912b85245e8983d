//! Passenger configuration migration
//!
//! `update-configuration` re-points the Apache Passenger directives at a
//! newly installed Ruby/Passenger pair without discarding unrelated
//! configuration. The run is strictly sequential; every mutation is
//! preceded by a timestamped remote backup, and the operator can abort at
//! each confirmation gate before anything has been touched.

use std::fs;
use std::path::Path;

use chrono::Utc;

use super::CommandContext;
use crate::error::{ShipwayError, ShipwayResult};
use crate::executor::CopyDirection;
use crate::probe::{self, DetectedVersions};

const CONFIGURATION_FILE: &str = "/etc/apache2/apache2.conf";
const CONFIGURATION_FILE_NAME: &str = "apache2.conf";

const BUILD_DEPENDENCIES: &str = "aptitude update; aptitude install -y build-essential \
     libcurl4-openssl-dev libcurl4-gnutls-dev bison openssl libreadline5 libreadline5-dev \
     curl git zlib1g zlib1g-dev libssl-dev libsqlite3-0 libsqlite3-dev sqlite3 libxml2-dev";

const APACHE_DEPENDENCIES: &str = "aptitude update; aptitude install -y apache2-mpm-prefork \
     apache2-prefork-dev libapr1-dev libaprutil1-dev";

pub fn update_configuration(ctx: &CommandContext) -> ShipwayResult<()> {
    migrate(ctx, Utc::now().timestamp())
}

fn migrate(ctx: &CommandContext, timestamp: i64) -> ShipwayResult<()> {
    let config_file = Path::new(CONFIGURATION_FILE);

    // validate: nothing to migrate unless all three directives are present
    ctx.reporter.info(&format!(
        "Checking {} for the current Passenger configuration.",
        config_file.display()
    ));
    let contents = ctx
        .executor
        .execute_as_root(&format!("cat '{}'", config_file.display()))?;
    if !contents.contains("passenger_module")
        || !contents.contains("PassengerRoot")
        || !contents.contains("PassengerRuby")
    {
        return Err(ShipwayError::ConfigurationNotManaged {
            path: config_file.to_path_buf(),
        });
    }

    // ensure the gem exists under the default Ruby; an install here is a
    // recoverable step, not a failure
    ctx.reporter
        .info("Checking if Passenger is installed under the default Ruby.");
    if !ctx.executor.is_installed("passenger") {
        ctx.reporter
            .info("Passenger isn't installed for the current Ruby.");
        ctx.reporter.info("Installing latest Phusion Passenger gem..");
        ctx.executor
            .execute_as_root("gem install passenger --no-ri --no-rdoc")?;
    }

    let versions = detect_versions(ctx)?;

    ctx.reporter.info(&format!(
        "\n[Detected versions]\n\n  Ruby version:              {}\n  Phusion Passenger version: {}\n",
        versions.ruby, versions.passenger
    ));
    if !ctx.prompter.confirm(
        "Apache will now be configured to work with the above versions. Is this correct?",
    )? {
        return Err(ShipwayError::Aborted);
    }

    ensure_stack(ctx, &versions)?;

    // stage the remote file locally and rewrite the directives; the scratch
    // dir is removed when `staging` drops, success or not
    let staging = ctx.workspace.staging()?;
    let staged = staging.path().join(CONFIGURATION_FILE_NAME);
    ctx.reporter
        .info("Updating Phusion Passenger paths in the Apache configuration.");
    ctx.executor
        .copy(CopyDirection::Download, &staged, config_file)?;
    let original = fs::read_to_string(&staged)?;
    fs::write(&staged, probe::rewrite_configuration(&original, &versions))?;

    // timestamped backup keeps repeated migrations from colliding
    ctx.executor.execute_as_root(&format!(
        "cp '{0}' '{0}.backup.{1}'",
        config_file.display(),
        timestamp
    ))?;

    ctx.executor.copy(CopyDirection::Upload, &staged, config_file)?;

    ctx.reporter.info(&format!(
        "The Apache configuration file has been updated: {}",
        config_file.display()
    ));
    ctx.reporter.warn(
        "If you changed Ruby versions, be sure that all the gems for your applications are installed.",
    );
    ctx.reporter.info(&format!(
        "Run 'shipway restart {}' to restart Apache and have the applied updates take effect.",
        ctx.environment.name
    ));
    Ok(())
}

/// Probe the installed module version and the Ruby it was installed under.
fn detect_versions(ctx: &CommandContext) -> ShipwayResult<DetectedVersions> {
    ctx.reporter
        .info("Finding current Phusion Passenger gem version..");
    let version_out = ctx.executor.execute_as_root("passenger-config --version")?;
    let passenger =
        probe::parse_module_version(&version_out).ok_or_else(|| ShipwayError::DetectionFailed {
            what: "the current Passenger version".to_string(),
        })?;

    ctx.reporter
        .info("Finding current Ruby version for the current Phusion Passenger gem..");
    let root_out = ctx.executor.execute_as_root("passenger-config --root")?;
    let ruby = probe::parse_interpreter_version(&root_out).ok_or_else(|| {
        ShipwayError::DetectionFailed {
            what: "the current Ruby version under which the Passenger gem has been installed"
                .to_string(),
        }
    })?;

    Ok(DetectedVersions { ruby, passenger })
}

/// Verify the module was fully installed against Apache for the detected
/// pair; offer a reinstall/update of the whole stack if not.
fn ensure_stack(ctx: &CommandContext, versions: &DetectedVersions) -> ShipwayResult<()> {
    if ctx
        .executor
        .directory_exists(Path::new(&probe::agents_dir(versions)))
    {
        return Ok(());
    }

    ctx.reporter.info(
        "Phusion Passenger has not yet been installed for this Ruby's Passenger gem. \
         You need to reinstall/update Apache and Passenger to proceed with the configuration.",
    );
    ctx.reporter.info(
        "NOTE: your current Apache configuration will not be lost. This is a reinstall/update \
         that does not remove your Apache configuration.",
    );
    if !ctx.prompter.confirm(&format!(
        "Would you like to reinstall/update Apache and Phusion Passenger {} for {}?",
        versions.passenger, versions.ruby
    ))? {
        return Err(ShipwayError::Aborted);
    }

    ctx.reporter
        .info("Ensuring Phusion Passenger and Apache dependencies are installed..");
    ctx.executor.execute_as_root(BUILD_DEPENDENCIES)?;
    ctx.executor.execute_as_root(APACHE_DEPENDENCIES)?;

    ctx.reporter
        .info("Installing Apache with the Phusion Passenger module, this may take a while..");
    ctx.executor
        .execute_as_root("passenger-install-apache2-module --auto")?;
    Ok(())
}
