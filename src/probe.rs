//! Passenger version probing and configuration rewriting
//!
//! The RVM path conventions (`/usr/local/rvm/gems/<ruby>/gems/passenger-…`)
//! are environment-specific and fragile, so every pattern lives here and
//! nowhere else. When remote output lists several matching directories the
//! first match wins.

use std::sync::OnceLock;

use regex::Regex;

/// Versions detected on the remote host within a single orchestration run.
/// Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedVersions {
    /// RVM ruby segment, e.g. "ruby-3.2.2"
    pub ruby: String,
    /// Passenger gem version, e.g. "6.0.20"
    pub passenger: String,
}

fn version_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+\.\d+\.\S+)").unwrap())
}

fn root_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"/usr/local/rvm/gems/([^/\s]+)/gems/passenger-[^/\s]+").unwrap())
}

fn load_module_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"LoadModule passenger_module /usr/local/rvm/gems/[^/\s]+/gems/passenger-[^/\s]+/ext/apache2/mod_passenger\.so",
        )
        .unwrap()
    })
}

fn passenger_root_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"PassengerRoot /usr/local/rvm/gems/[^/\s]+/gems/passenger-\S+").unwrap()
    })
}

fn passenger_ruby_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"PassengerRuby /usr/local/rvm/wrappers/[^/\s]+/ruby").unwrap())
}

/// Extract the Passenger gem version from `passenger-config --version` output.
///
/// First version-like token (`major.minor.rest`) wins.
pub fn parse_module_version(output: &str) -> Option<String> {
    version_re()
        .captures(output)
        .map(|c| c[1].trim().to_string())
}

/// Extract the RVM ruby segment from `passenger-config --root` output.
pub fn parse_interpreter_version(output: &str) -> Option<String> {
    root_re().captures(output).map(|c| c[1].to_string())
}

/// Gem directory of a (ruby, passenger) pair under RVM.
pub fn gem_dir(versions: &DetectedVersions) -> String {
    format!(
        "/usr/local/rvm/gems/{}/gems/passenger-{}",
        versions.ruby, versions.passenger
    )
}

/// Support-agent directory whose presence means the module was fully
/// installed against the web server, not merely packaged.
pub fn agents_dir(versions: &DetectedVersions) -> String {
    format!("{}/agents", gem_dir(versions))
}

/// Re-point the three Passenger directives at the detected version pair.
///
/// Substitutions are independent: a directive whose current line does not
/// match its versioned path pattern is left unmodified, and the others are
/// still applied. Each substitution replaces the first occurrence only.
pub fn rewrite_configuration(contents: &str, versions: &DetectedVersions) -> String {
    let load_line = format!(
        "LoadModule passenger_module /usr/local/rvm/gems/{}/gems/passenger-{}/ext/apache2/mod_passenger.so",
        versions.ruby, versions.passenger
    );
    let root_line = format!(
        "PassengerRoot /usr/local/rvm/gems/{}/gems/passenger-{}",
        versions.ruby, versions.passenger
    );
    let ruby_line = format!(
        "PassengerRuby /usr/local/rvm/wrappers/{}/ruby",
        versions.ruby
    );

    let contents = load_module_re().replace(contents, load_line.as_str());
    let contents = passenger_root_re().replace(&contents, root_line.as_str());
    passenger_ruby_re()
        .replace(&contents, ruby_line.as_str())
        .into_owned()
}
