//! Project templates embedded at compile time.

use rust_embed::RustEmbed;

/// Files under the workspace `templates/` directory.
///
/// With `debug-embed` the files are still read from disk in debug builds,
/// so editing a template needs no rebuild.
#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/../../templates"]
pub struct TemplateAssets;

/// Template content by path relative to the templates root.
///
/// ```
/// use cf_core::init::templates::get_template;
///
/// let config = get_template("crewflow.toml").expect("crewflow.toml is embedded");
/// assert!(config.contains("plot_name"));
/// ```
pub fn get_template(path: &str) -> Option<String> {
    TemplateAssets::get(path).map(|file| String::from_utf8_lossy(file.data.as_ref()).to_string())
}

/// Template paths starting with `prefix`, sorted.
pub fn list_templates(prefix: &str) -> Vec<String> {
    let mut paths: Vec<String> = TemplateAssets::iter()
        .filter(|path| path.starts_with(prefix))
        .map(|path| path.to_string())
        .collect();
    paths.sort();
    paths
}
