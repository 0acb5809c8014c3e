//! Visualization of a flow's step graph.
//!
//! The graph is rendered as a Mermaid `flowchart TD` and embedded in a
//! self-contained HTML page that loads Mermaid from a CDN.

use super::graph::FlowGraph;
use crate::files::write_atomic;
use std::fmt::Write;
use std::path::{Path, PathBuf};

const MERMAID_CDN: &str = "https://cdn.jsdelivr.net/npm/mermaid@10/dist/mermaid.min.js";

/// Mermaid source for `graph`.
///
/// Start steps are drawn as stadiums with the `start` class. Edges from
/// `all` triggers are solid; edges from `any` triggers are dashed.
pub fn render_mermaid<S>(graph: &FlowGraph<S>) -> String {
    let nodes = graph.nodes();
    let id_of = |name: &str| {
        nodes
            .iter()
            .position(|n| n.name == name)
            .map(|i| format!("s{i}"))
    };

    let mut out = String::from("flowchart TD\n");

    for (i, node) in nodes.iter().enumerate() {
        let label = escape_label(&node.name);
        if node.is_start() {
            let _ = writeln!(out, "    s{i}([\"{label}\"]):::start");
        } else {
            let _ = writeln!(out, "    s{i}[\"{label}\"]");
        }
    }

    for (i, node) in nodes.iter().enumerate() {
        let Some(trigger) = &node.trigger else {
            continue;
        };
        let arrow = if trigger.is_any() { "-.->" } else { "-->" };
        for source in trigger.sources() {
            if let Some(from) = id_of(source) {
                let _ = writeln!(out, "    {from} {arrow} s{i}");
            }
        }
    }

    out.push_str("    classDef start fill:#ff5a50,stroke:#333,color:#fff\n");
    out
}

/// A standalone HTML page showing `graph`.
pub fn render_html<S>(graph: &FlowGraph<S>) -> String {
    let title = escape_html(graph.name());
    let diagram = escape_html(&render_mermaid(graph));

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{title}</title>
  <script src="{MERMAID_CDN}"></script>
  <style>
    body {{ font-family: sans-serif; margin: 2rem; }}
  </style>
</head>
<body>
  <h1>{title}</h1>
  <pre class="mermaid">
{diagram}</pre>
  <script>mermaid.initialize({{ startOnLoad: true }});</script>
</body>
</html>
"#
    )
}

/// Write `<dir>/<plot_name>.html` and return its path.
pub fn write_plot<S>(graph: &FlowGraph<S>, dir: &Path, plot_name: &str) -> std::io::Result<PathBuf> {
    let path = dir.join(format!("{plot_name}.html"));
    write_atomic(&path, &render_html(graph))?;
    tracing::info!(path = %path.display(), "plot saved");
    Ok(path)
}

fn escape_label(name: &str) -> String {
    name.replace('"', "#quot;")
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
