//! HTML rendering of the download picker.
//!
//! The selects are rendered with the initial (most recent) selection already
//! in place; the embedded script takes over on load and repeats the cascade
//! of [`crate::selection`] in the browser.

use mkge_schema::{NO_RUNTIME_VALUE, SerializedTree};
use std::borrow::Cow;
use std::fmt::Write;

use crate::selection::{SelectionController, SelectionError};

/// Heading shown when no archive was found.
pub const EMPTY_MESSAGE: &str =
    "There is no version of MadKitGroupExtension to download on this server !";

/// Label of the "no bundled runtime" option.
pub const NO_RUNTIME_LABEL: &str = "Do not include MadKit";

/// Errors while rendering the page.
#[derive(thiserror::Error, Debug)]
pub enum PageError {
    /// The tree could not be encoded for the script.
    #[error("Failed to encode version tree: {0}")]
    Json(#[from] serde_json::Error),

    /// The tree has an empty level.
    #[error("Malformed version tree: {0}")]
    Selection(#[from] SelectionError),

    /// Writing into the output buffer failed.
    #[error("Failed to write page: {0}")]
    Fmt(#[from] std::fmt::Error),
}

/// Page-level settings.
#[derive(Debug, Clone, Copy)]
pub struct PageOptions<'a> {
    /// Title and main heading.
    pub title: &'a str,
    /// URL prefix of the downloads directory, ending with `/`.
    pub base_url: &'a str,
}

/// Escape text for HTML element content and attribute values.
pub fn escape_html(raw: &str) -> Cow<'_, str> {
    if !raw.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(raw);
    }
    let mut out = String::with_capacity(raw.len() + 8);
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Encode `value` as JSON safe to place inside a `<script>` element.
fn script_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

fn write_select<'k>(
    out: &mut String,
    id: &str,
    handler: &str,
    keys: impl Iterator<Item = &'k str>,
    selected: Option<usize>,
) -> std::fmt::Result {
    writeln!(
        out,
        "          <select name=\"{id}\" id=\"{id}\" onchange=\"{handler}()\">"
    )?;
    for (i, key) in keys.enumerate() {
        let key = escape_html(key);
        let mark = if selected == Some(i) { " selected" } else { "" };
        writeln!(out, "            <option value=\"{key}\"{mark}>{key}</option>")?;
    }
    writeln!(out, "          </select>")
}

fn write_form(out: &mut String, ctl: &SelectionController) -> std::fmt::Result {
    let state = ctl.state();

    out.push_str(
        "    <p>The default parameters enable to get the latest version.</p>\n    \
         <p>In order to reduce problems of versions between MadKitGroupExtension and MadKit, \
         it is recommended to download an archive with madkit included (default option).</p>\n",
    );
    out.push_str("    <table class=\"picker\">\n");
    out.push_str(
        "      <tr><td rowspan=\"2\">Select your version (from Major to Type)</td>\
         <th>Major</th><th>Minor</th><th>Revision</th><th>Type</th></tr>\n",
    );
    out.push_str("      <tr>\n        <td>\n");
    write_select(
        out,
        "major",
        "majorChanged",
        ctl.majors().iter().map(|n| n.key.as_str()),
        Some(state.major()),
    )?;
    out.push_str("        </td>\n        <td>\n");
    write_select(
        out,
        "minor",
        "minorChanged",
        ctl.minors().iter().map(|n| n.key.as_str()),
        Some(state.minor()),
    )?;
    out.push_str("        </td>\n        <td>\n");
    write_select(
        out,
        "revision",
        "revisionChanged",
        ctl.revisions().iter().map(|n| n.key.as_str()),
        Some(state.revision()),
    )?;
    out.push_str("        </td>\n        <td>\n");
    write_select(
        out,
        "type",
        "typeChanged",
        ctl.types().iter().map(|n| n.key.as_str()),
        Some(state.release()),
    )?;
    out.push_str("        </td>\n      </tr>\n");

    out.push_str(
        "      <tr>\n        <td>Select the madkit version you want to be included.<br>\
         Select '",
    );
    out.push_str(NO_RUNTIME_LABEL);
    out.push_str("' else.</td>\n        <td colspan=\"4\">\n");
    writeln!(
        out,
        "          <select name=\"madkit\" id=\"madkit\" onchange=\"madkitChanged()\">"
    )?;
    let none_mark = if state.runtime().is_none() { " selected" } else { "" };
    writeln!(
        out,
        "            <option value=\"{NO_RUNTIME_VALUE}\"{none_mark}>{NO_RUNTIME_LABEL}</option>"
    )?;
    for (i, runtime) in ctl.runtimes().iter().enumerate() {
        let runtime = escape_html(runtime);
        let mark = if state.runtime() == Some(i) { " selected" } else { "" };
        writeln!(
            out,
            "            <option value=\"{runtime}\"{mark}>{runtime}</option>"
        )?;
    }
    out.push_str("          </select>\n        </td>\n      </tr>\n");

    out.push_str(
        "      <tr><td><label for=\"src\">Include source code</label></td>\
         <td colspan=\"4\"><input type=\"checkbox\" name=\"src\" id=\"src\" value=\"src\" checked></td></tr>\n",
    );
    out.push_str(
        "      <tr><td><label for=\"doc\">Include documentation</label></td>\
         <td colspan=\"4\"><input type=\"checkbox\" name=\"doc\" id=\"doc\" value=\"doc\" checked></td></tr>\n",
    );
    out.push_str(
        "      <tr><td colspan=\"5\" class=\"download\">\
         <button type=\"button\" onclick=\"getFile()\">Download</button></td></tr>\n",
    );
    out.push_str("    </table>\n");
    Ok(())
}

const PICKER_SCRIPT: &str = r#"
var current = { major: null, minor: null, revision: null, type: null, madkit: null };

function byKey(nodes, key) {
  for (var i = 0; i < nodes.length; i++) {
    if (nodes[i].key == key) return nodes[i];
  }
  return null;
}

function fill(id, nodes) {
  var select = document.getElementById(id);
  select.innerHTML = "";
  for (var i = 0; i < nodes.length; i++) {
    var option = document.createElement("option");
    option.text = nodes[i].key;
    option.value = nodes[i].key;
    select.add(option);
  }
  select.selectedIndex = 0;
}

function setType(type) {
  current.type = type;
  var select = document.getElementById("madkit");
  select.innerHTML = "";
  var none = document.createElement("option");
  none.text = NO_RUNTIME_LABEL;
  none.value = NO_RUNTIME_VALUE;
  select.add(none);
  for (var i = 0; i < type.children.length; i++) {
    var option = document.createElement("option");
    option.text = type.children[i];
    option.value = type.children[i];
    select.add(option);
  }
  current.madkit = type.children.length > 0 ? type.children[0] : null;
  select.selectedIndex = type.children.length > 0 ? 1 : 0;
}

function setRevision(revision) {
  current.revision = revision;
  fill("type", revision.children);
  setType(revision.children[0]);
}

function setMinor(minor) {
  current.minor = minor;
  fill("revision", minor.children);
  setRevision(minor.children[0]);
}

function setMajor(major) {
  current.major = major;
  fill("minor", major.children);
  setMinor(major.children[0]);
}

function majorChanged() {
  var node = byKey(TREE.majors, document.getElementById("major").value);
  if (node) setMajor(node);
}

function minorChanged() {
  var node = byKey(current.major.children, document.getElementById("minor").value);
  if (node) setMinor(node);
}

function revisionChanged() {
  var node = byKey(current.minor.children, document.getElementById("revision").value);
  if (node) setRevision(node);
}

function typeChanged() {
  var node = byKey(current.revision.children, document.getElementById("type").value);
  if (node) setType(node);
}

function madkitChanged() {
  var value = document.getElementById("madkit").value;
  current.madkit = value == NO_RUNTIME_VALUE ? null : value;
}

function getFile() {
  var series = "mkge-" + current.major.key + "." + current.minor.key;
  var stem = series + "." + current.revision.key + current.type.key;
  var url = BASE_URL + series + "/";
  if (current.madkit === null) {
    url += "WithoutMadKit/" + stem;
  } else {
    url += "WithMadKit/" + stem + "+madkit-" + current.madkit;
  }
  if (document.getElementById("src").checked) url += "_withsrc";
  url += document.getElementById("doc").checked ? "_withdoc.zip" : ".jar";
  window.location.href = url;
}

fill("major", TREE.majors);
setMajor(TREE.majors[0]);
"#;

/// Render the complete picker page for `tree`.
///
/// An empty tree renders the "nothing available" message and no form.
///
/// # Errors
///
/// [`PageError::Selection`] for a tree with an empty intermediate level,
/// [`PageError::Json`] if the tree cannot be encoded.
pub fn render(tree: &SerializedTree, options: &PageOptions<'_>) -> Result<String, PageError> {
    let title = escape_html(options.title);
    let mut out = String::with_capacity(8 * 1024);

    out.push_str("<!DOCTYPE html>\n<html>\n  <head>\n");
    out.push_str("    <meta charset=\"utf-8\">\n");
    writeln!(out, "    <title>{title} - Choose your version</title>")?;
    out.push_str("  </head>\n  <body>\n");

    if tree.is_empty() {
        writeln!(out, "    <h2>{EMPTY_MESSAGE}</h2>")?;
    } else {
        let ctl = SelectionController::new(tree.clone())?;
        writeln!(out, "    <h1>{title}</h1>")?;
        write_form(&mut out, &ctl)?;

        out.push_str("    <script type=\"text/javascript\">\n");
        writeln!(out, "var TREE = {};", script_json(tree)?)?;
        writeln!(out, "var BASE_URL = {};", script_json(options.base_url)?)?;
        writeln!(out, "var NO_RUNTIME_VALUE = {};", script_json(NO_RUNTIME_VALUE)?)?;
        writeln!(out, "var NO_RUNTIME_LABEL = {};", script_json(NO_RUNTIME_LABEL)?)?;
        out.push_str(PICKER_SCRIPT);
        out.push_str("    </script>\n");
    }

    out.push_str("  </body>\n</html>\n");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use crate::serializer::serialize;
    use crate::tree::VersionTree;

    const OPTIONS: PageOptions<'static> = PageOptions {
        title: "MadKitGroupExtension downloads",
        base_url: "http://madkitgroupextension.free.fr/downloads/",
    };

    fn tree_of(names: &[&str]) -> SerializedTree {
        let tree: VersionTree = names.iter().map(|n| parse(n).unwrap()).collect();
        serialize(&tree.sort())
    }

    #[test]
    fn test_empty_tree_renders_message_only() {
        let html = render(&SerializedTree::default(), &OPTIONS).unwrap();
        assert!(html.contains(EMPTY_MESSAGE));
        assert!(!html.contains("<select"));
        assert!(!html.contains("<script"));
    }

    #[test]
    fn test_form_preselects_most_recent() {
        let html = render(
            &tree_of(&[
                "mkge-1.2.3Stable+madkit-5.0.0.1",
                "mkge-1.2.3Stable+madkit-5.1.0.0",
                "mkge-0.9.1Beta2+madkit-5.0.0.1",
            ]),
            &OPTIONS,
        )
        .unwrap();

        assert!(html.contains("<option value=\"1\" selected>1</option>"));
        assert!(html.contains("<option value=\"0\">0</option>"));
        assert!(html.contains("<option value=\"Stable\" selected>Stable</option>"));
        assert!(html.contains("<option value=\"5.1.0.0\" selected>5.1.0.0</option>"));
        assert!(html.contains("<option value=\"nomadkit\">Do not include MadKit</option>"));
        assert!(html.contains("id=\"src\" value=\"src\" checked"));
        assert!(html.contains("id=\"doc\" value=\"doc\" checked"));
        assert!(html.contains("var TREE = {\"majors\":[{\"key\":\"1\""));
        assert!(html.contains(
            "var BASE_URL = \"http://madkitgroupextension.free.fr/downloads/\";"
        ));
    }

    #[test]
    fn test_script_json_cannot_close_script() {
        assert_eq!(script_json("a</script>b").unwrap(), "\"a<\\/script>b\"");
    }

    #[test]
    fn test_title_is_escaped() {
        let html = render(
            &SerializedTree::default(),
            &PageOptions {
                title: "<b>&</b>",
                ..OPTIONS
            },
        )
        .unwrap();
        assert!(html.contains("<title>&lt;b&gt;&amp;&lt;/b&gt; - Choose your version</title>"));
    }
}
