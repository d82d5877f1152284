//! HTML renderer — standalone pages pairing annotations with code.

use crate::model::{Example, Segment};
use crate::render::{page_file, Neighbors, Renderer};
use anyhow::Result;

pub struct HtmlRenderer;

const STYLE: &str = "\
body { font-family: system-ui, sans-serif; max-width: 64em; margin: 2em auto; padding: 0 1em; }
table.segments { border-collapse: collapse; width: 100%; }
td.docs { width: 40%; vertical-align: top; padding: 0.5em 1em 0.5em 0; }
td.code { vertical-align: top; }
pre { background: #f4f4f4; padding: 0.75em; border-radius: 5px; overflow-x: auto; margin: 0; }
td.empty pre { background: transparent; }
nav.pager { display: flex; justify-content: space-between; margin-top: 2em; }
.description { color: #555; }
";

impl Renderer for HtmlRenderer {
    fn render_example(&self, example: &Example, nav: Neighbors<'_>) -> Result<String> {
        let mut out = String::new();
        push_head(&mut out, &example.title);

        out.push_str("<p><a href=\"index.html\">Index</a></p>\n");
        out.push_str(&format!("<h1>{}</h1>\n", html_escape(&example.title)));
        if !example.description.is_empty() {
            out.push_str(&format!(
                "<p class=\"description\">{}</p>\n",
                html_escape(&example.description)
            ));
        }

        push_segments(&mut out, &example.segments, "source");

        if !example.shell_segments.is_empty() {
            out.push_str("<h2>Running the example</h2>\n");
            push_segments(&mut out, &example.shell_segments, "shell");
        }

        if !example.links.is_empty() {
            out.push_str("<h2>Further reading</h2>\n<ul>\n");
            for link in &example.links {
                let link = html_escape(link);
                out.push_str(&format!("  <li><a href=\"{0}\">{0}</a></li>\n", link));
            }
            out.push_str("</ul>\n");
        }

        out.push_str("<nav class=\"pager\">\n");
        if let Some(prev) = nav.prev {
            out.push_str(&format!(
                "  <a rel=\"prev\" href=\"{}\">&larr; {}</a>\n",
                html_escape(&page_file(prev, "html")),
                html_escape(&prev.title)
            ));
        } else {
            out.push_str("  <span></span>\n");
        }
        if let Some(next) = nav.next {
            out.push_str(&format!(
                "  <a rel=\"next\" href=\"{}\">{} &rarr;</a>\n",
                html_escape(&page_file(next, "html")),
                html_escape(&next.title)
            ));
        }
        out.push_str("</nav>\n");

        out.push_str("</body>\n</html>\n");
        Ok(out)
    }

    fn render_index(&self, examples: &[Example]) -> Result<String> {
        let mut out = String::new();
        push_head(&mut out, "Examples");
        out.push_str("<h1>Examples</h1>\n");

        // Group consecutive examples by section; unsectioned ones form a plain list
        let mut current: Option<Option<&str>> = None;
        for ex in examples {
            let section = ex.section.as_deref();
            if current != Some(section) {
                if current.is_some() {
                    out.push_str("</ul>\n");
                }
                if let Some(title) = section {
                    out.push_str(&format!("<h2>{}</h2>\n", html_escape(title)));
                }
                out.push_str("<ul>\n");
                current = Some(section);
            }
            out.push_str(&format!(
                "  <li><a href=\"{}\">{}</a></li>\n",
                html_escape(&page_file(ex, "html")),
                html_escape(&ex.title)
            ));
        }
        if current.is_some() {
            out.push_str("</ul>\n");
        }

        out.push_str("</body>\n</html>\n");
        Ok(out)
    }

    fn file_extension(&self) -> &str {
        "html"
    }
}

fn push_head(out: &mut String, title: &str) {
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    out.push_str("<meta charset=\"utf-8\">\n");
    out.push_str(&format!("<title>{}</title>\n", html_escape(title)));
    out.push_str("<style>\n");
    out.push_str(STYLE);
    out.push_str("</style>\n");
    out.push_str("</head>\n<body>\n");
}

fn push_segments(out: &mut String, segments: &[Segment], code_class: &str) {
    out.push_str("<table class=\"segments\">\n");
    for seg in segments {
        out.push_str("<tr>\n<td class=\"docs\">");
        for para in seg.annotation.split("\n\n").filter(|p| !p.trim().is_empty()) {
            out.push_str(&format!("<p>{}</p>", html_escape(para).replace('\n', "<br>\n")));
        }
        out.push_str("</td>\n");
        let class = if seg.code.is_empty() { "code empty" } else { "code" };
        out.push_str(&format!(
            "<td class=\"{}\"><pre><code class=\"{}\">{}</code></pre></td>\n</tr>\n",
            class,
            code_class,
            html_escape(&seg.code.join("\n"))
        ));
    }
    out.push_str("</table>\n");
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
