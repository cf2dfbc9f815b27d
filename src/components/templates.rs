use crate::types::PageView;
use crate::utils::escape_html;

const STYLE: &str = r#"<style>
body { max-width: 32em; margin: 0 auto; padding: 1em; font: 1.15em/1.5 Georgia, "Times New Roman", serif; color: #333; }
a, a:visited { color: #0060c0; }
header { margin-bottom: 1em; }
header a { text-decoration: none; }
header #edit { float: right; }
h1, h2, h3, h4, h5, h6 { line-height: 1.2; }
pre { background: #f0f0f0; padding: .5em; overflow: auto; font-family: Menlo, Consolas, monospace; }
img { max-width: 100%; }
blockquote { border-left: .3em solid #e0e0e0; margin-left: 0; padding-left: 1em; }
table { width: 100%; border-collapse: collapse; }
th { border-bottom: 1px solid #333; }
td { padding: .5em; }
textarea { width: 100%; box-sizing: border-box; }
</style>"#;

/// Component for handling HTML template rendering
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateComponent;

impl TemplateComponent {
    /// Create a new template component
    pub fn new() -> Self {
        Self
    }

    /// Render a complete HTML document for `view`.
    ///
    /// In edit mode the body is page source and is escaped into the textarea.
    /// Otherwise it is trusted rendered HTML and embedded as is.
    pub fn render_page(&self, view: &PageView) -> String {
        let page = escape_html(&view.page_name);
        let wiki = escape_html(&view.wiki_name);

        let controls = match (view.wiki_editable, view.edit_page) {
            (false, _) => String::new(),
            (true, true) => concat!(
                "<div id=\"edit\">",
                "<input form=\"form\" type=\"password\" autocomplete=\"current-password\" name=\"pass\" placeholder=\"Password\"> ",
                "<input form=\"form\" type=\"submit\" value=\"\u{2713}\">",
                "</div>"
            )
            .to_string(),
            (true, false) => format!("<div id=\"edit\"><a href=\"/e/{page}\">\u{270e}</a></div>"),
        };

        let content = if view.edit_page {
            format!(
                "<form id=\"form\" action=\"/e/{page}\" method=\"post\">\n<textarea autofocus rows=\"30\" name=\"body\">{}</textarea>\n</form>",
                escape_html(&view.body)
            )
        } else {
            view.body.clone()
        };

        format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<title>{page} :: {wiki}</title>\n<meta charset=\"utf-8\">\n<meta name=\"viewport\" content=\"width=device-width,initial-scale=1\">\n<link rel=\"icon\" href=\"data:,\">\n{STYLE}\n</head>\n<body>\n<header><b>{page}</b> :: <a href=\"/\">{wiki}</a>{controls}</header>\n{content}\n</body>\n</html>\n"
        )
    }
}
