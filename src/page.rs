//! The sign-in page.
//!
//! The template is parsed once at startup into literal and placeholder segments,
//! so a broken template stops the server instead of failing requests. Placeholders
//! look like `{{ state }}`; see [`Field`] for the accepted names.

use tracing::info;

/// Values substituted into the page.
pub struct PageData<'a> {
    pub application_name: &'a str,
    pub client_id: &'a str,
    pub scope: &'a str,
    /// Raw anti-forgery token; it is URL-query-escaped on render.
    pub state: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    ApplicationName,
    ClientId,
    Scope,
    State,
}

impl Field {
    fn parse(name: &str) -> Option<Field> {
        match name {
            "application_name" => Some(Field::ApplicationName),
            "client_id" => Some(Field::ClientId),
            "scope" => Some(Field::Scope),
            "state" => Some(Field::State),
            _ => None,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field(Field),
}

/// A parsed index page template.
#[derive(Debug)]
pub struct IndexPage {
    segments: Vec<Segment>,
}

impl IndexPage {
    /// Reads and parses the template at `path`.
    pub fn load(path: &str) -> Result<Self, String> {
        let source = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read template '{}': {}", path, e))?;
        let page = Self::parse(&source).map_err(|e| format!("Template '{}': {}", path, e))?;
        info!("Loaded index template from '{}'", path);
        Ok(page)
    }

    pub fn parse(source: &str) -> Result<Self, String> {
        let mut segments = Vec::new();
        let mut rest = source;

        while let Some(start) = rest.find("{{") {
            if start > 0 {
                segments.push(Segment::Literal(rest[..start].to_string()));
            }
            let after_open = &rest[start + 2..];
            let end = after_open
                .find("}}")
                .ok_or_else(|| "unterminated placeholder".to_string())?;
            let name = after_open[..end].trim();
            let field =
                Field::parse(name).ok_or_else(|| format!("unknown placeholder '{}'", name))?;
            segments.push(Segment::Field(field));
            rest = &after_open[end + 2..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }

        Ok(IndexPage { segments })
    }

    pub fn render(&self, data: &PageData<'_>) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field(Field::ApplicationName) => {
                    out.push_str(&escape_html(data.application_name))
                }
                Segment::Field(Field::ClientId) => out.push_str(&escape_html(data.client_id)),
                Segment::Field(Field::Scope) => out.push_str(&escape_html(data.scope)),
                Segment::Field(Field::State) => {
                    out.push_str(&escape_html(&query_escape(data.state)))
                }
            }
        }
        out
    }
}

/// Escapes `s` for use as a URL query component.
pub fn query_escape(s: &str) -> String {
    url::form_urlencoded::byte_serialize(s.as_bytes()).collect()
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data<'a>(state: &'a str) -> PageData<'a> {
        PageData {
            application_name: "Copy <Pasta>",
            client_id: "web-client",
            scope: "openid",
            state,
        }
    }

    #[test]
    fn test_placeholders_are_substituted() {
        let page = IndexPage::parse("<h1>{{ application_name }}</h1><i>{{client_id}}</i>").unwrap();
        assert_eq!(
            page.render(&data("s")),
            "<h1>Copy &lt;Pasta&gt;</h1><i>web-client</i>"
        );
    }

    #[test]
    fn test_state_is_query_escaped() {
        let page = IndexPage::parse("/connect?state={{ state }}").unwrap();
        assert_eq!(page.render(&data("a+b/c==")), "/connect?state=a%2Bb%2Fc%3D%3D");
    }

    #[test]
    fn test_unknown_placeholder_is_rejected() {
        let err = IndexPage::parse("{{ secret }}").unwrap_err();
        assert!(err.contains("secret"));
    }

    #[test]
    fn test_unterminated_placeholder_is_rejected() {
        assert!(IndexPage::parse("<p>{{ state </p>").is_err());
    }

    #[test]
    fn test_template_without_placeholders_renders_verbatim() {
        let page = IndexPage::parse("<p>static</p>").unwrap();
        assert_eq!(page.render(&data("s")), "<p>static</p>");
    }

    #[test]
    fn test_bundled_template_loads() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/template/index.html");
        let page = IndexPage::load(path).unwrap();
        let html = page.render(&data("abc"));
        assert!(html.contains("web-client"));
        assert!(html.contains("abc"));
    }

    #[test]
    fn test_missing_template_file_is_an_error() {
        assert!(IndexPage::load("/nonexistent/index.html").is_err());
    }
}
