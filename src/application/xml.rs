//! Minimal XML writer shared by the sitemap renderers.
//!
//! All text and attribute values pass through [`escape`]; callers never
//! interpolate raw strings into markup.

const INDENT: &str = "  ";

/// Escape the five XML special characters, ampersand first.
pub fn escape(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

pub struct XmlWriter {
    buf: String,
    open: Vec<&'static str>,
}

impl XmlWriter {
    pub fn new() -> Self {
        Self {
            buf: String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n"),
            open: Vec::new(),
        }
    }

    pub fn open(&mut self, name: &'static str, attrs: &[(&str, &str)]) -> &mut Self {
        self.indent();
        self.buf.push('<');
        self.buf.push_str(name);
        self.push_attrs(attrs);
        self.buf.push_str(">\n");
        self.open.push(name);
        self
    }

    /// Close the most recently opened element.
    pub fn close(&mut self) -> &mut Self {
        if let Some(name) = self.open.pop() {
            self.indent();
            self.buf.push_str("</");
            self.buf.push_str(name);
            self.buf.push_str(">\n");
        }
        self
    }

    pub fn text_element(&mut self, name: &str, text: &str) -> &mut Self {
        self.indent();
        self.buf.push('<');
        self.buf.push_str(name);
        self.buf.push('>');
        self.buf.push_str(&escape(text));
        self.buf.push_str("</");
        self.buf.push_str(name);
        self.buf.push_str(">\n");
        self
    }

    pub fn empty_element(&mut self, name: &str, attrs: &[(&str, &str)]) -> &mut Self {
        self.indent();
        self.buf.push('<');
        self.buf.push_str(name);
        self.push_attrs(attrs);
        self.buf.push_str("/>\n");
        self
    }

    /// Close anything still open and return the document.
    pub fn finish(mut self) -> String {
        while !self.open.is_empty() {
            self.close();
        }
        self.buf
    }

    fn push_attrs(&mut self, attrs: &[(&str, &str)]) {
        for (key, value) in attrs {
            self.buf.push(' ');
            self.buf.push_str(key);
            self.buf.push_str("=\"");
            self.buf.push_str(&escape(value));
            self.buf.push('"');
        }
    }

    fn indent(&mut self) {
        for _ in 0..self.open.len() {
            self.buf.push_str(INDENT);
        }
    }
}

impl Default for XmlWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_ampersand_first() {
        assert_eq!(
            escape(r#"Tom & "Jerry's" <b>"#),
            "Tom &amp; &quot;Jerry&apos;s&quot; &lt;b&gt;"
        );
        assert_eq!(escape("&lt;"), "&amp;lt;");
    }

    #[test]
    fn writer_nests_and_closes() {
        let mut xml = XmlWriter::new();
        xml.open("urlset", &[("xmlns", "urn:x")])
            .open("url", &[])
            .text_element("loc", "a&b")
            .close();
        let out = xml.finish();
        assert_eq!(
            out,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"urn:x\">\n  <url>\n    <loc>a&amp;b</loc>\n  </url>\n</urlset>\n"
        );
    }
}
