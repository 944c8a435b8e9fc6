//! ALTO page annotations.
//!
//! Only the parts of the schema needed for line extraction are read: every
//! `TextLine` in document order, its first `Polygon`, and the `CONTENT` of its
//! `String` descendants. Every element query is qualified with the namespace
//! passed by the caller.

use crate::core::constants::FALLBACK_LINE_PREFIX;
use crate::core::errors::{ExtractError, ExtractResult};
use roxmltree::{Document, Node};
use std::path::Path;

/// One annotated text line of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLine {
    /// The `ID` attribute, when present and non-blank.
    pub id: Option<String>,
    /// File-name-safe label: the `ID`, or `line{N}` with N the 1-based
    /// position of the line within the page.
    pub label: String,
    /// Raw `POINTS` of the line's polygon.
    ///
    /// `None` when the line has no `Polygon` element; empty when the polygon
    /// has no `POINTS` attribute.
    pub polygon_points: Option<String>,
    /// `CONTENT` of the `String` descendants joined by single spaces, trimmed.
    pub transcription: String,
}

impl TextLine {
    fn from_node(node: Node<'_, '_>, position: usize, namespace: &str) -> Self {
        let id = node
            .attribute("ID")
            .filter(|id| !id.trim().is_empty())
            .map(str::to_string);
        let label = id
            .as_deref()
            .map(sanitize_label)
            .unwrap_or_else(|| format!("{FALLBACK_LINE_PREFIX}{position}"));

        let polygon_points = node
            .descendants()
            .find(|n| n.has_tag_name((namespace, "Polygon")))
            .map(|polygon| polygon.attribute("POINTS").unwrap_or_default().to_string());

        let transcription = node
            .descendants()
            .filter(|n| n.has_tag_name((namespace, "String")))
            .map(|s| s.attribute("CONTENT").unwrap_or_default())
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_string();

        Self {
            id,
            label,
            polygon_points,
            transcription,
        }
    }
}

/// The text lines of one ALTO page, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AltoPage {
    pub lines: Vec<TextLine>,
}

impl AltoPage {
    /// Parses an ALTO document.
    ///
    /// A well-formed document without any `TextLine` in `namespace` yields an
    /// empty page.
    pub fn parse(xml: &str, namespace: &str) -> Result<Self, roxmltree::Error> {
        let doc = Document::parse(xml)?;
        let lines = doc
            .descendants()
            .filter(|n| n.has_tag_name((namespace, "TextLine")))
            .enumerate()
            .map(|(idx, node)| TextLine::from_node(node, idx + 1, namespace))
            .collect();
        Ok(Self { lines })
    }

    /// Reads and parses an ALTO file.
    ///
    /// # Errors
    ///
    /// * [`ExtractError::PathIo`] if the file cannot be read
    /// * [`ExtractError::XmlParse`] if it is not well-formed XML
    pub fn from_file(path: &Path, namespace: &str) -> ExtractResult<Self> {
        let xml = std::fs::read_to_string(path).map_err(|e| ExtractError::path_io(path, e))?;
        Self::parse(&xml, namespace).map_err(|source| ExtractError::XmlParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Number of text lines on the page.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns true if the page has no text lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Makes a line identifier usable as a file name.
fn sanitize_label(id: &str) -> String {
    id.trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::ALTO_V4_NAMESPACE;

    const PAGE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<alto xmlns="http://www.loc.gov/standards/alto/ns-v4#">
  <Layout>
    <Page ID="p1" WIDTH="100" HEIGHT="100">
      <PrintSpace>
        <TextBlock ID="b1">
          <TextLine ID="L1">
            <Shape><Polygon POINTS="0 0 10 0 10 10 0 10"/></Shape>
            <String CONTENT="Hello"/>
            <SP/>
            <String CONTENT="wörld"/>
          </TextLine>
          <TextLine>
            <String CONTENT=" spaced "/>
          </TextLine>
          <TextLine ID="L3">
            <Shape><Polygon/></Shape>
            <String/>
            <String CONTENT="tail"/>
          </TextLine>
        </TextBlock>
      </PrintSpace>
    </Page>
  </Layout>
</alto>"#;

    #[test]
    fn test_parse_lines_in_document_order() {
        let page = AltoPage::parse(PAGE, ALTO_V4_NAMESPACE).unwrap();
        assert_eq!(page.len(), 3);

        let labels: Vec<&str> = page.lines.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, vec!["L1", "line2", "L3"]);
    }

    #[test]
    fn test_parse_polygon_and_transcription() {
        let page = AltoPage::parse(PAGE, ALTO_V4_NAMESPACE).unwrap();

        let first = &page.lines[0];
        assert_eq!(first.id.as_deref(), Some("L1"));
        assert_eq!(first.polygon_points.as_deref(), Some("0 0 10 0 10 10 0 10"));
        assert_eq!(first.transcription, "Hello wörld");

        let second = &page.lines[1];
        assert_eq!(second.id, None);
        assert_eq!(second.polygon_points, None);
        assert_eq!(second.transcription, "spaced");

        let third = &page.lines[2];
        assert_eq!(third.polygon_points.as_deref(), Some(""));
        assert_eq!(third.transcription, "tail");
    }

    #[test]
    fn test_parse_ignores_other_namespaces() {
        let page = AltoPage::parse(PAGE, "http://www.loc.gov/standards/alto/ns-v3#").unwrap();
        assert!(page.is_empty());

        let unqualified = r#"<alto><TextLine ID="x"/></alto>"#;
        let page = AltoPage::parse(unqualified, ALTO_V4_NAMESPACE).unwrap();
        assert!(page.is_empty());
    }

    #[test]
    fn test_parse_custom_namespace() {
        let v3 = r#"<alto xmlns:a="http://www.loc.gov/standards/alto/ns-v3#">
            <a:TextLine ID="v3"><a:Polygon POINTS="1 1 9 1 9 9"/></a:TextLine>
        </alto>"#;
        let page = AltoPage::parse(v3, "http://www.loc.gov/standards/alto/ns-v3#").unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page.lines[0].polygon_points.as_deref(), Some("1 1 9 1 9 9"));
    }

    #[test]
    fn test_parse_rejects_malformed_xml() {
        assert!(AltoPage::parse("<alto><TextLine></alto>", ALTO_V4_NAMESPACE).is_err());
    }

    #[test]
    fn test_blank_and_unsafe_ids() {
        let xml = r#"<alto xmlns="http://www.loc.gov/standards/alto/ns-v4#">
            <TextLine ID="  "/>
            <TextLine ID="../etc/passwd"/>
        </alto>"#;
        let page = AltoPage::parse(xml, ALTO_V4_NAMESPACE).unwrap();
        assert_eq!(page.lines[0].id, None);
        assert_eq!(page.lines[0].label, "line1");
        assert_eq!(page.lines[1].label, ".._etc_passwd");
    }

    #[test]
    fn test_from_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.xml");
        assert!(matches!(
            AltoPage::from_file(&missing, ALTO_V4_NAMESPACE),
            Err(ExtractError::PathIo { .. })
        ));

        let broken = dir.path().join("broken.xml");
        std::fs::write(&broken, "<alto>").unwrap();
        assert!(matches!(
            AltoPage::from_file(&broken, ALTO_V4_NAMESPACE),
            Err(ExtractError::XmlParse { .. })
        ));
    }
}
