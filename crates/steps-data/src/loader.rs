//! Health-export loading.
//!
//! Reads an XML document from disk and turns it into a generic [`XmlNode`]
//! tree that mirrors the tag hierarchy, with attributes kept as strings.

use std::collections::BTreeMap;
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use steps_core::error::{Result, StepsError};
use tracing::debug;

// ── XmlNode ───────────────────────────────────────────────────────────────────

/// One element of a parsed document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlNode {
    /// Tag name as written, including any namespace prefix.
    pub name: String,
    /// Attribute values, unescaped.
    pub attributes: BTreeMap<String, String>,
    /// Child elements in document order.
    pub children: Vec<XmlNode>,
    /// Concatenated text content, `None` when the element has none.
    pub text: Option<String>,
}

impl XmlNode {
    fn from_start(start: &BytesStart<'_>) -> Result<Self> {
        let mut attributes = BTreeMap::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| StepsError::XmlParse {
                position: 0,
                message: e.to_string(),
            })?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map_err(|e| StepsError::XmlParse {
                    position: 0,
                    message: e.to_string(),
                })?
                .into_owned();
            attributes.insert(key, value);
        }

        Ok(Self {
            name: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
            attributes,
            children: Vec::new(),
            text: None,
        })
    }

    /// Value of attribute `name`, if present.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Resolve a dotted path such as `"HealthData.Record"`.
    ///
    /// The first segment must name this node; each following segment selects
    /// the matching children of every node reached so far. Returns an empty
    /// list when any segment has no match.
    pub fn select(&self, path: &str) -> Vec<&XmlNode> {
        let mut segments = path.split('.');
        match segments.next() {
            Some(root) if root == self.name => {}
            _ => return Vec::new(),
        }

        let mut current: Vec<&XmlNode> = vec![self];
        for segment in segments {
            current = current
                .into_iter()
                .flat_map(|node| node.children.iter().filter(|c| c.name == segment))
                .collect();
            if current.is_empty() {
                break;
            }
        }
        current
    }

    fn push_text(&mut self, text: &str) {
        match self.text.as_mut() {
            Some(existing) => existing.push_str(text),
            None => self.text = Some(text.to_string()),
        }
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Read `path` as UTF-8 and parse it into an [`XmlNode`] tree.
///
/// The file is read in one go and closed before parsing starts.
pub fn load_document(path: &Path) -> Result<XmlNode> {
    let content = std::fs::read_to_string(path).map_err(|source| StepsError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Read {} bytes from {}", content.len(), path.display());
    parse_document(&content)
}

/// Parse an in-memory XML document into an [`XmlNode`] tree.
///
/// Declarations, comments, processing instructions and the DOCTYPE are
/// skipped. Exactly one root element is required.
pub fn parse_document(content: &str) -> Result<XmlNode> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    // Open elements, innermost last.
    let mut stack: Vec<XmlNode> = Vec::new();
    let mut root: Option<XmlNode> = None;

    loop {
        let position = reader.buffer_position() as u64;
        let event = reader.read_event().map_err(|e| StepsError::XmlParse {
            position,
            message: e.to_string(),
        })?;

        match event {
            Event::Start(start) => {
                ensure_no_second_root(&root, position)?;
                stack.push(with_position(XmlNode::from_start(&start), position)?);
            }
            Event::Empty(start) => {
                ensure_no_second_root(&root, position)?;
                let node = with_position(XmlNode::from_start(&start), position)?;
                attach(node, &mut stack, &mut root);
            }
            Event::End(_) => {
                // quick-xml has already checked that the end tag matches.
                if let Some(node) = stack.pop() {
                    attach(node, &mut stack, &mut root);
                }
            }
            Event::Text(text) => {
                let unescaped = text.unescape().map_err(|e| StepsError::XmlParse {
                    position,
                    message: e.to_string(),
                })?;
                match stack.last_mut() {
                    Some(open) => open.push_text(&unescaped),
                    None => {
                        return Err(StepsError::XmlParse {
                            position,
                            message: "text outside of the root element".to_string(),
                        })
                    }
                }
            }
            Event::CData(data) => match stack.last_mut() {
                Some(open) => open.push_text(&String::from_utf8_lossy(&data)),
                None => {
                    return Err(StepsError::XmlParse {
                        position,
                        message: "CDATA outside of the root element".to_string(),
                    })
                }
            },
            Event::Eof => break,
            // Declarations, comments, processing instructions, DOCTYPE.
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(StepsError::XmlParse {
            position: reader.buffer_position() as u64,
            message: format!("unexpected end of document, <{}> is not closed", open.name),
        });
    }

    root.ok_or_else(|| StepsError::XmlParse {
        position: 0,
        message: "document has no root element".to_string(),
    })
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Hang a finished element under its parent, or make it the root.
fn attach(node: XmlNode, stack: &mut [XmlNode], root: &mut Option<XmlNode>) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => *root = Some(node),
    }
}

fn ensure_no_second_root(root: &Option<XmlNode>, position: u64) -> Result<()> {
    if root.is_some() {
        return Err(StepsError::XmlParse {
            position,
            message: "content after the root element".to_string(),
        });
    }
    Ok(())
}

/// Fill in the reader position for attribute errors raised without one.
fn with_position(result: Result<XmlNode>, position: u64) -> Result<XmlNode> {
    result.map_err(|e| match e {
        StepsError::XmlParse { message, .. } => StepsError::XmlParse { position, message },
        other => other,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE HealthData>
<HealthData locale="en_US">
  <!-- exported by the phone -->
  <ExportDate value="2024-02-01 10:00:00 +0000"/>
  <Record type="HKQuantityTypeIdentifierStepCount" value="120"
          creationDate="2024-01-15 09:00:00 +0000"
          startDate="2024-01-15 08:50:00 +0000"
          endDate="2024-01-15 08:55:00 +0000"/>
  <Record type="HKQuantityTypeIdentifierHeartRate" value="64">
    <MetadataEntry key="HKMetadataKeyHeartRateMotionContext" value="0"/>
  </Record>
  <Me>note &amp; more</Me>
</HealthData>
"#;

    fn write_file(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    // ── parse_document ────────────────────────────────────────────────────────

    #[test]
    fn test_parse_builds_hierarchy() {
        let root = parse_document(SAMPLE).unwrap();
        assert_eq!(root.name, "HealthData");
        assert_eq!(root.attr("locale"), Some("en_US"));
        assert_eq!(root.children.len(), 4);
        assert_eq!(root.select("HealthData.Record").len(), 2);

        let heart = &root.children[2];
        assert_eq!(heart.children.len(), 1);
        assert_eq!(heart.children[0].name, "MetadataEntry");
    }

    #[test]
    fn test_parse_exposes_attributes_as_strings() {
        let root = parse_document(SAMPLE).unwrap();
        let record = root.select("HealthData.Record")[0];
        assert_eq!(record.attr("value"), Some("120"));
        assert_eq!(record.attr("startDate"), Some("2024-01-15 08:50:00 +0000"));
        assert_eq!(record.attr("missing"), None);
    }

    #[test]
    fn test_parse_unescapes_text_and_attributes() {
        let root = parse_document(r#"<a title="x &lt; y">fish &amp; chips</a>"#).unwrap();
        assert_eq!(root.attr("title"), Some("x < y"));
        assert_eq!(root.text.as_deref(), Some("fish & chips"));
    }

    #[test]
    fn test_parse_mismatched_end_tag_fails() {
        let err = parse_document("<HealthData><Record></HealthData>").unwrap_err();
        assert!(matches!(err, StepsError::XmlParse { .. }));
    }

    #[test]
    fn test_parse_cdata_outside_root_fails() {
        let err = parse_document("<HealthData/><![CDATA[junk]]>").unwrap_err();
        assert!(matches!(err, StepsError::XmlParse { .. }), "got {err:?}");
    }

    #[test]
    fn test_parse_cdata_inside_root_is_text() {
        let root = parse_document("<a><![CDATA[x < y]]></a>").unwrap();
        assert_eq!(root.text.as_deref(), Some("x < y"));
    }

    #[test]
    fn test_parse_unclosed_root_fails() {
        let err = parse_document("<HealthData><Record/>").unwrap_err();
        assert!(matches!(err, StepsError::XmlParse { .. }));
    }

    #[test]
    fn test_parse_empty_document_fails() {
        let err = parse_document("").unwrap_err();
        assert!(matches!(err, StepsError::XmlParse { .. }));
    }

    #[test]
    fn test_parse_second_root_fails() {
        let err = parse_document("<a/><b/>").unwrap_err();
        assert!(matches!(err, StepsError::XmlParse { .. }));
    }

    #[test]
    fn test_parse_text_outside_root_fails() {
        let err = parse_document("just some words").unwrap_err();
        assert!(matches!(err, StepsError::XmlParse { .. }));
    }

    // ── select ────────────────────────────────────────────────────────────────

    #[test]
    fn test_select_dotted_path() {
        let root = parse_document(SAMPLE).unwrap();
        assert_eq!(root.select("HealthData.Record").len(), 2);
        assert_eq!(root.select("HealthData.Record.MetadataEntry").len(), 1);
        assert_eq!(root.select("HealthData").len(), 1);
    }

    #[test]
    fn test_select_wrong_root_is_empty() {
        let root = parse_document(SAMPLE).unwrap();
        assert!(root.select("Export.Record").is_empty());
    }

    #[test]
    fn test_select_missing_child_is_empty() {
        let root = parse_document("<HealthData><Workout/></HealthData>").unwrap();
        assert!(root.select("HealthData.Record").is_empty());
    }

    // ── load_document ─────────────────────────────────────────────────────────

    #[test]
    fn test_load_document_from_file() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "export.xml", SAMPLE);

        let root = load_document(&path).unwrap();
        assert_eq!(root.name, "HealthData");
    }

    #[test]
    fn test_load_document_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load_document(&dir.path().join("nope.xml")).unwrap_err();
        match err {
            StepsError::FileRead { path, source } => {
                assert!(path.ends_with("nope.xml"));
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected FileRead, got {other:?}"),
        }
    }

    #[test]
    fn test_load_document_invalid_utf8() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("latin1.xml");
        std::fs::write(&path, [0x3c, 0x61, 0x3e, 0xff, 0xfe, 0x3c, 0x2f, 0x61, 0x3e]).unwrap();

        let err = load_document(&path).unwrap_err();
        assert!(matches!(err, StepsError::FileRead { .. }));
    }

    #[test]
    fn test_load_document_malformed() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "broken.xml", "<HealthData><Record type=\"x\"");

        let err = load_document(&path).unwrap_err();
        assert!(matches!(err, StepsError::XmlParse { .. }));
    }
}
