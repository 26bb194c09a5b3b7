use log::debug;

use crate::errors::ConvertError;
use crate::xml_tree::{XmlDocument, XmlElement, XmlNode};

// @module: Typed trans-unit view over a generic XLIFF tree

const XLIFF_TAG: &str = "xliff";
const FILE_TAG: &str = "file";
const BODY_TAG: &str = "body";
const UNIT_TAG: &str = "trans-unit";
const SOURCE_TAG: &str = "source";
const TARGET_TAG: &str = "target";
const ID_ATTR: &str = "id";

/// An XLIFF document with the `xliff.file.body.trans-unit[]` structure
/// verified at parse time.
///
/// Everything outside the trans-units stays in the generic tree untouched;
/// this type only offers the few typed operations the converter needs.
#[derive(Debug)]
pub struct XliffDocument {
    tree: XmlDocument,
}

impl XliffDocument {
    /// Parse and validate XLIFF bytes.
    ///
    /// Fails with [`ConvertError::MalformedDocument`] when the bytes are not
    /// well-formed XML, when the `xliff.file.body` path is missing, when the
    /// body holds no trans-units, or when a trans-unit has no `id` attribute.
    pub fn parse(bytes: &[u8]) -> Result<Self, ConvertError> {
        let tree = XmlDocument::parse(bytes)?;
        let document = XliffDocument { tree };
        document.validate_structure()?;
        Ok(document)
    }

    fn validate_structure(&self) -> Result<(), ConvertError> {
        let root = &self.tree.root;
        if root.name != XLIFF_TAG {
            return Err(ConvertError::malformed(format!(
                "root element is <{}>, expected <{XLIFF_TAG}>",
                root.name
            )));
        }

        let file = root
            .child(FILE_TAG)
            .ok_or_else(|| ConvertError::malformed(format!("missing <{FILE_TAG}> element under <{XLIFF_TAG}>")))?;
        let body = file
            .child(BODY_TAG)
            .ok_or_else(|| ConvertError::malformed(format!("missing <{BODY_TAG}> element under <{FILE_TAG}>")))?;

        let mut unit_count = 0usize;
        for unit in body.children_named(UNIT_TAG) {
            unit_count += 1;
            if unit.attribute(ID_ATTR).is_none() {
                return Err(ConvertError::malformed(format!(
                    "<{UNIT_TAG}> #{unit_count} has no {ID_ATTR} attribute"
                )));
            }
        }

        if unit_count == 0 {
            return Err(ConvertError::malformed(format!(
                "no <{UNIT_TAG}> elements under <{BODY_TAG}>"
            )));
        }

        debug!("Parsed XLIFF document with {} trans-unit(s)", unit_count);
        Ok(())
    }

    fn body(&self) -> &XmlElement {
        // Structure was validated in parse(); fall back to the root so the
        // accessors stay panic-free even if a caller bypasses parse().
        self.tree
            .root
            .child(FILE_TAG)
            .and_then(|file| file.child(BODY_TAG))
            .unwrap_or(&self.tree.root)
    }

    /// `(raw_id, source_text)` per trans-unit, in document order.
    ///
    /// When a unit repeats its `<source>` element only the first one counts;
    /// a unit without a `<source>` yields an empty string.
    pub fn unit_entries(&self) -> Vec<(String, String)> {
        self.body()
            .children_named(UNIT_TAG)
            .map(|unit| {
                let raw_id = unit.attribute(ID_ATTR).unwrap_or_default().to_string();
                (raw_id, unit_source_text(unit))
            })
            .collect()
    }

    /// Set every trans-unit's `<target>`, choosing the text per unit.
    ///
    /// The callback receives the unit's raw id and its own source text. An
    /// existing `<target>` element keeps its attributes and position; a unit
    /// without one gets a new `<target>` appended to its children.
    pub fn set_targets_with<F>(&mut self, mut choose: F)
    where
        F: FnMut(&str, &str) -> String,
    {
        let body = match self
            .tree
            .root
            .child_mut(FILE_TAG)
            .and_then(|file| file.child_mut(BODY_TAG))
        {
            Some(body) => body,
            None => return,
        };

        for node in &mut body.children {
            let XmlNode::Element(unit) = node else { continue };
            if unit.name != UNIT_TAG {
                continue;
            }

            let raw_id = unit.attribute(ID_ATTR).unwrap_or_default().to_string();
            let source_text = unit_source_text(unit);
            let target_text = choose(&raw_id, &source_text);

            match unit.child_mut(TARGET_TAG) {
                Some(target) => target.set_text(&target_text),
                None => {
                    let mut target = XmlElement::new(TARGET_TAG);
                    target.set_text(&target_text);
                    unit.children.push(XmlNode::Element(target));
                }
            }
        }
    }

    /// Serialize the document, preserving all untouched structure.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ConvertError> {
        self.tree.to_bytes()
    }
}

/// Text of the first `<source>` child element, empty when absent.
fn unit_source_text(unit: &XmlElement) -> String {
    unit.children_named(SOURCE_TAG)
        .next()
        .map(|source| source.text_content())
        .unwrap_or_default()
}
