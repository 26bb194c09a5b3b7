use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesPI, BytesStart, BytesText, Event};

use crate::errors::ConvertError;

// @module: Generic XML tree parsing and serialization

/// One node of a parsed XML document.
///
/// The tree is deliberately loose: element names, attribute order and child
/// order are kept exactly as read, so substructure this crate never looks at
/// survives a parse/serialize round trip. Only indentation is normalized on
/// output.
#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    /// A nested element
    Element(XmlElement),
    /// Character data (unescaped)
    Text(String),
    /// CDATA section content
    CData(String),
    /// Comment content, without the `<!--`/`-->` markers
    Comment(String),
    /// Processing instruction, without the `<?`/`?>` markers
    ProcessingInstruction(String),
}

/// An XML element: tag name, ordered attributes, ordered children.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        XmlElement {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Value of the named attribute, if present
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// First child element with the given tag name
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find_map(|node| match node {
            XmlNode::Element(element) if element.name == name => Some(element),
            _ => None,
        })
    }

    /// Mutable variant of [`XmlElement::child`]
    pub fn child_mut(&mut self, name: &str) -> Option<&mut XmlElement> {
        self.children.iter_mut().find_map(|node| match node {
            XmlNode::Element(element) if element.name == name => Some(element),
            _ => None,
        })
    }

    /// All child elements with the given tag name, in document order
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter_map(move |node| match node {
            XmlNode::Element(element) if element.name == name => Some(element),
            _ => None,
        })
    }

    /// Concatenated text and CDATA content of this element and its descendants
    pub fn text_content(&self) -> String {
        fn collect(element: &XmlElement, out: &mut String) {
            for node in &element.children {
                match node {
                    XmlNode::Text(text) | XmlNode::CData(text) => out.push_str(text),
                    XmlNode::Element(child) => collect(child, out),
                    _ => {}
                }
            }
        }

        let mut out = String::new();
        collect(self, &mut out);
        out
    }

    /// Replace the element's content with a single text node.
    /// An empty string leaves the element without children so it serializes
    /// in the short `<name/>` form.
    pub fn set_text(&mut self, text: &str) {
        self.children.clear();
        if !text.is_empty() {
            self.children.push(XmlNode::Text(text.to_string()));
        }
    }
}

/// The XML declaration of a document (`<?xml ... ?>`)
#[derive(Debug, Clone, PartialEq)]
pub struct XmlDeclaration {
    pub version: String,
    pub encoding: Option<String>,
    pub standalone: Option<String>,
}

impl Default for XmlDeclaration {
    fn default() -> Self {
        XmlDeclaration {
            version: "1.0".to_string(),
            encoding: Some("UTF-8".to_string()),
            standalone: None,
        }
    }
}

/// A whole XML document: prolog, one root element, epilog.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlDocument {
    pub declaration: XmlDeclaration,
    pub doctype: Option<String>,
    /// Comments and processing instructions that appear before the root element
    pub prolog: Vec<XmlNode>,
    pub root: XmlElement,
    /// Comments and processing instructions that appear after the root element
    pub epilog: Vec<XmlNode>,
}

impl XmlDocument {
    /// Parse bytes into a document tree.
    ///
    /// Whitespace-only text is dropped (the serializer re-indents), everything
    /// else is preserved node for node. Any reader error is reported as
    /// [`ConvertError::MalformedDocument`] with the byte offset at which it
    /// occurred.
    pub fn parse(bytes: &[u8]) -> Result<XmlDocument, ConvertError> {
        let mut reader = Reader::from_reader(bytes);
        reader.config_mut().trim_text(true);

        let mut declaration = XmlDeclaration::default();
        let mut doctype: Option<String> = None;
        let mut prolog: Vec<XmlNode> = Vec::new();
        let mut root: Option<XmlElement> = None;
        let mut epilog: Vec<XmlNode> = Vec::new();
        let mut stack: Vec<XmlElement> = Vec::new();
        let mut buf = Vec::new();

        loop {
            let event = reader
                .read_event_into(&mut buf)
                .map_err(|e| ConvertError::malformed_at(e, reader.buffer_position()))?;

            match event {
                Event::Decl(decl) => {
                    if let Ok(version) = decl.version() {
                        declaration.version = String::from_utf8_lossy(&version).into_owned();
                    }
                    declaration.encoding = decl
                        .encoding()
                        .and_then(|enc| enc.ok())
                        .map(|enc| String::from_utf8_lossy(&enc).into_owned());
                    declaration.standalone = decl
                        .standalone()
                        .and_then(|sa| sa.ok())
                        .map(|sa| String::from_utf8_lossy(&sa).into_owned());
                }
                Event::DocType(text) => {
                    doctype = Some(String::from_utf8_lossy(&text).into_owned());
                }
                Event::Start(start) => {
                    if stack.is_empty() && root.is_some() {
                        return Err(ConvertError::malformed_at(
                            "multiple root elements",
                            reader.buffer_position(),
                        ));
                    }
                    stack.push(element_from_start(&start, &reader)?);
                }
                Event::Empty(start) => {
                    let element = element_from_start(&start, &reader)?;
                    attach(XmlNode::Element(element), &mut stack, &mut root, &mut prolog, &mut epilog, &reader)?;
                }
                Event::End(_) => {
                    // quick-xml has already verified the end tag matches
                    if let Some(element) = stack.pop() {
                        attach(XmlNode::Element(element), &mut stack, &mut root, &mut prolog, &mut epilog, &reader)?;
                    }
                }
                Event::Text(text) => {
                    let value = text
                        .unescape()
                        .map_err(|e| ConvertError::malformed_at(e, reader.buffer_position()))?
                        .into_owned();
                    if value.is_empty() {
                        continue;
                    }
                    if stack.is_empty() {
                        return Err(ConvertError::malformed_at(
                            "text outside of the root element",
                            reader.buffer_position(),
                        ));
                    }
                    attach(XmlNode::Text(value), &mut stack, &mut root, &mut prolog, &mut epilog, &reader)?;
                }
                Event::CData(cdata) => {
                    let value = String::from_utf8_lossy(&cdata.into_inner()).into_owned();
                    attach(XmlNode::CData(value), &mut stack, &mut root, &mut prolog, &mut epilog, &reader)?;
                }
                Event::Comment(comment) => {
                    let value = String::from_utf8_lossy(&comment).into_owned();
                    attach(XmlNode::Comment(value), &mut stack, &mut root, &mut prolog, &mut epilog, &reader)?;
                }
                Event::PI(pi) => {
                    let value = String::from_utf8_lossy(&pi).into_owned();
                    attach(XmlNode::ProcessingInstruction(value), &mut stack, &mut root, &mut prolog, &mut epilog, &reader)?;
                }
                Event::Eof => break,
            }
            buf.clear();
        }

        if let Some(open) = stack.last() {
            return Err(ConvertError::malformed(format!(
                "unexpected end of document inside <{}>",
                open.name
            )));
        }

        let root = root.ok_or_else(|| ConvertError::malformed("document contains no root element"))?;

        Ok(XmlDocument {
            declaration,
            doctype,
            prolog,
            root,
            epilog,
        })
    }

    /// Serialize the tree back to bytes with normalized two-space indentation.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ConvertError> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

        writer
            .write_event(Event::Decl(BytesDecl::new(
                &self.declaration.version,
                self.declaration.encoding.as_deref(),
                self.declaration.standalone.as_deref(),
            )))
            .map_err(serialize_error)?;

        if let Some(doctype) = &self.doctype {
            writer
                .write_event(Event::DocType(BytesText::from_escaped(doctype.as_str())))
                .map_err(serialize_error)?;
        }

        for node in &self.prolog {
            write_node(&mut writer, node)?;
        }
        write_node(&mut writer, &XmlNode::Element(self.root.clone()))?;
        for node in &self.epilog {
            write_node(&mut writer, node)?;
        }

        Ok(writer.into_inner())
    }
}

/// Build an element from a start tag, decoding its attributes in order.
fn element_from_start(
    start: &BytesStart<'_>,
    reader: &Reader<&[u8]>,
) -> Result<XmlElement, ConvertError> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut element = XmlElement::new(name);

    for attribute in start.attributes() {
        let attribute =
            attribute.map_err(|e| ConvertError::malformed_at(e, reader.buffer_position()))?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute
            .unescape_value()
            .map_err(|e| ConvertError::malformed_at(e, reader.buffer_position()))?
            .into_owned();
        element.attributes.push((key, value));
    }

    Ok(element)
}

/// Place a completed node into its parent, the root slot, or the prolog/epilog.
fn attach(
    node: XmlNode,
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    prolog: &mut Vec<XmlNode>,
    epilog: &mut Vec<XmlNode>,
    reader: &Reader<&[u8]>,
) -> Result<(), ConvertError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
        return Ok(());
    }

    match node {
        XmlNode::Element(element) => {
            if root.is_some() {
                return Err(ConvertError::malformed_at(
                    "multiple root elements",
                    reader.buffer_position(),
                ));
            }
            *root = Some(element);
        }
        other => {
            if root.is_some() {
                epilog.push(other);
            } else {
                prolog.push(other);
            }
        }
    }
    Ok(())
}

fn write_node(writer: &mut Writer<Vec<u8>>, node: &XmlNode) -> Result<(), ConvertError> {
    match node {
        XmlNode::Element(element) => {
            let mut start = BytesStart::new(element.name.as_str());
            for (key, value) in &element.attributes {
                start.push_attribute((key.as_str(), value.as_str()));
            }

            if element.children.is_empty() {
                writer.write_event(Event::Empty(start)).map_err(serialize_error)?;
            } else {
                writer.write_event(Event::Start(start)).map_err(serialize_error)?;
                for child in &element.children {
                    write_node(writer, child)?;
                }
                writer
                    .write_event(Event::End(BytesEnd::new(element.name.as_str())))
                    .map_err(serialize_error)?;
            }
        }
        XmlNode::Text(text) => {
            writer
                .write_event(Event::Text(BytesText::new(text)))
                .map_err(serialize_error)?;
        }
        XmlNode::CData(text) => {
            writer
                .write_event(Event::CData(BytesCData::new(text.as_str())))
                .map_err(serialize_error)?;
        }
        XmlNode::Comment(text) => {
            writer
                .write_event(Event::Comment(BytesText::from_escaped(text.as_str())))
                .map_err(serialize_error)?;
        }
        XmlNode::ProcessingInstruction(text) => {
            writer
                .write_event(Event::PI(BytesPI::new(text.as_str())))
                .map_err(serialize_error)?;
        }
    }
    Ok(())
}

fn serialize_error(error: impl std::fmt::Display) -> ConvertError {
    ConvertError::Serialize { reason: error.to_string() }
}
