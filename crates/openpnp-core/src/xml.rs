//! Namespaced XML element tree used for envelopes and service bodies.
//!
//! Trees are built bottom-up from nested constructor calls: every builder
//! method consumes and returns a finished `Element`, so there is never an
//! open element left behind on an early return.
//!
//! An element created without a namespace adopts its parent's namespace when
//! it is attached, which matches how PnP bodies declare a default namespace on
//! the body root and leave the children unqualified.

use std::io::Write;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::name::ResolveResult;
use quick_xml::{NsReader, Writer};

use crate::error::{PnpError, Result};

/// One XML element with its attributes, text and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    namespace: Option<String>,
    name: String,
    attributes: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<Element>,
}

impl Element {
    /// Unqualified element (inherits the parent's namespace once attached).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            namespace: None,
            name: name.into(),
            attributes: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Element in an explicit namespace, e.g. a service body root.
    pub fn namespaced(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        let mut el = Self::new(name);
        el.namespace = Some(namespace.into());
        el
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(key, value);
        self
    }

    /// Set the text content. Empty text is the same as no text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.text = (!text.is_empty()).then_some(text);
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.push_child(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        for child in children {
            self.push_child(child);
        }
        self
    }

    /// Leaf element carrying only text.
    pub fn leaf(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(name).with_text(text)
    }

    pub fn push_child(&mut self, mut child: Element) {
        if let Some(ns) = &self.namespace {
            child.inherit_namespace(ns);
        }
        self.children.push(child);
    }

    /// Attach without namespace inheritance.
    pub(crate) fn push_child_verbatim(&mut self, child: Element) {
        self.children.push(child);
    }

    fn inherit_namespace(&mut self, ns: &str) {
        if self.namespace.is_some() {
            return;
        }
        self.namespace = Some(ns.to_owned());
        for child in &mut self.children {
            child.inherit_namespace(ns);
        }
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Local name (no namespace).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Qualified tag in `{namespace}name` notation.
    pub fn tag(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{{{ns}}}{}", self.name),
            None => self.name.clone(),
        }
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set or replace an attribute, keeping its position on replace.
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((key, value)),
        }
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// First child with the given local name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Text of the first child with the given local name.
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).and_then(Element::text)
    }

    /// Parse a complete document and return its root element.
    ///
    /// Whitespace-only text between child elements is dropped, so indentation
    /// never shows up as content. A leaf keeps its text verbatim.
    pub fn parse(input: &[u8]) -> Result<Element> {
        let mut reader = NsReader::from_reader(input);
        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            let (resolved, event) = reader
                .read_resolved_event()
                .map_err(|e| PnpError::malformed(format!("invalid xml: {e}")))?;
            let namespace = match resolved {
                ResolveResult::Bound(ns) => Some(utf8(ns.as_ref())?.to_owned()),
                ResolveResult::Unbound => None,
                ResolveResult::Unknown(prefix) => {
                    return Err(PnpError::malformed(format!(
                        "unknown namespace prefix {:?}",
                        String::from_utf8_lossy(&prefix)
                    )))
                }
            };

            match event {
                Event::Start(start) => stack.push(open(namespace, &start)?),
                Event::Empty(start) => {
                    let el = open(namespace, &start)?;
                    attach(&mut stack, &mut root, el)?;
                }
                Event::End(_) => {
                    let mut el = stack
                        .pop()
                        .ok_or_else(|| PnpError::malformed("unexpected closing tag"))?;
                    el.drop_blank_text();
                    attach(&mut stack, &mut root, el)?;
                }
                Event::Text(text) => {
                    let text = text
                        .unescape()
                        .map_err(|e| PnpError::malformed(format!("invalid text: {e}")))?;
                    append_text(&mut stack, &text)?;
                }
                Event::CData(data) => {
                    let data = data.into_inner();
                    append_text(&mut stack, utf8(&data)?)?;
                }
                Event::Eof => break,
                // declarations, comments, processing instructions, doctype
                _ => {}
            }
        }

        if let Some(unclosed) = stack.last() {
            return Err(PnpError::malformed(format!(
                "unclosed element <{}>",
                unclosed.name
            )));
        }
        root.ok_or_else(|| PnpError::malformed("document has no root element"))
    }

    /// Serialize with an XML declaration.
    pub fn to_document(&self) -> Result<Vec<u8>> {
        let mut writer = Writer::new(Vec::new());
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(write_err)?;
        self.write(&mut writer, None)?;
        Ok(writer.into_inner())
    }

    /// Serialize the element alone, without a declaration.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut writer = Writer::new(Vec::new());
        self.write(&mut writer, None)?;
        Ok(writer.into_inner())
    }

    fn write<W: Write>(&self, writer: &mut Writer<W>, default_ns: Option<&str>) -> Result<()> {
        let mut start = BytesStart::new(self.name.as_str());
        if self.namespace.as_deref() != default_ns {
            start.push_attribute(("xmlns", self.namespace.as_deref().unwrap_or("")));
        }
        for (key, value) in &self.attributes {
            start.push_attribute((key.as_str(), value.as_str()));
        }

        if self.text.is_none() && self.children.is_empty() {
            return writer.write_event(Event::Empty(start)).map_err(write_err);
        }

        writer.write_event(Event::Start(start)).map_err(write_err)?;
        if let Some(text) = &self.text {
            writer
                .write_event(Event::Text(BytesText::new(text)))
                .map_err(write_err)?;
        }
        for child in &self.children {
            child.write(writer, self.namespace.as_deref())?;
        }
        writer
            .write_event(Event::End(BytesEnd::new(self.name.as_str())))
            .map_err(write_err)
    }

    fn drop_blank_text(&mut self) {
        if self.children.is_empty() {
            return;
        }
        if self.text.as_deref().is_some_and(|t| t.trim().is_empty()) {
            self.text = None;
        }
    }
}

fn open(namespace: Option<String>, start: &BytesStart<'_>) -> Result<Element> {
    let mut el = Element::new(utf8(start.local_name().as_ref())?);
    el.namespace = namespace;
    for attr in start.attributes() {
        let attr = attr.map_err(|e| PnpError::malformed(format!("invalid attribute: {e}")))?;
        let key = utf8(attr.key.as_ref())?;
        if key == "xmlns" || key.starts_with("xmlns:") {
            continue;
        }
        let value = attr
            .unescape_value()
            .map_err(|e| PnpError::malformed(format!("invalid attribute value: {e}")))?;
        el.attributes.push((key.to_owned(), value.into_owned()));
    }
    Ok(el)
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, el: Element) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(el);
        return Ok(());
    }
    if root.is_some() {
        return Err(PnpError::malformed("document has more than one root element"));
    }
    *root = Some(el);
    Ok(())
}

fn append_text(stack: &mut [Element], text: &str) -> Result<()> {
    match stack.last_mut() {
        Some(_) if text.is_empty() => Ok(()),
        Some(top) => {
            top.text.get_or_insert_with(String::new).push_str(text);
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(PnpError::malformed("text outside of the root element")),
    }
}

fn utf8(bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(|e| PnpError::malformed(format!("invalid utf-8: {e}")))
}

fn write_err(e: impl std::fmt::Display) -> PnpError {
    PnpError::Internal(format!("xml write failed: {e}"))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn unqualified_children_adopt_parent_namespace() {
        let el = Element::namespaced("urn:a", "request")
            .with_child(Element::new("outer").with_child(Element::leaf("inner", "x")));
        let inner = &el.children()[0].children()[0];
        assert_eq!(inner.tag(), "{urn:a}inner");
    }

    #[test]
    fn default_namespace_is_declared_once() {
        let el = Element::namespaced("urn:a", "request").with_child(Element::new("child"));
        let xml = String::from_utf8(el.to_bytes().unwrap()).unwrap();
        assert_eq!(xml, r#"<request xmlns="urn:a"><child/></request>"#);
    }

    #[test]
    fn parse_resolves_prefixes_and_skips_blank_text() {
        let el = Element::parse(
            br#"<p:a xmlns:p="urn:p" k="v">
                  <p:b>  hi </p:b>
                </p:a>"#,
        )
        .unwrap();
        assert_eq!(el.tag(), "{urn:p}a");
        assert_eq!(el.attr("k"), Some("v"));
        assert_eq!(el.text(), None);
        assert_eq!(el.child_text("b"), Some("  hi "));
    }

    #[test]
    fn parse_rejects_broken_documents() {
        let cases: [&[u8]; 5] = [b"", b"<a>", b"<a></b>", b"<a/><b/>", b"junk<a/>"];
        for bad in cases {
            let err = Element::parse(bad).unwrap_err();
            assert_eq!(err.code(), crate::error::ErrorCode::MalformedMessage);
        }
    }

    #[test]
    fn leaf_text_is_kept_verbatim() {
        let el = Element::parse(b"<a>\n  <cmd>  </cmd>\n  <reason></reason>\n</a>").unwrap();
        assert_eq!(el.text(), None);
        assert_eq!(el.child_text("cmd"), Some("  "));
        assert_eq!(el.child_text("reason"), None);
    }

    #[test]
    fn empty_text_is_no_text() {
        let el = Element::leaf("reason", "");
        assert_eq!(el, Element::new("reason"));
        assert_eq!(String::from_utf8(el.to_bytes().unwrap()).unwrap(), "<reason/>");
    }

    #[test]
    fn escaping_survives_a_round_trip() {
        let el = Element::new("cmd")
            .with_attr("q", "a\"<b>")
            .with_text("show run | include <x> & y");
        let back = Element::parse(&el.to_document().unwrap()).unwrap();
        assert_eq!(back, el);
    }
}
