//! 可依標籤名稱查詢的 XML 文件樹。
//!
//! 以 quick-xml 的事件流建構；註解、處理指令、宣告與 DOCTYPE 不保留，
//! CDATA 視為一般文字節點。

use crate::utils::error::XmlError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    root: XmlElement,
}

impl XmlElement {
    fn from_start(start: &BytesStart<'_>) -> Result<Self, XmlError> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value()?.into_owned();
            attributes.push((key, value));
        }
        Ok(Self {
            name,
            attributes,
            children: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    pub fn nodes(&self) -> &[XmlNode] {
        &self.children
    }

    /// 直接子元素（不含文字節點）
    pub fn children(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(el) => Some(el),
            XmlNode::Text(_) => None,
        })
    }

    /// 依文件順序回傳所有符合名稱的後代元素，不含自身；"*" 符合全部
    pub fn get_elements_by_tag_name(&self, name: &str) -> Vec<&XmlElement> {
        let mut found = Vec::new();
        self.collect_descendants(name, &mut found);
        found
    }

    pub fn first_element_by_tag_name(&self, name: &str) -> Option<&XmlElement> {
        self.get_elements_by_tag_name(name).into_iter().next()
    }

    fn collect_descendants<'a>(&'a self, name: &str, found: &mut Vec<&'a XmlElement>) {
        for child in self.children() {
            if name == "*" || child.name == name {
                found.push(child);
            }
            child.collect_descendants(name, found);
        }
    }

    /// 所有後代文字串接，不做 trim
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.push_text(&mut out);
        out
    }

    fn push_text(&self, out: &mut String) {
        for node in &self.children {
            match node {
                XmlNode::Text(text) => out.push_str(text),
                XmlNode::Element(el) => el.push_text(out),
            }
        }
    }
}

impl XmlDocument {
    pub fn parse(text: &str) -> Result<Self, XmlError> {
        let mut reader = Reader::from_str(text);
        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            match reader.read_event()? {
                Event::Start(start) => {
                    if stack.is_empty() {
                        ensure_single_root(&root, &start)?;
                    }
                    stack.push(XmlElement::from_start(&start)?);
                }
                Event::Empty(start) => {
                    let element = XmlElement::from_start(&start)?;
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(XmlNode::Element(element)),
                        None => {
                            ensure_single_root(&root, &start)?;
                            root = Some(element);
                        }
                    }
                }
                Event::End(_) => {
                    // quick-xml already rejects mismatched end names
                    let element = stack.pop().ok_or(XmlError::NoRootElement)?;
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(XmlNode::Element(element)),
                        None => root = Some(element),
                    }
                }
                Event::Text(text) => {
                    let text = text.unescape()?.into_owned();
                    push_text(&mut stack, text)?;
                }
                Event::CData(cdata) => {
                    let text = String::from_utf8_lossy(&cdata.into_inner()).into_owned();
                    push_text(&mut stack, text)?;
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(open) = stack.pop() {
            return Err(XmlError::UnclosedElement { name: open.name });
        }

        root.map(|root| XmlDocument { root })
            .ok_or(XmlError::NoRootElement)
    }

    pub fn root(&self) -> &XmlElement {
        &self.root
    }

    /// 與 root 的查詢相同，但包含 root 本身
    pub fn get_elements_by_tag_name(&self, name: &str) -> Vec<&XmlElement> {
        let mut found = Vec::new();
        if name == "*" || self.root.name == name {
            found.push(&self.root);
        }
        self.root.collect_descendants(name, &mut found);
        found
    }
}

fn ensure_single_root(root: &Option<XmlElement>, start: &BytesStart<'_>) -> Result<(), XmlError> {
    if root.is_some() {
        return Err(XmlError::MultipleRootElements {
            name: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
        });
    }
    Ok(())
}

fn push_text(stack: &mut [XmlElement], text: String) -> Result<(), XmlError> {
    match stack.last_mut() {
        Some(parent) => {
            if let Some(XmlNode::Text(prev)) = parent.children.last_mut() {
                prev.push_str(&text);
            } else {
                parent.children.push(XmlNode::Text(text));
            }
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(XmlError::TextOutsideRoot),
    }
}
