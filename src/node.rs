use crate::error::{Error, Result};

/// HTML attributes in insertion order.
pub type Attributes = Vec<(String, String)>;

/// A node of the output tree.
///
/// A leaf without a tag is raw text. Parents own their children outright,
/// so a whole document is a single owned tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlNode {
    Leaf {
        tag: Option<String>,
        value: String,
        attributes: Attributes,
    },
    Parent {
        tag: Option<String>,
        children: Vec<HtmlNode>,
        attributes: Attributes,
    },
}

impl HtmlNode {
    /// Raw text, rendered verbatim.
    pub fn text(value: impl Into<String>) -> Self {
        HtmlNode::Leaf {
            tag: None,
            value: value.into(),
            attributes: Vec::new(),
        }
    }

    pub fn leaf(tag: impl Into<String>, value: impl Into<String>) -> Self {
        HtmlNode::Leaf {
            tag: Some(tag.into()),
            value: value.into(),
            attributes: Vec::new(),
        }
    }

    pub fn parent(tag: impl Into<String>, children: Vec<HtmlNode>) -> Self {
        HtmlNode::Parent {
            tag: Some(tag.into()),
            children,
            attributes: Vec::new(),
        }
    }

    /// Append an attribute, keeping earlier ones first.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        match &mut self {
            HtmlNode::Leaf { attributes, .. } | HtmlNode::Parent { attributes, .. } => {
                attributes.push((key.into(), value.into()));
            }
        }
        self
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            HtmlNode::Leaf { tag, .. } | HtmlNode::Parent { tag, .. } => tag.as_deref(),
        }
    }

    pub fn attributes(&self) -> &[(String, String)] {
        match self {
            HtmlNode::Leaf { attributes, .. } | HtmlNode::Parent { attributes, .. } => attributes,
        }
    }

    /// Serialize this node and everything below it.
    pub fn to_html(&self) -> Result<String> {
        let mut out = String::new();
        self.write_html(&mut out)?;
        Ok(out)
    }

    fn write_html(&self, out: &mut String) -> Result<()> {
        match self {
            HtmlNode::Leaf {
                tag,
                value,
                attributes,
            } => {
                if value.is_empty() {
                    return Err(Error::MissingValue { tag: tag.clone() });
                }
                match tag {
                    None => out.push_str(value),
                    Some(tag) => {
                        open_tag(tag, attributes, out);
                        out.push_str(value);
                        close_tag(tag, out);
                    }
                }
            }
            HtmlNode::Parent {
                tag,
                children,
                attributes,
            } => {
                let tag = tag.as_deref().ok_or(Error::MissingTag)?;
                if children.is_empty() {
                    return Err(Error::MissingChildren {
                        tag: tag.to_string(),
                    });
                }
                open_tag(tag, attributes, out);
                for child in children {
                    child.write_html(out)?;
                }
                close_tag(tag, out);
            }
        }
        Ok(())
    }
}

/// Render attributes as ` key="value"` pairs. Values are written as-is.
pub fn attributes_to_html(attributes: &[(String, String)]) -> String {
    let mut out = String::new();
    for (key, value) in attributes {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(value);
        out.push('"');
    }
    out
}

fn open_tag(tag: &str, attributes: &[(String, String)], out: &mut String) {
    out.push('<');
    out.push_str(tag);
    out.push_str(&attributes_to_html(attributes));
    out.push('>');
}

fn close_tag(tag: &str, out: &mut String) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}
