//! The read-only request model functions evaluate against.
use xacml_xpath::{XmlDocument, XmlNode};

use crate::value::{AttributeValue, Bag};

pub mod categories {
    pub const ACCESS_SUBJECT: &str = "urn:oasis:names:tc:xacml:1.0:subject-category:access-subject";
    pub const RESOURCE: &str = "urn:oasis:names:tc:xacml:3.0:attribute-category:resource";
    pub const ACTION: &str = "urn:oasis:names:tc:xacml:3.0:attribute-category:action";
    pub const ENVIRONMENT: &str = "urn:oasis:names:tc:xacml:3.0:attribute-category:environment";
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContentError {
    #[error("malformed content: {0}")]
    Malformed(#[from] xacml_xpath::Error),
}

/// The XML carried by an `<Content>` element.
#[derive(Debug, Clone)]
pub struct Content {
    document: XmlDocument,
}

impl Content {
    pub fn parse(xml: &str) -> Result<Self, ContentError> {
        Ok(Self { document: XmlDocument::parse(xml)? })
    }

    pub fn document(&self) -> &XmlDocument {
        &self.document
    }

    /// Document node; the context node for XPath evaluation.
    pub fn root(&self) -> XmlNode {
        self.document.root()
    }
}

impl From<XmlDocument> for Content {
    fn from(document: XmlDocument) -> Self {
        Self { document }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub id: String,
    pub issuer: Option<String>,
    pub values: Vec<AttributeValue>,
}

impl Attribute {
    pub fn new(id: impl Into<String>, values: impl IntoIterator<Item = AttributeValue>) -> Self {
        Self { id: id.into(), issuer: None, values: values.into_iter().collect() }
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }
}

/// One `<Attributes>` section.
#[derive(Debug, Clone)]
pub struct Attributes {
    category: String,
    content: Option<Content>,
    attributes: Vec<Attribute>,
}

impl Attributes {
    pub fn new(category: impl Into<String>) -> Self {
        Self { category: category.into(), content: None, attributes: Vec::new() }
    }

    pub fn with_content(mut self, content: Content) -> Self {
        self.content = Some(content);
        self
    }

    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn content(&self) -> Option<&Content> {
        self.content.as_ref()
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }
}

#[derive(Debug, Clone, Default)]
pub struct Request {
    sections: Vec<Attributes>,
}

impl Request {
    pub fn new(sections: impl IntoIterator<Item = Attributes>) -> Self {
        Self { sections: sections.into_iter().collect() }
    }

    pub fn sections(&self) -> &[Attributes] {
        &self.sections
    }

    /// Every `<Content>` under `category`. More than one is a malformed request; callers decide.
    pub fn contents_for(&self, category: &str) -> Vec<&Content> {
        self.sections.iter().filter(|s| s.category == category).filter_map(Attributes::content).collect()
    }

    /// Values of every attribute with `id` (and `issuer`, when given) under `category`.
    pub fn attribute_values(&self, category: &str, id: &str, issuer: Option<&str>) -> Bag {
        self.sections
            .iter()
            .filter(|s| s.category == category)
            .flat_map(|s| &s.attributes)
            .filter(|a| a.id == id && issuer.is_none_or(|i| a.issuer.as_deref() == Some(i)))
            .flat_map(|a| a.values.iter().cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contents_by_category() {
        let content = Content::parse("<doc/>").unwrap();
        let request = Request::new([
            Attributes::new(categories::RESOURCE).with_content(content.clone()),
            Attributes::new(categories::ACTION),
            Attributes::new(categories::RESOURCE).with_content(content),
        ]);
        assert_eq!(request.contents_for(categories::RESOURCE).len(), 2);
        assert!(request.contents_for(categories::ACTION).is_empty());
        assert!(request.contents_for(categories::ENVIRONMENT).is_empty());
    }

    #[test]
    fn malformed_content() {
        assert!(matches!(Content::parse("<doc>"), Err(ContentError::Malformed(_))));
    }

    #[test]
    fn attribute_lookup_honours_issuer() {
        let request = Request::new([Attributes::new(categories::ACCESS_SUBJECT)
            .with_attribute(Attribute::new("role", [AttributeValue::from("doctor")]).with_issuer("hr"))
            .with_attribute(Attribute::new("role", [AttributeValue::from("guest")]))]);
        assert_eq!(request.attribute_values(categories::ACCESS_SUBJECT, "role", None).len(), 2);
        let issued = request.attribute_values(categories::ACCESS_SUBJECT, "role", Some("hr"));
        assert_eq!(issued.into_vec(), vec![AttributeValue::from("doctor")]);
    }
}
