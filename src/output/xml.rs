//! XML package records
//!
//! One file per package. Classes come first, then every method of every
//! class in one flat list; both carry sequential ids starting at 0:
//!
//! ```text
//! <package>
//!   <name>java.awt</name>
//!   <desc>...</desc>
//!   <class id="0"><name>java.awt.Dialog</name><description>...</description></class>
//!   <method id="0">
//!     <name>setTitle</name>
//!     <description>...</description>
//!     <parameter id="0"><name>title</name><type>java.lang.String</type></parameter>
//!     <class>java.awt.Dialog</class>
//!   </method>
//! </package>
//! ```

use crate::model::PackageRecord;
use crate::output::{OutputError, OutputResult};
use quick_xml::se::Serializer;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n";

/// Serialized shape of a package record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename = "package")]
pub struct PackageDocument {
    pub name: String,
    #[serde(rename = "desc", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "class", default)]
    pub classes: Vec<ClassElement>,
    #[serde(rename = "method", default)]
    pub methods: Vec<MethodElement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassElement {
    #[serde(rename = "@id")]
    pub id: usize,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodElement {
    #[serde(rename = "@id")]
    pub id: usize,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "parameter", default)]
    pub parameters: Vec<ParameterElement>,
    #[serde(rename = "return", default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,
    #[serde(rename = "class")]
    pub class_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterElement {
    #[serde(rename = "@id")]
    pub id: usize,
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

impl PackageDocument {
    /// Lays out a package record, numbering classes, methods and parameters
    pub fn from_record(record: &PackageRecord) -> Self {
        let classes = record
            .classes
            .iter()
            .enumerate()
            .map(|(id, class)| ClassElement {
                id,
                name: class.name.clone(),
                description: class.description.clone(),
            })
            .collect();

        let methods = record
            .classes
            .iter()
            .flat_map(|class| &class.methods)
            .enumerate()
            .map(|(id, method)| MethodElement {
                id,
                name: method.name.clone(),
                description: method.description.clone(),
                parameters: method
                    .parameters
                    .iter()
                    .enumerate()
                    .map(|(id, param)| ParameterElement {
                        id,
                        name: param.name.clone(),
                        type_name: param.type_name.clone(),
                    })
                    .collect(),
                return_type: method.return_type.clone(),
                class_name: method.class_name.clone(),
            })
            .collect();

        Self {
            name: record.name.clone(),
            description: record.description.clone(),
            classes,
            methods,
        }
    }

    pub fn parameter_count(&self) -> usize {
        self.methods.iter().map(|m| m.parameters.len()).sum()
    }
}

/// Renders a package record as an indented XML document
pub fn render_package_xml(record: &PackageRecord) -> OutputResult<String> {
    let document = PackageDocument::from_record(record);

    let mut body = String::new();
    let mut serializer = Serializer::new(&mut body);
    serializer.indent(' ', 2);
    document
        .serialize(serializer)
        .map_err(|e| OutputError::Format(e.to_string()))?;

    let mut xml = String::with_capacity(XML_DECLARATION.len() + body.len() + 1);
    xml.push_str(XML_DECLARATION);
    xml.push_str(&body);
    xml.push('\n');
    Ok(xml)
}

/// Writes `<dir>/<package>.xml`, replacing any previous file
///
/// # Returns
///
/// The path that was written.
pub async fn write_package_xml(dir: &Path, record: &PackageRecord) -> OutputResult<PathBuf> {
    let xml = render_package_xml(record)?;
    let path = dir.join(format!("{}.xml", record.name));
    tokio::fs::write(&path, xml).await?;
    Ok(path)
}

/// Parses a package record file written by [`write_package_xml`]
pub fn read_package_xml(path: &Path) -> OutputResult<PackageDocument> {
    let content = std::fs::read_to_string(path)?;
    parse_package_xml(&content)
}

/// Parses a rendered package document
pub fn parse_package_xml(xml: &str) -> OutputResult<PackageDocument> {
    quick_xml::de::from_str(xml).map_err(|e| OutputError::Format(e.to_string()))
}
