//! Records produced by a crawl
//!
//! A `PackageRecord` is assembled by one package worker once every class task
//! has settled, then handed to the XML sink. Nothing here is mutated after
//! that handoff.

use indexmap::IndexMap;

/// One named, typed parameter of a method or constructor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub type_name: String,
}

/// Parameters in declaration order
pub type Parameters = Vec<Parameter>;

/// A public method or constructor
///
/// Constructors are modelled as methods named after their class that return
/// the class itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodRecord {
    pub name: String,
    pub description: Option<String>,
    pub parameters: Parameters,
    /// `None` for `void`
    pub return_type: Option<String>,
    /// Fully qualified name of the declaring class
    pub class_name: String,
}

/// Everything harvested from one class page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassRecord {
    /// Fully qualified name
    pub name: String,
    pub description: Option<String>,
    pub methods: Vec<MethodRecord>,
    /// Ancestor class name -> names of the methods inherited from it, nearest ancestor first
    pub inherited: IndexMap<String, Vec<String>>,
}

/// One package and the classes that were successfully harvested from it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRecord {
    pub name: String,
    pub description: Option<String>,
    /// Index-page order
    pub classes: Vec<ClassRecord>,
}

impl PackageRecord {
    /// Total number of methods and constructors across all classes
    pub fn method_count(&self) -> usize {
        self.classes.iter().map(|c| c.methods.len()).sum()
    }

    /// Total number of parameters across all methods
    pub fn parameter_count(&self) -> usize {
        self.classes
            .iter()
            .flat_map(|c| &c.methods)
            .map(|m| m.parameters.len())
            .sum()
    }
}
