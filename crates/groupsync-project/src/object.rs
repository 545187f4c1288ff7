//! Typed project records
//!
//! Each record in the object table carries an `isa` naming its class. The
//! classes the sync reads or edits decode into typed structs; every other
//! class is kept as raw JSON. Typed structs keep unknown keys in a flattened
//! `extra` map so that a load/save round trip does not drop anything Xcode
//! wrote.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{Error, ObjectId, Result};

/// Where an element's `path` is anchored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SourceTree {
    /// `<group>`: relative to the enclosing group
    Group,
    /// `<absolute>`: an absolute filesystem path
    Absolute,
    /// `SOURCE_ROOT`: relative to the project's source root
    SourceRoot,
    /// Build-setting anchored trees such as `BUILT_PRODUCTS_DIR` or `SDKROOT`
    Other(String),
}

impl From<String> for SourceTree {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "<group>" => Self::Group,
            "<absolute>" => Self::Absolute,
            "SOURCE_ROOT" => Self::SourceRoot,
            _ => Self::Other(raw),
        }
    }
}

impl From<SourceTree> for String {
    fn from(tree: SourceTree) -> Self {
        match tree {
            SourceTree::Group => "<group>".to_string(),
            SourceTree::Absolute => "<absolute>".to_string(),
            SourceTree::SourceRoot => "SOURCE_ROOT".to_string(),
            SourceTree::Other(raw) => raw,
        }
    }
}

/// `PBXProject`, the root object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectObject {
    pub main_group: ObjectId,
    #[serde(default)]
    pub targets: Vec<ObjectId>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `PBXGroup`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    #[serde(default)]
    pub children: Vec<ObjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub source_tree: SourceTree,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `PBXFileReference`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub source_tree: SourceTree,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_known_file_type: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `PBXNativeTarget`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeTarget {
    pub name: String,
    #[serde(default)]
    pub build_phases: Vec<ObjectId>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `PBXSourcesBuildPhase`
///
/// `files` is optional in the file format; a phase without it cannot be
/// synchronized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourcesBuildPhase {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<ObjectId>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `PBXBuildFile`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_ref: Option<ObjectId>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A record in the project object table.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    Project(ProjectObject),
    Group(Group),
    FileReference(FileReference),
    NativeTarget(NativeTarget),
    SourcesBuildPhase(SourcesBuildPhase),
    BuildFile(BuildFile),
    /// Any class the sync does not interpret
    Other {
        isa: String,
        fields: Map<String, Value>,
    },
}

impl Object {
    pub const PROJECT: &'static str = "PBXProject";
    pub const GROUP: &'static str = "PBXGroup";
    pub const FILE_REFERENCE: &'static str = "PBXFileReference";
    pub const NATIVE_TARGET: &'static str = "PBXNativeTarget";
    pub const SOURCES_BUILD_PHASE: &'static str = "PBXSourcesBuildPhase";
    pub const BUILD_FILE: &'static str = "PBXBuildFile";

    /// The class name written as `isa`.
    pub fn isa(&self) -> &str {
        match self {
            Self::Project(_) => Self::PROJECT,
            Self::Group(_) => Self::GROUP,
            Self::FileReference(_) => Self::FILE_REFERENCE,
            Self::NativeTarget(_) => Self::NATIVE_TARGET,
            Self::SourcesBuildPhase(_) => Self::SOURCES_BUILD_PHASE,
            Self::BuildFile(_) => Self::BUILD_FILE,
            Self::Other { isa, .. } => isa,
        }
    }

    /// Decode a record from its JSON form.
    pub fn from_json(id: &ObjectId, value: Value) -> Result<Self> {
        let Value::Object(mut fields) = value else {
            return Err(invalid(id, "?", "record is not a dictionary"));
        };
        let isa = match fields.remove("isa") {
            Some(Value::String(isa)) => isa,
            _ => return Err(invalid(id, "?", "record has no isa")),
        };

        let object = match isa.as_str() {
            Self::PROJECT => Self::Project(decode(id, &isa, fields)?),
            Self::GROUP => Self::Group(decode(id, &isa, fields)?),
            Self::FILE_REFERENCE => Self::FileReference(decode(id, &isa, fields)?),
            Self::NATIVE_TARGET => Self::NativeTarget(decode(id, &isa, fields)?),
            Self::SOURCES_BUILD_PHASE => Self::SourcesBuildPhase(decode(id, &isa, fields)?),
            Self::BUILD_FILE => Self::BuildFile(decode(id, &isa, fields)?),
            _ => Self::Other { isa, fields },
        };
        Ok(object)
    }

    /// Encode the record back to its JSON form, `isa` included.
    pub fn to_json(&self) -> Result<Value> {
        let value = match self {
            Self::Project(project) => serde_json::to_value(project)?,
            Self::Group(group) => serde_json::to_value(group)?,
            Self::FileReference(file) => serde_json::to_value(file)?,
            Self::NativeTarget(target) => serde_json::to_value(target)?,
            Self::SourcesBuildPhase(phase) => serde_json::to_value(phase)?,
            Self::BuildFile(build_file) => serde_json::to_value(build_file)?,
            Self::Other { fields, .. } => Value::Object(fields.clone()),
        };

        let mut fields = match value {
            Value::Object(fields) => fields,
            _ => Map::new(),
        };
        fields.insert("isa".to_string(), Value::String(self.isa().to_string()));
        Ok(Value::Object(fields))
    }

    /// The `path` of a file element, whatever its class.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Group(group) => group.path.as_deref(),
            Self::FileReference(file) => file.path.as_deref(),
            Self::Other { fields, .. } => fields.get("path").and_then(Value::as_str),
            _ => None,
        }
    }
}

fn decode<T: DeserializeOwned>(id: &ObjectId, isa: &str, fields: Map<String, Value>) -> Result<T> {
    serde_json::from_value(Value::Object(fields)).map_err(|e| invalid(id, isa, e.to_string()))
}

fn invalid(id: &ObjectId, isa: &str, message: impl Into<String>) -> Error {
    Error::InvalidObject {
        id: id.clone(),
        isa: isa.to_string(),
        message: message.into(),
    }
}
