//! Dependency declarations.
//!
//! A declaration is a `(scope, coordinate, version)` triple. Descriptors may
//! use Gradle notation or spell the parts out:
//!
//! ```toml
//! [[dependencies]]
//! scope = "implementation"
//! notation = "androidx.core:core-ktx:1.15.0"
//!
//! [[dependencies]]
//! scope = "coreLibraryDesugaring"
//! coordinate = "com.android.tools:desugar_jdk_libs"
//! version = "2.1.4"
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Group of the desugaring backport library.
pub const DESUGAR_GROUP: &str = "com.android.tools";

/// Artifact name (prefix) of the desugaring backport library. Also matches
/// the `_nio` and `_minimal` flavours.
pub const DESUGAR_NAME: &str = "desugar_jdk_libs";

/// Configuration a dependency is declared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Scope {
    /// Needed to compile and at runtime (`implementation`).
    #[serde(alias = "implementation")]
    CompileLibrary,
    /// Needed only at runtime (`runtimeOnly`).
    #[serde(alias = "runtimeOnly")]
    RuntimeLibrary,
    /// The standard-library backport injected by desugaring.
    CoreLibraryDesugaring,
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::CompileLibrary => "compileLibrary",
            Scope::RuntimeLibrary => "runtimeLibrary",
            Scope::CoreLibraryDesugaring => "coreLibraryDesugaring",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "compileLibrary" | "implementation" => Ok(Scope::CompileLibrary),
            "runtimeLibrary" | "runtimeOnly" => Ok(Scope::RuntimeLibrary),
            "coreLibraryDesugaring" => Ok(Scope::CoreLibraryDesugaring),
            _ => Err(format!(
                "invalid scope '{}'; expected 'compileLibrary', 'runtimeLibrary', \
                 or 'coreLibraryDesugaring'",
                s
            )),
        }
    }
}

/// A `(group, name)` library identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Coordinate {
    group: String,
    name: String,
}

impl Coordinate {
    pub fn new(group: impl Into<String>, name: impl Into<String>) -> Self {
        Coordinate {
            group: group.into(),
            name: name.into(),
        }
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this is the desugaring backport library.
    pub fn is_desugar_library(&self) -> bool {
        self.group == DESUGAR_GROUP && self.name.starts_with(DESUGAR_NAME)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group, self.name)
    }
}

impl FromStr for Coordinate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split(':').collect::<Vec<_>>().as_slice() {
            [group, name] if !group.is_empty() && !name.is_empty() => {
                Ok(Coordinate::new(*group, *name))
            }
            _ => Err(format!("invalid coordinate '{}'; expected 'group:name'", s)),
        }
    }
}

impl TryFrom<String> for Coordinate {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Coordinate> for String {
    fn from(value: Coordinate) -> Self {
        value.to_string()
    }
}

/// A single dependency declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDependency")]
pub struct DependencyDeclaration {
    pub scope: Scope,
    pub coordinate: Coordinate,
    pub version: String,
}

impl DependencyDeclaration {
    pub fn new(scope: Scope, coordinate: Coordinate, version: impl Into<String>) -> Self {
        DependencyDeclaration {
            scope,
            coordinate,
            version: version.into(),
        }
    }

    /// Parse Gradle notation, `group:name:version`.
    pub fn from_notation(scope: Scope, notation: &str) -> Result<Self, String> {
        match notation.split(':').collect::<Vec<_>>().as_slice() {
            [group, name, version]
                if !group.is_empty() && !name.is_empty() && !version.is_empty() =>
            {
                Ok(DependencyDeclaration::new(
                    scope,
                    Coordinate::new(*group, *name),
                    *version,
                ))
            }
            _ => Err(format!(
                "invalid dependency notation '{}'; expected 'group:name:version'",
                notation
            )),
        }
    }

    /// Gradle notation for this declaration.
    pub fn notation(&self) -> String {
        format!("{}:{}", self.coordinate, self.version)
    }
}

/// Raw dependency as written in the descriptor.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDependency {
    Notation {
        scope: Scope,
        notation: String,
    },
    Detailed {
        scope: Scope,
        coordinate: String,
        version: String,
    },
}

impl TryFrom<RawDependency> for DependencyDeclaration {
    type Error = String;

    fn try_from(raw: RawDependency) -> Result<Self, Self::Error> {
        match raw {
            RawDependency::Notation { scope, notation } => {
                DependencyDeclaration::from_notation(scope, &notation)
            }
            RawDependency::Detailed {
                scope,
                coordinate,
                version,
            } => {
                if version.is_empty() {
                    return Err(format!("dependency '{}' has an empty version", coordinate));
                }
                Ok(DependencyDeclaration::new(scope, coordinate.parse()?, version))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Deps {
        dependencies: Vec<DependencyDeclaration>,
    }

    #[test]
    fn test_parse_both_forms() {
        let deps: Deps = toml::from_str(
            r#"
[[dependencies]]
scope = "coreLibraryDesugaring"
notation = "com.android.tools:desugar_jdk_libs:2.1.4"

[[dependencies]]
scope = "implementation"
coordinate = "androidx.core:core-ktx"
version = "1.15.0"
"#,
        )
        .unwrap();

        assert_eq!(deps.dependencies.len(), 2);
        assert_eq!(deps.dependencies[0].scope, Scope::CoreLibraryDesugaring);
        assert!(deps.dependencies[0].coordinate.is_desugar_library());
        assert_eq!(deps.dependencies[1].scope, Scope::CompileLibrary);
        assert_eq!(deps.dependencies[1].coordinate.name(), "core-ktx");
        assert_eq!(deps.dependencies[1].version, "1.15.0");
    }

    #[test]
    fn test_bad_notation_is_rejected() {
        let result: Result<Deps, _> = toml::from_str(
            r#"
[[dependencies]]
scope = "implementation"
notation = "androidx.core:core-ktx"
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_scope_from_str() {
        assert_eq!("implementation".parse::<Scope>(), Ok(Scope::CompileLibrary));
        assert_eq!("runtimeLibrary".parse::<Scope>(), Ok(Scope::RuntimeLibrary));
        assert!("api".parse::<Scope>().is_err());
    }

    #[test]
    fn test_desugar_detection() {
        assert!(Coordinate::new(DESUGAR_GROUP, "desugar_jdk_libs_nio").is_desugar_library());
        assert!(!Coordinate::new("org.example", "desugar_jdk_libs").is_desugar_library());
        assert!(!Coordinate::new(DESUGAR_GROUP, "r8").is_desugar_library());
    }

    #[test]
    fn test_serialize_uses_notation_strings() {
        let dep = DependencyDeclaration::from_notation(
            Scope::CompileLibrary,
            "org.jetbrains.kotlin:kotlin-stdlib:1.9.22",
        )
        .unwrap();

        let json = serde_json::to_value(&dep).unwrap();
        assert_eq!(json["scope"], "compileLibrary");
        assert_eq!(json["coordinate"], "org.jetbrains.kotlin:kotlin-stdlib");
        assert_eq!(json["version"], "1.9.22");
        assert_eq!(dep.notation(), "org.jetbrains.kotlin:kotlin-stdlib:1.9.22");
    }
}
