//! Dependency flattening.

use std::collections::HashMap;

use crate::core::dependency::{Coordinate, DependencyDeclaration, Scope};

/// Deduplicate declarations per `(scope, coordinate)`.
///
/// The last declaration's version wins. Each entry keeps the position of
/// the first declaration of its pair, so output order is stable across
/// runs.
pub fn flatten(declarations: &[DependencyDeclaration]) -> Vec<DependencyDeclaration> {
    let mut flattened: Vec<DependencyDeclaration> = Vec::with_capacity(declarations.len());
    let mut index: HashMap<(Scope, &Coordinate), usize> = HashMap::new();

    for decl in declarations {
        match index.get(&(decl.scope, &decl.coordinate)) {
            Some(&i) => {
                if flattened[i].version != decl.version {
                    tracing::debug!(
                        "{} `{}` redeclared: {} -> {}",
                        decl.scope,
                        decl.coordinate,
                        flattened[i].version,
                        decl.version
                    );
                }
                flattened[i].version = decl.version.clone();
            }
            None => {
                index.insert((decl.scope, &decl.coordinate), flattened.len());
                flattened.push(decl.clone());
            }
        }
    }

    flattened
}
