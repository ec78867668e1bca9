//! Constant set construction: every declared constant of a named type.

use serde::Serialize;

use crate::program::{ConstValue, Decl, NamedType, Position, ProgramGraph, TypeRef};

/// A package-level constant whose static type is a named type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Constant {
    /// Declared name
    pub name: String,
    /// The type the constant belongs to
    pub ty: NamedType,
    /// Resolved value; aliases share a value
    pub value: ConstValue,
    /// Position in declaration order within the constant set (0-indexed)
    pub order: usize,
    /// Declaring file
    pub file: String,
    /// Position of the declaration
    pub position: Position,
}

/// Collects the constants of `ty` in declaration order (file order, then
/// source order within a file).
///
/// Only constants whose resolved type *is* `ty` are included: untyped
/// constants or constants of a different type that merely convert to `ty`
/// are not part of the set.
pub fn constants_of<G: ProgramGraph + ?Sized>(graph: &G, ty: &NamedType) -> Vec<Constant> {
    let Some(package) = graph.package(&ty.package) else {
        return Vec::new();
    };

    let wanted = TypeRef::Named(ty.clone());
    let mut constants = Vec::new();
    for file in &package.files {
        for decl in &file.decls {
            let Decl::Const(decl) = decl else {
                continue;
            };
            for spec in decl.specs.iter().filter(|s| s.ty == wanted) {
                constants.push(Constant {
                    name: spec.name.clone(),
                    ty: ty.clone(),
                    value: spec.value.clone(),
                    order: constants.len(),
                    file: file.name.clone(),
                    position: spec.span.start,
                });
            }
        }
    }
    constants
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::{ConstDecl, ConstSpec, Package, Program, SourceFile, Span};

    fn spec(name: &str, ty: &str, value: i128, line: u32) -> ConstSpec {
        ConstSpec {
            name: name.into(),
            span: Span::line(line, 2, 10),
            ty: TypeRef::from(ty),
            value: ConstValue::Int(value),
        }
    }

    fn file(name: &str, specs: Vec<ConstSpec>) -> SourceFile {
        SourceFile {
            name: name.into(),
            comments: Vec::new(),
            decls: vec![Decl::Const(ConstDecl {
                span: Span::lines(1, 20),
                specs,
            })],
        }
    }

    fn program(files: Vec<SourceFile>) -> Program {
        Program {
            packages: vec![Package {
                path: "example".into(),
                initial: true,
                diagnostics: Vec::new(),
                files,
            }],
        }
    }

    #[test]
    fn test_collects_only_exact_type() {
        let p = program(vec![file(
            "a.go",
            vec![
                spec("Monday", "example.Day", 0, 2),
                spec("Tuesday", "example.Day", 1, 3),
                spec("Noon", "example.Time", 12, 4),
                spec("Untyped", "untyped int", 2, 5),
                spec("Other", "other.Day", 3, 6),
            ],
        )]);
        let names: Vec<_> = constants_of(&p, &NamedType::new("example", "Day"))
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Monday", "Tuesday"]);
    }

    #[test]
    fn test_declaration_order_across_files() {
        let p = program(vec![
            file("b.go", vec![spec("Zulu", "example.Day", 5, 2)]),
            file("a.go", vec![spec("Alpha", "example.Day", 6, 2)]),
        ]);
        let constants = constants_of(&p, &NamedType::new("example", "Day"));
        assert_eq!(constants[0].name, "Zulu");
        assert_eq!(constants[0].order, 0);
        assert_eq!(constants[1].name, "Alpha");
        assert_eq!(constants[1].order, 1);
        assert_eq!(constants[1].file, "a.go");
    }

    #[test]
    fn test_aliases_are_kept() {
        let p = program(vec![file(
            "a.go",
            vec![
                spec("Sunday", "example.Day", 0, 2),
                spec("FirstDay", "example.Day", 0, 3),
            ],
        )]);
        let constants = constants_of(&p, &NamedType::new("example", "Day"));
        assert_eq!(constants.len(), 2);
        assert_eq!(constants[0].value, constants[1].value);
    }

    #[test]
    fn test_unknown_package_is_empty() {
        let p = program(Vec::new());
        assert!(constants_of(&p, &NamedType::new("nowhere", "Day")).is_empty());
    }
}
