#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use bintgen_catalog::TypeRef;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn catalog() -> TypeCatalog {
    let mut catalog = TypeCatalog::new("model");
    catalog
        .insert_record(
            "User",
            vec![
                FieldDecl::new("ID", TypeRef::named("int")),
                FieldDecl::new("Name", TypeRef::named("string")),
                FieldDecl::new("Tags", TypeRef::slice_of("string", false)),
                FieldDecl::new("Child", TypeRef::pointer_to("Other")),
            ],
        )
        .expect("insert User");
    catalog.insert_record("Other", vec![]).expect("insert Other");
    catalog.insert_alias("Level", "int32").expect("insert Level");
    catalog.insert_alias("Priority", "Level").expect("insert Priority");
    catalog.insert_alias("Admin", "User").expect("insert Admin");
    catalog.insert_alias("Loop", "Loop").expect("insert Loop");
    catalog.insert_alias("Ping", "Pong").expect("insert Ping");
    catalog.insert_alias("Pong", "Ping").expect("insert Pong");
    catalog.insert_slice("Ints", "int", false).expect("insert Ints");
    catalog.insert_slice("Levels", "Level", false).expect("insert Levels");
    catalog.insert_slice("Others", "Other", true).expect("insert Others");
    catalog.insert_slice("Matrix", "Ints", false).expect("insert Matrix");
    catalog
}

fn field(ty: &str) -> FieldDecl {
    FieldDecl::new("F", TypeRef::parse(ty).expect("valid type"))
}

fn strategy(ty: &str) -> FieldStrategy {
    classify(&field(ty), &catalog()).expect("no lookup failure")
}

fn reason(ty: &str) -> Option<UnsupportedReason> {
    match strategy(ty) {
        FieldStrategy::Unsupported { reason, .. } => Some(reason),
        _ => None,
    }
}

#[test]
fn primitives_by_value_and_pointer() {
    assert_eq!(
        strategy("int"),
        FieldStrategy::BaseType {
            base: Primitive::Int
        }
    );
    assert_eq!(
        strategy("*float64"),
        FieldStrategy::BaseType {
            base: Primitive::Float64
        }
    );
    assert_eq!(
        strategy("time.Time"),
        FieldStrategy::BaseType {
            base: Primitive::Time
        }
    );
}

#[test]
fn derived_types_resolve_transitively() {
    assert_eq!(
        strategy("Level"),
        FieldStrategy::DerivedBaseType {
            alias: "Level".to_string(),
            base: Primitive::Int32
        }
    );
    assert_eq!(
        strategy("*Priority"),
        FieldStrategy::DerivedBaseType {
            alias: "Priority".to_string(),
            base: Primitive::Int32
        }
    );
}

#[test]
fn slices_of_primitives() {
    assert_eq!(
        strategy("[]string"),
        FieldStrategy::BaseSliceType {
            element: Primitive::String
        }
    );
    assert_eq!(
        strategy("Ints"),
        FieldStrategy::BaseSliceType {
            element: Primitive::Int
        }
    );
}

#[test]
fn slices_of_derived_types() {
    let expected = FieldStrategy::DerivedSliceType {
        element: "Level".to_string(),
        base: Primitive::Int32,
    };
    assert_eq!(strategy("[]Level"), expected);
    assert_eq!(strategy("Levels"), expected);
}

#[test]
fn records_by_value_and_pointer() {
    let expected = FieldStrategy::StructType {
        record: "Other".to_string(),
    };
    assert_eq!(strategy("Other"), expected);
    assert_eq!(strategy("*Other"), expected);
}

#[test]
fn slices_of_records() {
    assert_eq!(
        strategy("[]Other"),
        FieldStrategy::StructSliceType {
            record: "Other".to_string(),
            pointer_element: false
        }
    );
    assert_eq!(
        strategy("[]*Other"),
        FieldStrategy::StructSliceType {
            record: "Other".to_string(),
            pointer_element: true
        }
    );
    assert_eq!(
        strategy("Others"),
        FieldStrategy::StructSliceType {
            record: "Other".to_string(),
            pointer_element: true
        }
    );
}

#[test]
fn mixed_record_classifies_in_order() {
    let catalog = catalog();
    let kinds: Vec<_> = catalog
        .record("User")
        .expect("User is a record")
        .iter()
        .map(|f| classify(f, &catalog).expect("classifies").kind())
        .collect();
    assert_eq!(
        kinds,
        vec!["BaseType", "BaseType", "BaseSliceType", "StructType"]
    );
}

#[test]
fn alias_cycles_are_unsupported() {
    assert_eq!(
        reason("Loop"),
        Some(UnsupportedReason::AliasCycle(vec![
            "Loop".to_string(),
            "Loop".to_string()
        ]))
    );
    assert_eq!(
        reason("[]Ping"),
        Some(UnsupportedReason::AliasCycle(vec![
            "Ping".to_string(),
            "Pong".to_string(),
            "Ping".to_string()
        ]))
    );
}

#[test]
fn alias_of_record_is_unsupported() {
    assert_eq!(reason("Admin"), Some(UnsupportedReason::NoStrategy));
}

#[test]
fn pointer_shapes_without_wire_operations() {
    assert_eq!(reason("*[]int"), Some(UnsupportedReason::PointerToSlice));
    assert_eq!(reason("*Ints"), Some(UnsupportedReason::PointerToSlice));
    assert_eq!(reason("[]*int"), Some(UnsupportedReason::PointerElements));
    assert_eq!(reason("[]*Level"), Some(UnsupportedReason::PointerElements));
}

#[test]
fn nested_slices_are_unsupported() {
    assert_eq!(reason("[]Ints"), Some(UnsupportedReason::NoStrategy));
    assert_eq!(reason("Matrix"), Some(UnsupportedReason::NoStrategy));
}

#[test]
fn unsupported_carries_type_and_field() {
    let strategy = classify(
        &FieldDecl::new("Spin", TypeRef::named("Loop")),
        &catalog(),
    )
    .expect("no lookup failure");
    match strategy {
        FieldStrategy::Unsupported {
            type_name, field, ..
        } => {
            assert_eq!(type_name, "Loop");
            assert_eq!(field, "Spin");
        }
        other => panic!("expected Unsupported, got {other:?}"),
    }
}

#[test]
fn missing_types_are_lookup_failures() {
    let catalog = catalog();
    for ty in ["Unknown", "*Unknown", "[]Unknown", "[]*Unknown", "map[string]int"] {
        let err = classify(&field(ty), &catalog).unwrap_err();
        assert_eq!(err.name, TypeRef::parse(ty).expect("valid type").name);
    }
}

#[test]
fn missing_alias_link_is_lookup_failure() {
    let mut catalog = catalog();
    catalog.insert_alias("Broken", "Gone").expect("insert Broken");
    let err = classify(&field("Broken"), &catalog).unwrap_err();
    assert_eq!(err.name, "Gone");
}

proptest! {
    #[test]
    fn every_primitive_field_is_base_type(
        index in 0..Primitive::ALL.len(),
        pointer in any::<bool>(),
    ) {
        let prim = Primitive::ALL[index];
        let ty = if pointer {
            TypeRef::pointer_to(prim.name())
        } else {
            TypeRef::named(prim.name())
        };
        let result = classify(&FieldDecl::new("F", ty), &TypeCatalog::new("p"));
        prop_assert_eq!(result, Ok(FieldStrategy::BaseType { base: prim }));
    }

    #[test]
    fn alias_chains_resolve_to_terminal_primitive(
        index in 0..Primitive::ALL.len(),
        length in 1usize..8,
    ) {
        let prim = Primitive::ALL[index];
        let mut catalog = TypeCatalog::new("p");
        catalog.insert_alias("A0", prim.name()).expect("insert link");
        for n in 1..length {
            catalog
                .insert_alias(format!("A{n}"), format!("A{}", n - 1))
                .expect("insert link");
        }
        let head = format!("A{}", length - 1);
        let result = classify(&FieldDecl::new("F", TypeRef::named(head.clone())), &catalog);
        prop_assert_eq!(
            result,
            Ok(FieldStrategy::DerivedBaseType { alias: head, base: prim })
        );
    }

    #[test]
    fn alias_rings_never_hang(length in 1usize..8) {
        let mut catalog = TypeCatalog::new("p");
        for n in 0..length {
            catalog
                .insert_alias(format!("A{n}"), format!("A{}", (n + 1) % length))
                .expect("insert link");
        }
        let result = classify(&FieldDecl::new("F", TypeRef::named("A0")), &catalog);
        let is_cycle = matches!(
            result,
            Ok(FieldStrategy::Unsupported { reason: UnsupportedReason::AliasCycle(_), .. })
        );
        prop_assert!(is_cycle);
    }
}
