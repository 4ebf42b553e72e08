use super::*;

#[test]
fn test_primitives_are_interned() {
    let mut graph = TypeGraph::new();
    let a = graph.primitive(PrimitiveKind::Number);
    let b = graph.primitive(PrimitiveKind::Number);
    let c = graph.primitive(PrimitiveKind::String);

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(graph.len(), 2);
}

#[test]
fn test_identities_differ_across_graphs() {
    let mut first = TypeGraph::new();
    let mut second = TypeGraph::new();
    let a = first.primitive(PrimitiveKind::Number);
    let b = second.primitive(PrimitiveKind::Number);

    assert_eq!(a, b);
    assert_ne!(first.identity(a), second.identity(b));
    assert_eq!(first.identity(a), first.identity(a));
}

#[test]
fn test_reserve_and_define() {
    let mut graph = TypeGraph::new();
    let id = graph.reserve();
    assert_eq!(
        graph.category(id),
        Err(InspectError::UndefinedType {
            identity: graph.identity(id)
        })
    );

    graph
        .define(id, TypeData::Primitive(PrimitiveKind::Boolean))
        .unwrap();
    assert_eq!(graph.category(id), Ok(TypeCategory::Primitive));
}

#[test]
fn test_unknown_handles() {
    let mut graph = TypeGraph::new();
    let stray = TypeId(7);

    assert!(matches!(
        graph.get(stray),
        Err(InspectError::UnknownHandle { .. })
    ));
    assert!(matches!(
        graph.define(stray, TypeData::Union(vec![])),
        Err(InspectError::UnknownHandle { .. })
    ));
}

#[test]
fn test_array_synthetic_members() {
    let mut graph = TypeGraph::new();
    let string = graph.primitive(PrimitiveKind::String);
    let array = graph.array(string);
    let readonly = graph.readonly_array(string);

    assert_eq!(graph.category(array), Ok(TypeCategory::Array));
    assert_eq!(graph.type_arguments(array), Ok(vec![string]));

    let properties = graph.own_properties(array).unwrap();
    assert_eq!(properties.len(), 1);
    assert_eq!(&*properties[0].name, "length");
    assert!(!properties[0].readonly_in_type);

    let properties = graph.own_properties(readonly).unwrap();
    assert!(properties[0].readonly_in_type);

    assert_eq!(
        graph.index_signature(readonly, IndexKind::Number),
        Ok(Some(IndexSignatureInfo {
            readonly: true,
            value_type: string,
        }))
    );
    assert_eq!(graph.index_signature(readonly, IndexKind::String), Ok(None));

    let names = graph.names_for_override_matching(readonly).unwrap();
    assert_eq!(names.bare_name.as_deref(), Some("ReadonlyArray"));
    assert_eq!(
        names.name_with_arguments.as_deref(),
        Some("ReadonlyArray<string>")
    );
}

#[test]
fn test_tuple_synthetic_members() {
    let mut graph = TypeGraph::new();
    let number = graph.primitive(PrimitiveKind::Number);
    let string = graph.primitive(PrimitiveKind::String);
    let pair = graph.readonly_tuple(vec![number, string]);

    assert_eq!(
        graph.category(pair),
        Ok(TypeCategory::Tuple { readonly: true })
    );
    let names: Vec<_> = graph
        .own_properties(pair)
        .unwrap()
        .into_iter()
        .map(|property| {
            assert!(property.readonly_in_type);
            property.name
        })
        .collect();
    assert_eq!(
        names.iter().map(|name| &**name).collect::<Vec<_>>(),
        ["0", "1", "length"]
    );
    assert_eq!(graph.type_arguments(pair), Ok(vec![number, string]));
    assert!(graph.names_for_override_matching(pair).unwrap().is_anonymous());
}

#[test]
fn test_intersection_merges_properties() {
    let mut graph = TypeGraph::new();
    let number = graph.primitive(PrimitiveKind::Number);
    let string = graph.primitive(PrimitiveKind::String);
    let left = graph.object(vec![
        PropertyDef::readonly("shared", number),
        PropertyDef::readonly("left", number),
        PropertyDef::private("secret", number),
    ]);
    let right = graph.object(vec![
        PropertyDef::mutable("shared", number),
        PropertyDef::readonly("secret", number),
        PropertyDef::readonly("right", string),
    ]);
    let both = graph.intersection(vec![left, right]);

    assert_eq!(graph.category(both), Ok(TypeCategory::Intersection));
    assert_eq!(graph.intersection_members(both), Ok(vec![left, right]));

    let properties = graph.own_properties(both).unwrap();
    let find = |name: &str| {
        properties
            .iter()
            .find(|property| &*property.name == name)
            .unwrap()
    };
    assert_eq!(properties.len(), 4);
    assert!(!find("shared").readonly_in_type);
    assert_eq!(find("shared").declared_type, Some(number));
    assert!(find("left").readonly_in_type);
    assert!(find("secret").is_private);
    assert!(!find("secret").readonly_in_type);
    assert!(find("right").readonly_in_type);
}

#[test]
fn test_intersection_of_conflicting_types_nests() {
    let mut graph = TypeGraph::new();
    let number = graph.primitive(PrimitiveKind::Number);
    let string = graph.primitive(PrimitiveKind::String);
    let a = graph.object(vec![PropertyDef::readonly("value", number)]);
    let b = graph.object(vec![PropertyDef::readonly("value", string)]);
    let both = graph.intersection(vec![a, b]);

    let properties = graph.own_properties(both).unwrap();
    let value = properties[0].declared_type.unwrap();
    assert_eq!(graph.category(value), Ok(TypeCategory::Intersection));
    assert_eq!(graph.intersection_members(value), Ok(vec![number, string]));
}

#[test]
fn test_intersection_merges_index_signatures() {
    let mut graph = TypeGraph::new();
    let number = graph.primitive(PrimitiveKind::Number);
    let a = graph.object_shape(ObjectShape::default().with_string_index(number, true));
    let b = graph.object_shape(ObjectShape::default().with_string_index(number, false));
    let both = graph.intersection(vec![a, b]);

    assert_eq!(
        graph.index_signature(both, IndexKind::String),
        Ok(Some(IndexSignatureInfo {
            readonly: false,
            value_type: number,
        }))
    );
}

#[test]
fn test_intersection_with_undefined_member() {
    let mut graph = TypeGraph::new();
    let number = graph.primitive(PrimitiveKind::Number);
    let later = graph.reserve();
    let object = graph.object(vec![PropertyDef::readonly("a", number)]);
    let both = graph.intersection(vec![object, later]);

    assert_eq!(
        graph.own_properties(both),
        Err(InspectError::UndefinedType {
            identity: graph.identity(later)
        })
    );
}

#[test]
fn test_category_mismatch() {
    let mut graph = TypeGraph::new();
    let number = graph.primitive(PrimitiveKind::Number);

    assert_eq!(
        graph.union_members(number),
        Err(InspectError::CategoryMismatch {
            identity: graph.identity(number),
            expected: "union",
            found: TypeCategory::Primitive,
        })
    );
    assert!(matches!(
        graph.conditional_branches(number),
        Err(InspectError::CategoryMismatch { .. })
    ));
}

#[test]
fn test_primitives_have_no_members() {
    let mut graph = TypeGraph::new();
    let number = graph.primitive(PrimitiveKind::Number);

    assert_eq!(graph.own_properties(number), Ok(vec![]));
    assert_eq!(graph.type_arguments(number), Ok(vec![]));
    assert_eq!(graph.index_signature(number, IndexKind::String), Ok(None));
}

#[test]
fn test_override_names() {
    let mut graph = TypeGraph::new();
    let string = graph.primitive(PrimitiveKind::String);
    let number = graph.primitive(PrimitiveKind::Number);
    let map = graph.object_shape(ObjectShape::named("Map", vec![string, number], vec![]));
    graph.set_alias(map, "Lookup", vec![number]);

    let names = graph.names_for_override_matching(map).unwrap();
    assert_eq!(
        names,
        TypeNames {
            bare_name: Some("Map".to_string()),
            name_with_arguments: Some("Map<string, number>".to_string()),
            alias_name: Some("Lookup".to_string()),
            alias_with_arguments: Some("Lookup<number>".to_string()),
        }
    );

    let anonymous = graph.object(vec![]);
    assert!(graph.names_for_override_matching(anonymous).unwrap().is_anonymous());
}

#[test]
fn test_display() {
    let mut graph = TypeGraph::new();
    let number = graph.primitive(PrimitiveKind::Number);
    let string = graph.primitive(PrimitiveKind::String);
    let array = graph.array(number);
    let union = graph.union(vec![array, string]);
    let tuple = graph.readonly_tuple(vec![number, union]);
    let function = graph.function();
    let hole = graph.reserve();

    assert_eq!(graph.display(array), "Array<number>");
    assert_eq!(graph.display(union), "Array<number> | string");
    assert_eq!(
        graph.display(tuple),
        "readonly [number, Array<number> | string]"
    );
    assert_eq!(graph.display(function), "Function");
    assert_eq!(graph.display(hole), "?");
}

#[test]
fn test_display_of_recursive_type_is_bounded() {
    let mut graph = TypeGraph::new();
    let list = graph.reserve();
    let array = graph.array(list);
    graph.define(list, TypeData::Union(vec![array])).unwrap();

    let rendered = graph.display(list);
    assert!(rendered.contains("..."), "{rendered}");
}

#[test]
fn test_intersections_are_interned_by_member_set() {
    let mut graph = TypeGraph::new();
    let a = readonly_record(&mut graph, "a");
    let b = readonly_record(&mut graph, "b");

    let ab = graph.intersection(vec![a, b]);
    let ba = graph.intersection(vec![b, a]);
    let abb = graph.intersection(vec![a, b, b]);

    assert_eq!(ab, ba);
    assert_eq!(ab, abb);
    assert_eq!(graph.intersection_members(ab), Ok(vec![a, b]));
}

#[test]
fn test_intersection_of_recursive_members_refers_to_itself() {
    let mut graph = TypeGraph::new();
    let a = graph.reserve();
    let b = graph.reserve();
    graph
        .define(
            a,
            TypeData::Object(ObjectShape::new(vec![PropertyDef::readonly("next", a)])),
        )
        .unwrap();
    graph
        .define(
            b,
            TypeData::Object(ObjectShape::new(vec![PropertyDef::readonly("next", b)])),
        )
        .unwrap();
    let both = graph.intersection(vec![a, b]);

    let properties = graph.own_properties(both).unwrap();
    assert_eq!(properties.len(), 1);
    assert_eq!(properties[0].declared_type, Some(both));
}

#[test]
fn test_intersection_is_merged_again_when_member_is_defined() {
    let mut graph = TypeGraph::new();
    let number = graph.primitive(PrimitiveKind::Number);
    let tagged = readonly_record(&mut graph, "tag");
    let later = graph.reserve();
    let both = graph.intersection(vec![later, tagged]);
    // Nested intersections over `both` wait for it as well.
    let outer = graph.intersection(vec![both, number]);

    assert!(graph.own_properties(both).is_err());
    assert!(graph.own_properties(outer).is_err());

    graph
        .define(
            later,
            TypeData::Object(ObjectShape::new(vec![PropertyDef::readonly("size", number)])),
        )
        .unwrap();

    for id in [both, outer] {
        let names: Vec<String> = graph
            .own_properties(id)
            .unwrap()
            .into_iter()
            .map(|property| property.name.to_string())
            .collect();
        assert_eq!(names, ["size", "tag"]);
    }
}

#[test]
fn test_next_type_id() {
    assert_eq!(next_type_id(0), TypeId(0));
    assert_eq!(next_type_id(41), TypeId(41));
}

#[test]
#[should_panic(expected = "cannot hold more than")]
fn test_next_type_id_rejects_overflow() {
    next_type_id(u32::MAX as usize);
}

fn readonly_record(graph: &mut TypeGraph, name: &str) -> TypeId {
    let number = graph.primitive(PrimitiveKind::Number);
    graph.object(vec![PropertyDef::readonly(name, number)])
}
