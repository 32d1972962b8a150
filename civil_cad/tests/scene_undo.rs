use civil_cad::{
    alignment::{AlignmentPath, CurveType, VerticalAlignment},
    geometry::Point3,
    items::{point::PointAttributes, EditableValue, Item, ItemId, SceneItem},
    Command, PointRecord, PointRef, Scene, SceneError, TerrainError,
};

/// Ids, kinds and visibility of every item, in list order.
fn snapshot(scene: &Scene) -> Vec<(ItemId, &'static str, bool)> {
    scene
        .items()
        .iter()
        .map(|i| (i.id(), i.kind_name(), i.is_visible()))
        .collect()
}

fn records() -> Vec<PointRecord> {
    vec![
        PointRecord::new("1", 0.0, 0.0, 1.0, "IP"),
        PointRecord::new("2", 0.0, 10.0, 2.0, "IP"),
        PointRecord::new("3", 10.0, 10.0, 3.0, "IP"),
        PointRecord::new("4", 10.0, 0.0, 4.0, "IP"),
    ]
}

fn corner_path() -> AlignmentPath {
    let mut path = AlignmentPath::new();
    path.move_to(0.0, 0.0).unwrap();
    path.line_to(1000.0, 0.0).unwrap();
    path.line_to(1000.0, 1000.0).unwrap();
    path
}

/// Undoes and redoes the last command, checking both directions.
fn assert_symmetric(scene: &mut Scene, before: &[(ItemId, &'static str, bool)]) {
    let after = snapshot(scene);
    assert!(scene.undo().unwrap());
    assert_eq!(snapshot(scene), before);
    assert!(scene.redo().unwrap());
    assert_eq!(snapshot(scene), after);
}

#[test]
fn add_item_is_symmetric() {
    let mut scene = Scene::default();
    let before = snapshot(&scene);
    scene.import_points(None, &records()).unwrap();
    assert_symmetric(&mut scene, &before);
}

#[test]
fn remove_item_restores_position() {
    let mut scene = Scene::default();
    let first = scene.import_points(None, &records()).unwrap();
    scene.import_points(None, &records()).unwrap();
    let before = snapshot(&scene);
    scene.remove_item(first).unwrap();
    assert!(scene.item(first).is_none());
    assert_symmetric(&mut scene, &before);
    scene.undo().unwrap();
    assert_eq!(scene.index_of(first), Some(1));
}

#[test]
fn group_to_surface_is_symmetric() {
    let mut scene = Scene::default();
    let group = scene.import_points(None, &records()).unwrap();
    let before = snapshot(&scene);
    let surface = scene.convert_group_to_surface(group).unwrap();
    assert_eq!(scene.index_of(surface), Some(1));
    assert!(scene.item(group).is_none());
    assert_symmetric(&mut scene, &before);

    let terrain = scene.item(surface).and_then(Item::as_terrain).unwrap();
    assert!((terrain.elevation_at(0.0, 0.0).unwrap() - 1.0).abs() < 1e-6);
}

#[test]
fn surface_to_points_numbers_vertices() {
    let mut scene = Scene::default();
    let points = records().iter().map(PointRecord::position).collect();
    let surface = scene.import_surface(None, points).unwrap();
    let before = snapshot(&scene);
    let group = scene.convert_surface_to_points(surface).unwrap();
    let g = scene.item(group).and_then(Item::as_point_group).unwrap();
    assert_eq!(g.len(), 4);
    assert_eq!(g.point(0).unwrap().number(), "1");
    assert_eq!(g.point(3).unwrap().position(), Point3::new(0.0, 10.0, 4.0));
    assert_symmetric(&mut scene, &before);
}

#[test]
fn point_edit_is_symmetric() {
    let mut scene = Scene::default();
    let group = scene.import_points(Some("Topo"), &records()).unwrap();
    let target = PointRef::member(group, 2);
    let old = scene.point_attributes(target).unwrap().clone();
    let new = PointAttributes {
        number: "300".into(),
        description: "TBM".into(),
        position: Point3::new(11.0, 12.0, 13.0),
    };
    scene.edit_point(target, new.clone()).unwrap();
    assert_eq!(scene.point_attributes(target).unwrap(), &new);
    scene.undo().unwrap();
    assert_eq!(scene.point_attributes(target).unwrap(), &old);
    scene.redo().unwrap();
    assert_eq!(scene.point_attributes(target).unwrap(), &new);

    assert!(matches!(
        scene.edit_point(PointRef::member(group, 9), new),
        Err(SceneError::UnknownMember { member: 9, .. })
    ));
}

#[test]
fn alignment_edits_are_symmetric() {
    let mut scene = Scene::default();
    let id = scene.create_alignment(None, corner_path()).unwrap();
    scene.generate_curves(id, 30.0, CurveType::Circular).unwrap();
    let curved = scene.item(id).and_then(Item::as_alignment).unwrap().path().clone();
    assert_eq!(curved.segment_count(), 4);

    scene
        .set_alignment_profile(id, Some(VerticalAlignment::from_stations(&[(0.0, 5.0), (3000.0, 35.0)])))
        .unwrap();
    scene.undo().unwrap();
    let a = scene.item(id).and_then(Item::as_alignment).unwrap();
    assert!(a.vertical().is_none());
    assert_eq!(a.path(), &curved);

    scene.undo().unwrap();
    let a = scene.item(id).and_then(Item::as_alignment).unwrap();
    assert_eq!(a.path(), &corner_path());
    scene.redo().unwrap();
    let a = scene.item(id).and_then(Item::as_alignment).unwrap();
    assert_eq!(a.path(), &curved);
}

#[test]
fn failed_curve_generation_leaves_history_alone() {
    let mut scene = Scene::default();
    let id = scene.create_alignment(None, corner_path()).unwrap();
    let depth = scene.undo_stack().len();
    assert!(scene.generate_curves(id, -5.0, CurveType::Clothoid).is_err());
    assert_eq!(scene.undo_stack().len(), depth);
}

#[test]
fn visibility_is_symmetric() {
    let mut scene = Scene::default();
    let a = scene.import_points(None, &records()).unwrap();
    scene.select_all();
    let before = snapshot(&scene);
    scene.hide_selection().unwrap();
    assert!(!scene.item(a).unwrap().is_visible());
    assert!(scene.selected_items().is_empty());
    assert_symmetric(&mut scene, &before);

    scene.unhide_all().unwrap();
    assert!(scene.item(a).unwrap().is_visible());
    scene.undo().unwrap();
    assert!(!scene.item(a).unwrap().is_visible());
}

#[test]
fn hiding_a_hidden_item_undoes_to_hidden() {
    let mut scene = Scene::default();
    let a = scene.import_points(None, &records()).unwrap();
    scene.select_all();
    scene.hide_selection().unwrap();

    scene
        .add_undo_command(Command::visibility_changed(vec![(a, false)]))
        .unwrap();
    assert!(!scene.item(a).unwrap().is_visible());
    scene.undo().unwrap();
    assert!(!scene.item(a).unwrap().is_visible());
    scene.undo().unwrap();
    assert!(scene.item(a).unwrap().is_visible());
}

#[test]
fn repeated_ids_in_visibility_change_use_the_first() {
    let mut scene = Scene::default();
    let a = scene.import_points(None, &records()).unwrap();
    scene
        .add_undo_command(Command::visibility_changed(vec![(a, false), (a, true)]))
        .unwrap();
    assert!(!scene.item(a).unwrap().is_visible());
    scene.undo().unwrap();
    assert!(scene.item(a).unwrap().is_visible());
}

#[test]
fn direct_commands_record_live_state() {
    let mut scene = Scene::default();
    let group = scene.import_points(None, &records()).unwrap();
    let target = PointRef::member(group, 0);
    let original = scene.point_attributes(target).unwrap().clone();
    let first = PointAttributes {
        number: "10".into(),
        ..original.clone()
    };
    let second = PointAttributes {
        number: "20".into(),
        ..original.clone()
    };
    scene.add_undo_command(Command::edit_point(target, first.clone())).unwrap();
    scene.add_undo_command(Command::edit_point(target, second.clone())).unwrap();
    scene.undo().unwrap();
    assert_eq!(scene.point_attributes(target).unwrap(), &first);
    scene.undo().unwrap();
    assert_eq!(scene.point_attributes(target).unwrap(), &original);
    scene.redo().unwrap();
    scene.redo().unwrap();
    assert_eq!(scene.point_attributes(target).unwrap(), &second);

    let speed = scene
        .add_editable("Design speed", EditableValue::Float(50.0), Point3::new(0.0, 0.0, 0.0))
        .unwrap();
    let depth = scene.undo_stack().len();
    assert_eq!(
        scene.add_undo_command(Command::edit_value(speed, EditableValue::Int(3))),
        Err(SceneError::ValueType {
            id: speed,
            expected: "float"
        })
    );
    assert_eq!(scene.undo_stack().len(), depth);
}

#[test]
fn ids_stay_unique_through_undo() {
    let mut scene = Scene::default();
    let group = scene.import_points(None, &records()).unwrap();
    scene.remove_item(group).unwrap();
    scene.undo().unwrap();
    let points = records().iter().map(PointRecord::position).collect();
    let surface = scene.import_surface(None, points).unwrap();
    let converted = scene.convert_group_to_surface(group).unwrap();
    let mut ids: Vec<ItemId> = scene.items().iter().map(|i| i.id()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), scene.items().len());
    assert!(surface != converted && surface != group && converted != group);
}

#[test]
fn value_edit_checks_type() {
    let mut scene = Scene::default();
    let id = scene
        .add_editable("Design speed", EditableValue::Float(50.0), Point3::new(0.0, 0.0, 0.0))
        .unwrap();
    scene.set_value(id, EditableValue::Float(60.0)).unwrap();
    assert_eq!(
        scene.set_value(id, EditableValue::Text("fast".into())),
        Err(SceneError::ValueType { id, expected: "float" })
    );
    let value = |s: &Scene| s.item(id).and_then(Item::as_editable).unwrap().value().clone();
    assert_eq!(value(&scene), EditableValue::Float(60.0));
    scene.undo().unwrap();
    assert_eq!(value(&scene), EditableValue::Float(50.0));
    scene.redo().unwrap();
    assert_eq!(value(&scene), EditableValue::Float(60.0));
}

#[test]
fn history_is_capped() {
    let mut scene = Scene::default();
    let id = scene
        .add_editable("Count", EditableValue::Int(0), Point3::new(0.0, 0.0, 0.0))
        .unwrap();
    for i in 1..=250 {
        scene.set_value(id, EditableValue::Int(i)).unwrap();
    }
    assert_eq!(scene.undo_stack().len(), 200);
    while scene.undo().unwrap() {}
    let value = scene.item(id).and_then(Item::as_editable).unwrap().value().clone();
    assert_eq!(value, EditableValue::Int(50));
}

#[test]
fn two_points_cannot_make_a_surface() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut scene = Scene::default();
    let group = scene
        .import_points(
            None,
            &[
                PointRecord::new("1", 0.0, 0.0, 0.0, ""),
                PointRecord::new("2", 0.0, 10.0, 10.0, ""),
            ],
        )
        .unwrap();
    assert_eq!(scene.item(group).and_then(Item::as_point_group).unwrap().len(), 2);
    let before = snapshot(&scene);
    assert_eq!(
        scene.convert_group_to_surface(group),
        Err(SceneError::Terrain(TerrainError::InsufficientPoints { found: 2 }))
    );
    assert_eq!(snapshot(&scene), before);
    assert_eq!(scene.undo_stack().len(), 1);
}

#[test]
fn non_finite_records_are_skipped() {
    let mut scene = Scene::default();
    let mut rows = records();
    rows.push(PointRecord::new("5", f64::NAN, 0.0, 0.0, ""));
    let id = scene.import_points(None, &rows).unwrap();
    let group = scene.item(id).unwrap();
    assert_eq!(group.name(), "Point Group #1");
    assert_eq!(group.as_point_group().unwrap().len(), 4);
}
