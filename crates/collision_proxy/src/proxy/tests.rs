//! Scenario tests for collision proxy generation
//!
//! Each test builds a small robot scene, runs the builder and inspects the
//! objects it leaves behind.

use approx::assert_relative_eq;

use super::*;
use crate::foundation::math::{utils, Point3, Quat, Transform, Vec3};
use crate::physics::{CollisionGeometry, SceneLayers};
use crate::scene::{BoundingBox, ObjectId, ObjectRole, ParentType, SceneError, SceneObject};

const EPSILON: f32 = 1e-5;

fn visual(name: &str, size: Vec3) -> SceneObject {
    SceneObject::new(name, ObjectRole::Visual)
        .with_bound_box(BoundingBox::from_size(size))
        .selected()
}

fn only_proxy(report: &BuildReport) -> ObjectId {
    assert_eq!(report.created.len(), 1, "expected exactly one proxy: {report:?}");
    report.created[0].proxy
}

#[test]
fn test_capsule_example_arm() {
    let mut scene = Scene::new();
    let source = scene.add(
        visual("visual_arm1", Vec3::new(0.1, 0.1, 0.4))
            .with_transform(Transform::from_position(Vec3::new(1.0, 2.0, 3.0))),
    );

    let report = CollisionProxyBuilder::new()
        .build(&mut scene, GeometryType::Capsule)
        .unwrap();

    assert_eq!(report.created, vec![ProxyRecord { source, proxy: report.created[0].proxy }]);
    let proxy = scene.object(only_proxy(&report)).unwrap();
    assert_eq!(proxy.name, "collision_arm1");
    assert_eq!(proxy.role, ObjectRole::Collision);
    assert_eq!(proxy.layers, SceneLayers::COLLISION);
    assert_eq!(proxy.text_property(GEOMETRY_TYPE_PROPERTY), Some("capsule"));
    assert_relative_eq!(proxy.float_property(RADIUS_PROPERTY).unwrap(), 0.05, epsilon = EPSILON);
    assert_relative_eq!(proxy.float_property(HEIGHT_PROPERTY).unwrap(), 0.3, epsilon = EPSILON);
    assert_relative_eq!(proxy.transform.position, Vec3::new(1.0, 2.0, 3.0), epsilon = EPSILON);

    let Some(CollisionGeometry::Compound(parts)) = &proxy.geometry else {
        panic!("expected a joined capsule, got {:?}", proxy.geometry);
    };
    assert_eq!(parts.len(), 3);
    assert!(matches!(
        parts[0].geometry,
        CollisionGeometry::Cylinder { radius, height }
            if (radius - 0.05).abs() < EPSILON && (height - 0.3).abs() < EPSILON
    ));
    assert_relative_eq!(parts[1].offset, Vec3::new(0.0, 0.0, 0.15), epsilon = EPSILON);
    assert_relative_eq!(parts[2].offset, Vec3::new(0.0, 0.0, -0.15), epsilon = EPSILON);

    // Joined spheres are gone, the source is untouched
    assert_eq!(scene.len(), 2);
    assert!(scene.find_by_name("tmpsph1").is_none());
    assert_relative_eq!(proxy.dimensions(), Vec3::new(0.1, 0.1, 0.4), epsilon = EPSILON);
}

#[test]
fn test_capsule_along_x_places_caps_along_x() {
    let mut scene = Scene::new();
    scene.add(visual("visual_beam", Vec3::new(1.0, 0.2, 0.2)));

    let report = CollisionProxyBuilder::new()
        .build(&mut scene, GeometryType::Capsule)
        .unwrap();

    let proxy = scene.object(only_proxy(&report)).unwrap();
    // 1.0 - 2 * 0.1
    assert_relative_eq!(proxy.float_property(HEIGHT_PROPERTY).unwrap(), 0.8, epsilon = EPSILON);
    let Some(CollisionGeometry::Compound(parts)) = &proxy.geometry else {
        panic!("expected a joined capsule, got {:?}", proxy.geometry);
    };
    let top = proxy.transform.transform_point(&Point3::from(parts[1].offset));
    assert_relative_eq!(top, Point3::new(0.4, 0.0, 0.0), epsilon = EPSILON);
}

#[test]
fn test_capsule_height_has_a_floor() {
    let mut scene = Scene::new();
    scene.add(visual("visual_ball", Vec3::new(0.2, 0.2, 0.2)));

    let report = CollisionProxyBuilder::new()
        .build(&mut scene, GeometryType::Capsule)
        .unwrap();

    let proxy = scene.object(only_proxy(&report)).unwrap();
    assert_relative_eq!(proxy.float_property(HEIGHT_PROPERTY).unwrap(), 0.001, epsilon = 1e-7);
    assert_relative_eq!(proxy.float_property(RADIUS_PROPERTY).unwrap(), 0.1, epsilon = EPSILON);
}

#[test]
fn test_box_matches_dimensions_and_world_center() {
    let mut scene = Scene::new();
    let rotation = Quat::from_axis_angle(&Vec3::z_axis(), std::f32::consts::FRAC_PI_2);
    scene.add(
        SceneObject::new("visual_base", ObjectRole::Visual)
            .with_bound_box(BoundingBox::from_min_max(
                Vec3::new(0.0, -0.1, -0.2),
                Vec3::new(1.0, 0.1, 0.2),
            ))
            .with_transform(Transform::from_position_rotation(Vec3::new(0.0, 0.0, 1.0), rotation))
            .with_material("steel")
            .selected(),
    );

    let report = CollisionProxyBuilder::new()
        .build(&mut scene, GeometryType::Box)
        .unwrap();

    let proxy = scene.object(only_proxy(&report)).unwrap();
    assert_eq!(proxy.name, "collision_base");
    assert_eq!(proxy.first_material(), Some("steel"));
    assert_eq!(proxy.text_property(GEOMETRY_TYPE_PROPERTY), Some("box"));
    let Some(CollisionGeometry::Box { size }) = proxy.geometry else {
        panic!("expected a box, got {:?}", proxy.geometry);
    };
    assert_relative_eq!(size, Vec3::new(1.0, 0.2, 0.4), epsilon = EPSILON);
    // Local center (0.5, 0, 0) turned a quarter about Z
    assert_relative_eq!(proxy.transform.position, Vec3::new(0.0, 0.5, 1.0), epsilon = EPSILON);
    assert_relative_eq!(proxy.transform.rotation, rotation, epsilon = EPSILON);
}

#[test]
fn test_sphere_radius() {
    let mut scene = Scene::new();
    scene.add(visual("visual_head", Vec3::new(0.3, 0.5, 0.2)));

    let report = CollisionProxyBuilder::new()
        .build(&mut scene, GeometryType::Sphere)
        .unwrap();

    let proxy = scene.object(only_proxy(&report)).unwrap();
    assert_eq!(proxy.geometry, Some(CollisionGeometry::Sphere { radius: 0.25 }));
    assert!(proxy.first_material().is_none());
}

#[test]
fn test_cylinder_alignment_follows_source_rotation() {
    let mut scene = Scene::new();
    let source_rotation = Quat::from_axis_angle(&Vec3::x_axis(), 0.4);
    scene.add(
        visual("visual_forearm", Vec3::new(0.6, 0.1, 0.2))
            .with_transform(Transform::from_position_rotation(Vec3::zeros(), source_rotation)),
    );

    let builder = CollisionProxyBuilder::new();
    let report = builder.build(&mut scene, GeometryType::Cylinder).unwrap();

    let proxy = scene.object(only_proxy(&report)).unwrap();
    assert_eq!(
        proxy.geometry,
        Some(CollisionGeometry::Cylinder { radius: 0.1, height: 0.6 })
    );
    let expected = source_rotation * utils::quarter_turn_y();
    assert_relative_eq!(proxy.transform.rotation, expected, epsilon = EPSILON);
    // The cylinder axis ends up on the source's local X
    assert_relative_eq!(
        proxy.transform.rotation * Vec3::z(),
        source_rotation * Vec3::x(),
        epsilon = EPSILON
    );
}

#[test]
fn test_plan_reports_euler_orientation() {
    let builder = CollisionProxyBuilder::new();
    let source = visual("visual_leg", Vec3::new(0.1, 0.5, 0.1));

    let plan = builder.plan(&source, GeometryType::Cylinder);

    assert_eq!(plan.name, "collision_leg");
    assert_eq!(plan.material, None);
    let euler = plan.rotation_euler();
    assert_relative_eq!(euler.x, std::f32::consts::FRAC_PI_2, epsilon = EPSILON);
    assert_relative_eq!(euler.y, 0.0, epsilon = EPSILON);
    assert_relative_eq!(euler.z, 0.0, epsilon = EPSILON);
}

#[test]
fn test_no_visual_selected_cancels() {
    let mut scene = Scene::new();
    scene.add(SceneObject::new("link_base", ObjectRole::Link).selected());
    scene.add(visual("visual_base", Vec3::new(1.0, 1.0, 1.0)));
    scene.deselect_all();
    let link = scene.find_by_name("link_base").unwrap();
    scene.select_objects(&[link], true, None);

    let builder = CollisionProxyBuilder::new();
    assert_eq!(
        builder.build(&mut scene, GeometryType::Box),
        Err(ProxyError::NotEnoughInputs)
    );
    assert_eq!(scene.len(), 2);
    assert!(scene.selected().is_empty());

    scene.select_objects(&[link], true, None);
    let command = CreateCollisionObjects::new(GeometryType::Box);
    assert_eq!(command.execute(&mut scene), OperatorResult::Cancelled);
    assert_eq!(scene.len(), 2);
}

#[test]
fn test_only_visuals_get_proxies() {
    let mut scene = Scene::new();
    let link = scene.add(SceneObject::new("link_arm", ObjectRole::Link).selected());
    let upper = scene.add(visual("visual_upper", Vec3::new(0.1, 0.1, 0.3)));
    let lower = scene.add(visual("visual_lower", Vec3::new(0.1, 0.1, 0.3)));

    let report = CreateCollisionObjects::new(GeometryType::Box)
        .run(&mut scene)
        .unwrap();

    let sources: Vec<ObjectId> = report.created.iter().map(|r| r.source).collect();
    assert_eq!(sources, vec![upper, lower]);
    assert!(scene.children(link).is_empty());
    assert_eq!(scene.len(), 5);
    assert!(!scene.object(link).unwrap().selected);
}

#[test]
fn test_mesh_is_reported_unsupported() {
    let mut scene = Scene::new();
    let source = scene.add(visual("visual_body", Vec3::new(1.0, 1.0, 1.0)));

    let command = CreateCollisionObjects::new(GeometryType::Mesh);
    let report = command.run(&mut scene).unwrap();
    assert!(report.created.is_empty());
    assert_eq!(report.unsupported, vec![source]);
    assert_eq!(scene.len(), 1);

    scene.select_objects(&[source], true, None);
    assert_eq!(command.execute(&mut scene), OperatorResult::Finished);
}

#[test]
fn test_proxy_takes_over_parent_binding() {
    let mut scene = Scene::new();
    let armature = scene.add(SceneObject::new("armature", ObjectRole::Link));
    let source = scene.add(visual("visual_arm", Vec3::new(0.1, 0.1, 0.4)));
    scene
        .set_parent(source, armature, ParentType::Bone, Some("arm".to_string()))
        .unwrap();

    let report = CollisionProxyBuilder::new()
        .build(&mut scene, GeometryType::Cylinder)
        .unwrap();

    let proxy_id = only_proxy(&report);
    let proxy = scene.object(proxy_id).unwrap();
    assert_eq!(proxy.parent, Some(armature));
    assert_eq!(proxy.parent_type, ParentType::Bone);
    assert_eq!(proxy.parent_bone.as_deref(), Some("arm"));
    assert_eq!(proxy.transform.scale, Vec3::new(1.0, 1.0, 1.0));
    assert_eq!(scene.children(armature), vec![source, proxy_id]);
    assert_eq!(scene.selected(), vec![armature, proxy_id]);
    assert_eq!(scene.active(), Some(armature));
}

#[test]
fn test_scene_fault_keeps_earlier_proxies() {
    let mut scene = Scene::new();
    let armature = scene.add(SceneObject::new("armature", ObjectRole::Link));
    scene.add(visual("visual_good", Vec3::new(0.2, 0.2, 0.2)));
    let mut broken = visual("visual_broken", Vec3::new(0.2, 0.2, 0.2));
    // Bone binding without a bone name cannot be reproduced on the proxy
    broken.parent = Some(armature);
    broken.parent_type = ParentType::Bone;
    scene.add(broken);

    let err = CollisionProxyBuilder::new()
        .build(&mut scene, GeometryType::Box)
        .unwrap_err();

    assert_eq!(
        err,
        ProxyError::Scene(SceneError::MissingParentBone {
            child: "collision_broken".to_string()
        })
    );
    assert!(scene.find_by_name("collision_good").is_some());
    // The proxy for the broken source exists but stays unparented
    let orphan = scene.find_by_name("collision_broken").unwrap();
    assert_eq!(scene.object(orphan).unwrap().parent, None);
}

#[test]
fn test_repeated_runs_get_unique_names() {
    let mut scene = Scene::new();
    let source = scene.add(visual("visual_arm", Vec3::new(0.1, 0.1, 0.4)));
    let builder = CollisionProxyBuilder::new();

    builder.build(&mut scene, GeometryType::Box).unwrap();
    scene.select_objects(&[source], true, None);
    let report = builder.build(&mut scene, GeometryType::Sphere).unwrap();

    let proxy = scene.object(only_proxy(&report)).unwrap();
    assert_eq!(proxy.name, "collision_arm.001");
}

#[test]
fn test_custom_config_tokens() {
    let mut scene = Scene::new();
    scene.add(visual("vis_wheel", Vec3::new(0.3, 0.3, 0.1)));
    let config = ProxyConfig {
        visual_prefix: "vis".to_string(),
        collision_prefix: "col".to_string(),
        ..ProxyConfig::default()
    };

    let report = CreateCollisionObjects::new(GeometryType::Cylinder)
        .with_config(config)
        .run(&mut scene)
        .unwrap();

    let proxy = scene.object(only_proxy(&report)).unwrap();
    assert_eq!(proxy.name, "col_wheel");
    // Wheel axis is the first of the two equal long sides
    assert_eq!(
        proxy.geometry,
        Some(CollisionGeometry::Cylinder { radius: 0.15, height: 0.3 })
    );
}
