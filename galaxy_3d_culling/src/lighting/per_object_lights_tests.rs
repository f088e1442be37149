use std::sync::Arc;
use glam::{Mat4, Vec3};
use crate::culling::{TransformInfo, VisibleNode};
use crate::lighting::{Light, LightKey};
use crate::math::AABB;
use crate::scene::{Renderable, RendererGroup, RendererId, SimpleRenderable};
use super::*;

// ============================================================================
// Helper Functions
// ============================================================================

fn visible_node(world: Mat4, layer: u32, flags: RendererFlags) -> VisibleNode {
    let renderer = Arc::new(
        SimpleRenderable::new(RendererId(1), world, AABB::new(Vec3::ZERO, Vec3::splat(0.5)))
            .with_layer(layer)
            .with_flags(flags),
    );
    VisibleNode {
        transform: TransformInfo::from_renderer(renderer.as_ref()),
        layer: renderer.layer(),
        flags: renderer.flags(),
        renderer,
        group: RendererGroup::Dynamic,
        node_index: 0,
        lod_fade: 1.0,
    }
}

fn node_at(position: Vec3) -> VisibleNode {
    visible_node(Mat4::from_translation(position), 0, RendererFlags::default())
}

/// sun, spot at origin looking -Z (30 deg, range 10), point at (20, 0, 0) range 5
fn test_lights() -> ActiveLights {
    let lights = vec![
        ActiveLight::new(LightKey::default(), Light::directional(Vec3::NEG_Y, Vec3::ONE, 1.0)),
        ActiveLight::new(LightKey::default(), Light::spot(Vec3::ZERO, Vec3::NEG_Z, 10.0, 30.0, Vec3::ONE, 1.0)),
        ActiveLight::new(LightKey::default(), Light::point(Vec3::new(20.0, 0.0, 0.0), 5.0, Vec3::ONE, 1.0)),
    ];
    ActiveLights {
        lights,
        num_dir_lights: 1,
        num_spot_lights: 1,
        num_point_lights: 1,
        has_main_light: true,
        ..Default::default()
    }
}

// ============================================================================
// CSR table
// ============================================================================

#[test]
fn test_empty_table_is_consistent() {
    let table = ObjectLightIndices::default();
    assert_eq!(table.object_count(), 0);
    assert!(table.is_consistent());
    assert!(table.lights_for(0).is_empty());
}

#[test]
fn test_push_object_runs() {
    let mut table = ObjectLightIndices::default();
    table.push_object([0, 2]);
    table.push_object([]);
    table.push_object([1]);
    assert_eq!(table.offsets(), &[0, 2, 2, 3]);
    assert_eq!(table.lights_for(0), &[0, 2]);
    assert!(table.lights_for(1).is_empty());
    assert_eq!(table.lights_for(2), &[1]);
    assert!(table.is_consistent());
}

// ============================================================================
// Per-light-type tests
// ============================================================================

#[test]
fn test_object_in_spot_cone_gets_spot() {
    let lights = test_lights();
    let table = cull_per_object_lights(&lights, &[node_at(Vec3::new(0.0, 0.0, -5.0))], LightmapMode::Single);
    assert_eq!(table.lights_for(0), &[0, 1]);
}

#[test]
fn test_object_in_spot_box_but_outside_cone() {
    let lights = test_lights();
    let node = visible_node(
        Mat4::from_translation(Vec3::new(2.3, 0.0, -3.0)) * Mat4::from_scale(Vec3::splat(0.2)),
        0,
        RendererFlags::default(),
    );
    assert!(lights.lights[1].bounding_box.intersects(&node.transform.world_aabb));
    let table = cull_per_object_lights(&lights, &[node], LightmapMode::Single);
    assert_eq!(table.lights_for(0), &[0]);
}

#[test]
fn test_point_light_range() {
    let lights = test_lights();
    let nodes = [node_at(Vec3::new(16.0, 0.0, 0.0)), node_at(Vec3::new(26.0, 0.0, 0.0))];
    let table = cull_per_object_lights(&lights, &nodes, LightmapMode::Single);
    assert_eq!(table.lights_for(0), &[0, 2]);
    assert_eq!(table.lights_for(1), &[0]);
    assert_eq!(table.object_count(), 2);
}

#[test]
fn test_point_light_against_scaled_object() {
    let lights = test_lights();
    // box stretched along X reaches from x = 0 to x = 16
    let world = Mat4::from_translation(Vec3::new(8.0, 0.0, 0.0)) * Mat4::from_scale(Vec3::new(16.0, 1.0, 1.0));
    let table = cull_per_object_lights(&lights, &[visible_node(world, 0, RendererFlags::default())], LightmapMode::Single);
    assert!(table.lights_for(0).contains(&2));
}

// ============================================================================
// Common rules
// ============================================================================

#[test]
fn test_light_layer_mask_excludes_object() {
    let mut lights = test_lights();
    lights.lights[0].culling_mask = 1 << 2;
    let table = cull_per_object_lights(
        &lights,
        &[visible_node(Mat4::from_translation(Vec3::new(0.0, 0.0, -5.0)), 3, RendererFlags::default())],
        LightmapMode::Single,
    );
    assert_eq!(table.lights_for(0), &[1]);
}

#[test]
fn test_lightmapped_object_skips_auto_lights_in_single_mode() {
    let mut lights = test_lights();
    lights.lights[0].lightmapping = LightmappingMode::Auto;
    let node = visible_node(
        Mat4::from_translation(Vec3::new(0.0, 0.0, -5.0)),
        0,
        RendererFlags::default() | RendererFlags::LIGHTMAPPED,
    );

    let single = cull_per_object_lights(&lights, std::slice::from_ref(&node), LightmapMode::Single);
    assert_eq!(single.lights_for(0), &[1]);

    let dual = cull_per_object_lights(&lights, std::slice::from_ref(&node), LightmapMode::Dual);
    assert_eq!(dual.lights_for(0), &[0, 1]);
}

#[test]
fn test_unlightmapped_object_keeps_auto_lights() {
    let mut lights = test_lights();
    lights.lights[0].lightmapping = LightmappingMode::Auto;
    let table = cull_per_object_lights(&lights, &[node_at(Vec3::new(0.0, 0.0, -5.0))], LightmapMode::Single);
    assert_eq!(table.lights_for(0), &[0, 1]);
}
